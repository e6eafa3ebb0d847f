//! Robot Framework language versions.
//!
//! Versions order by `(major, minor, patch)` where a missing patch sorts
//! before any present patch, so `3.0 < 3.0.0 < 3.0.1`.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static VERSION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\d+)\.(\d+)(?:\.(\d+))?").expect("version pattern is valid")
});

/// Error returned when a version string cannot be recognized
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unable to recognize Robot Framework version number: '{0}'")]
pub struct VersionParseError(pub String);

/// A Robot Framework language version such as `2.9` or `3.1.2`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RobotVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: Option<u32>,
}

impl RobotVersion {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self {
            major,
            minor,
            patch: None,
        }
    }

    pub const fn with_patch(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch: Some(patch),
        }
    }

    /// Parse `x.y` or `x.y.z`; anything trailing the numbers (e.g. `3.1a1`) is ignored
    pub fn parse(text: &str) -> Result<Self, VersionParseError> {
        let captures = VERSION_PATTERN
            .captures(text)
            .ok_or_else(|| VersionParseError(text.to_string()))?;
        let number = |index: usize| -> Result<Option<u32>, VersionParseError> {
            captures
                .get(index)
                .map(|m| m.as_str().parse::<u32>())
                .transpose()
                .map_err(|_| VersionParseError(text.to_string()))
        };
        let major = number(1)?.ok_or_else(|| VersionParseError(text.to_string()))?;
        let minor = number(2)?.ok_or_else(|| VersionParseError(text.to_string()))?;
        Ok(Self {
            major,
            minor,
            patch: number(3)?,
        })
    }

    pub fn is_older_than(&self, other: &RobotVersion) -> bool {
        self < other
    }

    pub fn is_newer_or_equal_to(&self, other: &RobotVersion) -> bool {
        self >= other
    }
}

impl FromStr for RobotVersion {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RobotVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.patch {
            Some(patch) => write!(f, "{}.{}.{}", self.major, self.minor, patch),
            None => write!(f, "{}.{}", self.major, self.minor),
        }
    }
}

/// A half-open version range `[min, max)`; a missing bound is unbounded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct VersionRange {
    pub min: Option<RobotVersion>,
    pub max: Option<RobotVersion>,
}

impl VersionRange {
    /// Every version
    pub const ALL: VersionRange = VersionRange {
        min: None,
        max: None,
    };

    pub const fn at_least(min: RobotVersion) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    pub const fn below(max: RobotVersion) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    pub const fn between(min: RobotVersion, max: RobotVersion) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    pub fn contains(&self, version: &RobotVersion) -> bool {
        let above_min = self.min.is_none_or(|min| *version >= min);
        let below_max = self.max.is_none_or(|max| *version < max);
        above_min && below_max
    }

    /// Whether anything gated by this range applies under `version`.
    ///
    /// An unknown version (`None`) is never filtered out.
    pub fn applies_to(&self, version: Option<&RobotVersion>) -> bool {
        version.is_none_or(|v| self.contains(v))
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.min, self.max) {
            (None, None) => write!(f, "[*, *)"),
            (Some(min), None) => write!(f, "[{min}, *)"),
            (None, Some(max)) => write!(f, "[*, {max})"),
            (Some(min), Some(max)) => write!(f, "[{min}, {max})"),
        }
    }
}
