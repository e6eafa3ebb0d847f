//! Diagnostics produced by version rules.
//!
//! The parser never fails; what it accepts but a given framework version
//! would reject or discourage is reported here instead.

use std::fmt;
use std::sync::Arc;

use crate::base::FilePosition;

// ============================================================================
// DIAGNOSTIC TYPES
// ============================================================================

/// Severity level of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// Rule that produced a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RuleCode {
    /// A single-valued setting declared more than once
    DuplicatedSetting,
    /// A setting spelled with a superseded synonym
    DeprecatedSynonym,
}

impl RuleCode {
    /// Stable code string (e.g., "W0101").
    pub fn as_str(self) -> &'static str {
        match self {
            RuleCode::DuplicatedSetting => "W0101",
            RuleCode::DeprecatedSynonym => "W0102",
        }
    }
}

impl fmt::Display for RuleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A diagnostic message with location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub code: RuleCode,
    pub severity: Severity,
    /// Position of the offending token.
    pub position: FilePosition,
    /// Column right after the offending token.
    pub end_column: i32,
    pub message: Arc<str>,
    /// Suggested replacement text.
    pub hint: Option<Arc<str>>,
}

impl Diagnostic {
    /// Create a new warning diagnostic.
    pub fn warning(code: RuleCode, position: FilePosition, message: impl Into<Arc<str>>) -> Self {
        Self {
            code,
            severity: Severity::Warning,
            position,
            end_column: position.column,
            message: message.into(),
            hint: None,
        }
    }

    /// Create a new error diagnostic.
    pub fn error(code: RuleCode, position: FilePosition, message: impl Into<Arc<str>>) -> Self {
        Self {
            severity: Severity::Error,
            ..Self::warning(code, position, message)
        }
    }

    /// Set the end column of the span.
    pub fn with_end_column(mut self, end_column: i32) -> Self {
        self.end_column = end_column;
        self
    }

    /// Attach a replacement hint.
    pub fn with_hint(mut self, hint: impl Into<Arc<str>>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn line(&self) -> i32 {
        self.position.line
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} [{}] {}",
            self.position.line, self.position.column, self.code, self.message
        )
    }
}
