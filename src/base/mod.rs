//! Foundation types for the Robot Framework toolchain.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`FilePosition`] - Line/column/offset positions with an unset sentinel
//! - [`RobotVersion`], [`VersionRange`] - Language versions and `[min, max)` ranges
//! - Domain constants (file extensions)
//!
//! This module has NO dependencies on other crate modules.

pub mod constants;
mod position;
mod version;

pub use position::{FilePosition, NOT_SET};
pub use version::{RobotVersion, VersionParseError, VersionRange};
