//! # Semantic Layer
//!
//! Checks that depend on the active framework version and run over an
//! already parsed [`RobotFile`](crate::syntax::RobotFile). Nothing here
//! changes the model; results are [`Diagnostic`]s.

mod diagnostic;
mod version_rules;

pub use diagnostic::{Diagnostic, RuleCode, Severity};
pub use version_rules::{
    RuleContext, VERSION_RULES, VersionRule, check_version_rules, check_with_version,
};
