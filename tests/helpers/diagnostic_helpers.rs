//! Assertions over version-rule diagnostics.

use robot_syntax::semantic::{Diagnostic, RuleCode, check_version_rules};

use super::source_fixtures::parse_at;

/// Diagnostics for `source` parsed under `major.minor`.
pub fn diagnostics_at(source: &str, major: u32, minor: u32) -> Vec<Diagnostic> {
    check_version_rules(&parse_at(source, major, minor))
}

/// Assert the diagnostics carry exactly `expected` codes, in order.
pub fn assert_codes(diagnostics: &[Diagnostic], expected: &[RuleCode]) {
    let codes: Vec<RuleCode> = diagnostics.iter().map(|d| d.code).collect();
    assert_eq!(
        codes,
        expected,
        "unexpected diagnostics:\n{}",
        diagnostics
            .iter()
            .map(|d| format!("  {d}"))
            .collect::<Vec<_>>()
            .join("\n")
    );
}
