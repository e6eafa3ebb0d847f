//! Version-dependent rules over a parsed document
//!
//! Each [`VersionRule`] declares the `[min, max)` range of framework versions
//! it applies to. A rule outside the range of the active version never runs,
//! so the same document can be clean under 2.9 and flagged under 3.0.

use rustc_hash::FxHashSet;
use tracing::debug;

use super::diagnostic::{Diagnostic, RuleCode};
use crate::base::{RobotVersion, VersionRange};
use crate::parser::recognizer::{self, RecognizerScope};
use crate::syntax::executables::{ExecutableBody, ExecutableKind, ExecutableSettingKind};
use crate::syntax::settings::SettingKind;
use crate::syntax::{RobotFile, TokenId};

const V3_0: RobotVersion = RobotVersion::new(3, 0);

/// What a rule sees while it runs
pub struct RuleContext<'a> {
    pub file: &'a RobotFile,
    /// `None` when the version is unknown
    pub version: Option<&'a RobotVersion>,
}

/// A check gated by a version range
pub struct VersionRule {
    pub code: RuleCode,
    pub versions: VersionRange,
    pub check: fn(&RuleContext<'_>, &mut Vec<Diagnostic>),
}

/// All rules, in reporting order
pub static VERSION_RULES: &[VersionRule] = &[
    VersionRule {
        code: RuleCode::DuplicatedSetting,
        versions: VersionRange::at_least(V3_0),
        check: check_duplicated_settings,
    },
    VersionRule {
        code: RuleCode::DeprecatedSynonym,
        versions: VersionRange::at_least(V3_0),
        check: check_deprecated_synonyms,
    },
];

/// Run every rule that applies to the version the file was parsed with
pub fn check_version_rules(file: &RobotFile) -> Vec<Diagnostic> {
    check_with_version(file, file.version())
}

/// Run every rule that applies to `version`; an unknown version runs them all
pub fn check_with_version(file: &RobotFile, version: Option<&RobotVersion>) -> Vec<Diagnostic> {
    let ctx = RuleContext { file, version };
    let mut diagnostics = Vec::new();
    for rule in VERSION_RULES {
        if !rule.versions.applies_to(version) {
            debug!(code = %rule.code, ?version, "rule skipped for version");
            continue;
        }
        (rule.check)(&ctx, &mut diagnostics);
    }
    diagnostics
}

fn at_token(ctx: &RuleContext<'_>, code: RuleCode, token: TokenId, message: String) -> Diagnostic {
    let token = ctx.file.token(token);
    Diagnostic::warning(code, token.position(), message).with_end_column(token.end_column())
}

// ============================================================================
// DUPLICATED SETTINGS
// ============================================================================

fn is_single_valued(kind: SettingKind) -> bool {
    !matches!(
        kind,
        SettingKind::Library
            | SettingKind::Resource
            | SettingKind::Variables
            | SettingKind::Metadata
            | SettingKind::Unknown
    )
}

fn check_duplicated_settings(ctx: &RuleContext<'_>, out: &mut Vec<Diagnostic>) {
    let mut seen = FxHashSet::default();
    for setting in ctx.file.settings() {
        if is_single_valued(setting.kind()) && !seen.insert(setting.kind()) {
            let name = ctx.file.text(setting.declaration()).trim();
            out.push(at_token(
                ctx,
                RuleCode::DuplicatedSetting,
                setting.declaration(),
                format!("setting '{name}' is allowed only once; only the first value is used"),
            ));
        }
    }
    for test in ctx.file.test_cases() {
        check_duplicated_body(ctx, test.body(), ExecutableKind::TestCase, out);
    }
    for keyword in ctx.file.keywords() {
        check_duplicated_body(ctx, keyword.body(), ExecutableKind::Keyword, out);
    }
}

fn check_duplicated_body(
    ctx: &RuleContext<'_>,
    body: &ExecutableBody,
    owner: ExecutableKind,
    out: &mut Vec<Diagnostic>,
) {
    let owner = match owner {
        ExecutableKind::TestCase => "test case",
        ExecutableKind::Keyword => "keyword",
    };
    let mut seen = FxHashSet::default();
    for setting in &body.settings {
        if setting.kind() != ExecutableSettingKind::Unknown && !seen.insert(setting.kind()) {
            let name = ctx.file.text(setting.declaration()).trim();
            out.push(at_token(
                ctx,
                RuleCode::DuplicatedSetting,
                setting.declaration(),
                format!("setting '{name}' is allowed only once per {owner}"),
            ));
        }
    }
}

// ============================================================================
// DEPRECATED SYNONYMS
// ============================================================================

fn check_deprecated_synonyms(ctx: &RuleContext<'_>, out: &mut Vec<Diagnostic>) {
    for setting in ctx.file.settings() {
        report_deprecated(ctx, RecognizerScope::Setting, setting.declaration(), out);
    }
    for test in ctx.file.test_cases() {
        for setting in &test.body().settings {
            report_deprecated(ctx, RecognizerScope::TestCaseSetting, setting.declaration(), out);
        }
    }
    for keyword in ctx.file.keywords() {
        for setting in &keyword.body().settings {
            report_deprecated(ctx, RecognizerScope::KeywordSetting, setting.declaration(), out);
        }
    }
}

fn report_deprecated(
    ctx: &RuleContext<'_>,
    scope: RecognizerScope,
    declaration: TokenId,
    out: &mut Vec<Diagnostic>,
) {
    let text = ctx.file.text(declaration);
    let Some(spelling) = recognizer::find_spelling(scope, text) else {
        return;
    };
    let deprecated = match ctx.version {
        Some(version) => spelling.is_deprecated_in(version),
        None => spelling.deprecated_since.is_some(),
    };
    if !deprecated {
        return;
    }
    let replacement = spelling.replacement.unwrap_or_default();
    let mut diagnostic = at_token(
        ctx,
        RuleCode::DeprecatedSynonym,
        declaration,
        format!("'{}' is deprecated, use '{replacement}' instead", text.trim()),
    );
    if !replacement.is_empty() {
        diagnostic = diagnostic.with_hint(replacement);
    }
    out.push(diagnostic);
}
