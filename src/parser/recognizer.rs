//! Recognizer registry
//!
//! Each [`Recognizer`] is a stateless predicate: a compiled, case-insensitive
//! pattern plus the token type it produces and the language versions it is
//! valid for. Recognizers are consulted in registration order and the first
//! match whose version range admits the active version wins.
//!
//! Declaration words are matched whitespace-tolerantly, so `Suite Teardown`,
//! `suite   teardown`, `SUITETEARDOWN` and `Suite Teardown:` are equivalent.

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

use super::token_type::RobotTokenType as T;
use crate::base::{RobotVersion, VersionRange};

/// Grammar context a recognizer is consulted in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecognizerScope {
    /// Any line: continuation markers and comments
    Line,
    /// First cell of a line that starts with `*`
    TableHeader,
    /// First column of the Settings table
    Setting,
    /// First column of the Variables table
    Variable,
    /// First body cell of a test case
    TestCaseSetting,
    /// First body cell of a user keyword
    KeywordSetting,
}

/// A single pattern-to-token-type classifier
#[derive(Debug)]
pub struct Recognizer {
    pub scope: RecognizerScope,
    pub produces: T,
    pub versions: VersionRange,
    /// Version from which this spelling is superseded
    pub deprecated_since: Option<RobotVersion>,
    /// Spelling that replaces a deprecated one
    pub replacement: Option<&'static str>,
    pattern: Regex,
}

impl Recognizer {
    fn new(scope: RecognizerScope, produces: T, pattern: &str) -> Self {
        Self {
            scope,
            produces,
            versions: VersionRange::ALL,
            deprecated_since: None,
            replacement: None,
            pattern: compile(pattern),
        }
    }

    fn setting(produces: T, words: &str) -> Self {
        Self::new(RecognizerScope::Setting, produces, &setting_pattern(words))
    }

    fn test_case_setting(produces: T, words: &str) -> Self {
        Self::new(
            RecognizerScope::TestCaseSetting,
            produces,
            &bracketed_pattern(words),
        )
    }

    fn keyword_setting(produces: T, words: &str) -> Self {
        Self::new(
            RecognizerScope::KeywordSetting,
            produces,
            &bracketed_pattern(words),
        )
    }

    fn since(mut self, version: RobotVersion) -> Self {
        self.versions = VersionRange::at_least(version);
        self
    }

    fn deprecated(mut self, since: RobotVersion, replacement: &'static str) -> Self {
        self.deprecated_since = Some(since);
        self.replacement = Some(replacement);
        self
    }

    pub fn matches(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    pub fn applies_to(&self, version: Option<&RobotVersion>) -> bool {
        self.versions.applies_to(version)
    }

    /// Whether this spelling is superseded under `version`
    pub fn is_deprecated_in(&self, version: &RobotVersion) -> bool {
        self.deprecated_since
            .is_some_and(|since| version.is_newer_or_equal_to(&since))
    }
}

fn compile(pattern: &str) -> Regex {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .expect("recognizer patterns are built from escaped literals")
}

/// `Suite Teardown` → `^ ?suite\s*teardown\s*:?\s*$`
fn setting_pattern(words: &str) -> String {
    format!(r"^ ?{}\s*:?\s*$", joined_words(words))
}

/// `Tags` → `^ ?\[\s*tags\s*\]\s*$`
fn bracketed_pattern(words: &str) -> String {
    format!(r"^ ?\[\s*{}\s*\]\s*$", joined_words(words))
}

fn joined_words(words: &str) -> String {
    words
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s*")
}

fn header_pattern(names: &str) -> String {
    format!(r"^\s*\*+\s*(?:{names})\s*\**\s*$")
}

const V2_9: RobotVersion = RobotVersion::new(2, 9);
const V3_0: RobotVersion = RobotVersion::new(3, 0);
const V3_1: RobotVersion = RobotVersion::new(3, 1);

/// All recognizers in priority order
static RECOGNIZERS: Lazy<Vec<Recognizer>> = Lazy::new(|| {
    use RecognizerScope::*;
    vec![
        // =====================================================================
        // LINE LEVEL
        // =====================================================================
        Recognizer::new(Line, T::PREVIOUS_LINE_CONTINUE, r"^\s*\.\.\.\s*$"),
        Recognizer::new(Line, T::START_HASH_COMMENT, r"^\s*#"),
        // =====================================================================
        // TABLE HEADERS
        // =====================================================================
        Recognizer::new(
            TableHeader,
            T::SETTINGS_TABLE_HEADER,
            &header_pattern(r"settings?|setting\s*table|metadata"),
        ),
        Recognizer::new(
            TableHeader,
            T::VARIABLES_TABLE_HEADER,
            &header_pattern(r"variables?|variable\s*table"),
        ),
        Recognizer::new(
            TableHeader,
            T::TEST_CASES_TABLE_HEADER,
            &header_pattern(r"test\s*cases?|test\s*case\s*table"),
        ),
        Recognizer::new(
            TableHeader,
            T::TEST_CASES_TABLE_HEADER,
            &header_pattern(r"tasks?"),
        )
        .since(V3_1),
        Recognizer::new(
            TableHeader,
            T::KEYWORDS_TABLE_HEADER,
            &header_pattern(r"(?:user\s*)?keywords?|keyword\s*table"),
        ),
        Recognizer::new(TableHeader, T::USER_OWN_TABLE_HEADER, r"^\s*\*"),
        // =====================================================================
        // SETTINGS TABLE
        // =====================================================================
        Recognizer::setting(T::SETTING_LIBRARY_DECLARATION, "Library"),
        Recognizer::setting(T::SETTING_RESOURCE_DECLARATION, "Resource"),
        Recognizer::setting(T::SETTING_VARIABLES_DECLARATION, "Variables"),
        Recognizer::setting(T::SETTING_DOCUMENTATION_DECLARATION, "Documentation"),
        Recognizer::setting(T::SETTING_METADATA_DECLARATION, "Metadata"),
        Recognizer::setting(T::SETTING_SUITE_SETUP_DECLARATION, "Suite Setup"),
        Recognizer::setting(T::SETTING_SUITE_SETUP_DECLARATION, "Suite Precondition")
            .deprecated(V3_0, "Suite Setup"),
        Recognizer::setting(T::SETTING_SUITE_TEARDOWN_DECLARATION, "Suite Teardown"),
        Recognizer::setting(T::SETTING_SUITE_TEARDOWN_DECLARATION, "Suite Postcondition")
            .deprecated(V3_0, "Suite Teardown"),
        Recognizer::setting(T::SETTING_FORCE_TAGS_DECLARATION, "Force Tags"),
        Recognizer::setting(T::SETTING_DEFAULT_TAGS_DECLARATION, "Default Tags"),
        Recognizer::setting(T::SETTING_TEST_SETUP_DECLARATION, "Test Setup"),
        Recognizer::setting(T::SETTING_TEST_SETUP_DECLARATION, "Test Precondition")
            .deprecated(V3_0, "Test Setup"),
        Recognizer::setting(T::SETTING_TEST_TEARDOWN_DECLARATION, "Test Teardown"),
        Recognizer::setting(T::SETTING_TEST_TEARDOWN_DECLARATION, "Test Postcondition")
            .deprecated(V3_0, "Test Teardown"),
        Recognizer::setting(T::SETTING_TEST_TEMPLATE_DECLARATION, "Test Template"),
        Recognizer::setting(T::SETTING_TEST_TIMEOUT_DECLARATION, "Test Timeout"),
        Recognizer::setting(T::SETTING_TEST_SETUP_DECLARATION, "Task Setup").since(V3_1),
        Recognizer::setting(T::SETTING_TEST_TEARDOWN_DECLARATION, "Task Teardown").since(V3_1),
        Recognizer::setting(T::SETTING_TEST_TEMPLATE_DECLARATION, "Task Template").since(V3_1),
        Recognizer::setting(T::SETTING_TEST_TIMEOUT_DECLARATION, "Task Timeout").since(V3_1),
        // =====================================================================
        // VARIABLES TABLE
        // =====================================================================
        Recognizer::new(Variable, T::VARIABLES_SCALAR_DECLARATION, r"^ ?\$\s*\{"),
        Recognizer::new(Variable, T::VARIABLES_LIST_DECLARATION, r"^ ?@\s*\{"),
        Recognizer::new(Variable, T::VARIABLES_DICTIONARY_DECLARATION, r"^ ?&\s*\{"),
        // =====================================================================
        // TEST CASE SETTINGS
        // =====================================================================
        Recognizer::test_case_setting(T::TEST_CASE_SETTING_DOCUMENTATION, "Documentation"),
        Recognizer::test_case_setting(T::TEST_CASE_SETTING_TAGS_DECLARATION, "Tags"),
        Recognizer::test_case_setting(T::TEST_CASE_SETTING_SETUP, "Setup"),
        Recognizer::test_case_setting(T::TEST_CASE_SETTING_SETUP, "Precondition")
            .deprecated(V3_0, "[Setup]"),
        Recognizer::test_case_setting(T::TEST_CASE_SETTING_TEARDOWN, "Teardown"),
        Recognizer::test_case_setting(T::TEST_CASE_SETTING_TEARDOWN, "Postcondition")
            .deprecated(V3_0, "[Teardown]"),
        Recognizer::test_case_setting(T::TEST_CASE_SETTING_TEMPLATE, "Template"),
        Recognizer::test_case_setting(T::TEST_CASE_SETTING_TIMEOUT, "Timeout"),
        // =====================================================================
        // KEYWORD SETTINGS
        // =====================================================================
        Recognizer::keyword_setting(T::KEYWORD_SETTING_DOCUMENTATION, "Documentation"),
        Recognizer::keyword_setting(T::KEYWORD_SETTING_TAGS, "Tags").since(V2_9),
        Recognizer::keyword_setting(T::KEYWORD_SETTING_ARGUMENTS, "Arguments"),
        Recognizer::keyword_setting(T::KEYWORD_SETTING_RETURN, "Return"),
        Recognizer::keyword_setting(T::KEYWORD_SETTING_TEARDOWN, "Teardown"),
        Recognizer::keyword_setting(T::KEYWORD_SETTING_TIMEOUT, "Timeout"),
    ]
});

static BRACKETED: Lazy<Regex> = Lazy::new(|| compile(r"^ ?\[.*\]\s*$"));

static LIBRARY_ALIAS: Lazy<Regex> = Lazy::new(|| compile(r"^ ?with\s+name\s*$"));

static ASSIGNMENT: Lazy<Regex> = Lazy::new(|| compile(r"^[$@&]\{.+\}\s*=?\s*$"));

static EMBEDDED_ARGUMENT: Lazy<Regex> = Lazy::new(|| compile(r"\$\{[^{}]+\}"));

/// First recognizer of `scope` matching `text` under `version`
pub fn recognize(
    scope: RecognizerScope,
    text: &str,
    version: Option<&RobotVersion>,
) -> Option<&'static Recognizer> {
    RECOGNIZERS
        .iter()
        .filter(|r| r.scope == scope)
        .find(|r| r.matches(text) && r.applies_to(version))
}

/// First recognizer of `scope` matching `text`, ignoring version ranges
pub fn find_spelling(scope: RecognizerScope, text: &str) -> Option<&'static Recognizer> {
    RECOGNIZERS
        .iter()
        .filter(|r| r.scope == scope)
        .find(|r| r.matches(text))
}

/// All registered recognizers in priority order
pub fn registry() -> &'static [Recognizer] {
    &RECOGNIZERS
}

/// `[Anything]` in an executable body
pub fn is_bracketed_setting(text: &str) -> bool {
    BRACKETED.is_match(text)
}

/// `WITH NAME` inside a Library import
pub fn is_library_alias(text: &str) -> bool {
    LIBRARY_ALIAS.is_match(text)
}

/// `${var}=` style assignment at the start of an executable row
pub fn is_assignment(text: &str) -> bool {
    ASSIGNMENT.is_match(text)
}

/// Byte ranges of `${...}` embedded arguments inside a keyword name
pub fn embedded_arguments(name: &str) -> Vec<std::ops::Range<usize>> {
    EMBEDDED_ARGUMENT
        .find_iter(name)
        .map(|m| m.range())
        .collect()
}

/// Declaration type a keyword argument or variable name implies by its sigil
pub fn declaration_type_of(text: &str) -> Option<T> {
    [
        T::VARIABLES_SCALAR_DECLARATION,
        T::VARIABLES_LIST_DECLARATION,
        T::VARIABLES_DICTIONARY_DECLARATION,
    ]
    .into_iter()
    .find(|kind| {
        RECOGNIZERS
            .iter()
            .any(|r| r.scope == RecognizerScope::Variable && r.produces == *kind && r.matches(text))
    })
}
