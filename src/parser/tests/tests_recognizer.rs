#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::base::RobotVersion;
use crate::parser::RobotTokenType as T;
use crate::parser::recognizer::{
    RecognizerScope, declaration_type_of, embedded_arguments, find_spelling, is_assignment,
    is_library_alias, recognize,
};
use rstest::rstest;

fn produces(scope: RecognizerScope, text: &str, version: Option<RobotVersion>) -> Option<T> {
    recognize(scope, text, version.as_ref()).map(|r| r.produces)
}

// ============================================================================
// SETTINGS
// ============================================================================

#[rstest]
#[case("Suite Teardown")]
#[case("suite   teardown")]
#[case("SUITETEARDOWN")]
#[case("Suite Teardown:")]
#[case(" Suite Teardown")]
fn test_setting_words_are_whitespace_and_case_tolerant(#[case] text: &str) {
    assert_eq!(
        produces(RecognizerScope::Setting, text, None),
        Some(T::SETTING_SUITE_TEARDOWN_DECLARATION)
    );
}

#[rstest]
#[case("Suite Teardowns")]
#[case("Teardown")]
#[case("  Suite Teardown")]
fn test_setting_rejects_other_words(#[case] text: &str) {
    assert_eq!(produces(RecognizerScope::Setting, text, None), None);
}

#[test]
fn test_deprecated_synonym_still_recognized() {
    let v3 = Some(RobotVersion::new(3, 0));
    assert_eq!(
        produces(RecognizerScope::Setting, "Test Precondition", v3),
        Some(T::SETTING_TEST_SETUP_DECLARATION)
    );
}

#[rstest]
#[case(RobotVersion::new(2, 9), false)]
#[case(RobotVersion::new(3, 0), true)]
#[case(RobotVersion::new(3, 1), true)]
fn test_precondition_deprecation_by_version(
    #[case] version: RobotVersion,
    #[case] deprecated: bool,
) {
    let spelling = find_spelling(RecognizerScope::TestCaseSetting, "[Precondition]").unwrap();
    assert_eq!(spelling.produces, T::TEST_CASE_SETTING_SETUP);
    assert_eq!(spelling.is_deprecated_in(&version), deprecated);
    assert_eq!(spelling.replacement, Some("[Setup]"));
}

#[test]
fn test_task_settings_gated_at_3_1() {
    assert_eq!(
        produces(RecognizerScope::Setting, "Task Setup", Some(RobotVersion::new(3, 0))),
        None
    );
    assert_eq!(
        produces(RecognizerScope::Setting, "Task Setup", Some(RobotVersion::new(3, 1))),
        Some(T::SETTING_TEST_SETUP_DECLARATION)
    );
}

// ============================================================================
// TABLE HEADERS
// ============================================================================

#[rstest]
#[case("*** Settings ***", T::SETTINGS_TABLE_HEADER)]
#[case("***setting", T::SETTINGS_TABLE_HEADER)]
#[case("*** Metadata ***", T::SETTINGS_TABLE_HEADER)]
#[case("* Variables", T::VARIABLES_TABLE_HEADER)]
#[case("*** Test Cases ***", T::TEST_CASES_TABLE_HEADER)]
#[case("*** testcase ***", T::TEST_CASES_TABLE_HEADER)]
#[case("*** User Keywords ***", T::KEYWORDS_TABLE_HEADER)]
#[case("*** Comments ***", T::USER_OWN_TABLE_HEADER)]
fn test_table_headers(#[case] text: &str, #[case] expected: T) {
    assert_eq!(produces(RecognizerScope::TableHeader, text, None), Some(expected));
}

#[rstest]
#[case(RobotVersion::new(3, 0), T::USER_OWN_TABLE_HEADER)]
#[case(RobotVersion::new(3, 1), T::TEST_CASES_TABLE_HEADER)]
fn test_tasks_header_gated_at_3_1(#[case] version: RobotVersion, #[case] expected: T) {
    assert_eq!(
        produces(RecognizerScope::TableHeader, "*** Tasks ***", Some(version)),
        Some(expected)
    );
}

// ============================================================================
// TEST CASE AND KEYWORD SETTINGS
// ============================================================================

#[rstest]
#[case(RobotVersion::new(2, 8), None)]
#[case(RobotVersion::new(2, 9), Some(T::KEYWORD_SETTING_TAGS))]
fn test_keyword_tags_gated_at_2_9(#[case] version: RobotVersion, #[case] expected: Option<T>) {
    assert_eq!(
        produces(RecognizerScope::KeywordSetting, "[Tags]", Some(version)),
        expected
    );
}

#[test]
fn test_unknown_version_admits_everything() {
    assert_eq!(
        produces(RecognizerScope::KeywordSetting, "[Tags]", None),
        Some(T::KEYWORD_SETTING_TAGS)
    );
}

#[rstest]
#[case("[ Documentation ]", T::TEST_CASE_SETTING_DOCUMENTATION)]
#[case("[tags]", T::TEST_CASE_SETTING_TAGS_DECLARATION)]
#[case("[Timeout]", T::TEST_CASE_SETTING_TIMEOUT)]
fn test_bracketed_test_case_settings(#[case] text: &str, #[case] expected: T) {
    assert_eq!(
        produces(RecognizerScope::TestCaseSetting, text, None),
        Some(expected)
    );
}

// ============================================================================
// HELPERS
// ============================================================================

#[rstest]
#[case("${x}=", true)]
#[case("${x} =", true)]
#[case("@{items}", true)]
#[case("Log", false)]
#[case("${}", false)]
fn test_assignment_detection(#[case] text: &str, #[case] expected: bool) {
    assert_eq!(is_assignment(text), expected);
}

#[rstest]
#[case("WITH NAME", true)]
#[case("with   name", true)]
#[case("WITHNAME", false)]
fn test_library_alias_detection(#[case] text: &str, #[case] expected: bool) {
    assert_eq!(is_library_alias(text), expected);
}

#[test]
fn test_embedded_argument_ranges() {
    assert_eq!(embedded_arguments("Open ${page} As ${user}"), vec![5..12, 16..23]);
    assert!(embedded_arguments("Plain Keyword").is_empty());
}

#[rstest]
#[case("${a}", Some(T::VARIABLES_SCALAR_DECLARATION))]
#[case("@{list}", Some(T::VARIABLES_LIST_DECLARATION))]
#[case("&{dict}", Some(T::VARIABLES_DICTIONARY_DECLARATION))]
#[case("invalid}", None)]
fn test_declaration_type_by_sigil(#[case] text: &str, #[case] expected: Option<T>) {
    assert_eq!(declaration_type_of(text), expected);
}
