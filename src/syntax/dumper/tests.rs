#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use super::*;
use crate::parser::{FileFormat, ParseOptions, RobotTokenType as T, parse};
use crate::syntax::executables::ExecutableRow;
use crate::syntax::table::ModelElement;
use crate::syntax::variables::{Variable, VariableType};
use rstest::rstest;

fn parse_default(source: &str) -> RobotFile {
    parse(source, &ParseOptions::default())
}

fn add_variable(file: &mut RobotFile, name: &str, values: &[&str]) -> ElementId {
    let declaration = file.new_token(name, T::VARIABLES_SCALAR_DECLARATION);
    let id = file.next_element_id();
    let mut variable = Variable::new(id, VariableType::Scalar, declaration);
    for value in values {
        variable.add_value(file.new_token(value, T::VARIABLES_VARIABLE_VALUE));
    }
    file.variables_mut().push(variable);
    id
}

// ============================================================================
// ROUND TRIP
// ============================================================================

#[rstest]
#[case::variables(
    "*** Variables ***\n${scalar}  0\n@{list}  1  2  3\n&{dict}  a=1  b=2\ninvalid}  1  2  3\n"
)]
#[case::no_trailing_newline("*** Settings ***\nLibrary  Collections")]
#[case::crlf("*** Settings ***\r\nLibrary    Collections\r\n\r\n")]
#[case::lone_cr("*** Settings ***\rLibrary\tX\r")]
#[case::bom("\u{FEFF}*** Variables ***\n${a}  1\n")]
#[case::prelude("Some notes\n\n*** Settings ***\n")]
#[case::comments(
    "*** Settings ***  # header comment\n# standalone\nLibrary  X  # trailing\n   \n"
)]
#[case::continuation("*** Settings ***\nDocumentation  first\n...  second\n...\n")]
#[case::user_table("*** Comments ***\nanything    goes | here\n*** Variables ***\n${a}  1\n")]
#[case::pipes("| *** Test Cases *** | Action |\n| Case | Log | hi |\n|  | No Operation |\n")]
#[case::bodies(
    "*** Test Cases ***\nFirst\n    [Tags]  a\n    # note\n    ${x}=  Get  1\n\nSecond  Log  inline\n\
     *** Keywords ***\nKw ${arg}\n    [Arguments]  ${a}\n    Log  ${a}\n"
)]
#[case::duplicate_tables("*** Variables ***\n${a}  1\n*** Variables ***\n${b}  2\n")]
#[case::nameless_body("*** Test Cases ***\n    Log  orphan\n")]
fn test_unmodified_round_trip(#[case] source: &str) {
    let file = parse_default(source);
    assert_eq!(dump(&file), source);
}

#[test]
fn test_tsv_round_trip() {
    let source = "*** Variables ***\n${a}\t\tvalue  with spaces\n";
    let file = parse(source, &ParseOptions::default().with_format(FileFormat::Tsv));
    assert_eq!(dump(&file), source);
}

// ============================================================================
// EDITS IN PLACE
// ============================================================================

#[test]
fn test_edited_cell_is_written() {
    let mut file = parse_default("*** Settings ***\nLibrary    Collections  # keep\n");
    let argument = file.settings().elements()[0].arguments()[0];
    file.token_mut(argument).set_text("String");
    assert_eq!(
        dump(&file),
        "*** Settings ***\nLibrary    String  # keep\n"
    );
}

#[test]
fn test_new_argument_follows_last_argument() {
    let mut file = parse_default("*** Settings ***\nLibrary  Remote  # c\n");
    let id = file.settings().elements()[0].id();
    let new = file.new_token("http://host", T::SETTING_LIBRARY_ARGUMENT);
    file.settings_mut().get_mut(id).unwrap().add_argument(new);
    assert_eq!(
        dump(&file),
        "*** Settings ***\nLibrary  Remote  http://host  # c\n"
    );
}

#[test]
fn test_new_comment_goes_last() {
    let mut file = parse_default("*** Settings ***\nLibrary  X\n");
    let id = file.settings().elements()[0].id();
    let comment = file.new_token("# added", T::START_HASH_COMMENT);
    file.settings_mut()
        .get_mut(id)
        .unwrap()
        .add_comment_part(comment);
    assert_eq!(dump(&file), "*** Settings ***\nLibrary  X  # added\n");
}

#[rstest]
#[case(1, "*** Settings ***\nLibrary  Remote  b\n")]
#[case(2, "*** Settings ***\nLibrary  Remote  a\n")]
fn test_removed_argument_takes_one_separator(#[case] index: usize, #[case] expected: &str) {
    let mut file = parse_default("*** Settings ***\nLibrary  Remote  a  b\n");
    let setting = &file.settings().elements()[0];
    let (id, token) = (setting.id(), setting.arguments()[index]);
    file.settings_mut().get_mut(id).unwrap().remove_argument(token);
    assert_eq!(dump(&file), expected);
}

#[test]
fn test_continuation_line_without_content_is_dropped() {
    let mut file = parse_default("*** Variables ***\n@{list}  a\n...  b\n${next}  1\n");
    let list = &file.variables().elements()[0];
    let (id, token) = (list.id(), list.values()[1]);
    file.variables_mut().get_mut(id).unwrap().remove_value(token);
    assert_eq!(dump(&file), "*** Variables ***\n@{list}  a\n${next}  1\n");
}

#[test]
fn test_removed_body_setting_drops_its_line() {
    let mut file = parse_default("*** Test Cases ***\nCase\n    [Tags]  a\n    Log  x\n");
    let tags = file.test_cases().elements()[0].body().settings[0].id();
    assert!(file.remove_element(tags));
    assert_eq!(dump(&file), "*** Test Cases ***\nCase\n    Log  x\n");
}

// ============================================================================
// ELEMENT REMOVAL AND MOVES
// ============================================================================

#[test]
fn test_removed_element_keeps_following_trivia() {
    let mut file = parse_default(
        "*** Variables ***\n${a}  1\n${b}  2\n# about c\n\n${c}  3\n",
    );
    let b = file.variables().elements()[1].id();
    assert!(file.remove_element(b));
    assert_eq!(
        dump(&file),
        "*** Variables ***\n${a}  1\n# about c\n\n${c}  3\n"
    );
}

#[test]
fn test_moved_element_carries_its_lines() {
    let mut file = parse_default(
        "*** Test Cases ***\nFirst\n    Log  1\n\nSecond\n    Log  2\n",
    );
    let second = file.test_cases().elements()[1].id();
    assert!(file.test_cases_mut().move_up(second));
    assert_eq!(
        dump(&file),
        "*** Test Cases ***\nSecond\n    Log  2\nFirst\n    Log  1\n\n"
    );
}

// ============================================================================
// NEW LINES AND ELEMENTS
// ============================================================================

#[test]
fn test_new_element_after_last_element() {
    let mut file = parse_default("*** Variables ***\n${a}  1\n\n");
    add_variable(&mut file, "${b}", &["2"]);
    assert_eq!(dump(&file), "*** Variables ***\n${a}  1\n${b}  2\n\n");
}

#[test]
fn test_new_element_after_unterminated_last_line() {
    let mut file = parse_default("*** Variables ***\n${a}  1");
    add_variable(&mut file, "${b}", &["2"]);
    assert_eq!(dump(&file), "*** Variables ***\n${a}  1\n${b}  2\n");
}

#[test]
fn test_new_element_in_empty_table_follows_header() {
    let mut file = parse_default("*** Variables ***\n# notes\n");
    add_variable(&mut file, "${v}", &["1"]);
    assert_eq!(dump(&file), "*** Variables ***\n${v}  1\n# notes\n");
}

#[test]
fn test_headerless_table_gets_default_header() {
    let mut file = parse_default("*** Settings ***\nLibrary  X\n");
    add_variable(&mut file, "${v}", &["1"]);
    assert_eq!(
        dump(&file),
        "*** Settings ***\nLibrary  X\n*** Variables ***\n${v}  1\n"
    );
}

#[test]
fn test_new_row_is_indented_after_owned_lines() {
    let mut file = parse_default("*** Test Cases ***\nCase\n    Log  one\n\n");
    let action = file.new_token("No Operation", T::TEST_CASE_ACTION_NAME);
    let row = file.next_element_id();
    let test = file.test_cases_mut().last_mut().unwrap();
    test.body_mut().rows.push(ExecutableRow::new(row, Some(action)));
    assert_eq!(
        dump(&file),
        "*** Test Cases ***\nCase\n    Log  one\n  No Operation\n\n"
    );
}

#[test]
fn test_new_row_in_pipe_table() {
    let mut file = parse_default("| *** Test Cases *** |\n| Case | Log | one |\n");
    let action = file.new_token("No Operation", T::TEST_CASE_ACTION_NAME);
    let row = file.next_element_id();
    let test = file.test_cases_mut().last_mut().unwrap();
    test.body_mut().rows.push(ExecutableRow::new(row, Some(action)));
    assert_eq!(
        dump(&file),
        "| *** Test Cases *** |\n| Case | Log | one |\n|  | No Operation\n"
    );
}

// ============================================================================
// OPTIONS
// ============================================================================

#[test]
fn test_custom_separator_for_new_cells() {
    let mut file = parse_default("*** Variables ***\n${a}  1\n");
    add_variable(&mut file, "${b}", &["2", "3"]);
    let options = DumpOptions::default().with_separator("    ");
    assert_eq!(
        dump_with(&file, &options),
        "*** Variables ***\n${a}  1\n${b}    2    3\n"
    );
}

#[test]
fn test_forced_line_ending() {
    let file = parse_default("*** Settings ***\r\nLibrary  X\r\nLibrary  Y");
    let options = DumpOptions::default().with_line_ending(EndOfLine::Lf);
    assert_eq!(
        dump_with(&file, &options),
        "*** Settings ***\nLibrary  X\nLibrary  Y"
    );
}

#[test]
fn test_tsv_edits_are_quoted() {
    let mut file = parse(
        "*** Variables ***\n${a}\tplain\n",
        &ParseOptions::default().with_format(FileFormat::Tsv),
    );
    let value = file.variables().elements()[0].values()[0];
    file.token_mut(value).set_text("say \"hi\"");
    assert_eq!(dump(&file), "*** Variables ***\n${a}\t\"say \"\"hi\"\"\"\n");
}

#[test]
fn test_custom_escaper_only_touches_edited_cells() {
    #[derive(Debug)]
    struct Upper;
    impl CellEscaper for Upper {
        fn escape<'a>(&self, cell: &'a str) -> std::borrow::Cow<'a, str> {
            std::borrow::Cow::Owned(cell.to_uppercase())
        }
    }

    let mut file = parse_default("*** Variables ***\n${a}  one  two\n");
    let value = file.variables().elements()[0].values()[1];
    file.token_mut(value).set_text("three");
    let options = DumpOptions::default().with_cell_escaper(Arc::new(Upper));
    assert_eq!(
        dump_with(&file, &options),
        "*** Variables ***\n${a}  one  THREE\n"
    );
}

#[test]
fn test_cancelled_dump_returns_none() {
    let file = parse_default("*** Variables ***\n${a}  1\n");
    let cancel = CancellationToken::new();
    cancel.cancel();
    assert!(dump_async(&file, &DumpOptions::default(), &cancel).is_none());
    assert_eq!(
        dump_async(&file, &DumpOptions::default(), &CancellationToken::new()).as_deref(),
        Some("*** Variables ***\n${a}  1\n")
    );
}

// ============================================================================
// PRESAVE ORDER
// ============================================================================

#[rstest]
#[case(T::SETTING_LIBRARY_DECLARATION, PresaveRank::Declaration)]
#[case(T::TEST_CASE_ACTION_NAME, PresaveRank::Declaration)]
#[case(T::SETTING_METADATA_KEY, PresaveRank::Key)]
#[case(T::SETTING_METADATA_VALUE, PresaveRank::Value)]
#[case(T::START_HASH_COMMENT, PresaveRank::CommentStart)]
#[case(T::COMMENT_CONTINUE, PresaveRank::CommentContinue)]
fn test_presave_rank(#[case] kind: T, #[case] expected: PresaveRank) {
    assert_eq!(PresaveRank::of(kind), expected);
}

#[test]
fn test_sort_for_save_is_stable() {
    let mut file = RobotFile::default();
    let comment = file.new_token("# c", T::START_HASH_COMMENT);
    let second = file.new_token("v2", T::SETTING_METADATA_VALUE);
    let key = file.new_token("Key", T::SETTING_METADATA_KEY);
    let first = file.new_token("v1", T::SETTING_METADATA_VALUE);
    let declaration = file.new_token("Metadata", T::SETTING_METADATA_DECLARATION);
    let mut tokens = vec![comment, second, key, first, declaration];
    sort_for_save(&file, &mut tokens);
    assert_eq!(tokens, vec![declaration, key, second, first, comment]);
}
