#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::parser::mapping::select;
use crate::parser::{CellPosition, ParsingState as S};
use crate::syntax::SettingKind;
use crate::syntax::variables::VariableType;
use rstest::rstest;

const FIRST: CellPosition = CellPosition {
    column: 0,
    first_on_line: true,
};

const INDENTED: CellPosition = CellPosition {
    column: 1,
    first_on_line: true,
};

const FOLLOWING: CellPosition = CellPosition {
    column: 2,
    first_on_line: false,
};

fn mapper_name(state: S, position: CellPosition, text: &str) -> Option<&'static str> {
    select(state, &position, text).map(|mapper| mapper.name)
}

#[rstest]
#[case(S::SETTING_TABLE_INSIDE, FIRST, "Library", Some("setting declaration"))]
#[case(S::SETTING(SettingKind::Library), FOLLOWING, "Collections", Some("setting argument"))]
#[case(S::VARIABLE_TABLE_INSIDE, FIRST, "${a}", Some("variable declaration"))]
#[case(
    S::VARIABLE_VALUE(VariableType::List),
    FOLLOWING,
    "1",
    Some("variable value")
)]
#[case(S::TEST_CASE_TABLE_INSIDE, FIRST, "My Test", Some("test case name"))]
#[case(S::TEST_CASE_DECLARATION, FIRST, "Next Test", Some("test case name"))]
#[case(S::TEST_CASE_DECLARATION, INDENTED, "[Tags]", Some("test case setting"))]
#[case(S::TEST_CASE_DECLARATION, INDENTED, "Log", Some("test case action"))]
#[case(S::TEST_CASE_INSIDE_ACTION, FOLLOWING, "hello", Some("test case action argument"))]
#[case(S::KEYWORD_DECLARATION, INDENTED, "[Arguments]", Some("keyword setting"))]
#[case(S::KEYWORD_INSIDE_ACTION, FOLLOWING, "x", Some("keyword action argument"))]
fn test_first_eligible_mapper_wins(
    #[case] state: S,
    #[case] position: CellPosition,
    #[case] text: &str,
    #[case] expected: Option<&str>,
) {
    assert_eq!(mapper_name(state, position, text), expected);
}

#[rstest]
#[case(S::TRASH, FIRST)]
#[case(S::TRASH, FOLLOWING)]
#[case(S::SETTING_TABLE_INSIDE, FOLLOWING)]
#[case(S::VARIABLE_TABLE_INSIDE, FOLLOWING)]
fn test_cells_without_mapper_stay_unknown(#[case] state: S, #[case] position: CellPosition) {
    assert_eq!(mapper_name(state, position, "anything"), None);
}
