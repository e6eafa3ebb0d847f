//! Mapper table
//!
//! A [`Mapper`] couples the states it is eligible in, the cell positions it
//! accepts, an optional text predicate and the model mutation it performs.
//! [`MAPPERS`] is evaluated top to bottom and the first eligible mapper wins,
//! so the order below is the tie-breaking rule:
//!
//! - Settings: declaration (first cell), then arguments.
//! - Variables: declaration (first cell), then values.
//! - Test cases / keywords: name (column 0), bracketed setting, action,
//!   setting argument, action argument.
//! - Anything else stays `UNKNOWN` and belongs to no element.
//!
//! Comments, `...` continuations and table headers are handled before the
//! table is consulted.

use tracing::trace;

use super::recognizer::{self, RecognizerScope};
use super::state::{CellPosition, ParserContext, ParsingState as S};
use super::token::RobotToken;
use super::token_type::RobotTokenType as T;
use crate::base::FilePosition;
use crate::syntax::executables::{
    ExecutableKind, ExecutableRow, ExecutableSetting, ExecutableSettingKind, TestCase, UserKeyword,
};
use crate::syntax::settings::{Setting, SettingKind};
use crate::syntax::table::ModelElement;
use crate::syntax::variables::{Variable, VariableType};
use crate::syntax::{ElementId, ExecutableBody, TableKind, TokenId};

/// A `(state-set, position, pattern, producer)` rule
pub struct Mapper {
    pub name: &'static str,
    pub states: fn(S) -> bool,
    pub position: fn(&CellPosition) -> bool,
    pub accepts: fn(&str) -> bool,
    pub map: fn(&mut ParserContext<'_>, TokenId, &CellPosition),
}

impl Mapper {
    pub fn is_eligible(&self, state: S, position: &CellPosition, text: &str) -> bool {
        (self.states)(state) && (self.position)(position) && (self.accepts)(text)
    }
}

fn any_position(_: &CellPosition) -> bool {
    true
}

fn first_cell(position: &CellPosition) -> bool {
    position.first_on_line
}

fn following_cell(position: &CellPosition) -> bool {
    !position.first_on_line
}

fn name_column(position: &CellPosition) -> bool {
    position.first_on_line && position.column == 0
}

fn any_text(_: &str) -> bool {
    true
}

/// All mappers in priority order
pub static MAPPERS: &[Mapper] = &[
    // =========================================================================
    // SETTINGS
    // =========================================================================
    Mapper {
        name: "setting declaration",
        states: |s| s == S::SETTING_TABLE_INSIDE,
        position: first_cell,
        accepts: any_text,
        map: map_setting_declaration,
    },
    Mapper {
        name: "setting argument",
        states: |s| matches!(s, S::SETTING(_)),
        position: following_cell,
        accepts: any_text,
        map: map_setting_argument,
    },
    // =========================================================================
    // VARIABLES
    // =========================================================================
    Mapper {
        name: "variable declaration",
        states: |s| s == S::VARIABLE_TABLE_INSIDE,
        position: first_cell,
        accepts: any_text,
        map: map_variable_declaration,
    },
    Mapper {
        name: "variable value",
        states: |s| matches!(s, S::VARIABLE_VALUE(_)),
        position: following_cell,
        accepts: any_text,
        map: map_variable_value,
    },
    // =========================================================================
    // TEST CASES
    // =========================================================================
    Mapper {
        name: "test case name",
        states: |s| matches!(s, S::TEST_CASE_TABLE_INSIDE | S::TEST_CASE_DECLARATION),
        position: name_column,
        accepts: any_text,
        map: map_test_case_name,
    },
    Mapper {
        name: "test case setting",
        states: |s| matches!(s, S::TEST_CASE_TABLE_INSIDE | S::TEST_CASE_DECLARATION),
        position: any_position,
        accepts: recognizer::is_bracketed_setting,
        map: |ctx, token, _| map_body_setting(ctx, token, ExecutableKind::TestCase),
    },
    Mapper {
        name: "test case action",
        states: |s| matches!(s, S::TEST_CASE_TABLE_INSIDE | S::TEST_CASE_DECLARATION),
        position: any_position,
        accepts: any_text,
        map: |ctx, token, _| map_body_action(ctx, token, ExecutableKind::TestCase),
    },
    Mapper {
        name: "test case setting argument",
        states: |s| matches!(s, S::TEST_CASE_SETTING(_)),
        position: following_cell,
        accepts: any_text,
        map: |ctx, token, _| map_body_setting_argument(ctx, token, ExecutableKind::TestCase),
    },
    Mapper {
        name: "test case action argument",
        states: |s| s == S::TEST_CASE_INSIDE_ACTION,
        position: following_cell,
        accepts: any_text,
        map: |ctx, token, _| map_body_action_argument(ctx, token, ExecutableKind::TestCase),
    },
    // =========================================================================
    // KEYWORDS
    // =========================================================================
    Mapper {
        name: "keyword name",
        states: |s| matches!(s, S::KEYWORD_TABLE_INSIDE | S::KEYWORD_DECLARATION),
        position: name_column,
        accepts: any_text,
        map: map_keyword_name,
    },
    Mapper {
        name: "keyword setting",
        states: |s| matches!(s, S::KEYWORD_TABLE_INSIDE | S::KEYWORD_DECLARATION),
        position: any_position,
        accepts: recognizer::is_bracketed_setting,
        map: |ctx, token, _| map_body_setting(ctx, token, ExecutableKind::Keyword),
    },
    Mapper {
        name: "keyword action",
        states: |s| matches!(s, S::KEYWORD_TABLE_INSIDE | S::KEYWORD_DECLARATION),
        position: any_position,
        accepts: any_text,
        map: |ctx, token, _| map_body_action(ctx, token, ExecutableKind::Keyword),
    },
    Mapper {
        name: "keyword setting argument",
        states: |s| matches!(s, S::KEYWORD_SETTING(_)),
        position: following_cell,
        accepts: any_text,
        map: |ctx, token, _| map_body_setting_argument(ctx, token, ExecutableKind::Keyword),
    },
    Mapper {
        name: "keyword action argument",
        states: |s| s == S::KEYWORD_INSIDE_ACTION,
        position: following_cell,
        accepts: any_text,
        map: |ctx, token, _| map_body_action_argument(ctx, token, ExecutableKind::Keyword),
    },
];

/// First mapper eligible for a cell
pub fn select(state: S, position: &CellPosition, text: &str) -> Option<&'static Mapper> {
    MAPPERS
        .iter()
        .find(|mapper| mapper.is_eligible(state, position, text))
}

/// Classify and attach one cell; cells no mapper accepts stay `UNKNOWN`
pub fn map_cell(ctx: &mut ParserContext<'_>, token: TokenId, position: &CellPosition) {
    let state = ctx.top();
    let text = ctx.file.text(token).to_string();
    match select(state, position, &text) {
        Some(mapper) => {
            trace!(?state, column = position.column, mapper = mapper.name, "mapping cell");
            (mapper.map)(ctx, token, position);
        }
        None => trace!(?state, column = position.column, "no mapper for cell"),
    }
}

// ============================================================================
// SETTINGS
// ============================================================================

fn map_setting_declaration(ctx: &mut ParserContext<'_>, token: TokenId, _: &CellPosition) {
    let text = ctx.file.text(token);
    let kind = recognizer::recognize(RecognizerScope::Setting, text, ctx.version())
        .map(|r| SettingKind::from_declaration(r.produces))
        .unwrap_or(SettingKind::Unknown);
    ctx.file.token_mut(token).set_type(kind.declaration_type());
    let id = ctx.new_element_id();
    ctx.file.settings_mut().push(Setting::new(id, kind, token));
    ctx.push(S::SETTING(kind));
    ctx.attach(id);
}

fn map_setting_argument(ctx: &mut ParserContext<'_>, token: TokenId, _: &CellPosition) {
    let Some(setting) = ctx.file.settings().last() else {
        return;
    };
    let (id, kind, index) = (setting.id(), setting.kind(), setting.arguments().len());
    let previous = setting
        .arguments()
        .last()
        .map(|arg| ctx.file.token(*arg).primary_type());
    let kind = kind.argument_type(index, previous, ctx.file.text(token));
    ctx.file.token_mut(token).set_type(kind);
    if let Some(setting) = ctx.file.settings_mut().last_mut() {
        setting.add_argument(token);
    }
    ctx.attach(id);
}

// ============================================================================
// VARIABLES
// ============================================================================

fn map_variable_declaration(ctx: &mut ParserContext<'_>, token: TokenId, _: &CellPosition) {
    let kind = VariableType::from_declaration(ctx.file.text(token));
    ctx.file.token_mut(token).set_type(kind.declaration_type());
    let id = ctx.new_element_id();
    ctx.file.variables_mut().push(Variable::new(id, kind, token));
    ctx.push(S::VARIABLE_VALUE(kind));
    ctx.attach(id);
}

fn map_variable_value(ctx: &mut ParserContext<'_>, token: TokenId, _: &CellPosition) {
    ctx.file.token_mut(token).set_type(T::VARIABLES_VARIABLE_VALUE);
    let Some(variable) = ctx.file.variables_mut().last_mut() else {
        return;
    };
    variable.add_value(token);
    let id = variable.id();
    ctx.attach(id);
}

// ============================================================================
// TEST CASES AND KEYWORDS
// ============================================================================

fn map_test_case_name(ctx: &mut ParserContext<'_>, token: TokenId, _: &CellPosition) {
    ctx.pop_to_table();
    ctx.file.token_mut(token).set_type(T::TEST_CASE_NAME);
    let id = ctx.new_element_id();
    ctx.file.test_cases_mut().push(TestCase::new(id, token));
    ctx.push(S::TEST_CASE_DECLARATION);
    ctx.attach(id);
}

fn map_keyword_name(ctx: &mut ParserContext<'_>, token: TokenId, _: &CellPosition) {
    ctx.pop_to_table();
    ctx.file.token_mut(token).set_type(T::KEYWORD_NAME);
    let id = ctx.new_element_id();
    let mut keyword = UserKeyword::new(id, token);
    keyword.set_embedded_arguments(embedded_arguments(ctx.file.token(token)));
    ctx.file.keywords_mut().push(keyword);
    ctx.push(S::KEYWORD_DECLARATION);
    ctx.attach(id);
}

/// `${arg}` parts of a keyword name as positioned declaration tokens
fn embedded_arguments(name: &RobotToken) -> Vec<RobotToken> {
    recognizer::embedded_arguments(name.text())
        .into_iter()
        .map(|range| {
            let position = name.position().shifted(range.start as i32);
            let mut token =
                RobotToken::at(&name.text()[range], position, T::KEYWORD_EMBEDDED_ARGUMENT);
            token.add_type(T::VARIABLES_SCALAR_DECLARATION);
            token
        })
        .collect()
}

/// Last test case or keyword, creating a nameless one for bodies without a name line
fn find_or_create_nearest(ctx: &mut ParserContext<'_>, owner: ExecutableKind) -> ElementId {
    let existing = match owner {
        ExecutableKind::TestCase => ctx.file.test_cases().last().map(|t| t.id()),
        ExecutableKind::Keyword => ctx.file.keywords().last().map(|k| k.id()),
    };
    if let Some(id) = existing {
        return id;
    }
    // Zero-width name anchored at the line start; never written back
    let line = ctx.file.lines().last().map(|l| (l.number, l.offset));
    let mut name = RobotToken::create("");
    if let Some((number, offset)) = line {
        name.set_position(FilePosition::new(number, 0, offset));
    }
    let id = ctx.new_element_id();
    let name = ctx.file.add_token(name);
    match owner {
        ExecutableKind::TestCase => {
            ctx.file.token_mut(name).set_type(T::TEST_CASE_NAME);
            ctx.file.test_cases_mut().push(TestCase::new(id, name));
            ctx.push(S::TEST_CASE_DECLARATION);
        }
        ExecutableKind::Keyword => {
            ctx.file.token_mut(name).set_type(T::KEYWORD_NAME);
            ctx.file.keywords_mut().push(UserKeyword::new(id, name));
            ctx.push(S::KEYWORD_DECLARATION);
        }
    }
    id
}

pub(crate) fn nearest_body<'c>(
    ctx: &'c mut ParserContext<'_>,
    owner: ExecutableKind,
) -> Option<&'c mut ExecutableBody> {
    match owner {
        ExecutableKind::TestCase => ctx.file.test_cases_mut().last_mut().map(|t| t.body_mut()),
        ExecutableKind::Keyword => ctx.file.keywords_mut().last_mut().map(|k| k.body_mut()),
    }
}

fn map_body_setting(ctx: &mut ParserContext<'_>, token: TokenId, owner: ExecutableKind) {
    let parent = find_or_create_nearest(ctx, owner);
    let scope = match owner {
        ExecutableKind::TestCase => RecognizerScope::TestCaseSetting,
        ExecutableKind::Keyword => RecognizerScope::KeywordSetting,
    };
    let declaration = recognizer::recognize(scope, ctx.file.text(token), ctx.version())
        .map(|r| r.produces)
        .unwrap_or_else(|| ExecutableSettingKind::unknown_declaration(owner));
    let kind = ExecutableSettingKind::from_declaration(declaration);
    ctx.file.token_mut(token).set_type(declaration);
    let id = ctx.new_element_id();
    if let Some(body) = nearest_body(ctx, owner) {
        body.settings.push(ExecutableSetting::new(id, kind, token));
    }
    ctx.push(match owner {
        ExecutableKind::TestCase => S::TEST_CASE_SETTING(kind),
        ExecutableKind::Keyword => S::KEYWORD_SETTING(kind),
    });
    ctx.attach(parent);
}

fn map_body_action(ctx: &mut ParserContext<'_>, token: TokenId, owner: ExecutableKind) {
    let parent = find_or_create_nearest(ctx, owner);
    let text = ctx.file.text(token);
    let assignment = recognizer::is_assignment(text);
    let action = ctx.file.token_mut(token);
    action.set_type(match owner {
        ExecutableKind::TestCase => T::TEST_CASE_ACTION_NAME,
        ExecutableKind::Keyword => T::KEYWORD_ACTION_NAME,
    });
    if assignment {
        action.add_type(T::ASSIGNMENT);
    }
    let id = ctx.new_element_id();
    if let Some(body) = nearest_body(ctx, owner) {
        body.rows.push(ExecutableRow::new(id, Some(token)));
    }
    ctx.push(match owner {
        ExecutableKind::TestCase => S::TEST_CASE_INSIDE_ACTION,
        ExecutableKind::Keyword => S::KEYWORD_INSIDE_ACTION,
    });
    ctx.attach(parent);
}

fn map_body_setting_argument(ctx: &mut ParserContext<'_>, token: TokenId, owner: ExecutableKind) {
    let parent = find_or_create_nearest(ctx, owner);
    let Some((kind, index)) = nearest_body(ctx, owner)
        .and_then(|body| body.settings.last())
        .map(|setting| (setting.kind(), setting.arguments().len()))
    else {
        return;
    };
    let text = ctx.file.text(token);
    let declared = (kind == ExecutableSettingKind::Arguments)
        .then(|| recognizer::declaration_type_of(text))
        .flatten();
    let argument = ctx.file.token_mut(token);
    argument.set_type(kind.argument_type(owner, index));
    if let Some(declared) = declared {
        argument.add_type(declared);
    }
    if let Some(setting) = nearest_body(ctx, owner).and_then(|body| body.settings.last_mut()) {
        setting.add_argument(token);
    }
    ctx.attach(parent);
}

fn map_body_action_argument(ctx: &mut ParserContext<'_>, token: TokenId, owner: ExecutableKind) {
    let parent = find_or_create_nearest(ctx, owner);
    let Some(row) = nearest_body(ctx, owner).and_then(|body| body.rows.last()) else {
        return;
    };
    let previous: Vec<TokenId> = row
        .action()
        .into_iter()
        .chain(row.arguments().iter().copied())
        .collect();
    let chained_assignment = !previous.is_empty()
        && previous
            .iter()
            .all(|id| ctx.file.token(*id).has_type(T::ASSIGNMENT))
        && recognizer::is_assignment(ctx.file.text(token));
    let argument = ctx.file.token_mut(token);
    argument.set_type(match owner {
        ExecutableKind::TestCase => T::TEST_CASE_ACTION_ARGUMENT,
        ExecutableKind::Keyword => T::KEYWORD_ACTION_ARGUMENT,
    });
    if chained_assignment {
        argument.add_type(T::ASSIGNMENT);
    }
    if let Some(row) = nearest_body(ctx, owner).and_then(|body| body.rows.last_mut()) {
        row.add_argument(token);
    }
    ctx.attach(parent);
}

// ============================================================================
// COMMENTS
// ============================================================================

/// Attach a comment cell to the construct the line belongs to.
///
/// Comment-only lines in test case and keyword bodies become comment-only
/// rows; elsewhere a comment without an element is left as trivia.
pub fn attach_comment(ctx: &mut ParserContext<'_>, token: TokenId) {
    if let Some(kind) = ctx.header_on_line() {
        add_header_comment(ctx, kind, token);
        return;
    }
    match ctx.top() {
        S::SETTING(_) => {
            if let Some(setting) = ctx.file.settings_mut().last_mut() {
                setting.add_comment_part(token);
                let id = setting.id();
                ctx.claim_line(id);
            }
        }
        S::VARIABLE_VALUE(_) => {
            if let Some(variable) = ctx.file.variables_mut().last_mut() {
                variable.add_comment_part(token);
                let id = variable.id();
                ctx.claim_line(id);
            }
        }
        S::TEST_CASE_SETTING(_) => attach_setting_comment(ctx, token, ExecutableKind::TestCase),
        S::KEYWORD_SETTING(_) => attach_setting_comment(ctx, token, ExecutableKind::Keyword),
        S::TEST_CASE_INSIDE_ACTION => attach_row_comment(ctx, token, ExecutableKind::TestCase),
        S::KEYWORD_INSIDE_ACTION => attach_row_comment(ctx, token, ExecutableKind::Keyword),
        S::TEST_CASE_DECLARATION => start_comment_row(ctx, token, ExecutableKind::TestCase),
        S::KEYWORD_DECLARATION => start_comment_row(ctx, token, ExecutableKind::Keyword),
        S::TRASH
        | S::SETTING_TABLE_INSIDE
        | S::VARIABLE_TABLE_INSIDE
        | S::TEST_CASE_TABLE_INSIDE
        | S::KEYWORD_TABLE_INSIDE => {}
    }
}

fn add_header_comment(ctx: &mut ParserContext<'_>, kind: TableKind, token: TokenId) {
    let header = match kind {
        TableKind::Settings => ctx.file.settings_mut().last_header_mut(),
        TableKind::Variables => ctx.file.variables_mut().last_header_mut(),
        TableKind::TestCases => ctx.file.test_cases_mut().last_header_mut(),
        TableKind::Keywords => ctx.file.keywords_mut().last_header_mut(),
        TableKind::UserOwn => ctx.file.user_tables_mut().last_mut(),
    };
    if let Some(header) = header {
        header.comment.push(token);
    }
}

fn attach_setting_comment(ctx: &mut ParserContext<'_>, token: TokenId, owner: ExecutableKind) {
    let parent = find_or_create_nearest(ctx, owner);
    if let Some(setting) = nearest_body(ctx, owner).and_then(|body| body.settings.last_mut()) {
        setting.add_comment_part(token);
    }
    ctx.claim_line(parent);
}

fn attach_row_comment(ctx: &mut ParserContext<'_>, token: TokenId, owner: ExecutableKind) {
    let parent = find_or_create_nearest(ctx, owner);
    if let Some(row) = nearest_body(ctx, owner).and_then(|body| body.rows.last_mut()) {
        row.add_comment_part(token);
    }
    ctx.claim_line(parent);
}

fn start_comment_row(ctx: &mut ParserContext<'_>, token: TokenId, owner: ExecutableKind) {
    let parent = find_or_create_nearest(ctx, owner);
    let id = ctx.new_element_id();
    if let Some(body) = nearest_body(ctx, owner) {
        let mut row = ExecutableRow::new(id, None);
        row.add_comment_part(token);
        body.rows.push(row);
    }
    ctx.push(match owner {
        ExecutableKind::TestCase => S::TEST_CASE_INSIDE_ACTION,
        ExecutableKind::Keyword => S::KEYWORD_INSIDE_ACTION,
    });
    ctx.claim_line(parent);
}
