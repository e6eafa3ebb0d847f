//! Presave sorters
//!
//! Before writing, every element's tokens are ordered into the column
//! sequence its type expects. The order is a fixed rank per token role,
//! stable within a rank so values keep their relative order:
//!
//! | rank | role |
//! |------|------|
//! | 1 | declaration, name or action |
//! | 2 | key (`Metadata` name) |
//! | 3 | values and arguments |
//! | 4 | `#` comment start |
//! | 5 | comment continuation |

use crate::parser::RobotTokenType as T;
use crate::syntax::executables::{ExecutableBody, TestCase, UserKeyword};
use crate::syntax::settings::Setting;
use crate::syntax::table::ModelElement;
use crate::syntax::variables::Variable;
use crate::syntax::{ElementId, RobotFile, TokenId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PresaveRank {
    Declaration = 1,
    Key = 2,
    Value = 3,
    CommentStart = 4,
    CommentContinue = 5,
}

impl PresaveRank {
    pub fn of(kind: T) -> Self {
        match kind {
            T::START_HASH_COMMENT => Self::CommentStart,
            T::COMMENT_CONTINUE => Self::CommentContinue,
            T::SETTING_METADATA_KEY => Self::Key,
            k if is_declaration(k) => Self::Declaration,
            _ => Self::Value,
        }
    }
}

fn is_declaration(kind: T) -> bool {
    matches!(
        kind,
        T::SETTING_LIBRARY_DECLARATION
            | T::SETTING_RESOURCE_DECLARATION
            | T::SETTING_VARIABLES_DECLARATION
            | T::SETTING_DOCUMENTATION_DECLARATION
            | T::SETTING_METADATA_DECLARATION
            | T::SETTING_SUITE_SETUP_DECLARATION
            | T::SETTING_SUITE_TEARDOWN_DECLARATION
            | T::SETTING_FORCE_TAGS_DECLARATION
            | T::SETTING_DEFAULT_TAGS_DECLARATION
            | T::SETTING_TEST_SETUP_DECLARATION
            | T::SETTING_TEST_TEARDOWN_DECLARATION
            | T::SETTING_TEST_TEMPLATE_DECLARATION
            | T::SETTING_TEST_TIMEOUT_DECLARATION
            | T::SETTING_UNKNOWN_DECLARATION
            | T::VARIABLES_SCALAR_DECLARATION
            | T::VARIABLES_SCALAR_AS_LIST_DECLARATION
            | T::VARIABLES_LIST_DECLARATION
            | T::VARIABLES_DICTIONARY_DECLARATION
            | T::VARIABLES_UNKNOWN_DECLARATION
            | T::TEST_CASE_NAME
            | T::TEST_CASE_ACTION_NAME
            | T::TEST_CASE_SETTING_DOCUMENTATION
            | T::TEST_CASE_SETTING_TAGS_DECLARATION
            | T::TEST_CASE_SETTING_SETUP
            | T::TEST_CASE_SETTING_TEARDOWN
            | T::TEST_CASE_SETTING_TEMPLATE
            | T::TEST_CASE_SETTING_TIMEOUT
            | T::TEST_CASE_SETTING_UNKNOWN_DECLARATION
            | T::KEYWORD_NAME
            | T::KEYWORD_ACTION_NAME
            | T::KEYWORD_SETTING_DOCUMENTATION
            | T::KEYWORD_SETTING_TAGS
            | T::KEYWORD_SETTING_ARGUMENTS
            | T::KEYWORD_SETTING_RETURN
            | T::KEYWORD_SETTING_TEARDOWN
            | T::KEYWORD_SETTING_TIMEOUT
            | T::KEYWORD_SETTING_UNKNOWN_DECLARATION
    )
}

/// Stable sort of `tokens` into presave order
pub fn sort_for_save(file: &RobotFile, tokens: &mut [TokenId]) {
    tokens.sort_by_key(|id| PresaveRank::of(file.token(*id).primary_type()));
}

/// A group of tokens written on one logical line (plus continuations)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveUnit {
    pub id: ElementId,
    /// Body lines of test cases and keywords start with an empty cell
    pub indented: bool,
    pub tokens: Vec<TokenId>,
}

/// Per-model-type split of an element into presave-sorted units
pub trait PresaveSorter: ModelElement {
    fn save_units(&self, file: &RobotFile) -> Vec<SaveUnit>;
}

fn unit(file: &RobotFile, id: ElementId, indented: bool, mut tokens: Vec<TokenId>) -> SaveUnit {
    sort_for_save(file, &mut tokens);
    SaveUnit {
        id,
        indented,
        tokens,
    }
}

impl PresaveSorter for Setting {
    fn save_units(&self, file: &RobotFile) -> Vec<SaveUnit> {
        let mut tokens = Vec::new();
        self.collect_tokens(&mut tokens);
        vec![unit(file, self.id(), false, tokens)]
    }
}

impl PresaveSorter for Variable {
    fn save_units(&self, file: &RobotFile) -> Vec<SaveUnit> {
        let mut tokens = Vec::new();
        self.collect_tokens(&mut tokens);
        vec![unit(file, self.id(), false, tokens)]
    }
}

fn body_units(
    file: &RobotFile,
    owner: ElementId,
    name: TokenId,
    body: &ExecutableBody,
) -> Vec<SaveUnit> {
    let mut units = vec![unit(file, owner, false, vec![name])];
    for setting in &body.settings {
        let mut tokens = Vec::new();
        setting.collect_tokens(&mut tokens);
        units.push(unit(file, setting.id(), true, tokens));
    }
    for row in &body.rows {
        let mut tokens = Vec::new();
        row.collect_tokens(&mut tokens);
        units.push(unit(file, row.id(), true, tokens));
    }
    units
}

impl PresaveSorter for TestCase {
    fn save_units(&self, file: &RobotFile) -> Vec<SaveUnit> {
        body_units(file, self.id(), self.name(), self.body())
    }
}

impl PresaveSorter for UserKeyword {
    fn save_units(&self, file: &RobotFile) -> Vec<SaveUnit> {
        body_units(file, self.id(), self.name(), self.body())
    }
}
