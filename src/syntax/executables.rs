//! Test cases, user keywords and their bodies

use super::file::{ElementId, TokenId};
use super::table::ModelElement;
use crate::parser::{RobotToken, RobotTokenType as T};

/// Test case or user keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExecutableKind {
    TestCase,
    Keyword,
}

/// `[Setting]` inside a test case or keyword body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExecutableSettingKind {
    Documentation,
    Tags,
    Setup,
    Teardown,
    Template,
    Timeout,
    /// Keywords only
    Arguments,
    /// Keywords only
    Return,
    Unknown,
}

impl ExecutableSettingKind {
    pub fn from_declaration(kind: T) -> Self {
        match kind {
            T::TEST_CASE_SETTING_DOCUMENTATION | T::KEYWORD_SETTING_DOCUMENTATION => {
                Self::Documentation
            }
            T::TEST_CASE_SETTING_TAGS_DECLARATION | T::KEYWORD_SETTING_TAGS => Self::Tags,
            T::TEST_CASE_SETTING_SETUP => Self::Setup,
            T::TEST_CASE_SETTING_TEARDOWN | T::KEYWORD_SETTING_TEARDOWN => Self::Teardown,
            T::TEST_CASE_SETTING_TEMPLATE => Self::Template,
            T::TEST_CASE_SETTING_TIMEOUT | T::KEYWORD_SETTING_TIMEOUT => Self::Timeout,
            T::KEYWORD_SETTING_ARGUMENTS => Self::Arguments,
            T::KEYWORD_SETTING_RETURN => Self::Return,
            _ => Self::Unknown,
        }
    }

    /// Token type of an unrecognized `[...]` declaration
    pub fn unknown_declaration(owner: ExecutableKind) -> T {
        match owner {
            ExecutableKind::TestCase => T::TEST_CASE_SETTING_UNKNOWN_DECLARATION,
            ExecutableKind::Keyword => T::KEYWORD_SETTING_UNKNOWN_DECLARATION,
        }
    }

    /// Token type of the argument at `index`
    pub fn argument_type(self, owner: ExecutableKind, index: usize) -> T {
        use ExecutableKind::{Keyword, TestCase};
        match (owner, self) {
            (TestCase, Self::Documentation) => T::TEST_CASE_SETTING_DOCUMENTATION_TEXT,
            (TestCase, Self::Tags) => T::TEST_CASE_SETTING_TAGS,
            (TestCase, Self::Setup) if index == 0 => T::TEST_CASE_SETTING_SETUP_KEYWORD_NAME,
            (TestCase, Self::Setup) => T::TEST_CASE_SETTING_SETUP_KEYWORD_ARGUMENT,
            (TestCase, Self::Teardown) if index == 0 => {
                T::TEST_CASE_SETTING_TEARDOWN_KEYWORD_NAME
            }
            (TestCase, Self::Teardown) => T::TEST_CASE_SETTING_TEARDOWN_KEYWORD_ARGUMENT,
            (TestCase, Self::Template) if index == 0 => {
                T::TEST_CASE_SETTING_TEMPLATE_KEYWORD_NAME
            }
            (TestCase, Self::Template) => T::TEST_CASE_SETTING_TEMPLATE_KEYWORD_UNWANTED_ARGUMENT,
            (TestCase, Self::Timeout) if index == 0 => T::TEST_CASE_SETTING_TIMEOUT_VALUE,
            (TestCase, Self::Timeout) => T::TEST_CASE_SETTING_TIMEOUT_MESSAGE,
            (TestCase, _) => T::TEST_CASE_SETTING_UNKNOWN_ARGUMENTS,
            (Keyword, Self::Documentation) => T::KEYWORD_SETTING_DOCUMENTATION_TEXT,
            (Keyword, Self::Tags) => T::KEYWORD_SETTING_TAGS_TAG_NAME,
            (Keyword, Self::Arguments) => T::KEYWORD_SETTING_ARGUMENT,
            (Keyword, Self::Return) => T::KEYWORD_SETTING_RETURN_VALUE,
            (Keyword, Self::Teardown) if index == 0 => T::KEYWORD_SETTING_TEARDOWN_KEYWORD_NAME,
            (Keyword, Self::Teardown) => T::KEYWORD_SETTING_TEARDOWN_KEYWORD_ARGUMENT,
            (Keyword, Self::Timeout) if index == 0 => T::KEYWORD_SETTING_TIMEOUT_VALUE,
            (Keyword, Self::Timeout) => T::KEYWORD_SETTING_TIMEOUT_MESSAGE,
            (Keyword, _) => T::KEYWORD_SETTING_UNKNOWN_ARGUMENTS,
        }
    }
}

/// A `[Setting]` line in a test case or keyword
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutableSetting {
    id: ElementId,
    kind: ExecutableSettingKind,
    declaration: TokenId,
    arguments: Vec<TokenId>,
    comment: Vec<TokenId>,
}

impl ExecutableSetting {
    pub fn new(id: ElementId, kind: ExecutableSettingKind, declaration: TokenId) -> Self {
        Self {
            id,
            kind,
            declaration,
            arguments: Vec::new(),
            comment: Vec::new(),
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn kind(&self) -> ExecutableSettingKind {
        self.kind
    }

    pub fn declaration(&self) -> TokenId {
        self.declaration
    }

    pub fn arguments(&self) -> &[TokenId] {
        &self.arguments
    }

    pub fn comment(&self) -> &[TokenId] {
        &self.comment
    }

    pub fn add_argument(&mut self, token: TokenId) {
        self.arguments.push(token);
    }

    pub fn remove_argument(&mut self, token: TokenId) -> bool {
        let before = self.arguments.len();
        self.arguments.retain(|t| *t != token);
        before != self.arguments.len()
    }

    pub fn add_comment_part(&mut self, token: TokenId) {
        self.comment.push(token);
    }

    pub fn collect_tokens(&self, out: &mut Vec<TokenId>) {
        out.push(self.declaration);
        out.extend(&self.arguments);
        out.extend(&self.comment);
    }
}

/// A keyword call (or comment-only line) in a body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutableRow {
    id: ElementId,
    action: Option<TokenId>,
    arguments: Vec<TokenId>,
    comment: Vec<TokenId>,
}

impl ExecutableRow {
    pub fn new(id: ElementId, action: Option<TokenId>) -> Self {
        Self {
            id,
            action,
            arguments: Vec::new(),
            comment: Vec::new(),
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn action(&self) -> Option<TokenId> {
        self.action
    }

    pub fn arguments(&self) -> &[TokenId] {
        &self.arguments
    }

    pub fn comment(&self) -> &[TokenId] {
        &self.comment
    }

    pub fn is_comment_only(&self) -> bool {
        self.action.is_none() && self.arguments.is_empty()
    }

    pub fn add_argument(&mut self, token: TokenId) {
        self.arguments.push(token);
    }

    pub fn insert_argument(&mut self, index: usize, token: TokenId) {
        let index = index.min(self.arguments.len());
        self.arguments.insert(index, token);
    }

    pub fn remove_argument(&mut self, token: TokenId) -> bool {
        let before = self.arguments.len();
        self.arguments.retain(|t| *t != token);
        before != self.arguments.len()
    }

    pub fn add_comment_part(&mut self, token: TokenId) {
        self.comment.push(token);
    }

    pub fn collect_tokens(&self, out: &mut Vec<TokenId>) {
        out.extend(self.action);
        out.extend(&self.arguments);
        out.extend(&self.comment);
    }
}

/// Settings and rows of a test case or keyword, each in source order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutableBody {
    pub settings: Vec<ExecutableSetting>,
    pub rows: Vec<ExecutableRow>,
}

impl ExecutableBody {
    pub fn contains(&self, id: ElementId) -> bool {
        self.settings.iter().any(|s| s.id == id) || self.rows.iter().any(|r| r.id == id)
    }

    pub fn remove_child(&mut self, id: ElementId) -> bool {
        let before = self.settings.len() + self.rows.len();
        self.settings.retain(|s| s.id != id);
        self.rows.retain(|r| r.id != id);
        before != self.settings.len() + self.rows.len()
    }

    pub fn settings_of(
        &self,
        kind: ExecutableSettingKind,
    ) -> impl Iterator<Item = &ExecutableSetting> + '_ {
        self.settings.iter().filter(move |s| s.kind == kind)
    }

    pub fn collect_tokens(&self, out: &mut Vec<TokenId>) {
        self.settings.iter().for_each(|s| s.collect_tokens(out));
        self.rows.iter().for_each(|r| r.collect_tokens(out));
    }
}

/// An entry of the Test Cases table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    id: ElementId,
    name: TokenId,
    body: ExecutableBody,
}

impl TestCase {
    pub fn new(id: ElementId, name: TokenId) -> Self {
        Self {
            id,
            name,
            body: ExecutableBody::default(),
        }
    }

    pub fn name(&self) -> TokenId {
        self.name
    }

    pub fn body(&self) -> &ExecutableBody {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut ExecutableBody {
        &mut self.body
    }
}

impl ModelElement for TestCase {
    fn id(&self) -> ElementId {
        self.id
    }

    fn collect_tokens(&self, out: &mut Vec<TokenId>) {
        out.push(self.name);
        self.body.collect_tokens(out);
    }

    fn contains_child(&self, id: ElementId) -> bool {
        self.body.contains(id)
    }
}

/// An entry of the Keywords table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserKeyword {
    id: ElementId,
    name: TokenId,
    embedded_arguments: Vec<RobotToken>,
    body: ExecutableBody,
}

impl UserKeyword {
    pub fn new(id: ElementId, name: TokenId) -> Self {
        Self {
            id,
            name,
            embedded_arguments: Vec::new(),
            body: ExecutableBody::default(),
        }
    }

    pub fn name(&self) -> TokenId {
        self.name
    }

    /// `${arg}` declarations taken from the keyword name
    pub fn embedded_arguments(&self) -> &[RobotToken] {
        &self.embedded_arguments
    }

    pub(crate) fn set_embedded_arguments(&mut self, arguments: Vec<RobotToken>) {
        self.embedded_arguments = arguments;
    }

    pub fn body(&self) -> &ExecutableBody {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut ExecutableBody {
        &mut self.body
    }
}

impl ModelElement for UserKeyword {
    fn id(&self) -> ElementId {
        self.id
    }

    fn collect_tokens(&self, out: &mut Vec<TokenId>) {
        out.push(self.name);
        self.body.collect_tokens(out);
    }

    fn contains_child(&self, id: ElementId) -> bool {
        self.body.contains(id)
    }
}
