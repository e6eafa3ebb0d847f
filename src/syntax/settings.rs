//! Settings table elements

use super::file::{ElementId, RobotFile, TokenId};
use super::table::ModelElement;
use crate::parser::RobotTokenType as T;
use crate::parser::recognizer::is_library_alias;

/// What a Settings table line declares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKind {
    Library,
    Resource,
    Variables,
    Documentation,
    Metadata,
    SuiteSetup,
    SuiteTeardown,
    ForceTags,
    DefaultTags,
    TestSetup,
    TestTeardown,
    TestTemplate,
    TestTimeout,
    Unknown,
}

impl SettingKind {
    /// Kind implied by a recognized declaration token type
    pub fn from_declaration(kind: T) -> Self {
        match kind {
            T::SETTING_LIBRARY_DECLARATION => Self::Library,
            T::SETTING_RESOURCE_DECLARATION => Self::Resource,
            T::SETTING_VARIABLES_DECLARATION => Self::Variables,
            T::SETTING_DOCUMENTATION_DECLARATION => Self::Documentation,
            T::SETTING_METADATA_DECLARATION => Self::Metadata,
            T::SETTING_SUITE_SETUP_DECLARATION => Self::SuiteSetup,
            T::SETTING_SUITE_TEARDOWN_DECLARATION => Self::SuiteTeardown,
            T::SETTING_FORCE_TAGS_DECLARATION => Self::ForceTags,
            T::SETTING_DEFAULT_TAGS_DECLARATION => Self::DefaultTags,
            T::SETTING_TEST_SETUP_DECLARATION => Self::TestSetup,
            T::SETTING_TEST_TEARDOWN_DECLARATION => Self::TestTeardown,
            T::SETTING_TEST_TEMPLATE_DECLARATION => Self::TestTemplate,
            T::SETTING_TEST_TIMEOUT_DECLARATION => Self::TestTimeout,
            _ => Self::Unknown,
        }
    }

    pub fn declaration_type(self) -> T {
        match self {
            Self::Library => T::SETTING_LIBRARY_DECLARATION,
            Self::Resource => T::SETTING_RESOURCE_DECLARATION,
            Self::Variables => T::SETTING_VARIABLES_DECLARATION,
            Self::Documentation => T::SETTING_DOCUMENTATION_DECLARATION,
            Self::Metadata => T::SETTING_METADATA_DECLARATION,
            Self::SuiteSetup => T::SETTING_SUITE_SETUP_DECLARATION,
            Self::SuiteTeardown => T::SETTING_SUITE_TEARDOWN_DECLARATION,
            Self::ForceTags => T::SETTING_FORCE_TAGS_DECLARATION,
            Self::DefaultTags => T::SETTING_DEFAULT_TAGS_DECLARATION,
            Self::TestSetup => T::SETTING_TEST_SETUP_DECLARATION,
            Self::TestTeardown => T::SETTING_TEST_TEARDOWN_DECLARATION,
            Self::TestTemplate => T::SETTING_TEST_TEMPLATE_DECLARATION,
            Self::TestTimeout => T::SETTING_TEST_TIMEOUT_DECLARATION,
            Self::Unknown => T::SETTING_UNKNOWN_DECLARATION,
        }
    }

    pub fn is_import(self) -> bool {
        matches!(self, Self::Library | Self::Resource | Self::Variables)
    }

    /// Token type of the argument at `index`, given the previous argument's type
    pub fn argument_type(self, index: usize, previous: Option<T>, text: &str) -> T {
        match self {
            Self::Library if index == 0 => T::SETTING_LIBRARY_NAME,
            Self::Library if previous == Some(T::SETTING_LIBRARY_ALIAS) => {
                T::SETTING_LIBRARY_ALIAS_VALUE
            }
            Self::Library if is_library_alias(text) => T::SETTING_LIBRARY_ALIAS,
            Self::Library => T::SETTING_LIBRARY_ARGUMENT,
            Self::Resource if index == 0 => T::SETTING_RESOURCE_FILE_NAME,
            Self::Resource => T::SETTING_RESOURCE_UNWANTED_ARGUMENT,
            Self::Variables if index == 0 => T::SETTING_VARIABLES_FILE_NAME,
            Self::Variables => T::SETTING_VARIABLES_ARGUMENT,
            Self::Documentation => T::SETTING_DOCUMENTATION_TEXT,
            Self::Metadata if index == 0 => T::SETTING_METADATA_KEY,
            Self::Metadata => T::SETTING_METADATA_VALUE,
            Self::SuiteSetup if index == 0 => T::SETTING_SUITE_SETUP_KEYWORD_NAME,
            Self::SuiteSetup => T::SETTING_SUITE_SETUP_KEYWORD_ARGUMENT,
            Self::SuiteTeardown if index == 0 => T::SETTING_SUITE_TEARDOWN_KEYWORD_NAME,
            Self::SuiteTeardown => T::SETTING_SUITE_TEARDOWN_KEYWORD_ARGUMENT,
            Self::ForceTags => T::SETTING_FORCE_TAGS,
            Self::DefaultTags => T::SETTING_DEFAULT_TAGS,
            Self::TestSetup if index == 0 => T::SETTING_TEST_SETUP_KEYWORD_NAME,
            Self::TestSetup => T::SETTING_TEST_SETUP_KEYWORD_ARGUMENT,
            Self::TestTeardown if index == 0 => T::SETTING_TEST_TEARDOWN_KEYWORD_NAME,
            Self::TestTeardown => T::SETTING_TEST_TEARDOWN_KEYWORD_ARGUMENT,
            Self::TestTemplate if index == 0 => T::SETTING_TEST_TEMPLATE_KEYWORD_NAME,
            Self::TestTemplate => T::SETTING_TEST_TEMPLATE_KEYWORD_UNWANTED_ARGUMENT,
            Self::TestTimeout if index == 0 => T::SETTING_TEST_TIMEOUT_VALUE,
            Self::TestTimeout => T::SETTING_TEST_TIMEOUT_MESSAGE,
            Self::Unknown => T::SETTING_UNKNOWN_ARGUMENTS,
        }
    }
}

/// One line (plus continuations) of the Settings table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Setting {
    id: ElementId,
    kind: SettingKind,
    declaration: TokenId,
    arguments: Vec<TokenId>,
    comment: Vec<TokenId>,
}

impl Setting {
    pub fn new(id: ElementId, kind: SettingKind, declaration: TokenId) -> Self {
        Self {
            id,
            kind,
            declaration,
            arguments: Vec::new(),
            comment: Vec::new(),
        }
    }

    pub fn kind(&self) -> SettingKind {
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

    /// Library name or resource/variables path of an import
    pub fn import_target(&self) -> Option<TokenId> {
        if self.kind.is_import() {
            self.arguments.first().copied()
        } else {
            None
        }
    }

    /// Alias given with `WITH NAME`
    pub fn library_alias(&self, file: &RobotFile) -> Option<TokenId> {
        self.arguments
            .iter()
            .copied()
            .find(|id| file.token(*id).has_type(T::SETTING_LIBRARY_ALIAS_VALUE))
    }

    /// Metadata key; the remaining arguments are its values
    pub fn metadata_key(&self) -> Option<TokenId> {
        match self.kind {
            SettingKind::Metadata => self.arguments.first().copied(),
            _ => None,
        }
    }
}

impl ModelElement for Setting {
    fn id(&self) -> ElementId {
        self.id
    }

    fn collect_tokens(&self, out: &mut Vec<TokenId>) {
        out.push(self.declaration);
        out.extend(&self.arguments);
        out.extend(&self.comment);
    }
}
