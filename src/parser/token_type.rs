//! Token types for Robot Framework cells
//!
//! Every token carries one or more of these tags. The first tag is the
//! primary classification; extra tags refine it (e.g. a keyword argument
//! that is also a scalar variable declaration).

/// All token classifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(non_camel_case_types)]
pub enum RobotTokenType {
    UNKNOWN,

    // =========================================================================
    // STRUCTURE
    // =========================================================================
    SETTINGS_TABLE_HEADER,
    VARIABLES_TABLE_HEADER,
    TEST_CASES_TABLE_HEADER,
    KEYWORDS_TABLE_HEADER,
    USER_OWN_TABLE_HEADER,
    TABLE_HEADER_COLUMN,
    PREVIOUS_LINE_CONTINUE,
    START_HASH_COMMENT,
    COMMENT_CONTINUE,
    PRETTY_ALIGN_SPACE,

    // =========================================================================
    // SETTINGS TABLE
    // =========================================================================
    SETTING_LIBRARY_DECLARATION,
    SETTING_LIBRARY_NAME,
    SETTING_LIBRARY_ARGUMENT,
    SETTING_LIBRARY_ALIAS,
    SETTING_LIBRARY_ALIAS_VALUE,
    SETTING_RESOURCE_DECLARATION,
    SETTING_RESOURCE_FILE_NAME,
    SETTING_RESOURCE_UNWANTED_ARGUMENT,
    SETTING_VARIABLES_DECLARATION,
    SETTING_VARIABLES_FILE_NAME,
    SETTING_VARIABLES_ARGUMENT,
    SETTING_DOCUMENTATION_DECLARATION,
    SETTING_DOCUMENTATION_TEXT,
    SETTING_METADATA_DECLARATION,
    SETTING_METADATA_KEY,
    SETTING_METADATA_VALUE,
    SETTING_SUITE_SETUP_DECLARATION,
    SETTING_SUITE_SETUP_KEYWORD_NAME,
    SETTING_SUITE_SETUP_KEYWORD_ARGUMENT,
    SETTING_SUITE_TEARDOWN_DECLARATION,
    SETTING_SUITE_TEARDOWN_KEYWORD_NAME,
    SETTING_SUITE_TEARDOWN_KEYWORD_ARGUMENT,
    SETTING_FORCE_TAGS_DECLARATION,
    SETTING_FORCE_TAGS,
    SETTING_DEFAULT_TAGS_DECLARATION,
    SETTING_DEFAULT_TAGS,
    SETTING_TEST_SETUP_DECLARATION,
    SETTING_TEST_SETUP_KEYWORD_NAME,
    SETTING_TEST_SETUP_KEYWORD_ARGUMENT,
    SETTING_TEST_TEARDOWN_DECLARATION,
    SETTING_TEST_TEARDOWN_KEYWORD_NAME,
    SETTING_TEST_TEARDOWN_KEYWORD_ARGUMENT,
    SETTING_TEST_TEMPLATE_DECLARATION,
    SETTING_TEST_TEMPLATE_KEYWORD_NAME,
    SETTING_TEST_TEMPLATE_KEYWORD_UNWANTED_ARGUMENT,
    SETTING_TEST_TIMEOUT_DECLARATION,
    SETTING_TEST_TIMEOUT_VALUE,
    SETTING_TEST_TIMEOUT_MESSAGE,
    SETTING_UNKNOWN_DECLARATION,
    SETTING_UNKNOWN_ARGUMENTS,

    // =========================================================================
    // VARIABLES TABLE
    // =========================================================================
    VARIABLES_SCALAR_DECLARATION,
    VARIABLES_SCALAR_AS_LIST_DECLARATION,
    VARIABLES_LIST_DECLARATION,
    VARIABLES_DICTIONARY_DECLARATION,
    VARIABLES_UNKNOWN_DECLARATION,
    VARIABLES_VARIABLE_VALUE,

    // =========================================================================
    // TEST CASES TABLE
    // =========================================================================
    TEST_CASE_NAME,
    TEST_CASE_ACTION_NAME,
    TEST_CASE_ACTION_ARGUMENT,
    TEST_CASE_SETTING_DOCUMENTATION,
    TEST_CASE_SETTING_DOCUMENTATION_TEXT,
    TEST_CASE_SETTING_TAGS_DECLARATION,
    TEST_CASE_SETTING_TAGS,
    TEST_CASE_SETTING_SETUP,
    TEST_CASE_SETTING_SETUP_KEYWORD_NAME,
    TEST_CASE_SETTING_SETUP_KEYWORD_ARGUMENT,
    TEST_CASE_SETTING_TEARDOWN,
    TEST_CASE_SETTING_TEARDOWN_KEYWORD_NAME,
    TEST_CASE_SETTING_TEARDOWN_KEYWORD_ARGUMENT,
    TEST_CASE_SETTING_TEMPLATE,
    TEST_CASE_SETTING_TEMPLATE_KEYWORD_NAME,
    TEST_CASE_SETTING_TEMPLATE_KEYWORD_UNWANTED_ARGUMENT,
    TEST_CASE_SETTING_TIMEOUT,
    TEST_CASE_SETTING_TIMEOUT_VALUE,
    TEST_CASE_SETTING_TIMEOUT_MESSAGE,
    TEST_CASE_SETTING_UNKNOWN_DECLARATION,
    TEST_CASE_SETTING_UNKNOWN_ARGUMENTS,

    // =========================================================================
    // KEYWORDS TABLE
    // =========================================================================
    KEYWORD_NAME,
    KEYWORD_ACTION_NAME,
    KEYWORD_ACTION_ARGUMENT,
    KEYWORD_SETTING_DOCUMENTATION,
    KEYWORD_SETTING_DOCUMENTATION_TEXT,
    KEYWORD_SETTING_TAGS,
    KEYWORD_SETTING_TAGS_TAG_NAME,
    KEYWORD_SETTING_ARGUMENTS,
    KEYWORD_SETTING_ARGUMENT,
    KEYWORD_SETTING_RETURN,
    KEYWORD_SETTING_RETURN_VALUE,
    KEYWORD_SETTING_TEARDOWN,
    KEYWORD_SETTING_TEARDOWN_KEYWORD_NAME,
    KEYWORD_SETTING_TEARDOWN_KEYWORD_ARGUMENT,
    KEYWORD_SETTING_TIMEOUT,
    KEYWORD_SETTING_TIMEOUT_VALUE,
    KEYWORD_SETTING_TIMEOUT_MESSAGE,
    KEYWORD_SETTING_UNKNOWN_DECLARATION,
    KEYWORD_SETTING_UNKNOWN_ARGUMENTS,
    KEYWORD_EMBEDDED_ARGUMENT,

    // =========================================================================
    // REFINEMENTS (secondary tags)
    // =========================================================================
    ASSIGNMENT,
}

impl RobotTokenType {
    pub fn is_comment(self) -> bool {
        matches!(self, Self::START_HASH_COMMENT | Self::COMMENT_CONTINUE)
    }

    pub fn is_table_header(self) -> bool {
        matches!(
            self,
            Self::SETTINGS_TABLE_HEADER
                | Self::VARIABLES_TABLE_HEADER
                | Self::TEST_CASES_TABLE_HEADER
                | Self::KEYWORDS_TABLE_HEADER
                | Self::USER_OWN_TABLE_HEADER
        )
    }

    pub fn is_variable_declaration(self) -> bool {
        matches!(
            self,
            Self::VARIABLES_SCALAR_DECLARATION
                | Self::VARIABLES_SCALAR_AS_LIST_DECLARATION
                | Self::VARIABLES_LIST_DECLARATION
                | Self::VARIABLES_DICTIONARY_DECLARATION
        )
    }

    /// Tokens that shape a line without belonging to any element
    pub fn is_structural(self) -> bool {
        matches!(self, Self::PREVIOUS_LINE_CONTINUE | Self::PRETTY_ALIGN_SPACE)
            || self.is_table_header()
            || self == Self::TABLE_HEADER_COLUMN
    }
}
