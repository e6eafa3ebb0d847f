//! Parsing state stack and the context threaded through every mapper call

use super::options::ParseOptions;
use super::token::{RobotToken, Separator};
use crate::base::RobotVersion;
use crate::syntax::executables::ExecutableSettingKind;
use crate::syntax::settings::SettingKind;
use crate::syntax::variables::VariableType;
use crate::syntax::{ElementId, LineElement, RobotFile, RobotLine, TableKind, TokenId};

/// A grammar position marker on the state stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(non_camel_case_types)]
pub enum ParsingState {
    /// Before the first header or inside an unrecognized section
    TRASH,

    SETTING_TABLE_INSIDE,
    /// Reading the arguments of a setting
    SETTING(SettingKind),

    VARIABLE_TABLE_INSIDE,
    /// Reading the values of a variable (`SCALAR_VARIABLE_VALUE`, ...)
    VARIABLE_VALUE(VariableType),

    TEST_CASE_TABLE_INSIDE,
    TEST_CASE_DECLARATION,
    TEST_CASE_INSIDE_ACTION,
    /// Reading the arguments of a test case setting (`TEST_CASE_SETTING_TAGS`, ...)
    TEST_CASE_SETTING(ExecutableSettingKind),

    KEYWORD_TABLE_INSIDE,
    KEYWORD_DECLARATION,
    KEYWORD_INSIDE_ACTION,
    KEYWORD_SETTING(ExecutableSettingKind),
}

impl ParsingState {
    /// State entered right after a table header
    pub fn for_table(kind: TableKind) -> Self {
        match kind {
            TableKind::Settings => Self::SETTING_TABLE_INSIDE,
            TableKind::Variables => Self::VARIABLE_TABLE_INSIDE,
            TableKind::TestCases => Self::TEST_CASE_TABLE_INSIDE,
            TableKind::Keywords => Self::KEYWORD_TABLE_INSIDE,
            TableKind::UserOwn => Self::TRASH,
        }
    }

    /// States that survive a line break
    pub fn is_line_base(self) -> bool {
        matches!(
            self,
            Self::TRASH
                | Self::SETTING_TABLE_INSIDE
                | Self::VARIABLE_TABLE_INSIDE
                | Self::TEST_CASE_TABLE_INSIDE
                | Self::TEST_CASE_DECLARATION
                | Self::KEYWORD_TABLE_INSIDE
                | Self::KEYWORD_DECLARATION
        )
    }
}

/// Where a cell sits on its line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellPosition {
    /// Grammar column (0 = first column)
    pub column: usize,
    /// No other cell (not even `...`) precedes this one on the line
    pub first_on_line: bool,
}

#[derive(Debug, Default)]
struct LineCursor {
    cells: usize,
    in_comment: bool,
    in_header: Option<TableKind>,
    attached: bool,
}

/// Mutable parse state: state stack, current line and the document being built
pub struct ParserContext<'o> {
    pub file: RobotFile,
    options: &'o ParseOptions,
    states: Vec<ParsingState>,
    previous_line: Option<(Vec<ParsingState>, Option<ElementId>)>,
    cursor: LineCursor,
}

impl<'o> ParserContext<'o> {
    pub fn new(file: RobotFile, options: &'o ParseOptions) -> Self {
        Self {
            file,
            options,
            states: vec![ParsingState::TRASH],
            previous_line: None,
            cursor: LineCursor::default(),
        }
    }

    pub fn options(&self) -> &ParseOptions {
        self.options
    }

    pub fn version(&self) -> Option<&RobotVersion> {
        self.options.version.as_ref()
    }

    // ========================================================================
    // STATE STACK
    // ========================================================================

    pub fn top(&self) -> ParsingState {
        self.states.last().copied().unwrap_or(ParsingState::TRASH)
    }

    pub fn states(&self) -> &[ParsingState] {
        &self.states
    }

    pub fn push(&mut self, state: ParsingState) {
        self.states.push(state);
    }

    /// Drop everything above the table-level state
    pub fn pop_to_table(&mut self) {
        self.states.truncate(1);
    }

    /// A header clears the stack and forgets the previous construct
    pub fn enter_table(&mut self, kind: TableKind) {
        self.states.clear();
        self.states.push(ParsingState::for_table(kind));
        self.previous_line = None;
        self.cursor.in_header = Some(kind);
    }

    // ========================================================================
    // LINES
    // ========================================================================

    pub fn begin_line(&mut self, line: RobotLine) {
        self.file.push_line(line);
        self.cursor = LineCursor::default();
        while self.states.len() > 1 && !self.top().is_line_base() {
            self.states.pop();
        }
    }

    /// Remember the construct of a line so `...` on a later line can resume it
    pub fn end_line(&mut self) {
        if self.cursor.attached {
            let owner = self.file.lines().last().and_then(|line| line.owner);
            self.previous_line = Some((self.states.clone(), owner));
        }
    }

    /// Resume the construct of the previous line; false when there is none
    pub fn continue_previous_line(&mut self) -> bool {
        match self.previous_line.clone() {
            Some((states, owner)) => {
                self.states = states;
                if let Some(owner) = owner {
                    self.claim_line(owner);
                }
                true
            }
            None => false,
        }
    }

    pub fn push_token(&mut self, token: RobotToken) -> TokenId {
        let id = self.file.add_token(token);
        if let Some(line) = self.file.last_line_mut() {
            line.elements.push(LineElement::Token(id));
        }
        id
    }

    pub fn push_separator(&mut self, separator: Separator) {
        if let Some(line) = self.file.last_line_mut() {
            line.elements.push(LineElement::Separator(separator));
        }
    }

    /// Record the top-level element the current line belongs to
    pub fn claim_line(&mut self, owner: ElementId) {
        if let Some(line) = self.file.last_line_mut() {
            line.owner.get_or_insert(owner);
        }
    }

    /// A cell of the current line was attached to `owner`
    pub fn attach(&mut self, owner: ElementId) {
        self.claim_line(owner);
        self.cursor.attached = true;
    }

    pub fn next_cell(&mut self, column: usize) -> CellPosition {
        let position = CellPosition {
            column,
            first_on_line: self.cursor.cells == 0,
        };
        self.cursor.cells += 1;
        position
    }

    pub fn in_comment(&self) -> bool {
        self.cursor.in_comment
    }

    pub fn start_comment(&mut self) {
        self.cursor.in_comment = true;
    }

    /// Table whose header is on the current line
    pub fn header_on_line(&self) -> Option<TableKind> {
        self.cursor.in_header
    }

    pub fn new_element_id(&mut self) -> ElementId {
        self.file.next_element_id()
    }

    pub fn into_file(self) -> RobotFile {
        self.file
    }
}
