//! The parsed document.
//!
//! A [`RobotFile`] owns every token of the file in an arena and every
//! physical line in source order. Elements reference tokens through
//! [`TokenId`] handles; lines reference the same tokens so the dumper can
//! replay the original layout. Element identity across edits is carried by
//! [`ElementId`], which never changes when elements move or are removed.

use std::path::{Path, PathBuf};

use super::executables::{TestCase, UserKeyword};
use super::settings::Setting;
use super::table::{ModelElement, Table, TableHeader};
use super::variables::Variable;
use crate::base::RobotVersion;
use crate::parser::{EndOfLine, FileFormat, RobotToken, RobotTokenType, Separator, SeparatorType};

/// Handle to a token in a [`RobotFile`] arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenId(u32);

impl TokenId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Stable identity of an element or sub-element
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(u32);

impl ElementId {
    pub fn raw(self) -> u32 {
        self.0
    }
}

/// Content of a physical line, in source order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineElement {
    Token(TokenId),
    Separator(Separator),
}

/// A physical source line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RobotLine {
    /// 1-based line number
    pub number: i32,
    /// Byte offset of the first character
    pub offset: i32,
    pub elements: Vec<LineElement>,
    pub eol: EndOfLine,
    pub mode: SeparatorType,
    /// Top-level element the line's cells were attached to while parsing
    pub owner: Option<ElementId>,
}

impl RobotLine {
    pub fn new(number: i32, offset: i32, eol: EndOfLine, mode: SeparatorType) -> Self {
        Self {
            number,
            offset,
            elements: Vec::new(),
            eol,
            mode,
            owner: None,
        }
    }

    pub fn tokens(&self) -> impl Iterator<Item = TokenId> + '_ {
        self.elements.iter().filter_map(|element| match element {
            LineElement::Token(id) => Some(*id),
            LineElement::Separator(_) => None,
        })
    }

    /// Separator right before `token` on this line
    pub fn separator_before(&self, token: TokenId) -> Option<&Separator> {
        let index = self
            .elements
            .iter()
            .position(|element| *element == LineElement::Token(token))?;
        match self.elements[..index].last() {
            Some(LineElement::Separator(separator)) => Some(separator),
            _ => None,
        }
    }
}

/// Which table an element lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    Settings,
    Variables,
    TestCases,
    Keywords,
    /// Unrecognized `*** ... ***` section whose content is kept verbatim
    UserOwn,
}

/// Where an element sits in the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementLocation {
    pub table: TableKind,
    /// Index of the top-level element in its table
    pub index: usize,
    /// Enclosing test case or keyword for sub-elements
    pub parent: Option<ElementId>,
}

/// A parsed Robot Framework file
#[derive(Debug, Clone, Default)]
pub struct RobotFile {
    path: Option<PathBuf>,
    format: FileFormat,
    version: Option<RobotVersion>,
    bom: bool,
    tokens: Vec<RobotToken>,
    lines: Vec<RobotLine>,
    settings: Table<Setting>,
    variables: Table<Variable>,
    test_cases: Table<TestCase>,
    keywords: Table<UserKeyword>,
    user_tables: Vec<TableHeader>,
    next_element: u32,
}

impl RobotFile {
    pub fn new(format: FileFormat) -> Self {
        Self {
            format,
            ..Self::default()
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn set_path(&mut self, path: impl Into<PathBuf>) {
        self.path = Some(path.into());
    }

    pub fn format(&self) -> FileFormat {
        self.format
    }

    /// Version the file was parsed with
    pub fn version(&self) -> Option<&RobotVersion> {
        self.version.as_ref()
    }

    pub(crate) fn set_version(&mut self, version: Option<RobotVersion>) {
        self.version = version;
    }

    pub fn has_bom(&self) -> bool {
        self.bom
    }

    pub(crate) fn set_bom(&mut self, bom: bool) {
        self.bom = bom;
    }

    // ========================================================================
    // TOKENS
    // ========================================================================

    pub fn token(&self, id: TokenId) -> &RobotToken {
        &self.tokens[id.index()]
    }

    pub fn token_mut(&mut self, id: TokenId) -> &mut RobotToken {
        &mut self.tokens[id.index()]
    }

    /// Text of a token
    pub fn text(&self, id: TokenId) -> &str {
        self.tokens[id.index()].text()
    }

    pub fn tokens(&self) -> &[RobotToken] {
        &self.tokens
    }

    /// Store a token and return its handle
    pub fn add_token(&mut self, token: RobotToken) -> TokenId {
        let id = TokenId(self.tokens.len() as u32);
        self.tokens.push(token);
        id
    }

    /// Create a new unpositioned token for model edits
    pub fn new_token(&mut self, text: &str, kind: RobotTokenType) -> TokenId {
        let mut token = RobotToken::create(text);
        token.set_type(kind);
        self.add_token(token)
    }

    pub fn clear_dirty_flags(&mut self) {
        self.tokens
            .iter_mut()
            .for_each(RobotToken::clear_dirty_flag);
    }

    // ========================================================================
    // LINES
    // ========================================================================

    pub fn lines(&self) -> &[RobotLine] {
        &self.lines
    }

    pub(crate) fn push_line(&mut self, line: RobotLine) {
        self.lines.push(line);
    }

    pub(crate) fn last_line_mut(&mut self) -> Option<&mut RobotLine> {
        self.lines.last_mut()
    }

    /// Line a positioned token was read from
    pub fn line_of(&self, id: TokenId) -> Option<&RobotLine> {
        let number = self.token(id).line_number();
        if number < 1 {
            return None;
        }
        self.lines.get(number as usize - 1)
    }

    // ========================================================================
    // TABLES
    // ========================================================================

    pub fn settings(&self) -> &Table<Setting> {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut Table<Setting> {
        &mut self.settings
    }

    pub fn variables(&self) -> &Table<Variable> {
        &self.variables
    }

    pub fn variables_mut(&mut self) -> &mut Table<Variable> {
        &mut self.variables
    }

    pub fn test_cases(&self) -> &Table<TestCase> {
        &self.test_cases
    }

    pub fn test_cases_mut(&mut self) -> &mut Table<TestCase> {
        &mut self.test_cases
    }

    pub fn keywords(&self) -> &Table<UserKeyword> {
        &self.keywords
    }

    pub fn keywords_mut(&mut self) -> &mut Table<UserKeyword> {
        &mut self.keywords
    }

    /// Headers of unrecognized sections
    pub fn user_tables(&self) -> &[TableHeader] {
        &self.user_tables
    }

    pub(crate) fn user_tables_mut(&mut self) -> &mut Vec<TableHeader> {
        &mut self.user_tables
    }

    pub(crate) fn add_header(&mut self, header: TableHeader) {
        match header.kind {
            TableKind::Settings => self.settings.add_header(header),
            TableKind::Variables => self.variables.add_header(header),
            TableKind::TestCases => self.test_cases.add_header(header),
            TableKind::Keywords => self.keywords.add_header(header),
            TableKind::UserOwn => self.user_tables.push(header),
        }
    }

    /// All headers, in source order
    pub fn headers(&self) -> Vec<&TableHeader> {
        let mut headers: Vec<&TableHeader> = self
            .settings
            .headers()
            .iter()
            .chain(self.variables.headers())
            .chain(self.test_cases.headers())
            .chain(self.keywords.headers())
            .chain(self.user_tables.iter())
            .collect();
        headers.sort_by_key(|header| header.line);
        headers
    }

    /// Allocate a fresh element identity
    pub fn next_element_id(&mut self) -> ElementId {
        let id = ElementId(self.next_element);
        self.next_element += 1;
        id
    }

    /// Find where an element (or sub-element) lives
    pub fn locate(&self, id: ElementId) -> Option<ElementLocation> {
        fn top<E: ModelElement>(
            table: &Table<E>,
            kind: TableKind,
            id: ElementId,
        ) -> Option<ElementLocation> {
            table.iter().enumerate().find_map(|(index, element)| {
                if element.id() == id {
                    Some(ElementLocation {
                        table: kind,
                        index,
                        parent: None,
                    })
                } else if element.contains_child(id) {
                    Some(ElementLocation {
                        table: kind,
                        index,
                        parent: Some(element.id()),
                    })
                } else {
                    None
                }
            })
        }
        top(&self.settings, TableKind::Settings, id)
            .or_else(|| top(&self.variables, TableKind::Variables, id))
            .or_else(|| top(&self.test_cases, TableKind::TestCases, id))
            .or_else(|| top(&self.keywords, TableKind::Keywords, id))
    }

    /// Remove an element or sub-element; returns whether anything was removed
    pub fn remove_element(&mut self, id: ElementId) -> bool {
        let Some(location) = self.locate(id) else {
            return false;
        };
        match (location.table, location.parent) {
            (TableKind::Settings, None) => self.settings.remove(id).is_some(),
            (TableKind::Variables, None) => self.variables.remove(id).is_some(),
            (TableKind::TestCases, None) => self.test_cases.remove(id).is_some(),
            (TableKind::Keywords, None) => self.keywords.remove(id).is_some(),
            (TableKind::TestCases, Some(parent)) => self
                .test_cases
                .get_mut(parent)
                .is_some_and(|test| test.body_mut().remove_child(id)),
            (TableKind::Keywords, Some(parent)) => self
                .keywords
                .get_mut(parent)
                .is_some_and(|keyword| keyword.body_mut().remove_child(id)),
            _ => false,
        }
    }
}
