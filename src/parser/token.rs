//! Lexical primitives: tokens, separators and line endings
//!
//! A [`RobotToken`] keeps both the exact source bytes (`raw`) and the value
//! used for grammar decisions (`text`). The dumper writes `raw` back unless
//! the token was edited after parsing.

use smol_str::SmolStr;

use super::token_type::RobotTokenType;
use crate::base::FilePosition;

/// A classified cell of a Robot Framework line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RobotToken {
    raw: SmolStr,
    text: SmolStr,
    types: Vec<RobotTokenType>,
    position: FilePosition,
    dirty: bool,
    initialized: bool,
}

impl Default for RobotToken {
    fn default() -> Self {
        Self::new()
    }
}

impl RobotToken {
    /// An empty, unpositioned token tagged `UNKNOWN`
    pub fn new() -> Self {
        Self {
            raw: SmolStr::default(),
            text: SmolStr::default(),
            types: vec![RobotTokenType::UNKNOWN],
            position: FilePosition::unset(),
            dirty: false,
            initialized: false,
        }
    }

    /// A token whose raw and text are both `text`, not dirty
    pub fn create(text: impl Into<SmolStr>) -> Self {
        let text = text.into();
        let mut token = Self::new();
        token.raw = text.clone();
        token.set_text(text);
        token
    }

    /// A positioned token produced by the parser
    pub fn at(text: impl Into<SmolStr>, position: FilePosition, kind: RobotTokenType) -> Self {
        let mut token = Self::create(text);
        token.position = position;
        token.types = vec![kind];
        token
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text; marks the token dirty when an initialized value changes
    pub fn set_text(&mut self, text: impl Into<SmolStr>) {
        let text = text.into();
        if self.initialized {
            if self.text != text {
                self.dirty = true;
                self.text = text;
            }
        } else {
            self.text = text;
            self.initialized = true;
        }
    }

    /// Recreate the token content, replacing raw and text together
    pub fn recreate(&mut self, text: impl Into<SmolStr>) {
        let text = text.into();
        if self.initialized && self.text != text {
            self.dirty = true;
        }
        self.raw = text.clone();
        self.text = text;
        self.initialized = true;
    }

    /// The value the dumper writes for this token
    pub fn dump_text(&self) -> &str {
        if self.dirty { &self.text } else { &self.raw }
    }

    pub fn types(&self) -> &[RobotTokenType] {
        &self.types
    }

    pub fn primary_type(&self) -> RobotTokenType {
        self.types
            .first()
            .copied()
            .unwrap_or(RobotTokenType::UNKNOWN)
    }

    pub fn has_type(&self, kind: RobotTokenType) -> bool {
        self.types.contains(&kind)
    }

    /// Reclassify the token, dropping every previous tag
    pub fn set_type(&mut self, kind: RobotTokenType) {
        self.types.clear();
        self.types.push(kind);
    }

    /// Add a refinement tag; an `UNKNOWN` primary tag is replaced
    pub fn add_type(&mut self, kind: RobotTokenType) {
        if self.types == [RobotTokenType::UNKNOWN] {
            self.types[0] = kind;
        } else if !self.types.contains(&kind) {
            self.types.push(kind);
        }
    }

    pub fn position(&self) -> FilePosition {
        self.position
    }

    pub fn set_position(&mut self, position: FilePosition) {
        self.position = position;
    }

    pub fn line_number(&self) -> i32 {
        self.position.line
    }

    pub fn start_column(&self) -> i32 {
        self.position.column
    }

    pub fn end_column(&self) -> i32 {
        self.position.column + self.text.len() as i32
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn clear_dirty_flag(&mut self) {
        self.dirty = false;
    }

    pub fn is_variable_declaration(&self) -> bool {
        self.types.iter().any(|t| t.is_variable_declaration())
    }
}

/// Kind of column separator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeparatorType {
    /// A tab or a run of two or more spaces
    TabulatorOrDoubleSpace,
    /// A `|` surrounded by whitespace
    Pipe,
}

impl SeparatorType {
    /// Representations the lexer accepts for this separator kind
    pub fn representations(self) -> &'static [&'static str] {
        match self {
            Self::TabulatorOrDoubleSpace => &["\t", "  "],
            Self::Pipe => &["| ", " | ", "\t|", "|\t", "\t|\t"],
        }
    }
}

/// A column separator, kept verbatim for the dumper
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Separator {
    pub kind: SeparatorType,
    pub raw: SmolStr,
    pub position: FilePosition,
}

impl Separator {
    pub fn new(kind: SeparatorType, raw: impl Into<SmolStr>, position: FilePosition) -> Self {
        Self {
            kind,
            raw: raw.into(),
            position,
        }
    }
}

/// Line terminator recorded per line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EndOfLine {
    #[default]
    Lf,
    CrLf,
    Cr,
    /// Last line of a file without a trailing newline
    None,
}

impl EndOfLine {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
            Self::Cr => "\r",
            Self::None => "",
        }
    }
}
