//! Logos-based line lexer for Robot Framework files
//!
//! Splits source text into physical lines (keeping each line terminator) and
//! each line into cells and separators. The separator grammar is chosen per
//! line: a line starting with `|` followed by whitespace is pipe-delimited,
//! every other line of a text file is space-delimited, and TSV files split on
//! every single tab.

use logos::Logos;

use super::options::FileFormat;
use super::token::{EndOfLine, SeparatorType};

/// One physical line of the source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawLine<'a> {
    /// Line content without the terminator
    pub text: &'a str,
    /// Byte offset of the first character
    pub offset: usize,
    pub eol: EndOfLine,
}

/// Split source into lines, recognizing `\n`, `\r\n` and lone `\r`.
///
/// A trailing terminator does not produce an extra empty line.
pub fn split_lines(source: &str) -> Vec<RawLine<'_>> {
    let bytes = source.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        let eol = match bytes[i] {
            b'\n' => Some((EndOfLine::Lf, 1)),
            b'\r' if bytes.get(i + 1) == Some(&b'\n') => Some((EndOfLine::CrLf, 2)),
            b'\r' => Some((EndOfLine::Cr, 1)),
            _ => None,
        };
        match eol {
            Some((eol, width)) => {
                lines.push(RawLine {
                    text: &source[start..i],
                    offset: start,
                    eol,
                });
                i += width;
                start = i;
            }
            None => i += 1,
        }
    }
    if start < source.len() {
        lines.push(RawLine {
            text: &source[start..],
            offset: start,
            eol: EndOfLine::None,
        });
    }
    lines
}

/// A piece of a split line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinePiece<'a> {
    Separator {
        kind: SeparatorType,
        text: &'a str,
        start: usize,
    },
    /// A cell; `column` is the grammar column the cell occupies
    Cell {
        text: &'a str,
        start: usize,
        column: usize,
    },
    /// A line holding nothing but whitespace
    PrettyAlign { text: &'a str },
}

/// A line split into cells and separators
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitLine<'a> {
    pub mode: SeparatorType,
    pub pieces: Vec<LinePiece<'a>>,
}

impl<'a> SplitLine<'a> {
    /// Cells only, in order
    pub fn cells(&self) -> impl Iterator<Item = (&'a str, usize, usize)> + '_ {
        self.pieces.iter().filter_map(|piece| match *piece {
            LinePiece::Cell {
                text,
                start,
                column,
            } => Some((text, start, column)),
            _ => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }
}

/// Whether a text-format line uses pipe separators
pub fn is_pipe_line(line: &str) -> bool {
    let mut chars = line.chars();
    chars.next() == Some('|') && matches!(chars.next(), None | Some(' ') | Some('\t'))
}

/// Split a single line (without terminator) into pieces
pub fn split_line(line: &str, format: FileFormat) -> SplitLine<'_> {
    if line.is_empty() {
        return SplitLine {
            mode: SeparatorType::TabulatorOrDoubleSpace,
            pieces: Vec::new(),
        };
    }
    if line.trim_matches([' ', '\t']).is_empty() {
        return SplitLine {
            mode: SeparatorType::TabulatorOrDoubleSpace,
            pieces: vec![LinePiece::PrettyAlign { text: line }],
        };
    }
    match format {
        FileFormat::Tsv => split_tsv(line),
        FileFormat::Txt if is_pipe_line(line) => split_pipe(line),
        FileFormat::Txt => split_space(line),
    }
}

#[derive(Logos, Debug, Clone, Copy, PartialEq)]
enum SpaceLexeme {
    #[regex(r"\t[ \t]*| [ \t]+")]
    Separator,

    #[token(" ")]
    Space,

    #[regex(r"[^ \t]+")]
    Word,
}

#[derive(Logos, Debug, Clone, Copy, PartialEq)]
enum PipeLexeme {
    #[regex(r"[ \t]*\|[ \t]*")]
    Pipe,

    #[regex(r"[ \t]+")]
    Blank,

    #[regex(r"[^ \t|]+")]
    Word,
}

#[derive(Logos, Debug, Clone, Copy, PartialEq)]
enum TsvLexeme {
    #[token("\t")]
    Tab,

    #[regex(r"[^\t]+")]
    Text,
}

/// Collects cells, merging adjacent non-separator lexemes
struct PieceBuilder<'a> {
    line: &'a str,
    mode: SeparatorType,
    pieces: Vec<LinePiece<'a>>,
    cell_start: Option<usize>,
    column: usize,
}

impl<'a> PieceBuilder<'a> {
    fn new(line: &'a str, mode: SeparatorType) -> Self {
        Self {
            line,
            mode,
            pieces: Vec::new(),
            cell_start: None,
            column: 0,
        }
    }

    fn extend_cell(&mut self, start: usize) {
        if self.cell_start.is_none() {
            self.cell_start = Some(start);
        }
    }

    fn close_cell(&mut self, end: usize) {
        if let Some(start) = self.cell_start.take() {
            self.pieces.push(LinePiece::Cell {
                text: &self.line[start..end],
                start,
                column: self.column,
            });
        }
    }

    fn separator(&mut self, start: usize, end: usize, counts_as_column: bool) {
        self.close_cell(start);
        self.pieces.push(LinePiece::Separator {
            kind: self.mode,
            text: &self.line[start..end],
            start,
        });
        if counts_as_column {
            self.column += 1;
        }
    }

    fn finish(mut self) -> SplitLine<'a> {
        self.close_cell(self.line.len());
        SplitLine {
            mode: self.mode,
            pieces: self.pieces,
        }
    }
}

fn split_space(line: &str) -> SplitLine<'_> {
    let mut builder = PieceBuilder::new(line, SeparatorType::TabulatorOrDoubleSpace);
    let mut lexer = SpaceLexeme::lexer(line);
    while let Some(lexeme) = lexer.next() {
        let span = lexer.span();
        match lexeme {
            Ok(SpaceLexeme::Separator) => builder.separator(span.start, span.end, true),
            Ok(SpaceLexeme::Space | SpaceLexeme::Word) | Err(()) => builder.extend_cell(span.start),
        }
    }
    builder.finish()
}

fn split_pipe(line: &str) -> SplitLine<'_> {
    let mut builder = PieceBuilder::new(line, SeparatorType::Pipe);
    let mut lexer = PipeLexeme::lexer(line);
    let mut previous_was_separator = true;
    while let Some(lexeme) = lexer.next() {
        let span = lexer.span();
        let text = lexer.slice();
        match lexeme {
            Ok(PipeLexeme::Pipe) => {
                let opens = span.start == 0
                    || previous_was_separator
                    || text.starts_with([' ', '\t']);
                let closes = span.end == line.len() || text.ends_with([' ', '\t']);
                if opens && closes {
                    builder.separator(span.start, span.end, span.start != 0);
                    previous_was_separator = true;
                } else {
                    builder.extend_cell(span.start);
                    previous_was_separator = false;
                }
            }
            Ok(PipeLexeme::Blank | PipeLexeme::Word) | Err(()) => {
                builder.extend_cell(span.start);
                previous_was_separator = false;
            }
        }
    }
    builder.finish()
}

fn split_tsv(line: &str) -> SplitLine<'_> {
    let mut builder = PieceBuilder::new(line, SeparatorType::TabulatorOrDoubleSpace);
    let mut lexer = TsvLexeme::lexer(line);
    while let Some(lexeme) = lexer.next() {
        let span = lexer.span();
        match lexeme {
            Ok(TsvLexeme::Tab) => builder.separator(span.start, span.end, true),
            Ok(TsvLexeme::Text) | Err(()) => builder.extend_cell(span.start),
        }
    }
    builder.finish()
}
