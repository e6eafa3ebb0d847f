//! Dump options and cell escaping

use std::borrow::Cow;
use std::fmt::Debug;
use std::sync::Arc;

use crate::parser::{EndOfLine, FileFormat, SeparatorType};

/// Escapes the text of a cell the dumper writes from an edited or new token
pub trait CellEscaper: Debug + Send + Sync {
    fn escape<'a>(&self, cell: &'a str) -> Cow<'a, str>;
}

/// Writes cells unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEscape;

impl CellEscaper for NoEscape {
    fn escape<'a>(&self, cell: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(cell)
    }
}

/// Spreadsheet quoting for TSV cells: a cell holding a tab, a quote or a
/// line break is wrapped in quotes with inner quotes doubled
#[derive(Debug, Clone, Copy, Default)]
pub struct TsvQuoting;

impl CellEscaper for TsvQuoting {
    fn escape<'a>(&self, cell: &'a str) -> Cow<'a, str> {
        if cell.contains(['\t', '"', '\n', '\r']) {
            Cow::Owned(format!("\"{}\"", cell.replace('"', "\"\"")))
        } else {
            Cow::Borrowed(cell)
        }
    }
}

/// Options for writing a document back to text
#[derive(Debug, Clone, Default)]
pub struct DumpOptions {
    /// Separator placed around new cells; `None` follows the line's mode
    pub separator: Option<String>,
    /// Forces every line terminator; `None` keeps each line's own
    pub line_ending: Option<EndOfLine>,
    /// Escaper for edited and new cells; `None` picks one from the file format
    pub cell_escaper: Option<Arc<dyn CellEscaper>>,
}

impl DumpOptions {
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = Some(separator.into());
        self
    }

    pub fn with_line_ending(mut self, eol: EndOfLine) -> Self {
        self.line_ending = Some(eol);
        self
    }

    pub fn with_cell_escaper(mut self, escaper: Arc<dyn CellEscaper>) -> Self {
        self.cell_escaper = Some(escaper);
        self
    }

    /// Separator between new cells of a line in `mode`
    pub fn separator_for(&self, format: FileFormat, mode: SeparatorType) -> &str {
        if let Some(separator) = &self.separator {
            return separator;
        }
        match (format, mode) {
            (_, SeparatorType::Pipe) => " | ",
            (FileFormat::Tsv, _) => "\t",
            (FileFormat::Txt, _) => "  ",
        }
    }

    pub(crate) fn escaper_for(&self, format: FileFormat) -> Arc<dyn CellEscaper> {
        match (&self.cell_escaper, format) {
            (Some(escaper), _) => Arc::clone(escaper),
            (None, FileFormat::Tsv) => Arc::new(TsvQuoting),
            (None, FileFormat::Txt) => Arc::new(NoEscape),
        }
    }
}
