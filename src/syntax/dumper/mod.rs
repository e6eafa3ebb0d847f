//! Round-trip writer for [`RobotFile`]
//!
//! The dumper replays the physical lines recorded while parsing, so an
//! unmodified document is written back byte for byte. Edits are layered on
//! top of that layout:
//!
//! - Lines are grouped per table region (a header and everything up to the
//!   next header). Inside a region, each top-level element owns a chunk of
//!   lines plus the trivia (blank and comment lines) that follows it. Chunks
//!   are written in model order, so moving an element moves its lines.
//! - A token that no longer belongs to a live element is dropped together
//!   with one adjacent separator; a line left without element tokens is
//!   dropped entirely.
//! - Tokens without a position (created by edits) are placed after their
//!   nearest positioned predecessor in presave order. Wholly new rows,
//!   settings and elements are written on new lines.
//! - Edited and new cells go through the [`CellEscaper`]; everything else is
//!   written from its raw source text.

mod options;
mod sorter;

#[cfg(test)]
mod tests;

use std::ops::Range;
use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::file::{ElementId, LineElement, RobotFile, RobotLine, TableKind, TokenId};
use super::table::Table;
use crate::base::constants::BOM;
use crate::parser::{EndOfLine, RobotTokenType, SeparatorType};

pub use options::{CellEscaper, DumpOptions, NoEscape, TsvQuoting};
pub use sorter::{PresaveRank, PresaveSorter, SaveUnit, sort_for_save};

/// Write `file` back to text with default options
pub fn dump(file: &RobotFile) -> String {
    dump_with(file, &DumpOptions::default())
}

/// Write `file` back to text
pub fn dump_with(file: &RobotFile, options: &DumpOptions) -> String {
    dump_async(file, options, &CancellationToken::new()).unwrap_or_default()
}

/// Write `file` back to text with cancellation support.
/// Returns `None` if the cancellation token is signalled.
pub fn dump_async(
    file: &RobotFile,
    options: &DumpOptions,
    cancel: &CancellationToken,
) -> Option<String> {
    Dumper::new(file, options).run(cancel)
}

/// A contiguous run of lines attached to one top-level element
#[derive(Debug, Clone)]
struct Chunk {
    owner: ElementId,
    lines: Range<usize>,
    /// End of the owned lines; the rest is trailing trivia
    owned_end: usize,
}

/// Model order of a table and where its new elements go
#[derive(Debug, Default)]
struct TableLayout {
    index: FxHashMap<ElementId, usize>,
    /// New elements keyed by the element they follow (`None`: right after the header)
    anchored: FxHashMap<Option<ElementId>, Vec<ElementId>>,
    has_elements: bool,
}

struct Dumper<'f> {
    file: &'f RobotFile,
    options: &'f DumpOptions,
    escaper: Arc<dyn CellEscaper>,
    eol: EndOfLine,
    live: FxHashSet<TokenId>,
    before: FxHashMap<TokenId, Vec<TokenId>>,
    after: FxHashMap<TokenId, Vec<TokenId>>,
    /// Wholly new units of each top-level element, in model order
    new_lines: FxHashMap<ElementId, Vec<SaveUnit>>,
    /// Last line index owned by each element
    last_line: FxHashMap<ElementId, usize>,
    layouts: FxHashMap<TableKind, TableLayout>,
    out: String,
    open_line: bool,
}

impl<'f> Dumper<'f> {
    fn new(file: &'f RobotFile, options: &'f DumpOptions) -> Self {
        let detected = file
            .lines()
            .iter()
            .map(|line| line.eol)
            .find(|eol| *eol != EndOfLine::None)
            .unwrap_or_default();
        let mut last_line = FxHashMap::default();
        for (index, line) in file.lines().iter().enumerate() {
            if let Some(owner) = line.owner {
                last_line.insert(owner, index);
            }
        }
        let mut dumper = Self {
            file,
            options,
            escaper: options.escaper_for(file.format()),
            eol: options.line_ending.unwrap_or(detected),
            live: FxHashSet::default(),
            before: FxHashMap::default(),
            after: FxHashMap::default(),
            new_lines: FxHashMap::default(),
            last_line,
            layouts: FxHashMap::default(),
            out: String::new(),
            open_line: false,
        };
        let placed: FxHashSet<TokenId> = file.lines().iter().flat_map(RobotLine::tokens).collect();
        dumper.plan_table(TableKind::Settings, file.settings(), &placed);
        dumper.plan_table(TableKind::Variables, file.variables(), &placed);
        dumper.plan_table(TableKind::TestCases, file.test_cases(), &placed);
        dumper.plan_table(TableKind::Keywords, file.keywords(), &placed);
        dumper
    }

    fn is_new(&self, token: TokenId) -> bool {
        self.file.token(token).position().is_not_set()
    }

    /// Record live tokens, insertion points and new lines of one table
    fn plan_table<E: PresaveSorter>(
        &mut self,
        kind: TableKind,
        table: &Table<E>,
        placed: &FxHashSet<TokenId>,
    ) {
        let mut layout = TableLayout {
            has_elements: !table.is_empty(),
            ..TableLayout::default()
        };
        let mut anchor = None;
        for (index, element) in table.iter().enumerate() {
            let id = element.id();
            layout.index.insert(id, index);
            let units = element.save_units(self.file);
            for unit in &units {
                self.live.extend(unit.tokens.iter().copied());
            }
            if self.last_line.contains_key(&id) {
                for unit in units {
                    self.plan_unit(id, unit, placed);
                }
                anchor = Some(id);
            } else {
                layout.anchored.entry(anchor).or_default().push(id);
                let units = units
                    .into_iter()
                    .filter(|unit| {
                        !unit.tokens.is_empty() && unit.tokens.iter().all(|t| self.is_new(*t))
                    })
                    .collect();
                self.new_lines.insert(id, units);
            }
        }
        self.layouts.insert(kind, layout);
    }

    fn plan_unit(&mut self, owner: ElementId, unit: SaveUnit, placed: &FxHashSet<TokenId>) {
        let new: Vec<usize> = (0..unit.tokens.len())
            .filter(|i| self.is_new(unit.tokens[*i]))
            .collect();
        if new.is_empty() {
            return;
        }
        let first_placed = unit.tokens.iter().position(|t| placed.contains(t));
        let Some(first_placed) = first_placed else {
            if new.len() == unit.tokens.len() {
                self.new_lines.entry(owner).or_default().push(unit);
            }
            return;
        };
        for index in new {
            let token = unit.tokens[index];
            let predecessor = unit.tokens[..index]
                .iter()
                .rev()
                .find(|t| placed.contains(t));
            match predecessor {
                Some(predecessor) => self.after.entry(*predecessor).or_default().push(token),
                None => self
                    .before
                    .entry(unit.tokens[first_placed])
                    .or_default()
                    .push(token),
            }
        }
    }

    fn run(mut self, cancel: &CancellationToken) -> Option<String> {
        if self.file.has_bom() {
            self.out.push(BOM);
        }
        let file = self.file;
        let lines = file.lines().len();
        let headers = file.headers();
        let prelude_end = headers.first().map_or(lines, |header| header.line);
        for index in 0..prelude_end {
            self.write_verbatim(index);
        }

        let mut seen = FxHashSet::default();
        for (i, header) in headers.iter().enumerate() {
            if cancel.is_cancelled() {
                return None;
            }
            let end = headers.get(i + 1).map_or(lines, |next| next.line);
            let region = header.line..end;
            match header.kind {
                TableKind::UserOwn => region.for_each(|index| self.write_verbatim(index)),
                kind => {
                    let first = seen.insert(kind);
                    self.write_region(kind, region, first);
                }
            }
        }

        for kind in [
            TableKind::Settings,
            TableKind::Variables,
            TableKind::TestCases,
            TableKind::Keywords,
        ] {
            let has_elements = self.layouts.get(&kind).is_some_and(|l| l.has_elements);
            if has_elements && !seen.contains(&kind) {
                debug!(?kind, "writing default header for headerless table");
                self.write_new_line(default_header(kind));
                self.write_anchored(kind, None, SeparatorType::TabulatorOrDoubleSpace);
            }
        }
        Some(self.out)
    }

    fn write_region(&mut self, kind: TableKind, region: Range<usize>, first: bool) {
        let file = self.file;
        let lines = file.lines();
        let header = region.start;
        let mode = lines[header].mode;

        let mut chunks: Vec<Chunk> = Vec::new();
        let mut header_end = header + 1;
        for index in header + 1..region.end {
            match (lines[index].owner, chunks.last_mut()) {
                (Some(owner), Some(chunk)) if chunk.owner == owner => {
                    chunk.lines.end = index + 1;
                    chunk.owned_end = index + 1;
                }
                (Some(owner), _) => chunks.push(Chunk {
                    owner,
                    lines: index..index + 1,
                    owned_end: index + 1,
                }),
                (None, Some(chunk)) => chunk.lines.end = index + 1,
                (None, None) => header_end = index + 1,
            }
        }

        self.write_verbatim(header);
        if first {
            self.write_anchored(kind, None, mode);
        }
        for index in header + 1..header_end {
            self.write_verbatim(index);
        }

        let order: Vec<Option<usize>> = chunks
            .iter()
            .map(|chunk| self.model_index(kind, chunk.owner))
            .collect();
        let mut assigned: Vec<(usize, Chunk)> = chunks
            .iter()
            .zip(&order)
            .filter_map(|(chunk, index)| index.map(|index| (index, chunk.clone())))
            .collect();
        assigned.sort_by_key(|(index, _)| *index);
        let mut assigned = assigned.into_iter().map(|(_, chunk)| chunk);

        for (slot, index) in chunks.iter().zip(&order) {
            if index.is_some() {
                if let Some(chunk) = assigned.next() {
                    self.write_chunk(kind, &chunk, mode);
                }
            } else {
                debug!(owner = slot.owner.raw(), "skipping lines of removed element");
                for index in slot.owned_end..slot.lines.end {
                    self.write_verbatim(index);
                }
            }
        }
    }

    fn model_index(&self, kind: TableKind, id: ElementId) -> Option<usize> {
        self.layouts
            .get(&kind)
            .and_then(|layout| layout.index.get(&id).copied())
    }

    fn write_chunk(&mut self, kind: TableKind, chunk: &Chunk, mode: SeparatorType) {
        let file = self.file;
        for index in chunk.lines.start..chunk.owned_end {
            if file.lines()[index].owner.is_some() {
                self.write_owned(index);
            } else {
                self.write_verbatim(index);
            }
        }
        let is_last = self.last_line.get(&chunk.owner) == Some(&(chunk.owned_end - 1));
        if is_last {
            let units = self.new_lines.get(&chunk.owner).cloned().unwrap_or_default();
            for unit in &units {
                self.write_unit(unit, mode);
            }
            self.write_anchored(kind, Some(chunk.owner), mode);
        }
        for index in chunk.owned_end..chunk.lines.end {
            self.write_verbatim(index);
        }
    }

    /// Write the new elements that follow `anchor` in model order
    fn write_anchored(&mut self, kind: TableKind, anchor: Option<ElementId>, mode: SeparatorType) {
        let elements = self
            .layouts
            .get(&kind)
            .and_then(|layout| layout.anchored.get(&anchor))
            .cloned()
            .unwrap_or_default();
        for id in elements {
            let units = self.new_lines.get(&id).cloned().unwrap_or_default();
            for unit in &units {
                self.write_unit(unit, mode);
            }
        }
    }

    // ========================================================================
    // LINE WRITERS
    // ========================================================================

    fn cell_text(&self, token: TokenId) -> String {
        let token = self.file.token(token);
        if token.is_dirty() || token.position().is_not_set() {
            self.escaper.escape(token.dump_text()).into_owned()
        } else {
            token.raw().to_string()
        }
    }

    fn begin_line(&mut self) {
        if self.open_line {
            self.out.push_str(self.eol.as_str());
            self.open_line = false;
        }
    }

    fn end_line(&mut self, eol: EndOfLine) {
        let eol = match (self.options.line_ending, eol) {
            (_, EndOfLine::None) => EndOfLine::None,
            (Some(forced), _) => forced,
            (None, own) => own,
        };
        self.out.push_str(eol.as_str());
        self.open_line = eol == EndOfLine::None;
    }

    fn write_verbatim(&mut self, index: usize) {
        let file = self.file;
        let line = &file.lines()[index];
        self.begin_line();
        for element in &line.elements {
            match element {
                LineElement::Separator(separator) => self.out.push_str(&separator.raw),
                LineElement::Token(token) => {
                    let text = self.cell_text(*token);
                    self.out.push_str(&text);
                }
            }
        }
        self.end_line(line.eol);
    }

    /// Whether a token on an owned line is content of some element
    fn is_content(&self, token: TokenId) -> bool {
        let kind = self.file.token(token).primary_type();
        !(kind.is_structural() || kind == RobotTokenType::UNKNOWN)
    }

    fn write_owned(&mut self, index: usize) {
        let file = self.file;
        let options = self.options;
        let line = &file.lines()[index];
        let elements = &line.elements;
        let mut keep = vec![true; elements.len()];
        let mut has_content = false;
        let mut has_live = false;
        for (i, element) in elements.iter().enumerate() {
            let LineElement::Token(token) = element else {
                continue;
            };
            if !self.is_content(*token) {
                continue;
            }
            has_content = true;
            if self.live.contains(token) {
                has_live = true;
                continue;
            }
            keep[i] = false;
            let previous = i
                .checked_sub(1)
                .filter(|p| *p > 0 && keep[*p])
                .filter(|p| matches!(elements[*p], LineElement::Separator(_)));
            let next = Some(i + 1)
                .filter(|n| *n < elements.len() && keep[*n])
                .filter(|n| matches!(elements[*n], LineElement::Separator(_)));
            if let Some(drop) = previous.or(next) {
                keep[drop] = false;
            }
        }
        if has_content && !has_live {
            return;
        }

        let separator = options.separator_for(file.format(), line.mode);
        self.begin_line();
        for (i, element) in elements.iter().enumerate() {
            if !keep[i] {
                continue;
            }
            match element {
                LineElement::Separator(sep) => self.out.push_str(&sep.raw),
                LineElement::Token(token) => {
                    for inserted in self.before.get(token).cloned().unwrap_or_default() {
                        let text = self.cell_text(inserted);
                        self.out.push_str(&text);
                        self.out.push_str(separator);
                    }
                    let text = self.cell_text(*token);
                    self.out.push_str(&text);
                    for inserted in self.after.get(token).cloned().unwrap_or_default() {
                        let text = self.cell_text(inserted);
                        self.out.push_str(separator);
                        self.out.push_str(&text);
                    }
                }
            }
        }
        self.end_line(line.eol);
    }

    fn write_unit(&mut self, unit: &SaveUnit, mode: SeparatorType) {
        let mut cells: Vec<String> = Vec::with_capacity(unit.tokens.len() + 1);
        if unit.indented && mode == SeparatorType::Pipe {
            cells.push(String::new());
        }
        cells.extend(unit.tokens.iter().map(|t| self.cell_text(*t)));
        let options = self.options;
        let separator = options.separator_for(self.file.format(), mode);
        let text = match mode {
            SeparatorType::Pipe => format!("| {}", cells.join(separator)),
            SeparatorType::TabulatorOrDoubleSpace if unit.indented => {
                format!("{separator}{}", cells.join(separator))
            }
            SeparatorType::TabulatorOrDoubleSpace => cells.join(separator),
        };
        self.write_new_line(&text);
    }

    fn write_new_line(&mut self, text: &str) {
        self.begin_line();
        self.out.push_str(text);
        self.out.push_str(self.eol.as_str());
    }
}

fn default_header(kind: TableKind) -> &'static str {
    match kind {
        TableKind::Settings => "*** Settings ***",
        TableKind::Variables => "*** Variables ***",
        TableKind::TestCases => "*** Test Cases ***",
        TableKind::Keywords => "*** Keywords ***",
        TableKind::UserOwn => "*** Comments ***",
    }
}
