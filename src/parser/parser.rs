//! Line-by-line parser driving the lexer, recognizers and mappers

use std::path::Path;

use tracing::debug;

use super::lexer::{LinePiece, split_line, split_lines};
use super::mapping::{attach_comment, map_cell};
use super::options::ParseOptions;
use super::recognizer::{self, RecognizerScope};
use super::state::ParserContext;
use super::token::{RobotToken, Separator};
use super::token_type::RobotTokenType as T;
use crate::base::FilePosition;
use crate::base::constants::BOM;
use crate::syntax::table::{ModelElement, TableHeader};
use crate::syntax::variables::{VariableType, classify_scalar};
use crate::syntax::{RobotFile, RobotLine, TableKind, TokenId};

/// Parser for Robot Framework suite and resource files.
///
/// Parsing never fails: unrecognized cells become `UNKNOWN` tokens and the
/// rest of the file is parsed normally.
#[derive(Debug, Clone, Default)]
pub struct RobotParser {
    options: ParseOptions,
}

impl RobotParser {
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parse `source`; `path` is recorded on the file and used for format detection
    pub fn parse_str(&self, source: &str, path: Option<&Path>) -> RobotFile {
        let mut file = RobotFile::new(self.options.format_for(path));
        if let Some(path) = path {
            file.set_path(path);
        }
        file.set_version(self.options.version);

        let (source, bom_width) = match source.strip_prefix(BOM) {
            Some(rest) => {
                file.set_bom(true);
                (rest, BOM.len_utf8())
            }
            None => (source, 0),
        };

        let format = file.format();
        let mut ctx = ParserContext::new(file, &self.options);
        for (index, raw) in split_lines(source).into_iter().enumerate() {
            let number = index as i32 + 1;
            let offset = raw.offset + bom_width;
            let split = split_line(raw.text, format);
            ctx.begin_line(RobotLine::new(number, offset as i32, raw.eol, split.mode));
            for piece in split.pieces {
                match piece {
                    LinePiece::Separator { kind, text, start } => {
                        let position = position_of(number, start, offset);
                        ctx.push_separator(Separator::new(kind, text, position));
                    }
                    LinePiece::PrettyAlign { text } => {
                        let position = position_of(number, 0, offset);
                        ctx.push_token(RobotToken::at(text, position, T::PRETTY_ALIGN_SPACE));
                    }
                    LinePiece::Cell {
                        text,
                        start,
                        column,
                    } => {
                        let position = position_of(number, start, offset);
                        process_cell(&mut ctx, text, position, column);
                    }
                }
            }
            ctx.end_line();
        }

        let mut file = ctx.into_file();
        finish(&mut file, &self.options);
        debug!(
            path = ?file.path(),
            lines = file.lines().len(),
            settings = file.settings().len(),
            variables = file.variables().len(),
            test_cases = file.test_cases().len(),
            keywords = file.keywords().len(),
            "parsed robot file"
        );
        file
    }
}

/// Parse `source` with `options`
pub fn parse(source: &str, options: &ParseOptions) -> RobotFile {
    RobotParser::new(options.clone()).parse_str(source, None)
}

fn position_of(line: i32, column: usize, line_offset: usize) -> FilePosition {
    FilePosition::new(line, column as i32, (line_offset + column) as i32)
}

fn process_cell(ctx: &mut ParserContext<'_>, text: &str, position: FilePosition, column: usize) {
    let cell = ctx.next_cell(column);
    let token = ctx.push_token(RobotToken::at(text, position, T::UNKNOWN));

    if ctx.in_comment() {
        ctx.file.token_mut(token).set_type(T::COMMENT_CONTINUE);
        attach_comment(ctx, token);
        return;
    }

    if cell.first_on_line && column == 0 && text.trim_start().starts_with('*') {
        if let Some(r) = recognizer::recognize(RecognizerScope::TableHeader, text, ctx.version()) {
            enter_table(ctx, token, r.produces);
            return;
        }
    }

    if is_line_level(text, T::START_HASH_COMMENT) {
        ctx.file.token_mut(token).set_type(T::START_HASH_COMMENT);
        ctx.start_comment();
        attach_comment(ctx, token);
        return;
    }

    if let Some(kind) = ctx.header_on_line() {
        ctx.file.token_mut(token).set_type(T::TABLE_HEADER_COLUMN);
        add_header_column(ctx, kind, token);
        return;
    }

    if cell.first_on_line && is_line_level(text, T::PREVIOUS_LINE_CONTINUE) {
        ctx.file.token_mut(token).set_type(T::PREVIOUS_LINE_CONTINUE);
        if !ctx.continue_previous_line() {
            debug!(line = position.line, "continuation without a previous construct");
        }
        return;
    }

    map_cell(ctx, token, &cell);
}

fn is_line_level(text: &str, kind: T) -> bool {
    recognizer::recognize(RecognizerScope::Line, text, None).is_some_and(|r| r.produces == kind)
}

fn enter_table(ctx: &mut ParserContext<'_>, token: TokenId, produces: T) {
    let kind = match produces {
        T::SETTINGS_TABLE_HEADER => TableKind::Settings,
        T::VARIABLES_TABLE_HEADER => TableKind::Variables,
        T::TEST_CASES_TABLE_HEADER => TableKind::TestCases,
        T::KEYWORDS_TABLE_HEADER => TableKind::Keywords,
        _ => TableKind::UserOwn,
    };
    debug!(?kind, line = ctx.file.token(token).line_number(), "table header");
    ctx.file.token_mut(token).set_type(produces);
    let line = ctx.file.lines().len().saturating_sub(1);
    ctx.file.add_header(TableHeader {
        kind,
        declaration: token,
        columns: Vec::new(),
        comment: Vec::new(),
        line,
    });
    ctx.enter_table(kind);
}

fn add_header_column(ctx: &mut ParserContext<'_>, kind: TableKind, token: TokenId) {
    let header = match kind {
        TableKind::Settings => ctx.file.settings_mut().last_header_mut(),
        TableKind::Variables => ctx.file.variables_mut().last_header_mut(),
        TableKind::TestCases => ctx.file.test_cases_mut().last_header_mut(),
        TableKind::Keywords => ctx.file.keywords_mut().last_header_mut(),
        TableKind::UserOwn => ctx.file.user_tables_mut().last_mut(),
    };
    if let Some(header) = header {
        header.columns.push(token);
    }
}

/// Post-parse fixups: scalar classification and dirty flag reset
fn finish(file: &mut RobotFile, options: &ParseOptions) {
    let reclassified: Vec<_> = file
        .variables()
        .iter()
        .filter(|v| v.kind() == VariableType::Scalar)
        .map(|v| {
            let kind = classify_scalar(v.values().len(), options.scalar_policy);
            (v.id(), v.declaration(), kind)
        })
        .filter(|(_, _, kind)| *kind != VariableType::Scalar)
        .collect();
    for (id, declaration, kind) in reclassified {
        file.token_mut(declaration).set_type(kind.declaration_type());
        if let Some(variable) = file.variables_mut().get_mut(id) {
            variable.set_kind(kind);
        }
    }
    file.clear_dirty_flags();
}
