#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::parser::lexer::{LinePiece, is_pipe_line, split_line, split_lines};
use crate::parser::{EndOfLine, FileFormat, SeparatorType};
use rstest::rstest;

fn cells(line: &str, format: FileFormat) -> Vec<(String, usize, usize)> {
    split_line(line, format)
        .cells()
        .map(|(text, start, column)| (text.to_string(), start, column))
        .collect()
}

// ============================================================================
// LINE SPLITTING
// ============================================================================

#[test]
fn test_split_lines_keeps_each_terminator() {
    let lines = split_lines("a\nb\r\nc\rd");
    let shape: Vec<_> = lines.iter().map(|l| (l.text, l.offset, l.eol)).collect();
    assert_eq!(
        shape,
        vec![
            ("a", 0, EndOfLine::Lf),
            ("b", 2, EndOfLine::CrLf),
            ("c", 5, EndOfLine::Cr),
            ("d", 7, EndOfLine::None),
        ]
    );
}

#[rstest]
#[case("", 0)]
#[case("a\n", 1)]
#[case("\n\n", 2)]
#[case("a", 1)]
fn test_split_lines_trailing_terminator_adds_no_line(#[case] source: &str, #[case] count: usize) {
    assert_eq!(split_lines(source).len(), count);
}

// ============================================================================
// SPACE MODE
// ============================================================================

#[test]
fn test_space_mode_cells_and_columns() {
    assert_eq!(
        cells("Library    Collections  # c", FileFormat::Txt),
        vec![
            ("Library".to_string(), 0, 0),
            ("Collections".to_string(), 11, 1),
            ("# c".to_string(), 24, 2),
        ]
    );
}

#[test]
fn test_single_space_stays_inside_cell() {
    let cells = cells("Log  hello world", FileFormat::Txt);
    assert_eq!(cells[1].0, "hello world");
}

#[test]
fn test_tab_is_a_separator() {
    let cells = cells("Log\thello", FileFormat::Txt);
    assert_eq!(cells.len(), 2);
    assert_eq!(cells[1], ("hello".to_string(), 4, 1));
}

#[test]
fn test_indented_line_starts_at_column_one() {
    let split = split_line("    Log  hi", FileFormat::Txt);
    assert_eq!(split.mode, SeparatorType::TabulatorOrDoubleSpace);
    assert!(matches!(
        split.pieces[0],
        LinePiece::Separator { text: "    ", start: 0, .. }
    ));
    let cells: Vec<_> = split.cells().collect();
    assert_eq!(cells[0], ("Log", 4, 1));
}

#[test]
fn test_whitespace_only_line_is_pretty_align() {
    let split = split_line("   ", FileFormat::Txt);
    assert_eq!(split.pieces, vec![LinePiece::PrettyAlign { text: "   " }]);
}

#[test]
fn test_empty_line_has_no_pieces() {
    assert!(split_line("", FileFormat::Txt).is_empty());
}

// ============================================================================
// PIPE MODE
// ============================================================================

#[rstest]
#[case("| Log", true)]
#[case("|\tLog", true)]
#[case("|", true)]
#[case("|Log", false)]
#[case("Log | x", false)]
#[case("Log  a | b", false)]
fn test_pipe_line_detection(#[case] line: &str, #[case] expected: bool) {
    assert_eq!(is_pipe_line(line), expected);
}

#[test]
fn test_pipe_mode_cells() {
    let split = split_line("| Log | hello |", FileFormat::Txt);
    assert_eq!(split.mode, SeparatorType::Pipe);
    let cells: Vec<_> = split.cells().collect();
    assert_eq!(cells, vec![("Log", 2, 0), ("hello", 8, 1)]);
}

#[test]
fn test_pipe_without_surrounding_space_is_cell_content() {
    let cells = cells("| Log | a|b |", FileFormat::Txt);
    assert_eq!(cells[1].0, "a|b");
}

#[test]
fn test_inner_pipe_keeps_space_mode() {
    let split = split_line("Log  a | b", FileFormat::Txt);
    assert_eq!(split.mode, SeparatorType::TabulatorOrDoubleSpace);
    let texts: Vec<_> = cells("Log  a | b", FileFormat::Txt)
        .into_iter()
        .map(|(text, _, _)| text)
        .collect();
    assert_eq!(texts, vec!["Log", "a | b"]);
}

#[test]
fn test_pipe_empty_first_column_indents() {
    let cells = cells("|  | Log | hi |", FileFormat::Txt);
    assert_eq!(cells[0], ("Log".to_string(), 5, 1));
    assert_eq!(cells[1].2, 2);
}

// ============================================================================
// TSV
// ============================================================================

#[test]
fn test_tsv_every_tab_is_a_column() {
    assert_eq!(
        cells("a\t\tb", FileFormat::Tsv),
        vec![("a".to_string(), 0, 0), ("b".to_string(), 3, 2)]
    );
}

#[test]
fn test_tsv_keeps_double_spaces_inside_cells() {
    let cells = cells("Log\ta  b", FileFormat::Tsv);
    assert_eq!(cells[1].0, "a  b");
}
