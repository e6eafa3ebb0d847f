//! Table-driven parser for Robot Framework test data
//!
//! This module turns source text into a [`RobotFile`](crate::syntax::RobotFile):
//! - **logos** splits each line into separators and cells
//! - **recognizers** classify cell text, gated by framework version
//! - **mappers** attach classified cells to model elements
//!
//! ## Architecture
//!
//! ```text
//! Source Text
//!     ↓
//! Line splitter → physical lines + EOL kind
//!     ↓
//! Lexer (logos) → separators and cells with columns
//!     ↓
//! Recognizers → headers, comments, `...`, setting names
//!     ↓
//! State stack + Mappers → tokens attached to the document model
//!     ↓
//! RobotFile (tokens, lines, tables)
//! ```
//!
//! Every byte of the input ends up in a token or a separator, so the
//! dumper can reproduce an unmodified file exactly.

#[allow(clippy::module_inception)]
mod parser;

mod lexer;
mod mapping;
mod options;
pub mod recognizer;
mod state;
mod token;
mod token_type;

pub use lexer::{LinePiece, RawLine, SplitLine, split_line, split_lines};
pub use mapping::{MAPPERS, Mapper};
pub use options::{FileFormat, ParseOptions, ScalarValuePolicy};
pub use parser::{RobotParser, parse};
pub use state::{CellPosition, ParserContext, ParsingState};
pub use token::{EndOfLine, RobotToken, Separator, SeparatorType};
pub use token_type::RobotTokenType;

#[cfg(test)]
mod tests;
