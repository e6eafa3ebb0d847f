//! # robot-syntax
//!
//! Round-trip safe parser, document model and dumper for Robot Framework
//! suite and resource files, with cycle-safe resource import resolution.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! project   → File system, loaders, import resolver, shared documents
//!   ↓
//! semantic  → Version-dependent rules and diagnostics
//!   ↓
//! syntax    → Document model (tables, elements), dumper
//!   ↓
//! parser    → Logos line lexer, recognizers, state machine, mappers
//!   ↓
//! base      → Primitives (FilePosition, RobotVersion, VersionRange)
//! ```
//!
//! ## Example
//!
//! ```
//! use robot_syntax::{ParseOptions, dump, parse};
//!
//! let source = "*** Variables ***\n${name}  value\n";
//! let file = parse(source, &ParseOptions::default());
//! assert_eq!(file.variables().len(), 1);
//! assert_eq!(dump(&file), source);
//! ```

// ============================================================================
// MODULES (dependency order: base → parser → syntax → semantic → project)
// ============================================================================

/// Foundation types: positions, versions, constants
pub mod base;

/// Parser: line lexer, recognizer registry, parsing state machine
pub mod parser;

/// Syntax: document model and round-trip dumper
pub mod syntax;

/// Semantic checks gated by framework version
pub mod semantic;

/// Project: file loading and resource import resolution
pub mod project;

// Re-export foundation types
pub use base::{FilePosition, RobotVersion, VersionRange};

// Re-export the main entry points
pub use parser::{FileFormat, ParseOptions, RobotParser, RobotToken, RobotTokenType, parse};
pub use project::{DocumentHandle, ImportGraph, ImportResolver, LoadError};
pub use syntax::{DumpOptions, RobotFile, dump, dump_with};
