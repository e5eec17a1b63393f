//! Parsing of Go source files
//!
//! This module extracts import declarations from Go files and decides which of
//! them belong to the base module.

pub mod import_parser;
pub mod import_filter;

pub use import_parser::{FileImports, ImportParser, ImportSpec};
pub use import_filter::{unquote, ImportFilter};
