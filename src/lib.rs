//! modgraph - package import graphs for Go source trees
//!
//! This library walks a Go source tree, extracts the import declarations of
//! every file, keeps the imports that belong to a base module and builds a
//! package-level graph that can be rendered with Graphviz or written as DOT,
//! JSON or CSV.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod output;
pub mod parsers;
pub mod utils;

// Re-export commonly used types
pub use crate::core::{run, scan_tree, RunOutcome, ScanOptions, TreeScanner};
pub use error::{handle_error, try_with_recovery, ErrorSeverity, ModgraphError, Result, ResultExt};
pub use models::{
    config::{MatchMode, OutputFormat, Settings},
    import_graph::{GraphStatistics, ImportGraph},
};
pub use output::{GraphvizRenderer, ImageFormat, Renderer};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
