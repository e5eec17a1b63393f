//! Core functionality for directory walking and the end-to-end run

pub mod pipeline;
pub mod scanner;

pub use pipeline::{resolve_target, run, run_with_progress, RunOutcome};
pub use scanner::{scan_tree, ScanOptions, TreeScanner};
