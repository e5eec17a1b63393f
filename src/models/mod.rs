//! Data models and structures for modgraph

pub mod config;
pub mod import_graph;

pub use config::{LayoutDirection, MatchMode, OutputFormat, PartialSettings, Settings};
pub use import_graph::{DotOptions, GraphStatistics, ImportEdge, ImportGraph};
