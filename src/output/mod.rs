//! Output formatting, rendering and writing functionality

mod formatters;
mod progress;
pub mod renderer;
pub mod viewer;
mod writers;

pub use self::formatters::{format_summary_text, JsonReport, RunSummary};
pub use self::progress::ProgressReporter;
pub use self::renderer::{GraphvizRenderer, ImageFormat, Renderer};
pub use self::viewer::open_in_viewer;
pub use self::writers::{create_writer, FileWriter, OutputWriter, StdoutWriter};

use crate::error::Result;
use crate::models::config::{OutputFormat, Settings};
use crate::models::import_graph::{DotOptions, ImportGraph};
use std::path::PathBuf;

/// Trait for different output formatters
pub trait Formatter {
    /// Format an import graph into a string
    fn format(&self, graph: &ImportGraph) -> Result<String>;
}

/// DOT formatter, also the input handed to the renderer for images
pub struct DotFormatter {
    pub options: DotOptions,
}

impl DotFormatter {
    /// Create a new DOT formatter
    pub fn new(options: DotOptions) -> Self {
        Self { options }
    }
}

impl Formatter for DotFormatter {
    fn format(&self, graph: &ImportGraph) -> Result<String> {
        Ok(graph.to_dot(&self.options))
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    pub root: PathBuf,
    pub base_module: String,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new(root: impl Into<PathBuf>, base_module: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            base_module: base_module.into(),
        }
    }
}

impl Formatter for JsonFormatter {
    fn format(&self, graph: &ImportGraph) -> Result<String> {
        formatters::format_graph_json(graph, &self.root, &self.base_module)
    }
}

/// CSV formatter for spreadsheet analysis
#[derive(Default)]
pub struct CsvFormatter;

impl CsvFormatter {
    /// Create a new CSV formatter
    pub fn new() -> Self {
        Self
    }
}

impl Formatter for CsvFormatter {
    fn format(&self, graph: &ImportGraph) -> Result<String> {
        formatters::format_graph_csv(graph)
    }
}

/// DOT options taken from the settings
pub fn dot_options(settings: &Settings) -> DotOptions {
    DotOptions {
        show_isolated: settings.show_isolated,
        layout_direction: settings.layout_direction,
    }
}

/// Create a formatter based on the output format
///
/// Image formats get the DOT formatter, whose output feeds the renderer.
pub fn create_formatter(settings: &Settings) -> Box<dyn Formatter> {
    match settings.output_format {
        OutputFormat::Png | OutputFormat::Dot => Box::new(DotFormatter::new(dot_options(settings))),
        OutputFormat::Json => Box::new(JsonFormatter::new(
            settings.scan_path.clone(),
            settings.base_module.clone(),
        )),
        OutputFormat::Csv => Box::new(CsvFormatter::new()),
    }
}
