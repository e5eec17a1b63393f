//! Output formatting functionality
//!
//! This module provides formatters for different output formats.

use crate::error::{ModgraphError, Result};
use crate::models::import_graph::{GraphStatistics, ImportGraph};
use ansi_term::Colour::{Blue, Cyan, Green, Yellow};
use ansi_term::Style;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// JSON document describing one scan
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub root: &'a Path,
    pub base_module: &'a str,
    pub generated_at: DateTime<Utc>,
    pub packages: &'a ImportGraph,
    pub statistics: GraphStatistics,
}

/// Format the graph as pretty-printed JSON
pub fn format_graph_json(graph: &ImportGraph, root: &Path, base_module: &str) -> Result<String> {
    let report = JsonReport {
        root,
        base_module,
        generated_at: Utc::now(),
        packages: graph,
        statistics: graph.statistics(),
    };

    let mut json = serde_json::to_string_pretty(&report)?;
    json.push('\n');
    Ok(json)
}

/// Format the graph as a `package,import` edge list
///
/// Packages without internal imports get one row with an empty import column.
pub fn format_graph_csv(graph: &ImportGraph) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);

    writer.write_record(["package", "import"])?;
    for (package, imports) in graph.packages() {
        if imports.is_empty() {
            writer.write_record([package.as_str(), ""])?;
        }
        for import in imports {
            writer.write_record([package.as_str(), import.as_str()])?;
        }
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ModgraphError::io_error(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| ModgraphError::CsvSerialize { source: e })
}

/// What a finished run produced, for the summary printed on stderr
#[derive(Debug, Clone)]
pub struct RunSummary<'a> {
    pub root: &'a Path,
    pub target: Option<&'a PathBuf>,
    pub statistics: &'a GraphStatistics,
    pub elapsed: Duration,
}

/// Format a human-readable run summary
pub fn format_summary_text(summary: &RunSummary<'_>, use_colors: bool, verbose: bool) -> String {
    let paint = |style: Style, text: String| {
        if use_colors {
            style.paint(text).to_string()
        } else {
            text
        }
    };

    let stats = summary.statistics;
    let mut output = String::new();

    output.push_str(&format!(
        "{}\n",
        paint(Blue.bold(), "Import Graph Summary".to_string())
    ));
    output.push_str(&format!("  Root: {}\n", summary.root.display()));
    output.push_str(&format!(
        "  Packages: {}\n",
        paint(Green.normal(), stats.total_packages.to_string())
    ));
    output.push_str(&format!(
        "  Edges: {} ({} distinct)\n",
        paint(Green.normal(), stats.total_edges.to_string()),
        stats.distinct_edges
    ));

    if let Some(target) = summary.target {
        output.push_str(&format!(
            "  Output: {}\n",
            paint(Cyan.normal(), target.display().to_string())
        ));
    }

    if stats.total_edges == 0 {
        output.push_str(&format!(
            "  {}\n",
            paint(
                Yellow.normal(),
                "No internal imports found; check the base module".to_string()
            )
        ));
    }

    if verbose {
        output.push_str(&format!("  Nodes: {}\n", stats.total_nodes));
        output.push_str(&format!("  Isolated packages: {}\n", stats.isolated_packages));
        if let Some((name, count)) = &stats.max_fan_in {
            output.push_str(&format!("  Most imported: {} ({})\n", name, count));
        }
        if let Some((name, count)) = &stats.max_fan_out {
            output.push_str(&format!("  Most imports: {} ({})\n", name, count));
        }
        output.push_str(&format!("  Duration: {}\n", format_duration(summary.elapsed)));
    }

    output
}

/// Format a duration in a human-readable way
fn format_duration(duration: Duration) -> String {
    let millis = duration.as_millis();
    if millis < 1000 {
        format!("{}ms", millis)
    } else {
        format!("{:.2}s", duration.as_secs_f64())
    }
}
