//! End-to-end run: scan, describe, render or write, then open

use crate::core::scanner::{ScanOptions, TreeScanner};
use crate::error::{try_with_recovery, ModgraphError, Result};
use crate::models::config::Settings;
use crate::models::import_graph::{GraphStatistics, ImportGraph};
use crate::output::{
    create_formatter, create_writer, open_in_viewer, ImageFormat, ProgressReporter, Renderer,
};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Result of a successful run
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// File written, or `None` when output went to stdout
    pub target: Option<PathBuf>,
    pub graph: ImportGraph,
    pub statistics: GraphStatistics,
    pub elapsed: Duration,
}

/// Run the whole pipeline with the given renderer
pub fn run(settings: &Settings, renderer: &dyn Renderer) -> Result<RunOutcome> {
    run_with_progress(settings, renderer, &mut ProgressReporter::hidden())
}

/// Run the whole pipeline, reporting scanned files to `progress`
pub fn run_with_progress(
    settings: &Settings,
    renderer: &dyn Renderer,
    progress: &mut ProgressReporter,
) -> Result<RunOutcome> {
    let start_time = Instant::now();

    // The target is fixed before scanning so it can be logged up front.
    let target = resolve_target(settings)?;
    match &target {
        Some(path) => info!("rendering to {}", path.display()),
        None => info!("writing {} to stdout", settings.output_format),
    }

    let scanner = TreeScanner::new(ScanOptions::from_settings(settings))?;
    let scanned = scanner.scan_with_progress(|path| progress.file(path));
    progress.finish();
    let graph = scanned?;

    let description = create_formatter(settings).format(&graph)?;

    if settings.output_format.is_image() {
        let path = target
            .as_deref()
            .ok_or_else(|| ModgraphError::config_error("image output needs a target file"))?;
        debug!(renderer = renderer.name(), bytes = description.len(), "rendering image");
        renderer.render(&description, ImageFormat::Png, path)?;

        if settings.open_viewer {
            try_with_recovery(|| open_in_viewer(path))?;
        }
    } else {
        create_writer(target.as_deref()).write(&description)?;
    }

    let statistics = graph.statistics();
    Ok(RunOutcome {
        target,
        graph,
        statistics,
        elapsed: start_time.elapsed(),
    })
}

/// Decide where output goes
///
/// An explicit target is used as given. Image formats without one get a fresh
/// `graph*.png` in the system temp directory that outlives the run; text
/// formats without one go to stdout.
pub fn resolve_target(settings: &Settings) -> Result<Option<PathBuf>> {
    if let Some(path) = &settings.output_file {
        return Ok(Some(path.clone()));
    }
    if !settings.output_format.is_image() {
        return Ok(None);
    }

    let file = tempfile::Builder::new()
        .prefix("graph")
        .suffix(&format!(".{}", settings.output_format.extension()))
        .tempfile()
        .map_err(|e| ModgraphError::TempFile { source: e })?;
    let (_, path) = file.keep().map_err(|e| ModgraphError::TempFile { source: e.error })?;

    Ok(Some(path))
}
