//! Progress reporting functionality
//!
//! A spinner on stderr while the tree is scanned. Hidden in quiet mode, when
//! progress is disabled, and in verbose mode where per-file log lines share
//! stderr with it.

use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

/// Progress reporter for the scan phase
pub struct ProgressReporter {
    spinner: Option<ProgressBar>,
    files: u64,
}

impl ProgressReporter {
    /// Create a new progress reporter; `verbose` suppresses the spinner
    pub fn new(enabled: bool, verbose: bool) -> Self {
        let spinner = (enabled && !verbose).then(|| {
            let spinner = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed}] {msg}") {
                spinner.set_style(style);
            }
            spinner.enable_steady_tick(Duration::from_millis(100));
            spinner
        });

        Self { spinner, files: 0 }
    }

    /// A reporter that shows nothing
    pub fn hidden() -> Self {
        Self::new(false, false)
    }

    /// Record that a file is about to be parsed
    pub fn file(&mut self, path: &Path) {
        self.files += 1;
        if let Some(spinner) = &self.spinner {
            spinner.set_message(format!("Scanned {} files: {}", self.files, path.display()));
        }
    }

    /// Number of files reported so far
    pub fn files(&self) -> u64 {
        self.files
    }

    /// Stop the spinner and clear it from the terminal
    pub fn finish(&self) {
        if let Some(spinner) = &self.spinner {
            spinner.finish_and_clear();
        }
    }

    /// Whether a spinner is being drawn
    pub fn is_visible(&self) -> bool {
        self.spinner.is_some()
    }
}
