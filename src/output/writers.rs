//! Output writing functionality
//!
//! This module provides writers for different output destinations.

use crate::error::{ModgraphError, Result};
use crate::output::renderer::staging_file;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Trait for output writers
pub trait OutputWriter {
    /// Write content to the output destination
    fn write(&self, content: &str) -> Result<()>;
}

/// Writer for stdout output
#[derive(Debug)]
pub struct StdoutWriter;

impl OutputWriter for StdoutWriter {
    fn write(&self, content: &str) -> Result<()> {
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(content.as_bytes())
            .and_then(|_| stdout.flush())
            .map_err(|e| ModgraphError::StdoutWrite { source: e })
    }
}

/// Writer for file output
///
/// Content goes to a temporary file in the target directory first and is moved
/// into place once fully written.
#[derive(Debug)]
pub struct FileWriter {
    path: PathBuf,
}

impl FileWriter {
    /// Create a new file writer
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl OutputWriter for FileWriter {
    fn write(&self, content: &str) -> Result<()> {
        let write_err = |source| ModgraphError::OutputWrite {
            path: self.path.clone(),
            source,
        };

        let mut staging = staging_file(&self.path)?;
        staging.write_all(content.as_bytes()).map_err(write_err)?;
        staging.flush().map_err(write_err)?;
        staging
            .persist(&self.path)
            .map_err(|e| write_err(e.error))?;
        Ok(())
    }
}

/// Create an output writer based on the output file option
pub fn create_writer(output_file: Option<impl AsRef<Path>>) -> Box<dyn OutputWriter> {
    match output_file {
        Some(path) => Box::new(FileWriter::new(path)),
        None => Box::new(StdoutWriter),
    }
}
