//! Image rendering through an external graph layout program
//!
//! The DOT description is piped to the program's stdin. The program writes to a
//! staging file next to the target, which is then moved over the target so a
//! failed render never leaves a truncated image behind.

use crate::error::{ModgraphError, Result};
use std::io::{ErrorKind, Write};
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::debug;

/// Image formats a renderer can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
}

impl ImageFormat {
    /// Value passed to Graphviz's `-T` flag
    pub fn graphviz_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
        }
    }
}

/// Turns a DOT description into an image file
pub trait Renderer {
    /// Render `description` into `target`, replacing any existing file
    fn render(&self, description: &str, format: ImageFormat, target: &Path) -> Result<()>;

    /// Name used in log lines
    fn name(&self) -> &str;
}

/// Renderer that runs a Graphviz program (`dot` by default)
#[derive(Debug, Clone)]
pub struct GraphvizRenderer {
    program: String,
}

impl GraphvizRenderer {
    /// Create a renderer for the given layout program
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for GraphvizRenderer {
    fn default() -> Self {
        Self::new(crate::models::config::DEFAULT_LAYOUT_ENGINE)
    }
}

impl Renderer for GraphvizRenderer {
    fn render(&self, description: &str, format: ImageFormat, target: &Path) -> Result<()> {
        let staging = staging_file(target)?;

        debug!(
            program = %self.program,
            staging = %staging.path().display(),
            "spawning layout program"
        );

        let mut child = Command::new(&self.program)
            .arg(format!("-T{}", format.graphviz_type()))
            .arg("-o")
            .arg(staging.path())
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => ModgraphError::RendererNotFound {
                    program: self.program.clone(),
                },
                _ => ModgraphError::io_error(e),
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            // A program that exits early closes the pipe; its exit status tells why.
            if let Err(e) = stdin.write_all(description.as_bytes()) {
                if e.kind() != ErrorKind::BrokenPipe {
                    return Err(ModgraphError::io_error(e));
                }
            }
        }

        let output = child.wait_with_output()?;
        if !output.status.success() {
            return Err(ModgraphError::RenderFailed {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        staging
            .persist(target)
            .map_err(|e| ModgraphError::OutputWrite {
                path: target.to_path_buf(),
                source: e.error,
            })?;

        Ok(())
    }

    fn name(&self) -> &str {
        &self.program
    }
}

/// Create a temporary file in the same directory as `target`
pub(crate) fn staging_file(target: &Path) -> Result<tempfile::NamedTempFile> {
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if !dir.is_dir() {
        return Err(ModgraphError::OutputDirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut builder = tempfile::Builder::new();
    builder.prefix(".modgraph-");
    #[cfg(unix)]
    builder.permissions(output_permissions(target));

    builder
        .tempfile_in(dir)
        .map_err(|e| ModgraphError::OutputWrite {
            path: target.to_path_buf(),
            source: e,
        })
}

/// Mode for a new output file: the existing target's, or the usual `0644`
#[cfg(unix)]
fn output_permissions(target: &Path) -> std::fs::Permissions {
    use std::os::unix::fs::PermissionsExt;

    std::fs::metadata(target)
        .map(|metadata| metadata.permissions())
        .unwrap_or_else(|_| std::fs::Permissions::from_mode(0o644))
}
