//! Opening rendered images with the platform's default viewer

use crate::error::{ModgraphError, Result};
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::debug;

/// Launch the default viewer for `path` without waiting for it to exit
pub fn open_in_viewer(path: &Path) -> Result<()> {
    let Some(mut command) = opener_command(path) else {
        debug!(path = %path.display(), "no known viewer for this platform");
        return Ok(());
    };

    command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
        .map_err(|e| ModgraphError::ViewerLaunch {
            path: path.to_path_buf(),
            source: e,
        })
}

fn opener_command(path: &Path) -> Option<Command> {
    if cfg!(target_os = "macos") {
        let mut command = Command::new("open");
        command.arg(path);
        Some(command)
    } else if cfg!(windows) {
        let mut command = Command::new("rundll32");
        command.arg("url.dll,FileProtocolHandler").arg(path);
        Some(command)
    } else if cfg!(unix) {
        let mut command = Command::new("xdg-open");
        command.arg(path);
        Some(command)
    } else {
        None
    }
}
