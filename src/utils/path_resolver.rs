//! Package key resolution and source-file classification

use std::path::{Component, Path};

/// Extension of the source files the scanner parses
pub const SOURCE_EXTENSION: &str = "go";

/// Package key for a file: its directory relative to `root`, `/`-separated
///
/// Files directly inside the root map to the root path as given, so the
/// default root `.` yields `"."`. A file outside the root keeps its full
/// directory path.
pub fn package_key(root: &Path, file: &Path) -> String {
    let dir = file.parent().unwrap_or_else(|| Path::new(""));

    match dir.strip_prefix(root) {
        Ok(relative) => {
            let parts: Vec<_> = relative
                .components()
                .filter_map(|component| match component {
                    Component::Normal(part) => Some(part.to_string_lossy()),
                    _ => None,
                })
                .collect();

            if parts.is_empty() {
                root_key(root)
            } else {
                parts.join("/")
            }
        }
        Err(_) => dir.to_string_lossy().into_owned(),
    }
}

fn root_key(root: &Path) -> String {
    let text = root.to_string_lossy();
    let trimmed = text.trim_end_matches(['/', std::path::MAIN_SEPARATOR]);
    if trimmed.is_empty() {
        text.into_owned()
    } else {
        trimmed.to_string()
    }
}

/// Whether the path names a Go source file
pub fn is_source_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == SOURCE_EXTENSION)
}

/// Whether the path names a Go test file (`*_test.go`)
pub fn is_test_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with("_test.go"))
}
