//! Directory walking and import collection
//!
//! The scanner visits every Go file under a root, extracts its imports, keeps
//! the ones belonging to the base module and groups them by directory. Any
//! traversal, read or parse failure aborts the whole scan.

use crate::error::{ModgraphError, Result};
use crate::models::config::{MatchMode, Settings};
use crate::models::import_graph::ImportGraph;
use crate::parsers::{ImportFilter, ImportParser};
use crate::utils::{is_source_file, is_test_file, package_key};
use glob::Pattern;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};

/// Options for a single scan
#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub root: PathBuf,
    pub base_module: String,
    pub match_mode: MatchMode,
    pub exclude_patterns: Vec<String>,
    pub max_depth: Option<usize>,
    pub follow_links: bool,
    pub include_tests: bool,
    pub strict_syntax: bool,
}

impl ScanOptions {
    /// Options with the default traversal behaviour
    pub fn new(root: impl Into<PathBuf>, base_module: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            base_module: base_module.into(),
            match_mode: MatchMode::Substring,
            exclude_patterns: Vec::new(),
            max_depth: None,
            follow_links: false,
            include_tests: true,
            strict_syntax: false,
        }
    }

    /// Scan options taken from resolved settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            root: settings.scan_path.clone(),
            base_module: settings.base_module.clone(),
            match_mode: settings.match_mode,
            exclude_patterns: settings.exclude_patterns.clone(),
            max_depth: settings.max_depth,
            follow_links: settings.follow_links,
            include_tests: settings.include_tests,
            strict_syntax: settings.strict_syntax,
        }
    }
}

/// Walks a source tree and builds its import graph
pub struct TreeScanner {
    options: ScanOptions,
    filter: ImportFilter,
    exclude_patterns: Vec<Pattern>,
}

impl TreeScanner {
    /// Create a scanner, compiling the exclusion patterns up front
    pub fn new(options: ScanOptions) -> Result<Self> {
        let exclude_patterns = options
            .exclude_patterns
            .iter()
            .map(|pattern| Pattern::new(pattern))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let filter = ImportFilter::new(options.base_module.clone(), options.match_mode);

        Ok(Self {
            options,
            filter,
            exclude_patterns,
        })
    }

    /// Get the scan options
    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    /// Scan the tree
    pub fn scan(&self) -> Result<ImportGraph> {
        self.scan_with_progress(|_| {})
    }

    /// Scan the tree, calling `on_file` before each source file is parsed
    pub fn scan_with_progress<F>(&self, mut on_file: F) -> Result<ImportGraph>
    where
        F: FnMut(&Path),
    {
        let start_time = Instant::now();
        let root = &self.options.root;

        let metadata = std::fs::metadata(root).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ModgraphError::InvalidPath { path: root.clone() },
            _ => ModgraphError::read_error(root, e),
        })?;
        if !metadata.is_dir() {
            return Err(ModgraphError::directory_traversal_error(root, "not a directory"));
        }

        let mut parser = ImportParser::with_strict(self.options.strict_syntax)?;
        let mut graph = ImportGraph::new();
        let mut files = 0usize;

        let mut walker = WalkDir::new(root)
            .follow_links(self.options.follow_links)
            .sort_by_file_name();
        if let Some(max_depth) = self.options.max_depth {
            walker = walker.max_depth(max_depth);
        }

        let entries = walker
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !self.is_excluded(entry));

        for entry in entries {
            let entry = entry?;
            let path = entry.path();

            if entry.file_type().is_dir() || !is_source_file(path) {
                continue;
            }
            if !self.options.include_tests && is_test_file(path) {
                continue;
            }

            on_file(path);

            let file_imports = parser.parse_file(path)?;
            let package = package_key(root, path);
            graph.add_package(&package);

            let mut kept = 0usize;
            for spec in &file_imports.imports {
                if let Some(target) = self.filter.target(&spec.path_literal) {
                    graph.add_import(&package, target);
                    kept += 1;
                }
            }

            debug!(
                file = %path.display(),
                package = %package,
                imports = file_imports.imports.len(),
                internal = kept,
                "parsed imports"
            );
            files += 1;
        }

        info!(
            root = %root.display(),
            files,
            packages = graph.package_count(),
            edges = graph.edge_count(),
            elapsed = ?start_time.elapsed(),
            "scan complete"
        );

        Ok(graph)
    }

    /// Check whether an entry matches any exclude pattern
    ///
    /// Patterns are tried against the `/`-separated path relative to the root
    /// and against the bare file name.
    fn is_excluded(&self, entry: &DirEntry) -> bool {
        if self.exclude_patterns.is_empty() {
            return false;
        }

        let relative = entry
            .path()
            .strip_prefix(&self.options.root)
            .unwrap_or(entry.path())
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        let name = entry.file_name().to_string_lossy();

        self.exclude_patterns
            .iter()
            .any(|pattern| pattern.matches(&relative) || pattern.matches(&name))
    }
}

/// Scan `root` with default options, keeping imports that mention `base_module`
pub fn scan_tree(root: impl Into<PathBuf>, base_module: impl Into<String>) -> Result<ImportGraph> {
    TreeScanner::new(ScanOptions::new(root, base_module))?.scan()
}
