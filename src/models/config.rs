//! Configuration-related data structures

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default graph layout program
pub const DEFAULT_LAYOUT_ENGINE: &str = "dot";

/// Main configuration settings for modgraph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Directory root to scan
    pub scan_path: PathBuf,

    /// Base module that marks an import as internal
    pub base_module: String,

    /// How import literals are matched against the base module
    pub match_mode: MatchMode,

    /// Patterns to exclude from scanning
    pub exclude_patterns: Vec<String>,

    /// Maximum directory depth to traverse
    pub max_depth: Option<usize>,

    /// Whether to follow symbolic links during directory traversal
    pub follow_links: bool,

    /// Whether `_test.go` files contribute imports
    pub include_tests: bool,

    /// Whether any syntax error in a file is fatal, not just in its imports
    pub strict_syntax: bool,

    /// Output format
    pub output_format: OutputFormat,

    /// Output file path (temp file for images, stdout for text formats)
    pub output_file: Option<PathBuf>,

    /// Whether to open the rendered image once written
    pub open_viewer: bool,

    /// Whether packages without internal imports appear as graph nodes
    pub show_isolated: bool,

    /// Optional `rankdir` for the layout
    pub layout_direction: Option<LayoutDirection>,

    /// Graphviz program used for layout
    pub layout_engine: String,

    /// Whether to suppress non-essential output
    pub quiet: bool,

    /// Whether to show detailed progress and debug information
    pub verbose: bool,

    /// Whether to use colors in the summary
    pub use_colors: bool,

    /// Whether to show a spinner while scanning
    pub show_progress: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            scan_path: PathBuf::from("."),
            base_module: String::new(),
            match_mode: MatchMode::Substring,
            exclude_patterns: Vec::new(),
            max_depth: None,
            follow_links: false,
            include_tests: true,
            strict_syntax: false,
            output_format: OutputFormat::Png,
            output_file: None,
            open_viewer: true,
            show_isolated: false,
            layout_direction: None,
            layout_engine: DEFAULT_LAYOUT_ENGINE.to_string(),
            quiet: false,
            verbose: false,
            use_colors: true,
            show_progress: true,
        }
    }
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Rendered PNG image
    Png,
    /// The DOT description itself
    Dot,
    /// Package mapping as JSON
    Json,
    /// Edge list as CSV
    Csv,
}

impl OutputFormat {
    /// Whether this format is produced by the external renderer
    pub fn is_image(&self) -> bool {
        matches!(self, OutputFormat::Png)
    }

    /// File extension used for temporary targets
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Dot => "dot",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "png" => Ok(OutputFormat::Png),
            "dot" | "gv" => Ok(OutputFormat::Dot),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Invalid output format: {}", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Criterion deciding whether an import literal belongs to the base module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchMode {
    /// The literal contains the base module anywhere.
    ///
    /// This also admits unrelated modules that happen to share the substring,
    /// e.g. base `foo` matches `github.com/notfoo/bar`.
    Substring,
    /// The literal is the base module or a path below it.
    SegmentPrefix,
}

impl std::str::FromStr for MatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "substring" => Ok(MatchMode::Substring),
            "segment-prefix" | "prefix" => Ok(MatchMode::SegmentPrefix),
            _ => Err(format!("Invalid match mode: {}", s)),
        }
    }
}

impl std::fmt::Display for MatchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchMode::Substring => write!(f, "substring"),
            MatchMode::SegmentPrefix => write!(f, "segment-prefix"),
        }
    }
}

/// Graphviz `rankdir` values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LayoutDirection {
    Tb,
    Lr,
    Bt,
    Rl,
}

impl std::str::FromStr for LayoutDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "TB" => Ok(LayoutDirection::Tb),
            "LR" => Ok(LayoutDirection::Lr),
            "BT" => Ok(LayoutDirection::Bt),
            "RL" => Ok(LayoutDirection::Rl),
            _ => Err(format!("Invalid layout direction: {}", s)),
        }
    }
}

impl std::fmt::Display for LayoutDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let dir = match self {
            LayoutDirection::Tb => "TB",
            LayoutDirection::Lr => "LR",
            LayoutDirection::Bt => "BT",
            LayoutDirection::Rl => "RL",
        };
        f.write_str(dir)
    }
}

/// Partial settings for configuration merging
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialSettings {
    pub scan_path: Option<PathBuf>,
    pub base_module: Option<String>,
    pub match_mode: Option<MatchMode>,
    pub exclude_patterns: Option<Vec<String>>,
    pub max_depth: Option<usize>,
    pub follow_links: Option<bool>,
    pub include_tests: Option<bool>,
    pub strict_syntax: Option<bool>,
    pub output_format: Option<OutputFormat>,
    pub output_file: Option<PathBuf>,
    pub open_viewer: Option<bool>,
    pub show_isolated: Option<bool>,
    pub layout_direction: Option<LayoutDirection>,
    pub layout_engine: Option<String>,
    pub quiet: Option<bool>,
    pub verbose: Option<bool>,
    pub use_colors: Option<bool>,
    pub show_progress: Option<bool>,
}

impl PartialSettings {
    /// Merge another PartialSettings into this one
    /// Fields from `other` take precedence over existing fields
    pub fn merge_from(&mut self, other: PartialSettings) {
        macro_rules! take {
            ($($field:ident),* $(,)?) => {
                $(
                    if other.$field.is_some() {
                        self.$field = other.$field;
                    }
                )*
            };
        }

        take!(
            scan_path,
            base_module,
            match_mode,
            exclude_patterns,
            max_depth,
            follow_links,
            include_tests,
            strict_syntax,
            output_format,
            output_file,
            open_viewer,
            show_isolated,
            layout_direction,
            layout_engine,
            quiet,
            verbose,
            use_colors,
            show_progress,
        );
    }

    /// Convert partial settings to full settings
    /// Uses defaults for any fields that are None
    pub fn to_settings(&self) -> Settings {
        let defaults = Settings::default();
        let partial = self.clone();

        Settings {
            scan_path: partial.scan_path.unwrap_or(defaults.scan_path),
            base_module: partial.base_module.unwrap_or(defaults.base_module),
            match_mode: partial.match_mode.unwrap_or(defaults.match_mode),
            exclude_patterns: partial.exclude_patterns.unwrap_or(defaults.exclude_patterns),
            max_depth: partial.max_depth.or(defaults.max_depth),
            follow_links: partial.follow_links.unwrap_or(defaults.follow_links),
            include_tests: partial.include_tests.unwrap_or(defaults.include_tests),
            strict_syntax: partial.strict_syntax.unwrap_or(defaults.strict_syntax),
            output_format: partial.output_format.unwrap_or(defaults.output_format),
            output_file: partial.output_file.or(defaults.output_file),
            open_viewer: partial.open_viewer.unwrap_or(defaults.open_viewer),
            show_isolated: partial.show_isolated.unwrap_or(defaults.show_isolated),
            layout_direction: partial.layout_direction.or(defaults.layout_direction),
            layout_engine: partial.layout_engine.unwrap_or(defaults.layout_engine),
            quiet: partial.quiet.unwrap_or(defaults.quiet),
            verbose: partial.verbose.unwrap_or(defaults.verbose),
            use_colors: partial.use_colors.unwrap_or(defaults.use_colors),
            show_progress: partial.show_progress.unwrap_or(defaults.show_progress),
        }
    }
}
