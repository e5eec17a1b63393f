//! Command-line argument parsing

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::models::config::{LayoutDirection, MatchMode, OutputFormat};

/// modgraph - package import graphs for Go source trees
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "modgraph")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Draw the internal package import graph of a Go source tree")]
#[command(long_about = "modgraph walks a Go source tree, collects the import declarations of every .go file, \
keeps the imports that belong to a given base module and draws the resulting package graph with Graphviz. \
The graph can also be written as DOT, JSON or CSV.")]
#[command(after_help = "EXAMPLES:

Basic Usage:
    # Graph the current directory for module example.com/app and open the image
    modgraph --module example.com/app

    # Scan another directory and write the image to a chosen file
    modgraph --root ./service --module example.com/service --target deps.png --no-open

Output Options:
    # Print the DOT description instead of rendering it
    modgraph -m example.com/app --format dot

    # Package mapping as JSON, written to a file
    modgraph -m example.com/app --format json --target deps.json

    # Edge list for spreadsheet analysis
    modgraph -m example.com/app --format csv > deps.csv

Filtering:
    # Only admit imports under the module path, not any that contain it
    modgraph -m example.com/app --match-mode segment-prefix

    # Skip vendored code and test files
    modgraph -m example.com/app --exclude vendor --exclude 'testdata' --skip-tests

Layout:
    # Left-to-right layout that also shows packages with no internal imports
    modgraph -m example.com/app --rankdir LR --show-isolated

    # Use another Graphviz layout program
    modgraph -m example.com/app --engine sfdp

Configuration:
    # Use a specific configuration file
    modgraph --config ./modgraph.toml

    # Create a default configuration file
    modgraph --init
")]
pub struct Args {
    /// Directory to scan
    #[arg(short, long, value_name = "PATH", help = "Root directory of the source tree (defaults to the current directory)")]
    pub root: Option<PathBuf>,

    /// Base module
    #[arg(short, long, value_name = "MODULE", help = "Base module; only imports belonging to it become graph edges (e.g., --module example.com/app)")]
    pub module: Option<String>,

    /// Output file
    #[arg(short, long, value_name = "FILE", help = "File to write (a temporary graph*.png for images, stdout for text formats when omitted)")]
    pub target: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, value_name = "FORMAT", help = "Output format: 'png' renders an image (default), 'dot', 'json' and 'csv' write text")]
    pub format: Option<FormatArg>,

    /// Do not open the rendered image
    #[arg(long, help = "Do not open the rendered image in the default viewer")]
    pub no_open: bool,

    /// Import matching criterion
    #[arg(long, value_enum, value_name = "MODE", help = "How imports are matched against the base module: 'substring' admits any import containing it, 'segment-prefix' only the module and paths below it")]
    pub match_mode: Option<MatchModeArg>,

    /// Exclude paths matching these glob patterns
    #[arg(short, long, value_name = "PATTERN", help = "Glob pattern for files or directories to skip, matched against the path relative to the root and the file name (can be specified multiple times)")]
    pub exclude: Vec<String>,

    /// Maximum depth for directory traversal
    #[arg(long, value_name = "DEPTH", help = "Maximum directory depth to traverse (1 scans only files directly in the root)")]
    pub max_depth: Option<usize>,

    /// Follow symbolic links during directory traversal
    #[arg(long, help = "Follow symbolic links during directory traversal")]
    pub follow_links: bool,

    /// Ignore test files
    #[arg(long, help = "Ignore _test.go files")]
    pub skip_tests: bool,

    /// Fail on any syntax error
    #[arg(long, help = "Treat any syntax error as fatal, not only errors in the package clause and imports")]
    pub strict: bool,

    /// Show packages without internal imports
    #[arg(long, help = "Draw packages that import nothing internal as standalone nodes")]
    pub show_isolated: bool,

    /// Layout direction
    #[arg(long, value_enum, value_name = "DIR", ignore_case = true, help = "Graph layout direction")]
    pub rankdir: Option<RankDirArg>,

    /// Layout program
    #[arg(long, value_name = "PROGRAM", help = "Graphviz layout program used to render images (defaults to 'dot')")]
    pub engine: Option<String>,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE", help = "Path to configuration file (defaults to .modgraph.toml in the current directory)")]
    pub config: Option<PathBuf>,

    /// Suppress non-essential output
    #[arg(short, long, conflicts_with = "verbose", help = "Only log warnings and errors and skip the summary")]
    pub quiet: bool,

    /// Show detailed progress and debug information
    #[arg(short, long, help = "Log every scanned file and print detailed graph statistics")]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, help = "Disable colored output")]
    pub no_colors: bool,

    /// Disable the progress spinner
    #[arg(long, help = "Disable the progress spinner (useful for CI environments)")]
    pub no_progress: bool,

    /// Initialize a default configuration file
    #[arg(long, help = "Create a default configuration file (.modgraph.toml) in the current directory")]
    pub init: bool,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Rendered PNG image
    Png,
    /// DOT description
    Dot,
    /// JSON package mapping
    Json,
    /// CSV edge list
    Csv,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Png => OutputFormat::Png,
            FormatArg::Dot => OutputFormat::Dot,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Csv => OutputFormat::Csv,
        }
    }
}

/// Import matching options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum MatchModeArg {
    /// Import path contains the base module
    Substring,
    /// Import path is the base module or below it
    SegmentPrefix,
}

impl From<MatchModeArg> for MatchMode {
    fn from(arg: MatchModeArg) -> Self {
        match arg {
            MatchModeArg::Substring => MatchMode::Substring,
            MatchModeArg::SegmentPrefix => MatchMode::SegmentPrefix,
        }
    }
}

/// Layout direction options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum RankDirArg {
    #[value(name = "TB")]
    Tb,
    #[value(name = "LR")]
    Lr,
    #[value(name = "BT")]
    Bt,
    #[value(name = "RL")]
    Rl,
}

impl From<RankDirArg> for LayoutDirection {
    fn from(arg: RankDirArg) -> Self {
        match arg {
            RankDirArg::Tb => LayoutDirection::Tb,
            RankDirArg::Lr => LayoutDirection::Lr,
            RankDirArg::Bt => LayoutDirection::Bt,
            RankDirArg::Rl => LayoutDirection::Rl,
        }
    }
}

impl Args {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Args::parse()
    }
}
