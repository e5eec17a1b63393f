//! Command-line argument configuration source

use std::path::PathBuf;

use super::ConfigSource;
use crate::cli::args::Args;
use crate::error::Result;
use crate::models::config::{LayoutDirection, MatchMode, OutputFormat, PartialSettings};

/// Command-line argument configuration source
#[derive(Debug)]
pub struct CliConfig {
    args: CliArgs,
    name: String,
}

/// Command-line arguments that map onto settings
///
/// Boolean flags only ever switch a setting away from its default, so an
/// unset flag leaves lower layers untouched.
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub root: Option<PathBuf>,
    pub module: Option<String>,
    pub target: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub no_open: bool,
    pub match_mode: Option<MatchMode>,
    pub exclude: Option<Vec<String>>,
    pub max_depth: Option<usize>,
    pub follow_links: bool,
    pub skip_tests: bool,
    pub strict: bool,
    pub show_isolated: bool,
    pub rankdir: Option<LayoutDirection>,
    pub engine: Option<String>,
    pub quiet: bool,
    pub verbose: bool,
    pub no_colors: bool,
    pub no_progress: bool,
    pub config: Option<PathBuf>,
}

impl From<&Args> for CliArgs {
    fn from(args: &Args) -> Self {
        Self {
            root: args.root.clone(),
            module: args.module.clone(),
            target: args.target.clone(),
            format: args.format.map(Into::into),
            no_open: args.no_open,
            match_mode: args.match_mode.map(Into::into),
            exclude: (!args.exclude.is_empty()).then(|| args.exclude.clone()),
            max_depth: args.max_depth,
            follow_links: args.follow_links,
            skip_tests: args.skip_tests,
            strict: args.strict,
            show_isolated: args.show_isolated,
            rankdir: args.rankdir.map(Into::into),
            engine: args.engine.clone(),
            quiet: args.quiet,
            verbose: args.verbose,
            no_colors: args.no_colors,
            no_progress: args.no_progress,
            config: args.config.clone(),
        }
    }
}

impl CliConfig {
    /// Create a new CLI configuration source
    pub fn new(args: CliArgs) -> Self {
        Self {
            args,
            name: "command-line arguments".to_string(),
        }
    }

    /// Create a CLI configuration source from Args
    pub fn from_args(args: &Args) -> Self {
        Self::new(CliArgs::from(args))
    }

    /// Get the config file path if specified
    pub fn config_path(&self) -> Option<&PathBuf> {
        self.args.config.as_ref()
    }
}

impl ConfigSource for CliConfig {
    fn load(&self) -> Result<PartialSettings> {
        let args = &self.args;
        let flag = |set: bool, value: bool| set.then_some(value);

        Ok(PartialSettings {
            scan_path: args.root.clone(),
            base_module: args.module.clone(),
            match_mode: args.match_mode,
            exclude_patterns: args.exclude.clone(),
            max_depth: args.max_depth,
            follow_links: flag(args.follow_links, true),
            include_tests: flag(args.skip_tests, false),
            strict_syntax: flag(args.strict, true),
            output_format: args.format,
            output_file: args.target.clone(),
            open_viewer: flag(args.no_open, false),
            show_isolated: flag(args.show_isolated, true),
            layout_direction: args.rankdir,
            layout_engine: args.engine.clone(),
            quiet: flag(args.quiet, true),
            verbose: flag(args.verbose, true),
            use_colors: flag(args.no_colors, false),
            show_progress: flag(args.no_progress, false),
        })
    }

    fn is_available(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        &self.name
    }
}
