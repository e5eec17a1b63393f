//! Command implementations

use super::Args;
use crate::config::{load_config, CliArgs, DEFAULT_CONFIG_FILE};
use crate::core::{run_with_progress, RunOutcome};
use crate::error::{ModgraphError, Result};
use crate::models::config::Settings;
use crate::output::{format_summary_text, GraphvizRenderer, ProgressReporter, RunSummary};
use std::path::PathBuf;
use tracing::{debug, error, info};

/// Available commands
#[derive(Debug)]
pub enum Command {
    /// Scan a tree and produce its import graph
    Render(Args),
    /// Initialize a default configuration file
    Init,
}

impl Command {
    /// Create a command from parsed arguments
    pub fn from_args(args: Args) -> Self {
        if args.init {
            return Command::Init;
        }

        Command::Render(args)
    }

    /// Execute the command
    pub fn execute(&self) -> Result<()> {
        match self {
            Command::Render(args) => {
                let settings = load_config(CliArgs::from(args))?;
                debug!(?settings, "resolved settings");

                let outcome = render(&settings)?;
                print_summary(&settings, &outcome);
                Ok(())
            }
            Command::Init => {
                let config_path = PathBuf::from(DEFAULT_CONFIG_FILE);

                if config_path.exists() {
                    return Err(ModgraphError::config_error(format!(
                        "Configuration file already exists at {}; delete it first to recreate it",
                        config_path.display()
                    )));
                }

                crate::config::parser::create_default_config(&config_path)?;
                info!("created default configuration file at {}", config_path.display());
                eprintln!("Set base_module in {} before the first run.", config_path.display());
                Ok(())
            }
        }
    }

    /// Run the command and turn its result into a process exit code
    pub fn run(&self) -> i32 {
        match self.execute() {
            Ok(()) => 0,
            Err(err) => {
                error!("{}", err.user_message());
                err.exit_code()
            }
        }
    }
}

/// Scan, render and open according to the settings
fn render(settings: &Settings) -> Result<RunOutcome> {
    let renderer = GraphvizRenderer::new(settings.layout_engine.clone());
    let mut progress = ProgressReporter::new(
        settings.show_progress && !settings.quiet,
        settings.verbose,
    );

    run_with_progress(settings, &renderer, &mut progress)
}

/// Print the run summary on stderr unless quiet
fn print_summary(settings: &Settings, outcome: &RunOutcome) {
    if settings.quiet {
        return;
    }

    let summary = RunSummary {
        root: &settings.scan_path,
        target: outcome.target.as_ref(),
        statistics: &outcome.statistics,
        elapsed: outcome.elapsed,
    };
    eprint!(
        "{}",
        format_summary_text(&summary, settings.use_colors, settings.verbose)
    );
}
