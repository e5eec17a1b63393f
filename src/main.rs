use modgraph::cli::{Args, Command};
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    // Parse command-line arguments
    let args = Args::parse_args();

    init_logging(&args);

    let command = Command::from_args(args);
    process::exit(command.run());
}

/// Install the stderr log subscriber; `RUST_LOG` overrides the flag-derived level
fn init_logging(args: &Args) {
    let filter = if args.verbose {
        "modgraph=debug"
    } else if args.quiet {
        "warn"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_ansi(!args.no_colors),
        )
        .init();
}
