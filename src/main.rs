use clap::Parser;
use tracing_subscriber::EnvFilter;

use plural_qf::cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("plural_qf=debug,info")
    } else {
        EnvFilter::new("plural_qf=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    cli::dispatch(cli)
}
