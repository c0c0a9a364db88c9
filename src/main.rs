use clap::Parser;
use tracing_subscriber::EnvFilter;

use sanger_barcode::cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("sanger_barcode=debug,info")
    } else {
        EnvFilter::new("sanger_barcode=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let registry = cli::load_registry(cli.catalog.as_deref())?;

    match cli.command {
        cli::Commands::Convert(args) => {
            cli::convert::run(args, &registry, cli.format, cli.verbose)?;
        }
        cli::Commands::Validate(args) => {
            cli::validate::run(args, &registry, cli.format, cli.verbose)?;
        }
        cli::Commands::Split(args) => {
            cli::split::run(args, &registry, cli.format)?;
        }
        cli::Commands::Prefixes(args) => {
            cli::prefixes::run(args, &registry, cli.format)?;
        }
    }

    Ok(())
}
