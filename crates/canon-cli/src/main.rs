//! Canon CLI - check character backstories against their source novels.

use anyhow::Context;
use canon_cli::commands;
use canon_cli::{Cli, Command, Config, Formatter};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Index(args) => commands::execute_index(args, &config, &formatter)
            .await
            .context("indexing failed")?,
        Command::Validate(args) => commands::execute_validate(args, &config, &formatter)
            .await
            .context("validation failed")?,
        Command::Check(args) => commands::execute_check(args, &config, &formatter)
            .await
            .context("check failed")?,
    }

    Ok(())
}

/// Logs go to stderr so results on stdout stay machine-readable.
fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
