use anyhow::Context;
use clap::Parser;
use influbazzar::cli::{execute, Cli};
use influbazzar::config::Config;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref()).context("loading configuration")?;
    let output = execute(&cli, &config)?;
    println!("{}", output);
    Ok(())
}
