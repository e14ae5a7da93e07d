use anyhow::{Context, Result};
use clap::Parser;
use cli::{
    handlers::{handle_demo, handle_exec, handle_shell},
    Cli, Commands,
};
use common::{util::trace::initialize_tracing, ShellConfig};
use std::{io, process};
use tracing::info;

fn main() -> Result<()> {
    let args = Cli::parse();

    let config =
        ShellConfig::load(args.config().as_deref()).context("failed to load configuration")?;
    let filter = args.log().as_deref().unwrap_or(config.log_filter());
    initialize_tracing(filter)?;
    info!(?config, "memtab started");

    let code = match args.command() {
        Commands::Demo => handle_demo(&mut io::stdout().lock())?,
        Commands::Exec(exec) => handle_exec(exec, &config)?,
        Commands::Shell => handle_shell(&config)?,
    };

    info!(code, "memtab finished");
    process::exit(code)
}
