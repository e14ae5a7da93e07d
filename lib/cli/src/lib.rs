use clap::{Args, Parser, Subcommand};
use getset::Getters;
use std::path::PathBuf;

pub mod handlers;

/// memtab: an in-memory table store with per-column indexes
#[derive(Debug, Parser, Getters)]
#[command(name = "memtab")]
#[command(about = "memtab: in-memory tables with secondary indexes", long_about = None)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    #[getset(get = "pub")]
    config: Option<PathBuf>,
    /// `tracing` filter directive, e.g. `debug` or `catalog=trace`
    #[arg(long, global = true)]
    #[getset(get = "pub")]
    log: Option<String>,
    #[command(subcommand)]
    #[getset(get = "pub")]
    command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build the `Usuarios` example table, index it and print it
    Demo,
    /// Run dot commands from the command line or a script file
    Exec(ExecArgs),
    /// Start an interactive shell
    Shell,
}

#[derive(Debug, Args, Getters)]
#[getset(get = "pub")]
pub struct ExecArgs {
    /// Dot command to run, may be repeated
    #[arg(short, long = "command", conflicts_with = "file")]
    commands: Vec<String>,
    /// Path to a script of dot commands, one per line
    #[arg(short, long)]
    file: Option<PathBuf>,
}
