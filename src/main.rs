#![forbid(unsafe_code)]

use anyhow::Result;
use clap::Parser;
use std::io;

use gsh::cli::{Cli, Commands};
use gsh::commands;
use gsh::config::Config;

fn main() -> Result<()> {
    // Logs go to stderr; stdout is reserved for statements the shell evaluates
    env_logger::Builder::from_env(env_logger::Env::new().filter_or("GSH_LOG", "warn"))
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Some(Commands::Kill) => commands::kill::execute(&config, &mut out)?,
        None => commands::agent::execute(&config, &mut out)?,
    }

    Ok(())
}
