//! pagepack - bundle a web page from directive-annotated sources.

mod builder;
mod cli;
mod config;
mod core;
mod embed;
mod graph;
mod logger;
mod resolve;
mod sourcemap;
mod transform;
mod utils;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use cli::Cli;
use config::PackConfig;

/// Invalid or missing command-line arguments.
const EXIT_USAGE: u8 = 1;
/// Any failure while building.
const EXIT_FAILURE: u8 = 2;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version also arrive here, on stdout
            let code = if err.use_stderr() { EXIT_USAGE } else { 0 };
            err.print().ok();
            return ExitCode::from(code);
        }
    };

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    match run(&cli) {
        Ok(output) => {
            log!("built"; "{}", output.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            logger::error(&format!("{err:#}"));
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

fn run(cli: &Cli) -> Result<PathBuf> {
    let cwd = std::env::current_dir().context("failed to read current directory")?;
    let config = PackConfig::load(cli.config.as_deref(), &cwd)?;
    cli::build::run_build(cli, &config, &cwd)
}
