//! App sandbox manifest fixer
//!
//! Merges JSON sandbox fragments over the built-in template and writes the
//! resulting manifest for the sandbox loader.

mod cli;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;
use sandbox_manifest::FixOptions;

use cli::Cli;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Usage errors, malformed patterns included, exit here before any I/O
    let cli = Cli::parse();

    logging::init(cli.verbose)?;

    let options = FixOptions::from(cli);
    sandbox_manifest::fix_sandbox_config(&options)?;
    Ok(())
}
