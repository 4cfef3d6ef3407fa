//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::Parser;
use sandbox_manifest::{FixOptions, Pattern};

/// Merge app sandbox config fragments into one sandbox manifest
#[derive(Parser, Debug)]
#[command(name = "appdata-sandbox-fixer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Fixed sandbox configure file to write
    #[arg(long, value_name = "PATH")]
    pub output: PathBuf,

    /// Primary sandbox fragment, applied first
    #[arg(long = "source-file", value_name = "PATH")]
    pub source_file: PathBuf,

    /// Replace {key} with value in every fragment, e.g. libpath:lib64
    #[arg(long = "patterns", value_name = "KEY:VALUE")]
    pub patterns: Vec<Pattern>,

    /// Extra sandbox fragment, applied after the source file in order
    #[arg(long = "extra_sandbox_cfg", value_name = "PATH")]
    pub extra_sandbox_cfgs: Vec<PathBuf>,

    /// Write a depfile listing the source file as a dependency of the output
    #[arg(long, value_name = "PATH")]
    pub depfile: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl From<Cli> for FixOptions {
    fn from(cli: Cli) -> Self {
        Self {
            output: cli.output,
            source_file: cli.source_file,
            patterns: cli.patterns,
            extra_sandbox_cfgs: cli.extra_sandbox_cfgs,
            depfile: cli.depfile,
        }
    }
}
