//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Sensor Bindgen - build-time generator for platform sensor binders
#[derive(Parser, Debug)]
#[command(
    name = "sensor-bindgen",
    author,
    version,
    about = "Sensor binding code generator",
    long_about = "A build-time code generator for platform sensor bindings.\n\n\
                  Scans Rust sources for binding-tagged methods, validates them \n\
                  against the binding rules, and emits one sensor binder per \n\
                  owning type."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "SENSOR_BINDGEN_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "SENSOR_BINDGEN_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate binder artifacts from tagged sources
    Generate(GenerateArgs),

    /// Validate tagged sources without writing artifacts
    Check(CheckArgs),

    /// Display discovered binding information
    Info(InfoArgs),
}

/// Arguments for the `generate` command
#[derive(Parser, Debug, Clone)]
pub struct GenerateArgs {
    /// Source files or directories to scan (directories are walked for .rs files)
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Directory the generated artifacts are written to
    #[arg(short, long, default_value = "generated", env = "SENSOR_BINDGEN_OUT_DIR")]
    pub out_dir: PathBuf,

    /// Run the full pass without writing any files
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the `check` command
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Source files or directories to check
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output check result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Source files or directories to inspect
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}
