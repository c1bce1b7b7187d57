//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "awb-report",
    version,
    about = "Air waybill cargo report - classify and total import cargo per flight",
    long_about = "Classify waybill line-items from a cargo import export and total \
                  weight and distinct AWBs per flight and cargo category.\n\n\
                  Reads CSV or Excel exports; writes a flight report CSV and \
                  diagnostic logs for operator review."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for humans, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Append logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow AWB numbers and descriptions in trace-level logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Build the flight report from an export file.
    Run(RunArgs),

    /// Print the effective configuration.
    Config(ConfigArgs),

    /// List cargo categories and their report columns.
    Categories,
}

#[derive(Parser)]
pub struct RunArgs {
    /// CSV or Excel export of waybill line-items.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Report CSV path (default: <INPUT_STEM>_report.csv next to the input).
    #[arg(long = "output", value_name = "CSV")]
    pub output: Option<PathBuf>,

    /// Directory for diagnostic logs (default: the report's directory).
    #[arg(long = "log-dir", value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Configuration file overriding the built-in defaults.
    #[arg(long = "config", value_name = "TOML")]
    pub config: Option<PathBuf>,

    /// Classify and summarize without writing any file.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct ConfigArgs {
    /// Configuration file overriding the built-in defaults.
    #[arg(long = "config", value_name = "TOML")]
    pub config: Option<PathBuf>,

    /// Print a JSON summary instead of the full TOML.
    #[arg(long = "json")]
    pub json: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
