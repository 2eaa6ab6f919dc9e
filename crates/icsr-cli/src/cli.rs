//! CLI argument definitions for the `icsr` tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use icsr_cli::commands::{ConvertTarget, LayerArg};

#[derive(Parser)]
#[command(
    name = "icsr",
    version,
    about = "Validate and convert Individual Case Safety Reports",
    long_about = "Validate and convert Individual Case Safety Reports (ICSR).\n\n\
                  Documents are read in their external JSON form, checked against the\n\
                  business rules and converted into the domain or storage layer."
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

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Check a document against the structural and business rules.
    Validate(ValidateArgs),

    /// Convert a document into the domain or storage layer.
    Convert(ConvertArgs),

    /// List the entity types of each layer.
    Schema(SchemaArgs),
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// Path to an ICSR document in its external JSON form.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// How to print the outcome.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: ReportFormatArg,
}

#[derive(Parser)]
pub struct ConvertArgs {
    /// Path to an ICSR document in its external JSON form.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Layer to convert into.
    #[arg(long = "to", value_enum, default_value = "domain")]
    pub to: ConvertTarget,
}

#[derive(Parser)]
pub struct SchemaArgs {
    /// Only list this layer.
    #[arg(long = "layer", value_enum)]
    pub layer: Option<LayerArg>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ReportFormatArg {
    Table,
    Json,
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
