//! CLI argument definitions.

use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "rowguard",
    version,
    about = "Validate tabular data against column templates",
    long_about = "Validate every row of a CSV, JSON or spreadsheet file against a column\n\
                  template.\n\n\
                  Templates declare each column's type (string, date, number, sin, email,\n\
                  phone), whether it is required, and optional constraints."
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

    /// Explicit log level (overrides -v/-q flags and RUST_LOG).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format.
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

    /// Include row values in trace output instead of redacting them.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate a data file against a template.
    Validate(ValidateArgs),

    /// List the templates in the template directory.
    Templates(TemplatesArgs),
}

#[derive(Parser)]
pub struct TemplatesArgs {
    /// Template directory (default: $ROWGUARD_TEMPLATES_DIR, then ./validation-templates).
    #[arg(long = "templates-dir", value_name = "DIR")]
    pub templates_dir: Option<PathBuf>,
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// CSV, JSON or spreadsheet (xlsx, xls, ods) file to validate.
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Template id (file stem) in the template directory.
    #[arg(
        long = "template",
        value_name = "ID",
        required_unless_present = "schema",
        conflicts_with = "schema"
    )]
    pub template: Option<String>,

    /// Template directory (default: $ROWGUARD_TEMPLATES_DIR, then ./validation-templates).
    #[arg(long = "templates-dir", value_name = "DIR", conflicts_with = "schema")]
    pub templates_dir: Option<PathBuf>,

    /// Standalone template file (YAML, or JSON by extension).
    #[arg(long = "schema", value_name = "PATH")]
    pub schema: Option<PathBuf>,

    /// Rows validated between progress updates.
    #[arg(long = "chunk-size", value_name = "N", default_value = "1000")]
    pub chunk_size: NonZeroUsize,

    /// Validate up to N chunks at once on worker threads.
    #[arg(long = "threads", value_name = "N")]
    pub threads: Option<NonZeroUsize>,

    /// Write the CSV error report here (a directory gets a dated file name).
    #[arg(long = "report", value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Write the full result as JSON here.
    #[arg(long = "json", value_name = "PATH")]
    pub json: Option<PathBuf>,

    /// What to print on stdout.
    #[arg(long = "output", value_enum, default_value = "table")]
    pub output: OutputArg,

    /// Maximum number of errors shown in the error table.
    #[arg(long = "limit", value_name = "N", default_value_t = 50)]
    pub limit: usize,

    /// Disable the progress bar.
    #[arg(long = "no-progress")]
    pub no_progress: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputArg {
    Table,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
