//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "speleo",
    version,
    about = "Quality control for speleothem workbooks",
    long_about = "Check a speleothem workbook (one CSV per sheet) against the quality-control rules.\n\n\
                  A workbook without warnings can be normalized onto BP (1950) and uploaded."
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
    /// Run every quality-control check on a workbook.
    Check(CheckArgs),

    /// Write the age-bearing sheets with every age on BP (1950).
    Normalize(NormalizeArgs),

    /// List the controlled vocabularies.
    Vocabularies,
}

#[derive(Parser)]
pub struct CheckArgs {
    /// Directory holding one CSV per workbook sheet.
    #[arg(value_name = "WORKBOOK_DIR")]
    pub workbook_dir: PathBuf,

    /// Rows above the header row in every sheet.
    #[arg(long = "skip-rows", default_value_t = 1)]
    pub skip_rows: usize,

    /// How to print the result.
    #[arg(long = "output", value_enum, default_value = "text")]
    pub output: OutputArg,

    /// Also write the JSON report to this file.
    #[arg(long = "report", value_name = "PATH")]
    pub report: Option<PathBuf>,
}

#[derive(Parser)]
pub struct NormalizeArgs {
    /// Directory holding one CSV per workbook sheet.
    #[arg(value_name = "WORKBOOK_DIR")]
    pub workbook_dir: PathBuf,

    /// Output directory (default: <WORKBOOK_DIR>/normalized).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Write even when the workbook has warnings.
    #[arg(long = "force")]
    pub force: bool,

    /// Rows above the header row in every sheet.
    #[arg(long = "skip-rows", default_value_t = 1)]
    pub skip_rows: usize,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputArg {
    Text,
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
