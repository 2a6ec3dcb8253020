// piiscrub/src/cli.rs
//! Command-line interface definition for the piiscrub binary.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "piiscrub",
    author = "Relay",
    version = env!("CARGO_PKG_VERSION"),
    about = "Remove personal data from free-text survey comments",
    long_about = "piiscrub replaces passport numbers, dates, phone numbers, national insurance numbers and vehicle registrations in survey comments with a marker, then masks every remaining digit with 'X'. It can also scan text without changing it and classify the GOV.UK page a survey was filled in on.",
    arg_required_else_help = true
)]
pub struct Cli {
    #[arg(long, short = 'q', global = true, help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    #[arg(long, short = 'd', global = true, conflicts_with = "quiet", help = "Enable debug logging.")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Redacts an input file or stdin.
    #[command(about = "Redact personal data from an input file or stdin.")]
    Redact(RedactCommand),

    /// Reports what would be redacted without changing the input.
    #[command(about = "Scan input for personal data and summarise the findings without redacting.")]
    Scan(ScanCommand),

    /// Normalises survey page URLs.
    #[command(name = "classify-url", about = "Classify GOV.UK survey page URLs.")]
    ClassifyUrl(ClassifyUrlCommand),
}

/// Input and detector selection shared by `redact` and `scan`.
#[derive(Args, Debug, Clone, Default)]
pub struct DetectorArgs {
    #[arg(long, short = 'i', value_name = "FILE", help = "Read input from a specified file instead of stdin.")]
    pub input_file: Option<PathBuf>,

    #[arg(long = "config", value_name = "FILE", help = "Path to a custom redaction configuration file (YAML).")]
    pub config: Option<PathBuf>,

    #[arg(long = "marker", value_name = "TEXT", help = "Replace detected personal data with this text (must not contain digits).")]
    pub marker: Option<String>,

    /// Explicitly enable only these detectors (comma-separated).
    #[arg(long, short = 'e', value_delimiter = ',', help = "Enable only these detectors (comma-separated).")]
    pub enable: Vec<String>,

    /// Explicitly disable these detectors (comma-separated).
    #[arg(long, short = 'x', value_delimiter = ',', help = "Disable these detectors (comma-separated).")]
    pub disable: Vec<String>,
}

/// Arguments for the `redact` command.
#[derive(Args, Debug)]
pub struct RedactCommand {
    #[command(flatten)]
    pub detectors: DetectorArgs,

    #[arg(long, short = 'o', value_name = "FILE", help = "Write output to a specified file instead of stdout.")]
    pub output: Option<PathBuf>,

    #[arg(long, short = 'D', help = "Show a unified diff to highlight the changes made.")]
    pub diff: bool,

    #[arg(
        long = "line-buffered",
        conflicts_with = "diff",
        help = "Process input line by line (useful for streaming data from pipes)."
    )]
    pub line_buffered: bool,

    #[arg(long = "no-redaction-summary", help = "Suppress the redaction summary.")]
    pub no_summary: bool,
}

/// Arguments for the `scan` command.
#[derive(Args, Debug)]
pub struct ScanCommand {
    #[command(flatten)]
    pub detectors: DetectorArgs,

    /// Exit with a non-zero code if the total number of detections exceeds this threshold.
    #[arg(long = "fail-over-threshold", value_name = "N", help = "Exit with a non-zero code if the number of detections exceeds N.")]
    pub fail_over_threshold: Option<usize>,

    #[arg(long = "json-file", value_name = "FILE", help = "Export the scan report to a JSON file.")]
    pub json_file: Option<PathBuf>,

    #[arg(long = "json-stdout", conflicts_with = "json_file", help = "Print the scan report to stdout as JSON.")]
    pub json_stdout: bool,
}

/// Arguments for the `classify-url` command.
#[derive(Args, Debug)]
pub struct ClassifyUrlCommand {
    #[arg(value_name = "URL", required = true, num_args = 1.., help = "One or more survey page URLs or paths.")]
    pub urls: Vec<String>,

    #[arg(long, help = "Print the classification as JSON.")]
    pub json: bool,
}
