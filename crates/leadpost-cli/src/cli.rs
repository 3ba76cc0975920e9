//! CLI argument definitions for the lead importer.

use std::path::PathBuf;

use chrono::NaiveDateTime;
use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use leadpost_cli::types::{ImportOptions, PreviewPolicy};
use leadpost_submit::DEFAULT_TIMEOUT;

#[derive(Parser)]
#[command(
    name = "leadpost",
    version,
    about = "Post each row of a CSV file as a lead to a form intake endpoint",
    long_about = "Read the lines of a CSV file, posting each data line as a lead to an \
                  intake endpoint.\n\n\
                  The first line is the header. Its values, lowercased with spaces \
                  turned into underscores, are used as the form field names; empty \
                  cells are not posted. One row is shown as a preview so you can check \
                  everything before starting.\n\n\
                  DESTINATION can be a full submission URL that already names the flow \
                  and source, such as\n  \
                  https://app.example.com/flows/FLOW-ID/sources/SOURCE-ID/submit\n\
                  or, when the file has 'flow_id' and 'source_id' columns, the base URL \
                  of the app, such as\n  \
                  https://app.example.com",
    after_help = "Progress is shown as the file is processed: '.' for each success, \
                  'f' for each failure and 'e' for each error. Every attempt is also \
                  recorded in log_MMDD_HHMM.csv so you can see which rows had trouble \
                  and why.\n\n\
                  At the confirmation prompt an empty line or 'y' starts posting. Any \
                  other answer declines, and so does closed input: piping from \
                  /dev/null or an exhausted stdin never posts anything."
)]
pub struct Cli {
    /// CSV file to import.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Submission URL or base URL of the intake app.
    #[arg(value_name = "DESTINATION")]
    pub destination: String,

    /// Data row to preview before posting (1-based; 0 skips the preview).
    #[arg(long = "preview-row", value_name = "N", default_value_t = 1)]
    pub preview_row: usize,

    /// How to confirm before posting.
    #[arg(long = "confirm", value_enum, default_value = "gate")]
    pub confirm: ConfirmArg,

    /// Print the raw response of rows posted one at a time (stepwise mode).
    #[arg(long = "show-response")]
    pub show_response: bool,

    /// HTTP request timeout in seconds.
    #[arg(long = "timeout", value_name = "SECS", default_value_t = DEFAULT_TIMEOUT.as_secs())]
    pub timeout: u64,

    /// Directory the audit log is written to.
    #[arg(long = "log-dir", value_name = "DIR", default_value = ".")]
    pub log_dir: PathBuf,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,

    /// Prefix log lines with a timestamp.
    #[arg(long = "log-timestamps")]
    pub log_timestamps: bool,

    /// Include the module path of each log event.
    #[arg(long = "log-target")]
    pub log_target: bool,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Allow response bodies in debug logs instead of a redacted placeholder.
    #[arg(long = "log-data")]
    pub log_data: bool,
}

impl Cli {
    pub fn import_options(&self, started_at: NaiveDateTime) -> ImportOptions {
        ImportOptions {
            input: self.file.clone(),
            destination: self.destination.clone(),
            preview_row: self.preview_row,
            policy: match self.confirm {
                ConfirmArg::Gate => PreviewPolicy::Gate,
                ConfirmArg::Stepwise => PreviewPolicy::Stepwise,
            },
            show_response: self.show_response,
            log_dir: self.log_dir.clone(),
            started_at,
        }
    }
}

/// CLI confirmation policy choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum ConfirmArg {
    /// Preview one row, then confirm the whole file once.
    Gate,
    /// Preview each row and choose to post none, one, or all remaining.
    Stepwise,
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
