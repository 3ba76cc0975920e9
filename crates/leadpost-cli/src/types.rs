use std::path::PathBuf;

use chrono::NaiveDateTime;

use leadpost_model::RunStats;

/// How the operator confirms the run before anything is posted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PreviewPolicy {
    /// Preview one row, then a single yes/no prompt for the whole file.
    #[default]
    Gate,
    /// Preview row by row, choosing to post none, one, or all remaining rows.
    Stepwise,
}

/// Everything the import needs, resolved from the command line.
#[derive(Debug, Clone)]
pub struct ImportOptions {
    pub input: PathBuf,
    pub destination: String,
    /// 1-based row to preview; 0 skips the preview entirely.
    pub preview_row: usize,
    pub policy: PreviewPolicy,
    /// Echo the raw response body of rows posted one at a time.
    pub show_response: bool,
    /// Directory the audit log is written to.
    pub log_dir: PathBuf,
    /// Start of the run; names the audit log.
    pub started_at: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportStatus {
    /// Every data row was submitted.
    Completed,
    /// The operator declined at the preview gate; nothing was posted.
    Declined,
    /// The operator stopped a stepwise run early.
    Halted,
}

#[derive(Debug, Clone)]
pub struct ImportResult {
    pub status: ImportStatus,
    pub rows_read: usize,
    pub stats: RunStats,
    /// Audit log path, present only if the log was created.
    pub audit_log: Option<PathBuf>,
}
