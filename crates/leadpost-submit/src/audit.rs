//! Per-run audit log: one CSV line per attempted submission.
//!
//! The file is created on the first [`AuditLog::open`] or [`AuditLog::record`]
//! call, so a run that never submits leaves nothing behind. Any write failure is returned to the
//! caller, which treats it as fatal.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use thiserror::Error;
use tracing::{debug, info};

use leadpost_model::SubmissionRecord;

/// Header line written once when the log is created.
pub const AUDIT_HEADER: [&str; 4] = [
    "import_line_num",
    "import_outcome",
    "import_lead_id",
    "import_reason",
];

#[derive(Debug, Error)]
pub enum AuditError {
    #[error("audit log {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("audit log {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Log file name for a run started at `started_at`, at minute granularity.
pub fn audit_file_name(started_at: NaiveDateTime) -> String {
    format!("log_{}.csv", started_at.format("%m%d_%H%M"))
}

#[derive(Debug)]
pub struct AuditLog {
    path: PathBuf,
    writer: Option<csv::Writer<File>>,
    lines: u64,
}

impl AuditLog {
    /// A log in `dir`, named from the run's start time.
    pub fn new(dir: &Path, started_at: NaiveDateTime) -> Self {
        Self::at_path(dir.join(audit_file_name(started_at)))
    }

    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            writer: None,
            lines: 0,
        }
    }

    /// Path of the file if it has been created.
    pub fn created_path(&self) -> Option<&Path> {
        (self.lines > 0 || self.writer.is_some()).then_some(self.path.as_path())
    }

    /// Number of lines recorded so far, excluding the header.
    pub fn lines(&self) -> u64 {
        self.lines
    }

    /// Create the file and write the header if that has not happened yet.
    ///
    /// Called before a row leaves the process, so a row is never posted
    /// without somewhere to record it.
    pub fn open(&mut self) -> Result<(), AuditError> {
        let path = self.path.clone();
        self.writer()?
            .flush()
            .map_err(|source| AuditError::Io { path, source })
    }

    /// Append `record` and return its 1-based line number.
    ///
    /// The line is flushed before returning.
    pub fn record(&mut self, record: &SubmissionRecord) -> Result<u64, AuditError> {
        let line = self.lines + 1;
        let line_text = line.to_string();
        let path = self.path.clone();
        let writer = self.writer()?;
        writer
            .write_record([
                line_text.as_str(),
                record.outcome.as_str(),
                record.lead_id.as_str(),
                record.reason.as_str(),
            ])
            .map_err(|source| AuditError::Csv {
                path: path.clone(),
                source,
            })?;
        writer
            .flush()
            .map_err(|source| AuditError::Io { path, source })?;
        self.lines = line;
        Ok(line)
    }

    /// Flush and release the file. Safe to call when nothing was recorded
    /// and more than once.
    pub fn close(&mut self) -> Result<(), AuditError> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush().map_err(|source| AuditError::Io {
                path: self.path.clone(),
                source,
            })?;
            debug!(path = %self.path.display(), lines = self.lines, "closed audit log");
        }
        Ok(())
    }

    fn writer(&mut self) -> Result<&mut csv::Writer<File>, AuditError> {
        let writer = match self.writer.take() {
            Some(writer) => writer,
            None => self.create()?,
        };
        Ok(self.writer.insert(writer))
    }

    fn create(&self) -> Result<csv::Writer<File>, AuditError> {
        let file = File::create(&self.path).map_err(|source| AuditError::Io {
            path: self.path.clone(),
            source,
        })?;
        let mut writer = csv::Writer::from_writer(file);
        writer
            .write_record(AUDIT_HEADER)
            .map_err(|source| AuditError::Csv {
                path: self.path.clone(),
                source,
            })?;
        info!(path = %self.path.display(), "created audit log");
        Ok(writer)
    }
}

impl Drop for AuditLog {
    fn drop(&mut self) {
        let _ = self.close();
    }
}
