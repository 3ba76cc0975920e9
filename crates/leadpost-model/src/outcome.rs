//! Per-row submission outcomes and run counters.

use std::fmt;

/// Three-way classification of one submission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The remote system accepted the lead.
    Success,
    /// The remote system rejected the lead as a business decision.
    Failure,
    /// The submission could not be evaluated, or the remote reported an error.
    Error,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failure => "failure",
            Self::Error => "error",
        }
    }

    /// Progress symbol printed once per row.
    pub fn symbol(self) -> char {
        match self {
            Self::Success => '.',
            Self::Failure => 'f',
            Self::Error => 'e',
        }
    }

    /// Parse an outcome reported by the remote system. Matching is exact.
    pub fn from_remote(value: &str) -> Option<Self> {
        match value {
            "success" => Some(Self::Success),
            "failure" => Some(Self::Failure),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of submitting one data row; the unit written to the audit log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRecord {
    /// 1-based index of the data row in the input file.
    pub row: usize,
    pub outcome: Outcome,
    /// Identifier assigned by the remote system, empty when none was returned.
    pub lead_id: String,
    pub reason: String,
}

impl SubmissionRecord {
    pub fn new(
        row: usize,
        outcome: Outcome,
        lead_id: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            row,
            outcome,
            lead_id: lead_id.into(),
            reason: reason.into(),
        }
    }

    /// An `error` record with no lead identifier.
    pub fn error(row: usize, reason: impl Into<String>) -> Self {
        Self::new(row, Outcome::Error, String::new(), reason)
    }
}

/// Monotonic outcome counters for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub successes: usize,
    pub failures: usize,
    pub errors: usize,
}

impl RunStats {
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Success => self.successes += 1,
            Outcome::Failure => self.failures += 1,
            Outcome::Error => self.errors += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.successes + self.failures + self.errors
    }
}
