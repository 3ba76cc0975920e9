use std::io::{self, Write};

use crate::types::{ImportResult, ImportStatus};

/// Final line of a run, e.g. `finished: 3 successes, 1 failures, 0 errors (see log_0307_1504.csv)`.
pub fn summary_line(result: &ImportResult) -> String {
    let stats = &result.stats;
    let mut line = format!(
        "finished: {} successes, {} failures, {} errors",
        stats.successes, stats.failures, stats.errors
    );
    if let Some(path) = &result.audit_log {
        line.push_str(&format!(" (see {})", path.display()));
    }
    line
}

pub fn print_summary(out: &mut dyn Write, result: &ImportResult) -> io::Result<()> {
    match result.status {
        ImportStatus::Declined => Ok(()),
        ImportStatus::Completed | ImportStatus::Halted => {
            writeln!(out)?;
            writeln!(out, "{}", summary_line(result))
        }
    }
}
