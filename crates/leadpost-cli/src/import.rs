//! Run orchestration: read, route, confirm, submit every row, summarize.
//!
//! Rows are submitted strictly one after another. The audit log is owned
//! here for the whole run and is closed on every exit path, explicitly on
//! success and by `Drop` when an error propagates.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use tracing::{debug, info, info_span};

use leadpost_ingest::{derive_schema, read_dataset};
use leadpost_model::{FieldSchema, RunStats};
use leadpost_submit::{AuditLog, Destination, FormPoster, Submission, SubmissionEngine};

use crate::logging::redact_value;
use crate::preview::{Confirmation, StepChoice, choose_step, render_row, run_gate};
use crate::types::{ImportOptions, ImportResult, ImportStatus, PreviewPolicy};

/// Run one import.
///
/// `input` supplies the operator's answers and `out` receives the run
/// narration. Fatal problems (unreadable input, bad destination, missing
/// routing columns, audit log failures) are returned as errors; per-row
/// problems only show up in the counts and the audit log.
pub fn run_import<P: FormPoster>(
    options: &ImportOptions,
    poster: P,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> Result<ImportResult> {
    let span = info_span!(
        "import",
        file = %options.input.display(),
        destination = %options.destination
    );
    let _guard = span.enter();

    let destination = Destination::parse(&options.destination)?;
    let dataset = read_dataset(&options.input)
        .with_context(|| format!("error reading file {}", options.input.display()))?;
    writeln!(out, "read {} data rows", dataset.row_count())?;

    let schema = derive_schema(&dataset.headers);
    let plan = destination.plan(&schema)?;
    info!(
        rows = dataset.row_count(),
        columns = schema.len(),
        mode = ?destination.mode(),
        "input loaded"
    );

    let engine = SubmissionEngine::new(poster, plan);
    let mut audit = AuditLog::new(&options.log_dir, options.started_at);
    let mut run = Run {
        engine: &engine,
        schema: &schema,
        audit: &mut audit,
        stats: RunStats::default(),
    };

    let status = match options.policy {
        PreviewPolicy::Gate => {
            if dataset.is_empty() {
                info!("no data rows; nothing to post");
            } else if options.preview_row > 0 {
                let answer = run_gate(
                    input,
                    out,
                    &dataset,
                    &schema,
                    engine.plan(),
                    options.preview_row,
                )?;
                if answer == Confirmation::Decline {
                    info!("operator declined; nothing posted");
                    writeln!(out, "import cancelled; nothing was posted")?;
                    return Ok(ImportResult {
                        status: ImportStatus::Declined,
                        rows_read: dataset.row_count(),
                        stats: RunStats::default(),
                        audit_log: None,
                    });
                }
            }
            for (index, row) in dataset.rows.iter().enumerate() {
                run.submit_with_progress(index + 1, row, out)?;
            }
            ImportStatus::Completed
        }
        PreviewPolicy::Stepwise => {
            let mut stepping = options.preview_row > 0;
            let mut status = ImportStatus::Completed;
            for (index, row) in dataset.rows.iter().enumerate() {
                let row_number = index + 1;
                if stepping {
                    let url = engine.plan().url_for(row);
                    render_row(out, &schema, row_number, row, &url)?;
                    match choose_step(input, out)? {
                        StepChoice::Halt => {
                            status = ImportStatus::Halted;
                            break;
                        }
                        StepChoice::One => {
                            let submission = run.submit(row_number, row)?;
                            report_single(out, &submission, options.show_response)?;
                            continue;
                        }
                        StepChoice::All => stepping = false,
                    }
                }
                run.submit_with_progress(row_number, row, out)?;
            }
            status
        }
    };

    let stats = run.stats;
    audit.close()?;
    info!(
        successes = stats.successes,
        failures = stats.failures,
        errors = stats.errors,
        "import finished"
    );
    Ok(ImportResult {
        status,
        rows_read: dataset.row_count(),
        stats,
        audit_log: audit.created_path().map(ToOwned::to_owned),
    })
}

/// Per-run mutable state threaded through row submission.
struct Run<'a, P> {
    engine: &'a SubmissionEngine<P>,
    schema: &'a FieldSchema,
    audit: &'a mut AuditLog,
    stats: RunStats,
}

impl<P: FormPoster> Run<'_, P> {
    fn submit(&mut self, row_number: usize, row: &[String]) -> Result<Submission> {
        let submission = self
            .engine
            .submit_row(self.schema, row_number, row, self.audit)?;
        self.stats.record(submission.record.outcome);
        if let Some(body) = &submission.response_body {
            debug!(row = row_number, body = redact_value(body), "response body");
        }
        Ok(submission)
    }

    fn submit_with_progress(
        &mut self,
        row_number: usize,
        row: &[String],
        out: &mut dyn Write,
    ) -> Result<()> {
        let submission = self.submit(row_number, row)?;
        write!(out, "{}", submission.record.outcome.symbol())?;
        out.flush()?;
        Ok(())
    }
}

fn report_single(out: &mut dyn Write, submission: &Submission, show_response: bool) -> Result<()> {
    let record = &submission.record;
    debug!(
        row = record.row,
        outcome = %record.outcome,
        url = %submission.url,
        "single row posted"
    );
    if show_response && let Some(body) = &submission.response_body {
        writeln!(out, "\n{body}\n")?;
    }
    let lead = if record.lead_id.is_empty() {
        "-"
    } else {
        record.lead_id.as_str()
    };
    writeln!(
        out,
        "row #{} posted to {}: {} (lead {lead}) {}",
        record.row, submission.url, record.outcome, record.reason
    )?;
    Ok(())
}
