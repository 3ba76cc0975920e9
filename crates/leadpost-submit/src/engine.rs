//! One form post per data row.

use tracing::{debug, debug_span};

use leadpost_model::{FieldSchema, SubmissionRecord};

use crate::audit::{AuditError, AuditLog};
use crate::destination::RoutePlan;
use crate::poster::FormPoster;
use crate::response::classify_response;

/// Outcome of submitting one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub record: SubmissionRecord,
    /// Audit log line the record was written to.
    pub line: u64,
    /// URL the row was posted to.
    pub url: String,
    /// Raw response body, when a response was received.
    pub response_body: Option<String>,
}

/// Form payload for a row: `normalized name -> value` for every non-empty
/// cell, in column order. A repeated name keeps its first position and its
/// last non-empty value.
pub fn build_form(schema: &FieldSchema, row: &[String]) -> Vec<(String, String)> {
    let mut form: Vec<(String, String)> = Vec::with_capacity(row.len());
    for (name, value) in schema.names.iter().zip(row) {
        if value.is_empty() {
            continue;
        }
        match form.iter_mut().find(|(existing, _)| existing == name) {
            Some(entry) => entry.1.clone_from(value),
            None => form.push((name.clone(), value.clone())),
        }
    }
    form
}

/// Posts rows and records each attempt in the audit log.
#[derive(Debug)]
pub struct SubmissionEngine<P> {
    poster: P,
    plan: RoutePlan,
}

impl<P: FormPoster> SubmissionEngine<P> {
    pub fn new(poster: P, plan: RoutePlan) -> Self {
        Self { poster, plan }
    }

    pub fn plan(&self) -> &RoutePlan {
        &self.plan
    }

    /// Submit one row (1-based `row_number`) exactly once.
    ///
    /// Transport, status and parse problems are folded into the returned
    /// record. Only an audit log failure is an `Err`; the log is opened
    /// before anything is sent, so a log that cannot be created stops the
    /// row from being posted at all.
    pub fn submit_row(
        &self,
        schema: &FieldSchema,
        row_number: usize,
        row: &[String],
        audit: &mut AuditLog,
    ) -> Result<Submission, AuditError> {
        let span = debug_span!("row", row = row_number);
        let _guard = span.enter();

        audit.open()?;
        let url = self.plan.url_for(row).into_owned();
        let form = build_form(schema, row);
        let (record, response_body) = match self.poster.post_form(&url, &form) {
            Ok(response) => {
                debug!(status = response.status, "response received");
                (classify_response(row_number, &response), Some(response.body))
            }
            Err(error) => {
                debug!(%error, "transport failure");
                (SubmissionRecord::error(row_number, error.to_string()), None)
            }
        };

        let line = audit.record(&record)?;
        debug!(line, outcome = %record.outcome, lead_id = %record.lead_id, "row recorded");
        Ok(Submission {
            record,
            line,
            url,
            response_body,
        })
    }
}
