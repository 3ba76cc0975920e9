//! Classification of the remote system's reply.

use serde::Deserialize;
use serde::de::Error as _;
use serde_json::Value;
use tracing::warn;

use leadpost_model::{Outcome, SubmissionRecord};

use crate::poster::FormResponse;

/// Recognized shape of a 2xx response body.
///
/// Absent or `null` fields are tolerated; a body that is not JSON, or has
/// fields of the wrong type, is not.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LeadResponse {
    pub outcome: Option<String>,
    pub reason: Option<String>,
    pub lead: Option<Lead>,
    pub price: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Lead {
    pub id: Option<String>,
}

impl LeadResponse {
    /// Parse a response body. Only a JSON object is accepted; serde would
    /// otherwise also read the struct from an array of positional values.
    pub fn parse(body: &str) -> Result<Self, serde_json::Error> {
        match serde_json::from_str(body)? {
            value @ Value::Object(_) => serde_json::from_value(value),
            other => Err(serde_json::Error::custom(format!(
                "expected a JSON object, found {}",
                json_kind(&other)
            ))),
        }
    }

    pub fn lead_id(&self) -> &str {
        self.lead
            .as_ref()
            .and_then(|lead| lead.id.as_deref())
            .unwrap_or_default()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Turn a received response into the record for `row`.
///
/// Non-2xx statuses are errors whose reason is the status code. For 2xx
/// replies the body's own `outcome` decides; a value outside
/// success/failure/error is treated as an error but keeps the remote reason.
pub fn classify_response(row: usize, response: &FormResponse) -> SubmissionRecord {
    if !response.is_success() {
        return SubmissionRecord::error(row, response.status.to_string());
    }
    let parsed = match LeadResponse::parse(&response.body) {
        Ok(parsed) => parsed,
        Err(error) => return SubmissionRecord::error(row, error.to_string()),
    };
    let remote = parsed.outcome.as_deref().unwrap_or_default();
    let outcome = Outcome::from_remote(remote).unwrap_or_else(|| {
        warn!(row, outcome = remote, "unrecognized outcome in response");
        Outcome::Error
    });
    let lead_id = parsed.lead_id().to_string();
    SubmissionRecord::new(row, outcome, lead_id, parsed.reason.unwrap_or_default())
}
