mod common;

use std::fs;

use leadpost_ingest::derive_schema;
use leadpost_model::{ConfigError, Outcome};
use leadpost_submit::{
    AuditLog, Destination, FormResponse, SubmissionEngine, TransportError, build_form,
};

use common::ScriptedPoster;

const FLOW: &str = "abc123abc123abc123abc123";
const SOURCE: &str = "def456def456def456def456";

fn row(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}

#[test]
fn composes_url_from_routing_columns() {
    let schema = derive_schema(&["Flow ID", "Source ID", "Email"]);
    let destination = Destination::parse("https://app.example.com").expect("valid url");
    let plan = destination.plan(&schema).expect("plan");
    assert_eq!(
        plan.url_for(&row(&[FLOW, SOURCE, "a@b.com"])),
        format!("https://app.example.com/flows/{FLOW}/sources/{SOURCE}/submit")
    );
}

#[test]
fn fully_qualified_url_needs_no_routing_columns() {
    let url = format!("https://app.example.com/flows/{FLOW}/sources/{SOURCE}/submit");
    let schema = derive_schema(&["Email"]);
    let destination = Destination::parse(&url).expect("valid url");
    let plan = destination.plan(&schema).expect("plan");
    assert_eq!(plan.url_for(&row(&["a@b.com"])), url);
    assert_eq!(plan.url_for(&row(&["other@b.com"])), url);
}

#[test]
fn base_url_without_routing_columns_is_rejected() {
    let schema = derive_schema(&["Email", "Flow ID"]);
    let destination = Destination::parse("https://app.example.com").expect("valid url");
    assert_eq!(
        destination.plan(&schema),
        Err(ConfigError::MissingRoutingColumns)
    );
}

#[test]
fn form_omits_empty_cells() {
    let schema = derive_schema(&["First Name", "Last Name", "Email"]);
    let form = build_form(&schema, &row(&["Ada", "", "ada@example.com"]));
    assert_eq!(
        form,
        vec![
            ("first_name".to_string(), "Ada".to_string()),
            ("email".to_string(), "ada@example.com".to_string()),
        ]
    );
    assert!(form.iter().all(|(_, value)| !value.is_empty()));
}

#[test]
fn form_keeps_last_value_for_repeated_names() {
    let schema = derive_schema(&["Email", "email", "Phone"]);
    let form = build_form(&schema, &row(&["a@b.com", "c@d.com", "555"]));
    assert_eq!(
        form,
        vec![
            ("email".to_string(), "c@d.com".to_string()),
            ("phone".to_string(), "555".to_string()),
        ]
    );
}

#[test]
fn classifies_each_reply_and_logs_every_row() {
    let dir = tempfile::tempdir().expect("temp dir");
    let log_path = dir.path().join("log.csv");
    let mut audit = AuditLog::at_path(&log_path);

    let schema = derive_schema(&["Flow ID", "Source ID", "Email"]);
    let plan = Destination::parse("https://app.example.com")
        .and_then(|destination| destination.plan(&schema))
        .expect("plan");
    let poster = ScriptedPoster::new(vec![
        Ok(FormResponse::new(
            201,
            r#"{"outcome":"success","reason":"","lead":{"id":"lead-1"},"price":2.5}"#,
        )),
        Ok(FormResponse::new(
            200,
            r#"{"outcome":"failure","reason":"invalid email","lead":{"id":""}}"#,
        )),
        Ok(FormResponse::new(503, "Service Unavailable")),
        Ok(FormResponse::new(200, "not json")),
        Err(TransportError("connection refused".to_string())),
        Ok(FormResponse::new(200, r#"{"outcome":"queued","reason":"later"}"#)),
    ]);
    let engine = SubmissionEngine::new(&poster, plan);

    let mut results = Vec::new();
    for number in 1..=6 {
        let cells = row(&[FLOW, SOURCE, &format!("user{number}@example.com")]);
        let submission = engine
            .submit_row(&schema, number, &cells, &mut audit)
            .expect("submit");
        results.push(submission);
    }
    audit.close().expect("close");

    let outcomes: Vec<Outcome> = results.iter().map(|s| s.record.outcome).collect();
    assert_eq!(
        outcomes,
        vec![
            Outcome::Success,
            Outcome::Failure,
            Outcome::Error,
            Outcome::Error,
            Outcome::Error,
            Outcome::Error,
        ]
    );
    assert_eq!(results[0].record.lead_id, "lead-1");
    assert_eq!(results[1].record.reason, "invalid email");
    assert_eq!(results[1].record.lead_id, "");
    assert_eq!(results[2].record.reason, "503");
    assert!(!results[3].record.reason.is_empty());
    assert_eq!(results[4].record.reason, "connection refused");
    assert_eq!(results[4].response_body, None);
    assert_eq!(results[5].record.reason, "later");

    let lines: Vec<u64> = results.iter().map(|s| s.line).collect();
    assert_eq!(lines, vec![1, 2, 3, 4, 5, 6]);

    let calls = poster.calls.borrow();
    assert_eq!(calls.len(), 6);
    assert_eq!(
        calls[0].0,
        format!("https://app.example.com/flows/{FLOW}/sources/{SOURCE}/submit")
    );
    assert!(calls[0].1.contains(&("flow_id".to_string(), FLOW.to_string())));

    let contents = fs::read_to_string(&log_path).expect("read log");
    let mut log_lines = contents.lines();
    assert_eq!(
        log_lines.next(),
        Some("import_line_num,import_outcome,import_lead_id,import_reason")
    );
    assert_eq!(log_lines.next(), Some("1,success,lead-1,"));
    assert_eq!(log_lines.next(), Some("2,failure,,invalid email"));
    assert_eq!(log_lines.next(), Some("3,error,,503"));
}

#[test]
fn unwritable_audit_log_stops_the_post() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut audit = AuditLog::at_path(dir.path().join("missing").join("log.csv"));
    let schema = derive_schema(&["Flow ID", "Source ID", "Email"]);
    let plan = Destination::parse("https://app.example.com")
        .and_then(|destination| destination.plan(&schema))
        .expect("plan");
    let poster = ScriptedPoster::default();
    let engine = SubmissionEngine::new(&poster, plan);

    let result = engine.submit_row(&schema, 1, &row(&[FLOW, SOURCE, "a@b.com"]), &mut audit);

    assert!(result.is_err());
    assert!(poster.calls.borrow().is_empty());
    assert_eq!(audit.lines(), 0);
}
