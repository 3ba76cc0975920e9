use thiserror::Error;

/// Startup configuration problems. All of these abort the run before any
/// row is submitted.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid URL: {0:?}")]
    InvalidUrl(String),
    #[error("required submission info 'flow_id' and 'source_id' not found in URL or CSV")]
    MissingRoutingColumns,
}
