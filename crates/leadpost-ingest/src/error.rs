use thiserror::Error;

/// Errors raised while reading the input file. All of them are fatal.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("input has no header row")]
    Empty,
}

pub type Result<T> = std::result::Result<T, IngestError>;
