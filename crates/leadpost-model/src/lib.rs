pub mod dataset;
pub mod error;
pub mod outcome;
pub mod schema;

pub use dataset::Dataset;
pub use error::ConfigError;
pub use outcome::{Outcome, RunStats, SubmissionRecord};
pub use schema::{FLOW_ID_FIELD, FieldSchema, SOURCE_ID_FIELD};
