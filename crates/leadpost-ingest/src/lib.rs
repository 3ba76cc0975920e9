pub mod csv_table;
pub mod error;
pub mod fields;

pub use csv_table::{read_dataset, read_dataset_from_reader};
pub use error::{IngestError, Result};
pub use fields::{derive_schema, normalize_field_name};
