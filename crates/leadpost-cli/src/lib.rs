//! CLI library components for the lead importer.

pub mod import;
pub mod logging;
pub mod preview;
pub mod summary;
pub mod types;
