use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use leadpost_model::Dataset;

use crate::error::{IngestError, Result};

fn normalize_header_cell(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}').to_string()
}

/// Read a comma-separated file into a [`Dataset`].
///
/// The first record is always the header, even when no data rows follow.
pub fn read_dataset(path: &Path) -> Result<Dataset> {
    let file = File::open(path)?;
    let dataset = read_dataset_from_reader(file)?;
    debug!(
        path = %path.display(),
        columns = dataset.headers.len(),
        rows = dataset.row_count(),
        "read input file"
    );
    Ok(dataset)
}

/// Read comma-separated values from any byte stream.
///
/// Rows whose cell count differs from the header are rejected, as is a
/// stream with no header at all. Cell values are kept verbatim.
pub fn read_dataset_from_reader<R: Read>(input: R) -> Result<Dataset> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(input);
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(normalize_header_cell)
        .collect();
    if headers.is_empty() {
        return Err(IngestError::Empty);
    }
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(Dataset::new(headers, rows))
}
