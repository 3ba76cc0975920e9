//! Canonical field names derived from the header row.

use leadpost_model::{FLOW_ID_FIELD, FieldSchema, SOURCE_ID_FIELD};

/// Lowercase a column label and replace each space with an underscore.
pub fn normalize_field_name(label: &str) -> String {
    label.to_lowercase().replace(' ', "_")
}

/// Build the [`FieldSchema`] for a header row.
///
/// The routing columns are located by exact match on the normalized name.
/// When a name repeats, the last occurrence wins.
pub fn derive_schema<S: AsRef<str>>(headers: &[S]) -> FieldSchema {
    let mut schema = FieldSchema {
        names: Vec::with_capacity(headers.len()),
        ..FieldSchema::default()
    };
    for (index, label) in headers.iter().enumerate() {
        let name = normalize_field_name(label.as_ref());
        if name == FLOW_ID_FIELD {
            schema.flow_id_column = Some(index);
        } else if name == SOURCE_ID_FIELD {
            schema.source_id_column = Some(index);
        }
        schema.names.push(name);
    }
    schema
}
