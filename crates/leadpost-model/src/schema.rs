/// Normalized name of the column carrying the per-row flow identifier.
pub const FLOW_ID_FIELD: &str = "flow_id";

/// Normalized name of the column carrying the per-row source identifier.
pub const SOURCE_ID_FIELD: &str = "source_id";

/// Field names derived from the header row, computed once per run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSchema {
    /// Normalized field names, in header order.
    pub names: Vec<String>,
    /// Index of the `flow_id` column, if the header has one.
    pub flow_id_column: Option<usize>,
    /// Index of the `source_id` column, if the header has one.
    pub source_id_column: Option<usize>,
}

impl FieldSchema {
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Both routing columns are present, so base URLs can be composed per row.
    pub fn has_routing_columns(&self) -> bool {
        self.flow_id_column.is_some() && self.source_id_column.is_some()
    }
}
