//! Parsed input file: one header row plus positionally aligned data rows.

/// A tabular input file.
///
/// Every row in `rows` has exactly `headers.len()` cells; the reader rejects
/// ragged input before a `Dataset` is ever built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Dataset {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Number of data rows (the header is never counted).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Look up a data row by its 1-based row number.
    pub fn row(&self, number: usize) -> Option<&[String]> {
        number
            .checked_sub(1)
            .and_then(|index| self.rows.get(index))
            .map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_numbers_are_one_based() {
        let dataset = Dataset::new(
            vec!["email".to_string()],
            vec![vec!["a@b.com".to_string()], vec!["c@d.com".to_string()]],
        );
        assert_eq!(dataset.row(0), None);
        assert_eq!(dataset.row(1), Some(&["a@b.com".to_string()][..]));
        assert_eq!(dataset.row(2), Some(&["c@d.com".to_string()][..]));
        assert_eq!(dataset.row(3), None);
        assert_eq!(dataset.row_count(), 2);
    }
}
