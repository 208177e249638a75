use std::collections::HashMap;

use async_trait::async_trait;

use crate::core::error::Result;

/// One data row of a backing table, keyed by trimmed header name.
///
/// `position` is the stable 1-based creation-order index of the row. The
/// physical row in the store is `position + 1` (header row offset); only the
/// store implementations deal in physical rows.
#[derive(Debug, Clone)]
pub struct SheetRow {
    pub position: u32,
    cells: HashMap<String, String>,
}

impl SheetRow {
    pub fn new(position: u32, cells: HashMap<String, String>) -> Self {
        Self { position, cells }
    }

    /// Cell value for a header name; missing cells read as empty, never null.
    pub fn get(&self, column: &str) -> &str {
        self.cells.get(column).map(String::as_str).unwrap_or("")
    }
}

/// Row/column-addressed access to a schemaless tabular store.
///
/// Reads fail soft: an empty result means "unknown/unavailable", not
/// "confirmed zero records". Writes are fallible and are the commit point
/// for every ticket mutation.
#[async_trait]
pub trait SheetStore: Send + Sync {
    /// Read the whole table. Header names are trimmed, fully-empty rows are
    /// dropped, missing cells default to "". Returns an empty Vec on any
    /// connectivity or auth failure.
    async fn fetch_all(&self, table: &str) -> Vec<SheetRow>;

    /// Append one row at the end, in the table's fixed column order.
    /// Returns the assigned position (= row count before append + 1).
    async fn append(&self, table: &str, values: Vec<String>) -> Result<u32>;

    /// Overwrite a contiguous column range of exactly one row. `start_col`
    /// is 0-based. The only supported partial mutation.
    async fn update_range(
        &self,
        table: &str,
        position: u32,
        start_col: usize,
        values: Vec<String>,
    ) -> Result<()>;

    /// Clear and rewrite an entire table. Reference-catalog editing only.
    async fn replace_all(
        &self,
        table: &str,
        header: Vec<String>,
        rows: Vec<Vec<String>>,
    ) -> Result<()>;
}

/// Build [`SheetRow`]s from a raw value grid (header row first).
///
/// Shared by the wire client and the in-memory store so both normalize
/// identically.
pub fn rows_from_values(values: &[Vec<String>]) -> Vec<SheetRow> {
    let Some((header, data)) = values.split_first() else {
        return Vec::new();
    };

    let header: Vec<String> = header.iter().map(|h| h.trim().to_string()).collect();

    let mut rows = Vec::new();
    for (idx, raw) in data.iter().enumerate() {
        if raw.iter().all(|c| c.trim().is_empty()) {
            continue;
        }
        let mut cells = HashMap::with_capacity(header.len());
        for (col, name) in header.iter().enumerate() {
            if name.is_empty() {
                continue;
            }
            let value = raw.get(col).cloned().unwrap_or_default();
            cells.insert(name.clone(), value);
        }
        rows.push(SheetRow::new(idx as u32 + 1, cells));
    }
    rows
}

/// A1 column letter for a 0-based column index ("A", "B", .., "Z", "AA", ..).
pub fn column_letter(index: usize) -> String {
    let mut n = index + 1;
    let mut out = String::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        out.insert(0, (b'A' + rem as u8) as char);
        n = (n - 1) / 26;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_rows_from_values_trims_headers_and_fills_missing() {
        let values = grid(&[&[" wo ", "sn"], &["W1"]]);
        let rows = rows_from_values(&values);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].position, 1);
        assert_eq!(rows[0].get("wo"), "W1");
        assert_eq!(rows[0].get("sn"), "");
    }

    #[test]
    fn test_rows_from_values_drops_fully_empty_rows() {
        let values = grid(&[&["wo", "sn"], &["", " "], &["W2", "S2"]]);
        let rows = rows_from_values(&values);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("wo"), "W2");
    }

    #[test]
    fn test_rows_from_values_empty_grid() {
        assert!(rows_from_values(&[]).is_empty());
    }

    #[test]
    fn test_column_letter() {
        assert_eq!(column_letter(0), "A");
        assert_eq!(column_letter(25), "Z");
        assert_eq!(column_letter(26), "AA");
        assert_eq!(column_letter(20), "U");
    }
}
