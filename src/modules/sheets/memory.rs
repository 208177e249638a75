//! In-memory [`SheetStore`] used by service and handler tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::core::error::{AppError, Result};
use crate::modules::sheets::store::{rows_from_values, SheetRow, SheetStore};

#[derive(Debug, Default)]
struct Table {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

#[derive(Default)]
pub struct MemorySheetStore {
    tables: Mutex<HashMap<String, Table>>,
    /// When set, reads return empty and writes fail, to exercise the
    /// fail-soft paths.
    unavailable: Mutex<bool>,
}

impl MemorySheetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a table with a header and data rows.
    pub fn seed(&self, table: &str, header: &[&str], rows: Vec<Vec<String>>) {
        let mut tables = self.tables.lock().unwrap();
        tables.insert(
            table.to_string(),
            Table {
                header: header.iter().map(|h| h.to_string()).collect(),
                rows,
            },
        );
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        *self.unavailable.lock().unwrap() = unavailable;
    }

    /// Raw cell access for assertions: (position, 0-based column).
    pub fn cell(&self, table: &str, position: u32, col: usize) -> String {
        let tables = self.tables.lock().unwrap();
        tables
            .get(table)
            .and_then(|t| t.rows.get(position as usize - 1))
            .and_then(|r| r.get(col))
            .cloned()
            .unwrap_or_default()
    }

    pub fn row_count(&self, table: &str) -> usize {
        let tables = self.tables.lock().unwrap();
        tables.get(table).map(|t| t.rows.len()).unwrap_or(0)
    }
}

#[async_trait]
impl SheetStore for MemorySheetStore {
    async fn fetch_all(&self, table: &str) -> Vec<SheetRow> {
        if *self.unavailable.lock().unwrap() {
            return Vec::new();
        }
        let tables = self.tables.lock().unwrap();
        let Some(t) = tables.get(table) else {
            return Vec::new();
        };
        let mut values = Vec::with_capacity(t.rows.len() + 1);
        values.push(t.header.clone());
        values.extend(t.rows.iter().cloned());
        rows_from_values(&values)
    }

    async fn append(&self, table: &str, values: Vec<String>) -> Result<u32> {
        if *self.unavailable.lock().unwrap() {
            return Err(AppError::ExternalServiceError("store unavailable".into()));
        }
        let mut tables = self.tables.lock().unwrap();
        let t = tables.entry(table.to_string()).or_default();
        t.rows.push(values);
        Ok(t.rows.len() as u32)
    }

    async fn update_range(
        &self,
        table: &str,
        position: u32,
        start_col: usize,
        values: Vec<String>,
    ) -> Result<()> {
        if *self.unavailable.lock().unwrap() {
            return Err(AppError::ExternalServiceError("store unavailable".into()));
        }
        let mut tables = self.tables.lock().unwrap();
        let t = tables
            .get_mut(table)
            .ok_or_else(|| AppError::ExternalServiceError(format!("no such table {}", table)))?;
        let row = t
            .rows
            .get_mut(position as usize - 1)
            .ok_or_else(|| AppError::ExternalServiceError(format!("no row {}", position)))?;
        if row.len() < start_col + values.len() {
            row.resize(start_col + values.len(), String::new());
        }
        for (i, v) in values.into_iter().enumerate() {
            row[start_col + i] = v;
        }
        Ok(())
    }

    async fn replace_all(
        &self,
        table: &str,
        header: Vec<String>,
        rows: Vec<Vec<String>>,
    ) -> Result<()> {
        if *self.unavailable.lock().unwrap() {
            return Err(AppError::ExternalServiceError("store unavailable".into()));
        }
        let mut tables = self.tables.lock().unwrap();
        tables.insert(table.to_string(), Table { header, rows });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_append_assigns_sequential_positions() {
        let store = MemorySheetStore::new();
        store.seed("t", &["a"], Vec::new());
        for i in 1..=5u32 {
            let pos = store.append("t", vec![format!("v{}", i)]).await.unwrap();
            assert_eq!(pos, i);
        }
    }

    #[tokio::test]
    async fn test_unavailable_reads_empty_writes_fail() {
        let store = MemorySheetStore::new();
        store.seed("t", &["a"], vec![vec!["x".into()]]);
        store.set_unavailable(true);
        assert!(store.fetch_all("t").await.is_empty());
        assert!(store.append("t", vec!["y".into()]).await.is_err());
    }

    #[tokio::test]
    async fn test_update_range_overwrites_contiguous_cells() {
        let store = MemorySheetStore::new();
        store.seed(
            "t",
            &["a", "b", "c"],
            vec![vec!["1".into(), "2".into(), "3".into()]],
        );
        store
            .update_range("t", 1, 1, vec!["x".into(), "y".into()])
            .await
            .unwrap();
        assert_eq!(store.cell("t", 1, 0), "1");
        assert_eq!(store.cell("t", 1, 1), "x");
        assert_eq!(store.cell("t", 1, 2), "y");
    }
}
