//! Tabular store adapter
//!
//! Translates entity-level operations into row/column-addressed operations
//! against a spreadsheet-style backing store with no native schema or
//! transactions.

mod client;
#[cfg(test)]
pub mod memory;
mod store;

pub use client::SheetsClient;
pub use store::{column_letter, rows_from_values, SheetRow, SheetStore};
