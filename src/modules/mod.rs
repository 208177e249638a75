//! Modules layer - Infrastructure components for external integrations
//!
//! Contains adapters for the spreadsheet backing store, image evidence
//! encoding, and the outbound notification channel.

pub mod imaging;
pub mod notify;
pub mod sheets;
