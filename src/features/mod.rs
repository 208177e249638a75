pub mod admin;
pub mod auth;
pub mod catalogs;
pub mod metrics;
pub mod tickets;
