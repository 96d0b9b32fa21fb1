//! Stored CV records: persistence, retrieval and export.

pub mod export;
pub mod handlers;
pub mod store;
