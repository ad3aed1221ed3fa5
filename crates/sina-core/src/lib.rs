//! sina-core
//!
//! Pure domain types for longitudinal psychiatric assessment records.
//! No I/O: this is the shared vocabulary the scoring and timeline crates
//! build on, plus ingestion of the stored record document shape.

pub mod catalog;
pub mod error;
pub mod ingest;
pub mod models;
pub mod records;
