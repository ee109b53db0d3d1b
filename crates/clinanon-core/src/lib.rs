//! clinanon-core
//!
//! Pure domain types and placeholder code conventions.
//! No I/O; this is the shared vocabulary of the anonymization engine, the
//! detection integration layer, and the UI bindings.

pub mod codes;
pub mod error;
pub mod models;
