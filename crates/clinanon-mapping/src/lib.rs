//! clinanon-mapping
//!
//! The session-scoped entity mapping engine. Turns detected mentions into
//! stable placeholder codes and keeps every variant of a person's name
//! (full name, first name, title plus surname, ...) in the same placeholder
//! family.
//!
//! The engine is single-writer and synchronous. It performs no I/O and holds
//! no locks; callers that share a [`MappingTable`] across threads wrap it in
//! their own mutex.

pub mod component;
pub mod error;
pub mod export;
pub mod merge;
pub mod person;
pub mod restore;
pub mod table;

pub use error::MappingError;
pub use merge::MergeOutcome;
pub use person::PersonRecord;
pub use table::{MappingEntry, MappingOptions, MappingTable, SessionStats};
