//! clinanon-detect
//!
//! Integration layer between the PII detectors and the mapping engine.
//! Parses detector payloads, checks them against the source text, feeds
//! candidate mentions to a [`clinanon_mapping::MappingTable`] and renders
//! the anonymized document.

pub mod assign;
pub mod candidates;
pub mod error;
pub mod response;
pub mod text;
pub mod validate;
