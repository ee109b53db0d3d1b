//! clinanon-cli
//!
//! Driver for one anonymization session over files: loads the CLI config,
//! parses detector output, runs it through the mapping engine and writes
//! the anonymized document.

pub mod commands;
pub mod config;
