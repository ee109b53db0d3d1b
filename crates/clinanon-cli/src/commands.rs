use std::path::Path;

use tracing::{info, warn};

use clinanon_core::models::entity::MappingPair;
use clinanon_detect::assign::{AnonymizedDocument, anonymize_document};
use clinanon_detect::candidates::Candidate;
use clinanon_detect::response::{parse_recognizer_hits, parse_response};
use clinanon_mapping::MappingTable;

use crate::config::CliConfig;

/// Which detector produced the detections file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum DetectionFormat {
    /// The LLM detector's JSON object, optionally inside a code fence.
    Llm,
    /// A flat JSON array of pattern recognizer hits.
    Recognizer,
}

/// Anonymize `text` in a fresh session, optionally seeded with the pairs
/// exported by an earlier one.
pub fn anonymize(
    config: &CliConfig,
    text: &str,
    detections: &str,
    format: DetectionFormat,
    seed: Option<&[MappingPair]>,
) -> eyre::Result<AnonymizedDocument> {
    let mut table = MappingTable::with_options(config.mapping);
    if let Some(pairs) = seed {
        table.import_mappings(pairs)?;
    }

    let candidates: Vec<Candidate> = match format {
        DetectionFormat::Llm => parse_response(detections)?.into_candidates()?,
        DetectionFormat::Recognizer => parse_recognizer_hits(detections)?,
    };

    let document = anonymize_document(&mut table, text, &candidates)?;
    for issue in &document.issues {
        warn!(
            kind = ?issue.kind,
            entity_index = issue.entity_index,
            start = issue.range.0,
            end = issue.range.1,
            "detector position issue"
        );
    }
    Ok(document)
}

/// Replace known placeholders in `text` with their original values.
pub fn restore(text: &str, pairs: &[MappingPair]) -> eyre::Result<String> {
    let mut table = MappingTable::new();
    let imported = table.import_mappings(pairs)?;
    info!(imported, "restoring document");
    Ok(table.restore(text))
}

/// Read an exported mappings file: a JSON array of
/// `{"original": ..., "replacement": ...}` objects.
pub fn read_mappings(path: &Path) -> eyre::Result<Vec<MappingPair>> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read mappings at {}: {e}", path.display()))?;
    let pairs: Vec<MappingPair> = serde_json::from_str(&contents)?;
    Ok(pairs)
}
