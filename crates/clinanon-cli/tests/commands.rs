use clinanon_cli::commands::{DetectionFormat, anonymize, read_mappings, restore};
use clinanon_cli::config::CliConfig;
use clinanon_core::models::entity::MappingPair;

const NOTE: &str = "Jane Smith attended with Dr. Wilson. Jane lives in Nelson.";

const LLM_PAYLOAD: &str = r#"```json
{
  "anonymized_text": "",
  "entities": [
    { "original": "Jane Smith", "replacement": "[CLIENT_A]", "type": "person_client", "positions": [[0, 10]] },
    { "original": "Dr. Wilson", "replacement": "[PROVIDER_A]", "type": "person_provider", "positions": [[25, 35]] },
    { "original": "Jane", "replacement": "[CLIENT_A]", "type": "person_client", "positions": [[37, 41]] },
    { "original": "Nelson", "replacement": "[LOCATION_A]", "type": "location", "positions": [[51, 57]] }
  ]
}
```"#;

#[test]
fn anonymize_llm_detections() {
    let doc = anonymize(&CliConfig::default(), NOTE, LLM_PAYLOAD, DetectionFormat::Llm, None).unwrap();

    assert_eq!(
        doc.anonymized_text,
        "[CLIENT_A_FIRST_LAST] attended with [PROVIDER_A]. [CLIENT_A_FIRST] lives in [LOCATION_A]."
    );
    assert!(doc.issues.is_empty());
    assert_eq!(doc.mappings.len(), 4);
}

#[test]
fn anonymize_recognizer_hits() {
    let hits = r#"[
        { "text": "Nelson", "type": "LOCATION", "start": 51, "end": 57, "confidence": 0.85 },
        { "text": "Jane Smith", "type": "PERSON", "start": 0, "end": 10, "confidence": 0.9 },
        { "text": "Jane", "type": "PERSON", "start": 0, "end": 4, "confidence": 0.6 }
    ]"#;
    let doc = anonymize(&CliConfig::default(), NOTE, hits, DetectionFormat::Recognizer, None).unwrap();

    assert_eq!(doc.entities.len(), 2);
    assert_eq!(doc.entities[0].original_text, "Jane Smith");
    assert_eq!(doc.entities[1].replacement_code, "[LOCATION_A]");
    assert!(doc.anonymized_text.ends_with("lives in [LOCATION_A]."));
}

#[test]
fn seeded_session_keeps_earlier_codes() {
    let seed = vec![
        MappingPair::new("Jane Smith", "[CLIENT_B_FIRST_LAST]"),
        MappingPair::new("Nelson", "[LOCATION_C]"),
    ];
    let doc = anonymize(
        &CliConfig::default(),
        NOTE,
        LLM_PAYLOAD,
        DetectionFormat::Llm,
        Some(&seed),
    )
    .unwrap();

    assert_eq!(
        doc.anonymized_text,
        "[CLIENT_B_FIRST_LAST] attended with [PROVIDER_A]. [CLIENT_B_FIRST] lives in [LOCATION_C]."
    );
}

#[test]
fn malformed_detections_are_rejected() {
    let result = anonymize(&CliConfig::default(), NOTE, "{ not json", DetectionFormat::Llm, None);
    assert!(result.is_err());
}

#[test]
fn restore_round_trips_the_document() {
    let doc = anonymize(&CliConfig::default(), NOTE, LLM_PAYLOAD, DetectionFormat::Llm, None).unwrap();
    let restored = restore(&doc.anonymized_text, &doc.mappings).unwrap();
    assert_eq!(restored, NOTE);
}

#[test]
fn mappings_file_is_read() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mappings.json");
    std::fs::write(
        &path,
        r#"[{ "original": "Nelson", "replacement": "[LOCATION_A]" }]"#,
    )
    .unwrap();

    let pairs = read_mappings(&path).unwrap();
    assert_eq!(pairs, vec![MappingPair::new("Nelson", "[LOCATION_A]")]);
    assert_eq!(restore("Back to [LOCATION_A].", &pairs).unwrap(), "Back to Nelson.");
}
