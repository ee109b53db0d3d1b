use clinanon_core::models::entity::MappingPair;
use clinanon_core::models::entity_type::EntityType;
use clinanon_core::models::name_variant::NameVariant;
use clinanon_core::models::validation::IssueKind;
use clinanon_detect::assign::{anonymize_document, assign_batch};
use clinanon_detect::candidates::Candidate;
use clinanon_detect::error::IngestError;
use clinanon_detect::response::parse_response;
use clinanon_detect::validate::validate_entities;
use clinanon_mapping::MappingTable;

const NOTE: &str = "Jane Smith attended with her mother. Dr. Wilson reviewed Jane on 3 March in Nelson.";

fn candidates() -> Vec<Candidate> {
    vec![
        Candidate::new("Jane Smith", EntityType::PersonClient).at(0, 10),
        Candidate::new("Dr. Wilson", EntityType::PersonProvider).at(37, 47),
        Candidate::new("Jane", EntityType::PersonClient).at(57, 61),
        Candidate::new("3 March", EntityType::Date).at(65, 72),
        Candidate::new("Nelson", EntityType::Location).at(76, 82),
    ]
}

#[test]
fn batch_assigns_codes_in_order() {
    let mut table = MappingTable::new();
    let entities = assign_batch(&mut table, &candidates()).unwrap();

    let codes: Vec<_> = entities.iter().map(|e| e.replacement_code.as_str()).collect();
    assert_eq!(
        codes,
        vec![
            "[CLIENT_A_FIRST_LAST]",
            "[PROVIDER_A]",
            "[CLIENT_A_FIRST]",
            "[DATE_A]",
            "[LOCATION_A]"
        ]
    );
    assert_eq!(entities[2].name_variant, Some(NameVariant::First));
    assert_eq!(entities[1].name_variant, None);
    assert_eq!(entities[0].positions, vec![(0, 10)]);
}

#[test]
fn rejected_batch_leaves_table_untouched() {
    let mut table = MappingTable::new();
    let mut batch = candidates();
    batch.push(Candidate::new("  ", EntityType::Location).at(0, 0));

    let err = assign_batch(&mut table, &batch).unwrap_err();
    assert!(matches!(
        err,
        IngestError::MissingRequiredField { index: 5, field: "original" }
    ));
    assert!(table.entries().is_empty());
}

#[test]
fn document_is_anonymized_end_to_end() {
    let mut table = MappingTable::new();
    let doc = anonymize_document(&mut table, NOTE, &candidates()).unwrap();

    assert_eq!(
        doc.anonymized_text,
        "[CLIENT_A_FIRST_LAST] attended with her mother. [PROVIDER_A] reviewed [CLIENT_A_FIRST] on [DATE_A] in [LOCATION_A]."
    );
    assert!(doc.issues.is_empty());
    assert_eq!(doc.mappings.len(), 5);
    assert!(doc.mappings.contains(&MappingPair::new("Dr. Wilson", "[PROVIDER_A]")));
}

#[test]
fn approximate_positions_are_relocated() {
    let mut table = MappingTable::new();
    let batch = vec![Candidate::new("Nelson", EntityType::Location).at(70, 76)];
    let doc = anonymize_document(&mut table, NOTE, &batch).unwrap();

    assert_eq!(doc.entities[0].positions, vec![(76, 82)]);
    assert_eq!(doc.issues.len(), 1);
    assert_eq!(doc.issues[0].kind, IssueKind::TextMismatch);
    assert!(doc.anonymized_text.ends_with("in [LOCATION_A]."));
}

#[test]
fn nested_mention_keeps_only_its_own_positions() {
    let text = "Jane Smith attended. Dr. Wilson reviewed Jane.";
    let batch = vec![
        Candidate::new("Jane Smith", EntityType::PersonClient).at(0, 10),
        Candidate::new("Dr. Wilson", EntityType::PersonProvider).at(21, 31),
        Candidate::new("Jane", EntityType::PersonClient).at(41, 45),
    ];
    let mut table = MappingTable::new();
    let doc = anonymize_document(&mut table, text, &batch).unwrap();

    assert_eq!(doc.entities[0].positions, vec![(0, 10)]);
    assert_eq!(doc.entities[1].positions, vec![(21, 31)]);
    assert_eq!(doc.entities[2].positions, vec![(41, 45)]);
    assert!(validate_entities(text, &doc.entities).is_empty());
    assert_eq!(
        doc.anonymized_text,
        "[CLIENT_A_FIRST_LAST] attended. [PROVIDER_A] reviewed [CLIENT_A_FIRST]."
    );
}

#[test]
fn repeated_entity_text_is_claimed_once() {
    let text = "Nelson to Nelson.";
    let batch = vec![
        Candidate::new("Nelson", EntityType::Location).at(0, 6),
        Candidate::new("nelson", EntityType::Location).at(10, 16),
    ];
    let mut table = MappingTable::new();
    let doc = anonymize_document(&mut table, text, &batch).unwrap();

    assert_eq!(doc.entities[0].positions, vec![(0, 6), (10, 16)]);
    assert!(doc.entities[1].positions.is_empty());
    assert!(validate_entities(text, &doc.entities).is_empty());
    assert_eq!(doc.anonymized_text, "[LOCATION_A] to [LOCATION_A].");
}

#[test]
fn later_documents_reuse_session_codes() {
    let mut table = MappingTable::new();
    anonymize_document(&mut table, NOTE, &candidates()).unwrap();

    let follow_up = "Jane and Dr. Wilson spoke again.";
    let batch = vec![
        Candidate::new("Jane", EntityType::PersonClient).at(0, 4),
        Candidate::new("Dr. Wilson", EntityType::PersonProvider).at(9, 19),
    ];
    let doc = anonymize_document(&mut table, follow_up, &batch).unwrap();
    assert_eq!(
        doc.anonymized_text,
        "[CLIENT_A_FIRST] and [PROVIDER_A] spoke again."
    );
}

#[test]
fn llm_payload_flows_through_engine() {
    let payload = r#"```json
{
  "anonymized_text": "[CLIENT_A] saw [PROVIDER_A].",
  "entities": [
    { "original": "Ronald Weasley", "replacement": "[CLIENT_A]", "type": "person_client", "positions": [[0, 14]] },
    { "original": "Ron", "replacement": "[CLIENT_B]", "type": "person_client", "positions": [[28, 31]] }
  ]
}
```"#;
    let text = "Ronald Weasley was anxious. Ron later settled.";
    let candidates = parse_response(payload).unwrap().into_candidates().unwrap();

    let mut table = MappingTable::new();
    let doc = anonymize_document(&mut table, text, &candidates).unwrap();
    assert_eq!(
        doc.anonymized_text,
        "[CLIENT_A_FIRST_LAST] was anxious. [CLIENT_A_FIRST] later settled."
    );
}
