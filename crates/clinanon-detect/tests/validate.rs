use clinanon_core::models::entity_type::EntityType;
use clinanon_core::models::validation::IssueKind;
use clinanon_detect::candidates::Candidate;
use clinanon_detect::validate::{validate_candidates, validate_entities};

const NOTE: &str = "Jane Smith saw Dr. Wilson in Nelson.";

#[test]
fn clean_batch_has_no_issues() {
    let candidates = vec![
        Candidate::new("Jane Smith", EntityType::PersonClient).at(0, 10),
        Candidate::new("Dr. Wilson", EntityType::PersonProvider).at(15, 25),
        Candidate::new("nelson", EntityType::Location).at(29, 35),
    ];
    assert!(validate_candidates(NOTE, &candidates).is_empty());
}

#[test]
fn bad_ranges_are_reported_not_thrown() {
    let candidates = vec![
        Candidate::new("Jane Smith", EntityType::PersonClient).at(4, 4),
        Candidate::new("Dr. Wilson", EntityType::PersonProvider).at(25, 15),
        Candidate::new("Nelson", EntityType::Location).at(29, 80),
        Candidate::new("Nelson", EntityType::Location).at(28, 34),
    ];
    let kinds: Vec<_> = validate_candidates(NOTE, &candidates)
        .into_iter()
        .map(|i| (i.kind, i.entity_index))
        .collect();
    assert_eq!(
        kinds,
        vec![
            (IssueKind::EmptyRange, 0),
            (IssueKind::NonMonotonic, 1),
            (IssueKind::OutOfBounds, 2),
            (IssueKind::TextMismatch, 3),
        ]
    );
}

#[test]
fn overlaps_name_both_entities() {
    let candidates = vec![
        Candidate::new("Jane Smith", EntityType::PersonClient).at(0, 10),
        Candidate::new("Smith", EntityType::PersonClient).at(5, 10),
    ];
    let issues = validate_candidates(NOTE, &candidates);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].kind, IssueKind::Overlap);
    assert_eq!(issues[0].entity_index, 1);
    assert_eq!(issues[0].other_index, Some(0));
    assert_eq!(issues[0].range, (5, 10));
}

#[test]
fn positions_count_characters_not_bytes() {
    let note = "Mere Tūhoe lives in Ōtaki.";
    let candidates = vec![
        Candidate::new("Mere Tūhoe", EntityType::PersonClient).at(0, 10),
        Candidate::new("Ōtaki", EntityType::Location).at(20, 25),
    ];
    assert!(validate_candidates(note, &candidates).is_empty());
}

#[test]
fn entities_validate_like_candidates() {
    let entity = clinanon_core::models::entity::Entity::new("Nelson", "[LOCATION_A]", EntityType::Location)
        .with_positions(vec![(29, 35), (100, 106)]);
    let issues = validate_entities(NOTE, &[entity]);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].kind, IssueKind::OutOfBounds);
}
