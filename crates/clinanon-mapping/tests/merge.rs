use clinanon_core::models::entity_type::EntityType;
use clinanon_core::models::name_variant::NameVariant;
use clinanon_mapping::{MappingError, MappingTable, MergeOutcome};

#[test]
fn merge_binds_detected_variant() {
    let mut table = MappingTable::new();
    table.get_or_create_code("Aroha Ngata", EntityType::PersonClient);
    table.get_or_create_code("Ms Ngata", EntityType::PersonOther);

    let outcome = table.try_merge("Ms Ngata", "Aroha Ngata").unwrap();
    assert_eq!(
        outcome,
        MergeOutcome::Success {
            code: "[CLIENT_A_FORMAL]".to_string(),
            variant: NameVariant::Formal,
        }
    );
    assert_eq!(table.code_for("ms ngata"), Some("[CLIENT_A_FORMAL]"));
    assert!(table.person("CLIENT_A").is_some());
}

#[test]
fn merge_creates_person_on_demand() {
    let mut table = MappingTable::new();
    table.get_or_create_code("Hemi Parata", EntityType::PersonClient);
    assert!(table.persons().is_empty());

    table.try_merge("Hemi", "Hemi Parata").unwrap();
    let person = table.person("CLIENT_A").unwrap();
    assert_eq!(person.first, "Hemi");
    assert_eq!(person.last, "Parata");
}

#[test]
fn merge_does_not_guess_nicknames() {
    let mut table = MappingTable::new();
    table.get_or_create_variant_code("Ronald Weasley", EntityType::PersonOther, None);
    table.get_or_create_code("Ronnie", EntityType::Numeric);

    let outcome = table.try_merge("Ronnie", "Ronald Weasley").unwrap();
    assert_eq!(
        outcome,
        MergeOutcome::VariantNotDetected {
            base_id: "PERSON_A".to_string(),
            primary_code: "[PERSON_A_FIRST_LAST]".to_string(),
        }
    );
    assert_eq!(table.code_for("Ronnie"), Some("[NUM_A]"));
}

#[test]
fn complete_merge_uses_chosen_variant() {
    let mut table = MappingTable::new();
    table.get_or_create_variant_code("Ronald Weasley", EntityType::PersonOther, None);

    let code = table
        .complete_merge_with_variant("Ronnie", "Ronald Weasley", NameVariant::First)
        .unwrap();
    assert_eq!(code, "[PERSON_A_FIRST]");
    assert_eq!(table.code_for("ronnie"), Some("[PERSON_A_FIRST]"));
}

#[test]
fn merge_requires_mapped_primary() {
    let mut table = MappingTable::new();
    let err = table.try_merge("Jane", "Jane Smith").unwrap_err();
    assert!(matches!(err, MappingError::PrimaryNotFound(p) if p == "Jane Smith"));
}

#[test]
fn merge_requires_person_primary() {
    let mut table = MappingTable::new();
    table.get_or_create_code("Taupo", EntityType::Location);
    let err = table
        .complete_merge_with_variant("Lake Taupo", "Taupo", NameVariant::Full)
        .unwrap_err();
    assert!(matches!(err, MappingError::NoBaseId(code) if code == "[LOCATION_A]"));
}

#[test]
fn merges_never_reuse_counters() {
    let mut table = MappingTable::new();
    table.get_or_create_code("Jane Smith", EntityType::PersonClient);
    table.get_or_create_code("J. Smith", EntityType::PersonClient);
    table
        .complete_merge_with_variant("J. Smith", "Jane Smith", NameVariant::Full)
        .unwrap();

    let next = table.get_or_create_code("Mere Eruera", EntityType::PersonClient);
    assert_eq!(next, "[CLIENT_C]");
}

#[test]
fn update_person_structure_rewrites_variant_entries() {
    let mut table = MappingTable::new();
    table.get_or_create_variant_code("Sean Versteegh", EntityType::PersonClient, None);

    table
        .update_person_structure(
            "[CLIENT_A_FIRST_LAST]",
            "Sean",
            Some("Michael"),
            "Versteegh",
            Some("dr."),
        )
        .unwrap();

    let person = table.person("CLIENT_A").unwrap();
    assert_eq!(person.full, "Sean Michael Versteegh");
    assert_eq!(person.detected_title.as_deref(), Some("Dr"));

    assert_eq!(table.code_for("Sean Michael Versteegh"), Some("[CLIENT_A]"));
    assert_eq!(table.code_for("Sean Michael"), Some("[CLIENT_A_FIRST_MIDDLE]"));
    assert_eq!(table.code_for("Sean Versteegh"), Some("[CLIENT_A_FIRST_LAST]"));
    assert_eq!(table.code_for("Michael"), Some("[CLIENT_A_MIDDLE]"));
    assert_eq!(table.code_for("Versteegh"), Some("[CLIENT_A_LAST]"));
    assert_eq!(table.code_for("Dr Versteegh"), Some("[CLIENT_A_FORMAL]"));
    assert_eq!(table.persons().len(), 1);
}

#[test]
fn update_person_structure_keeps_full_for_two_token_names() {
    let mut table = MappingTable::new();
    table.get_or_create_code("Jane Smith", EntityType::PersonClient);
    table
        .update_person_structure("[CLIENT_A]", "Jane", None, "Smyth", None)
        .unwrap();

    assert_eq!(table.code_for("Jane Smyth"), Some("[CLIENT_A]"));
    assert_eq!(table.code_for("Jane"), Some("[CLIENT_A_FIRST]"));
    assert_eq!(table.code_for("Mr Smyth"), None);
    assert_eq!(table.code_for("Jane Smith"), Some("[CLIENT_A]"));
}

#[test]
fn update_person_structure_rejects_unknown_codes() {
    let mut table = MappingTable::new();
    let err = table
        .update_person_structure("[CLIENT_Q]", "Jane", None, "Smith", None)
        .unwrap_err();
    assert!(matches!(err, MappingError::CodeNotFound(_)));

    let err = table
        .update_person_structure("[BOGUS]", "Jane", None, "Smith", None)
        .unwrap_err();
    assert!(matches!(err, MappingError::Core(_)));
}
