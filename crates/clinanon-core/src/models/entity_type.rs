use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// The closed set of PII categories a mention can belong to.
///
/// Serialized names match the labels the detection collaborator emits
/// (`person_client`, `date`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum EntityType {
    /// The client the clinical note is about.
    PersonClient,
    /// Clinicians, therapists, GPs.
    PersonProvider,
    /// Family members, friends, anyone else named.
    PersonOther,
    Date,
    Location,
    Organization,
    /// Record numbers, NHI numbers, policy numbers.
    Identifier,
    /// Phone numbers and email addresses.
    Contact,
    /// Catch-all for numeric identifiers the recognizers could not classify.
    Numeric,
}

impl EntityType {
    pub const ALL: [EntityType; 9] = [
        EntityType::PersonClient,
        EntityType::PersonProvider,
        EntityType::PersonOther,
        EntityType::Date,
        EntityType::Location,
        EntityType::Organization,
        EntityType::Identifier,
        EntityType::Contact,
        EntityType::Numeric,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            EntityType::PersonClient => "Client",
            EntityType::PersonProvider => "Provider",
            EntityType::PersonOther => "Other Person",
            EntityType::Date => "Date",
            EntityType::Location => "Location",
            EntityType::Organization => "Organization",
            EntityType::Identifier => "Identifier",
            EntityType::Contact => "Contact",
            EntityType::Numeric => "Number",
        }
    }

    /// Prefix used inside placeholder codes, e.g. `CLIENT` in `[CLIENT_A]`.
    /// Never contains an underscore.
    pub fn prefix(&self) -> &'static str {
        match self {
            EntityType::PersonClient => "CLIENT",
            EntityType::PersonProvider => "PROVIDER",
            EntityType::PersonOther => "PERSON",
            EntityType::Date => "DATE",
            EntityType::Location => "LOCATION",
            EntityType::Organization => "ORG",
            EntityType::Identifier => "ID",
            EntityType::Contact => "CONTACT",
            EntityType::Numeric => "NUM",
        }
    }

    pub fn is_person(&self) -> bool {
        matches!(
            self,
            EntityType::PersonClient | EntityType::PersonProvider | EntityType::PersonOther
        )
    }

    pub fn from_prefix(prefix: &str) -> Option<EntityType> {
        Self::ALL.into_iter().find(|t| t.prefix() == prefix)
    }

    /// Map a free-text detector label onto the closed taxonomy.
    ///
    /// Labels are compared after trimming, lowercasing, and folding `-` and
    /// spaces to `_`.
    pub fn from_label(label: &str) -> Result<EntityType, CoreError> {
        let normalized: String = label
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c == '-' || c == ' ' { '_' } else { c })
            .collect();

        let entity_type = match normalized.as_str() {
            "person_client" | "client" => EntityType::PersonClient,
            "person_provider" | "provider" => EntityType::PersonProvider,
            "person_other" | "other_person" | "person" => EntityType::PersonOther,
            "date" => EntityType::Date,
            "location" | "address" => EntityType::Location,
            "organization" | "organisation" => EntityType::Organization,
            "identifier" | "id" => EntityType::Identifier,
            "contact" | "phone" | "email" => EntityType::Contact,
            "numeric" | "number" => EntityType::Numeric,
            _ => return Err(CoreError::UnknownEntityType(label.to_string())),
        };
        Ok(entity_type)
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}
