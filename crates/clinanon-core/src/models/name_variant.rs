use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// The textual forms a person's name can take in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum NameVariant {
    /// Every component, e.g. "Sean Michael Versteegh".
    Full,
    FirstLast,
    First,
    Last,
    Middle,
    FirstMiddle,
    /// Title plus surname, e.g. "Dr Versteegh".
    Formal,
}

impl NameVariant {
    pub const ALL: [NameVariant; 7] = [
        NameVariant::Full,
        NameVariant::FirstLast,
        NameVariant::First,
        NameVariant::Last,
        NameVariant::Middle,
        NameVariant::FirstMiddle,
        NameVariant::Formal,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            NameVariant::Full => "Full name",
            NameVariant::FirstLast => "First and last name",
            NameVariant::First => "First name",
            NameVariant::Last => "Last name",
            NameVariant::Middle => "Middle name",
            NameVariant::FirstMiddle => "First and middle name",
            NameVariant::Formal => "Title and last name",
        }
    }

    /// Suffix appended to a person's base ID inside a placeholder code.
    /// The full name uses the bare base code.
    pub fn code_suffix(&self) -> &'static str {
        match self {
            NameVariant::Full => "",
            NameVariant::FirstLast => "_FIRST_LAST",
            NameVariant::First => "_FIRST",
            NameVariant::Last => "_LAST",
            NameVariant::Middle => "_MIDDLE",
            NameVariant::FirstMiddle => "_FIRST_MIDDLE",
            NameVariant::Formal => "_FORMAL",
        }
    }

    pub fn from_suffix(suffix: &str) -> Option<NameVariant> {
        Self::ALL.into_iter().find(|v| v.code_suffix() == suffix)
    }
}

impl std::fmt::Display for NameVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}
