use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Client classification driving which fields and identification rules apply
/// during intake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Individual,
    Company,
    Partnership,
    SoleTrader,
    Ngo,
}

impl EntityType {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Individual,
            Self::Company,
            Self::Partnership,
            Self::SoleTrader,
            Self::Ngo,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Individual => "Individual",
            Self::Company => "Company",
            Self::Partnership => "Partnership",
            Self::SoleTrader => "Sole Trader",
            Self::Ngo => "NGO",
        }
    }

    pub const fn is_individual(self) -> bool {
        matches!(self, Self::Individual)
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|tag| tag.key() == raw)
    }
}

/// Department handling a booking request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Department {
    TaxAdvisory,
    Immigration,
    CorporateServices,
}

impl Department {
    pub const fn ordered() -> [Self; 3] {
        [Self::TaxAdvisory, Self::Immigration, Self::CorporateServices]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::TaxAdvisory => "Tax Advisory",
            Self::Immigration => "Immigration",
            Self::CorporateServices => "Corporate Services",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|tag| tag.key() == raw)
    }
}

/// A tag the catalog can key common requirements by.
pub trait CatalogTag: Copy + Eq + std::fmt::Debug {
    fn key(self) -> &'static str;
}

impl CatalogTag for EntityType {
    fn key(self) -> &'static str {
        match self {
            Self::Individual => "individual",
            Self::Company => "company",
            Self::Partnership => "partnership",
            Self::SoleTrader => "sole_trader",
            Self::Ngo => "ngo",
        }
    }
}

impl CatalogTag for Department {
    fn key(self) -> &'static str {
        match self {
            Self::TaxAdvisory => "tax_advisory",
            Self::Immigration => "immigration",
            Self::CorporateServices => "corporate_services",
        }
    }
}

/// A scalar value stored against a field name.
///
/// Untagged so the API layer accepts plain JSON scalars. The variant order
/// matters: booleans bind first, then ISO dates, then any other string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Flag(bool),
    Date(NaiveDate),
    Text(String),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }
}

/// Accumulated field state for one wizard run.
///
/// Fields are written unconditionally and only interpreted when a step rule
/// reads them; an unvisited step's fields are simply absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionData(BTreeMap<String, FieldValue>);

impl SessionData {
    pub fn set(&mut self, name: impl Into<String>, value: FieldValue) {
        self.0.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<FieldValue> {
        self.0.remove(name)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Text content of a field, when it holds text.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(FieldValue::as_text)
    }

    /// Character length of a text field; absent or non-text fields count 0.
    pub fn text_len(&self, name: &str) -> usize {
        self.text(name).map(|value| value.chars().count()).unwrap_or(0)
    }

    /// Whether a field carries a usable value: non-empty text, or any flag
    /// or date.
    pub fn is_present(&self, name: &str) -> bool {
        match self.0.get(name) {
            Some(FieldValue::Text(value)) => !value.is_empty(),
            Some(FieldValue::Flag(_)) | Some(FieldValue::Date(_)) => true,
            None => false,
        }
    }
}

/// A named document the entity must eventually supply.
///
/// Identity within a resolved set is `name` alone, case-sensitive; the
/// `document_type` and `required` flag ride along with whichever catalog
/// entry defines the name first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementEntry {
    pub name: String,
    pub document_type: String,
    pub required: bool,
}

impl RequirementEntry {
    pub fn new(name: impl Into<String>, document_type: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            document_type: document_type.into(),
            required,
        }
    }
}

/// Failures the session reports to its caller. Never crosses the boundary
/// as a panic; callers surface their own user-facing messages.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    #[error("step {step} is not satisfied")]
    StepInvalid { step: u8 },
    #[error("session is at step {step}, not the final step")]
    NotAtFinalStep { step: u8 },
}
