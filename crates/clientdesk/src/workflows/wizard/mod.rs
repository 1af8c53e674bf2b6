//! The step-gated wizard engine shared by the intake and booking flows.
//!
//! A [`WizardFlow`] supplies the step count and per-step validation rules;
//! [`WizardSession`] owns one run's field data, service selection, and
//! attachment registry. Requirement resolution and field formatting are
//! pure helpers alongside.

pub mod domain;
pub mod format;
pub mod requirements;
mod session;

#[cfg(test)]
mod tests;

pub use domain::{
    CatalogTag, Department, EntityType, FieldValue, RequirementEntry, SessionData, WizardError,
};
pub use format::{FormatResult, FormatterId};
pub use requirements::{requirement_key, resolve_requirements};
pub use session::{SessionSnapshot, WizardFlow, WizardSession};
