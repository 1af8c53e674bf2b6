use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use super::domain::{CatalogTag, FieldValue, RequirementEntry, SessionData, WizardError};
use super::requirements::resolve_requirements;
use crate::catalog::Catalog;

/// Step rules for one wizard variant. Implementations hold no per-session
/// state; the same flow value serves every session of its kind.
pub trait WizardFlow {
    /// Tag the step rules and the catalog branch on (entity type for
    /// intake, department for booking).
    type Tag: CatalogTag;

    /// Number of steps, `1..=step_count()`.
    fn step_count(&self) -> u8;

    /// Whether the given step's contract is satisfied by the data written
    /// so far. Evaluated fresh on every call; nothing is cached.
    fn is_step_valid(&self, step: u8, tag: Self::Tag, data: &SessionData) -> bool;

    /// Fields whose meaning depends on the tag. Cleared when the tag
    /// changes mid-session.
    fn tag_dependent_fields(&self) -> &'static [&'static str] {
        &[]
    }
}

/// Plain copy of a finished session, handed to the external create-entity
/// call. The engine neither performs nor retries that call.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub tag: &'static str,
    pub data: SessionData,
    pub selected_services: Vec<String>,
    pub attachment_keys: Vec<String>,
}

/// One in-progress wizard run: current step, field data, selected
/// services, and attached-file references.
///
/// The step index always stays within `[1, N]`. `advance` is the only
/// gated operation; everything else mutates unconditionally, so a user can
/// always go back and fix earlier answers without losing later ones.
#[derive(Debug, Clone)]
pub struct WizardSession<F: WizardFlow> {
    flow: F,
    tag: F::Tag,
    step: u8,
    data: SessionData,
    services: BTreeSet<String>,
    attachments: BTreeMap<String, String>,
    done: bool,
}

impl<F: WizardFlow> WizardSession<F> {
    pub fn new(flow: F, tag: F::Tag) -> Self {
        Self {
            flow,
            tag,
            step: 1,
            data: SessionData::default(),
            services: BTreeSet::new(),
            attachments: BTreeMap::new(),
            done: false,
        }
    }

    pub fn current_step(&self) -> u8 {
        self.step
    }

    pub fn step_count(&self) -> u8 {
        self.flow.step_count()
    }

    pub fn entity_tag(&self) -> F::Tag {
        self.tag
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn data(&self) -> &SessionData {
        &self.data
    }

    pub fn selected_services(&self) -> &BTreeSet<String> {
        &self.services
    }

    pub fn attachments(&self) -> &BTreeMap<String, String> {
        &self.attachments
    }

    /// Overwrite a field. Never validates; rules run on `advance` only.
    pub fn set_field(&mut self, name: impl Into<String>, value: FieldValue) {
        self.data.set(name, value);
    }

    /// Change the tag. A changed tag clears the tag-dependent fields so a
    /// company's registration number cannot masquerade as an individual's
    /// identification, while tag-neutral answers survive.
    pub fn set_entity_tag(&mut self, tag: F::Tag) {
        if tag != self.tag {
            for field in self.flow.tag_dependent_fields() {
                self.data.remove(field);
            }
        }
        self.tag = tag;
    }

    /// Whether a given step's contract is currently satisfied.
    pub fn is_step_valid(&self, step: u8) -> bool {
        self.flow.is_step_valid(step, self.tag, &self.data)
    }

    /// Move forward one step if the current step is satisfied. The index is
    /// clamped at the final step; a failed gate leaves it untouched.
    pub fn advance(&mut self) -> Result<u8, WizardError> {
        if !self.is_step_valid(self.step) {
            return Err(WizardError::StepInvalid { step: self.step });
        }
        self.step = (self.step + 1).min(self.flow.step_count());
        Ok(self.step)
    }

    /// Move back one step, floored at 1. Ungated, and nothing entered on
    /// later steps is cleared or re-validated.
    pub fn retreat(&mut self) -> u8 {
        self.step = self.step.saturating_sub(1).max(1);
        self.step
    }

    /// Total cancellation: defaults restored, step back to 1.
    pub fn reset(&mut self) {
        self.step = 1;
        self.data.clear();
        self.services.clear();
        self.attachments.clear();
        self.done = false;
    }

    /// Add the service if absent, remove it if present. Returns whether the
    /// service is selected afterwards.
    pub fn toggle_service(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.services.remove(&name) {
            false
        } else {
            self.services.insert(name);
            true
        }
    }

    pub fn attach(&mut self, requirement_key: impl Into<String>, file_ref: impl Into<String>) {
        self.attachments.insert(requirement_key.into(), file_ref.into());
    }

    /// Remove an attachment; reports whether one was present.
    pub fn detach(&mut self, requirement_key: &str) -> bool {
        self.attachments.remove(requirement_key).is_some()
    }

    /// Resolve the document-requirement set for the session's tag and
    /// current service selection. Pure with respect to session state.
    pub fn requirements(&self, catalog: &Catalog) -> Vec<RequirementEntry> {
        resolve_requirements(catalog, self.tag.key(), &self.services)
    }

    /// Snapshot for the external persistence handoff.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            tag: self.tag.key(),
            data: self.data.clone(),
            selected_services: self.services.iter().cloned().collect(),
            attachment_keys: self.attachments.keys().cloned().collect(),
        }
    }

    /// Enter the terminal `Done` state. Only permitted from the final step,
    /// and only after the caller has confirmed the external create call
    /// succeeded.
    pub fn confirm_submitted(&mut self) -> Result<(), WizardError> {
        if self.step != self.flow.step_count() {
            return Err(WizardError::NotAtFinalStep { step: self.step });
        }
        self.done = true;
        Ok(())
    }
}
