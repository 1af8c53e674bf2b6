use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::catalog::{Catalog, ServiceDefinition};
use crate::workflows::booking::{self, BookingFlow, BookingStep};
use crate::workflows::intake::{self, IntakeFlow, IntakeStep};
use crate::workflows::wizard::{
    CatalogTag, Department, EntityType, FieldValue, FormatResult, FormatterId, RequirementEntry,
    SessionSnapshot, WizardError, WizardSession,
};

/// Which wizard variant a registered session runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowKind {
    Intake,
    Booking,
}

impl FlowKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Intake => "intake",
            Self::Booking => "booking",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "intake" => Some(Self::Intake),
            "booking" => Some(Self::Booking),
            _ => None,
        }
    }
}

/// A registered session of either flow. The engine stays generic; this
/// wrapper gives the registry and router one concrete type to hold.
#[derive(Debug)]
enum AnySession {
    Intake(WizardSession<IntakeFlow>),
    Booking(WizardSession<BookingFlow>),
}

impl AnySession {
    fn kind(&self) -> FlowKind {
        match self {
            Self::Intake(_) => FlowKind::Intake,
            Self::Booking(_) => FlowKind::Booking,
        }
    }

    fn tag_key(&self) -> &'static str {
        match self {
            Self::Intake(session) => session.entity_tag().key(),
            Self::Booking(session) => session.entity_tag().key(),
        }
    }

    fn current_step(&self) -> u8 {
        match self {
            Self::Intake(session) => session.current_step(),
            Self::Booking(session) => session.current_step(),
        }
    }

    fn step_count(&self) -> u8 {
        match self {
            Self::Intake(session) => session.step_count(),
            Self::Booking(session) => session.step_count(),
        }
    }

    fn is_step_valid(&self, step: u8) -> bool {
        match self {
            Self::Intake(session) => session.is_step_valid(step),
            Self::Booking(session) => session.is_step_valid(step),
        }
    }

    fn is_done(&self) -> bool {
        match self {
            Self::Intake(session) => session.is_done(),
            Self::Booking(session) => session.is_done(),
        }
    }

    fn set_field(&mut self, name: &str, value: FieldValue) {
        match self {
            Self::Intake(session) => session.set_field(name, value),
            Self::Booking(session) => session.set_field(name, value),
        }
    }

    fn set_tag(&mut self, raw: &str) -> Result<(), SessionServiceError> {
        match self {
            Self::Intake(session) => {
                let tag = EntityType::parse(raw).ok_or_else(|| SessionServiceError::UnknownTag {
                    kind: FlowKind::Intake,
                    tag: raw.to_string(),
                })?;
                session.set_entity_tag(tag);
            }
            Self::Booking(session) => {
                let tag = Department::parse(raw).ok_or_else(|| SessionServiceError::UnknownTag {
                    kind: FlowKind::Booking,
                    tag: raw.to_string(),
                })?;
                session.set_entity_tag(tag);
            }
        }
        Ok(())
    }

    fn advance(&mut self) -> Result<u8, WizardError> {
        match self {
            Self::Intake(session) => session.advance(),
            Self::Booking(session) => session.advance(),
        }
    }

    fn retreat(&mut self) -> u8 {
        match self {
            Self::Intake(session) => session.retreat(),
            Self::Booking(session) => session.retreat(),
        }
    }

    fn reset(&mut self) {
        match self {
            Self::Intake(session) => session.reset(),
            Self::Booking(session) => session.reset(),
        }
    }

    fn toggle_service(&mut self, name: &str) -> bool {
        match self {
            Self::Intake(session) => session.toggle_service(name),
            Self::Booking(session) => session.toggle_service(name),
        }
    }

    fn attach(&mut self, key: &str, file_ref: &str) {
        match self {
            Self::Intake(session) => session.attach(key, file_ref),
            Self::Booking(session) => session.attach(key, file_ref),
        }
    }

    fn detach(&mut self, key: &str) -> bool {
        match self {
            Self::Intake(session) => session.detach(key),
            Self::Booking(session) => session.detach(key),
        }
    }

    fn requirements(&self, catalog: &Catalog) -> Vec<RequirementEntry> {
        match self {
            Self::Intake(session) => session.requirements(catalog),
            Self::Booking(session) => session.requirements(catalog),
        }
    }

    fn snapshot(&self) -> SessionSnapshot {
        match self {
            Self::Intake(session) => session.snapshot(),
            Self::Booking(session) => session.snapshot(),
        }
    }

    fn confirm_submitted(&mut self) -> Result<(), WizardError> {
        match self {
            Self::Intake(session) => session.confirm_submitted(),
            Self::Booking(session) => session.confirm_submitted(),
        }
    }

    fn selected_services(&self) -> Vec<String> {
        match self {
            Self::Intake(session) => session.selected_services().iter().cloned().collect(),
            Self::Booking(session) => session.selected_services().iter().cloned().collect(),
        }
    }

    fn attachment_keys(&self) -> Vec<String> {
        match self {
            Self::Intake(session) => session.attachments().keys().cloned().collect(),
            Self::Booking(session) => session.attachments().keys().cloned().collect(),
        }
    }
}

/// One selectable tag with its display label, for the UI's dropdowns.
#[derive(Debug, Clone, Serialize)]
pub struct TagView {
    pub key: &'static str,
    pub label: &'static str,
}

/// One wizard step with its display label.
#[derive(Debug, Clone, Serialize)]
pub struct StepRef {
    pub number: u8,
    pub label: &'static str,
}

/// Static reference data one flow's UI needs before a session exists:
/// selectable tags, step labels, the service menu, and formatter ids.
#[derive(Debug, Serialize)]
pub struct ReferenceView {
    pub kind: FlowKind,
    pub tags: Vec<TagView>,
    pub steps: Vec<StepRef>,
    pub services: Vec<ServiceDefinition>,
    pub formatters: Vec<&'static str>,
}

/// API-facing summary of one session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub session_id: String,
    pub kind: FlowKind,
    pub tag: &'static str,
    pub current_step: u8,
    pub step_count: u8,
    pub current_step_valid: bool,
    pub selected_services: Vec<String>,
    pub attachment_keys: Vec<String>,
    pub done: bool,
}

/// Error raised by the session registry.
#[derive(Debug, thiserror::Error)]
pub enum SessionServiceError {
    #[error("session {0} not found")]
    NotFound(String),
    #[error("unknown {} tag '{tag}'", .kind.as_str())]
    UnknownTag { kind: FlowKind, tag: String },
    #[error("unknown formatter '{0}'")]
    UnknownFormatter(String),
    #[error(transparent)]
    Wizard(#[from] WizardError),
}

/// In-memory registry composing the two wizard flows with their catalogs.
/// Sessions are process-local by design; nothing survives a restart.
pub struct WizardSessionService {
    intake_catalog: Arc<Catalog>,
    booking_catalog: Arc<Catalog>,
    sessions: Mutex<HashMap<String, AnySession>>,
    sequence: AtomicU64,
}

impl WizardSessionService {
    pub fn new(intake_catalog: Arc<Catalog>, booking_catalog: Arc<Catalog>) -> Self {
        Self {
            intake_catalog,
            booking_catalog,
            sessions: Mutex::new(HashMap::new()),
            sequence: AtomicU64::new(1),
        }
    }

    pub fn standard() -> Self {
        Self::new(
            Arc::new(Catalog::standard_intake()),
            Arc::new(Catalog::standard_booking()),
        )
    }

    fn next_session_id(&self) -> String {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed);
        format!("ses-{id:06}")
    }

    fn catalog_for(&self, kind: FlowKind) -> &Catalog {
        match kind {
            FlowKind::Intake => &self.intake_catalog,
            FlowKind::Booking => &self.booking_catalog,
        }
    }

    /// Reference data for one flow's UI, assembled from the catalog and
    /// the flow's own step and tag definitions.
    pub fn reference(&self, kind: FlowKind) -> ReferenceView {
        let catalog = self.catalog_for(kind);

        let tags = match kind {
            FlowKind::Intake => catalog
                .entity_tags()
                .iter()
                .filter_map(|key| EntityType::parse(key))
                .map(|tag| TagView {
                    key: tag.key(),
                    label: tag.label(),
                })
                .collect(),
            FlowKind::Booking => catalog
                .entity_tags()
                .iter()
                .filter_map(|key| Department::parse(key))
                .map(|tag| TagView {
                    key: tag.key(),
                    label: tag.label(),
                })
                .collect(),
        };

        let steps = match kind {
            FlowKind::Intake => IntakeStep::ordered()
                .into_iter()
                .map(|step| StepRef {
                    number: step.number(),
                    label: step.label(),
                })
                .collect(),
            FlowKind::Booking => BookingStep::ordered()
                .into_iter()
                .map(|step| StepRef {
                    number: step.number(),
                    label: step.label(),
                })
                .collect(),
        };

        ReferenceView {
            kind,
            tags,
            steps,
            services: catalog.services().to_vec(),
            formatters: vec![
                FormatterId::Phone.as_str(),
                FormatterId::NationalId.as_str(),
            ],
        }
    }

    /// Register a new session of the requested kind.
    pub fn create(&self, kind: FlowKind, tag: &str) -> Result<SessionView, SessionServiceError> {
        let session = match kind {
            FlowKind::Intake => {
                let tag = EntityType::parse(tag).ok_or_else(|| SessionServiceError::UnknownTag {
                    kind,
                    tag: tag.to_string(),
                })?;
                AnySession::Intake(intake::create_session(tag))
            }
            FlowKind::Booking => {
                let tag = Department::parse(tag).ok_or_else(|| SessionServiceError::UnknownTag {
                    kind,
                    tag: tag.to_string(),
                })?;
                AnySession::Booking(booking::create_session(tag))
            }
        };

        let session_id = self.next_session_id();
        let view = view_of(&session_id, &session);
        let mut guard = self.sessions.lock().expect("session registry poisoned");
        guard.insert(session_id, session);
        Ok(view)
    }

    pub fn get(&self, session_id: &str) -> Result<SessionView, SessionServiceError> {
        self.with_session(session_id, |id, session| Ok(view_of(id, session)))
    }

    pub fn set_field(
        &self,
        session_id: &str,
        name: &str,
        value: FieldValue,
    ) -> Result<SessionView, SessionServiceError> {
        self.with_session(session_id, |id, session| {
            session.set_field(name, value);
            Ok(view_of(id, session))
        })
    }

    pub fn set_tag(&self, session_id: &str, tag: &str) -> Result<SessionView, SessionServiceError> {
        self.with_session(session_id, |id, session| {
            session.set_tag(tag)?;
            Ok(view_of(id, session))
        })
    }

    pub fn advance(&self, session_id: &str) -> Result<SessionView, SessionServiceError> {
        self.with_session(session_id, |id, session| {
            session.advance()?;
            Ok(view_of(id, session))
        })
    }

    pub fn retreat(&self, session_id: &str) -> Result<SessionView, SessionServiceError> {
        self.with_session(session_id, |id, session| {
            session.retreat();
            Ok(view_of(id, session))
        })
    }

    pub fn reset(&self, session_id: &str) -> Result<SessionView, SessionServiceError> {
        self.with_session(session_id, |id, session| {
            session.reset();
            Ok(view_of(id, session))
        })
    }

    /// Toggle a service on the session. Unconditional, but a name the
    /// catalog does not know is worth flagging to its authors.
    pub fn toggle_service(
        &self,
        session_id: &str,
        name: &str,
    ) -> Result<SessionView, SessionServiceError> {
        let mut guard = self.sessions.lock().expect("session registry poisoned");
        let session = guard
            .get_mut(session_id)
            .ok_or_else(|| SessionServiceError::NotFound(session_id.to_string()))?;
        if self.catalog_for(session.kind()).service(name).is_none() {
            warn!(service = name, "toggled service is not in the catalog");
        }
        session.toggle_service(name);
        Ok(view_of(session_id, session))
    }

    pub fn attach(
        &self,
        session_id: &str,
        key: &str,
        file_ref: &str,
    ) -> Result<SessionView, SessionServiceError> {
        self.with_session(session_id, |id, session| {
            session.attach(key, file_ref);
            Ok(view_of(id, session))
        })
    }

    /// Remove an attachment; absent keys are a no-op, reported in the view.
    pub fn detach(
        &self,
        session_id: &str,
        key: &str,
    ) -> Result<(bool, SessionView), SessionServiceError> {
        self.with_session(session_id, |id, session| {
            let removed = session.detach(key);
            Ok((removed, view_of(id, session)))
        })
    }

    pub fn requirements(
        &self,
        session_id: &str,
    ) -> Result<Vec<RequirementEntry>, SessionServiceError> {
        let guard = self.sessions.lock().expect("session registry poisoned");
        let session = guard
            .get(session_id)
            .ok_or_else(|| SessionServiceError::NotFound(session_id.to_string()))?;
        Ok(session.requirements(self.catalog_for(session.kind())))
    }

    /// Confirm the external create call succeeded: the session enters
    /// `Done`, leaves the registry, and its final snapshot is returned.
    pub fn submit(&self, session_id: &str) -> Result<SessionSnapshot, SessionServiceError> {
        let mut guard = self.sessions.lock().expect("session registry poisoned");
        let session = guard
            .get_mut(session_id)
            .ok_or_else(|| SessionServiceError::NotFound(session_id.to_string()))?;
        session.confirm_submitted()?;
        let snapshot = session.snapshot();
        guard.remove(session_id);
        Ok(snapshot)
    }

    /// Run a formatter over a raw input.
    pub fn format(&self, formatter: &str, raw: &str) -> Result<FormatResult, SessionServiceError> {
        let id = FormatterId::parse(formatter)
            .ok_or_else(|| SessionServiceError::UnknownFormatter(formatter.to_string()))?;
        Ok(crate::workflows::wizard::format::format(id, raw))
    }

    /// Check an identification value against the intake catalog's pattern
    /// for its id type.
    pub fn validate_id(&self, id_type: &str, value: &str) -> bool {
        crate::workflows::wizard::format::validate(&self.intake_catalog, id_type, value)
    }

    fn with_session<T>(
        &self,
        session_id: &str,
        operation: impl FnOnce(&str, &mut AnySession) -> Result<T, SessionServiceError>,
    ) -> Result<T, SessionServiceError> {
        let mut guard = self.sessions.lock().expect("session registry poisoned");
        let session = guard
            .get_mut(session_id)
            .ok_or_else(|| SessionServiceError::NotFound(session_id.to_string()))?;
        operation(session_id, session)
    }
}

fn view_of(session_id: &str, session: &AnySession) -> SessionView {
    SessionView {
        session_id: session_id.to_string(),
        kind: session.kind(),
        tag: session.tag_key(),
        current_step: session.current_step(),
        step_count: session.step_count(),
        current_step_valid: session.is_step_valid(session.current_step()),
        selected_services: session.selected_services(),
        attachment_keys: session.attachment_keys(),
        done: session.is_done(),
    }
}
