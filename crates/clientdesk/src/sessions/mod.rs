//! Process-local session registry and its HTTP surface, composing the
//! intake and booking flows with their catalogs.

mod router;
mod service;

#[cfg(test)]
mod tests;

pub use router::session_router;
pub use service::{
    FlowKind, ReferenceView, SessionServiceError, SessionView, StepRef, TagView,
    WizardSessionService,
};
