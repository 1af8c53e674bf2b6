//! Core engine of the firm operations console: the step-gated intake and
//! booking wizards, the document-requirement resolver, field formatting,
//! and the static reference catalog they all read.

pub mod catalog;
pub mod config;
pub mod error;
pub mod sessions;
pub mod telemetry;
pub mod workflows;
