//! Core media list contract for the conversation file viewer.
//!
//! This crate defines the entry model with export-cleanup lifecycle, the
//! conversation content source collaborator, the enumeration filter
//! pipeline, and the placeholder reconciliation decision.

/// Media entry model and filename derivation.
pub mod entry;
/// Enumeration filter pipeline over raw content records.
pub mod enumerate;
/// Placeholder reconciliation decision.
pub mod reconcile;
/// Conversation content source collaborator types.
pub mod source;

pub use entry::{MediaEntry, name_from_path};
pub use enumerate::{Enumeration, enumerate_media};
pub use reconcile::{ReconcileDecision, reconcile};
pub use source::{MediaRecord, MediaSource, SourceError};
