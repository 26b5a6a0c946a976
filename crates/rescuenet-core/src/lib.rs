//! Incident lifecycle and derived-metrics engine for RescueNet.
//!
//! This crate owns the business logic, domain model, and reactive data
//! infrastructure between `rescuenet-api` and UI consumers:
//!
//! - **[`Dispatcher`]**: Central facade: report creation (validation,
//!   jitter, corroboration, confidence, advisory triage), resolution,
//!   checklist toggling, validated resource edits, directory refresh,
//!   and the persistence hooks around all of them.
//!
//! - **[`DataStore`]**: Reactive storage: an ordered most-recent-first
//!   incident log plus a keyed resource set, each broadcasting snapshots
//!   through `tokio::sync::watch` channels for a rendering layer to
//!   subscribe to.
//!
//! - **Assessors** ([`assess`]): Pure projections: the confidence
//!   classifier, the community stress aggregator, and the per-category
//!   incident distribution. Computed on demand from committed snapshots,
//!   never cached.
//!
//! - **Domain model** ([`model`]): Canonical types (`Incident`,
//!   `Resource`, `Settings`, and their enums) with [`EntityId`]
//!   supporting both UUID (local reports) and synthetic string
//!   (directory records) identifiers.
//!
//! - **Persistence boundary** ([`persist`]): Flat key-value blobs with
//!   a versioned envelope; the file-backed store writes one JSON file
//!   per key.

pub mod assess;
pub mod checklist;
pub mod convert;
pub mod dispatcher;
pub mod error;
pub mod model;
pub mod persist;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use assess::{CategorySlice, StressLevel};
pub use dispatcher::{Dispatcher, NewReport};
pub use error::CoreError;
pub use persist::{BlobStore, FileBlobStore};
pub use store::DataStore;

// Re-export model types at the crate root for ergonomics.
pub use model::{
    ChecklistItem, ConfidenceLevel, EntityId, Incident, IncidentStatus, IncidentType, Resource,
    ResourceStatus, ResourceType, ResourceUpdate, Settings, Severity,
};
