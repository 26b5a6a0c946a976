// ── Core error types ──
//
// The taxonomy the dispatcher exposes: validation errors are rejected
// before any side effect, not-found errors report the bad id without
// touching shared state, and persistence errors surface only on the
// load path. Collaborator failures never appear here -- they degrade to
// fallbacks inside the dispatcher and are logged, not propagated.

use thiserror::Error;

use crate::model::EntityId;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Validation ───────────────────────────────────────────────────
    #[error("Report description must not be empty")]
    EmptyDescription,

    #[error("Invalid resource update: {reason}")]
    InvalidResourceUpdate { reason: String },

    // ── Not found ────────────────────────────────────────────────────
    #[error("Incident not found: {id}")]
    IncidentNotFound { id: EntityId },

    #[error("Checklist item not found: {item} on incident {incident}")]
    ChecklistItemNotFound { incident: EntityId, item: String },

    #[error("Resource not found: {id}")]
    ResourceNotFound { id: EntityId },

    // ── Persistence ──────────────────────────────────────────────────
    #[error("Persistence error: {message}")]
    Persistence { message: String },

    #[error("Unsupported blob schema version {found} (supported: {supported})")]
    SchemaMismatch { found: u32, supported: u32 },
}

impl CoreError {
    /// Returns `true` for errors caused by bad user input (rejected
    /// synchronously, nothing was applied).
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptyDescription | Self::InvalidResourceUpdate { .. }
        )
    }

    /// Returns `true` if the operation named an unknown entity.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::IncidentNotFound { .. }
                | Self::ChecklistItemNotFound { .. }
                | Self::ResourceNotFound { .. }
        )
    }
}
