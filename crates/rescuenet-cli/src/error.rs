//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use rescuenet_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Validation ───────────────────────────────────────────────────

    #[error("Incident description cannot be empty")]
    #[diagnostic(
        code(rescuenet::empty_description),
        help("Describe what happened: rescuenet report --type fire --description \"...\"")
    )]
    EmptyDescription,

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(rescuenet::validation))]
    Validation { field: String, reason: String },

    // ── Lookups ──────────────────────────────────────────────────────

    #[error("Incident '{id}' not found")]
    #[diagnostic(
        code(rescuenet::incident_not_found),
        help("Run: rescuenet incidents to see known incident ids")
    )]
    IncidentNotFound { id: String },

    #[error("Checklist item '{item}' not found on incident '{incident}'")]
    #[diagnostic(
        code(rescuenet::item_not_found),
        help("Run: rescuenet incidents --id {incident} to see its checklist")
    )]
    ChecklistItemNotFound { incident: String, item: String },

    #[error("Resource '{id}' not found")]
    #[diagnostic(
        code(rescuenet::resource_not_found),
        help("Run: rescuenet resources list to see known resource ids")
    )]
    ResourceNotFound { id: String },

    // ── Persistence ──────────────────────────────────────────────────

    #[error("Failed to read or write persisted state: {message}")]
    #[diagnostic(
        code(rescuenet::persistence),
        help("Check permissions on the data directory, or point --data-dir elsewhere.")
    )]
    Persistence { message: String },

    #[error("Persisted data uses schema {found}, this build supports {supported}")]
    #[diagnostic(
        code(rescuenet::schema_mismatch),
        help("Move the old data files aside or upgrade rescuenet.")
    )]
    SchemaMismatch { found: u32, supported: u32 },

    // ── Collaborators ────────────────────────────────────────────────

    #[error("Could not reach {service} at {url}")]
    #[diagnostic(
        code(rescuenet::connection_failed),
        help("Check your network connection, or adjust the endpoint in the config file.")
    )]
    ConnectionFailed {
        service: String,
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    // ── Configuration ────────────────────────────────────────────────

    #[error(transparent)]
    #[diagnostic(code(rescuenet::config))]
    Config(Box<figment::Error>),

    // ── IO / Serialization ───────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(rescuenet::json))]
    Json(#[from] serde_json::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::EmptyDescription | Self::Validation { .. } => exit_code::USAGE,
            Self::IncidentNotFound { .. }
            | Self::ChecklistItemNotFound { .. }
            | Self::ResourceNotFound { .. } => exit_code::NOT_FOUND,
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::EmptyDescription => CliError::EmptyDescription,

            CoreError::InvalidResourceUpdate { reason } => CliError::Validation {
                field: "resource update".into(),
                reason,
            },

            CoreError::IncidentNotFound { id } => CliError::IncidentNotFound {
                id: id.to_string(),
            },

            CoreError::ChecklistItemNotFound { incident, item } => {
                CliError::ChecklistItemNotFound {
                    incident: incident.to_string(),
                    item,
                }
            }

            CoreError::ResourceNotFound { id } => CliError::ResourceNotFound {
                id: id.to_string(),
            },

            CoreError::Persistence { message } => CliError::Persistence { message },

            CoreError::SchemaMismatch { found, supported } => {
                CliError::SchemaMismatch { found, supported }
            }
        }
    }
}
