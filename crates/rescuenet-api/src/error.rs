use thiserror::Error;

/// Top-level error type for the `rescuenet-api` crate.
///
/// Covers every failure mode across the three collaborator surfaces:
/// transport, the Overpass directory, the triage advisory service, and
/// geolocation. `rescuenet-core` treats all of these as degradable --
/// a collaborator error selects a fallback, it never fails an operation.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    // ── Directory ───────────────────────────────────────────────────
    /// The Overpass directory rejected a query or returned a non-success status.
    #[error("Directory error: {message}")]
    Directory { message: String },

    // ── Triage ──────────────────────────────────────────────────────
    /// The triage advisory service failed or returned an unusable response.
    #[error("Triage error: {message}")]
    Triage { message: String },

    // ── Geolocation ─────────────────────────────────────────────────
    /// The geolocation service returned a non-success status.
    #[error("Geolocation error: {message}")]
    Geolocation { message: String },
}

impl Error {
    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }
}
