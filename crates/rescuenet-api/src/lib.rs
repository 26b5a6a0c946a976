//! Async clients for RescueNet's external collaborators.
//!
//! Three independent one-shot surfaces, all best-effort from the core's
//! point of view:
//!
//! - **[`DirectoryClient`]**: OpenStreetMap Overpass queries for nearby
//!   emergency services (hospitals, fire stations, police stations,
//!   shelters), normalized into [`ServiceRecord`]s at the ingestion
//!   boundary. [`DirectoryClient::fetch_all`] gathers all categories with
//!   fixed arity, each degrading to empty on failure.
//! - **[`TriageClient`]**: advisory severity classification for a report.
//! - **[`GeoClient`]**: one-shot IP-based position lookup.
//!
//! Every client exposes a `with_client` constructor for tests (wiremock).

pub mod directory;
pub mod error;
pub mod geo;
pub mod triage;

pub use directory::{DEFAULT_OVERPASS_URL, DirectoryClient, ServiceKind, ServiceRecord};
pub use error::Error;
pub use geo::{DEFAULT_GEO_URL, GeoClient, Position};
pub use triage::{TriageAssessment, TriageClient};
