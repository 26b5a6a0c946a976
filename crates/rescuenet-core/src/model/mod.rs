//! Canonical domain types: incidents, resources, settings, identity.

mod entity_id;
mod incident;
mod resource;
mod settings;

pub use entity_id::EntityId;
pub use incident::{
    ChecklistItem, ConfidenceLevel, Incident, IncidentStatus, IncidentType, Severity,
};
pub use resource::{Resource, ResourceStatus, ResourceType, ResourceUpdate};
pub use settings::{DEFAULT_POSITION, Settings};
