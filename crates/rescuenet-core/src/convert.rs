// ── API-to-domain conversion ──
//
// Maps collaborator DTOs onto canonical domain types. The directory has
// already defaulted name/contact/capacity at the ingestion boundary; this
// layer pins down category and status and re-asserts the load invariant.

use std::str::FromStr;

use rescuenet_api::{ServiceKind, ServiceRecord};

use crate::model::{EntityId, Resource, ResourceStatus, ResourceType, Severity};

impl From<ServiceKind> for ResourceType {
    fn from(kind: ServiceKind) -> Self {
        match kind {
            ServiceKind::Hospital => Self::Hospital,
            ServiceKind::FireStation => Self::FireStation,
            ServiceKind::PoliceStation => Self::PoliceStation,
            ServiceKind::Shelter => Self::Shelter,
            ServiceKind::Ambulance => Self::Ambulance,
        }
    }
}

/// Convert a directory record into a domain resource.
///
/// Directory records arrive available; operators change status afterward.
pub fn resource_from_record(record: ServiceRecord) -> Resource {
    Resource {
        id: EntityId::from(record.id),
        name: record.name,
        resource_type: record.kind.into(),
        status: ResourceStatus::Available,
        lat: record.lat,
        lng: record.lng,
        contact: record.contact,
        capacity: record.capacity,
        current_load: record.current_load.min(record.capacity),
        assigned_to: None,
    }
}

/// Map a triage service label onto a severity. `None` for anything the
/// service invents that we don't recognize -- the caller then falls back
/// to the default severity.
pub fn severity_from_label(label: &str) -> Option<Severity> {
    Severity::from_str(label.trim()).ok()
}
