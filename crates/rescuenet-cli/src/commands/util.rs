//! Shared helpers for command handlers.

use std::sync::Arc;

use rescuenet_core::{Dispatcher, EntityId, Incident};

use crate::error::CliError;

/// Resolve an incident identifier to a known incident.
///
/// Accepts a full id or any unambiguous id prefix, so operators can type
/// the first few characters of a UUID.
pub fn resolve_incident(
    dispatcher: &Dispatcher,
    identifier: &str,
) -> Result<Arc<Incident>, CliError> {
    let snap = dispatcher.store().incidents();

    if let Some(incident) = snap.iter().find(|i| i.id.to_string() == identifier) {
        return Ok(incident.clone());
    }

    let mut matches = snap
        .iter()
        .filter(|i| i.id.to_string().starts_with(identifier));
    match (matches.next(), matches.next()) {
        (Some(incident), None) => Ok(incident.clone()),
        (Some(_), Some(_)) => Err(CliError::Validation {
            field: "incident".into(),
            reason: format!("'{identifier}' matches more than one incident"),
        }),
        _ => Err(CliError::IncidentNotFound {
            id: identifier.into(),
        }),
    }
}

/// Resolve a checklist item reference: an item id, or a 1-based index
/// into the incident's checklist.
pub fn resolve_item_id(incident: &Incident, reference: &str) -> Result<String, CliError> {
    if incident.checklist.iter().any(|item| item.id == reference) {
        return Ok(reference.to_owned());
    }
    if let Ok(index) = reference.parse::<usize>() {
        if let Some(item) = index.checked_sub(1).and_then(|i| incident.checklist.get(i)) {
            return Ok(item.id.clone());
        }
    }
    Err(CliError::ChecklistItemNotFound {
        incident: incident.id.to_string(),
        item: reference.to_owned(),
    })
}

/// Shorten an [`EntityId`] for table display.
pub fn short_id(id: &EntityId) -> String {
    let full = id.to_string();
    match full.get(..8) {
        Some(prefix) if full.len() > 8 => prefix.to_owned(),
        _ => full,
    }
}

/// Format a timestamp for table display.
pub fn fmt_timestamp(ts: chrono::DateTime<chrono::Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M UTC").to_string()
}
