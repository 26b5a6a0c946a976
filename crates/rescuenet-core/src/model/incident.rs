// ── Incident domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::entity_id::EntityId;

/// Report category. The five categories are fixed -- each carries its own
/// checklist template and slot in the distribution view.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum IncidentType {
    Fire,
    Medical,
    Accident,
    Flood,
    Crime,
}

impl IncidentType {
    /// Human-readable label, as shown in the distribution view.
    pub fn label(self) -> &'static str {
        match self {
            Self::Fire => "Fire",
            Self::Medical => "Medical",
            Self::Accident => "Accident",
            Self::Flood => "Flood",
            Self::Crime => "Crime",
        }
    }
}

/// Incident severity. Assigned once at creation (by triage or default),
/// never mutated afterward -- resolution does not alter severity.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
    EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

/// Heuristic trust level in a report, derived from attached evidence and
/// spatial corroboration. Not probability-calibrated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Display)]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

/// Lifecycle state. Starts `Active`, transitions to `Resolved` exactly
/// once, never reverts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum IncidentStatus {
    Active,
    Resolved,
}

/// One step of an incident's remediation checklist. Item ids are stable
/// for the life of the incident so individual items can be toggled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: String,
    pub task: String,
    pub completed: bool,
}

/// A reported emergency event.
///
/// Severity, confidence, evidence flags, and coordinates are set at
/// creation and immutable afterward; only `status` and the checklist's
/// `completed` flags change over the incident's life.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Incident {
    pub id: EntityId,
    #[serde(rename = "type")]
    pub incident_type: IncidentType,
    pub description: String,
    pub severity: Severity,
    /// Reported location: reference position plus jitter, not survey-accurate.
    pub lat: f64,
    pub lng: f64,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    pub status: IncidentStatus,
    pub photo_attached: bool,
    pub video_attached: bool,
    pub confidence: ConfidenceLevel,
    pub checklist: Vec<ChecklistItem>,
}

impl Incident {
    pub fn is_active(&self) -> bool {
        self.status == IncidentStatus::Active
    }

    /// Completed checklist items over total, for progress display.
    pub fn checklist_progress(&self) -> (usize, usize) {
        let done = self.checklist.iter().filter(|i| i.completed).count();
        (done, self.checklist.len())
    }
}
