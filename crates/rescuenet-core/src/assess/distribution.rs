// ── Incident distribution aggregator ──
//
// Per-category counts for the analytics view. Percentages are rounded
// independently and may not sum to 100; relative heights are for
// proportional bar rendering. All statuses count, not just active.

use std::sync::Arc;

use serde::Serialize;

use crate::model::{Incident, IncidentType};

/// Fixed display order of the five categories.
pub const CATEGORY_ORDER: [IncidentType; 5] = [
    IncidentType::Fire,
    IncidentType::Medical,
    IncidentType::Accident,
    IncidentType::Flood,
    IncidentType::Crime,
];

/// One category's slice of the distribution.
#[derive(Debug, Clone, Serialize)]
pub struct CategorySlice {
    pub label: &'static str,
    pub kind: IncidentType,
    pub count: usize,
    /// Share of all incidents, rounded to whole percent.
    pub percentage: u32,
    /// Count relative to the largest category, in `0.0..=1.0`.
    pub relative_height: f64,
}

/// Compute the distribution over the five fixed categories.
pub fn distribution(incidents: &[Arc<Incident>]) -> [CategorySlice; 5] {
    let counts =
        CATEGORY_ORDER.map(|t| incidents.iter().filter(|i| i.incident_type == t).count());

    let total = incidents.len().max(1);
    let max_count = counts.iter().copied().max().unwrap_or(0).max(1);

    let mut idx = 0;
    CATEGORY_ORDER.map(|kind| {
        let count = counts[idx];
        idx += 1;
        CategorySlice {
            label: kind.label(),
            kind,
            count,
            percentage: (100.0 * count as f64 / total as f64).round() as u32,
            relative_height: count as f64 / max_count as f64,
        }
    })
}
