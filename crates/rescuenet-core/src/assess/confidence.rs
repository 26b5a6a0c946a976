// ── Confidence classifier ──
//
// Maps attached evidence and spatial corroboration onto a trust level.
// Pure and deterministic; the corroboration count must come from one
// consistent snapshot taken together with the new report's coordinates.

use std::sync::Arc;

use crate::model::{ConfidenceLevel, Incident};

/// Proximity window for corroboration, in degrees on each axis. A crude
/// box test, not a geodesic distance.
pub const PROXIMITY_WINDOW_DEG: f64 = 0.01;

/// Classify a new report's confidence.
///
/// Precedence, first match wins: video is High regardless; an image with
/// corroboration is High; an image or corroboration alone is Medium;
/// otherwise Low.
pub fn classify(has_image: bool, has_video: bool, nearby_active_count: usize) -> ConfidenceLevel {
    if has_video || (has_image && nearby_active_count > 0) {
        ConfidenceLevel::High
    } else if has_image || nearby_active_count > 0 {
        ConfidenceLevel::Medium
    } else {
        ConfidenceLevel::Low
    }
}

/// Count active incidents whose location falls within the proximity
/// window of `(lat, lng)`.
pub fn corroboration_count(incidents: &[Arc<Incident>], lat: f64, lng: f64) -> usize {
    incidents
        .iter()
        .filter(|i| i.is_active())
        .filter(|i| {
            (i.lat - lat).abs() < PROXIMITY_WINDOW_DEG && (i.lng - lng).abs() < PROXIMITY_WINDOW_DEG
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EntityId, IncidentStatus, IncidentType, Severity};
    use chrono::Utc;

    fn incident_at(lat: f64, lng: f64, status: IncidentStatus) -> Arc<Incident> {
        Arc::new(Incident {
            id: EntityId::random(),
            incident_type: IncidentType::Fire,
            description: "smoke".into(),
            severity: Severity::Medium,
            lat,
            lng,
            timestamp: Utc::now(),
            status,
            photo_attached: false,
            video_attached: false,
            confidence: ConfidenceLevel::Low,
            checklist: Vec::new(),
        })
    }

    #[test]
    fn rule_table() {
        assert_eq!(classify(true, true, 1), ConfidenceLevel::High);
        assert_eq!(classify(true, false, 0), ConfidenceLevel::Medium);
        assert_eq!(classify(false, true, 0), ConfidenceLevel::High);
        assert_eq!(classify(true, false, 1), ConfidenceLevel::High);
        assert_eq!(classify(false, false, 2), ConfidenceLevel::Medium);
        assert_eq!(classify(false, false, 0), ConfidenceLevel::Low);
    }

    #[test]
    fn corroboration_counts_only_active_in_window() {
        let incidents = vec![
            incident_at(40.001, -74.001, IncidentStatus::Active),
            incident_at(40.005, -74.005, IncidentStatus::Resolved),
            incident_at(40.5, -74.5, IncidentStatus::Active),
        ];
        assert_eq!(corroboration_count(&incidents, 40.0, -74.0), 1);
    }

    #[test]
    fn window_is_exclusive_at_the_boundary() {
        let incidents = vec![incident_at(40.01, -74.0, IncidentStatus::Active)];
        assert_eq!(corroboration_count(&incidents, 40.0, -74.0), 0);
    }
}
