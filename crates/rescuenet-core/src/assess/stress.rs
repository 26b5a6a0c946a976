// ── Community stress aggregator ──
//
// Coarse point-in-time indicator of emergency load. A projection:
// recomputed from the current snapshots on every read, never persisted
// and never memoized across changes.

use std::sync::Arc;

use serde::Serialize;
use strum::Display;

use crate::model::{Incident, Resource, ResourceStatus, Severity};

/// Aggregate community emergency load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum StressLevel {
    Low,
    Medium,
    High,
}

/// Compute the stress level from the active-incident and resource snapshots.
///
/// Base score: 2 per active incident, +5 per CRITICAL, +3 per HIGH.
/// Resource strain: busy resources as a percentage of all resources
/// (zero when there are no resources). HIGH above score 15 or strain 70,
/// MEDIUM above score 5 or strain 30, LOW otherwise.
pub fn compute_stress(active: &[Arc<Incident>], resources: &[Arc<Resource>]) -> StressLevel {
    let strain = resource_strain(resources);
    let score = base_score(active);

    if score > 15 || strain > 70.0 {
        StressLevel::High
    } else if score > 5 || strain > 30.0 {
        StressLevel::Medium
    } else {
        StressLevel::Low
    }
}

fn base_score(active: &[Arc<Incident>]) -> u32 {
    let mut score = 2 * active.len() as u32;
    for incident in active {
        match incident.severity {
            Severity::Critical => score += 5,
            Severity::High => score += 3,
            Severity::Low | Severity::Medium => {}
        }
    }
    score
}

fn resource_strain(resources: &[Arc<Resource>]) -> f64 {
    if resources.is_empty() {
        return 0.0;
    }
    let busy = resources
        .iter()
        .filter(|r| r.status == ResourceStatus::Busy)
        .count();
    100.0 * busy as f64 / resources.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        ConfidenceLevel, EntityId, IncidentStatus, IncidentType, ResourceType,
    };
    use chrono::Utc;

    fn active(severity: Severity) -> Arc<Incident> {
        Arc::new(Incident {
            id: EntityId::random(),
            incident_type: IncidentType::Medical,
            description: "test".into(),
            severity,
            lat: 0.0,
            lng: 0.0,
            timestamp: Utc::now(),
            status: IncidentStatus::Active,
            photo_attached: false,
            video_attached: false,
            confidence: ConfidenceLevel::Low,
            checklist: Vec::new(),
        })
    }

    fn resource(status: ResourceStatus) -> Arc<Resource> {
        Arc::new(Resource {
            id: EntityId::from("ambulance-1"),
            name: "Alpha 1".into(),
            resource_type: ResourceType::Ambulance,
            status,
            lat: 0.0,
            lng: 0.0,
            contact: "102".into(),
            capacity: 2,
            current_load: 0,
            assigned_to: None,
        })
    }

    #[test]
    fn empty_inputs_are_low() {
        assert_eq!(compute_stress(&[], &[]), StressLevel::Low);
    }

    #[test]
    fn nine_plain_actives_force_high() {
        // base score 18 > 15, regardless of resource strain
        let incidents: Vec<_> = (0..9).map(|_| active(Severity::Medium)).collect();
        let idle: Vec<_> = (0..10).map(|_| resource(ResourceStatus::Available)).collect();
        assert_eq!(compute_stress(&incidents, &idle), StressLevel::High);
    }

    #[test]
    fn strain_alone_forces_high() {
        // 8 of 10 busy = 80% > 70, with zero incidents
        let mut pool: Vec<_> = (0..8).map(|_| resource(ResourceStatus::Busy)).collect();
        pool.extend((0..2).map(|_| resource(ResourceStatus::Available)));
        assert_eq!(compute_stress(&[], &pool), StressLevel::High);
    }

    #[test]
    fn critical_and_high_weights_count() {
        // 2 incidents: base 4, +5 critical, +3 high = 12 -> MEDIUM
        let incidents = vec![active(Severity::Critical), active(Severity::High)];
        assert_eq!(compute_stress(&incidents, &[]), StressLevel::Medium);
    }

    #[test]
    fn moderate_strain_is_medium() {
        // 4 of 10 busy = 40% > 30
        let mut pool: Vec<_> = (0..4).map(|_| resource(ResourceStatus::Busy)).collect();
        pool.extend((0..6).map(|_| resource(ResourceStatus::Offline)));
        assert_eq!(compute_stress(&[], &pool), StressLevel::Medium);
    }

    #[test]
    fn boundary_values_stay_below() {
        // score exactly 15 and strain exactly 70 are not HIGH
        let incidents: Vec<_> = (0..3).map(|_| active(Severity::High)).collect();
        assert_eq!(base_score(&incidents), 15);
        let mut pool: Vec<_> = (0..7).map(|_| resource(ResourceStatus::Busy)).collect();
        pool.extend((0..3).map(|_| resource(ResourceStatus::Available)));
        assert_eq!(compute_stress(&incidents, &pool), StressLevel::Medium);
    }
}
