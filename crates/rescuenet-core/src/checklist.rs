// ── Per-type checklist templates ──
//
// Fixed process guidance initialized at incident creation. Descriptive
// only: completing items never changes incident status.

use crate::model::{ChecklistItem, EntityId, IncidentType};

/// The fixed checklist template for an incident type.
pub fn template(incident_type: IncidentType) -> &'static [&'static str] {
    match incident_type {
        IncidentType::Fire => &[
            "Evacuate area",
            "Cut power supply",
            "Contain fire perimeter",
            "Await fire brigade",
        ],
        IncidentType::Medical => &[
            "Assess victim vitals",
            "Call medical support",
            "Administer first aid/CPR",
            "Prep for transport",
        ],
        IncidentType::Accident => &[
            "Secure area/perimeter",
            "Check for injuries",
            "Call ambulance",
            "Control traffic flow",
        ],
        IncidentType::Flood => &[
            "Move to high ground",
            "Shut off utilities",
            "Deploy rescue boats",
            "Setup emergency shelter",
        ],
        IncidentType::Crime => &[
            "Secure scene",
            "Ensure public safety",
            "Identify witnesses",
            "Collect evidence",
        ],
    }
}

/// Instantiate the template for a new incident. Item ids are derived from
/// the incident id and position, so they are stable and unique per incident.
pub fn build(incident_id: &EntityId, incident_type: IncidentType) -> Vec<ChecklistItem> {
    template(incident_type)
        .iter()
        .enumerate()
        .map(|(idx, task)| ChecklistItem {
            id: format!("{incident_id}-{idx}"),
            task: (*task).to_owned(),
            completed: false,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn every_type_has_a_four_step_template() {
        for t in IncidentType::iter() {
            assert_eq!(template(t).len(), 4, "{t} template");
        }
    }

    #[test]
    fn built_checklist_preserves_template_order() {
        let id = EntityId::random();
        let items = build(&id, IncidentType::Fire);
        let tasks: Vec<&str> = items.iter().map(|i| i.task.as_str()).collect();
        assert_eq!(
            tasks,
            ["Evacuate area", "Cut power supply", "Contain fire perimeter", "Await fire brigade"]
        );
        assert!(items.iter().all(|i| !i.completed));
    }

    #[test]
    fn item_ids_are_stable_and_distinct() {
        let id = EntityId::random();
        let a = build(&id, IncidentType::Crime);
        let b = build(&id, IncidentType::Crime);
        assert_eq!(
            a.iter().map(|i| &i.id).collect::<Vec<_>>(),
            b.iter().map(|i| &i.id).collect::<Vec<_>>()
        );
        let mut ids: Vec<_> = a.iter().map(|i| i.id.clone()).collect();
        ids.dedup();
        assert_eq!(ids.len(), 4);
    }
}
