#![allow(clippy::unwrap_used)]
// Integration tests for the Dispatcher: lifecycle, validation, fallbacks,
// and persistence, exercised through the public API.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

use rescuenet_api::TriageClient;
use rescuenet_core::{
    ConfidenceLevel, CoreError, Dispatcher, EntityId, FileBlobStore, IncidentStatus, IncidentType,
    NewReport, ResourceStatus, ResourceUpdate, Settings, Severity, StressLevel,
};

// ── Helpers ─────────────────────────────────────────────────────────

fn manual_settings() -> Settings {
    Settings {
        auto_triage: false,
        ..Settings::default()
    }
}

fn fire_report(description: &str) -> NewReport {
    NewReport {
        incident_type: IncidentType::Fire,
        description: description.into(),
        photo_attached: false,
        video_attached: false,
    }
}

async fn triage_dispatcher(server: &MockServer) -> Dispatcher {
    let client =
        TriageClient::with_client(reqwest::Client::new(), Url::parse(&server.uri()).unwrap());
    Dispatcher::new(Settings::default()).with_triage(client)
}

// ── Report creation ─────────────────────────────────────────────────

#[tokio::test]
async fn fire_report_end_to_end_without_triage() {
    let dispatcher = Dispatcher::new(manual_settings());

    let incident = dispatcher
        .report_incident(fire_report("kitchen fire on 5th floor"))
        .await
        .unwrap();

    assert_eq!(incident.status, IncidentStatus::Active);
    assert_eq!(incident.severity, Severity::Medium);
    assert_eq!(incident.confidence, ConfidenceLevel::Low);

    let tasks: Vec<&str> = incident.checklist.iter().map(|i| i.task.as_str()).collect();
    assert_eq!(
        tasks,
        ["Evacuate area", "Cut power supply", "Contain fire perimeter", "Await fire brigade"]
    );
}

#[tokio::test]
async fn empty_description_is_rejected_before_any_side_effect() {
    let dispatcher = Dispatcher::new(manual_settings());

    let result = dispatcher.report_incident(fire_report("   ")).await;
    assert!(matches!(result, Err(CoreError::EmptyDescription)));
    assert!(dispatcher.store().incidents().is_empty());
}

#[tokio::test]
async fn identical_reports_create_distinct_incidents() {
    let dispatcher = Dispatcher::new(manual_settings());

    let a = dispatcher.report_incident(fire_report("same text")).await.unwrap();
    let b = dispatcher.report_incident(fire_report("same text")).await.unwrap();

    assert_ne!(a.id, b.id);
    assert_eq!(dispatcher.store().incidents().len(), 2);
    // Most-recent-first ordering.
    assert_eq!(dispatcher.store().incidents()[0].id, b.id);
}

#[tokio::test]
async fn report_coordinates_stay_within_the_jitter_window() {
    let dispatcher = Dispatcher::new(manual_settings());
    let (ref_lat, ref_lng) = dispatcher.reference_position();

    for _ in 0..20 {
        let incident = dispatcher.report_incident(fire_report("smoke")).await.unwrap();
        assert!((incident.lat - ref_lat).abs() <= 0.005);
        assert!((incident.lng - ref_lng).abs() <= 0.005);
    }
}

#[tokio::test]
async fn timestamps_are_monotonic_across_creations() {
    let dispatcher = Dispatcher::new(manual_settings());
    let mut last = None;
    for i in 0..5 {
        let incident = dispatcher
            .report_incident(fire_report(&format!("report {i}")))
            .await
            .unwrap();
        if let Some(prev) = last {
            assert!(incident.timestamp >= prev);
        }
        last = Some(incident.timestamp);
    }
}

#[tokio::test]
async fn second_report_nearby_raises_confidence_to_medium() {
    let dispatcher = Dispatcher::new(manual_settings());

    let first = dispatcher.report_incident(fire_report("smoke")).await.unwrap();
    assert_eq!(first.confidence, ConfidenceLevel::Low);

    // Both reports jitter at most ±0.005° from the same reference, which
    // keeps them inside the 0.01° corroboration window.
    let second = dispatcher.report_incident(fire_report("more smoke")).await.unwrap();
    assert_eq!(second.confidence, ConfidenceLevel::Medium);
}

#[tokio::test]
async fn photo_with_corroboration_is_high_confidence() {
    let dispatcher = Dispatcher::new(manual_settings());
    dispatcher.report_incident(fire_report("smoke")).await.unwrap();

    let report = NewReport {
        photo_attached: true,
        ..fire_report("flames visible")
    };
    let incident = dispatcher.report_incident(report).await.unwrap();
    assert_eq!(incident.confidence, ConfidenceLevel::High);
}

// ── Triage collaboration ────────────────────────────────────────────

#[tokio::test]
async fn triage_severity_is_used_when_available() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"severity": "CRITICAL"})))
        .mount(&server)
        .await;

    let dispatcher = triage_dispatcher(&server).await;
    let incident = dispatcher
        .report_incident(fire_report("entire block ablaze"))
        .await
        .unwrap();
    assert_eq!(incident.severity, Severity::Critical);
}

#[tokio::test]
async fn triage_failure_degrades_to_default_severity() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let dispatcher = triage_dispatcher(&server).await;
    let incident = dispatcher.report_incident(fire_report("smoke")).await.unwrap();
    assert_eq!(incident.severity, Severity::Medium);
}

#[tokio::test]
async fn unrecognized_triage_label_degrades_to_default() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"severity": "APOCALYPTIC"})))
        .mount(&server)
        .await;

    let dispatcher = triage_dispatcher(&server).await;
    let incident = dispatcher.report_incident(fire_report("smoke")).await.unwrap();
    assert_eq!(incident.severity, Severity::Medium);
}

// ── Resolution ──────────────────────────────────────────────────────

#[tokio::test]
async fn resolve_is_terminal_and_idempotent() {
    let dispatcher = Dispatcher::new(manual_settings());
    let incident = dispatcher.report_incident(fire_report("smoke")).await.unwrap();

    let resolved = dispatcher.resolve_incident(&incident.id).unwrap();
    assert_eq!(resolved.status, IncidentStatus::Resolved);

    // Second resolve: Ok no-op, same terminal state.
    let again = dispatcher.resolve_incident(&incident.id).unwrap();
    assert_eq!(again.status, IncidentStatus::Resolved);

    // Severity, confidence, and checklist are untouched.
    assert_eq!(again.severity, incident.severity);
    assert_eq!(again.confidence, incident.confidence);
    assert_eq!(again.checklist, incident.checklist);
}

#[tokio::test]
async fn resolve_unknown_id_is_not_found() {
    let dispatcher = Dispatcher::new(manual_settings());
    let result = dispatcher.resolve_incident(&EntityId::random());
    assert!(matches!(result, Err(CoreError::IncidentNotFound { .. })));
}

// ── Checklist ───────────────────────────────────────────────────────

#[tokio::test]
async fn toggle_twice_is_an_involution() {
    let dispatcher = Dispatcher::new(manual_settings());
    let incident = dispatcher.report_incident(fire_report("smoke")).await.unwrap();
    let item_id = incident.checklist[1].id.clone();

    let once = dispatcher.toggle_checklist_item(&incident.id, &item_id).unwrap();
    assert!(once.checklist[1].completed);
    assert!(!once.checklist[0].completed, "only the named item toggles");

    let twice = dispatcher.toggle_checklist_item(&incident.id, &item_id).unwrap();
    assert_eq!(twice.checklist, incident.checklist);
}

#[tokio::test]
async fn toggle_works_on_resolved_incidents() {
    let dispatcher = Dispatcher::new(manual_settings());
    let incident = dispatcher.report_incident(fire_report("smoke")).await.unwrap();
    dispatcher.resolve_incident(&incident.id).unwrap();

    let item_id = incident.checklist[0].id.clone();
    let updated = dispatcher.toggle_checklist_item(&incident.id, &item_id).unwrap();
    assert!(updated.checklist[0].completed);
    assert_eq!(updated.status, IncidentStatus::Resolved);
}

#[tokio::test]
async fn toggle_unknown_item_leaves_state_intact() {
    let dispatcher = Dispatcher::new(manual_settings());
    let incident = dispatcher.report_incident(fire_report("smoke")).await.unwrap();

    let result = dispatcher.toggle_checklist_item(&incident.id, "no-such-item");
    assert!(matches!(result, Err(CoreError::ChecklistItemNotFound { .. })));

    let current = dispatcher.store().incident(&incident.id).unwrap();
    assert_eq!(current.checklist, incident.checklist);
}

// ── Resource updates ────────────────────────────────────────────────

#[tokio::test]
async fn overload_update_is_rejected_leaving_resource_unchanged() {
    let dispatcher = Dispatcher::new(manual_settings());
    dispatcher.load().unwrap(); // seeds fallback resources

    let id = EntityId::from("5"); // Central Hospital, 150 cap / 89 load
    let before = dispatcher.store().resource(&id).unwrap();

    let result = dispatcher.update_resource(
        &id,
        ResourceUpdate {
            capacity: Some(100),
            current_load: Some(120),
            status: None,
        },
    );
    assert!(matches!(result, Err(CoreError::InvalidResourceUpdate { .. })));

    let after = dispatcher.store().resource(&id).unwrap();
    assert_eq!(after.capacity, before.capacity);
    assert_eq!(after.current_load, before.current_load);
    assert_eq!(after.status, before.status);
}

#[tokio::test]
async fn valid_update_replaces_only_mutable_fields() {
    let dispatcher = Dispatcher::new(manual_settings());
    dispatcher.load().unwrap();

    let id = EntityId::from("1"); // Alpha 1 ambulance
    let before = dispatcher.store().resource(&id).unwrap();

    let updated = dispatcher
        .update_resource(
            &id,
            ResourceUpdate {
                capacity: Some(4),
                current_load: Some(2),
                status: Some(ResourceStatus::Busy),
            },
        )
        .unwrap();

    assert_eq!(updated.status, ResourceStatus::Busy);
    assert_eq!((updated.capacity, updated.current_load), (4, 2));
    assert_eq!(updated.name, before.name);
    assert_eq!(updated.resource_type, before.resource_type);
    assert!((updated.lat - before.lat).abs() < f64::EPSILON);
}

#[tokio::test]
async fn update_unknown_resource_is_not_found() {
    let dispatcher = Dispatcher::new(manual_settings());
    let result = dispatcher.update_resource(&EntityId::from("ghost"), ResourceUpdate::default());
    assert!(matches!(result, Err(CoreError::ResourceNotFound { .. })));
}

// ── Projections ─────────────────────────────────────────────────────

#[tokio::test]
async fn stress_tracks_incident_load() {
    let dispatcher = Dispatcher::new(manual_settings());
    assert_eq!(dispatcher.stress(), StressLevel::Low);

    for i in 0..3 {
        dispatcher
            .report_incident(fire_report(&format!("report {i}")))
            .await
            .unwrap();
    }
    // 3 active MEDIUM incidents: base score 6 > 5.
    assert_eq!(dispatcher.stress(), StressLevel::Medium);

    for incident in dispatcher.store().incidents().iter() {
        dispatcher.resolve_incident(&incident.id).unwrap();
    }
    assert_eq!(dispatcher.stress(), StressLevel::Low);
}

#[tokio::test]
async fn distribution_counts_this_dispatchers_reports() {
    let dispatcher = Dispatcher::new(manual_settings());
    dispatcher.report_incident(fire_report("smoke")).await.unwrap();
    dispatcher
        .report_incident(NewReport {
            incident_type: IncidentType::Flood,
            description: "river rising".into(),
            photo_attached: false,
            video_attached: false,
        })
        .await
        .unwrap();

    let slices = dispatcher.distribution();
    assert_eq!(slices[0].count, 1); // Fire
    assert_eq!(slices[3].count, 1); // Flood
    assert_eq!(slices[0].percentage, 50);
}

// ── Persistence ─────────────────────────────────────────────────────

#[tokio::test]
async fn state_survives_a_restart() {
    let dir = tempfile::tempdir().unwrap();

    let incident_id = {
        let blobs = Arc::new(FileBlobStore::new(dir.path()).unwrap());
        let dispatcher = Dispatcher::new(manual_settings()).with_blob_store(blobs);
        dispatcher.load().unwrap();

        let incident = dispatcher.report_incident(fire_report("smoke")).await.unwrap();
        dispatcher
            .update_resource(
                &EntityId::from("1"),
                ResourceUpdate {
                    status: Some(ResourceStatus::Offline),
                    ..ResourceUpdate::default()
                },
            )
            .unwrap();
        incident.id.clone()
    };

    // Fresh dispatcher over the same data directory.
    let blobs = Arc::new(FileBlobStore::new(dir.path()).unwrap());
    let dispatcher = Dispatcher::new(manual_settings()).with_blob_store(blobs);
    dispatcher.load().unwrap();

    let incident = dispatcher.store().incident(&incident_id).unwrap();
    assert_eq!(incident.description, "smoke");
    assert_eq!(incident.checklist.len(), 4);

    let resource = dispatcher.store().resource(&EntityId::from("1")).unwrap();
    assert_eq!(resource.status, ResourceStatus::Offline);
}

#[tokio::test]
async fn load_seeds_fallback_resources_when_empty() {
    let dispatcher = Dispatcher::new(manual_settings());
    dispatcher.load().unwrap();

    let resources = dispatcher.store().resources();
    assert_eq!(resources.len(), 8);

    // Seeded resources scatter around the reference position.
    let (ref_lat, ref_lng) = dispatcher.reference_position();
    for r in resources.iter() {
        assert!((r.lat - ref_lat).abs() <= 0.015);
        assert!((r.lng - ref_lng).abs() <= 0.015);
        assert!(r.current_load <= r.capacity);
    }
}
