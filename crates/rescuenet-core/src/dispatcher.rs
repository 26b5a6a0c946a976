// ── Dispatcher ──
//
// Central facade over the DataStore: the incident lifecycle manager and
// the resource update manager in one place. All mutations are synchronous
// and serializable against the committed snapshots; the only suspending
// calls are the external collaborators (directory, triage), and neither
// of those may block or fail a mutation.

use std::sync::{Arc, RwLock};

use chrono::Utc;
use rand::Rng;
use rescuenet_api::{DirectoryClient, TriageClient};
use tracing::{debug, info, warn};

use crate::assess::{self, CategorySlice, StressLevel};
use crate::checklist;
use crate::convert::{resource_from_record, severity_from_label};
use crate::error::CoreError;
use crate::model::{
    EntityId, Incident, IncidentStatus, IncidentType, Resource, ResourceStatus, ResourceType,
    ResourceUpdate, Settings, Severity,
};
use crate::persist::{
    BlobStore, INCIDENTS_BLOB, POSITION_BLOB, RESOURCES_BLOB, load_blob, save_blob,
};
use crate::store::DataStore;

/// Full width of the per-axis jitter applied to report coordinates, in
/// degrees. GPS/privacy fuzzing, not a precision claim.
const REPORT_JITTER_DEG: f64 = 0.01;

/// Scatter applied to seeded fallback resources around the reference
/// position, so they don't stack on one point.
const SEED_SCATTER_DEG: f64 = 0.03;

/// Severity used when triage is disabled, unavailable, or unintelligible.
const DEFAULT_SEVERITY: Severity = Severity::Medium;

/// Validated inputs for a new incident report.
#[derive(Debug, Clone)]
pub struct NewReport {
    pub incident_type: IncidentType,
    pub description: String,
    pub photo_attached: bool,
    pub video_attached: bool,
}

/// The main entry point for consumers.
///
/// Owns the [`DataStore`] plus the collaborator clients and persistence
/// handle, all supplied by the composition root. Construction never does
/// I/O; call [`load()`](Self::load) to restore persisted state.
pub struct Dispatcher {
    store: Arc<DataStore>,
    settings: Settings,
    blobs: Option<Arc<dyn BlobStore>>,
    triage: Option<TriageClient>,
    directory: Option<DirectoryClient>,
    /// Reporter reference position (lat, lng). Geolocation or persisted
    /// value when available, configured default otherwise.
    reference: RwLock<(f64, f64)>,
}

impl Dispatcher {
    pub fn new(settings: Settings) -> Self {
        let reference = (settings.default_lat, settings.default_lng);
        Self {
            store: Arc::new(DataStore::new()),
            settings,
            blobs: None,
            triage: None,
            directory: None,
            reference: RwLock::new(reference),
        }
    }

    /// Attach a persistence backend. Without one the dispatcher runs
    /// purely in memory.
    pub fn with_blob_store(mut self, blobs: Arc<dyn BlobStore>) -> Self {
        self.blobs = Some(blobs);
        self
    }

    /// Attach the triage advisory collaborator.
    pub fn with_triage(mut self, triage: TriageClient) -> Self {
        self.triage = Some(triage);
        self
    }

    /// Attach the resource directory collaborator.
    pub fn with_directory(mut self, directory: DirectoryClient) -> Self {
        self.directory = Some(directory);
        self
    }

    pub fn store(&self) -> &Arc<DataStore> {
        &self.store
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn reference_position(&self) -> (f64, f64) {
        *self.reference.read().expect("reference lock poisoned")
    }

    /// Update the reference position (e.g. after a geolocation fix) and
    /// persist it for the next session.
    pub fn set_reference_position(&self, lat: f64, lng: f64) {
        *self.reference.write().expect("reference lock poisoned") = (lat, lng);
        if let Some(blobs) = &self.blobs {
            if let Err(e) = save_blob(blobs.as_ref(), POSITION_BLOB, &(lat, lng)) {
                warn!(error = %e, "failed to persist reference position");
            }
        }
    }

    // ── Startup ──────────────────────────────────────────────────────

    /// Restore persisted state, then seed fallback resources if the
    /// resource set is still empty.
    pub fn load(&self) -> Result<(), CoreError> {
        if let Some(blobs) = &self.blobs {
            if let Some((lat, lng)) = load_blob::<(f64, f64)>(blobs.as_ref(), POSITION_BLOB)? {
                *self.reference.write().expect("reference lock poisoned") = (lat, lng);
            }
            if let Some(incidents) = load_blob::<Vec<Incident>>(blobs.as_ref(), INCIDENTS_BLOB)? {
                debug!(count = incidents.len(), "restored incident log");
                self.store.incidents.replace_all(incidents);
            }
            if let Some(resources) = load_blob::<Vec<Resource>>(blobs.as_ref(), RESOURCES_BLOB)? {
                debug!(count = resources.len(), "restored resource set");
                self.store.resources.replace_all(resources);
            }
        }
        if self.store.resources.is_empty() {
            self.seed_resources();
        }
        Ok(())
    }

    // ── Incident lifecycle ───────────────────────────────────────────

    /// Create a new incident from a report submission.
    ///
    /// Validation happens before any side effect. Severity comes from the
    /// triage collaborator when auto-triage is on, and degrades to
    /// [`DEFAULT_SEVERITY`] on any advisory failure -- classification
    /// trouble must never block a report.
    pub async fn report_incident(&self, report: NewReport) -> Result<Arc<Incident>, CoreError> {
        if report.description.trim().is_empty() {
            return Err(CoreError::EmptyDescription);
        }

        let (ref_lat, ref_lng) = self.reference_position();
        let (lat, lng) = {
            let mut rng = rand::thread_rng();
            (
                ref_lat + (rng.r#gen::<f64>() - 0.5) * REPORT_JITTER_DEG,
                ref_lng + (rng.r#gen::<f64>() - 0.5) * REPORT_JITTER_DEG,
            )
        };

        // One snapshot serves both corroboration and the monotonic stamp,
        // so classification can't race a concurrent insert.
        let snapshot = self.store.incidents();
        let nearby = assess::corroboration_count(&snapshot, lat, lng);
        let confidence =
            assess::classify(report.photo_attached, report.video_attached, nearby);

        let severity = self.assess_severity(&report).await;

        let mut timestamp = Utc::now();
        if let Some(latest) = snapshot.first().map(|i| i.timestamp) {
            timestamp = timestamp.max(latest);
        }

        let id = EntityId::random();
        let incident = Incident {
            checklist: checklist::build(&id, report.incident_type),
            id,
            incident_type: report.incident_type,
            description: report.description,
            severity,
            lat,
            lng,
            timestamp,
            status: IncidentStatus::Active,
            photo_attached: report.photo_attached,
            video_attached: report.video_attached,
            confidence,
        };

        let incident = self.store.incidents.insert_front(incident);
        info!(id = %incident.id, kind = %incident.incident_type, %severity, %confidence, "incident reported");
        self.persist_incidents();
        Ok(incident)
    }

    /// Mark an incident resolved. Terminal and one-directional: resolving
    /// an already-resolved incident is an Ok no-op; an unknown id is an
    /// error. Severity, confidence, and the checklist are untouched.
    pub fn resolve_incident(&self, id: &EntityId) -> Result<Arc<Incident>, CoreError> {
        let existing = self
            .store
            .incidents
            .get(id)
            .ok_or_else(|| CoreError::IncidentNotFound { id: id.clone() })?;

        if !existing.is_active() {
            return Ok(existing);
        }

        let resolved = self
            .store
            .incidents
            .update(id, |i| Incident {
                status: IncidentStatus::Resolved,
                ..i.clone()
            })
            .ok_or_else(|| CoreError::IncidentNotFound { id: id.clone() })?;

        info!(id = %resolved.id, "incident resolved");
        self.persist_incidents();
        Ok(resolved)
    }

    /// Flip one checklist item's `completed` flag. Valid in either
    /// lifecycle state; toggling twice restores the original value.
    pub fn toggle_checklist_item(
        &self,
        incident_id: &EntityId,
        item_id: &str,
    ) -> Result<Arc<Incident>, CoreError> {
        let existing = self
            .store
            .incidents
            .get(incident_id)
            .ok_or_else(|| CoreError::IncidentNotFound {
                id: incident_id.clone(),
            })?;

        if !existing.checklist.iter().any(|item| item.id == item_id) {
            return Err(CoreError::ChecklistItemNotFound {
                incident: incident_id.clone(),
                item: item_id.to_owned(),
            });
        }

        let updated = self
            .store
            .incidents
            .update(incident_id, |i| {
                let mut next = i.clone();
                for item in &mut next.checklist {
                    if item.id == item_id {
                        item.completed = !item.completed;
                    }
                }
                next
            })
            .ok_or_else(|| CoreError::IncidentNotFound {
                id: incident_id.clone(),
            })?;

        self.persist_incidents();
        Ok(updated)
    }

    // ── Resource management ──────────────────────────────────────────

    /// Apply a validated update to a resource's mutable fields.
    ///
    /// All-or-nothing: the combined result is validated first, and on any
    /// violation the stored record is left fully unchanged. Identity and
    /// location fields are never touched.
    pub fn update_resource(
        &self,
        id: &EntityId,
        update: ResourceUpdate,
    ) -> Result<Arc<Resource>, CoreError> {
        let existing = self
            .store
            .resources
            .get(id)
            .ok_or_else(|| CoreError::ResourceNotFound { id: id.clone() })?;

        let capacity = update.capacity.unwrap_or(existing.capacity);
        let current_load = update.current_load.unwrap_or(existing.current_load);
        if current_load > capacity {
            return Err(CoreError::InvalidResourceUpdate {
                reason: format!("currentLoad {current_load} exceeds capacity {capacity}"),
            });
        }

        let next = Resource {
            status: update.status.unwrap_or(existing.status),
            capacity,
            current_load,
            ..(*existing).clone()
        };

        let updated = self
            .store
            .resources
            .replace(id, next)
            .ok_or_else(|| CoreError::ResourceNotFound { id: id.clone() })?;

        info!(id = %updated.id, status = %updated.status, "resource updated");
        self.persist_resources();
        Ok(updated)
    }

    /// Refresh the resource set from the directory collaborator.
    ///
    /// A non-empty result replaces the set; an empty or failed fetch
    /// keeps the previous resources (seeding the fallback set if there is
    /// nothing at all). Returns the resulting resource count.
    pub async fn refresh_resources(&self) -> usize {
        if let Some(directory) = &self.directory {
            let (lat, lng) = self.reference_position();
            let records = directory
                .fetch_all(lat, lng, self.settings.search_radius_m)
                .await;
            if records.is_empty() {
                warn!("directory returned no resources, keeping current set");
            } else {
                let resources: Vec<Resource> =
                    records.into_iter().map(resource_from_record).collect();
                info!(count = resources.len(), "resource set refreshed from directory");
                self.store.resources.replace_all(resources);
                self.persist_resources();
            }
        }
        if self.store.resources.is_empty() {
            self.seed_resources();
        }
        self.store.resources.len()
    }

    // ── Derived projections ──────────────────────────────────────────

    /// Current community stress level. Recomputed from the committed
    /// snapshots on every call.
    pub fn stress(&self) -> StressLevel {
        let active = self.store.active_incidents();
        let resources = self.store.resources();
        assess::compute_stress(&active, &resources)
    }

    /// Current per-category incident distribution.
    pub fn distribution(&self) -> [CategorySlice; 5] {
        assess::distribution(&self.store.incidents())
    }

    // ── Internals ────────────────────────────────────────────────────

    async fn assess_severity(&self, report: &NewReport) -> Severity {
        if !self.settings.auto_triage {
            return DEFAULT_SEVERITY;
        }
        let Some(triage) = &self.triage else {
            return DEFAULT_SEVERITY;
        };

        match triage
            .assess(&report.description, &report.incident_type.to_string())
            .await
        {
            Ok(assessment) => severity_from_label(&assessment.severity).unwrap_or_else(|| {
                warn!(label = %assessment.severity, "unrecognized triage label, using default");
                DEFAULT_SEVERITY
            }),
            Err(e) => {
                warn!(error = %e, "triage unavailable, using default severity");
                DEFAULT_SEVERITY
            }
        }
    }

    /// Seed the fallback resource set, scattered around the reference
    /// position. Used when neither persistence nor the directory has
    /// anything to offer.
    fn seed_resources(&self) {
        let (ref_lat, ref_lng) = self.reference_position();
        let mut rng = rand::thread_rng();
        let mut place = |r: Resource| {
            let scattered = Resource {
                lat: ref_lat + (rng.r#gen::<f64>() - 0.5) * SEED_SCATTER_DEG,
                lng: ref_lng + (rng.r#gen::<f64>() - 0.5) * SEED_SCATTER_DEG,
                ..r
            };
            self.store.resources.upsert(scattered);
        };

        for (id, name, resource_type, contact, capacity, current_load) in [
            ("1", "Alpha 1", ResourceType::Ambulance, "555-0101", 2, 0),
            ("2", "Fire Station 4", ResourceType::FireStation, "101", 6, 0),
            ("3", "Rescue 9", ResourceType::Ambulance, "555-0103", 4, 0),
            ("4", "Police Station 12", ResourceType::PoliceStation, "100", 4, 2),
            ("5", "Central Hospital", ResourceType::Hospital, "102", 150, 89),
            ("6", "St. Mary Medical Center", ResourceType::Hospital, "102", 200, 165),
            ("7", "Emergency Shelter A", ResourceType::Shelter, "555-0301", 500, 120),
            ("8", "Community Shelter B", ResourceType::Shelter, "555-0302", 300, 45),
        ] {
            place(Resource {
                id: EntityId::from(id),
                name: name.to_owned(),
                resource_type,
                status: ResourceStatus::Available,
                lat: 0.0,
                lng: 0.0,
                contact: contact.to_owned(),
                capacity,
                current_load,
                assigned_to: None,
            });
        }
        info!(count = self.store.resources.len(), "seeded fallback resources");
        self.persist_resources();
    }

    /// Persist-after-mutation. A write failure is logged, never allowed
    /// to fail the mutation that already committed.
    fn persist_incidents(&self) {
        if let Some(blobs) = &self.blobs {
            let snapshot = self.store.incidents();
            let plain: Vec<&Incident> = snapshot.iter().map(Arc::as_ref).collect();
            if let Err(e) = save_blob(blobs.as_ref(), INCIDENTS_BLOB, &plain) {
                warn!(error = %e, "failed to persist incidents");
            }
        }
    }

    fn persist_resources(&self) {
        if let Some(blobs) = &self.blobs {
            let snapshot = self.store.resources();
            let plain: Vec<&Resource> = snapshot.iter().map(Arc::as_ref).collect();
            if let Err(e) = save_blob(blobs.as_ref(), RESOURCES_BLOB, &plain) {
                warn!(error = %e, "failed to persist resources");
            }
        }
    }
}
