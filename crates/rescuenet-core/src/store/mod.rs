//! Reactive in-memory state: the sole source of truth for incidents and
//! resources. Owned by the composition root and passed by reference --
//! there are no ambient singletons. Derived values (stress, distribution,
//! confidence of a new report) are computed from snapshots on demand.

mod incidents;
mod resources;

use std::sync::Arc;

use tokio::sync::watch;

use crate::model::{EntityId, Incident, Resource};

pub(crate) use incidents::IncidentLog;
pub(crate) use resources::ResourceSet;

/// One mutable collection of incidents and one of resources.
pub struct DataStore {
    pub(crate) incidents: IncidentLog,
    pub(crate) resources: ResourceSet,
}

impl Default for DataStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DataStore {
    pub fn new() -> Self {
        Self {
            incidents: IncidentLog::new(),
            resources: ResourceSet::new(),
        }
    }

    // ── Read side ────────────────────────────────────────────────────

    /// All incidents, most-recent-first.
    pub fn incidents(&self) -> Arc<Vec<Arc<Incident>>> {
        self.incidents.snapshot()
    }

    /// Active incidents only, most-recent-first.
    pub fn active_incidents(&self) -> Vec<Arc<Incident>> {
        self.incidents
            .snapshot()
            .iter()
            .filter(|i| i.is_active())
            .cloned()
            .collect()
    }

    pub fn incident(&self, id: &EntityId) -> Option<Arc<Incident>> {
        self.incidents.get(id)
    }

    /// All resources. Unordered; sort for display.
    pub fn resources(&self) -> Arc<Vec<Arc<Resource>>> {
        self.resources.snapshot()
    }

    pub fn resource(&self, id: &EntityId) -> Option<Arc<Resource>> {
        self.resources.get(id)
    }

    // ── Subscriptions (for a rendering layer) ────────────────────────

    pub fn subscribe_incidents(&self) -> watch::Receiver<Arc<Vec<Arc<Incident>>>> {
        self.incidents.subscribe()
    }

    pub fn subscribe_resources(&self) -> watch::Receiver<Arc<Vec<Arc<Resource>>>> {
        self.resources.subscribe()
    }
}
