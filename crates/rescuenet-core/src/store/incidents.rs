// ── Ordered reactive incident log ──
//
// Incidents live in a most-recent-first ordering; mutations rebuild the
// snapshot broadcast to subscribers via a `watch` channel. Ordering is
// part of the contract, so storage is a guarded Vec rather than a map.

use std::sync::{Arc, RwLock};

use tokio::sync::watch;

use crate::model::{EntityId, Incident};

pub(crate) struct IncidentLog {
    /// Most-recent-first. The lock covers only the Vec; snapshots handed
    /// to readers are immutable `Arc`s.
    entries: RwLock<Vec<Arc<Incident>>>,

    /// Version counter, bumped on every mutation.
    version: watch::Sender<u64>,

    /// Full snapshot, rebuilt on mutation for efficient subscription.
    snapshot: watch::Sender<Arc<Vec<Arc<Incident>>>>,
}

impl IncidentLog {
    pub(crate) fn new() -> Self {
        let (version, _) = watch::channel(0u64);
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));
        Self {
            entries: RwLock::new(Vec::new()),
            version,
            snapshot,
        }
    }

    /// Insert a new incident at the front (most recent).
    pub(crate) fn insert_front(&self, incident: Incident) -> Arc<Incident> {
        let incident = Arc::new(incident);
        {
            let mut entries = self.entries.write().expect("incident lock poisoned");
            entries.insert(0, Arc::clone(&incident));
        }
        self.publish();
        incident
    }

    /// Replace the incident with `id` using `f`, preserving its position.
    /// Returns the replacement, or `None` if the id is unknown.
    pub(crate) fn update<F>(&self, id: &EntityId, f: F) -> Option<Arc<Incident>>
    where
        F: FnOnce(&Incident) -> Incident,
    {
        let updated = {
            let mut entries = self.entries.write().expect("incident lock poisoned");
            let slot = entries.iter_mut().find(|i| &i.id == id)?;
            let next = Arc::new(f(&**slot));
            *slot = Arc::clone(&next);
            next
        };
        self.publish();
        Some(updated)
    }

    /// Replace the whole log (startup load from the persistence boundary).
    pub(crate) fn replace_all(&self, incidents: Vec<Incident>) {
        {
            let mut entries = self.entries.write().expect("incident lock poisoned");
            *entries = incidents.into_iter().map(Arc::new).collect();
        }
        self.publish();
    }

    pub(crate) fn get(&self, id: &EntityId) -> Option<Arc<Incident>> {
        self.entries
            .read()
            .expect("incident lock poisoned")
            .iter()
            .find(|i| &i.id == id)
            .cloned()
    }

    /// Current snapshot (cheap `Arc` clone), most-recent-first.
    pub(crate) fn snapshot(&self) -> Arc<Vec<Arc<Incident>>> {
        self.snapshot.borrow().clone()
    }

    /// Subscribe to snapshot changes via a `watch::Receiver`.
    pub(crate) fn subscribe(&self) -> watch::Receiver<Arc<Vec<Arc<Incident>>>> {
        self.snapshot.subscribe()
    }

    /// Rebuild the broadcast snapshot and bump the version counter.
    fn publish(&self) {
        let values: Vec<Arc<Incident>> = self
            .entries
            .read()
            .expect("incident lock poisoned")
            .clone();
        // `send_modify` updates unconditionally, even with zero receivers.
        self.snapshot.send_modify(|snap| *snap = Arc::new(values));
        self.version.send_modify(|v| *v += 1);
    }
}
