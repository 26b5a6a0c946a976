// ── Keyed reactive resource set ──
//
// Lock-free concurrent storage keyed by resource id, with push-based
// change notification via `watch` channels. Resources have no ordering
// contract; consumers sort for display.

use std::collections::HashSet;
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::watch;

use crate::model::{EntityId, Resource};

pub(crate) struct ResourceSet {
    by_id: DashMap<String, Arc<Resource>>,

    /// Version counter, bumped on every mutation.
    version: watch::Sender<u64>,

    /// Full snapshot, rebuilt on mutation for efficient subscription.
    snapshot: watch::Sender<Arc<Vec<Arc<Resource>>>>,
}

impl ResourceSet {
    pub(crate) fn new() -> Self {
        let (version, _) = watch::channel(0u64);
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));
        Self {
            by_id: DashMap::new(),
            version,
            snapshot,
        }
    }

    /// Insert or update a resource. Returns `true` if the id was new.
    pub(crate) fn upsert(&self, resource: Resource) -> bool {
        let key = resource.id.to_string();
        let is_new = !self.by_id.contains_key(&key);
        self.by_id.insert(key, Arc::new(resource));
        self.publish();
        is_new
    }

    /// Atomically replace the resource with `id`. The replacement is
    /// computed and validated by the caller before this is invoked, so the
    /// swap itself is all-or-nothing. Returns `None` for an unknown id.
    pub(crate) fn replace(&self, id: &EntityId, resource: Resource) -> Option<Arc<Resource>> {
        let key = id.to_string();
        if !self.by_id.contains_key(&key) {
            return None;
        }
        let next = Arc::new(resource);
        self.by_id.insert(key, Arc::clone(&next));
        self.publish();
        Some(next)
    }

    /// Apply a full directory refresh: upsert all incoming records, then
    /// prune ids not in the incoming set. Avoids the brief empty state a
    /// clear-then-insert approach would cause.
    pub(crate) fn replace_all(&self, resources: Vec<Resource>) {
        let incoming: HashSet<String> = resources.iter().map(|r| r.id.to_string()).collect();
        for resource in resources {
            self.by_id
                .insert(resource.id.to_string(), Arc::new(resource));
        }
        self.by_id.retain(|key, _| incoming.contains(key));
        self.publish();
    }

    pub(crate) fn get(&self, id: &EntityId) -> Option<Arc<Resource>> {
        self.by_id.get(&id.to_string()).map(|r| Arc::clone(r.value()))
    }

    /// Current snapshot (cheap `Arc` clone). Unordered.
    pub(crate) fn snapshot(&self) -> Arc<Vec<Arc<Resource>>> {
        self.snapshot.borrow().clone()
    }

    /// Subscribe to snapshot changes via a `watch::Receiver`.
    pub(crate) fn subscribe(&self) -> watch::Receiver<Arc<Vec<Arc<Resource>>>> {
        self.snapshot.subscribe()
    }

    pub(crate) fn len(&self) -> usize {
        self.by_id.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Rebuild the broadcast snapshot and bump the version counter.
    fn publish(&self) {
        let values: Vec<Arc<Resource>> =
            self.by_id.iter().map(|r| Arc::clone(r.value())).collect();
        self.snapshot.send_modify(|snap| *snap = Arc::new(values));
        self.version.send_modify(|v| *v += 1);
    }
}
