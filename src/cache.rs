use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use tokio::sync::Mutex;
use uuid::Uuid;

use crate::analytics::MetricsSummary;

/// Computed summaries keyed by `(owner_id, data_version)`.
///
/// Writers call `invalidate` after every insert, which bumps the owner's
/// version so no summary computed from older data is served again.
///
/// Both maps are bounded. Entries beyond `capacity` are evicted oldest first;
/// once counters outnumber twice the capacity, counters of owners with nothing
/// cached are dropped and those owners fall back to a shared floor version
/// that is newer than anything handed out before. A result computed before the
/// drop is then refused by `put`, which costs a recompute and never serves
/// stale data.
#[derive(Clone)]
pub struct MetricsCache {
    inner: Arc<Mutex<CacheInner>>,
}

struct CacheInner {
    capacity: usize,
    /// Data version per owner with a live counter.
    versions: HashMap<Uuid, u64>,
    /// Version of every owner without a counter.
    floor: u64,
    /// Last version handed out. Only grows.
    clock: u64,
    entries: HashMap<(Uuid, u64), Arc<MetricsSummary>>,
    /// Insertion order, oldest first.
    order: VecDeque<(Uuid, u64)>,
}

impl CacheInner {
    fn current(&self, owner_id: &Uuid) -> u64 {
        self.versions.get(owner_id).copied().unwrap_or(self.floor)
    }

    fn prune_counters(&mut self) {
        if self.versions.len() <= self.capacity * 2 {
            return;
        }

        let entries = &self.entries;
        let before = self.versions.len();
        self.versions
            .retain(|owner, version| entries.contains_key(&(*owner, *version)));

        self.clock += 1;
        self.floor = self.clock;

        tracing::debug!(
            dropped = before - self.versions.len(),
            floor = self.floor,
            "Metrics cache: pruned version counters"
        );
    }
}

impl MetricsCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(CacheInner {
                capacity: capacity.max(1),
                versions: HashMap::new(),
                floor: 0,
                clock: 0,
                entries: HashMap::new(),
                order: VecDeque::new(),
            })),
        }
    }

    pub async fn version(&self, owner_id: Uuid) -> u64 {
        self.inner.lock().await.current(&owner_id)
    }

    /// Summary for the owner's current data version, if computed.
    pub async fn get(&self, owner_id: Uuid) -> Option<Arc<MetricsSummary>> {
        let inner = self.inner.lock().await;
        let version = inner.current(&owner_id);
        inner.entries.get(&(owner_id, version)).cloned()
    }

    /// Store a summary computed from data at `version`. Dropped when a write
    /// has bumped the version in the meantime.
    pub async fn put(&self, owner_id: Uuid, version: u64, summary: Arc<MetricsSummary>) -> bool {
        let mut inner = self.inner.lock().await;
        let current = inner.current(&owner_id);
        if current != version {
            tracing::debug!(
                owner_id = %owner_id,
                computed_at = version,
                current = current,
                "Metrics cache: discarding stale summary"
            );
            return false;
        }

        // an owner with a cached entry always keeps its counter
        inner.versions.insert(owner_id, version);

        let key = (owner_id, version);
        if inner.entries.insert(key, summary).is_none() {
            inner.order.push_back(key);
        }

        while inner.entries.len() > inner.capacity {
            let Some(oldest) = inner.order.pop_front() else {
                break;
            };
            inner.entries.remove(&oldest);
        }

        inner.prune_counters();
        true
    }

    /// Bump the owner's data version and drop everything cached for them.
    pub async fn invalidate(&self, owner_id: Uuid) -> u64 {
        let mut inner = self.inner.lock().await;
        inner.clock += 1;
        let new_version = inner.clock;
        inner.versions.insert(owner_id, new_version);

        inner.entries.retain(|(owner, _), _| *owner != owner_id);
        inner.order.retain(|(owner, _)| *owner != owner_id);
        inner.prune_counters();

        tracing::debug!(owner_id = %owner_id, version = new_version, "Metrics cache: invalidated");
        new_version
    }

    /// Number of cached summaries.
    pub async fn len(&self) -> usize {
        self.inner.lock().await.entries.len()
    }
}
