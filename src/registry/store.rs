//! Peer registry implementation
//!
//! In-memory map of every known remote peer, keyed by peer id. The
//! link's event loop owns the only write path (announce, unannounce,
//! eviction); readers take owned snapshots so a render thread can poll
//! at its own cadence.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::RwLock;

use crate::canvas::Geometry;
use crate::protocol::PeerId;

use super::entry::PeerRecord;

/// Registry of known remote peers
///
/// Thread-safe via `RwLock`; `list` copies under a brief read lock so
/// callers never hold a view into live state. Never contains the
/// owning link's own id.
pub struct PeerRegistry {
    /// Id of the owning link; upserts for it are ignored
    own_id: PeerId,

    /// Map of peer id to last-known record
    peers: RwLock<HashMap<PeerId, PeerRecord>>,
}

impl PeerRegistry {
    /// Create an empty registry owned by `own_id`
    pub fn new(own_id: PeerId) -> Self {
        Self {
            own_id,
            peers: RwLock::new(HashMap::new()),
        }
    }

    /// Insert or replace the record for a peer, last write wins
    ///
    /// Self-announces are ignored here even though transports already
    /// filter self-delivery; this is the invariant's last line of
    /// defense, mirroring the origin check at the transport edge.
    pub async fn upsert(&self, id: PeerId, geometry: Geometry) {
        if id == self.own_id {
            tracing::trace!(peer = %id, "Ignoring self announce");
            return;
        }

        let mut peers = self.peers.write().await;
        let previous = peers.insert(id, PeerRecord::new(id, geometry));

        match previous {
            Some(old) if old.geometry != geometry => {
                tracing::debug!(peer = %id, from = %old.geometry, to = %geometry, "Peer moved");
            }
            Some(_) => {}
            None => {
                tracing::info!(peer = %id, geometry = %geometry, total = peers.len(), "Peer joined");
            }
        }
    }

    /// Delete the record for a peer
    ///
    /// Idempotent: removing an absent id is not an error. No tombstone
    /// is kept; the same id may reappear on a later announce.
    pub async fn remove(&self, id: PeerId) {
        let mut peers = self.peers.write().await;
        if peers.remove(&id).is_some() {
            tracing::info!(peer = %id, total = peers.len(), "Peer left");
        }
    }

    /// Snapshot of all current records, order unspecified
    pub async fn list(&self) -> Vec<PeerRecord> {
        self.peers.read().await.values().copied().collect()
    }

    /// Number of known peers
    pub async fn len(&self) -> usize {
        self.peers.read().await.len()
    }

    /// True when no peers are known
    pub async fn is_empty(&self) -> bool {
        self.peers.read().await.is_empty()
    }

    /// Whether a record for `id` exists
    pub async fn contains(&self, id: PeerId) -> bool {
        self.peers.read().await.contains_key(&id)
    }

    /// Drop records not refreshed within `stale_after`
    ///
    /// Only called when eviction is explicitly configured; by default a
    /// peer that vanished without an unannounce stays in the registry
    /// forever. Returns the number of evicted records.
    pub async fn evict_stale(&self, stale_after: Duration) -> usize {
        let mut peers = self.peers.write().await;
        let before = peers.len();

        peers.retain(|id, record| {
            let keep = record.age() <= stale_after;
            if !keep {
                tracing::info!(peer = %id, age_ms = record.age().as_millis() as u64, "Evicting stale peer");
            }
            keep
        });

        before - peers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> PeerRegistry {
        PeerRegistry::new(PeerId::generate())
    }

    #[tokio::test]
    async fn test_last_write_wins() {
        let registry = registry();
        let id = PeerId::generate();

        registry.upsert(id, Geometry::new(0, 0, 800, 600)).await;
        registry.upsert(id, Geometry::new(100, 50, 800, 600)).await;

        let peers = registry.list().await;
        assert_eq!(peers.len(), 1);
        assert_eq!(peers[0].geometry, Geometry::new(100, 50, 800, 600));
    }

    #[tokio::test]
    async fn test_duplicate_announce_keeps_one_record() {
        let registry = registry();
        let id = PeerId::generate();
        let geometry = Geometry::new(10, 20, 640, 480);

        registry.upsert(id, geometry).await;
        registry.upsert(id, geometry).await;

        let peers = registry.list().await;
        assert_eq!(peers.len(), 1);
        assert_eq!(peers[0].geometry, geometry);
    }

    #[tokio::test]
    async fn test_self_announce_ignored() {
        let own_id = PeerId::generate();
        let registry = PeerRegistry::new(own_id);

        registry.upsert(own_id, Geometry::new(0, 0, 800, 600)).await;

        assert!(registry.is_empty().await);
    }

    #[tokio::test]
    async fn test_remove_absent_is_noop() {
        let registry = registry();
        let id = PeerId::generate();

        registry.upsert(id, Geometry::new(0, 0, 800, 600)).await;
        registry.remove(PeerId::generate()).await;

        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn test_removed_id_may_reappear() {
        let registry = registry();
        let id = PeerId::generate();

        registry.upsert(id, Geometry::new(0, 0, 800, 600)).await;
        registry.remove(id).await;
        assert!(!registry.contains(id).await);

        registry.upsert(id, Geometry::new(5, 5, 800, 600)).await;
        assert!(registry.contains(id).await);
    }

    #[tokio::test]
    async fn test_list_is_a_snapshot() {
        let registry = registry();
        let id = PeerId::generate();

        registry.upsert(id, Geometry::new(0, 0, 800, 600)).await;
        let snapshot = registry.list().await;

        registry.remove(id).await;

        // The snapshot is unaffected by later mutation
        assert_eq!(snapshot.len(), 1);
        assert!(registry.is_empty().await);
    }

    #[tokio::test]
    async fn test_evict_stale() {
        let registry = registry();
        let old = PeerId::generate();
        let fresh = PeerId::generate();

        registry.upsert(old, Geometry::new(0, 0, 100, 100)).await;
        tokio::time::sleep(Duration::from_millis(30)).await;
        registry.upsert(fresh, Geometry::new(0, 0, 100, 100)).await;

        let evicted = registry.evict_stale(Duration::from_millis(20)).await;

        assert_eq!(evicted, 1);
        assert!(!registry.contains(old).await);
        assert!(registry.contains(fresh).await);
    }
}
