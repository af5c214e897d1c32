//! Peer record type
//!
//! One record per known remote peer, held in the registry.

use std::time::Instant;

use crate::canvas::Geometry;
use crate::protocol::PeerId;

/// Last-known state of one remote peer
///
/// Registry contents are a cache: between protocol events a record may
/// lag behind the peer's real window geometry. The next resync round
/// refreshes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeerRecord {
    /// The peer's identity
    pub id: PeerId,

    /// Geometry from the peer's most recent announce
    pub geometry: Geometry,

    /// When the most recent announce for this peer arrived
    pub refreshed_at: Instant,
}

impl PeerRecord {
    /// Create a record from a just-received announce
    pub fn new(id: PeerId, geometry: Geometry) -> Self {
        Self {
            id,
            geometry,
            refreshed_at: Instant::now(),
        }
    }

    /// Time since the last announce refreshed this record
    pub fn age(&self) -> std::time::Duration {
        self.refreshed_at.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_is_fresh() {
        let record = PeerRecord::new(PeerId::generate(), Geometry::new(0, 0, 800, 600));

        assert!(record.age() < std::time::Duration::from_secs(1));
    }
}
