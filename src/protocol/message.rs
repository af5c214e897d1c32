//! Protocol message types

use uuid::Uuid;

use crate::canvas::Geometry;

/// Identity of one peer window
///
/// Generated once per process at link construction and never reused; a
/// restarted process joins as a brand-new peer. Collisions between
/// independently generated ids are not detected, the registry would
/// silently merge the two peers (accepted given the v4 space).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PeerId(Uuid);

impl PeerId {
    /// Generate a fresh random identity
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Raw byte representation used on the wire
    pub fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }

    /// Reconstruct an identity from its wire bytes
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(Uuid::from_bytes(bytes))
    }
}

impl std::fmt::Display for PeerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A message broadcast on the coordination channel
///
/// Every variant carries the id of the peer that originated it, which
/// transports also use to filter out self-delivered frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeerMessage {
    /// "I exist, here is my current geometry"
    Announce { id: PeerId, geometry: Geometry },
    /// "I am leaving"
    Unannounce { id: PeerId },
    /// "Everyone but me, please re-announce"
    ResyncRequest { requester: PeerId },
}

impl PeerMessage {
    /// The peer that sent this message
    pub fn origin(&self) -> PeerId {
        match self {
            PeerMessage::Announce { id, .. } => *id,
            PeerMessage::Unannounce { id } => *id,
            PeerMessage::ResyncRequest { requester } => *requester,
        }
    }
}
