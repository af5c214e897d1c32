//! Statistics counters for a link
//!
//! Updated from the event loop with relaxed atomics; read from
//! anywhere via an owned snapshot.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters maintained over a link's lifetime
#[derive(Debug, Default)]
pub struct LinkStats {
    /// Frames broadcast (announces, unannounces, resync requests)
    pub frames_sent: AtomicU64,
    /// Frames received from other peers
    pub frames_received: AtomicU64,
    /// Announces received
    pub announces_received: AtomicU64,
    /// Resync requests answered with a fresh announce
    pub resyncs_answered: AtomicU64,
    /// Heartbeat resync requests emitted
    pub heartbeats_sent: AtomicU64,
    /// Frames dropped as malformed or unrecognized
    pub malformed_dropped: AtomicU64,
}

impl LinkStats {
    /// Create zeroed counters
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_sent(&self) {
        self.frames_sent.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_received(&self) {
        self.frames_received.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_announce(&self) {
        self.announces_received.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_resync_answered(&self) {
        self.resyncs_answered.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_heartbeat(&self) {
        self.heartbeats_sent.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_malformed(&self) {
        self.malformed_dropped.fetch_add(1, Ordering::Relaxed);
    }

    /// Owned copy of the current counter values
    pub fn snapshot(&self) -> LinkStatsSnapshot {
        LinkStatsSnapshot {
            frames_sent: self.frames_sent.load(Ordering::Relaxed),
            frames_received: self.frames_received.load(Ordering::Relaxed),
            announces_received: self.announces_received.load(Ordering::Relaxed),
            resyncs_answered: self.resyncs_answered.load(Ordering::Relaxed),
            heartbeats_sent: self.heartbeats_sent.load(Ordering::Relaxed),
            malformed_dropped: self.malformed_dropped.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time view of [`LinkStats`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkStatsSnapshot {
    pub frames_sent: u64,
    pub frames_received: u64,
    pub announces_received: u64,
    pub resyncs_answered: u64,
    pub heartbeats_sent: u64,
    pub malformed_dropped: u64,
}
