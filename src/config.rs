//! Link configuration

use std::net::{Ipv4Addr, SocketAddrV4};
use std::time::Duration;

/// Default multicast group shared by all cooperating processes.
///
/// Every peer must use the identical group and port to interoperate;
/// treat these as a channel name, not a tunable.
pub const DEFAULT_GROUP: Ipv4Addr = Ipv4Addr::new(239, 255, 71, 35);

/// Default multicast port
pub const DEFAULT_PORT: u16 = 47135;

/// Default heartbeat interval between resync requests
pub const DEFAULT_HEARTBEAT: Duration = Duration::from_millis(1000);

/// Link configuration options
#[derive(Debug, Clone)]
pub struct LinkConfig {
    /// Multicast group to join
    pub group: Ipv4Addr,

    /// Multicast port
    pub port: u16,

    /// Interval between heartbeat resync requests
    pub heartbeat_interval: Duration,

    /// Optional staleness eviction, expressed in heartbeat intervals.
    ///
    /// `None` (the default) keeps a peer's record until an explicit
    /// unannounce arrives, so a peer that crashes leaves a ghost entry.
    /// That matches the protocol as designed. Setting `Some(n)` drops a
    /// record not refreshed by any announce within `n` heartbeat
    /// intervals; this is an extension, not the faithful behavior.
    pub evict_after: Option<u32>,

    /// Maximum accepted datagram size; larger frames are dropped
    pub max_frame_size: usize,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            group: DEFAULT_GROUP,
            port: DEFAULT_PORT,
            heartbeat_interval: DEFAULT_HEARTBEAT,
            evict_after: None,
            max_frame_size: 512,
        }
    }
}

impl LinkConfig {
    /// Create a config joining a custom multicast group
    pub fn with_group(group: Ipv4Addr, port: u16) -> Self {
        Self {
            group,
            port,
            ..Default::default()
        }
    }

    /// Set the heartbeat interval
    pub fn heartbeat_interval(mut self, interval: Duration) -> Self {
        self.heartbeat_interval = interval;
        self
    }

    /// Enable staleness eviction after `heartbeats` missed intervals
    ///
    /// See the field documentation: this deviates from the default
    /// ghost-preserving behavior and must be chosen explicitly.
    pub fn evict_after(mut self, heartbeats: u32) -> Self {
        self.evict_after = Some(heartbeats.max(1));
        self
    }

    /// Socket address of the multicast group
    pub fn group_addr(&self) -> SocketAddrV4 {
        SocketAddrV4::new(self.group, self.port)
    }

    /// Staleness cutoff derived from the heartbeat interval, if eviction
    /// is enabled
    pub fn stale_after(&self) -> Option<Duration> {
        self.evict_after
            .map(|n| self.heartbeat_interval.saturating_mul(n))
    }
}
