//! Broadcast transports
//!
//! A transport is the local, best-effort, unordered broadcast medium
//! shared by every peer on the channel: no acknowledgment, no retry, no
//! ordering across peers. A dropped frame is simply lost; the periodic
//! resync heartbeat makes the protocol self-correcting.
//!
//! Two media are provided. [`UdpTransport`] joins a loopback multicast
//! group, the host-local analog of a named broadcast channel, and is
//! what separate processes use. [`LocalBus`] fans frames out inside one
//! process for peers running as tasks, and backs the integration tests.
//! When the medium cannot be opened the link degrades to
//! [`NoopTransport`] and observes itself only.
//!
//! Transports never deliver a frame back to its originating peer: the
//! frame header carries the origin id and the receive path filters on
//! it.

use bytes::Bytes;

pub mod local;
pub mod udp;

pub use local::{LocalBus, LocalTransport};
pub use udp::UdpTransport;

/// A best-effort broadcast medium endpoint
///
/// One endpoint per link; the link's event loop owns it exclusively.
pub trait Transport: Send + 'static {
    /// Broadcast a frame to every other endpoint on the channel
    ///
    /// Fire and forget: delivery failures are logged and swallowed.
    fn send(&self, frame: Bytes) -> impl std::future::Future<Output = ()> + Send;

    /// Next frame originated by another peer
    ///
    /// Pends until a frame arrives; returns `None` when the medium is
    /// closed and no further frames will ever arrive.
    fn recv(&mut self) -> impl std::future::Future<Output = Option<Bytes>> + Send;

    /// True when the medium could not be opened
    ///
    /// A degraded endpoint drops every send and never yields a frame;
    /// the owner checks this to skip futile heartbeat chatter.
    fn is_degraded(&self) -> bool {
        false
    }
}

/// Endpoint on a medium that could not be opened
///
/// Sends are dropped and the receive side pends forever, so the owning
/// link observes itself only.
#[derive(Debug, Default)]
pub struct NoopTransport;

impl Transport for NoopTransport {
    async fn send(&self, _frame: Bytes) {}

    async fn recv(&mut self) -> Option<Bytes> {
        std::future::pending().await
    }

    fn is_degraded(&self) -> bool {
        true
    }
}

/// Default medium for peers running as separate processes
///
/// Multicast when the socket opens, no-op fallback when it does not;
/// opening a link never fails on transport unavailability.
pub enum HostTransport {
    Udp(UdpTransport),
    Noop(NoopTransport),
}

impl HostTransport {
    /// Open the multicast medium, degrading to no-op on failure
    pub fn open(config: &crate::config::LinkConfig, local: crate::protocol::PeerId) -> Self {
        match UdpTransport::open(config, local) {
            Ok(udp) => HostTransport::Udp(udp),
            Err(e) => {
                tracing::warn!(
                    group = %config.group_addr(),
                    error = %e,
                    "Broadcast medium unavailable, running single-pane"
                );
                HostTransport::Noop(NoopTransport)
            }
        }
    }
}

impl Transport for HostTransport {
    async fn send(&self, frame: Bytes) {
        match self {
            HostTransport::Udp(t) => t.send(frame).await,
            HostTransport::Noop(t) => t.send(frame).await,
        }
    }

    async fn recv(&mut self) -> Option<Bytes> {
        match self {
            HostTransport::Udp(t) => t.recv().await,
            HostTransport::Noop(t) => t.recv().await,
        }
    }

    fn is_degraded(&self) -> bool {
        match self {
            HostTransport::Udp(t) => t.is_degraded(),
            HostTransport::Noop(t) => t.is_degraded(),
        }
    }
}
