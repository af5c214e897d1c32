//! Link handle and event loop
//!
//! [`PaneLink`] is the coordination context a process constructs once
//! at startup and hands (by clone) to whatever needs geometry: the
//! render core, UI glue. Construction spawns the event loop task that
//! owns the transport endpoint and the registry's write path; handles
//! only read snapshots and enqueue commands.
//!
//! Join, the message handlers, the heartbeat, and teardown together
//! implement the coordination protocol described in [`crate::protocol`].

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, RwLock};

use crate::canvas::{aggregate, CanvasView, Geometry, GeometrySource};
use crate::config::LinkConfig;
use crate::error::{LinkError, Result};
use crate::protocol::{codec, PeerId, PeerMessage};
use crate::registry::{PeerRecord, PeerRegistry};
use crate::stats::{LinkStats, LinkStatsSnapshot};
use crate::transport::{HostTransport, Transport};

use super::state::LinkPhase;

/// Commands from handles to the event loop
enum Command {
    /// Broadcast a resync request outside the heartbeat schedule
    Resync,
    /// Broadcast the unannounce and stop; ack when done
    Shutdown(oneshot::Sender<()>),
}

/// Handle to one window's coordination link
///
/// Cheap to clone; all clones share the same link. One link per
/// process is the intended composition: a second link in the same
/// process would double-announce and corrupt peer counts on the
/// channel.
#[derive(Clone)]
pub struct PaneLink {
    id: PeerId,
    source: Arc<dyn GeometrySource>,
    registry: Arc<PeerRegistry>,
    stats: Arc<LinkStats>,
    phase: Arc<RwLock<LinkPhase>>,
    cmd_tx: mpsc::Sender<Command>,
    degraded: bool,
}

impl PaneLink {
    /// Open a link over the host's multicast medium
    ///
    /// Never fails: if the medium cannot be opened the link runs
    /// degraded (observing itself only) and [`is_degraded`] reports it.
    ///
    /// [`is_degraded`]: PaneLink::is_degraded
    pub fn connect(config: LinkConfig, source: impl GeometrySource) -> Self {
        Self::over(config, source, |id, config| HostTransport::open(config, id))
    }

    /// Open a link over a caller-supplied medium
    ///
    /// The closure receives the link's freshly generated id so the
    /// transport can filter self-delivered frames; used with
    /// [`LocalBus`](crate::transport::LocalBus) endpoints and in tests.
    pub fn over<T, F>(config: LinkConfig, source: impl GeometrySource, make_transport: F) -> Self
    where
        T: Transport + Sync,
        F: FnOnce(PeerId, &LinkConfig) -> T,
    {
        let id = PeerId::generate();
        let transport = make_transport(id, &config);
        let degraded = transport.is_degraded();

        let source: Arc<dyn GeometrySource> = Arc::new(source);
        let registry = Arc::new(PeerRegistry::new(id));
        let stats = Arc::new(LinkStats::new());
        let phase = Arc::new(RwLock::new(LinkPhase::Joining));
        let (cmd_tx, cmd_rx) = mpsc::channel(16);

        tracing::info!(peer = %id, degraded = degraded, "Link opened");

        tokio::spawn(run_loop(LinkWorker {
            id,
            config,
            transport,
            source: Arc::clone(&source),
            registry: Arc::clone(&registry),
            stats: Arc::clone(&stats),
            phase: Arc::clone(&phase),
            cmd_rx,
        }));

        Self {
            id,
            source,
            registry,
            stats,
            phase,
            cmd_tx,
            degraded,
        }
    }

    /// This link's identity on the channel
    pub fn id(&self) -> PeerId {
        self.id
    }

    /// True when the broadcast medium was unavailable at construction
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// Current lifecycle phase
    pub async fn phase(&self) -> LinkPhase {
        *self.phase.read().await
    }

    /// Live query of the owning window's geometry, never cached
    pub fn self_geometry(&self) -> Geometry {
        self.source.current()
    }

    /// Snapshot of all known remote peers
    ///
    /// Freshness is bounded by the heartbeat interval; between resync
    /// rounds a peer's record may lag its real geometry.
    pub async fn peers(&self) -> Vec<PeerRecord> {
        self.registry.list().await
    }

    /// Virtual canvas bounds and this window's normalized offset
    pub async fn aggregate(&self) -> CanvasView {
        let self_geometry = self.self_geometry();
        let peers = self.registry.list().await;
        aggregate(self_geometry, peers.into_iter().map(|p| p.geometry))
    }

    /// Ask every other peer to re-announce immediately
    ///
    /// The heartbeat does this on a schedule; call this to refresh
    /// sooner, e.g. from a resize/move notification.
    pub async fn request_resync(&self) -> Result<()> {
        self.cmd_tx
            .send(Command::Resync)
            .await
            .map_err(|_| LinkError::LinkClosed)
    }

    /// Statistics counters
    pub fn stats(&self) -> LinkStatsSnapshot {
        self.stats.snapshot()
    }

    /// Leave the channel: best-effort unannounce, then stop the loop
    ///
    /// Terminal; the handle (and its clones) cannot be reused. Errors
    /// if the link already shut down.
    pub async fn shutdown(&self) -> Result<()> {
        let (ack_tx, ack_rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Shutdown(ack_tx))
            .await
            .map_err(|_| LinkError::LinkClosed)?;
        ack_rx.await.map_err(|_| LinkError::LinkClosed)
    }
}

impl std::fmt::Debug for PaneLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaneLink")
            .field("id", &self.id)
            .field("degraded", &self.degraded)
            .finish()
    }
}

/// Everything the event loop task owns
struct LinkWorker<T: Transport> {
    id: PeerId,
    config: LinkConfig,
    transport: T,
    source: Arc<dyn GeometrySource>,
    registry: Arc<PeerRegistry>,
    stats: Arc<LinkStats>,
    phase: Arc<RwLock<LinkPhase>>,
    cmd_rx: mpsc::Receiver<Command>,
}

impl<T: Transport> LinkWorker<T> {
    async fn broadcast(&self, message: &PeerMessage) {
        if self.transport.is_degraded() {
            return;
        }
        self.transport.send(codec::encode(message)).await;
        self.stats.record_sent();
    }

    /// Announce with geometry re-queried at this moment, not cached;
    /// this is how window drift since the last announce becomes
    /// visible to others.
    async fn announce_self(&self) {
        let geometry = self.source.current();
        self.broadcast(&PeerMessage::Announce {
            id: self.id,
            geometry,
        })
        .await;
    }

    async fn handle_frame(&self, frame: bytes::Bytes) {
        self.stats.record_received();

        let message = match codec::decode(&frame) {
            Ok(message) => message,
            Err(e) => {
                tracing::trace!(error = %e, len = frame.len(), "Dropping malformed frame");
                self.stats.record_malformed();
                return;
            }
        };

        match message {
            PeerMessage::Announce { id, geometry } => {
                self.stats.record_announce();
                self.registry.upsert(id, geometry).await;
            }
            PeerMessage::Unannounce { id } => {
                self.registry.remove(id).await;
            }
            PeerMessage::ResyncRequest { requester } => {
                // Transports filter self-delivery; keep the check anyway
                if requester == self.id {
                    return;
                }
                self.stats.record_resync_answered();
                self.announce_self().await;
            }
        }
    }
}

async fn run_loop<T: Transport>(mut worker: LinkWorker<T>) {
    // Join burst: ask the incumbents to reveal themselves, and give
    // them our geometry so they need not wait for their own timers
    worker
        .broadcast(&PeerMessage::ResyncRequest {
            requester: worker.id,
        })
        .await;
    worker.announce_self().await;
    worker.phase.write().await.activate();

    let mut heartbeat = tokio::time::interval(worker.config.heartbeat_interval);
    heartbeat.tick().await; // immediate first tick; the join burst covered it

    loop {
        tokio::select! {
            frame = worker.transport.recv() => {
                match frame {
                    Some(frame) => worker.handle_frame(frame).await,
                    None => {
                        tracing::warn!(peer = %worker.id, "Broadcast medium closed");
                        break;
                    }
                }
            }
            _ = heartbeat.tick() => {
                // Sole mechanism that refreshes stale peer geometry:
                // movement generates no protocol message of its own
                worker.stats.record_heartbeat();
                worker
                    .broadcast(&PeerMessage::ResyncRequest { requester: worker.id })
                    .await;

                if let Some(stale_after) = worker.config.stale_after() {
                    worker.registry.evict_stale(stale_after).await;
                }
            }
            cmd = worker.cmd_rx.recv() => {
                match cmd {
                    Some(Command::Resync) => {
                        worker
                            .broadcast(&PeerMessage::ResyncRequest { requester: worker.id })
                            .await;
                    }
                    Some(Command::Shutdown(ack)) => {
                        worker.broadcast(&PeerMessage::Unannounce { id: worker.id }).await;
                        worker.phase.write().await.leave();
                        tracing::info!(peer = %worker.id, "Link left the channel");
                        let _ = ack.send(());
                        break;
                    }
                    // Every handle dropped: leave as gracefully as a
                    // shutdown call would
                    None => {
                        worker.broadcast(&PeerMessage::Unannounce { id: worker.id }).await;
                        tracing::debug!(peer = %worker.id, "All link handles dropped");
                        break;
                    }
                }
            }
        }
    }

    worker.phase.write().await.leave();
}
