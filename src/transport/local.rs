//! In-process broadcast bus
//!
//! Fan-out over `tokio::sync::broadcast` for peers that run as tasks
//! inside one process rather than separate processes. Same contract as
//! the multicast medium: best-effort (a lagging receiver loses the
//! overwritten frames), unordered across senders, no self-delivery.

use bytes::Bytes;
use tokio::sync::broadcast;

use crate::protocol::{frame_origin, PeerId};

use super::Transport;

/// Default per-endpoint frame buffer
const DEFAULT_CAPACITY: usize = 64;

/// A shared in-process broadcast channel
///
/// Clone the bus freely; every endpoint created from any clone sees
/// every frame.
#[derive(Clone)]
pub struct LocalBus {
    tx: broadcast::Sender<Bytes>,
}

impl LocalBus {
    /// Create a bus with the default buffer capacity
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a bus buffering up to `capacity` frames per endpoint
    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Create an endpoint for one peer
    pub fn endpoint(&self, local: PeerId) -> LocalTransport {
        LocalTransport {
            tx: self.tx.clone(),
            rx: self.tx.subscribe(),
            local,
        }
    }
}

impl Default for LocalBus {
    fn default() -> Self {
        Self::new()
    }
}

/// One peer's endpoint on a [`LocalBus`]
pub struct LocalTransport {
    tx: broadcast::Sender<Bytes>,
    rx: broadcast::Receiver<Bytes>,
    local: PeerId,
}

impl Transport for LocalTransport {
    async fn send(&self, frame: Bytes) {
        // Err means no other endpoint is subscribed; best effort either way
        let _ = self.tx.send(frame);
    }

    async fn recv(&mut self) -> Option<Bytes> {
        loop {
            match self.rx.recv().await {
                Ok(frame) => {
                    if frame_origin(&frame) == Some(self.local) {
                        continue;
                    }
                    return Some(frame);
                }
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    // Overwritten frames are lost, the heartbeat refills
                    tracing::trace!(missed = missed, "Bus endpoint lagged");
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Geometry;
    use crate::protocol::{decode, encode, PeerMessage};

    #[tokio::test]
    async fn test_fan_out_excludes_sender() {
        let bus = LocalBus::new();
        let a = PeerId::generate();
        let b = PeerId::generate();
        let c = PeerId::generate();

        let sender = bus.endpoint(a);
        let mut rx_b = bus.endpoint(b);
        let mut rx_c = bus.endpoint(c);
        let mut rx_self = bus.endpoint(a);

        let frame = encode(&PeerMessage::Announce {
            id: a,
            geometry: Geometry::new(0, 0, 800, 600),
        });
        sender.send(frame.clone()).await;

        assert_eq!(rx_b.recv().await.unwrap(), frame);
        assert_eq!(rx_c.recv().await.unwrap(), frame);

        // a's own endpoint must not see a's frame; b's next frame is
        // the first thing it yields
        sender.send(frame.clone()).await;
        rx_b.send(encode(&PeerMessage::Unannounce { id: b })).await;
        let seen = rx_self.recv().await.unwrap();
        assert!(matches!(
            decode(&seen).unwrap(),
            PeerMessage::Unannounce { id } if id == b
        ));
    }

    #[tokio::test]
    async fn test_lagged_endpoint_skips_lost_frames() {
        let bus = LocalBus::with_capacity(1);
        let a = PeerId::generate();
        let sender = bus.endpoint(a);
        let mut receiver = bus.endpoint(PeerId::generate());

        // Overfill the one-frame buffer; only the last survives
        for x in [0, 100, 200] {
            sender
                .send(encode(&PeerMessage::Announce {
                    id: a,
                    geometry: Geometry::new(x, 0, 800, 600),
                }))
                .await;
        }

        let frame = receiver.recv().await.unwrap();
        assert!(matches!(
            decode(&frame).unwrap(),
            PeerMessage::Announce { geometry, .. } if geometry.position.x == 200
        ));
    }
}
