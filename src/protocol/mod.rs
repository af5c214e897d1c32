//! Coordination protocol: message types and wire codec
//!
//! Three message kinds drive the whole protocol. A joining peer
//! broadcasts a resync request (asking everyone else to re-announce)
//! plus one announce of its own; every active peer answers resync
//! requests with a fresh announce; a departing peer broadcasts an
//! unannounce. Delivery is best-effort and unordered, so the periodic
//! resync heartbeat is what keeps everyone converged.

pub mod codec;
pub mod message;

pub use codec::{decode, encode, frame_origin};
pub use message::{PeerId, PeerMessage};
