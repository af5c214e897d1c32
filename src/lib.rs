//! # panelink
//!
//! Cross-window peer coordination for spatially continuous rendering.
//!
//! Each window of an application runs one [`PaneLink`]. Links on the
//! same host discover each other over a broadcast channel, exchange
//! window geometry, and converge on a shared virtual canvas spanning
//! every open window, so a decorative effect rendered in each window
//! can line up into one continuous scene.
//!
//! ```no_run
//! use panelink::{Geometry, LinkConfig, PaneLink, SharedGeometry};
//!
//! #[tokio::main]
//! async fn main() {
//!     // The window glue keeps this updated on move/resize events
//!     let geometry = SharedGeometry::new(Geometry::new(0, 0, 800, 600));
//!
//!     let link = PaneLink::connect(LinkConfig::default(), geometry.clone());
//!
//!     // Per re-render trigger: where is this window on the shared canvas?
//!     let view = link.aggregate().await;
//!     println!("canvas {}x{}, offset ({:.2}, {:.2})",
//!         view.bounds.width, view.bounds.height,
//!         view.offset.x, view.offset.y);
//!
//!     link.shutdown().await.ok();
//! }
//! ```
//!
//! ## Protocol
//!
//! Three broadcast messages: a joining link asks everyone to
//! re-announce (resync request) and announces itself; active links
//! answer resync requests with a freshly queried announce; a departing
//! link unannounces. Delivery is best-effort and unordered, so a
//! periodic heartbeat resync keeps every link's peer cache converged.
//! The coordination layer never raises a fatal error into the host:
//! misalignment across windows is cosmetic, not critical.

pub mod canvas;
pub mod config;
pub mod error;
pub mod protocol;
pub mod registry;
pub mod session;
pub mod stats;
pub mod transport;

pub use canvas::{
    aggregate, CanvasBounds, CanvasOffset, CanvasView, Geometry, GeometrySource, Position,
    SharedGeometry, Size,
};
pub use config::LinkConfig;
pub use error::{DecodeError, LinkError, Result};
pub use protocol::{PeerId, PeerMessage};
pub use registry::{PeerRecord, PeerRegistry};
pub use session::{LinkPhase, PaneLink};
pub use stats::LinkStatsSnapshot;
pub use transport::{HostTransport, LocalBus, LocalTransport, NoopTransport, Transport, UdpTransport};
