//! Peer registry
//!
//! The registry caches the last-known geometry of every other window
//! on the channel. It is populated only by protocol messages, so it is
//! eventually consistent: a peer that moved shows its old geometry
//! until the next resync round refreshes it.
//!
//! ```text
//!        event loop (sole writer)            readers
//!   announce ──► upsert ─┐
//!   unannounce ► remove ─┼─► RwLock<HashMap<PeerId, PeerRecord>>
//!   eviction ──► retain ─┘            │
//!                                     └─► list() snapshot ──► canvas::aggregate
//! ```

pub mod entry;
pub mod store;

pub use entry::PeerRecord;
pub use store::PeerRegistry;
