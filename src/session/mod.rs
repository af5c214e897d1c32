//! Link lifecycle
//!
//! One link per process drives the coordination protocol: the join
//! burst at construction, announce/unannounce/resync handling, the
//! heartbeat, and the parting unannounce at shutdown. The event loop
//! runs as a single task, so message handlers and timer ticks execute
//! run-to-completion with no overlap.

pub mod manager;
pub mod state;

pub use manager::PaneLink;
pub use state::LinkPhase;
