//! Link statistics

pub mod metrics;

pub use metrics::{LinkStats, LinkStatsSnapshot};
