//! Two coordinated panes in one process
//!
//! Run with: cargo run --example two_panes
//!
//! Spins up two links over an in-process bus, arranged side by side
//! like two windows on one desktop:
//!
//! ```text
//!   A: 800x600 @ (0,0)      B: 800x600 @ (800,0)
//! ```
//!
//! Both converge on the same 1600x600 virtual canvas; A sits at
//! normalized offset -1.0, B at 0.0. Then A's window "moves" and the
//! next resync round updates B's view of the canvas.

use std::time::Duration;

use panelink::{Geometry, LinkConfig, LocalBus, PaneLink, SharedGeometry};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let bus = LocalBus::new();
    let config = LinkConfig::default().heartbeat_interval(Duration::from_millis(200));

    let geometry_a = SharedGeometry::new(Geometry::new(0, 0, 800, 600));
    let geometry_b = SharedGeometry::new(Geometry::new(800, 0, 800, 600));

    let pane_a = PaneLink::over(config.clone(), geometry_a.clone(), |id, _| bus.endpoint(id));
    let pane_b = PaneLink::over(config, geometry_b, |id, _| bus.endpoint(id));

    tokio::time::sleep(Duration::from_millis(300)).await;
    print_view("A", &pane_a).await;
    print_view("B", &pane_b).await;

    println!("\nPane A moves down-right by (200, 100)...\n");
    geometry_a.set(Geometry::new(200, 100, 800, 600));

    // Movement emits no message; the heartbeat resync picks it up
    tokio::time::sleep(Duration::from_millis(300)).await;
    print_view("A", &pane_a).await;
    print_view("B", &pane_b).await;

    pane_a.shutdown().await.ok();
    pane_b.shutdown().await.ok();
}

async fn print_view(name: &str, pane: &PaneLink) {
    let view = pane.aggregate().await;
    let peers = pane.peers().await;
    println!(
        "pane {} [{}]: {} peer(s), canvas {}x{}, offset ({:+.2}, {:+.2})",
        name,
        pane.id(),
        peers.len(),
        view.bounds.width,
        view.bounds.height,
        view.offset.x,
        view.offset.y,
    );
}
