//! One pane per process over the multicast medium
//!
//! Run with: cargo run --example pane [X Y WIDTH HEIGHT]
//!
//! Examples:
//!   cargo run --example pane                 # 800x600 at (0,0)
//!   cargo run --example pane 800 0 800 600   # second pane to the right
//!
//! Start several instances in separate terminals; each discovers the
//! others over loopback multicast and prints its view of the shared
//! canvas once per second. Ctrl-C unannounces and exits. If multicast
//! is unavailable the pane runs degraded and observes itself only.

use std::time::Duration;

use panelink::{Geometry, LinkConfig, PaneLink, SharedGeometry};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args: Vec<i64> = std::env::args()
        .skip(1)
        .filter_map(|a| a.parse().ok())
        .collect();
    let geometry = match args.as_slice() {
        [x, y, w, h] => Geometry::new(*x as i32, *y as i32, *w as u32, *h as u32),
        _ => Geometry::new(0, 0, 800, 600),
    };

    let link = PaneLink::connect(LinkConfig::default(), SharedGeometry::new(geometry));
    println!("pane {} at {}, degraded={}", link.id(), geometry, link.is_degraded());

    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let view = link.aggregate().await;
                let peers = link.peers().await;
                println!(
                    "{} peer(s), canvas {}x{}, offset ({:+.2}, {:+.2})",
                    peers.len(),
                    view.bounds.width,
                    view.bounds.height,
                    view.offset.x,
                    view.offset.y,
                );
            }
            _ = tokio::signal::ctrl_c() => {
                println!("leaving");
                link.shutdown().await.ok();
                break;
            }
        }
    }
}
