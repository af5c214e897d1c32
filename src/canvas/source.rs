//! Live self-geometry queries
//!
//! A link never caches its own geometry: every announce and every
//! aggregation re-queries the source at that moment, so a window that
//! moved since the last protocol event is reported at its current
//! place. The host application implements [`GeometrySource`] against
//! its windowing environment.

use std::sync::{Arc, RwLock};

use super::geometry::Geometry;

/// Provider of the owning window's current geometry
///
/// Called from the link's event loop (announce replies) and from
/// whatever thread aggregates the canvas, so implementations must be
/// cheap and non-blocking.
pub trait GeometrySource: Send + Sync + 'static {
    /// Current screen position and size of the owning window
    fn current(&self) -> Geometry;
}

/// Geometry slot updated by window move/resize event glue
///
/// The common adapter for hosts that receive geometry as events rather
/// than offering a query API: the event handler calls [`set`], the link
/// reads the latest value.
///
/// [`set`]: SharedGeometry::set
#[derive(Debug, Clone)]
pub struct SharedGeometry {
    inner: Arc<RwLock<Geometry>>,
}

impl SharedGeometry {
    /// Create a slot with an initial geometry
    pub fn new(initial: Geometry) -> Self {
        Self {
            inner: Arc::new(RwLock::new(initial)),
        }
    }

    /// Replace the stored geometry
    pub fn set(&self, geometry: Geometry) {
        if let Ok(mut slot) = self.inner.write() {
            *slot = geometry;
        }
    }

    /// Read the stored geometry
    pub fn get(&self) -> Geometry {
        self.inner
            .read()
            .map(|slot| *slot)
            .unwrap_or(Geometry::new(0, 0, 0, 0))
    }
}

impl GeometrySource for SharedGeometry {
    fn current(&self) -> Geometry {
        self.get()
    }
}

impl<S: GeometrySource> GeometrySource for Arc<S> {
    fn current(&self) -> Geometry {
        (**self).current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_geometry_updates() {
        let source = SharedGeometry::new(Geometry::new(0, 0, 800, 600));
        assert_eq!(source.current(), Geometry::new(0, 0, 800, 600));

        // Simulated window move
        source.set(Geometry::new(400, 120, 800, 600));
        assert_eq!(source.current(), Geometry::new(400, 120, 800, 600));
    }

    #[test]
    fn test_clones_share_slot() {
        let source = SharedGeometry::new(Geometry::new(0, 0, 100, 100));
        let handle = source.clone();

        handle.set(Geometry::new(5, 5, 100, 100));
        assert_eq!(source.current(), Geometry::new(5, 5, 100, 100));
    }
}
