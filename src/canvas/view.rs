//! Virtual canvas aggregation
//!
//! Combines the live self geometry with the known peer geometries into
//! the bounds of the virtual canvas plus this window's normalized
//! offset inside it. Pure math, no registry access; the caller hands in
//! whatever snapshot it has.

use super::geometry::Geometry;

/// Origin-anchored bounding box enclosing every known window
///
/// Assumes all windows lie at non-negative coordinates relative to the
/// virtual desktop's top-left corner; a far edge left of the origin
/// contributes zero extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasBounds {
    pub width: u64,
    pub height: u64,
}

/// Normalized position of this window inside the canvas
///
/// `x` maps the window's left edge into [-1, 1) left-to-right; `y` maps
/// the top edge into (-1, 1] with the axis flipped, matching a
/// downward-increasing screen space against an upward-increasing scene
/// space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasOffset {
    pub x: f64,
    pub y: f64,
}

/// Aggregation result handed to the rendering core
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasView {
    pub bounds: CanvasBounds,
    pub offset: CanvasOffset,
}

/// Compute the virtual canvas for one window
///
/// `peers` is the registry snapshot's geometry; order does not matter.
/// Zero-extent bounds on an axis (every window including self has zero
/// extent there) yield offset 0 on that axis instead of dividing by
/// zero.
pub fn aggregate(self_geometry: Geometry, peers: impl IntoIterator<Item = Geometry>) -> CanvasView {
    let mut far_x = self_geometry.far_x();
    let mut far_y = self_geometry.far_y();

    for peer in peers {
        far_x = far_x.max(peer.far_x());
        far_y = far_y.max(peer.far_y());
    }

    let bounds = CanvasBounds {
        width: far_x.max(0) as u64,
        height: far_y.max(0) as u64,
    };

    let offset = CanvasOffset {
        x: if bounds.width == 0 {
            0.0
        } else {
            (self_geometry.position.x as f64 / bounds.width as f64) * 2.0 - 1.0
        },
        y: if bounds.height == 0 {
            0.0
        } else {
            (self_geometry.position.y as f64 / bounds.height as f64) * -2.0 + 1.0
        },
    };

    CanvasView { bounds, offset }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_side_by_side_panes() {
        let a = Geometry::new(0, 0, 800, 600);
        let b = Geometry::new(800, 0, 800, 600);

        let view_a = aggregate(a, [b]);
        assert_eq!(view_a.bounds, CanvasBounds { width: 1600, height: 600 });
        assert_eq!(view_a.offset.x, -1.0);

        let view_b = aggregate(b, [a]);
        assert_eq!(view_b.bounds, CanvasBounds { width: 1600, height: 600 });
        assert_eq!(view_b.offset.x, 0.0);
    }

    #[test]
    fn test_single_pane() {
        let view = aggregate(Geometry::new(0, 0, 1024, 768), []);

        assert_eq!(view.bounds, CanvasBounds { width: 1024, height: 768 });
        assert_eq!(view.offset.x, -1.0);
        assert_eq!(view.offset.y, 1.0);
    }

    #[test]
    fn test_bounds_monotonic() {
        let own = Geometry::new(0, 0, 800, 600);
        let inside = Geometry::new(100, 100, 200, 200);
        let outside = Geometry::new(700, 500, 800, 600);

        let base = aggregate(own, []);
        let unchanged = aggregate(own, [inside]);
        let grown = aggregate(own, [outside]);

        assert_eq!(unchanged.bounds, base.bounds);
        assert!(grown.bounds.width > base.bounds.width);
        assert!(grown.bounds.height > base.bounds.height);
    }

    #[test]
    fn test_offset_within_unit_range() {
        let peer = Geometry::new(0, 0, 1920, 1080);

        for (x, y) in [(0, 0), (960, 540), (1920, 1080), (333, 777)] {
            let view = aggregate(Geometry::new(x, y, 0, 0), [peer]);
            assert!((-1.0..=1.0).contains(&view.offset.x), "x offset {}", view.offset.x);
            assert!((-1.0..=1.0).contains(&view.offset.y), "y offset {}", view.offset.y);
        }
    }

    #[test]
    fn test_vertical_flip() {
        let peer = Geometry::new(0, 0, 100, 1000);

        // Top of the desktop maps to +1, bottom to -1
        let top = aggregate(Geometry::new(0, 0, 0, 0), [peer]);
        let bottom = aggregate(Geometry::new(0, 1000, 0, 0), [peer]);

        assert_eq!(top.offset.y, 1.0);
        assert_eq!(bottom.offset.y, -1.0);
    }

    #[test]
    fn test_zero_extent_guard() {
        let view = aggregate(Geometry::new(0, 0, 0, 0), []);

        assert_eq!(view.bounds, CanvasBounds { width: 0, height: 0 });
        assert_eq!(view.offset.x, 0.0);
        assert_eq!(view.offset.y, 0.0);
    }
}
