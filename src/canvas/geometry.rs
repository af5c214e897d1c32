//! Window geometry value types
//!
//! All peers report geometry in the same pixel coordinate space: the
//! shared virtual desktop, origin at its top-left corner.

/// Top-left corner of a window on the virtual desktop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

/// Window extent in pixels
///
/// Unsigned on purpose: a negative size is not representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

/// Screen position and size of one window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub position: Position,
    pub size: Size,
}

impl Geometry {
    /// Create a geometry from raw coordinates
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            position: Position { x, y },
            size: Size { width, height },
        }
    }

    /// Far (right) edge on the x axis
    pub fn far_x(&self) -> i64 {
        self.position.x as i64 + self.size.width as i64
    }

    /// Far (bottom) edge on the y axis
    pub fn far_y(&self) -> i64 {
        self.position.y as i64 + self.size.height as i64
    }
}

impl std::fmt::Display for Geometry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}x{}@({},{})",
            self.size.width, self.size.height, self.position.x, self.position.y
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_far_edges() {
        let g = Geometry::new(800, 0, 800, 600);

        assert_eq!(g.far_x(), 1600);
        assert_eq!(g.far_y(), 600);
    }

    #[test]
    fn test_far_edges_no_overflow() {
        let g = Geometry::new(i32::MAX, i32::MAX, u32::MAX, u32::MAX);

        assert_eq!(g.far_x(), i32::MAX as i64 + u32::MAX as i64);
    }

    #[test]
    fn test_display() {
        let g = Geometry::new(10, -20, 640, 480);

        assert_eq!(g.to_string(), "640x480@(10,-20)");
    }
}
