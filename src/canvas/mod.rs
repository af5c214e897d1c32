//! Geometry types and virtual canvas math
//!
//! Every cooperating window reports its geometry in the coordinate
//! space of the shared virtual desktop. Unioning all known geometries
//! yields the virtual canvas: the smallest origin-anchored box holding
//! every window's far edge. Each window then derives a normalized
//! offset inside that canvas, and the renderer shifts the shared scene
//! by it so the animation lines up across window borders.
//!
//! ```text
//!   (0,0) ┌───────────────┬───────────────┐
//!         │  window A     │  window B     │
//!         │  offset -1.0  │  offset  0.0  │
//!         └───────────────┴───────────────┘
//!                                     (1600,600) = canvas bounds
//! ```

pub mod geometry;
pub mod source;
pub mod view;

pub use geometry::{Geometry, Position, Size};
pub use source::{GeometrySource, SharedGeometry};
pub use view::{aggregate, CanvasBounds, CanvasOffset, CanvasView};
