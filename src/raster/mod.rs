//! Rasterization kernels for lines and circles.
//!
//! Every kernel is a pure function returning a fresh [`PointSequence`]
//! of integer-valued points with `z = 0`, in a deterministic order.
//!
//! # Algorithms
//!
//! - **Basic incremental line**: floating slope with per-step rounding
//! - **DDA line**: unit major-axis steps, fractional minor-axis steps
//! - **Bresenham line**: integer decision variable, any octant
//! - **Midpoint circle**: one quadrant arc, mirrored by the scene
//! - **Bresenham circle**: all eight octants, sorted and deduplicated
//!
//! [`PointSequence`]: crate::geometry::PointSequence

mod circle;
mod line;

pub use circle::{bresenham_circle, midpoint_circle};
pub use line::{
    basic_incremental_line, bresenham_line, bresenham_line_first_octant, dda_line, BresenhamLine,
    Endpoint,
};
