//! # Trueno-Raster
//!
//! Classical 2D rasterization kernels for lines and circles, with the scene
//! assembly and headless render host needed to look at their output.
//!
//! ## Pipeline
//!
//! ```text
//! math ← raster ← pointset ← scene ← render
//! ```
//!
//! - [`raster`]: basic incremental, DDA and Bresenham lines; midpoint and
//!   Bresenham circles. Pure functions returning a [`geometry::PointSequence`].
//! - [`pointset`]: lexicographic sort, dedup, nearest-neighbour reordering,
//!   reflections.
//! - [`scene`]: turns an [`scene::Algorithm`] and its parameters into pixels
//!   plus a polyline, and validates the Cartesian axes overlay.
//! - [`render`]: the [`render::RenderBindings`] host contract, a software host
//!   drawing into a [`framebuffer::Framebuffer`], and the frame loop.
//!
//! ## Quick Start
//!
//! ```rust
//! use trueno_raster::prelude::*;
//!
//! let line = LineInput::new(0.0, 0.0, 5.0, 2.0)?;
//! let scene = Scene::build(&SceneRequest::line(Algorithm::BresenhamLine, line))?;
//! assert_eq!(
//!     scene.pixels().to_xy(),
//!     vec![(0, 0), (1, 0), (2, 1), (3, 1), (4, 2), (5, 2)]
//! );
//! # Ok::<(), trueno_raster::Error>(())
//! ```
//!
//! ## References
//!
//! - Bresenham, J. E. (1965). "Algorithm for computer control of a digital plotter."
//!   *IBM Systems Journal*, 4(1), 25-30.
//! - Bresenham, J. E. (1977). "A linear algorithm for incremental digital display of
//!   circular arcs." *Communications of the ACM*, 20(2), 100-106.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in rasterization code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Vector and matrix arithmetic.
pub mod math;

/// Points, segments, point sequences and kernel inputs.
pub mod geometry;

/// Line and circle rasterization kernels.
pub mod raster;

/// Sorting, deduplication, reordering and reflection of point sequences.
pub mod pointset;

/// Scene assembly from an algorithm choice.
pub mod scene;

// ============================================================================
// Rendering Modules
// ============================================================================

/// RGBA colors.
pub mod color;

/// RGBA pixel surface.
pub mod framebuffer;

/// World-to-pixel projection.
pub mod viewport;

/// Render host contract, software host and frame loop.
pub mod render;

/// Output encoders (PNG, terminal).
pub mod output;

// ============================================================================
// Front Ends
// ============================================================================

/// YAML configuration.
pub mod config;

/// Interactive prompt and one-line scene DSL.
pub mod prompt;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for trueno-raster operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust
/// use trueno_raster::prelude::*;
/// ```
pub mod prelude {
    pub use batuta_common::display::WithDimensions;

    pub use crate::color::Rgba;
    pub use crate::config::Config;
    pub use crate::error::{Error, Result};
    pub use crate::framebuffer::Framebuffer;
    pub use crate::geometry::{CircleInput, LineInput, Point, PointSequence, Segment, SequenceOrder};
    pub use crate::math::{Mat4, Vec3};
    pub use crate::raster::Endpoint;
    pub use crate::render::{GpuMeshHandle, RenderBindings, SceneMeshes, SoftwareHost};
    pub use crate::scene::{Algorithm, CartesianAxes, Scene, SceneRequest};
}

// ============================================================================
// Re-exports
// ============================================================================

/// Re-export trueno for direct access to SIMD operations.
pub use trueno;
