//! CPU render host that rasterizes uploaded meshes into a framebuffer.

use std::collections::HashMap;

use batuta_common::display::WithDimensions;
use log::{debug, trace};

use super::mesh::{MeshData, PrimitiveMode};
use super::primitives::{draw_line, draw_point};
use super::{GpuMeshHandle, RenderBindings};
use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::framebuffer::Framebuffer;
use crate::geometry::{Bounds, Point, PointSequence, Segment};
use crate::math::Mat4;
use crate::viewport::Viewport;

/// Surface styling for untinted meshes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    /// Clear color at the start of every frame.
    pub background: Rgba,
    /// Default color for point meshes.
    pub point_color: Rgba,
    /// Default color for line meshes.
    pub line_color: Rgba,
    /// Side of the square drawn per point, in pixels.
    pub point_size: u32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            background: Rgba::VIOLET,
            point_color: Rgba::WHITE,
            line_color: Rgba::rgb(255, 200, 0),
            point_size: 3,
        }
    }
}

/// Software implementation of [`RenderBindings`].
///
/// World coordinates pass through the model matrix and then an orthographic
/// [`Viewport`] fitted to a region of interest.
#[derive(Debug)]
pub struct SoftwareHost {
    framebuffer: Framebuffer,
    viewport: Viewport,
    region: Bounds,
    padding: f64,
    model: Mat4,
    style: Style,
    meshes: HashMap<u64, MeshData>,
    next_id: u64,
}

impl SoftwareHost {
    /// Create a `width` x `height` surface showing `region` plus `padding`
    /// world units on every side.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GraphicsInit`] if the surface or viewport cannot be
    /// created.
    pub fn new(width: u32, height: u32, region: Bounds, padding: f64, style: Style) -> Result<Self> {
        let framebuffer = Framebuffer::new(width, height).map_err(graphics_init)?;
        let viewport = Viewport::fit(region, width, height, padding).map_err(graphics_init)?;
        debug!(
            "software host {width}x{height}, {:.2} px/unit, backend {:?}",
            viewport.pixels_per_unit(),
            Framebuffer::backend()
        );
        let mut host = Self {
            framebuffer,
            viewport,
            region,
            padding,
            model: Mat4::IDENTITY,
            style,
            meshes: HashMap::new(),
            next_id: 0,
        };
        host.framebuffer.clear(style.background);
        Ok(host)
    }

    /// Apply a model matrix to every vertex.
    #[must_use]
    pub fn with_model(mut self, model: Mat4) -> Self {
        self.model = model;
        self
    }

    /// Resize the surface and refit the viewport to the same region.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GraphicsInit`] for zero dimensions.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        let viewport =
            Viewport::fit(self.region, width, height, self.padding).map_err(graphics_init)?;
        self.framebuffer.set_dimensions(width, height);
        self.framebuffer.clear(self.style.background);
        self.viewport = viewport;
        Ok(())
    }

    /// Current surface.
    #[must_use]
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    /// Consume the host, keeping the last frame.
    #[must_use]
    pub fn into_framebuffer(self) -> Framebuffer {
        self.framebuffer
    }

    /// Active projection.
    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Number of live meshes.
    #[must_use]
    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    /// Pixel position of a world point after the model transform.
    #[must_use]
    pub fn to_pixel(&self, p: Point) -> (i64, i64) {
        self.viewport.project(self.model.transform_point(p))
    }

    fn store(&mut self, mesh: MeshData) -> GpuMeshHandle {
        self.next_id += 1;
        let handle = GpuMeshHandle::new(self.next_id, mesh.mode(), mesh.indices().len() as u32);
        trace!("stored mesh {} ({:?}, {} indices)", handle.id(), handle.mode(), handle.index_count());
        self.meshes.insert(self.next_id, mesh);
        handle
    }

    fn vertex_pixel(&self, mesh: &MeshData, index: u32) -> Result<(i64, i64)> {
        let [x, y, z] = mesh.vertex(index).ok_or_else(|| {
            Error::GraphicsInit(format!("index {index} outside vertex buffer"))
        })?;
        Ok(self.to_pixel(Point::new(f64::from(x), f64::from(y), f64::from(z))))
    }
}

fn graphics_init(e: Error) -> Error {
    Error::GraphicsInit(e.to_string())
}

impl RenderBindings for SoftwareHost {
    fn upload_point_mesh(&mut self, points: &PointSequence) -> Result<GpuMeshHandle> {
        Ok(self.store(MeshData::points(points)))
    }

    fn upload_segment_mesh(&mut self, segments: &[Segment]) -> Result<GpuMeshHandle> {
        Ok(self.store(MeshData::segments(segments)))
    }

    fn render_handle(&mut self, handle: &GpuMeshHandle) -> Result<()> {
        let mesh = self
            .meshes
            .get(&handle.id())
            .ok_or_else(|| Error::GraphicsInit(format!("unknown mesh handle {}", handle.id())))?;

        let mut pixels = Vec::with_capacity(mesh.indices().len());
        for &i in mesh.indices() {
            pixels.push(self.vertex_pixel(mesh, i)?);
        }

        match mesh.mode() {
            PrimitiveMode::Points => {
                let color = handle.tint().unwrap_or(self.style.point_color);
                for &at in &pixels {
                    draw_point(&mut self.framebuffer, at, self.style.point_size, color);
                }
            }
            PrimitiveMode::Lines => {
                let color = handle.tint().unwrap_or(self.style.line_color);
                for pair in pixels.chunks_exact(2) {
                    draw_line(&mut self.framebuffer, pair[0], pair[1], color);
                }
            }
        }
        Ok(())
    }

    fn free_handle(&mut self, handle: GpuMeshHandle) -> Result<()> {
        self.meshes
            .remove(&handle.id())
            .map(|_| ())
            .ok_or_else(|| Error::GraphicsInit(format!("mesh handle {} already freed", handle.id())))
    }

    fn begin_frame(&mut self) -> Result<()> {
        self.framebuffer.clear(self.style.background);
        Ok(())
    }
}
