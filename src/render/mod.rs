//! Render host contract and the scene-side renderables that drive it.
//!
//! A host implements [`RenderBindings`]: it accepts point and segment meshes,
//! hands back a [`GpuMeshHandle`] per upload, draws a handle on request and
//! releases it on teardown. [`SceneMeshes`] owns the three handles a
//! [`Scene`] needs (pixels, polyline, axes) and [`run_frames`] drives the
//! per-frame loop.
//!
//! [`SoftwareHost`] is the bundled host; it rasterizes into a
//! [`Framebuffer`](crate::framebuffer::Framebuffer).

mod mesh;
mod primitives;
mod software;

use std::thread;
use std::time::{Duration, Instant};

use log::{debug, info};

pub use mesh::{MeshData, PrimitiveMode};
pub use primitives::{draw_line, draw_point};
pub use software::{SoftwareHost, Style};

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::geometry::{PointSequence, Segment};
use crate::scene::{CartesianAxes, Scene};

/// Opaque reference to a mesh resident in a render host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GpuMeshHandle {
    id: u64,
    mode: PrimitiveMode,
    index_count: u32,
    tint: Option<Rgba>,
}

impl GpuMeshHandle {
    /// Create a handle. Hosts call this from their upload operations.
    #[must_use]
    pub const fn new(id: u64, mode: PrimitiveMode, index_count: u32) -> Self {
        Self { id, mode, index_count, tint: None }
    }

    /// Host-assigned identifier.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Primitive assembly mode.
    #[must_use]
    pub const fn mode(&self) -> PrimitiveMode {
        self.mode
    }

    /// Number of indices drawn per render call.
    #[must_use]
    pub const fn index_count(&self) -> u32 {
        self.index_count
    }

    /// Color override requested by the owning renderable.
    #[must_use]
    pub const fn tint(&self) -> Option<Rgba> {
        self.tint
    }

    /// The same handle with a color override.
    #[must_use]
    pub const fn tinted(mut self, color: Rgba) -> Self {
        self.tint = Some(color);
        self
    }
}

/// Operations a graphics host exposes to the scene.
pub trait RenderBindings {
    /// Upload points as a vertex buffer of N x 3 floats with indices `0..N`.
    fn upload_point_mesh(&mut self, points: &PointSequence) -> Result<GpuMeshHandle>;

    /// Upload segment endpoints with index pairs `(2i, 2i + 1)`.
    fn upload_segment_mesh(&mut self, segments: &[Segment]) -> Result<GpuMeshHandle>;

    /// Issue one draw call for a handle.
    fn render_handle(&mut self, handle: &GpuMeshHandle) -> Result<()>;

    /// Release a handle's buffers.
    fn free_handle(&mut self, handle: GpuMeshHandle) -> Result<()>;

    /// Start a new frame. Hosts with a persistent surface clear it here.
    fn begin_frame(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Colors of the three renderables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Pixel squares.
    pub points: Rgba,
    /// Polyline segments.
    pub lines: Rgba,
    /// Cartesian axes.
    pub axes: Rgba,
}

impl Default for Palette {
    fn default() -> Self {
        Self { points: Rgba::WHITE, lines: Rgba::rgb(255, 200, 0), axes: Rgba::rgb(60, 60, 60) }
    }
}

/// The uploaded handles of one scene, drawn back to front: axes, polyline, pixels.
#[derive(Debug)]
pub struct SceneMeshes {
    axes: GpuMeshHandle,
    polyline: GpuMeshHandle,
    pixels: GpuMeshHandle,
}

impl SceneMeshes {
    /// Upload a scene and its axes.
    ///
    /// # Errors
    ///
    /// Propagates host upload failures. Handles already uploaded are freed
    /// before returning.
    pub fn upload<H: RenderBindings>(
        host: &mut H,
        scene: &Scene,
        axes: &CartesianAxes,
        palette: Palette,
    ) -> Result<Self> {
        let axes = host.upload_segment_mesh(&axes.segments())?.tinted(palette.axes);
        let polyline = match host.upload_segment_mesh(scene.polyline()) {
            Ok(h) => h.tinted(palette.lines),
            Err(e) => {
                host.free_handle(axes)?;
                return Err(e);
            }
        };
        let pixels = match host.upload_point_mesh(scene.pixels()) {
            Ok(h) => h.tinted(palette.points),
            Err(e) => {
                host.free_handle(axes)?;
                host.free_handle(polyline)?;
                return Err(e);
            }
        };
        debug!(
            "uploaded scene meshes: axes={} polyline={} pixels={}",
            axes.id(),
            polyline.id(),
            pixels.id()
        );
        Ok(Self { axes, polyline, pixels })
    }

    /// Handles in draw order.
    #[must_use]
    pub fn handles(&self) -> [GpuMeshHandle; 3] {
        [self.axes, self.polyline, self.pixels]
    }

    /// Draw every handle once.
    ///
    /// # Errors
    ///
    /// Propagates the first host render failure.
    pub fn render<H: RenderBindings>(&self, host: &mut H) -> Result<()> {
        for handle in self.handles() {
            host.render_handle(&handle)?;
        }
        Ok(())
    }

    /// Release every handle.
    ///
    /// # Errors
    ///
    /// Propagates the first host free failure.
    pub fn free<H: RenderBindings>(self, host: &mut H) -> Result<()> {
        for handle in self.handles() {
            host.free_handle(handle)?;
        }
        Ok(())
    }
}

/// Render `frames` frames, paced to at most `fps` frames per second.
///
/// `fps == 0` disables pacing. Returns the wall-clock time spent.
///
/// # Errors
///
/// Returns [`Error::GraphicsInit`] when `frames` is zero; host errors are fatal
/// and propagate immediately.
pub fn run_frames<H: RenderBindings>(
    host: &mut H,
    meshes: &SceneMeshes,
    frames: u32,
    fps: u32,
) -> Result<Duration> {
    if frames == 0 {
        return Err(Error::GraphicsInit("render loop needs at least one frame".into()));
    }
    let frame_budget =
        (fps > 0).then(|| Duration::from_secs_f64(1.0 / f64::from(fps)));

    let start = Instant::now();
    for frame in 0..frames {
        let frame_start = Instant::now();
        host.begin_frame()?;
        meshes.render(host)?;

        if let Some(budget) = frame_budget {
            let spent = frame_start.elapsed();
            if spent < budget && frame + 1 < frames {
                thread::sleep(budget - spent);
            }
        }
    }

    let elapsed = start.elapsed();
    info!("rendered {frames} frame(s) in {elapsed:?}");
    Ok(elapsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::CircleInput;
    use crate::scene::{Algorithm, SceneRequest};

    /// Host that records calls instead of drawing.
    #[derive(Default)]
    struct RecordingHost {
        next_id: u64,
        live: Vec<u64>,
        drawn: Vec<(u64, PrimitiveMode, u32)>,
        frames: u32,
        fail_points: bool,
    }

    impl RenderBindings for RecordingHost {
        fn upload_point_mesh(&mut self, points: &PointSequence) -> Result<GpuMeshHandle> {
            if self.fail_points {
                return Err(Error::GraphicsInit("no point buffers".into()));
            }
            let mesh = MeshData::points(points);
            self.next_id += 1;
            self.live.push(self.next_id);
            Ok(GpuMeshHandle::new(self.next_id, mesh.mode(), mesh.indices().len() as u32))
        }

        fn upload_segment_mesh(&mut self, segments: &[Segment]) -> Result<GpuMeshHandle> {
            let mesh = MeshData::segments(segments);
            self.next_id += 1;
            self.live.push(self.next_id);
            Ok(GpuMeshHandle::new(self.next_id, mesh.mode(), mesh.indices().len() as u32))
        }

        fn render_handle(&mut self, handle: &GpuMeshHandle) -> Result<()> {
            self.drawn.push((handle.id(), handle.mode(), handle.index_count()));
            Ok(())
        }

        fn free_handle(&mut self, handle: GpuMeshHandle) -> Result<()> {
            self.live.retain(|&id| id != handle.id());
            Ok(())
        }

        fn begin_frame(&mut self) -> Result<()> {
            self.frames += 1;
            Ok(())
        }
    }

    fn bca_scene() -> Scene {
        let input = CircleInput::new(0, 0, 3).unwrap();
        Scene::build(&SceneRequest::circle(Algorithm::BresenhamCircle, input)).unwrap()
    }

    #[test]
    fn test_scene_meshes_lifecycle() {
        let mut host = RecordingHost::default();
        let axes = CartesianAxes::uniform(60.0).unwrap();
        let meshes = SceneMeshes::upload(&mut host, &bca_scene(), &axes, Palette::default()).unwrap();
        assert_eq!(host.live.len(), 3);

        meshes.render(&mut host).unwrap();
        assert_eq!(
            host.drawn,
            vec![(1, PrimitiveMode::Lines, 6), (2, PrimitiveMode::Lines, 32), (3, PrimitiveMode::Points, 16)]
        );

        meshes.free(&mut host).unwrap();
        assert!(host.live.is_empty());
    }

    #[test]
    fn test_upload_failure_frees_partial_handles() {
        let mut host = RecordingHost { fail_points: true, ..RecordingHost::default() };
        let axes = CartesianAxes::uniform(60.0).unwrap();
        let err = SceneMeshes::upload(&mut host, &bca_scene(), &axes, Palette::default()).unwrap_err();
        assert!(matches!(err, Error::GraphicsInit(_)));
        assert!(host.live.is_empty());
    }

    #[test]
    fn test_handles_carry_palette() {
        let mut host = RecordingHost::default();
        let axes = CartesianAxes::uniform(60.0).unwrap();
        let palette = Palette { points: Rgba::RED, lines: Rgba::GREEN, axes: Rgba::BLUE };
        let meshes = SceneMeshes::upload(&mut host, &bca_scene(), &axes, palette).unwrap();
        let [a, l, p] = meshes.handles();
        assert_eq!((a.tint(), l.tint(), p.tint()), (Some(Rgba::BLUE), Some(Rgba::GREEN), Some(Rgba::RED)));
    }

    #[test]
    fn test_run_frames_counts() {
        let mut host = RecordingHost::default();
        let axes = CartesianAxes::uniform(60.0).unwrap();
        let meshes = SceneMeshes::upload(&mut host, &bca_scene(), &axes, Palette::default()).unwrap();
        run_frames(&mut host, &meshes, 4, 0).unwrap();
        assert_eq!(host.frames, 4);
        assert_eq!(host.drawn.len(), 12);
    }

    #[test]
    fn test_run_frames_paced() {
        let mut host = RecordingHost::default();
        let axes = CartesianAxes::uniform(60.0).unwrap();
        let meshes = SceneMeshes::upload(&mut host, &bca_scene(), &axes, Palette::default()).unwrap();
        let elapsed = run_frames(&mut host, &meshes, 3, 100).unwrap();
        assert!(elapsed >= Duration::from_millis(18), "{elapsed:?}");
    }

    #[test]
    fn test_run_frames_rejects_zero() {
        let mut host = RecordingHost::default();
        let axes = CartesianAxes::uniform(60.0).unwrap();
        let meshes = SceneMeshes::upload(&mut host, &bca_scene(), &axes, Palette::default()).unwrap();
        assert!(run_frames(&mut host, &meshes, 0, 60).is_err());
    }
}
