//! CPU-side vertex and index buffers handed to a render host.

use crate::geometry::{PointSequence, Segment};

/// How a mesh's indices are assembled into primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveMode {
    /// Each index is one point.
    Points,
    /// Each index pair is one line segment.
    Lines,
}

/// Interleaved `x, y, z` vertices plus an index buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    vertices: Vec<f32>,
    indices: Vec<u32>,
    mode: PrimitiveMode,
}

impl MeshData {
    /// One vertex per point, indices `0..N`.
    #[must_use]
    pub fn points(points: &PointSequence) -> Self {
        let vertices = points.iter().flat_map(|p| to_f32(p.to_array())).collect();
        let indices = (0..points.len() as u32).collect();
        Self { vertices, indices, mode: PrimitiveMode::Points }
    }

    /// Two vertices per segment (origin then tip), index pairs `(2i, 2i + 1)`.
    #[must_use]
    pub fn segments(segments: &[Segment]) -> Self {
        let vertices = segments
            .iter()
            .flat_map(|s| to_f32(s.origin.to_array()).into_iter().chain(to_f32(s.tip.to_array())))
            .collect();
        let indices = (0..segments.len() as u32 * 2).collect();
        Self { vertices, indices, mode: PrimitiveMode::Lines }
    }

    /// Flat `x, y, z` vertex buffer.
    #[must_use]
    pub fn vertices(&self) -> &[f32] {
        &self.vertices
    }

    /// Index buffer.
    #[must_use]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Primitive assembly mode.
    #[must_use]
    pub const fn mode(&self) -> PrimitiveMode {
        self.mode
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Vertex `i` as `[x, y, z]`.
    #[must_use]
    pub fn vertex(&self, i: u32) -> Option<[f32; 3]> {
        let start = i as usize * 3;
        let v = self.vertices.get(start..start + 3)?;
        Some([v[0], v[1], v[2]])
    }
}

fn to_f32(v: [f64; 3]) -> [f32; 3] {
    [v[0] as f32, v[1] as f32, v[2] as f32]
}
