//! # Upload Buffers
//!
//! GPU-ready flat buffers for a mesh, plus the guard that refuses to
//! upload a ribbon with fewer than two cross-sections.

use tracing::warn;

use crate::error::MeshError;
use crate::mesh::Mesh;

/// Minimum vertices for an uploadable ribbon (two cross-sections).
pub const MIN_UPLOAD_VERTICES: usize = 4;
/// Minimum indices for an uploadable ribbon (one quad).
pub const MIN_UPLOAD_INDICES: usize = 6;

/// Vertex and index buffers ready for a renderer.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use ribbon_mesh::{Mesh, UploadBuffers};
/// use ribbon_mesh::ribbon::append_segment_quad;
///
/// let mut mesh = Mesh::new();
/// assert!(UploadBuffers::prepare(&mesh).is_err());
///
/// append_segment_quad(&mut mesh, DVec3::ZERO, DVec3::X, 0.1);
/// let buffers = UploadBuffers::prepare(&mesh).unwrap();
/// assert_eq!(buffers.vertex_count(), 4);
/// assert_eq!(buffers.indices.len(), 6);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct UploadBuffers {
    /// Positions as [x, y, z, x, y, z, ...]
    pub positions: Vec<f32>,
    /// Triangle indices as [i0, i1, i2, ...]
    pub indices: Vec<u32>,
}

impl UploadBuffers {
    /// Flattens `mesh` for upload.
    ///
    /// Meshes under 4 vertices or 6 indices are rejected with a warning and
    /// nothing is produced.
    pub fn prepare(mesh: &Mesh) -> Result<Self, MeshError> {
        let (vertices, indices) = (mesh.vertex_count(), mesh.index_count());
        if vertices < MIN_UPLOAD_VERTICES || indices < MIN_UPLOAD_INDICES {
            warn!(vertices, indices, "Not enough geometry to upload mesh");
            return Err(MeshError::insufficient(vertices, indices));
        }

        Ok(Self {
            positions: mesh.vertices_f32(),
            indices: mesh.indices_u32(),
        })
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}
