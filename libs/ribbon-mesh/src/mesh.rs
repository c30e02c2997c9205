//! # Mesh Data Structure
//!
//! Indexed triangle mesh shared by ribbons and merged meshes.

use config::constants::{EPSILON, MAX_VERTICES};
use glam::{DMat4, DVec3};
use serde::{Deserialize, Serialize};

use crate::error::MeshError;

/// A triangle mesh with vertices and indices.
///
/// All geometry calculations use f64 internally. Export to f32 only
/// happens at the upload boundary.
///
/// # Example
///
/// ```rust
/// use ribbon_mesh::Mesh;
/// use glam::DVec3;
///
/// let mut mesh = Mesh::new();
/// mesh.add_vertex(DVec3::new(0.0, 0.0, 0.0));
/// mesh.add_vertex(DVec3::new(1.0, 0.0, 0.0));
/// mesh.add_vertex(DVec3::new(0.0, 1.0, 0.0));
/// mesh.add_triangle(0, 1, 2);
/// assert_eq!(mesh.index_count(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    /// Vertex positions (f64 for precision)
    vertices: Vec<DVec3>,
    /// Triangle indices (3 indices per triangle)
    triangles: Vec<[u32; 3]>,
}

impl Mesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Returns the length of the flattened index buffer.
    #[inline]
    pub fn index_count(&self) -> usize {
        self.triangles.len() * 3
    }

    /// Returns true if the mesh has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Adds a vertex and returns its index.
    pub fn add_vertex(&mut self, position: DVec3) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(position);
        index
    }

    /// Adds a triangle by vertex indices.
    pub fn add_triangle(&mut self, v0: u32, v1: u32, v2: u32) {
        self.triangles.push([v0, v1, v2]);
    }

    /// Returns a reference to the vertices.
    #[inline]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Returns a reference to the triangles.
    #[inline]
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Returns the vertex at the given index.
    #[inline]
    pub fn vertex(&self, index: u32) -> DVec3 {
        self.vertices[index as usize]
    }

    /// Transforms all vertices by a 4x4 matrix.
    pub fn transform(&mut self, matrix: &DMat4) {
        for v in &mut self.vertices {
            *v = matrix.transform_point3(*v);
        }
    }

    /// Returns a copy of this mesh transformed by `matrix`.
    pub fn transformed(&self, matrix: &DMat4) -> Mesh {
        let mut copy = self.clone();
        copy.transform(matrix);
        copy
    }

    /// Appends another mesh, offsetting its indices past this mesh's vertices.
    ///
    /// Fails without modifying `self` when the combined vertex count would
    /// no longer fit u32 indices.
    pub fn append(&mut self, other: &Mesh) -> Result<(), MeshError> {
        let count = self.vertices.len() + other.vertices.len();
        if count > MAX_VERTICES {
            return Err(MeshError::TooManyVertices {
                count,
                max: MAX_VERTICES,
            });
        }

        let offset = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.triangles.extend(
            other
                .triangles
                .iter()
                .map(|tri| [tri[0] + offset, tri[1] + offset, tri[2] + offset]),
        );
        Ok(())
    }

    /// Reorders vertices by first use in the index buffer.
    ///
    /// Positions, triangle order and winding are unchanged; only the vertex
    /// numbering moves so consecutive triangles touch nearby vertices.
    /// Unreferenced vertices keep their relative order at the end.
    pub fn optimize(&mut self) {
        const UNASSIGNED: u32 = u32::MAX;

        let mut remap = vec![UNASSIGNED; self.vertices.len()];
        let mut order = Vec::with_capacity(self.vertices.len());

        for tri in &self.triangles {
            for &index in tri {
                let slot = &mut remap[index as usize];
                if *slot == UNASSIGNED {
                    *slot = order.len() as u32;
                    order.push(index);
                }
            }
        }
        for (index, slot) in remap.iter_mut().enumerate() {
            if *slot == UNASSIGNED {
                *slot = order.len() as u32;
                order.push(index as u32);
            }
        }

        self.vertices = order.iter().map(|&i| self.vertices[i as usize]).collect();
        for tri in &mut self.triangles {
            for index in tri.iter_mut() {
                *index = remap[*index as usize];
            }
        }
    }

    /// Validates the mesh for correctness.
    ///
    /// Checks:
    /// - All triangle indices are valid
    /// - No degenerate triangles (repeated index or zero area)
    pub fn validate(&self) -> bool {
        let vertex_count = self.vertices.len() as u32;

        self.triangles.iter().all(|tri| {
            if tri.iter().any(|&i| i >= vertex_count) {
                return false;
            }
            if tri[0] == tri[1] || tri[1] == tri[2] || tri[0] == tri[2] {
                return false;
            }

            let v0 = self.vertices[tri[0] as usize];
            let v1 = self.vertices[tri[1] as usize];
            let v2 = self.vertices[tri[2] as usize];
            (v1 - v0).cross(v2 - v0).length() >= EPSILON
        })
    }

    /// Exports vertices as f32 array for GPU.
    ///
    /// Returns flattened [x, y, z, x, y, z, ...] array.
    pub fn vertices_f32(&self) -> Vec<f32> {
        self.vertices
            .iter()
            .flat_map(|v| [v.x as f32, v.y as f32, v.z as f32])
            .collect()
    }

    /// Exports triangle indices as u32 array for GPU.
    ///
    /// Returns flattened [i0, i1, i2, i0, i1, i2, ...] array.
    pub fn indices_u32(&self) -> Vec<u32> {
        self.triangles.iter().flatten().copied().collect()
    }
}
