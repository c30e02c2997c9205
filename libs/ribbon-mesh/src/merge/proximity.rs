//! # Proximity Test
//!
//! Decides whether two meshes touch: some world-space vertex of one lies
//! strictly closer than the tolerance to some world-space vertex of the
//! other. The relation is symmetric by construction.

use config::constants::GRID_SCAN_THRESHOLD;
use glam::DVec3;
use rayon::prelude::*;

use super::vertex_grid::VertexGrid;
use crate::mesh_set::RibbonMesh;

/// True if any vertex of `a` is strictly closer than `tolerance` to any vertex of `b`.
///
/// Small inputs use an exhaustive pairwise scan; above
/// [`GRID_SCAN_THRESHOLD`] vertex pairs the larger side is hashed into a
/// [`VertexGrid`]. Both paths evaluate the same predicate.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use ribbon_mesh::merge::vertices_within;
///
/// let a = [DVec3::ZERO];
/// let b = [DVec3::new(0.005, 0.0, 0.0)];
/// assert!(vertices_within(&a, &b, 0.01));
/// assert!(!vertices_within(&a, &b, 0.005));
/// ```
pub fn vertices_within(a: &[DVec3], b: &[DVec3], tolerance: f64) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }

    let tolerance_sq = tolerance * tolerance;

    if a.len().saturating_mul(b.len()) <= GRID_SCAN_THRESHOLD {
        return a
            .par_iter()
            .any(|va| b.iter().any(|vb| va.distance_squared(*vb) < tolerance_sq));
    }

    let (indexed, queries) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    let grid = VertexGrid::new(indexed, tolerance);
    queries.par_iter().any(|q| grid.any_within(*q))
}

/// World-space proximity test between two meshes.
pub fn should_merge(a: &RibbonMesh, b: &RibbonMesh, tolerance: f64) -> bool {
    if a.handle() == b.handle() {
        return false;
    }
    let world_a = a.world_mesh();
    let world_b = b.world_mesh();
    vertices_within(world_a.vertices(), world_b.vertices(), tolerance)
}
