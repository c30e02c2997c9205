//! # Segment Quads
//!
//! Builds a strip from explicit start/end points without a camera, using
//! the segment direction crossed with world up as the width axis.

use config::constants::DEGENERATE_CROSS_THRESHOLD;
use glam::DVec3;

use super::perpendicular::{WORLD_FORWARD, WORLD_RIGHT, WORLD_UP};
use crate::mesh::Mesh;

/// Width axis for a segment from `start` to `end`.
fn segment_width_axis(start: DVec3, end: DVec3) -> DVec3 {
    let direction = (end - start).normalize_or_zero();

    let right = direction.cross(WORLD_UP);
    if right.length() >= DEGENERATE_CROSS_THRESHOLD {
        return right.normalize();
    }
    let right = direction.cross(WORLD_FORWARD);
    if right.length() >= DEGENERATE_CROSS_THRESHOLD {
        return right.normalize();
    }
    WORLD_RIGHT
}

/// Appends a quad spanning `start` to `end` to `mesh`.
///
/// When the mesh already ends in a cross-section (at least two vertices),
/// only the `end` pair is added and the quad reuses the last two vertices.
/// Otherwise all four corners are emitted.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use ribbon_mesh::Mesh;
/// use ribbon_mesh::ribbon::append_segment_quad;
///
/// let mut mesh = Mesh::new();
/// append_segment_quad(&mut mesh, DVec3::ZERO, DVec3::X, 0.5);
/// append_segment_quad(&mut mesh, DVec3::X, DVec3::new(2.0, 0.0, 0.0), 0.5);
/// assert_eq!(mesh.vertex_count(), 6);
/// assert_eq!(mesh.triangle_count(), 4);
/// ```
pub fn append_segment_quad(mesh: &mut Mesh, start: DVec3, end: DVec3, width: f64) {
    let offset = segment_width_axis(start, end) * (width * 0.5);
    let base = mesh.vertex_count() as u32;

    if base >= 2 {
        let top = mesh.add_vertex(end + offset);
        let bottom = mesh.add_vertex(end - offset);
        mesh.add_triangle(base - 2, base - 1, top);
        mesh.add_triangle(base - 1, bottom, top);
    } else {
        let start_top = mesh.add_vertex(start + offset);
        let start_bottom = mesh.add_vertex(start - offset);
        let end_top = mesh.add_vertex(end + offset);
        let end_bottom = mesh.add_vertex(end - offset);
        mesh.add_triangle(start_top, start_bottom, end_top);
        mesh.add_triangle(start_bottom, end_bottom, end_top);
    }
}
