//! # Strand State
//!
//! Per-hand ribbon record. Geometry buffers are append-only and private;
//! the builder is the only writer, so vertex counts stay even and index
//! counts stay a multiple of six.

use glam::DVec3;

use super::perpendicular::WORLD_RIGHT;
use crate::mesh::Mesh;

/// Geometry appended by one accepted sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryDelta {
    /// Index of the first appended vertex (the top of the new cross-section).
    pub first_vertex: u32,
    /// Top and bottom vertices of the new cross-section.
    pub vertices: [DVec3; 2],
    /// Triangles joining the previous cross-section, absent for the first one.
    pub triangles: Option<[[u32; 3]; 2]>,
    /// Width after clamping.
    pub width: f64,
    /// Unit width axis used for this cross-section.
    pub perpendicular: DVec3,
}

/// Why a sample produced no geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SkipReason {
    /// The strand is not being extended.
    Inactive,
    /// The sample moved less than the configured minimum distance.
    BelowMoveThreshold { distance: f64 },
    /// Position, width, or camera contained NaN or infinity.
    InvalidSample,
}

/// Result of submitting one sample to a strand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SampleOutcome {
    Emitted(GeometryDelta),
    Skipped(SkipReason),
}

impl SampleOutcome {
    /// Returns the appended geometry, if any.
    pub fn delta(&self) -> Option<&GeometryDelta> {
        match self {
            SampleOutcome::Emitted(delta) => Some(delta),
            SampleOutcome::Skipped(_) => None,
        }
    }

    /// True when the sample appended triangles (second cross-section onward).
    pub fn emitted_triangles(&self) -> bool {
        self.delta().is_some_and(|d| d.triangles.is_some())
    }
}

/// One continuously tracked two-point input and the ribbon it is growing.
#[derive(Debug, Clone)]
pub struct Strand {
    active: bool,
    last_position: DVec3,
    last_width: f64,
    last_perpendicular: DVec3,
    mesh: Mesh,
}

impl Default for Strand {
    fn default() -> Self {
        Self::new()
    }
}

impl Strand {
    /// Creates an inactive strand with no geometry.
    pub fn new() -> Self {
        Self {
            active: false,
            last_position: DVec3::ZERO,
            last_width: 0.0,
            last_perpendicular: WORLD_RIGHT,
            mesh: Mesh::new(),
        }
    }

    /// Whether the ribbon is currently being extended.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Spine position of the last accepted sample.
    #[inline]
    pub fn last_position(&self) -> DVec3 {
        self.last_position
    }

    /// Width of the last accepted sample, after clamping.
    #[inline]
    pub fn last_width(&self) -> f64 {
        self.last_width
    }

    /// Width axis of the last accepted cross-section.
    #[inline]
    pub fn last_perpendicular(&self) -> DVec3 {
        self.last_perpendicular
    }

    /// Read-only view of the accumulated ribbon.
    #[inline]
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Number of accepted cross-sections.
    #[inline]
    pub fn cross_section_count(&self) -> usize {
        self.mesh.vertex_count() / 2
    }

    pub(crate) fn reset(&mut self, initial_width: f64) {
        self.mesh = Mesh::new();
        self.last_width = initial_width;
        self.last_perpendicular = WORLD_RIGHT;
        self.active = true;
    }

    pub(crate) fn deactivate(&mut self) {
        self.active = false;
    }

    /// Appends the cross-section at `position` and joins it to the previous
    /// one. Vertices are always pushed as a (top, bottom) pair.
    pub(crate) fn push_cross_section(
        &mut self,
        position: DVec3,
        perpendicular: DVec3,
        width: f64,
    ) -> GeometryDelta {
        let half = perpendicular * (width * 0.5);
        let top = self.mesh.add_vertex(position + half);
        let bottom = self.mesh.add_vertex(position - half);

        let triangles = if top >= 2 {
            let (prev_top, prev_bottom) = (top - 2, top - 1);
            let first = [prev_top, prev_bottom, top];
            let second = [prev_bottom, bottom, top];
            self.mesh.add_triangle(first[0], first[1], first[2]);
            self.mesh.add_triangle(second[0], second[1], second[2]);
            Some([first, second])
        } else {
            None
        };

        self.last_position = position;
        self.last_width = width;
        self.last_perpendicular = perpendicular;

        GeometryDelta {
            first_vertex: top,
            vertices: [position + half, position - half],
            triangles,
            width,
            perpendicular,
        }
    }
}
