//! # Width Axis
//!
//! Computes the unit vector along which a cross-section spans its width.
//! The axis is orthogonal to both the travel direction and the direction
//! to the viewer, so the ribbon reads as a billboard from the camera.

use config::constants::DEGENERATE_CROSS_THRESHOLD;
use glam::DVec3;

/// World up axis.
pub const WORLD_UP: DVec3 = DVec3::Y;
/// World forward axis, the secondary reference when the view cross product collapses.
pub const WORLD_FORWARD: DVec3 = DVec3::Z;
/// World right axis, the width axis of a fresh strand.
pub const WORLD_RIGHT: DVec3 = DVec3::X;

/// Which path produced a width axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisSource {
    /// Cross product against the view direction.
    View,
    /// Travel direction is collinear with the view; crossed with world forward.
    FallbackForward,
    /// Every candidate collapsed; previous axis reused.
    Previous,
}

/// A unit width axis and how it was derived.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WidthAxis {
    pub axis: DVec3,
    pub source: AxisSource,
}

/// Width axis for the first cross-section of a strand: `up × to_camera`.
pub fn initial_axis(position: DVec3, camera_position: DVec3, previous: DVec3) -> WidthAxis {
    let to_camera = (camera_position - position).normalize_or_zero();
    let raw = WORLD_UP.cross(to_camera);

    if raw.length() >= DEGENERATE_CROSS_THRESHOLD {
        WidthAxis {
            axis: raw.normalize(),
            source: AxisSource::View,
        }
    } else {
        WidthAxis {
            axis: previous,
            source: AxisSource::Previous,
        }
    }
}

/// Width axis for a segment travelling along `forward`: `forward × to_camera`.
///
/// The result is flipped when it points against `previous` so a stroke that
/// reverses direction does not twist the ribbon.
pub fn segment_axis(forward: DVec3, to_camera: DVec3, previous: DVec3) -> WidthAxis {
    let raw = forward.cross(to_camera);
    let fallback = forward.cross(WORLD_FORWARD);

    let mut chosen = if raw.length() >= DEGENERATE_CROSS_THRESHOLD {
        WidthAxis {
            axis: raw.normalize(),
            source: AxisSource::View,
        }
    } else if fallback.length() >= DEGENERATE_CROSS_THRESHOLD {
        WidthAxis {
            axis: fallback.normalize(),
            source: AxisSource::FallbackForward,
        }
    } else {
        return WidthAxis {
            axis: previous,
            source: AxisSource::Previous,
        };
    };

    if chosen.axis.dot(previous) < 0.0 {
        chosen.axis = -chosen.axis;
    }
    chosen
}
