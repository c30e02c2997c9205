//! # Ribbon Builder
//!
//! Turns a stream of (center, width) samples into a triangle strip.

use config::constants::RibbonConfig;
use glam::DVec3;
use tracing::{debug, trace};

use super::perpendicular::{initial_axis, segment_axis, AxisSource};
use super::strand::{SampleOutcome, SkipReason, Strand};
use crate::error::MeshError;

/// Clamps `width` to within `ratio` of `last_width`.
///
/// # Example
///
/// ```rust
/// use ribbon_mesh::ribbon::clamp_width;
///
/// assert_eq!(clamp_width(1.0, 0.5, 0.2), 0.6);
/// assert_eq!(clamp_width(0.1, 0.5, 0.2), 0.4);
/// assert_eq!(clamp_width(0.55, 0.5, 0.2), 0.55);
/// ```
pub fn clamp_width(width: f64, last_width: f64, ratio: f64) -> f64 {
    let max_change = last_width * ratio;
    width.max(last_width - max_change).min(last_width + max_change)
}

/// Incremental ribbon generator.
///
/// Stateless apart from its configuration; all per-hand state lives in the
/// [`Strand`] passed to each call.
///
/// # Example
///
/// ```rust
/// use config::constants::RibbonConfig;
/// use glam::DVec3;
/// use ribbon_mesh::ribbon::{RibbonBuilder, Strand};
///
/// let builder = RibbonBuilder::new(RibbonConfig::default()).unwrap();
/// let camera = DVec3::new(0.0, 0.0, -1.0);
/// let mut strand = Strand::new();
///
/// builder.begin_strand(&mut strand, 0.02);
/// builder.submit_sample(&mut strand, DVec3::ZERO, 0.02, camera);
/// builder.submit_sample(&mut strand, DVec3::new(0.01, 0.0, 0.0), 0.02, camera);
/// assert_eq!(strand.mesh().vertex_count(), 4);
/// assert_eq!(strand.mesh().index_count(), 6);
/// ```
#[derive(Debug, Clone)]
pub struct RibbonBuilder {
    config: RibbonConfig,
}

impl RibbonBuilder {
    /// Creates a builder, rejecting invalid configuration.
    pub fn new(config: RibbonConfig) -> Result<Self, MeshError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the configuration.
    pub fn config(&self) -> &RibbonConfig {
        &self.config
    }

    /// Clears the strand's geometry and marks it active.
    ///
    /// Negative or non-finite widths are treated as zero.
    pub fn begin_strand(&self, strand: &mut Strand, initial_width: f64) {
        let initial_width = if initial_width.is_finite() {
            initial_width.max(0.0)
        } else {
            0.0
        };
        strand.reset(initial_width);
        debug!(initial_width, "Strand started");
    }

    /// Submits one sample and appends a cross-section when it is accepted.
    pub fn submit_sample(
        &self,
        strand: &mut Strand,
        position: DVec3,
        width: f64,
        camera_position: DVec3,
    ) -> SampleOutcome {
        if !strand.is_active() {
            return SampleOutcome::Skipped(SkipReason::Inactive);
        }
        if !(position.is_finite() && width.is_finite() && camera_position.is_finite()) {
            trace!("Rejected non-finite sample");
            return SampleOutcome::Skipped(SkipReason::InvalidSample);
        }

        let width = clamp_width(
            width,
            strand.last_width(),
            self.config.max_width_change_ratio,
        );

        if strand.mesh().is_empty() {
            let axis = initial_axis(position, camera_position, strand.last_perpendicular());
            let delta = strand.push_cross_section(position, axis.axis, width);
            return SampleOutcome::Emitted(delta);
        }

        let distance = position.distance(strand.last_position());
        if distance < self.config.min_move_distance {
            trace!(distance, "Sample below movement threshold");
            return SampleOutcome::Skipped(SkipReason::BelowMoveThreshold { distance });
        }

        let forward = (position - strand.last_position()).normalize_or_zero();
        let to_camera = (camera_position - position).normalize_or_zero();
        let axis = segment_axis(forward, to_camera, strand.last_perpendicular());
        if axis.source != AxisSource::View {
            trace!(source = ?axis.source, "Degenerate view cross product, using fallback axis");
        }

        SampleOutcome::Emitted(strand.push_cross_section(position, axis.axis, width))
    }

    /// Marks the strand inactive. Geometry is left untouched.
    pub fn end_strand(&self, strand: &mut Strand) {
        if strand.is_active() {
            debug!(
                cross_sections = strand.cross_section_count(),
                "Strand ended"
            );
        }
        strand.deactivate();
    }
}
