//! Centralized configuration values shared across the ribbon mesh pipeline.
//!
//! Each public item in this module documents its purpose and provides a minimal
//! usage example so that downstream crates can remain declarative and avoid
//! scattering literals.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for floating-point comparisons in geometry kernels.
///
/// # Examples
/// ```
/// use config::constants::EPSILON;
/// assert!((1.0_f64 - (1.0 + 1e-13)).abs() < EPSILON);
/// ```
pub const EPSILON: f64 = 1e-10;

/// Minimum magnitude of a raw cross product before it is considered
/// degenerate and a fallback reference axis is used instead.
///
/// # Examples
/// ```
/// use config::constants::DEGENERATE_CROSS_THRESHOLD;
/// assert_eq!(DEGENERATE_CROSS_THRESHOLD, 0.01);
/// ```
pub const DEGENERATE_CROSS_THRESHOLD: f64 = 0.01;

// =============================================================================
// RIBBON DEFAULTS
// =============================================================================

/// Default minimum distance (meters) the tracked point must travel before a
/// new cross-section is accepted.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_MIN_MOVE_DISTANCE;
/// let moved = 0.01;
/// assert!(moved >= DEFAULT_MIN_MOVE_DISTANCE);
/// ```
pub const DEFAULT_MIN_MOVE_DISTANCE: f64 = 0.005;

/// Default fingertip separation (meters) below which the hand counts as
/// pinched and the ribbon stops growing.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_MIN_FINGER_DISTANCE;
/// assert!(0.004 < DEFAULT_MIN_FINGER_DISTANCE);
/// ```
pub const DEFAULT_MIN_FINGER_DISTANCE: f64 = 0.01;

/// Default maximum fractional width change between adjacent cross-sections.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_MAX_WIDTH_CHANGE_RATIO;
/// let last_width = 0.02;
/// let ceiling = last_width * (1.0 + DEFAULT_MAX_WIDTH_CHANGE_RATIO);
/// assert!(ceiling < 0.025);
/// ```
pub const DEFAULT_MAX_WIDTH_CHANGE_RATIO: f64 = 0.2;

/// Default world-space vertex distance (meters) at which two ribbons are
/// considered touching and get merged.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_EDGE_MERGE_DISTANCE;
/// assert!(0.005 < DEFAULT_EDGE_MERGE_DISTANCE);
/// ```
pub const DEFAULT_EDGE_MERGE_DISTANCE: f64 = 0.01;

/// Accepted range (meters) for `RibbonConfig::min_move_distance`.
///
/// The lower bound keeps accepted segments from collapsing to zero length.
///
/// # Examples
/// ```
/// use config::constants::{DEFAULT_MIN_MOVE_DISTANCE, MOVE_DISTANCE_RANGE};
/// assert!(MOVE_DISTANCE_RANGE.contains(&DEFAULT_MIN_MOVE_DISTANCE));
/// assert!(!MOVE_DISTANCE_RANGE.contains(&0.0));
/// ```
pub const MOVE_DISTANCE_RANGE: RangeInclusive<f64> = 0.001..=0.1;

/// Accepted range (meters) for `RibbonConfig::min_finger_distance`.
pub const FINGER_DISTANCE_RANGE: RangeInclusive<f64> = 0.005..=0.05;

// =============================================================================
// LIMIT CONSTANTS
// =============================================================================

/// Maximum number of vertices in a single mesh.
///
/// Triangle indices are `u32`, so merged meshes must stay below this bound.
pub const MAX_VERTICES: usize = u32::MAX as usize;

/// Vertex-pair count above which the proximity test switches from the
/// exhaustive scan to a hash grid.
///
/// # Examples
/// ```
/// use config::constants::GRID_SCAN_THRESHOLD;
/// let pairs = 40 * 40;
/// assert!(pairs < GRID_SCAN_THRESHOLD);
/// ```
pub const GRID_SCAN_THRESHOLD: usize = 65_536;

// =============================================================================
// RIBBON CONFIGURATION
// =============================================================================

/// Immutable snapshot of the ribbon tunables, passed to builders and mergers
/// at construction time.
///
/// # Examples
/// ```
/// use config::constants::RibbonConfig;
/// let config = RibbonConfig::default();
/// assert!(config.max_width_change_ratio > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RibbonConfig {
    /// Minimum travel distance (meters) between accepted samples.
    pub min_move_distance: f64,
    /// Fingertip distance (meters) below which the strand is not drawing.
    pub min_finger_distance: f64,
    /// Maximum fractional width change between adjacent cross-sections.
    pub max_width_change_ratio: f64,
    /// Vertex proximity (meters) at which two ribbons merge.
    pub edge_merge_distance: f64,
}

impl RibbonConfig {
    /// Builds a configuration enforcing strict validation of every field.
    ///
    /// # Examples
    /// ```
    /// use config::constants::RibbonConfig;
    /// let cfg = RibbonConfig::new(0.005, 0.01, 0.2, 0.01).expect("valid config");
    /// assert_eq!(cfg.edge_merge_distance, 0.01);
    /// ```
    pub fn new(
        min_move_distance: f64,
        min_finger_distance: f64,
        max_width_change_ratio: f64,
        edge_merge_distance: f64,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            min_move_distance,
            min_finger_distance,
            max_width_change_ratio,
            edge_merge_distance,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks every field, for configurations that were deserialized or
    /// assembled field by field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !MOVE_DISTANCE_RANGE.contains(&self.min_move_distance) {
            return Err(ConfigError::InvalidMoveDistance(self.min_move_distance));
        }
        if !FINGER_DISTANCE_RANGE.contains(&self.min_finger_distance) {
            return Err(ConfigError::InvalidFingerDistance(self.min_finger_distance));
        }
        if !(0.0..=1.0).contains(&self.max_width_change_ratio) {
            return Err(ConfigError::InvalidWidthRatio(self.max_width_change_ratio));
        }
        if !(self.edge_merge_distance.is_finite() && self.edge_merge_distance > 0.0) {
            return Err(ConfigError::InvalidMergeDistance(self.edge_merge_distance));
        }
        Ok(())
    }
}

impl Default for RibbonConfig {
    fn default() -> Self {
        Self {
            min_move_distance: DEFAULT_MIN_MOVE_DISTANCE,
            min_finger_distance: DEFAULT_MIN_FINGER_DISTANCE,
            max_width_change_ratio: DEFAULT_MAX_WIDTH_CHANGE_RATIO,
            edge_merge_distance: DEFAULT_EDGE_MERGE_DISTANCE,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// Raised when the movement threshold falls outside [`MOVE_DISTANCE_RANGE`].
    InvalidMoveDistance(f64),
    /// Raised when the pinch threshold falls outside [`FINGER_DISTANCE_RANGE`].
    InvalidFingerDistance(f64),
    /// Raised when the width change ratio falls outside `[0, 1]`.
    InvalidWidthRatio(f64),
    /// Raised when the merge tolerance is zero, negative, or not finite.
    InvalidMergeDistance(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidMoveDistance(value) => {
                write!(
                    f,
                    "min_move_distance must be within [{}, {}]: {value}",
                    MOVE_DISTANCE_RANGE.start(),
                    MOVE_DISTANCE_RANGE.end()
                )
            }
            ConfigError::InvalidFingerDistance(value) => {
                write!(
                    f,
                    "min_finger_distance must be within [{}, {}]: {value}",
                    FINGER_DISTANCE_RANGE.start(),
                    FINGER_DISTANCE_RANGE.end()
                )
            }
            ConfigError::InvalidWidthRatio(value) => {
                write!(f, "max_width_change_ratio must be within [0, 1]: {value}")
            }
            ConfigError::InvalidMergeDistance(value) => {
                write!(f, "edge_merge_distance must be finite and > 0: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
