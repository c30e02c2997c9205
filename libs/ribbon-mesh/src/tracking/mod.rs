//! # Tracking Input
//!
//! Converts raw fingertip poses and a viewer camera into ribbon samples.
//! Acquisition itself happens elsewhere; this module only reads the poses
//! it is handed each tick.

mod camera;


pub use camera::Camera;

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Which tracked hand a pose or strand belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hand {
    Left,
    Right,
}

impl Hand {
    /// Both hands, in update order.
    pub const ALL: [Hand; 2] = [Hand::Left, Hand::Right];

    pub(crate) fn index(self) -> usize {
        match self {
            Hand::Left => 0,
            Hand::Right => 1,
        }
    }
}

/// How fingertip separation is measured for the pinch gate.
///
/// The ribbon itself is always as wide as the world fingertip distance;
/// only the open/closed decision changes with the mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WidthMode {
    /// Euclidean distance between the fingertips.
    #[default]
    World,
    /// Fingertip distance measured on screen, scaled back by depth.
    ScreenSpace,
}

/// Index and thumb tip positions of one hand for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HandPose {
    pub index_tip: DVec3,
    pub thumb_tip: DVec3,
    /// False when the tracker lost either fingertip this tick.
    pub tracked: bool,
}

impl HandPose {
    /// A pose with both fingertips tracked.
    pub fn tracked(index_tip: DVec3, thumb_tip: DVec3) -> Self {
        Self {
            index_tip,
            thumb_tip,
            tracked: true,
        }
    }

    /// A pose whose fingertips were not found.
    pub fn lost() -> Self {
        Self {
            index_tip: DVec3::ZERO,
            thumb_tip: DVec3::ZERO,
            tracked: false,
        }
    }

    /// World distance between the fingertips.
    pub fn finger_distance(&self) -> f64 {
        self.index_tip.distance(self.thumb_tip)
    }

    /// Builds the ribbon sample for this pose.
    ///
    /// The index tip is the ribbon spine and `width` is the world fingertip
    /// distance; `mode` only selects how `pinch_width` is measured. Returns
    /// `None` when the pose is untracked or the sample is not finite.
    pub fn sample(&self, camera: &Camera, mode: WidthMode) -> Option<RibbonSample> {
        if !self.tracked {
            return None;
        }
        let width = self.finger_distance();
        let pinch_width = match mode {
            WidthMode::World => width,
            WidthMode::ScreenSpace => camera.screen_space_width(self.index_tip, self.thumb_tip),
        };
        let sample = RibbonSample {
            position: self.index_tip,
            width,
            pinch_width,
        };
        let finite = sample.position.is_finite()
            && sample.width.is_finite()
            && sample.pinch_width.is_finite();
        finite.then_some(sample)
    }
}

/// Center point and cross-width for one strand and tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RibbonSample {
    pub position: DVec3,
    /// World fingertip distance, used as the cross-section width.
    pub width: f64,
    /// Separation compared against the pinch threshold.
    pub pinch_width: f64,
}

/// Everything the core reads from the tracker in one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackingFrame {
    pub camera: Camera,
    pub left: HandPose,
    pub right: HandPose,
}

impl TrackingFrame {
    /// Pose of the given hand.
    pub fn pose(&self, hand: Hand) -> &HandPose {
        match hand {
            Hand::Left => &self.left,
            Hand::Right => &self.right,
        }
    }
}
