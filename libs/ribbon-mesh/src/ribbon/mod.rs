//! # Ribbon Construction
//!
//! Incremental quad-strip generation from live tracking samples.
//!
//! ## Algorithm Overview
//!
//! Each accepted sample contributes one cross-section: two vertices at
//! `position ± axis * width / 2`. From the second cross-section onward two
//! triangles join it to the previous one.
//!
//! 1. Clamp the requested width to within `max_width_change_ratio` of the
//!    last width, rejecting single-frame tracking spikes
//! 2. Gate on `min_move_distance` so segments never collapse to zero length
//! 3. Width axis = `normalize(forward × to_camera)`, with a world-forward
//!    fallback when travel is collinear with the view
//!
//! ```text
//!  top_prev ─── top_new
//!     │  ╲         │
//!     │    ╲       │
//!  bot_prev ─── bot_new
//! ```

mod builder;
mod perpendicular;
mod quad;
mod strand;


pub use builder::{clamp_width, RibbonBuilder};
pub use perpendicular::{
    initial_axis, segment_axis, AxisSource, WidthAxis, WORLD_FORWARD, WORLD_RIGHT, WORLD_UP,
};
pub use quad::append_segment_quad;
pub use strand::{GeometryDelta, SampleOutcome, SkipReason, Strand};
