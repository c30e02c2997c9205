//! # Viewer Camera
//!
//! Pinhole camera used for the to-camera direction, viewport tests, and
//! screen-space width measurement.

use config::constants::EPSILON;
use glam::{DMat4, DVec2, DVec3};
use serde::{Deserialize, Serialize};

/// Viewer camera: world position, combined view-projection, and pixel size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub position: DVec3,
    pub view_projection: DMat4,
    pub pixel_width: f64,
    pub pixel_height: f64,
}

impl Camera {
    /// Right-handed perspective camera at `position` looking at `target`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use glam::DVec3;
    /// use ribbon_mesh::tracking::Camera;
    ///
    /// let camera = Camera::look_at(DVec3::new(0.0, 0.0, 1.0), DVec3::ZERO, 1.0, 800.0, 600.0);
    /// assert!(camera.is_point_in_view(DVec3::ZERO));
    /// assert!(!camera.is_point_in_view(DVec3::new(0.0, 0.0, 2.0)));
    /// ```
    pub fn look_at(
        position: DVec3,
        target: DVec3,
        fov_y_radians: f64,
        pixel_width: f64,
        pixel_height: f64,
    ) -> Self {
        const NEAR: f64 = 0.01;
        const FAR: f64 = 100.0;

        let view = DMat4::look_at_rh(position, target, DVec3::Y);
        let aspect = pixel_width / pixel_height.max(1.0);
        let projection = DMat4::perspective_rh(fov_y_radians, aspect, NEAR, FAR);

        Self {
            position,
            view_projection: projection * view,
            pixel_width,
            pixel_height,
        }
    }

    /// Projects a world point to viewport space.
    ///
    /// `x` and `y` are in `[0, 1]` across the visible image; `z` is the
    /// depth in front of the camera (negative behind it, zero when the point
    /// cannot be projected).
    pub fn world_to_viewport(&self, point: DVec3) -> DVec3 {
        let clip = self.view_projection * point.extend(1.0);
        if clip.w.abs() < EPSILON {
            return DVec3::new(0.5, 0.5, 0.0);
        }
        let ndc = clip.truncate() / clip.w;
        DVec3::new(ndc.x * 0.5 + 0.5, ndc.y * 0.5 + 0.5, clip.w)
    }

    /// Projects a world point to pixel coordinates.
    pub fn world_to_screen(&self, point: DVec3) -> DVec2 {
        let viewport = self.world_to_viewport(point);
        DVec2::new(
            viewport.x * self.pixel_width,
            viewport.y * self.pixel_height,
        )
    }

    /// True if the point projects inside the image and lies in front of the camera.
    pub fn is_point_in_view(&self, point: DVec3) -> bool {
        let v = self.world_to_viewport(point);
        v.z > 0.0 && (0.0..=1.0).contains(&v.x) && (0.0..=1.0).contains(&v.y)
    }

    /// Distance between `a` and `b` on screen, converted back to world units
    /// using the depth of `a`.
    pub fn screen_space_width(&self, a: DVec3, b: DVec3) -> f64 {
        if self.pixel_width <= 0.0 {
            return 0.0;
        }
        let screen_distance = self.world_to_screen(a).distance(self.world_to_screen(b));
        let depth = (a - self.position).length();
        screen_distance * depth / self.pixel_width
    }
}
