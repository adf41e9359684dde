//! Pinhole camera for primary ray generation.

use ember_math::{Ray, Vec3};

/// Camera parameters, supplied at construction.
///
/// The view plane is spanned by `up` and `right` (the latter scaled by
/// `aspect_ratio`) and centered on `middle`; rays leave `eye` through points
/// on that plane.
#[derive(Debug, Clone, Copy)]
pub struct CameraConfig {
    /// Eye position
    pub eye: Vec3,
    /// Center of the image plane
    pub middle: Vec3,
    /// Image-plane up vector (length = plane height)
    pub up: Vec3,
    /// Image-plane right vector before aspect scaling (length = plane width)
    pub right: Vec3,
    /// Horizontal aspect ratio applied to `right`
    pub aspect_ratio: f32,
}

impl Default for CameraConfig {
    /// The demo framing: above the Cornell box at y = 0.8, looking down -Y
    /// with -Z as image-up.
    fn default() -> Self {
        let eye = Vec3::new(0.278, 0.8, 0.2744);
        Self {
            eye,
            middle: eye - Vec3::new(0.0, 0.8, 0.0),
            up: Vec3::new(0.0, 0.0, -0.56),
            right: Vec3::new(-0.56, 0.0, 0.0),
            aspect_ratio: 1.0,
        }
    }
}

/// A pinhole camera with its image-plane origin precomputed.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    eye: Vec3,
    left_bottom: Vec3,
    right: Vec3,
    up: Vec3,
}

impl Camera {
    /// Build a camera from a config, caching the image-plane corner.
    pub fn new(config: &CameraConfig) -> Self {
        let right = config.aspect_ratio * config.right;
        let left_bottom = config.middle - 0.5 * right - 0.5 * config.up;
        Self {
            eye: config.eye,
            left_bottom,
            right,
            up: config.up,
        }
    }

    /// Primary ray through normalized image coordinates x, y in [0, 1].
    ///
    /// (0, 0) is the bottom-left corner of the image plane, (1, 1) the
    /// top-right. The returned direction is unit length.
    pub fn primary_ray(&self, x: f32, y: f32) -> Ray {
        let image_plane_pos = self.left_bottom + x * self.right + y * self.up;
        Ray::new(self.eye, (image_plane_pos - self.eye).normalize())
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(&CameraConfig::default())
    }
}
