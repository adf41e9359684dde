//! The direct-illumination integrator.
//!
//! Estimates per-pixel radiance as emitted light at the primary hit plus a
//! one-sample Monte Carlo estimate of light reflected from emissive
//! surfaces via a single diffuse bounce.

use std::f32::consts::PI;

use ember_core::Triangle;
use ember_math::{Interval, Ray, Vec3};
use thiserror::Error;

use crate::camera::Camera;
use crate::rng::PixelRng;
use crate::sampling::sample_hemisphere;
use crate::traverse::Traversable;

/// Configuration rejected at integrator construction.
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("sample_count must be at least 1")]
    ZeroSampleCount,

    #[error("t range is empty (t_min {min} must be positive and below t_max {max})")]
    InvalidRange { min: f32, max: f32 },
}

/// Render settings.
#[derive(Debug, Clone, Copy)]
pub struct RenderConfig {
    /// Independent radiance samples averaged per pixel per frame
    pub sample_count: u32,
    /// Minimum hit distance; keeps secondary rays off their own surface
    pub t_min: f32,
    /// Maximum hit distance
    pub t_max: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            sample_count: 1,
            t_min: 0.001,
            t_max: 100.0,
        }
    }
}

impl RenderConfig {
    /// Check for settings that would poison the estimator.
    ///
    /// A zero sample count would divide the accumulated radiance by zero;
    /// it is a setup error, never a NaN in the image.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_count == 0 {
            return Err(ConfigError::ZeroSampleCount);
        }
        if !(self.t_min > 0.0 && self.t_min < self.t_max) {
            return Err(ConfigError::InvalidRange {
                min: self.t_min,
                max: self.t_max,
            });
        }
        Ok(())
    }
}

/// Ties camera, scene, and settings together; one instance serves every
/// pixel of every frame concurrently.
pub struct Integrator<'s, T: Traversable> {
    scene: &'s T,
    camera: Camera,
    config: RenderConfig,
}

impl<'s, T: Traversable> Integrator<'s, T> {
    /// Create an integrator, validating the config up front.
    pub fn new(scene: &'s T, camera: Camera, config: RenderConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            scene,
            camera,
            config,
        })
    }

    fn clip(&self) -> Interval {
        Interval::new(self.config.t_min, self.config.t_max)
    }

    /// Emitted plus single-bounce reflected radiance at a surface point.
    ///
    /// One hemisphere direction is drawn around the surface normal and
    /// traced; if it reaches an emitter, its emission is weighted by the
    /// Lambertian BRDF (albedo/π), the cosine term, and 2π (the reciprocal
    /// of the uniform-hemisphere pdf).
    fn direct_illumination(&self, point: Vec3, tri: &Triangle, rng: &mut PixelRng) -> Vec3 {
        let mut radiance = tri.emission;

        let [u0, u1] = rng.next_pair();
        let omega = sample_hemisphere(u0, u1, tri.normal);
        let bounce = Ray::new(point, omega);

        if let Some(hit) = self.scene.nearest_hit(&bounce, self.clip()) {
            let cosine = tri.normal.dot(omega);
            radiance += tri.albedo / PI * hit.triangle.emission * cosine * 2.0 * PI;
        }

        radiance
    }

    /// Estimate the radiance for the pixel at normalized image coordinates
    /// (x, y) in [0, 1]², for the given frame.
    ///
    /// Averages `sample_count` independent direct-illumination estimates at
    /// the primary hit. A primary miss is black. The result is unclamped
    /// linear RGB; tone mapping belongs to the caller.
    pub fn render_pixel(&self, x: f32, y: f32, frame_number: u32) -> Vec3 {
        let ray = self.camera.primary_ray(x, y);
        let mut rng = PixelRng::from_pixel(x, y, frame_number);

        let Some(hit) = self.scene.nearest_hit(&ray, self.clip()) else {
            return Vec3::ZERO;
        };

        let mut color = Vec3::ZERO;
        for _ in 0..self.config.sample_count {
            color += self.direct_illumination(hit.point, hit.triangle, &mut rng);
        }
        color / self.config.sample_count as f32
    }
}
