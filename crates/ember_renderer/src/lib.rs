//! Ember Renderer - single-bounce CPU path tracing.
//!
//! A Monte Carlo renderer that estimates direct illumination per pixel:
//! one camera ray, one hemisphere sample, one secondary ray. Frames are
//! deterministic given the frame number, so repeated frames can be blended
//! into a progressively converging image.

mod camera;
mod integrator;
mod intersect;
mod renderer;
mod rng;
mod sampling;
mod traverse;

pub use camera::{Camera, CameraConfig};
pub use integrator::{ConfigError, Integrator, RenderConfig};
pub use intersect::{intersect_triangle, EPSILON};
pub use renderer::{color_to_rgba, linear_to_gamma, render_frame, Color, Film};
pub use rng::PixelRng;
pub use sampling::{sample_hemisphere, sample_sphere};
pub use traverse::{Hit, Traversable};

/// Re-export scene and math types from ember_core / ember_math
pub use ember_core::{Scene, SceneError, Triangle};
pub use ember_math::{Interval, Ray, Vec3};
