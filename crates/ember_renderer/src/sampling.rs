//! Direction sampling for the Monte Carlo estimator.

use std::f32::consts::PI;

use ember_math::Vec3;

/// Uniform direction on the unit sphere via inverse-transform sampling.
///
/// `u0` and `u1` are uniform in [0, 1); values at the boundary land on a
/// pole, which is a valid direction.
pub fn sample_sphere(u0: f32, u1: f32) -> Vec3 {
    let z = 2.0 * u1 - 1.0;
    let r = (1.0 - z * z).max(0.0).sqrt();
    let phi = 2.0 * PI * u0;
    Vec3::new(r * phi.cos(), r * phi.sin(), z)
}

/// Uniform direction on the hemisphere around `normal` (pdf 1/2π).
///
/// Samples the full sphere and folds directions from the lower hemisphere
/// across the plane orthogonal to `normal`, so the result always satisfies
/// `dot(result, normal) >= 0`.
pub fn sample_hemisphere(u0: f32, u1: f32, normal: Vec3) -> Vec3 {
    let omega = sample_sphere(u0, u1);
    let d = omega.dot(normal);
    if d < 0.0 {
        omega - 2.0 * d * normal
    } else {
        omega
    }
}
