//! Ray-triangle intersection.
//!
//! Uses the Möller-Trumbore algorithm: solve for the barycentric
//! coordinates (u, v) and ray parameter t in one pass, rejecting as soon as
//! any bound fails.

use ember_core::Triangle;
use ember_math::{Interval, Ray};

/// Determinants with magnitude below this are treated as a ray parallel to
/// the triangle plane.
pub const EPSILON: f32 = 1e-4;

/// Möller-Trumbore ray-triangle intersection.
///
/// Returns the ray parameter t of the hit, or `None` if the ray misses the
/// triangle or t falls outside `ray_t`. Parallel rays are a miss, never a
/// divide-by-zero. Pure function; triangles are hit from either side.
pub fn intersect_triangle(ray: &Ray, tri: &Triangle, ray_t: Interval) -> Option<f32> {
    let edge1 = tri.v1 - tri.v0;
    let edge2 = tri.v2 - tri.v0;

    let h = ray.direction.cross(edge2);
    let a = edge1.dot(h);

    // Ray is parallel to the triangle plane
    if a.abs() < EPSILON {
        return None;
    }

    let f = 1.0 / a;
    let s = ray.origin - tri.v0;
    let u = f * s.dot(h);

    // Intersection outside the triangle (u parameter)
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * ray.direction.dot(q);

    // Intersection outside the triangle (v parameter)
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);

    // Too close (self-intersection) or too far
    if !ray_t.contains(t) {
        return None;
    }

    Some(t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_math::Vec3;

    fn test_clip() -> Interval {
        Interval::new(0.001, 100.0)
    }

    fn xy_triangle(z: f32) -> Triangle {
        Triangle::new(
            Vec3::new(-1.0, -1.0, z),
            Vec3::new(1.0, -1.0, z),
            Vec3::new(0.0, 1.0, z),
            Vec3::splat(0.5),
            Vec3::ZERO,
        )
    }

    #[test]
    fn test_hit_through_centroid() {
        let tri = xy_triangle(-2.0);
        let centroid = (tri.v0 + tri.v1 + tri.v2) / 3.0;

        let origin = Vec3::new(0.3, -0.2, 1.0);
        let direction = (centroid - origin).normalize();
        let ray = Ray::new(origin, direction);

        let t = intersect_triangle(&ray, &tri, test_clip()).expect("centroid ray must hit");
        let expected = (centroid - origin).length();
        assert!(
            (t - expected).abs() / expected < 1e-4,
            "t = {t}, expected {expected}"
        );
    }

    #[test]
    fn test_miss_outside_footprint() {
        let tri = xy_triangle(-1.0);

        // Aim at a point outside the triangle by barycentric construction:
        // u = 1.5, v = -0.2 relative to (v0, v1, v2)
        let target = tri.v0 + 1.5 * (tri.v1 - tri.v0) - 0.2 * (tri.v2 - tri.v0);
        let origin = Vec3::new(0.0, 0.0, 1.0);
        let ray = Ray::new(origin, (target - origin).normalize());

        assert!(intersect_triangle(&ray, &tri, test_clip()).is_none());
    }

    #[test]
    fn test_parallel_ray_is_a_miss() {
        let tri = xy_triangle(-1.0);

        // Direction exactly in the triangle's plane
        let ray = Ray::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
        let result = intersect_triangle(&ray, &tri, test_clip());
        assert!(result.is_none());
    }

    #[test]
    fn test_t_outside_clip_range() {
        let tri = xy_triangle(-1.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        // Hit is at t = 1, but the clip range ends before it
        assert!(intersect_triangle(&ray, &tri, Interval::new(0.001, 0.5)).is_none());
        // And starts after it
        assert!(intersect_triangle(&ray, &tri, Interval::new(2.0, 100.0)).is_none());
        // The unclipped hit is there
        let t = intersect_triangle(&ray, &tri, test_clip()).unwrap();
        assert!((t - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_behind_ray_is_a_miss() {
        let tri = xy_triangle(1.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert!(intersect_triangle(&ray, &tri, test_clip()).is_none());
    }
}
