//! Nearest-hit scene traversal.

use ember_core::{Scene, Triangle};
use ember_math::{Interval, Ray, Vec3};

use crate::intersect::intersect_triangle;

/// Record of the nearest ray-scene intersection.
#[derive(Debug, Clone, Copy)]
pub struct Hit<'a> {
    /// Ray parameter of the hit
    pub t: f32,
    /// World-space hit point
    pub point: Vec3,
    /// The intersected triangle
    pub triangle: &'a Triangle,
}

/// Anything a ray can be traced against.
///
/// `Scene` implements this with a linear scan over its triangle list. An
/// accelerated structure (BVH, grid) can implement the same trait and drop
/// in without touching the intersection test or the integrator.
pub trait Traversable: Send + Sync {
    /// Nearest hit along `ray` with t inside `ray_t`, or `None`.
    fn nearest_hit(&self, ray: &Ray, ray_t: Interval) -> Option<Hit<'_>>;
}

impl Traversable for Scene {
    fn nearest_hit(&self, ray: &Ray, ray_t: Interval) -> Option<Hit<'_>> {
        let mut best: Option<Hit<'_>> = None;
        let mut clip = ray_t;

        for tri in self.triangles() {
            if let Some(t) = intersect_triangle(ray, tri, clip) {
                // Strict comparison: on an exact tie the first triangle wins
                if best.map_or(true, |hit| t < hit.t) {
                    clip = clip.with_max(t);
                    best = Some(Hit {
                        t,
                        point: ray.at(t),
                        triangle: tri,
                    });
                }
            }
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clip() -> Interval {
        Interval::new(0.001, 100.0)
    }

    fn xy_triangle(z: f32, albedo: Vec3) -> Triangle {
        Triangle::new(
            Vec3::new(-1.0, -1.0, z),
            Vec3::new(1.0, -1.0, z),
            Vec3::new(0.0, 1.0, z),
            albedo,
            Vec3::ZERO,
        )
    }

    #[test]
    fn test_nearest_of_two_hits() {
        let near = xy_triangle(-1.0, Vec3::new(1.0, 0.0, 0.0));
        let far = xy_triangle(-2.0, Vec3::new(0.0, 1.0, 0.0));
        // Far triangle listed first; distance must decide, not order
        let scene = Scene::new(vec![far, near]).unwrap();

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let hit = scene.nearest_hit(&ray, clip()).unwrap();

        assert!((hit.t - 1.0).abs() < 1e-5);
        assert_eq!(hit.triangle.albedo, Vec3::new(1.0, 0.0, 0.0));
        assert!((hit.point - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5);
    }

    #[test]
    fn test_tie_goes_to_first_triangle() {
        // Two coplanar identical triangles hit at exactly the same t
        let first = xy_triangle(-1.0, Vec3::new(1.0, 0.0, 0.0));
        let second = xy_triangle(-1.0, Vec3::new(0.0, 1.0, 0.0));
        let scene = Scene::new(vec![first, second]).unwrap();

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let hit = scene.nearest_hit(&ray, clip()).unwrap();
        assert_eq!(hit.triangle.albedo, Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_no_hit() {
        let scene = Scene::new(vec![xy_triangle(-1.0, Vec3::splat(0.5))]).unwrap();
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        assert!(scene.nearest_hit(&ray, clip()).is_none());
    }

    #[test]
    fn test_empty_scene_never_hits() {
        let scene = Scene::new(Vec::new()).unwrap();
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert!(scene.nearest_hit(&ray, clip()).is_none());
    }
}
