//! Scene representation: triangles with flat diffuse+emissive materials.
//!
//! The scene is built once at startup, validated, and then shared read-only
//! with every per-pixel evaluation. There is no runtime mutation and no
//! spatial acceleration structure; traversal lives in the renderer crate.

use std::path::Path;

use ember_math::Vec3;
use serde::Deserialize;
use thiserror::Error;

/// Cross products below this length indicate collinear vertices.
const DEGENERATE_AREA_EPSILON: f32 = 1e-8;

/// Errors produced while building or loading a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("triangle {0} is degenerate (collinear vertices)")]
    DegenerateTriangle(usize),

    #[error("triangle {0} has an albedo component outside [0, 1]")]
    AlbedoOutOfRange(usize),

    #[error("triangle {0} has a negative emission component")]
    NegativeEmission(usize),

    #[error("failed to parse scene JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A triangle with a flat Lambertian material.
///
/// `normal` is the unit face normal used for shading; the intersection test
/// itself works from the vertices alone, so triangles are hit from either
/// side.
#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    pub v0: Vec3,
    pub v1: Vec3,
    pub v2: Vec3,
    /// Unit face normal
    pub normal: Vec3,
    /// Diffuse albedo (linear RGB, components in [0, 1])
    pub albedo: Vec3,
    /// Emitted radiance (linear RGB, non-negative; zero for non-emitters)
    pub emission: Vec3,
}

impl Triangle {
    /// Create a triangle, deriving the face normal from the vertex winding
    /// (counter-clockwise as seen from the front side).
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3, albedo: Vec3, emission: Vec3) -> Self {
        let normal = (v1 - v0).cross(v2 - v0).normalize();
        Self {
            v0,
            v1,
            v2,
            normal,
            albedo,
            emission,
        }
    }

    /// Create a triangle with an explicit face normal.
    pub fn with_normal(
        v0: Vec3,
        v1: Vec3,
        v2: Vec3,
        normal: Vec3,
        albedo: Vec3,
        emission: Vec3,
    ) -> Self {
        Self {
            v0,
            v1,
            v2,
            normal: normal.normalize(),
            albedo,
            emission,
        }
    }

    /// True if this triangle emits light.
    pub fn is_emissive(&self) -> bool {
        self.emission.max_element() > 0.0
    }
}

/// One triangle record in the JSON scene asset format.
#[derive(Debug, Deserialize)]
struct TriangleRecord {
    v0: [f32; 3],
    v1: [f32; 3],
    v2: [f32; 3],
    albedo: [f32; 3],
    #[serde(default)]
    emission: [f32; 3],
}

impl From<&TriangleRecord> for Triangle {
    fn from(rec: &TriangleRecord) -> Self {
        Triangle::new(
            Vec3::from_array(rec.v0),
            Vec3::from_array(rec.v1),
            Vec3::from_array(rec.v2),
            Vec3::from_array(rec.albedo),
            Vec3::from_array(rec.emission),
        )
    }
}

/// An immutable, validated collection of triangles.
///
/// Safe for unsynchronized concurrent reads: all fields are fixed after
/// construction.
#[derive(Debug, Clone)]
pub struct Scene {
    triangles: Vec<Triangle>,
}

impl Scene {
    /// Build a scene from a triangle list, validating every triangle.
    ///
    /// Rejects degenerate (collinear) triangles, out-of-range albedo, and
    /// negative emission. Malformed geometry must never reach the
    /// intersection test.
    pub fn new(triangles: Vec<Triangle>) -> Result<Self, SceneError> {
        for (i, tri) in triangles.iter().enumerate() {
            let area2 = (tri.v1 - tri.v0).cross(tri.v2 - tri.v0).length();
            if !(area2 > DEGENERATE_AREA_EPSILON) {
                return Err(SceneError::DegenerateTriangle(i));
            }
            if tri.albedo.min_element() < 0.0 || tri.albedo.max_element() > 1.0 {
                return Err(SceneError::AlbedoOutOfRange(i));
            }
            if tri.emission.min_element() < 0.0 {
                return Err(SceneError::NegativeEmission(i));
            }
        }

        if triangles.is_empty() {
            log::warn!("scene has no triangles; every ray will miss");
        } else {
            log::info!(
                "scene built: {} triangles ({} emissive)",
                triangles.len(),
                triangles.iter().filter(|t| t.is_emissive()).count()
            );
        }

        Ok(Self { triangles })
    }

    /// Parse a scene from a JSON array of triangle records.
    ///
    /// Format: `[{"v0": [x,y,z], "v1": ..., "v2": ..., "albedo": [r,g,b],
    /// "emission": [r,g,b]}]` with `emission` optional.
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        let records: Vec<TriangleRecord> = serde_json::from_str(json)?;
        Self::new(records.iter().map(Triangle::from).collect())
    }

    /// Load a scene from a JSON file on disk.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SceneError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// All triangles, in insertion order.
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Number of triangles in the scene.
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    /// True if the scene contains no triangles.
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// The built-in Cornell-style box used by demos and integration tests.
    ///
    /// Axes follow the demo camera, which sits at y = 0.8 looking down -Y
    /// into the box with -Z as image-up: x spans the width, y the depth
    /// (interior in [-0.5592, 0]), z the height (floor at z = 0.5488,
    /// ceiling at z = 0). A white area light hangs just under the ceiling.
    pub fn cornell_box() -> Self {
        const W: f32 = 0.556;
        const D: f32 = 0.5592;
        const H: f32 = 0.5488;

        let white = Vec3::new(0.73, 0.73, 0.73);
        let red = Vec3::new(0.65, 0.05, 0.05);
        let green = Vec3::new(0.12, 0.45, 0.15);
        let no_emit = Vec3::ZERO;

        // 6 quads: floor, ceiling, back, left, right, light
        let mut triangles = Vec::with_capacity(12);

        // Floor (z = H), normal toward the interior (-Z)
        quad(
            &mut triangles,
            Vec3::new(0.0, -D, H),
            Vec3::new(W, -D, H),
            Vec3::new(W, 0.0, H),
            Vec3::new(0.0, 0.0, H),
            Vec3::NEG_Z,
            white,
            no_emit,
        );

        // Ceiling (z = 0), normal +Z
        quad(
            &mut triangles,
            Vec3::new(0.0, -D, 0.0),
            Vec3::new(W, -D, 0.0),
            Vec3::new(W, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::Z,
            white,
            no_emit,
        );

        // Back wall (y = -D), normal +Y
        quad(
            &mut triangles,
            Vec3::new(0.0, -D, 0.0),
            Vec3::new(W, -D, 0.0),
            Vec3::new(W, -D, H),
            Vec3::new(0.0, -D, H),
            Vec3::Y,
            white,
            no_emit,
        );

        // Left wall (x = 0), red, normal +X
        quad(
            &mut triangles,
            Vec3::new(0.0, -D, 0.0),
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, H),
            Vec3::new(0.0, -D, H),
            Vec3::X,
            red,
            no_emit,
        );

        // Right wall (x = W), green, normal -X
        quad(
            &mut triangles,
            Vec3::new(W, -D, 0.0),
            Vec3::new(W, 0.0, 0.0),
            Vec3::new(W, 0.0, H),
            Vec3::new(W, -D, H),
            Vec3::NEG_X,
            green,
            no_emit,
        );

        // Area light just below the ceiling
        quad(
            &mut triangles,
            Vec3::new(0.213, -0.332, 0.0005),
            Vec3::new(0.343, -0.332, 0.0005),
            Vec3::new(0.343, -0.227, 0.0005),
            Vec3::new(0.213, -0.227, 0.0005),
            Vec3::Z,
            Vec3::ZERO,
            Vec3::splat(15.0),
        );

        // Fixture data is well-formed by construction
        Self::new(triangles).expect("cornell box fixture must validate")
    }
}

/// Push the two triangles of the quad (a, b, c, d) with a shared normal.
fn quad(
    out: &mut Vec<Triangle>,
    a: Vec3,
    b: Vec3,
    c: Vec3,
    d: Vec3,
    normal: Vec3,
    albedo: Vec3,
    emission: Vec3,
) {
    out.push(Triangle::with_normal(a, b, c, normal, albedo, emission));
    out.push(Triangle::with_normal(a, c, d, normal, albedo, emission));
}
