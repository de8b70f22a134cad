//! Ray/triangle intersection for shadow rays.
//!
//! A Möller-Trumbore style solve (Cramer's rule on the edge vectors), with two
//! extra rejections that make it an occlusion test rather than a general hit
//! test:
//!
//! - triangles whose outward normal faces along the ray are ignored, so a
//!   surface never shadows the side of itself that faces the light;
//! - `|a| < epsilon` rejects near-parallel rays and degenerate triangles.
//!
//! Any `t >= 0` counts. The distance to the light is not checked, so geometry
//! behind the light still occludes.

use facet_math::{Interval, Ray, Vec3};
use serde::{Deserialize, Serialize};

/// Tunable thresholds for [`hit_distance`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntersectParams {
    /// Minimum `|a|` (the determinant of the edge system). 0.1 reproduces the
    /// reference shading; typical geometric epsilons are 1e-6..1e-4.
    pub epsilon: f32,
}

impl Default for IntersectParams {
    fn default() -> Self {
        Self { epsilon: 0.1 }
    }
}

/// Does `ray` hit the front face of triangle `(v0, v1, v2)` at some `t >= 0`?
pub fn intersect(ray: &Ray, v0: Vec3, v1: Vec3, v2: Vec3) -> bool {
    hit_distance(ray, v0, v1, v2, &IntersectParams::default()).is_some()
}

/// Ray parameter of the hit, or `None`.
pub fn hit_distance(ray: &Ray, v0: Vec3, v1: Vec3, v2: Vec3, params: &IntersectParams) -> Option<f32> {
    let direction = ray.direction();

    let e0 = v1 - v0;
    let e1 = v2 - v0;

    let q = direction.cross(e1);
    let a = e0.dot(q);

    // NaN (zero-area normal) rejects as well
    let facing = e0.cross(e1).normalize().dot(direction);
    if facing.is_nan() || facing >= 0.0 || a.abs() < params.epsilon {
        return None;
    }

    let s = (ray.origin() - v0) / a;
    let r = s.cross(e0);

    let b0 = s.dot(q);
    let b1 = r.dot(direction);
    let b2 = 1.0 - b0 - b1;

    if b0 < 0.0 || b1 < 0.0 || b2 < 0.0 {
        return None;
    }

    let t = e1.dot(r);
    if !Interval::FORWARD.contains(t) {
        return None;
    }

    Some(t)
}
