//! Shadow queries against the mesh being shaded.

use crate::intersect::{hit_distance, IntersectParams};
use facet_core::Mesh;
use facet_math::Ray;

/// Answers "is anything between this vertex and the light?".
///
/// `skip_triangle` is the triangle the ray starts on. It is never tested: a
/// ray leaving one of its own corners hits it at `t = 0`, which would put
/// every vertex facing away from the light in shadow.
pub trait Occluder: Send + Sync {
    fn occluded(&self, ray: &Ray, skip_triangle: usize) -> bool;
}

/// Shadows disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOcclusion;

impl Occluder for NoOcclusion {
    fn occluded(&self, _ray: &Ray, _skip_triangle: usize) -> bool {
        false
    }
}

/// Tests every triangle of the mesh, stopping at the first hit.
pub struct BruteForceOccluder<'a> {
    mesh: &'a Mesh,
    params: IntersectParams,
}

impl<'a> BruteForceOccluder<'a> {
    pub fn new(mesh: &'a Mesh, params: IntersectParams) -> Self {
        Self { mesh, params }
    }
}

impl Occluder for BruteForceOccluder<'_> {
    fn occluded(&self, ray: &Ray, skip_triangle: usize) -> bool {
        (0..self.mesh.triangle_count())
            .filter(|&i| i != skip_triangle)
            .any(|i| {
                let [v0, v1, v2] = self.mesh.triangle_positions(i);
                hit_distance(ray, v0, v1, v2, &self.params).is_some()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facet_math::Vec3;

    /// A floor facing up with a smaller ceiling above it facing down.
    fn floor_and_ceiling() -> Mesh {
        let positions = vec![
            Vec3::new(-2.0, 0.0, -2.0),
            Vec3::new(0.0, 0.0, 2.0),
            Vec3::new(2.0, 0.0, -2.0),
            Vec3::new(-1.0, 1.0, -1.0),
            Vec3::new(1.0, 1.0, -1.0),
            Vec3::new(0.0, 1.0, 1.0),
        ];
        Mesh::new(positions, vec![0, 1, 2, 3, 4, 5], None).unwrap()
    }

    #[test]
    fn test_no_occlusion() {
        let ray = Ray::new(Vec3::ZERO, Vec3::Y);
        assert!(!NoOcclusion.occluded(&ray, 0));
    }

    #[test]
    fn test_brute_force_blocked_by_other_triangle() {
        let mesh = floor_and_ceiling();
        let occluder = BruteForceOccluder::new(&mesh, IntersectParams::default());

        let ray = Ray::towards(Vec3::ZERO, Vec3::new(0.0, 10.0, 0.0));
        assert!(occluder.occluded(&ray, 0));
    }

    #[test]
    fn test_brute_force_skips_own_triangle() {
        let mesh = floor_and_ceiling();
        let occluder = BruteForceOccluder::new(&mesh, IntersectParams::default());

        // Leaves a ceiling corner upward; the ceiling itself faces down and
        // would report t = 0 if it were tested.
        let corner = mesh.triangle_positions(1)[0];
        let ray = Ray::towards(corner, corner + Vec3::new(0.0, 10.0, 0.0));
        assert!(!occluder.occluded(&ray, 1));
    }

    #[test]
    fn test_brute_force_clear_path() {
        let mesh = floor_and_ceiling();
        let occluder = BruteForceOccluder::new(&mesh, IntersectParams::default());

        let ray = Ray::towards(Vec3::new(5.0, 0.0, 5.0), Vec3::new(5.0, 10.0, 5.0));
        assert!(!occluder.occluded(&ray, usize::MAX));
    }
}
