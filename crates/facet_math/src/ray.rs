use crate::Vec3;

/// A half-line with an origin and a unit-length direction.
///
/// The direction is normalized on construction and cannot be changed
/// afterwards, so every ray handed to the intersector satisfies the
/// unit-length precondition.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    origin: Vec3,
    direction: Vec3,
}

impl Ray {
    /// Create a new ray; `direction` is normalized.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Create a ray starting at `origin` and pointing at `target`.
    ///
    /// This is how shadow rays are built: from a surface point toward the light.
    pub fn towards(origin: Vec3, target: Vec3) -> Self {
        Self::new(origin, target - origin)
    }

    /// Get the origin point of the ray.
    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Get the (unit) direction vector of the ray.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }
}
