//! Camera and light collaborators.
//!
//! The shading core only needs an eye position and a single point light;
//! interactive camera controls live outside this workspace.

use facet_math::{Aabb, Vec3};

/// Viewer eye.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
}

impl Camera {
    /// Create a new camera
    pub fn new(position: Vec3, target: Vec3) -> Self {
        Self { position, target }
    }

    /// Place the camera on +Z in front of `bounds`, looking at its center.
    ///
    /// The eye sits 1.5 bounding-box diagonals away so the whole mesh fits a
    /// typical 45 degree field of view.
    pub fn framing(bounds: &Aabb) -> Self {
        let center = bounds.centroid();
        let distance = (bounds.diagonal() * 1.5).max(1.0);
        Self::new(center + Vec3::Z * distance, center)
    }

    /// Current eye position.
    pub fn eye(&self) -> Vec3 {
        self.position
    }

    /// Unit vector from `point` toward the eye.
    pub fn view_dir(&self, point: Vec3) -> Vec3 {
        (self.position - point).normalize()
    }
}

/// The single point light of a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
}

impl PointLight {
    pub fn new(position: Vec3) -> Self {
        Self { position }
    }

    /// Unit vector from `point` toward the light.
    pub fn direction_from(&self, point: Vec3) -> Vec3 {
        (self.position - point).normalize()
    }

    /// Distance from `point` to the light.
    pub fn distance_from(&self, point: Vec3) -> f32 {
        (self.position - point).length()
    }
}
