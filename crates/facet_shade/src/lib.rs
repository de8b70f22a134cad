//! facet shading core.
//!
//! Shades every corner of every triangle of a mesh with one of three
//! analytic BRDFs (Blinn-Phong, Cook-Torrance, GGX) and optionally casts a
//! ray from each vertex to the point light to decide whether it is in shadow.
//!
//! The pieces, leaves first:
//! - [`intersect`]: closed-form ray/triangle test with back-face rejection
//! - [`brdf`]: the reflectance models and their parameters
//! - [`occlusion`] / [`bvh`]: shadow queries against the mesh itself
//! - [`modes`]: the three cyclic mode selectors
//! - [`shading`]: the per-vertex pipeline that wires it all together

pub mod brdf;
pub mod bvh;
pub mod intersect;
pub mod modes;
pub mod occlusion;
pub mod settings;
pub mod shading;

pub use brdf::{evaluate, BlinnPhong, BrdfModel, BrdfParams, CookTorrance, Ggx, Microfacet, Specular};
pub use bvh::BvhOccluder;
pub use intersect::{hit_distance, intersect, IntersectParams};
pub use modes::{ColorMethod, Command, Selector, ShadingModes, ShadowMethod};
pub use occlusion::{BruteForceOccluder, NoOcclusion, Occluder};
pub use settings::{FrameSettings, ModeNames, SettingsError, SettingsResult};
pub use shading::{FrameShader, FrameStats, ShadeParams, ShadedVertex, VertexShade};

/// Re-export Vec3 and common math types from facet_math
pub use facet_math::{Ray, Vec3};
