//! Frame settings file.
//!
//! A JSON document; every field is optional and falls back to its default:
//!
//! ```json
//! {
//!   "light": [0.0, 10.0, 10.0],
//!   "eye": [0.0, 0.0, 5.0],
//!   "modes": { "shadow": "bvh", "brdf": "cook-torrance", "color": "brdf" },
//!   "brdf": { "kd": 0.7, "ggx": { "alpha": 0.2, "f0": 0.92 } },
//!   "intersect": { "epsilon": 0.1 },
//!   "parallel": true
//! }
//! ```

use std::path::Path;

use facet_math::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::brdf::{BrdfModel, BrdfParams};
use crate::intersect::IntersectParams;
use crate::modes::{ColorMethod, Selector, ShadingModes, ShadowMethod};
use crate::shading::ShadeParams;

/// Errors that can occur while loading settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid settings: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for settings loading.
pub type SettingsResult<T> = Result<T, SettingsError>;

/// Mode selections by name, as written in a settings file.
///
/// Names are resolved leniently; see [`Selector::from_name`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModeNames {
    pub shadow: String,
    pub brdf: String,
    pub color: String,
}

impl Default for ModeNames {
    fn default() -> Self {
        Self::from(ShadingModes::default())
    }
}

impl From<ShadingModes> for ModeNames {
    fn from(modes: ShadingModes) -> Self {
        Self {
            shadow: modes.shadow.name().to_string(),
            brdf: modes.brdf.name().to_string(),
            color: modes.color.name().to_string(),
        }
    }
}

impl ModeNames {
    pub fn resolve(&self) -> ShadingModes {
        ShadingModes::new(
            ShadowMethod::from_name(&self.shadow),
            BrdfModel::from_name(&self.brdf),
            ColorMethod::from_name(&self.color),
        )
    }
}

/// Everything a frame needs besides the mesh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameSettings {
    /// Point light position
    pub light: Vec3,
    /// Eye position; `None` frames the mesh bounds
    pub eye: Option<Vec3>,
    pub modes: ModeNames,
    pub brdf: BrdfParams,
    pub intersect: IntersectParams,
    /// Shade triangles on the rayon pool
    pub parallel: bool,
}

impl Default for FrameSettings {
    fn default() -> Self {
        Self {
            light: Vec3::new(0.0, 10.0, 10.0),
            eye: None,
            modes: ModeNames::default(),
            brdf: BrdfParams::default(),
            intersect: IntersectParams::default(),
            parallel: false,
        }
    }
}

impl FrameSettings {
    /// Read settings from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> SettingsResult<Self> {
        let path = path.as_ref();
        log::info!("Loading settings from: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> SettingsResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Initial shading modes.
    pub fn modes(&self) -> ShadingModes {
        self.modes.resolve()
    }

    pub fn shade_params(&self) -> ShadeParams {
        ShadeParams {
            brdf: self.brdf,
            intersect: self.intersect,
        }
    }
}
