//! JSON frame report.

use std::path::Path;

use anyhow::{Context, Result};
use facet_core::{Mesh, PointLight};
use facet_math::Vec3;
use facet_shade::{FrameStats, ModeNames, ShadingModes};
use serde::Serialize;

/// One shaded frame.
#[derive(Debug, Clone, Serialize)]
pub struct FrameRecord {
    pub frame: usize,
    pub modes: ModeNames,
    pub stats: FrameStats,
}

/// Everything the driver shaded, in frame order.
#[derive(Debug, Clone, Serialize)]
pub struct FrameReport {
    pub mesh: String,
    pub triangles: usize,
    pub light: [f32; 3],
    /// Light distance from the mesh center
    pub light_distance: f32,
    pub eye: [f32; 3],
    pub frames: Vec<FrameRecord>,
}

impl FrameReport {
    pub fn new(path: &Path, mesh: &Mesh, light: PointLight, eye: Vec3) -> Self {
        Self {
            mesh: path.display().to_string(),
            triangles: mesh.triangle_count(),
            light: light.position.to_array(),
            light_distance: light.distance_from(mesh.center()),
            eye: eye.to_array(),
            frames: Vec::new(),
        }
    }

    pub fn push(&mut self, modes: ShadingModes, stats: FrameStats) {
        self.frames.push(FrameRecord {
            frame: self.frames.len(),
            modes: ModeNames::from(modes),
            stats,
        });
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize frame report")
    }

    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json()?)
            .with_context(|| format!("Failed to write report to {:?}", path))?;
        log::info!("Wrote report for {} frame(s) to {:?}", self.frames.len(), path);
        Ok(())
    }
}
