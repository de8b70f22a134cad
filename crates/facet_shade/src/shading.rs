//! Per-vertex shading pipeline.
//!
//! Every corner of every triangle is shaded independently: an optional
//! shadow ray toward the light, then either a BRDF evaluation or the
//! ambient-occlusion placeholder. Output order is triangle order, three
//! entries per triangle.

use std::time::Duration;

use facet_core::{Camera, Mesh, PointLight};
use facet_math::Ray;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::brdf::{evaluate, BrdfParams};
use crate::bvh::BvhOccluder;
use crate::intersect::IntersectParams;
use crate::modes::{ColorMethod, ShadingModes, ShadowMethod};
use crate::occlusion::{BruteForceOccluder, NoOcclusion, Occluder};

/// Numeric parameters of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadeParams {
    pub brdf: BrdfParams,
    pub intersect: IntersectParams,
}

/// Shading result of one triangle corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VertexShade {
    pub intensity: f32,
    pub occluded: bool,
}

impl VertexShade {
    /// What an occluded vertex displays.
    pub const SHADOW: VertexShade = VertexShade {
        intensity: 0.0,
        occluded: true,
    };

    pub fn lit(intensity: f32) -> Self {
        Self {
            intensity,
            occluded: false,
        }
    }

    /// Grayscale color. Not clamped; HDR intensities pass through.
    pub fn rgb(&self) -> [f32; 3] {
        [self.intensity; 3]
    }
}

/// Vertex layout handed to a rasterizer.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ShadedVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 3],
}

/// Shades one frame of a mesh.
///
/// Holds read-only references only; one shader can be shared across the
/// rayon pool.
pub struct FrameShader<'a> {
    mesh: &'a Mesh,
    camera: Camera,
    light: PointLight,
    modes: ShadingModes,
    brdf: BrdfParams,
    occluder: Box<dyn Occluder + 'a>,
}

impl<'a> FrameShader<'a> {
    pub fn new(
        mesh: &'a Mesh,
        camera: Camera,
        light: PointLight,
        modes: ShadingModes,
        params: &ShadeParams,
    ) -> Self {
        let occluder: Box<dyn Occluder + 'a> = match modes.shadow {
            ShadowMethod::Off => Box::new(NoOcclusion),
            ShadowMethod::BruteForce => Box::new(BruteForceOccluder::new(mesh, params.intersect)),
            ShadowMethod::Bvh => Box::new(BvhOccluder::new(mesh, params.intersect)),
        };

        Self {
            mesh,
            camera,
            light,
            modes,
            brdf: params.brdf,
            occluder,
        }
    }

    /// Shade corner `corner` (0..3) of triangle `triangle`.
    pub fn shade_vertex(&self, triangle: usize, corner: usize) -> VertexShade {
        let index = self.mesh.triangle(triangle).indices[corner];
        let vertex = self.mesh.vertex(index);
        let p = vertex.position;

        let ray = Ray::towards(p, self.light.position);
        if self.occluder.occluded(&ray, triangle) {
            return VertexShade::SHADOW;
        }

        match self.modes.color {
            ColorMethod::Brdf => {
                let l = self.light.direction_from(p);
                let v = self.camera.view_dir(p);
                VertexShade::lit(evaluate(vertex.normal, l, v, self.modes.brdf, &self.brdf))
            }
            ColorMethod::AmbientOcclusion => VertexShade::lit(0.0),
        }
    }

    /// Shade every corner of every triangle on the calling thread.
    pub fn shade_frame(&self) -> Vec<VertexShade> {
        (0..self.mesh.triangle_count())
            .flat_map(|t| (0..3).map(move |c| self.shade_vertex(t, c)))
            .collect()
    }

    /// Same output as [`shade_frame`](Self::shade_frame), one rayon task per
    /// triangle.
    pub fn shade_frame_parallel(&self) -> Vec<VertexShade> {
        let mut shades = vec![VertexShade::default(); self.mesh.triangle_count() * 3];
        shades
            .par_chunks_mut(3)
            .enumerate()
            .for_each(|(t, corners)| {
                for (c, slot) in corners.iter_mut().enumerate() {
                    *slot = self.shade_vertex(t, c);
                }
            });
        shades
    }

    pub fn shade(&self, parallel: bool) -> Vec<VertexShade> {
        if parallel {
            self.shade_frame_parallel()
        } else {
            self.shade_frame()
        }
    }

    /// Pair each shade with its corner's position and normal.
    pub fn shaded_vertices(&self, shades: &[VertexShade]) -> Vec<ShadedVertex> {
        self.mesh
            .triangles()
            .flat_map(|t| t.indices)
            .zip(shades)
            .map(|(index, shade)| {
                let vertex = self.mesh.vertex(index);
                ShadedVertex {
                    position: vertex.position.to_array(),
                    normal: vertex.normal.to_array(),
                    color: shade.rgb(),
                }
            })
            .collect()
    }
}

/// Summary of one shaded frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameStats {
    pub vertices: usize,
    pub occluded: usize,
    pub min_intensity: f32,
    pub max_intensity: f32,
    pub mean_intensity: f32,
    pub elapsed_ms: f64,
}

impl FrameStats {
    pub fn from_shades(shades: &[VertexShade], elapsed: Duration) -> Self {
        let vertices = shades.len();
        let occluded = shades.iter().filter(|s| s.occluded).count();

        let (min, max, sum) = shades.iter().fold(
            (f32::INFINITY, f32::NEG_INFINITY, 0.0f64),
            |(min, max, sum), s| (min.min(s.intensity), max.max(s.intensity), sum + s.intensity as f64),
        );

        let (min_intensity, max_intensity, mean_intensity) = if vertices == 0 {
            (0.0, 0.0, 0.0)
        } else {
            (min, max, (sum / vertices as f64) as f32)
        };

        Self {
            vertices,
            occluded,
            min_intensity,
            max_intensity,
            mean_intensity,
            elapsed_ms: elapsed.as_secs_f64() * 1000.0,
        }
    }
}

impl std::fmt::Display for FrameStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} vertices, {} in shadow, intensity {:.4}..{:.4} (mean {:.4}) in {:.2}ms",
            self.vertices,
            self.occluded,
            self.min_intensity,
            self.max_intensity,
            self.mean_intensity,
            self.elapsed_ms
        )
    }
}
