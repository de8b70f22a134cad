mod report;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use facet_core::{load_mesh, Camera, Mesh, PointLight};
use facet_math::Vec3;
use facet_shade::{
    Command, FrameSettings, FrameShader, FrameStats, ShadeParams, ShadedVertex, ShadingModes,
};

use report::FrameReport;

/// Shade a mesh per vertex with a selectable BRDF and ray-cast shadows.
#[derive(Parser, Debug)]
#[command(name = "facet")]
#[command(version, about, long_about = None)]
struct Args {
    /// Mesh to shade (.off or .obj)
    mesh: PathBuf,

    /// JSON frame settings
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Commands applied between frames: s = shadows, b = BRDF, c = color.
    /// One extra frame is shaded after each command.
    #[arg(short, long, default_value = "")]
    keys: String,

    /// Light position, "x,y,z"
    #[arg(long, value_parser = parse_vec3)]
    light: Option<Vec3>,

    /// Eye position, "x,y,z" (default: frame the mesh)
    #[arg(long, value_parser = parse_vec3)]
    eye: Option<Vec3>,

    /// Shade triangles in parallel
    #[arg(short, long)]
    parallel: bool,

    /// Write a JSON report of every frame
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write the last frame's vertex buffer (position, normal, color as f32)
    #[arg(long)]
    buffer: Option<PathBuf>,
}

fn parse_vec3(s: &str) -> Result<Vec3, String> {
    let parts = s
        .split(',')
        .map(|p| p.trim().parse::<f32>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("invalid component: {}", e))?;

    match parts.as_slice() {
        [x, y, z] => Ok(Vec3::new(*x, *y, *z)),
        _ => Err(format!("expected 3 components, got {}", parts.len())),
    }
}

/// Mesh, camera and light shared by every frame.
struct Scene {
    mesh: Mesh,
    camera: Camera,
    light: PointLight,
    params: ShadeParams,
    parallel: bool,
}

impl Scene {
    fn shade(&self, modes: ShadingModes) -> (Vec<ShadedVertex>, FrameStats) {
        let start = Instant::now();

        let shader = FrameShader::new(&self.mesh, self.camera, self.light, modes, &self.params);
        let shades = shader.shade(self.parallel);
        let stats = FrameStats::from_shades(&shades, start.elapsed());

        (shader.shaded_vertices(&shades), stats)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Starting facet");

    let mut settings = match &args.settings {
        Some(path) => FrameSettings::load(path)
            .with_context(|| format!("Failed to load settings from {:?}", path))?,
        None => FrameSettings::default(),
    };
    if let Some(light) = args.light {
        settings.light = light;
    }
    if let Some(eye) = args.eye {
        settings.eye = Some(eye);
    }
    settings.parallel |= args.parallel;

    let mesh = load_mesh(&args.mesh)
        .with_context(|| format!("Failed to load mesh from {:?}", args.mesh))?;

    let camera = match settings.eye {
        Some(eye) => Camera::new(eye, mesh.center()),
        None => Camera::framing(&mesh.bounds),
    };
    log::info!(
        "Eye at {:?} looking at {:?}, light at {:?}, {} shading",
        camera.eye(),
        camera.target,
        settings.light,
        if settings.parallel { "parallel" } else { "sequential" }
    );

    let light = PointLight::new(settings.light);
    let mut report = FrameReport::new(&args.mesh, &mesh, light, camera.eye());
    let scene = Scene {
        mesh,
        camera,
        light,
        params: settings.shade_params(),
        parallel: settings.parallel,
    };

    let mut modes = settings.modes();
    let (mut vertices, stats) = scene.shade(modes);
    log::info!("Frame 0 [{}]: {}", modes, stats);
    report.push(modes, stats);

    for command in args.keys.chars().filter_map(Command::from_key) {
        modes.apply(command);

        let (frame_vertices, stats) = scene.shade(modes);
        log::info!("Frame {} [{}]: {}", report.frames.len(), modes, stats);
        report.push(modes, stats);
        vertices = frame_vertices;
    }

    if let Some(path) = &args.output {
        report.write(path)?;
    }

    if let Some(path) = &args.buffer {
        let bytes: &[u8] = bytemuck::cast_slice(&vertices);
        std::fs::write(path, bytes)
            .with_context(|| format!("Failed to write vertex buffer to {:?}", path))?;
        log::info!("Wrote {} vertices ({} bytes) to {:?}", vertices.len(), bytes.len(), path);
    }

    Ok(())
}
