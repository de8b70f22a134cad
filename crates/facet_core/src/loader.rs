//! Mesh loading by file extension.
//!
//! - `.off` - parsed by [`crate::off`]
//! - `.obj` - loaded through `tobj`, triangulated with a single index buffer

use std::path::Path;

use facet_math::Vec3;
use thiserror::Error;

use crate::mesh::{Mesh, MeshError};
use crate::off::{load_off, OffError};

/// Errors that can occur during mesh loading.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("OFF error: {0}")]
    Off(#[from] OffError),

    #[error("OBJ error: {0}")]
    Obj(#[from] tobj::LoadError),

    #[error("Invalid mesh: {0}")]
    Mesh(#[from] MeshError),

    #[error("No geometry found in {0}")]
    NoGeometry(String),

    #[error("Unsupported mesh format: {0}")]
    UnsupportedFormat(String),
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Load a mesh, picking the reader from the file extension.
pub fn load_mesh<P: AsRef<Path>>(path: P) -> LoadResult<Mesh> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    log::info!("Loading mesh from: {:?}", path);

    let mesh = match extension.as_str() {
        "off" => load_off(path)?,
        "obj" => load_obj(path)?,
        _ => return Err(LoadError::UnsupportedFormat(path.display().to_string())),
    };

    log::info!(
        "Loaded {} vertices, {} triangles",
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    log::info!("Mesh center: {:?}, size: {:.2}", mesh.center(), mesh.size());

    Ok(mesh)
}

/// Load the first model of an OBJ file.
fn load_obj(path: &Path) -> LoadResult<Mesh> {
    let (models, _materials) = tobj::load_obj(
        path,
        &tobj::LoadOptions {
            single_index: true,
            triangulate: true,
            ..Default::default()
        },
    )?;

    let model = models
        .first()
        .ok_or_else(|| LoadError::NoGeometry(path.display().to_string()))?;
    if models.len() > 1 {
        log::warn!(
            "OBJ file has {} models, only '{}' is shaded",
            models.len(),
            model.name
        );
    }

    let mesh = &model.mesh;
    let positions: Vec<Vec3> = mesh.positions.chunks_exact(3).map(Vec3::from_slice).collect();

    let normals = if mesh.normals.is_empty() {
        log::info!("Mesh has no normals, computing smooth normals");
        None
    } else {
        Some(
            mesh.normals
                .chunks_exact(3)
                .map(|n| Vec3::from_slice(n).try_normalize().unwrap_or(Vec3::Y))
                .collect(),
        )
    };

    Ok(Mesh::new(positions, mesh.indices.clone(), normals)?)
}
