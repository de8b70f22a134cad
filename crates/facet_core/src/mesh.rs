//! Indexed triangle mesh.
//!
//! The mesh is the geometry collaborator of the shading core: it answers
//! "how many triangles", "which vertices does triangle i use" and "where is
//! vertex j and what is its normal". Winding is counter-clockwise, so the
//! outward face normal of `[v0, v1, v2]` is `(v1 - v0) x (v2 - v0)`.

use facet_math::{Aabb, Vec3};
use thiserror::Error;

/// Errors for meshes whose topology cannot be shaded.
#[derive(Error, Debug, PartialEq)]
pub enum MeshError {
    #[error("Index count {0} is not a multiple of 3")]
    RaggedIndices(usize),

    #[error("Triangle {triangle} references vertex {index}, but the mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        triangle: usize,
        index: u32,
        vertex_count: usize,
    },
}

/// Result type for mesh construction.
pub type MeshResult<T> = Result<T, MeshError>;

/// A vertex as seen by the shading core: position and (unit) normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
}

/// Three vertex indices into the owning mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Triangle {
    pub indices: [u32; 3],
}

impl Triangle {
    pub fn new(a: u32, b: u32, c: u32) -> Self {
        Self { indices: [a, b, c] }
    }
}

/// A mesh of vertex positions, per-vertex normals and triangle indices.
#[derive(Clone, Debug)]
pub struct Mesh {
    /// Vertex positions (one Vec3 per vertex)
    positions: Vec<Vec3>,

    /// Vertex normals, always one per position
    normals: Vec<Vec3>,

    /// Triangle indices (every 3 indices form a triangle)
    indices: Vec<u32>,

    /// Axis-aligned bounding box
    pub bounds: Aabb,
}

impl Mesh {
    /// Create a mesh from positions and indices, optionally with normals.
    ///
    /// Every index is validated against the vertex count. Missing normals, or
    /// a normal array whose length does not match the positions, are replaced
    /// by smooth normals computed from the faces.
    pub fn new(positions: Vec<Vec3>, indices: Vec<u32>, normals: Option<Vec<Vec3>>) -> MeshResult<Self> {
        if indices.len() % 3 != 0 {
            return Err(MeshError::RaggedIndices(indices.len()));
        }

        let vertex_count = positions.len();
        for (i, &index) in indices.iter().enumerate() {
            if index as usize >= vertex_count {
                return Err(MeshError::IndexOutOfRange {
                    triangle: i / 3,
                    index,
                    vertex_count,
                });
            }
        }

        let normals = match normals {
            Some(normals) if normals.len() == vertex_count => normals,
            Some(normals) => {
                log::warn!(
                    "Normals array length ({}) doesn't match vertex count ({}), computing smooth normals",
                    normals.len(),
                    vertex_count
                );
                compute_normals(&positions, &indices)
            }
            None => compute_normals(&positions, &indices),
        };

        let bounds = Aabb::enclosing(&positions);

        Ok(Self {
            positions,
            normals,
            indices,
            bounds,
        })
    }

    /// Get the number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Get the number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// The three vertex indices of triangle `i`.
    ///
    /// Panics if `i >= triangle_count()`.
    pub fn triangle(&self, i: usize) -> Triangle {
        let face = &self.indices[i * 3..i * 3 + 3];
        Triangle::new(face[0], face[1], face[2])
    }

    /// Iterate over all triangles in index order.
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.indices
            .chunks_exact(3)
            .map(|face| Triangle::new(face[0], face[1], face[2]))
    }

    /// Position and normal of vertex `j`.
    pub fn vertex(&self, j: u32) -> Vertex {
        Vertex {
            position: self.positions[j as usize],
            normal: self.normals[j as usize],
        }
    }

    /// Corner positions of triangle `i`.
    pub fn triangle_positions(&self, i: usize) -> [Vec3; 3] {
        let [a, b, c] = self.triangle(i).indices;
        [
            self.positions[a as usize],
            self.positions[b as usize],
            self.positions[c as usize],
        ]
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    /// Get the mesh center (center of bounding box).
    pub fn center(&self) -> Vec3 {
        self.bounds.centroid()
    }

    /// Get the mesh size (diagonal length of bounding box).
    pub fn size(&self) -> f32 {
        self.bounds.diagonal()
    }
}

/// Compute smooth vertex normals by averaging area-weighted face normals.
///
/// Vertices that belong to no face, or only to degenerate faces, get `+Y`.
fn compute_normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; positions.len()];

    for face in indices.chunks_exact(3) {
        let i0 = face[0] as usize;
        let i1 = face[1] as usize;
        let i2 = face[2] as usize;

        let edge1 = positions[i1] - positions[i0];
        let edge2 = positions[i2] - positions[i0];
        let face_normal = edge1.cross(edge2);

        normals[i0] += face_normal;
        normals[i1] += face_normal;
        normals[i2] += face_normal;
    }

    for normal in &mut normals {
        *normal = normal.try_normalize().unwrap_or(Vec3::Y);
    }

    normals
}
