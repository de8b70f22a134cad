//! facet core - the mesh, camera and light the shading core consumes.
//!
//! This crate provides:
//!
//! - **Geometry**: `Mesh`, `Triangle`, `Vertex`
//! - **Scene collaborators**: `Camera` (eye position) and `PointLight`
//! - **Loading**: OFF files (parsed here) and OBJ files (through `tobj`)
//!
//! # Example
//!
//! ```ignore
//! use facet_core::{load_mesh, Camera};
//!
//! let mesh = load_mesh("models/man.off")?;
//! let camera = Camera::framing(&mesh.bounds);
//! println!("{} triangles, eye at {:?}", mesh.triangle_count(), camera.eye());
//! ```

pub mod loader;
pub mod mesh;
pub mod off;
pub mod scene;

// Re-export commonly used types
pub use loader::{load_mesh, LoadError, LoadResult};
pub use mesh::{Mesh, MeshError, MeshResult, Triangle, Vertex};
pub use off::{load_off, parse_off, OffError, OffResult};
pub use scene::{Camera, PointLight};
