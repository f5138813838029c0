//! Glint Core - geometry loading for the Glint ray tracer.
//!
//! This crate provides:
//!
//! - **Mesh data**: `Mesh` with validated 0-based indices and face normals
//! - **OBJ support**: `load_obj` for Wavefront OBJ files
//!
//! # Example
//!
//! ```ignore
//! use glint_core::load_obj;
//!
//! let mesh = load_obj("assets/bunny.obj")?;
//! println!("Loaded {} triangles", mesh.triangle_count());
//! ```

pub mod mesh;
pub mod obj;

use thiserror::Error;

// Re-export commonly used types
pub use mesh::{face_normal, Mesh};
pub use obj::{load_obj, load_obj_from_reader};

/// Errors that can occur while building or loading a mesh.
#[derive(Error, Debug)]
pub enum MeshError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("OBJ parse error: {0}")]
    Obj(#[from] tobj::LoadError),

    #[error("Index count {0} is not a multiple of 3")]
    IncompleteTriangle(usize),

    #[error("Index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },

    #[error("No geometry found in OBJ file")]
    NoGeometry,
}

pub type MeshResult<T> = Result<T, MeshError>;
