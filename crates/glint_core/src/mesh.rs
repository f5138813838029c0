//! Triangle mesh data as produced by scene loading.
//!
//! This is the hand-off format between loaders (OBJ, procedural builders)
//! and the renderer: positions, 0-based triangle indices and one
//! precomputed unit face normal per triangle.

use glint_math::{Aabb, Vec3};

use crate::{MeshError, MeshResult};

/// An indexed triangle mesh with per-face normals.
///
/// Invariants upheld by [`Mesh::new`]: every index is a valid offset into
/// `positions`, `indices.len()` is a multiple of three, and every triangle
/// has a finite unit normal (zero-area triangles are dropped). The fields are
/// read-only after construction so the invariants cannot be broken later.
#[derive(Clone, Debug)]
pub struct Mesh {
    /// Vertex positions
    positions: Vec<Vec3>,

    /// Triangle indices (every 3 indices form a triangle)
    indices: Vec<u32>,

    /// One face normal per triangle, `normals[i]` belongs to `indices[3i..3i+3]`
    normals: Vec<Vec3>,

    /// Axis-aligned bounding box of the positions
    bounds: Aabb,
}

impl Mesh {
    /// Create a mesh from positions and 0-based indices.
    ///
    /// Fails if the index count is not a multiple of three or an index is out
    /// of range. Degenerate triangles would produce NaN normals downstream,
    /// so they are removed here and reported with a warning.
    pub fn new(positions: Vec<Vec3>, indices: Vec<u32>) -> MeshResult<Self> {
        if indices.len() % 3 != 0 {
            return Err(MeshError::IncompleteTriangle(indices.len()));
        }

        let vertex_count = positions.len();
        if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(MeshError::IndexOutOfRange {
                index,
                vertex_count,
            });
        }

        let mut kept = Vec::with_capacity(indices.len());
        let mut normals = Vec::with_capacity(indices.len() / 3);
        let mut degenerate = 0usize;

        for face in indices.chunks_exact(3) {
            let p0 = positions[face[0] as usize];
            let p1 = positions[face[1] as usize];
            let p2 = positions[face[2] as usize];

            match face_normal(p0, p1, p2) {
                Some(normal) => {
                    kept.extend_from_slice(face);
                    normals.push(normal);
                }
                None => degenerate += 1,
            }
        }

        if degenerate > 0 {
            log::warn!(
                "Dropped {} degenerate triangle(s) out of {}",
                degenerate,
                indices.len() / 3
            );
        }

        let bounds = Aabb::from_point_cloud(positions.iter());

        Ok(Self {
            positions,
            indices: kept,
            normals,
            bounds,
        })
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Triangle indices, three per triangle.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Unit face normals, one per triangle.
    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    /// Get the number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Get the number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Get the mesh center (center of bounding box).
    pub fn center(&self) -> Vec3 {
        self.bounds.centroid()
    }

    /// The three corner positions of triangle `index`, in winding order.
    pub fn triangle(&self, index: usize) -> [Vec3; 3] {
        let face = &self.indices[index * 3..index * 3 + 3];
        [
            self.positions[face[0] as usize],
            self.positions[face[1] as usize],
            self.positions[face[2] as usize],
        ]
    }
}

/// Normalized `(p1 - p0) x (p2 - p0)`, or `None` for a zero-area triangle.
///
/// The winding `p0 -> p1 -> p2` defines the front face.
pub fn face_normal(p0: Vec3, p1: Vec3, p2: Vec3) -> Option<Vec3> {
    (p1 - p0).cross(p2 - p0).try_normalize()
}
