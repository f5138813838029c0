//! Wavefront OBJ loading.
//!
//! Only geometry is read: vertex positions and faces. Faces are triangulated
//! and the 1-based OBJ indices come out 0-based. Every model in the file is
//! merged into a single [`Mesh`]; materials (`mtllib`) are ignored.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use glint_math::Vec3;

use crate::{Mesh, MeshError, MeshResult};

fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        single_index: true,
        triangulate: true,
        ..Default::default()
    }
}

/// Load an OBJ file from disk into a single mesh.
pub fn load_obj<P: AsRef<Path>>(path: P) -> MeshResult<Mesh> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let mesh = load_obj_from_reader(&mut BufReader::new(file))?;

    log::info!(
        "Loaded {}: {} vertices, {} triangles",
        path.display(),
        mesh.vertex_count(),
        mesh.triangle_count()
    );

    Ok(mesh)
}

/// Load OBJ text from any buffered reader.
pub fn load_obj_from_reader<R: BufRead>(reader: &mut R) -> MeshResult<Mesh> {
    let (models, _materials) =
        tobj::load_obj_buf(reader, &load_options(), |_| Err(tobj::LoadError::OpenFileFailed))?;

    let mut positions = Vec::new();
    let mut indices = Vec::new();

    for model in &models {
        let mesh = &model.mesh;
        if mesh.indices.is_empty() {
            log::warn!("Skipping model '{}' without faces", model.name);
            continue;
        }

        let base = positions.len() as u32;
        positions.extend(
            mesh.positions
                .chunks_exact(3)
                .map(|p| Vec3::new(p[0], p[1], p[2])),
        );
        indices.extend(mesh.indices.iter().map(|&i| base + i));
    }

    if indices.is_empty() {
        return Err(MeshError::NoGeometry);
    }

    Mesh::new(positions, indices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const TETRAHEDRON: &str = "\
# tetrahedron
v 0 0 0
v 1 0 0
v 0 1 0
v 0 0 1
f 1 3 2
f 1 2 4
f 1 4 3
f 2 3 4
";

    #[test]
    fn test_one_based_indices_become_zero_based() {
        let mesh = load_obj_from_reader(&mut Cursor::new(TETRAHEDRON)).unwrap();

        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 4);
        assert!(mesh.indices().iter().all(|&i| i < 4));
        assert_eq!(mesh.triangle(0), [Vec3::ZERO, Vec3::Y, Vec3::X]);
    }

    #[test]
    fn test_quads_are_triangulated() {
        let quad = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n";
        let mesh = load_obj_from_reader(&mut Cursor::new(quad)).unwrap();
        assert_eq!(mesh.triangle_count(), 2);
    }

    #[test]
    fn test_no_faces_is_an_error() {
        let err = load_obj_from_reader(&mut Cursor::new("v 0 0 0\nv 1 0 0\n")).unwrap_err();
        assert!(matches!(err, MeshError::NoGeometry));
    }

    #[test]
    fn test_missing_file() {
        let err = load_obj("this/file/does/not/exist.obj").unwrap_err();
        assert!(matches!(err, MeshError::Io(_)));
    }

    #[test]
    fn test_load_from_disk() {
        let path = std::env::temp_dir().join("glint_core_tetrahedron.obj");
        std::fs::write(&path, TETRAHEDRON).unwrap();

        let mesh = load_obj(&path).unwrap();
        assert_eq!(mesh.triangle_count(), 4);

        let _ = std::fs::remove_file(&path);
    }
}
