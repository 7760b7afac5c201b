//! Wavefront OBJ import.
//!
//! Produces the same [`MeshData`] shape as the procedural generators, so the
//! renderer never knows where a mesh came from.  All models in the file are
//! merged into one mesh.

use std::path::Path;

use thiserror::Error;

use super::mesh::MeshData;
use super::vertex::Vertex;

#[derive(Debug, Error)]
pub enum MeshImportError {
    #[error("failed to load OBJ: {0}")]
    Load(#[from] tobj::LoadError),
    #[error("OBJ file contains no models")]
    Empty,
}

/// Imported geometry is drawn in the render item's color.
const IMPORT_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

pub fn load_obj(path: impl AsRef<Path>) -> Result<MeshData, MeshImportError> {
    let (models, _materials) = tobj::load_obj(
        path.as_ref(),
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
    )?;

    if models.is_empty() {
        return Err(MeshImportError::Empty);
    }

    let mut data = MeshData::default();
    for model in &models {
        let mesh = &model.mesh;
        let base = data.vertices.len() as u32;

        data.vertices.extend(
            mesh.positions
                .chunks_exact(3)
                .map(|p| Vertex::new([p[0], p[1], p[2]], IMPORT_COLOR)),
        );
        data.indices.extend(mesh.indices.iter().map(|&i| base + i));
    }

    log::debug!(
        "loaded {:?}: {} vertices, {} triangles",
        path.as_ref(),
        data.vertices.len(),
        data.triangle_count()
    );
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_a_minimal_obj() {
        let mut file = tempfile_path("basalt_obj_test.obj");
        write!(
            file.1,
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n"
        )
        .unwrap();
        drop(file.1);

        let mesh = load_obj(&file.0).unwrap();
        assert_eq!(mesh.vertices.len(), 3);
        assert_eq!(mesh.indices, vec![0, 1, 2]);
        std::fs::remove_file(&file.0).ok();
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_obj("does/not/exist.obj").is_err());
    }

    fn tempfile_path(name: &str) -> (std::path::PathBuf, std::fs::File) {
        let path = std::env::temp_dir().join(name);
        let file = std::fs::File::create(&path).unwrap();
        (path, file)
    }
}
