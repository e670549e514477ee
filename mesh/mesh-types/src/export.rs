//! Fan triangulation and renderer-ready buffers.

use crate::PolyMesh;

/// Flat buffers for handing a mesh to a rasterizer.
///
/// Positions and normals are interleaved per vertex as `[x, y, z, ...]`
/// in `f32`. `indices` is the fan-triangulated face list, three indices
/// per triangle. `normals` is empty when the mesh has no normals.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshExport {
    /// Vertex positions, three components per vertex.
    pub positions: Vec<f32>,
    /// Vertex normals, three components per vertex.
    pub normals: Vec<f32>,
    /// Triangle indices, three per triangle.
    pub indices: Vec<u32>,
}

impl MeshExport {
    /// Flatten a mesh.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // f64 -> f32 is the renderer's precision
    pub fn from_mesh(mesh: &PolyMesh) -> Self {
        let positions = mesh
            .vertices
            .iter()
            .flat_map(|p| [p.x as f32, p.y as f32, p.z as f32])
            .collect();
        let normals = if mesh.has_normals() {
            mesh.normals
                .iter()
                .flat_map(|n| [n.x as f32, n.y as f32, n.z as f32])
                .collect()
        } else {
            Vec::new()
        };

        Self {
            positions,
            normals,
            indices: fan_triangulate(&mesh.faces),
        }
    }

    /// Number of vertices in the buffers.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Number of triangles in the index buffer.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Fan-triangulate polygons around their first vertex.
///
/// Faces with fewer than three indices emit nothing.
///
/// # Example
///
/// ```
/// use mesh_types::fan_triangulate;
///
/// let faces = [vec![0u32, 1, 2, 3], vec![4, 5, 6]];
/// assert_eq!(fan_triangulate(&faces), vec![0, 1, 2, 0, 2, 3, 4, 5, 6]);
/// ```
#[must_use]
pub fn fan_triangulate<F: AsRef<[u32]>>(faces: &[F]) -> Vec<u32> {
    let triangle_count: usize = faces
        .iter()
        .map(|f| f.as_ref().len().saturating_sub(2))
        .sum();
    let mut indices = Vec::with_capacity(triangle_count * 3);

    for face in faces {
        let face = face.as_ref();
        for i in 1..face.len().saturating_sub(1) {
            indices.extend_from_slice(&[face[0], face[i], face[i + 1]]);
        }
    }

    indices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{unit_cube, unit_triangle};

    #[test]
    fn fan_skips_short_faces() {
        let faces = [vec![0u32, 1], vec![2, 3, 4]];
        assert_eq!(fan_triangulate(&faces), vec![2, 3, 4]);
    }

    #[test]
    fn export_cube() {
        let cube = unit_cube();
        let export = cube.export();
        assert_eq!(export.vertex_count(), 8);
        assert_eq!(export.normals.len(), 24);
        assert_eq!(export.triangle_count(), 12);
    }

    #[test]
    fn export_without_normals() {
        let mut tri = unit_triangle();
        tri.normals.clear();
        let export = tri.export();
        assert!(export.normals.is_empty());
        assert_eq!(export.indices, vec![0, 1, 2]);
    }
}
