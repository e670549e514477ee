//! Error types for mesh topology checks.

use thiserror::Error;

/// Result type for mesh store and adjacency operations.
pub type MeshResult<T> = Result<T, MeshError>;

/// Topology errors detected while validating a mesh or deriving its adjacency.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeshError {
    /// A face has fewer than three vertices.
    #[error("face {face} has {len} vertices (need at least 3)")]
    DegenerateFace {
        /// Index of the offending face.
        face: usize,
        /// Number of vertex indices in the face.
        len: usize,
    },

    /// A face references a vertex that does not exist.
    #[error("face {face} references vertex {index} (mesh has {vertex_count} vertices)")]
    IndexOutOfRange {
        /// Index of the offending face.
        face: usize,
        /// The out-of-range vertex index.
        index: u32,
        /// Total number of vertices in the mesh.
        vertex_count: usize,
    },

    /// An edge is shared by more than two faces.
    #[error("edge ({v0}, {v1}) is shared by {faces} faces (at most 2 allowed)")]
    NonManifoldEdge {
        /// Smaller endpoint of the edge.
        v0: u32,
        /// Larger endpoint of the edge.
        v1: u32,
        /// Number of faces referencing the edge.
        faces: usize,
    },

    /// A boundary vertex does not have the number of boundary edges the
    /// subdivision rule needs.
    #[error("vertex {vertex} has {boundary_edges} boundary edges (expected {expected})")]
    NonManifoldVertex {
        /// The offending vertex.
        vertex: u32,
        /// Number of boundary edges incident to the vertex.
        boundary_edges: usize,
        /// Number of boundary edges the rule requires.
        expected: usize,
    },

    /// A vertex is not referenced by any face, so it has no faces or
    /// neighbours to average over.
    #[error("vertex {vertex} is not referenced by any face")]
    IsolatedVertex {
        /// The unreferenced vertex.
        vertex: u32,
    },
}

impl MeshError {
    /// Whether this error describes a non-manifold configuration.
    #[must_use]
    pub const fn is_non_manifold(&self) -> bool {
        matches!(
            self,
            Self::NonManifoldEdge { .. } | Self::NonManifoldVertex { .. }
        )
    }

    /// Whether this error describes degenerate input (short faces or
    /// unreferenced vertices).
    #[must_use]
    pub const fn is_degenerate(&self) -> bool {
        matches!(self, Self::DegenerateFace { .. } | Self::IsolatedVertex { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = MeshError::DegenerateFace { face: 3, len: 2 };
        assert_eq!(format!("{err}"), "face 3 has 2 vertices (need at least 3)");

        let err = MeshError::IndexOutOfRange {
            face: 0,
            index: 9,
            vertex_count: 4,
        };
        let display = format!("{err}");
        assert!(display.contains('9'));
        assert!(display.contains('4'));

        let err = MeshError::NonManifoldEdge {
            v0: 0,
            v1: 1,
            faces: 3,
        };
        assert!(format!("{err}").contains("(0, 1)"));
    }

    #[test]
    fn error_classification() {
        assert!(
            MeshError::NonManifoldEdge {
                v0: 0,
                v1: 1,
                faces: 3
            }
            .is_non_manifold()
        );
        assert!(
            MeshError::NonManifoldVertex {
                vertex: 2,
                boundary_edges: 4,
                expected: 2
            }
            .is_non_manifold()
        );
        assert!(MeshError::IsolatedVertex { vertex: 7 }.is_degenerate());
        assert!(MeshError::DegenerateFace { face: 0, len: 1 }.is_degenerate());
        assert!(
            !MeshError::IndexOutOfRange {
                face: 0,
                index: 5,
                vertex_count: 3
            }
            .is_degenerate()
        );
    }
}
