//! Error types for mesh subdivision operations.

use mesh_types::MeshError;
use thiserror::Error;

use crate::params::SubdivisionMethod;

/// Errors that can occur during subdivision operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubdivideError {
    /// Mesh has no vertices.
    #[error("Mesh has no vertices")]
    EmptyMesh,

    /// Mesh has no faces.
    #[error("Mesh has no faces")]
    NoFaces,

    /// The input topology cannot be handled by the chosen scheme.
    #[error("{method:?} subdivision requires triangles, but face {face} has {len} vertices")]
    UnsupportedTopology {
        /// Scheme that rejected the mesh.
        method: SubdivisionMethod,
        /// Index of the first offending face.
        face: usize,
        /// Number of vertices in that face.
        len: usize,
    },

    /// The mesh is malformed or non-manifold.
    #[error(transparent)]
    Topology(#[from] MeshError),

    /// Mesh would exceed maximum size.
    #[error("Subdivision would exceed maximum mesh size ({current} -> {projected} faces, max {max})")]
    MeshTooLarge {
        /// Current face count.
        current: usize,
        /// Projected face count after subdivision.
        projected: usize,
        /// Maximum allowed face count.
        max: usize,
    },

    /// A progress callback asked to stop.
    #[error("Subdivision cancelled after {completed} iteration(s)")]
    Cancelled {
        /// Iterations finished before cancellation.
        completed: u32,
    },
}

/// Result type for subdivision operations.
pub type SubdivideResult<T> = std::result::Result<T, SubdivideError>;
