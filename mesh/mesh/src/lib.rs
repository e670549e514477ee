//! Polygon mesh subdivision toolkit.
//!
//! This umbrella crate re-exports the mesh-* crates, providing a unified API
//! for refining polygon meshes. It performs no file I/O, rendering, or
//! threading; callers hand it parsed positions and polygons and get plain
//! buffers back.
//!
//! # Quick Start
//!
//! ```
//! use mesh::prelude::*;
//!
//! // Positions and polygons as delivered by a file loader
//! let mesh = PolyMesh::from_polygons(
//!     vec![
//!         Point3::new(0.0, 0.0, 0.0),
//!         Point3::new(1.0, 0.0, 0.0),
//!         Point3::new(1.0, 1.0, 0.0),
//!         Point3::new(0.0, 1.0, 0.0),
//!     ],
//!     [[0u32, 1, 2, 3]],
//! )?;
//!
//! // Warn the way an interactive viewer would
//! let params = SubdivideParams::loop_subdivision().with_triangulate_polygons(true);
//! assert_eq!(params.advise(&mesh), Some(MethodAdvice::LoopRequiresTriangulation));
//!
//! // Refine and hand renderer-ready buffers back
//! let result = subdivide_mesh(&mesh, &params.with_iterations(2))?;
//! let buffers = result.mesh.export();
//! assert_eq!(buffers.triangle_count(), 2 * 16);
//!
//! // The input is untouched and can be kept for a reset
//! assert_eq!(mesh.face_count(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Module Organization
//!
//! - [`types`] - Mesh store, adjacency, normals, triangulation, primitives
//! - [`subdivide`] - Catmull-Clark and Loop subdivision with an iteration driver
//!
//! # Feature Flags
//!
//! - `serde` - Derive `Serialize`/`Deserialize` for meshes and parameters

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

// =============================================================================
// Re-exports
// =============================================================================

/// Mesh store, adjacency, normals, triangulation and primitive generators.
pub use mesh_types as types;

/// Catmull-Clark and Loop subdivision.
pub use mesh_subdivide as subdivide;

// =============================================================================
// Prelude
// =============================================================================

/// Common imports for mesh processing.
///
/// This module re-exports the most commonly used types and traits.
///
/// # Usage
///
/// ```
/// use mesh::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use mesh_types::{
        Aabb, Face, MeshBounds, MeshError, MeshExport, MeshTopology, Point3, PolyMesh, Triangle,
        Vector3,
    };

    // Primitives
    pub use mesh_types::{Surface, unit_cube, unit_quad, unit_triangle};

    // Subdivision
    pub use mesh_subdivide::{
        MethodAdvice, SubdivideError, SubdivideParams, SubdivisionMethod, SubdivisionResult,
        subdivide_mesh,
    };
}

// =============================================================================
// Tests
// =============================================================================
