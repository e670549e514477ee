//! Core polygon mesh types.
//!
//! This crate provides the mesh store and the topology and geometry passes
//! that subdivision builds on:
//!
//! - [`PolyMesh`] - Indexed polygon mesh with faces of any arity
//! - [`MeshAdjacency`] - Per-vertex and per-edge topology, rebuilt on demand
//! - [`estimate_vertex_normals`] - Smoothed per-vertex normals
//! - [`MeshExport`] - Fan-triangulated, renderer-ready buffers
//! - [`Triangle`] - A concrete triangle with vertex positions
//! - [`Aabb`] - Axis-aligned bounding box
//!
//! Primitive generators ([`unit_cube`], [`height_field`], [`Surface`]) build
//! ready-made test meshes.
//!
//! # Units
//!
//! This library is **unit-agnostic**. All coordinates are `f64`.
//!
//! # Coordinate System
//!
//! Uses a **right-handed coordinate system**. Face winding is
//! **counter-clockwise (CCW) when viewed from outside**, and normals point
//! outward by the right-hand rule.
//!
//! # Example
//!
//! ```
//! use mesh_types::{PolyMesh, Point3, MeshTopology};
//!
//! let mesh = PolyMesh::from_polygons(
//!     vec![
//!         Point3::new(0.0, 0.0, 0.0),
//!         Point3::new(1.0, 0.0, 0.0),
//!         Point3::new(1.0, 1.0, 0.0),
//!         Point3::new(0.0, 1.0, 0.0),
//!         Point3::new(0.5, 2.0, 0.0),
//!     ],
//!     vec![vec![0u32, 1, 2, 3], vec![3, 2, 4]],
//! )?;
//!
//! assert_eq!(mesh.face_count(), 2);
//! assert!(!mesh.is_triangle_mesh());
//! assert_eq!(mesh.triangulate_indices().len(), 9);
//! # Ok::<(), mesh_types::MeshError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod adjacency;
mod bounds;
mod error;
mod export;
mod mesh;
mod normals;
mod primitives;
mod traits;
mod triangle;

pub use adjacency::{EdgeRecord, MeshAdjacency, edge_key};
pub use bounds::Aabb;
pub use error::{MeshError, MeshResult};
pub use export::{MeshExport, fan_triangulate};
pub use mesh::{Face, PolyMesh};
pub use normals::{NormalParams, estimate_vertex_normals, estimate_vertex_normals_with};
pub use primitives::{HeightFieldParams, Surface, height_field, unit_cube, unit_quad, unit_triangle};
pub use traits::{MeshBounds, MeshTopology};
pub use triangle::Triangle;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
