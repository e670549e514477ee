//! Traits for mesh types.

use crate::{Aabb, Triangle};
use nalgebra::Point3;

/// Trait for types that provide polygon mesh topology information.
///
/// Faces are exposed as index slices of any arity, so algorithms written
/// against this trait never branch on triangle versus quad versus n-gon.
pub trait MeshTopology {
    /// Get the number of vertices.
    fn vertex_count(&self) -> usize;

    /// Get the number of faces (polygons).
    fn face_count(&self) -> usize;

    /// Check if the mesh is empty.
    fn is_empty(&self) -> bool {
        self.vertex_count() == 0 || self.face_count() == 0
    }

    /// Get a vertex position by index.
    ///
    /// Returns `None` if the index is out of bounds.
    fn vertex(&self, index: usize) -> Option<&Point3<f64>>;

    /// Get a face by index as a slice of vertex indices.
    ///
    /// Returns `None` if the index is out of bounds.
    fn face(&self, index: usize) -> Option<&[u32]>;

    /// Iterate over all vertex positions.
    fn vertices(&self) -> impl Iterator<Item = &Point3<f64>>;

    /// Iterate over all faces as index slices.
    fn faces(&self) -> impl Iterator<Item = &[u32]>;

    /// Iterate over the fan triangles of every face with resolved positions.
    ///
    /// Faces must reference valid vertices.
    fn triangles(&self) -> impl Iterator<Item = Triangle>;
}

/// Trait for types that can compute a bounding box.
pub trait MeshBounds {
    /// Compute the axis-aligned bounding box.
    ///
    /// Returns an empty AABB if the mesh has no vertices.
    fn bounds(&self) -> Aabb;

    /// Compute the bounding box, returning `None` if empty.
    fn bounds_opt(&self) -> Option<Aabb> {
        let b = self.bounds();
        if b.is_empty() { None } else { Some(b) }
    }

    /// Get the center of the bounding box.
    fn center(&self) -> Point3<f64> {
        self.bounds().center()
    }
}
