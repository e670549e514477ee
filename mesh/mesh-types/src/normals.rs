//! Smoothed per-vertex normal estimation.
//!
//! Face normals are accumulated into every vertex of the face, normalized,
//! then blended once with the mean of the neighbouring vertex normals.

use nalgebra::{Point3, Vector3};
use tracing::trace;

use crate::Triangle;
use crate::adjacency::MeshAdjacency;
use crate::error::MeshResult;

/// Parameters for vertex normal estimation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalParams {
    /// Number of neighbour-averaging passes after the initial normalization.
    ///
    /// One pass is the standard estimate. Zero yields the plain accumulated
    /// face normals.
    pub smoothing_passes: u32,
}

impl Default for NormalParams {
    fn default() -> Self {
        Self {
            smoothing_passes: 1,
        }
    }
}

impl NormalParams {
    /// Create new parameters with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of smoothing passes.
    #[must_use]
    pub const fn with_smoothing_passes(mut self, passes: u32) -> Self {
        self.smoothing_passes = passes;
        self
    }
}

/// Estimate smoothed unit normals for every vertex.
///
/// The result is parallel to `vertices`. Vertices that receive no face
/// contribution (or whose contributions cancel) get a zero vector.
///
/// # Errors
///
/// Returns an error if a face has fewer than 3 indices or references a
/// missing vertex.
///
/// # Example
///
/// ```
/// use mesh_types::{estimate_vertex_normals, unit_quad};
///
/// let quad = unit_quad();
/// let normals = estimate_vertex_normals(&quad.vertices, &quad.faces)?;
///
/// assert_eq!(normals.len(), 4);
/// assert!(normals.iter().all(|n| (n.z - 1.0).abs() < 1e-12));
/// # Ok::<(), mesh_types::MeshError>(())
/// ```
pub fn estimate_vertex_normals<F: AsRef<[u32]>>(
    vertices: &[Point3<f64>],
    faces: &[F],
) -> MeshResult<Vec<Vector3<f64>>> {
    estimate_vertex_normals_with(vertices, faces, &NormalParams::default())
}

/// Estimate vertex normals with explicit parameters.
///
/// # Errors
///
/// Returns an error if a face has fewer than 3 indices or references a
/// missing vertex.
pub fn estimate_vertex_normals_with<F: AsRef<[u32]>>(
    vertices: &[Point3<f64>],
    faces: &[F],
    params: &NormalParams,
) -> MeshResult<Vec<Vector3<f64>>> {
    let adjacency = MeshAdjacency::build(vertices.len(), faces)?;

    let mut normals = vec![Vector3::zeros(); vertices.len()];
    for face in faces {
        let face = face.as_ref();
        // Anchored at the first corner; not area weighted.
        let face_normal = Triangle::new(
            vertices[face[0] as usize],
            vertices[face[1] as usize],
            vertices[face[2] as usize],
        )
        .normal_unnormalized();

        for &vi in face {
            normals[vi as usize] += face_normal;
        }
    }

    for normal in &mut normals {
        *normal = normalize_or_zero(*normal);
    }

    for _ in 0..params.smoothing_passes {
        normals = smooth_pass(&normals, &adjacency);
    }

    trace!(
        vertices = vertices.len(),
        passes = params.smoothing_passes,
        "estimated vertex normals"
    );

    Ok(normals)
}

/// Blend each normal with the mean of its neighbours' normals.
fn smooth_pass(normals: &[Vector3<f64>], adjacency: &MeshAdjacency) -> Vec<Vector3<f64>> {
    normals
        .iter()
        .enumerate()
        .map(|(vi, normal)| {
            #[allow(clippy::cast_possible_truncation)]
            let neighbors = adjacency.neighbors(vi as u32);
            if neighbors.is_empty() {
                return *normal;
            }

            let sum = neighbors
                .iter()
                .fold(Vector3::zeros(), |acc, &n| acc + normals[n as usize]);
            #[allow(clippy::cast_precision_loss)]
            let mean = sum / neighbors.len() as f64;

            normalize_or_zero((normal + mean) * 0.5)
        })
        .collect()
}

/// Unit vector in the direction of `v`, or zero if `v` has zero length.
#[inline]
fn normalize_or_zero(v: Vector3<f64>) -> Vector3<f64> {
    let len = v.norm();
    if len > 0.0 { v / len } else { Vector3::zeros() }
}
