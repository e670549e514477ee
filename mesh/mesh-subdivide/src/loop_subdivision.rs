//! Loop subdivision for triangle meshes.

// Algorithm uses many indexing operations
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]

use std::f64::consts::TAU;

use mesh_types::{
    EdgeRecord, Face, MeshAdjacency, MeshError, PolyMesh, Point3, Vector3,
    estimate_vertex_normals,
};
use smallvec::smallvec;
use tracing::trace;

use crate::error::{SubdivideError, SubdivideResult};
use crate::params::SubdivisionMethod;

/// Apply one Loop step to a triangle mesh.
///
/// Output vertices are the repositioned originals (even vertices) followed
/// by one new vertex per unique edge (odd vertices) in first-seen edge
/// order. Every triangle becomes four. Normals are re-estimated on the
/// result.
///
/// # Errors
///
/// - [`SubdivideError::UnsupportedTopology`] if any face is not a triangle
/// - [`MeshError::NonManifoldEdge`] if an edge is shared by more than two faces
/// - [`MeshError::NonManifoldVertex`] for a boundary vertex without exactly
///   two boundary edges
/// - [`MeshError::IsolatedVertex`] if a vertex belongs to no face
///
/// # Example
///
/// ```
/// use mesh_types::{unit_triangle, MeshTopology};
/// use mesh_subdivide::subdivide_loop;
///
/// let fine = subdivide_loop(&unit_triangle())?;
/// assert_eq!(fine.vertex_count(), 6);
/// assert_eq!(fine.face_count(), 4);
/// # Ok::<(), mesh_subdivide::SubdivideError>(())
/// ```
pub fn subdivide_loop(mesh: &PolyMesh) -> SubdivideResult<PolyMesh> {
    if let Some((face, f)) = mesh.faces.iter().enumerate().find(|(_, f)| f.len() != 3) {
        return Err(SubdivideError::UnsupportedTopology {
            method: SubdivisionMethod::Loop,
            face,
            len: f.len(),
        });
    }

    let adjacency = MeshAdjacency::build(mesh.vertices.len(), &mesh.faces)?;
    adjacency.require_manifold()?;

    let mut vertices = Vec::with_capacity(mesh.vertices.len() + adjacency.edge_count());
    for (vi, v) in mesh.vertices.iter().enumerate() {
        vertices.push(even_vertex(vi as u32, v, &adjacency, &mesh.vertices)?);
    }
    for edge in adjacency.edges() {
        vertices.push(odd_vertex(edge, mesh)?);
    }

    let base = mesh.vertices.len() as u32;
    let mut faces: Vec<Face> = Vec::with_capacity(mesh.faces.len() * 4);
    for (fi, face) in mesh.faces.iter().enumerate() {
        let (v0, v1, v2) = (face[0], face[1], face[2]);
        let [e01, e12, e20] = match adjacency.face_edges(fi) {
            &[a, b, c] => [a, b, c].map(|id| base + id as u32),
            other => {
                return Err(MeshError::DegenerateFace {
                    face: fi,
                    len: other.len(),
                }
                .into());
            }
        };

        // Corner triangles
        faces.push(smallvec![v0, e01, e20]);
        faces.push(smallvec![v1, e12, e01]);
        faces.push(smallvec![v2, e20, e12]);
        // Center triangle
        faces.push(smallvec![e01, e12, e20]);
    }

    trace!(
        vertices = vertices.len(),
        odd = adjacency.edge_count(),
        boundary_edges = adjacency.boundary_edge_count(),
        faces = faces.len(),
        "loop step"
    );

    let normals = estimate_vertex_normals(&vertices, &faces)?;
    Ok(PolyMesh {
        vertices,
        faces,
        normals,
    })
}

/// Loop weight for an interior vertex of valence `n`.
#[must_use]
pub fn loop_beta(n: usize) -> f64 {
    let n = n as f64;
    let inner = 0.25f64.mul_add((TAU / n).cos(), 0.375);
    (0.625 - inner * inner) / n
}

/// Repositioned original vertex.
fn even_vertex(
    vi: u32,
    v: &Point3<f64>,
    adjacency: &MeshAdjacency,
    positions: &[Point3<f64>],
) -> SubdivideResult<Point3<f64>> {
    let neighbors = adjacency.neighbors(vi);
    if neighbors.is_empty() {
        return Err(MeshError::IsolatedVertex { vertex: vi }.into());
    }

    let boundary = adjacency.boundary_neighbors(vi);
    match boundary.as_slice() {
        [] => {
            let n = neighbors.len();
            let beta = loop_beta(n);
            let sum = neighbors
                .iter()
                .fold(Vector3::zeros(), |acc, &nb| acc + positions[nb as usize].coords);
            Ok(Point3::from(v.coords * (1.0 - n as f64 * beta) + sum * beta))
        }
        [p, q] => {
            let pq = positions[*p as usize].coords + positions[*q as usize].coords;
            Ok(Point3::from(v.coords * 0.75 + pq * 0.125))
        }
        other => Err(MeshError::NonManifoldVertex {
            vertex: vi,
            boundary_edges: other.len(),
            expected: 2,
        }
        .into()),
    }
}

/// New vertex on an edge.
fn odd_vertex(edge: &EdgeRecord, mesh: &PolyMesh) -> SubdivideResult<Point3<f64>> {
    let a = mesh.vertices[edge.v0 as usize].coords;
    let b = mesh.vertices[edge.v1 as usize].coords;

    if !edge.is_interior() {
        return Ok(Point3::from((a + b) * 0.5));
    }

    let mut apex_sum = Vector3::zeros();
    for &fi in &edge.faces {
        let face = &mesh.faces[fi];
        let apex = face
            .iter()
            .find(|&&vi| vi != edge.v0 && vi != edge.v1)
            .ok_or(MeshError::DegenerateFace {
                face: fi,
                len: face.len(),
            })?;
        apex_sum += mesh.vertices[*apex as usize].coords;
    }

    Ok(Point3::from((a + b) * 0.375 + apex_sum * 0.125))
}
