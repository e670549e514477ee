//! Catmull-Clark subdivision for arbitrary polygon meshes.

// Algorithm uses many indexing operations
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]

use mesh_types::{
    Face, MeshAdjacency, MeshError, PolyMesh, Point3, Vector3, estimate_vertex_normals,
};
use smallvec::smallvec;
use tracing::trace;

use crate::error::SubdivideResult;
use crate::params::EdgeAverage;

/// Apply one Catmull-Clark step.
///
/// Output vertices are laid out as `[repositioned originals, edge points,
/// face points]`. Every k-gon becomes k quads. Normals are re-estimated on
/// the result.
///
/// # Errors
///
/// - [`MeshError::DegenerateFace`] / [`MeshError::IndexOutOfRange`] for malformed faces
/// - [`MeshError::NonManifoldEdge`] if an edge is shared by more than two faces
/// - [`MeshError::IsolatedVertex`] if a vertex belongs to no face
/// - [`MeshError::NonManifoldVertex`] for a boundary vertex with no boundary edges
///
/// # Example
///
/// ```
/// use mesh_types::{unit_cube, MeshTopology};
/// use mesh_subdivide::{subdivide_catmull_clark, EdgeAverage};
///
/// let fine = subdivide_catmull_clark(&unit_cube(), EdgeAverage::Midpoints)?;
/// assert_eq!(fine.vertex_count(), 8 + 12 + 6);
/// assert_eq!(fine.face_count(), 24);
/// assert!(fine.is_quad_mesh());
/// # Ok::<(), mesh_subdivide::SubdivideError>(())
/// ```
pub fn subdivide_catmull_clark(
    mesh: &PolyMesh,
    edge_average: EdgeAverage,
) -> SubdivideResult<PolyMesh> {
    let adjacency = MeshAdjacency::build(mesh.vertices.len(), &mesh.faces)?;
    adjacency.require_manifold()?;

    let face_points = face_points(mesh);
    let (edge_points, edge_slots) = edge_points(mesh, &adjacency, &face_points);

    let mut vertices = Vec::with_capacity(
        mesh.vertices.len() + edge_points.len() + face_points.len(),
    );
    for (vi, v) in mesh.vertices.iter().enumerate() {
        vertices.push(reposition(
            vi as u32,
            v,
            &adjacency,
            mesh,
            &face_points,
            &edge_points,
            &edge_slots,
            edge_average,
        )?);
    }

    let edge_base = vertices.len() as u32;
    let face_base = edge_base + edge_points.len() as u32;
    vertices.extend_from_slice(&edge_points);
    vertices.extend_from_slice(&face_points);

    let mut faces: Vec<Face> = Vec::with_capacity(mesh.corner_count());
    for (fi, face) in mesh.faces.iter().enumerate() {
        let fp = face_base + fi as u32;
        let corner_edges = adjacency.face_edges(fi);
        let k = face.len();
        for i in 0..k {
            let outgoing = edge_base + edge_slots[corner_edges[i]];
            let incoming = edge_base + edge_slots[corner_edges[(i + k - 1) % k]];
            faces.push(smallvec![face[i], outgoing, fp, incoming]);
        }
    }

    trace!(
        vertices = vertices.len(),
        edge_points = edge_points.len(),
        faces = faces.len(),
        "catmull-clark step"
    );

    let normals = estimate_vertex_normals(&vertices, &faces)?;
    Ok(PolyMesh {
        vertices,
        faces,
        normals,
    })
}

/// Mean of each face's vertex positions.
fn face_points(mesh: &PolyMesh) -> Vec<Point3<f64>> {
    mesh.faces
        .iter()
        .map(|face| mean(face.iter().map(|&vi| mesh.vertices[vi as usize].coords)))
        .collect()
}

/// Compute edge points and the output slot of each edge.
///
/// Interior edges are numbered in the order their second face is met;
/// boundary edges follow in first-seen edge order. `slots[edge_id]` is the
/// position of that edge's point in the returned list.
fn edge_points(
    mesh: &PolyMesh,
    adjacency: &MeshAdjacency,
    face_points: &[Point3<f64>],
) -> (Vec<Point3<f64>>, Vec<u32>) {
    let edges = adjacency.edges();
    let mut order = Vec::with_capacity(edges.len());
    let mut placed = vec![false; edges.len()];

    for fi in 0..mesh.faces.len() {
        for &id in adjacency.face_edges(fi) {
            let edge = &edges[id];
            if !placed[id] && edge.is_interior() && edge.faces[1] == fi {
                placed[id] = true;
                order.push(id);
            }
        }
    }
    order.extend((0..edges.len()).filter(|&id| !placed[id]));

    let mut slots = vec![0; edges.len()];
    let points = order
        .iter()
        .enumerate()
        .map(|(slot, &id)| {
            slots[id] = slot as u32;
            let edge = &edges[id];
            let a = &mesh.vertices[edge.v0 as usize];
            let b = &mesh.vertices[edge.v1 as usize];
            if edge.is_interior() {
                let sum = a.coords
                    + b.coords
                    + face_points[edge.faces[0]].coords
                    + face_points[edge.faces[1]].coords;
                Point3::from(sum / 4.0)
            } else {
                nalgebra::center(a, b)
            }
        })
        .collect();

    (points, slots)
}

/// New position for original vertex `vi`.
#[allow(clippy::too_many_arguments)]
fn reposition(
    vi: u32,
    v: &Point3<f64>,
    adjacency: &MeshAdjacency,
    mesh: &PolyMesh,
    face_points: &[Point3<f64>],
    edge_points: &[Point3<f64>],
    edge_slots: &[u32],
    edge_average: EdgeAverage,
) -> SubdivideResult<Point3<f64>> {
    let incident = adjacency.faces_for_vertex(vi);
    let neighbors = adjacency.neighbors(vi);
    if incident.is_empty() || neighbors.is_empty() {
        return Err(MeshError::IsolatedVertex { vertex: vi }.into());
    }

    if incident.len() != neighbors.len() {
        let boundary = adjacency.boundary_neighbors(vi);
        if boundary.is_empty() {
            return Err(MeshError::NonManifoldVertex {
                vertex: vi,
                boundary_edges: 0,
                expected: 2,
            }
            .into());
        }
        let avg = mean(boundary.iter().map(|&b| mesh.vertices[b as usize].coords));
        return Ok(Point3::from(v.coords * 0.75 + avg.coords * 0.25));
    }

    let n = incident.len() as f64;
    let face_avg = mean(incident.iter().map(|&fi| face_points[fi].coords));
    let edge_avg = match edge_average {
        EdgeAverage::Midpoints => {
            let neighbor_avg = mean(neighbors.iter().map(|&nb| mesh.vertices[nb as usize].coords));
            (v.coords + neighbor_avg.coords) * 0.5
        }
        EdgeAverage::EdgePoints => {
            mean(
                adjacency
                    .edge_ids_for_vertex(vi)
                    .iter()
                    .map(|&id| edge_points[edge_slots[id] as usize].coords),
            )
            .coords
        }
    };

    Ok(Point3::from(
        (face_avg.coords + edge_avg * 2.0 + v.coords * (n - 3.0)) / n,
    ))
}

/// Arithmetic mean of a non-empty set of positions; origin for an empty set.
fn mean(points: impl Iterator<Item = Vector3<f64>>) -> Point3<f64> {
    let (sum, count) = points.fold((Vector3::zeros(), 0usize), |(s, c), p| (s + p, c + 1));
    if count == 0 {
        Point3::origin()
    } else {
        Point3::from(sum / count as f64)
    }
}
