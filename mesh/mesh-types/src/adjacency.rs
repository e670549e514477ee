//! Mesh adjacency data structures.
//!
//! Provides vertex-to-vertex, vertex-to-face and edge-to-face lookups for
//! polygon meshes. Adjacency is derived from a face list on demand and is
//! never cached on the mesh, so it always reflects the faces it was built from.

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::error::{MeshError, MeshResult};
use crate::mesh::check_face;

/// Normalize edge so smaller vertex index comes first.
///
/// # Example
///
/// ```
/// use mesh_types::edge_key;
///
/// assert_eq!(edge_key(5, 3), (3, 5));
/// assert_eq!(edge_key(3, 5), (3, 5));
/// ```
#[inline]
#[must_use]
pub const fn edge_key(v0: u32, v1: u32) -> (u32, u32) {
    if v0 <= v1 { (v0, v1) } else { (v1, v0) }
}

/// An undirected edge and the faces that reference it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeRecord {
    /// Smaller endpoint.
    pub v0: u32,
    /// Larger endpoint.
    pub v1: u32,
    /// Faces referencing this edge, in the order they were visited.
    pub faces: SmallVec<[usize; 2]>,
}

impl EdgeRecord {
    fn new((v0, v1): (u32, u32)) -> Self {
        Self {
            v0,
            v1,
            faces: SmallVec::new(),
        }
    }

    /// Canonical `(min, max)` key of the edge.
    #[inline]
    #[must_use]
    pub const fn key(&self) -> (u32, u32) {
        (self.v0, self.v1)
    }

    /// Number of faces referencing the edge.
    #[inline]
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Edge bordered by exactly one face.
    #[inline]
    #[must_use]
    pub fn is_boundary(&self) -> bool {
        self.faces.len() == 1
    }

    /// Edge shared by exactly two faces.
    #[inline]
    #[must_use]
    pub fn is_interior(&self) -> bool {
        self.faces.len() == 2
    }

    /// The endpoint opposite `v`.
    ///
    /// Returns `v0` if `v` is not an endpoint of this edge.
    #[inline]
    #[must_use]
    pub const fn other(&self, v: u32) -> u32 {
        if self.v0 == v { self.v1 } else { self.v0 }
    }
}

/// Adjacency information for a polygon mesh.
///
/// Built in a single pass over the faces. Each face with `k` vertices
/// contributes the `k` edges `(face[i], face[(i + 1) % k])`. Edges are kept
/// in the order they are first seen, which makes every derived numbering
/// reproducible.
///
/// # Example
///
/// ```
/// use mesh_types::MeshAdjacency;
///
/// let faces = vec![vec![0u32, 1, 2], vec![1, 3, 2]];
/// let adj = MeshAdjacency::build(4, &faces)?;
///
/// assert_eq!(adj.edge_count(), 5);
/// assert_eq!(adj.boundary_edge_count(), 4);
/// assert_eq!(adj.neighbors(1), &[0, 2, 3]);
/// # Ok::<(), mesh_types::MeshError>(())
/// ```
#[derive(Debug, Clone)]
pub struct MeshAdjacency {
    /// Unique edges in first-seen order.
    edges: Vec<EdgeRecord>,
    /// Maps edge (v0, v1) to its position in `edges`. v0 <= v1.
    edge_ids: HashMap<(u32, u32), usize>,
    /// Per-vertex incident faces, each face listed once.
    vertex_faces: Vec<Vec<usize>>,
    /// Per-vertex incident edge ids.
    vertex_edges: Vec<Vec<usize>>,
    /// Per-vertex distinct neighbours across a face edge.
    vertex_neighbors: Vec<Vec<u32>>,
    /// Per-face edge ids; entry `i` is the edge from corner `i` to corner `i + 1`.
    face_edges: Vec<SmallVec<[usize; 4]>>,
}

impl MeshAdjacency {
    /// Build adjacency information from a face list.
    ///
    /// # Arguments
    ///
    /// * `vertex_count` - Number of vertices the faces index into
    /// * `faces` - Polygons as vertex index lists
    ///
    /// # Errors
    ///
    /// - [`MeshError::DegenerateFace`] if a face has fewer than 3 indices
    /// - [`MeshError::IndexOutOfRange`] if a face references a missing vertex
    ///
    /// Non-manifold edges are recorded, not rejected. Use
    /// [`MeshAdjacency::require_manifold`] where the caller needs at most two
    /// faces per edge.
    pub fn build<F: AsRef<[u32]>>(vertex_count: usize, faces: &[F]) -> MeshResult<Self> {
        let mut edges: Vec<EdgeRecord> = Vec::new();
        let mut edge_ids: HashMap<(u32, u32), usize> = HashMap::new();
        let mut vertex_faces: Vec<Vec<usize>> = vec![Vec::new(); vertex_count];
        let mut vertex_edges: Vec<Vec<usize>> = vec![Vec::new(); vertex_count];
        let mut vertex_neighbors: Vec<Vec<u32>> = vec![Vec::new(); vertex_count];
        let mut face_edges: Vec<SmallVec<[usize; 4]>> = Vec::with_capacity(faces.len());

        for (face_idx, face) in faces.iter().enumerate() {
            let face = face.as_ref();
            check_face(face_idx, face, vertex_count)?;

            let k = face.len();
            let mut corner_edges = SmallVec::with_capacity(k);
            for (i, &v) in face.iter().enumerate() {
                let incident = &mut vertex_faces[v as usize];
                if !incident.contains(&face_idx) {
                    incident.push(face_idx);
                }

                let next = face[(i + 1) % k];
                let key = edge_key(v, next);
                let edge_id = match edge_ids.get(&key) {
                    Some(&id) => id,
                    None => {
                        let id = edges.len();
                        edges.push(EdgeRecord::new(key));
                        edge_ids.insert(key, id);

                        vertex_edges[key.0 as usize].push(id);
                        if key.0 != key.1 {
                            vertex_edges[key.1 as usize].push(id);
                            vertex_neighbors[v as usize].push(next);
                            vertex_neighbors[next as usize].push(v);
                        }
                        id
                    }
                };
                edges[edge_id].faces.push(face_idx);
                corner_edges.push(edge_id);
            }
            face_edges.push(corner_edges);
        }

        Ok(Self {
            edges,
            edge_ids,
            vertex_faces,
            vertex_edges,
            vertex_neighbors,
            face_edges,
        })
    }

    /// All unique edges in first-seen order.
    #[inline]
    #[must_use]
    pub fn edges(&self) -> &[EdgeRecord] {
        &self.edges
    }

    /// Get the total number of edges.
    #[inline]
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Position of an edge in [`MeshAdjacency::edges`].
    ///
    /// Returns `None` if the edge doesn't exist in the mesh.
    #[must_use]
    pub fn edge_id(&self, v0: u32, v1: u32) -> Option<usize> {
        self.edge_ids.get(&edge_key(v0, v1)).copied()
    }

    /// Look up an edge in either direction.
    #[must_use]
    pub fn edge(&self, v0: u32, v1: u32) -> Option<&EdgeRecord> {
        self.edge_id(v0, v1).map(|id| &self.edges[id])
    }

    /// Edge ids around face `face`, one per corner.
    ///
    /// Entry `i` is the edge from corner `i` to corner `i + 1` (wrapping), so
    /// the slice is parallel to the face's index list. Empty for a face index
    /// the adjacency was not built with.
    #[must_use]
    pub fn face_edges(&self, face: usize) -> &[usize] {
        self.face_edges.get(face).map_or(&[], SmallVec::as_slice)
    }

    /// Get faces adjacent to a vertex.
    ///
    /// Returns an empty slice if the vertex has no adjacent faces.
    #[must_use]
    pub fn faces_for_vertex(&self, v: u32) -> &[usize] {
        self.vertex_faces.get(v as usize).map_or(&[], Vec::as_slice)
    }

    /// Distinct vertices connected to `v` by a face edge.
    #[must_use]
    pub fn neighbors(&self, v: u32) -> &[u32] {
        self.vertex_neighbors
            .get(v as usize)
            .map_or(&[], Vec::as_slice)
    }

    /// Ids of the edges incident to `v`.
    #[must_use]
    pub fn edge_ids_for_vertex(&self, v: u32) -> &[usize] {
        self.vertex_edges.get(v as usize).map_or(&[], Vec::as_slice)
    }

    /// Edges incident to `v`.
    pub fn edges_for_vertex(&self, v: u32) -> impl Iterator<Item = &EdgeRecord> + '_ {
        self.edge_ids_for_vertex(v)
            .iter()
            .map(|&id| &self.edges[id])
    }

    /// Other endpoints of the boundary edges incident to `v`.
    #[must_use]
    pub fn boundary_neighbors(&self, v: u32) -> SmallVec<[u32; 2]> {
        self.edges_for_vertex(v)
            .filter(|edge| edge.is_boundary())
            .map(|edge| edge.other(v))
            .collect()
    }

    /// Count the number of boundary edges.
    #[must_use]
    pub fn boundary_edge_count(&self) -> usize {
        self.edges.iter().filter(|edge| edge.is_boundary()).count()
    }

    /// Iterate over all non-manifold edges (edges with more than two adjacent faces).
    pub fn non_manifold_edges(&self) -> impl Iterator<Item = &EdgeRecord> + '_ {
        self.edges.iter().filter(|edge| edge.face_count() > 2)
    }

    /// Check if the mesh is manifold (all edges have at most 2 adjacent faces).
    #[must_use]
    pub fn is_manifold(&self) -> bool {
        self.non_manifold_edges().next().is_none()
    }

    /// Check if the mesh is closed (no boundary edges).
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.edges.iter().all(|edge| edge.face_count() >= 2)
    }

    /// Fail on the first edge (in first-seen order) shared by more than two faces.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::NonManifoldEdge`] for the first offending edge.
    pub fn require_manifold(&self) -> MeshResult<()> {
        match self.non_manifold_edges().next() {
            Some(edge) => Err(MeshError::NonManifoldEdge {
                v0: edge.v0,
                v1: edge.v1,
                faces: edge.face_count(),
            }),
            None => Ok(()),
        }
    }

    /// Get the number of vertices the adjacency was built for.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertex_faces.len()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn single_triangle() -> Vec<[u32; 3]> {
        vec![[0, 1, 2]]
    }

    fn two_triangles_sharing_edge() -> Vec<[u32; 3]> {
        vec![[0, 1, 2], [1, 3, 2]]
    }

    fn non_manifold_edge() -> Vec<[u32; 3]> {
        // Three triangles sharing the same edge (0, 1)
        vec![[0, 1, 2], [0, 1, 3], [0, 1, 4]]
    }

    fn quad_strip() -> Vec<Vec<u32>> {
        // 0--1--2
        // |  |  |
        // 3--4--5
        vec![vec![0, 3, 4, 1], vec![1, 4, 5, 2]]
    }

    #[test]
    fn build_single_triangle() {
        let adj = MeshAdjacency::build(3, &single_triangle()).unwrap();

        assert_eq!(adj.edge_count(), 3);
        assert_eq!(adj.vertex_count(), 3);
        assert_eq!(adj.boundary_edge_count(), 3);
        assert!(!adj.is_closed());
    }

    #[test]
    fn edges_in_first_seen_order() {
        let adj = MeshAdjacency::build(4, &two_triangles_sharing_edge()).unwrap();
        let keys: Vec<_> = adj.edges().iter().map(EdgeRecord::key).collect();
        assert_eq!(keys, vec![(0, 1), (1, 2), (0, 2), (1, 3), (2, 3)]);
    }

    #[test]
    fn shared_edge_records_both_faces() {
        let adj = MeshAdjacency::build(4, &two_triangles_sharing_edge()).unwrap();

        let shared = adj.edge(2, 1).unwrap();
        assert!(shared.is_interior());
        assert_eq!(shared.faces.as_slice(), &[0, 1]);

        let boundary = adj.edge(0, 1).unwrap();
        assert!(boundary.is_boundary());
        assert!(adj.edge(0, 3).is_none());
    }

    #[test]
    fn face_edges_follow_corners() {
        let adj = MeshAdjacency::build(4, &two_triangles_sharing_edge()).unwrap();

        // Edges (0,1), (1,2), (2,0) then (1,3), (3,2), (2,1)
        assert_eq!(adj.face_edges(0), &[0, 1, 2]);
        assert_eq!(adj.face_edges(1), &[3, 4, 1]);
        assert!(adj.face_edges(2).is_empty());

        let mut around_two = adj.edge_ids_for_vertex(2).to_vec();
        around_two.sort_unstable();
        assert_eq!(around_two, vec![1, 2, 4]);
    }

    #[test]
    fn faces_for_vertex() {
        let adj = MeshAdjacency::build(4, &two_triangles_sharing_edge()).unwrap();

        assert_eq!(adj.faces_for_vertex(2), &[0, 1]);
        assert_eq!(adj.faces_for_vertex(0), &[0]);
        assert!(adj.faces_for_vertex(99).is_empty());
    }

    #[test]
    fn neighbors_are_deduplicated() {
        let adj = MeshAdjacency::build(6, &quad_strip()).unwrap();

        // Vertex 1 touches both quads but each neighbour appears once.
        let mut n = adj.neighbors(1).to_vec();
        n.sort_unstable();
        assert_eq!(n, vec![0, 2, 4]);

        // Quad diagonals are not edges.
        assert!(!adj.neighbors(0).contains(&4));
    }

    #[test]
    fn boundary_neighbors_of_strip() {
        let adj = MeshAdjacency::build(6, &quad_strip()).unwrap();

        let mut b = adj.boundary_neighbors(1).to_vec();
        b.sort_unstable();
        assert_eq!(b, vec![0, 2]);
        assert_eq!(adj.boundary_neighbors(4).len(), 2);
        assert_eq!(adj.edge(1, 4).map(EdgeRecord::face_count), Some(2));
    }

    #[test]
    fn non_manifold_detection() {
        let adj = MeshAdjacency::build(5, &non_manifold_edge()).unwrap();

        assert_eq!(adj.non_manifold_edges().count(), 1);
        assert!(!adj.is_manifold());
        assert_eq!(
            adj.require_manifold(),
            Err(MeshError::NonManifoldEdge {
                v0: 0,
                v1: 1,
                faces: 3
            })
        );
    }

    #[test]
    fn manifold_mesh() {
        let adj = MeshAdjacency::build(4, &two_triangles_sharing_edge()).unwrap();
        assert!(adj.is_manifold());
        assert!(adj.require_manifold().is_ok());
    }

    #[test]
    fn rejects_invalid_faces() {
        assert_eq!(
            MeshAdjacency::build(3, &[vec![0u32, 1]]).unwrap_err(),
            MeshError::DegenerateFace { face: 0, len: 2 }
        );
        assert_eq!(
            MeshAdjacency::build(3, &[[0u32, 1, 3]]).unwrap_err(),
            MeshError::IndexOutOfRange {
                face: 0,
                index: 3,
                vertex_count: 3
            }
        );
    }

    #[test]
    fn isolated_vertex_has_nothing() {
        let adj = MeshAdjacency::build(4, &single_triangle()).unwrap();
        assert!(adj.neighbors(3).is_empty());
        assert!(adj.faces_for_vertex(3).is_empty());
        assert_eq!(adj.edges_for_vertex(3).count(), 0);
    }

    #[test]
    fn edge_other_endpoint() {
        let adj = MeshAdjacency::build(3, &single_triangle()).unwrap();
        let edge = adj.edge(1, 0).unwrap();
        assert_eq!(edge.other(0), 1);
        assert_eq!(edge.other(1), 0);
    }
}
