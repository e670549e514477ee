//! Indexed polygon mesh.

use hashbrown::HashSet;
use nalgebra::{Point3, Vector3};
use smallvec::SmallVec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::adjacency::edge_key;
use crate::error::{MeshError, MeshResult};
use crate::export::{MeshExport, fan_triangulate};
use crate::normals::{NormalParams, estimate_vertex_normals, estimate_vertex_normals_with};
use crate::{Aabb, MeshBounds, MeshTopology, Triangle};

/// A polygon as an ordered list of vertex indices.
///
/// Faces of every arity share this one type. Triangles and quads fit
/// inline; larger polygons spill to the heap.
pub type Face = SmallVec<[u32; 4]>;

/// An indexed polygon mesh.
///
/// Faces reference vertices by index and may have any arity of at least
/// three. `normals` runs parallel to `vertices` once estimated.
///
/// # Memory Layout
///
/// - `vertices`: `Vec<Point3<f64>>` - Vertex positions, in load-bearing order
/// - `faces`: `Vec<Face>` - Polygons as vertex indices
/// - `normals`: `Vec<Vector3<f64>>` - Per-vertex unit normals (empty until estimated)
///
/// # Winding Order
///
/// Faces use **counter-clockwise (CCW) winding** when viewed from outside.
///
/// # Example
///
/// ```
/// use mesh_types::{PolyMesh, Point3, MeshTopology};
///
/// let mesh = PolyMesh::from_polygons(
///     vec![
///         Point3::new(0.0, 0.0, 0.0),
///         Point3::new(1.0, 0.0, 0.0),
///         Point3::new(1.0, 1.0, 0.0),
///         Point3::new(0.0, 1.0, 0.0),
///     ],
///     [[0u32, 1, 2, 3]],
/// )?;
///
/// assert_eq!(mesh.vertex_count(), 4);
/// assert_eq!(mesh.face_count(), 1);
/// assert!(mesh.has_normals());
/// assert!(!mesh.is_triangle_mesh());
/// # Ok::<(), mesh_types::MeshError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PolyMesh {
    /// Vertex positions.
    pub vertices: Vec<Point3<f64>>,

    /// Polygons as indices into the vertex array, CCW winding.
    pub faces: Vec<Face>,

    /// Per-vertex normals, parallel to `vertices` once estimated.
    pub normals: Vec<Vector3<f64>>,
}

impl PolyMesh {
    /// Create a new empty mesh.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::{PolyMesh, MeshTopology};
    ///
    /// let mesh = PolyMesh::new();
    /// assert!(mesh.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
            normals: Vec::new(),
        }
    }

    /// Create a mesh with pre-allocated capacity.
    #[inline]
    #[must_use]
    pub fn with_capacity(vertex_count: usize, face_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            faces: Vec::with_capacity(face_count),
            normals: Vec::with_capacity(vertex_count),
        }
    }

    /// Create a mesh from vertices and faces without validation.
    ///
    /// Normals are left empty. Use [`PolyMesh::from_polygons`] to validate
    /// the faces and estimate normals in one step.
    #[inline]
    #[must_use]
    pub const fn from_parts(vertices: Vec<Point3<f64>>, faces: Vec<Face>) -> Self {
        Self {
            vertices,
            faces,
            normals: Vec::new(),
        }
    }

    /// Build a mesh from parsed positions and polygons.
    ///
    /// The polygons are validated and vertex normals are estimated before
    /// the mesh is returned, so the result is ready for export.
    ///
    /// # Errors
    ///
    /// - [`MeshError::DegenerateFace`] if a polygon has fewer than 3 indices
    /// - [`MeshError::IndexOutOfRange`] if a polygon references a missing vertex
    pub fn from_polygons<I, F>(vertices: Vec<Point3<f64>>, polygons: I) -> MeshResult<Self>
    where
        I: IntoIterator<Item = F>,
        F: AsRef<[u32]>,
    {
        let faces = polygons
            .into_iter()
            .map(|polygon| Face::from_slice(polygon.as_ref()))
            .collect();
        let mut mesh = Self::from_parts(vertices, faces);
        mesh.normals = estimate_vertex_normals(&mesh.vertices, &mesh.faces)?;
        Ok(mesh)
    }

    /// Create a mesh from flat coordinates and polygon index lists.
    ///
    /// `positions` is `[x0, y0, z0, x1, y1, z1, ...]`. Returns an empty mesh
    /// if `positions.len()` is not divisible by 3. Faces are not validated
    /// and normals are left empty.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::{PolyMesh, MeshTopology};
    ///
    /// let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
    /// let mesh = PolyMesh::from_raw(&positions, &[&[0, 1, 2]]);
    /// assert_eq!(mesh.vertex_count(), 3);
    /// assert_eq!(mesh.face_count(), 1);
    /// ```
    #[must_use]
    pub fn from_raw(positions: &[f64], polygons: &[&[u32]]) -> Self {
        if positions.len() % 3 != 0 {
            return Self::new();
        }

        let vertices = positions
            .chunks_exact(3)
            .map(|c| Point3::new(c[0], c[1], c[2]))
            .collect();
        let faces = polygons.iter().map(|p| Face::from_slice(p)).collect();

        Self::from_parts(vertices, faces)
    }

    /// Check that every face has at least 3 indices, all in range.
    ///
    /// Faces are checked in order and the first failure is returned.
    ///
    /// # Errors
    ///
    /// - [`MeshError::DegenerateFace`] if a face has fewer than 3 indices
    /// - [`MeshError::IndexOutOfRange`] if a face references a missing vertex
    pub fn validate(&self) -> MeshResult<()> {
        self.faces
            .iter()
            .enumerate()
            .try_for_each(|(face_idx, face)| check_face(face_idx, face, self.vertices.len()))
    }

    /// Whether every face is a triangle.
    ///
    /// An empty face list counts as a triangle mesh.
    #[must_use]
    pub fn is_triangle_mesh(&self) -> bool {
        self.faces.iter().all(|face| face.len() == 3)
    }

    /// Whether every face is a quadrilateral.
    #[must_use]
    pub fn is_quad_mesh(&self) -> bool {
        self.faces.iter().all(|face| face.len() == 4)
    }

    /// Whether normals have been estimated for the current vertex set.
    #[inline]
    #[must_use]
    pub fn has_normals(&self) -> bool {
        !self.normals.is_empty() && self.normals.len() == self.vertices.len()
    }

    /// Return a copy of this mesh with freshly estimated normals.
    ///
    /// # Errors
    ///
    /// Returns an error if the faces fail [`PolyMesh::validate`].
    pub fn with_normals(&self) -> MeshResult<Self> {
        self.with_normals_params(&NormalParams::default())
    }

    /// Return a copy of this mesh with normals estimated using `params`.
    ///
    /// # Errors
    ///
    /// Returns an error if the faces fail [`PolyMesh::validate`].
    pub fn with_normals_params(&self, params: &NormalParams) -> MeshResult<Self> {
        let normals = estimate_vertex_normals_with(&self.vertices, &self.faces, params)?;
        Ok(Self {
            vertices: self.vertices.clone(),
            faces: self.faces.clone(),
            normals,
        })
    }

    /// Count the unique undirected edges.
    #[must_use]
    pub fn unique_edge_count(&self) -> usize {
        let mut edges = HashSet::new();
        for face in &self.faces {
            let k = face.len();
            for i in 0..k {
                edges.insert(edge_key(face[i], face[(i + 1) % k]));
            }
        }
        edges.len()
    }

    /// Total number of face corners (sum of face arities).
    #[must_use]
    pub fn corner_count(&self) -> usize {
        self.faces.iter().map(|face| face.len()).sum()
    }

    /// Mean of a face's vertex positions.
    ///
    /// Returns `None` if the face does not exist, is empty, or references a
    /// missing vertex.
    #[must_use]
    pub fn face_centroid(&self, face_index: usize) -> Option<Point3<f64>> {
        let face = self.faces.get(face_index)?;
        if face.is_empty() {
            return None;
        }
        let mut sum = Vector3::zeros();
        for &vi in face {
            sum += self.vertices.get(vi as usize)?.coords;
        }
        #[allow(clippy::cast_precision_loss)]
        let count = face.len() as f64;
        Some(Point3::from(sum / count))
    }

    /// Fan-triangulate every face into a flat index buffer.
    ///
    /// Each face `[f0, f1, ..., fk]` emits `(f0, fi, fi+1)` for
    /// `i in 1..k`. Triangles pass through unchanged.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::unit_quad;
    ///
    /// let quad = unit_quad();
    /// assert_eq!(quad.triangulate_indices(), vec![0, 1, 2, 0, 2, 3]);
    /// ```
    #[must_use]
    pub fn triangulate_indices(&self) -> Vec<u32> {
        fan_triangulate(&self.faces)
    }

    /// Return a copy of this mesh with every face fan-triangulated.
    ///
    /// Vertices and normals are copied unchanged.
    #[must_use]
    pub fn triangulated(&self) -> Self {
        let faces = self
            .triangulate_indices()
            .chunks_exact(3)
            .map(Face::from_slice)
            .collect();
        Self {
            vertices: self.vertices.clone(),
            faces,
            normals: self.normals.clone(),
        }
    }

    /// Flatten positions, normals and triangle indices for a renderer.
    #[must_use]
    pub fn export(&self) -> MeshExport {
        MeshExport::from_mesh(self)
    }

    /// Fan triangles of one face with resolved positions.
    fn face_triangles<'a>(&'a self, face: &'a Face) -> impl Iterator<Item = Triangle> + 'a {
        let vertices = &self.vertices;
        (1..face.len().saturating_sub(1)).map(move |i| {
            Triangle::new(
                vertices[face[0] as usize],
                vertices[face[i] as usize],
                vertices[face[i + 1] as usize],
            )
        })
    }
}

/// Check a single face against the vertex count.
pub(crate) fn check_face(face_idx: usize, face: &[u32], vertex_count: usize) -> MeshResult<()> {
    if face.len() < 3 {
        return Err(MeshError::DegenerateFace {
            face: face_idx,
            len: face.len(),
        });
    }
    if let Some(&index) = face.iter().find(|&&vi| vi as usize >= vertex_count) {
        return Err(MeshError::IndexOutOfRange {
            face: face_idx,
            index,
            vertex_count,
        });
    }
    Ok(())
}

impl MeshTopology for PolyMesh {
    #[inline]
    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    fn face_count(&self) -> usize {
        self.faces.len()
    }

    fn vertex(&self, index: usize) -> Option<&Point3<f64>> {
        self.vertices.get(index)
    }

    fn face(&self, index: usize) -> Option<&[u32]> {
        self.faces.get(index).map(Face::as_slice)
    }

    fn vertices(&self) -> impl Iterator<Item = &Point3<f64>> {
        self.vertices.iter()
    }

    fn faces(&self) -> impl Iterator<Item = &[u32]> {
        self.faces.iter().map(Face::as_slice)
    }

    fn triangles(&self) -> impl Iterator<Item = Triangle> {
        self.faces.iter().flat_map(|face| self.face_triangles(face))
    }
}

impl MeshBounds for PolyMesh {
    fn bounds(&self) -> Aabb {
        Aabb::from_points(self.vertices.iter())
    }
}
