//! Subdivision parameters.

use mesh_types::PolyMesh;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Subdivision algorithm to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SubdivisionMethod {
    /// Catmull-Clark subdivision - accepts any polygon mesh and produces quads.
    /// Each k-gon becomes k quadrilaterals.
    #[default]
    CatmullClark,

    /// Loop subdivision - smoothing subdivision for triangle meshes.
    /// Each triangle becomes 4 triangles.
    Loop,
}

impl SubdivisionMethod {
    /// Whether the scheme only accepts triangle input.
    #[must_use]
    pub const fn requires_triangles(&self) -> bool {
        matches!(self, Self::Loop)
    }

    /// Number of faces after one iteration on `mesh`.
    ///
    /// Loop assumes triangle input; polygon faces count as their fan
    /// triangles.
    #[must_use]
    pub fn faces_after_one(&self, mesh: &PolyMesh) -> usize {
        match self {
            Self::CatmullClark => mesh.corner_count(),
            Self::Loop => {
                mesh.faces.iter().map(|f| f.len().saturating_sub(2)).sum::<usize>() * 4
            }
        }
    }

    /// Advisory about applying this scheme to `mesh`, if any.
    ///
    /// Advice never blocks subdivision by itself; it mirrors the
    /// warnings an interactive front end shows before subdividing.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::{unit_cube, unit_triangle};
    /// use mesh_subdivide::{MethodAdvice, SubdivisionMethod};
    ///
    /// assert_eq!(
    ///     SubdivisionMethod::Loop.advise(&unit_cube()),
    ///     Some(MethodAdvice::LoopWillRejectPolygons),
    /// );
    /// assert_eq!(
    ///     SubdivisionMethod::CatmullClark.advise(&unit_triangle()),
    ///     Some(MethodAdvice::CatmullClarkOnTriangles),
    /// );
    /// assert_eq!(SubdivisionMethod::CatmullClark.advise(&unit_cube()), None);
    /// ```
    #[must_use]
    pub fn advise(&self, mesh: &PolyMesh) -> Option<MethodAdvice> {
        if mesh.faces.is_empty() {
            return None;
        }
        let triangles = mesh.is_triangle_mesh();
        match self {
            Self::Loop if !triangles => Some(MethodAdvice::LoopWillRejectPolygons),
            Self::CatmullClark if triangles => Some(MethodAdvice::CatmullClarkOnTriangles),
            _ => None,
        }
    }
}

/// Advisory returned by [`SubdivisionMethod::advise`] and
/// [`SubdivideParams::advise`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodAdvice {
    /// Loop was chosen for a mesh with non-triangular faces and will fail.
    LoopWillRejectPolygons,
    /// Loop was chosen for a mesh with non-triangular faces; they will be
    /// fan-triangulated first.
    LoopRequiresTriangulation,
    /// Catmull-Clark was chosen for a pure triangle mesh; Loop usually gives
    /// a better surface.
    CatmullClarkOnTriangles,
}

impl std::fmt::Display for MethodAdvice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::LoopWillRejectPolygons => {
                "mesh has non-triangular faces; Loop subdivision will be rejected"
            }
            Self::LoopRequiresTriangulation => {
                "mesh has non-triangular faces; Loop subdivision will force triangulation"
            }
            Self::CatmullClarkOnTriangles => {
                "mesh is a triangle mesh; Loop subdivision usually works better"
            }
        };
        f.write_str(text)
    }
}

/// Edge term used when repositioning interior Catmull-Clark vertices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EdgeAverage {
    /// `0.5 * v + 0.5 * mean(neighbours)`, the mean of the incident edge
    /// midpoints.
    #[default]
    Midpoints,

    /// Mean of the newly computed edge points of the incident edges.
    EdgePoints,
}

/// Parameters for mesh subdivision.
///
/// # Example
///
/// ```
/// use mesh_subdivide::{SubdivideParams, SubdivisionMethod};
///
/// let params = SubdivideParams::loop_subdivision()
///     .with_iterations(3)
///     .with_max_faces(1_000_000);
///
/// assert_eq!(params.method, SubdivisionMethod::Loop);
/// assert_eq!(params.expected_faces(12), 768);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubdivideParams {
    /// Subdivision method to use.
    pub method: SubdivisionMethod,

    /// Number of subdivision iterations. Zero returns the input with
    /// refreshed normals.
    pub iterations: u32,

    /// Maximum faces allowed in result. `None` means unlimited.
    pub max_faces: Option<usize>,

    /// Interior edge term for Catmull-Clark.
    pub edge_average: EdgeAverage,

    /// Fan-triangulate polygon input before Loop subdivision instead of
    /// rejecting it.
    pub triangulate_polygons: bool,
}

impl Default for SubdivideParams {
    fn default() -> Self {
        Self {
            method: SubdivisionMethod::default(),
            iterations: 1,
            max_faces: None,
            edge_average: EdgeAverage::default(),
            triangulate_polygons: false,
        }
    }
}

impl SubdivideParams {
    /// Create new parameters with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create parameters for Loop subdivision.
    #[must_use]
    pub fn loop_subdivision() -> Self {
        Self {
            method: SubdivisionMethod::Loop,
            ..Self::default()
        }
    }

    /// Create parameters for Catmull-Clark subdivision.
    #[must_use]
    pub fn catmull_clark() -> Self {
        Self {
            method: SubdivisionMethod::CatmullClark,
            ..Self::default()
        }
    }

    /// Set subdivision method.
    #[must_use]
    pub const fn with_method(mut self, method: SubdivisionMethod) -> Self {
        self.method = method;
        self
    }

    /// Set number of iterations.
    #[must_use]
    pub const fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set maximum faces allowed.
    #[must_use]
    pub const fn with_max_faces(mut self, max_faces: usize) -> Self {
        self.max_faces = Some(max_faces);
        self
    }

    /// Remove the face limit.
    #[must_use]
    pub const fn without_max_faces(mut self) -> Self {
        self.max_faces = None;
        self
    }

    /// Set the Catmull-Clark interior edge term.
    #[must_use]
    pub const fn with_edge_average(mut self, edge_average: EdgeAverage) -> Self {
        self.edge_average = edge_average;
        self
    }

    /// Set whether Loop fan-triangulates polygon input.
    #[must_use]
    pub const fn with_triangulate_polygons(mut self, triangulate: bool) -> Self {
        self.triangulate_polygons = triangulate;
        self
    }

    /// Advisory about applying these parameters to `mesh`, if any.
    #[must_use]
    pub fn advise(&self, mesh: &PolyMesh) -> Option<MethodAdvice> {
        match self.method.advise(mesh) {
            Some(MethodAdvice::LoopWillRejectPolygons) if self.triangulate_polygons => {
                Some(MethodAdvice::LoopRequiresTriangulation)
            }
            advice => advice,
        }
    }

    /// Calculate expected face count after subdivision, from a mesh whose
    /// first iteration yields `first_iteration_faces`.
    ///
    /// Every iteration after the first multiplies face count by 4, since
    /// both schemes emit only quads or only triangles from then on.
    /// Saturates at `usize::MAX`.
    #[must_use]
    pub const fn expected_faces_from(&self, first_iteration_faces: usize) -> usize {
        if self.iterations == 0 {
            return 0;
        }
        let mut faces = first_iteration_faces;
        let mut i = 1;
        while i < self.iterations {
            faces = faces.saturating_mul(4);
            i += 1;
        }
        faces
    }

    /// Calculate expected face count after subdivision of a uniform mesh
    /// of `current_faces` triangles or quads.
    ///
    /// Each subdivision iteration multiplies face count by 4.
    #[must_use]
    pub const fn expected_faces(&self, current_faces: usize) -> usize {
        if self.iterations == 0 {
            return current_faces;
        }
        self.expected_faces_from(current_faces.saturating_mul(4))
    }

    /// Projected face count after subdividing `mesh` with these parameters.
    #[must_use]
    pub fn projected_faces(&self, mesh: &PolyMesh) -> usize {
        if self.iterations == 0 {
            return mesh.faces.len();
        }
        self.expected_faces_from(self.method.faces_after_one(mesh))
    }
}
