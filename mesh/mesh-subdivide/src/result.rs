//! Outcome of a subdivision run.

// Face counts don't overflow in practice
#![allow(clippy::cast_precision_loss)]

use std::time::Duration;

use mesh_types::PolyMesh;

use crate::params::SubdivisionMethod;

/// Mesh size after one iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IterationStats {
    /// Faces produced by the iteration.
    pub faces: usize,
    /// Vertices produced by the iteration.
    pub vertices: usize,
    /// Time since the run started when the iteration finished.
    pub elapsed: Duration,
}

/// Result of mesh subdivision.
///
/// The refined mesh plus the counts a viewer shows after a run. The source
/// mesh is not kept; callers that want a "reset" hold on to their own copy.
///
/// # Example
///
/// ```
/// use mesh_types::unit_cube;
/// use mesh_subdivide::{subdivide_mesh, SubdivideParams};
///
/// let result = subdivide_mesh(&unit_cube(), &SubdivideParams::new().with_iterations(2))?;
/// let faces: Vec<usize> = result.steps.iter().map(|s| s.faces).collect();
/// assert_eq!(faces, vec![24, 96]);
///
/// // Hand the mesh on without cloning it
/// let mesh = result.into_mesh();
/// assert!(mesh.is_quad_mesh());
/// # Ok::<(), mesh_subdivide::SubdivideError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SubdivisionResult {
    /// The subdivided mesh.
    pub mesh: PolyMesh,

    /// Face count of the input, before any triangulation.
    pub original_faces: usize,

    /// Face count of `mesh`.
    pub final_faces: usize,

    /// Vertex count of the input.
    pub original_vertices: usize,

    /// Vertex count of `mesh`.
    pub final_vertices: usize,

    /// Number of iterations performed.
    pub iterations: u32,

    /// Scheme that produced `mesh`.
    pub method: SubdivisionMethod,

    /// Whether polygon input was fan-triangulated before Loop ran.
    pub triangulated: bool,

    /// One entry per iteration, in order.
    pub steps: Vec<IterationStats>,
}

impl SubdivisionResult {
    /// A run that performed no iterations; `mesh` is the (renormalized) input.
    #[must_use]
    pub fn unchanged(mesh: PolyMesh, method: SubdivisionMethod) -> Self {
        let faces = mesh.faces.len();
        let vertices = mesh.vertices.len();
        Self {
            mesh,
            original_faces: faces,
            final_faces: faces,
            original_vertices: vertices,
            final_vertices: vertices,
            iterations: 0,
            method,
            triangulated: false,
            steps: Vec::new(),
        }
    }

    /// Get the face multiplication factor.
    #[must_use]
    pub fn face_ratio(&self) -> f64 {
        ratio(self.final_faces, self.original_faces)
    }

    /// Get the vertex multiplication factor.
    #[must_use]
    pub fn vertex_ratio(&self) -> f64 {
        ratio(self.final_vertices, self.original_vertices)
    }

    /// Check if any subdivision occurred.
    #[must_use]
    pub const fn was_subdivided(&self) -> bool {
        self.iterations > 0 && self.final_faces > self.original_faces
    }

    /// Wall time of the whole run, zero if nothing ran.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.steps.last().map_or(Duration::ZERO, |s| s.elapsed)
    }

    /// Take the subdivided mesh, dropping the statistics.
    #[must_use]
    pub fn into_mesh(self) -> PolyMesh {
        self.mesh
    }
}

fn ratio(after: usize, before: usize) -> f64 {
    if before == 0 {
        1.0
    } else {
        after as f64 / before as f64
    }
}

impl std::fmt::Display for SubdivisionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Subdivision ({:?}{}): {} → {} faces ({:.1}x), {} → {} vertices, {} iterations",
            self.method,
            if self.triangulated { ", triangulated" } else { "" },
            self.original_faces,
            self.final_faces,
            self.face_ratio(),
            self.original_vertices,
            self.final_vertices,
            self.iterations
        )
    }
}
