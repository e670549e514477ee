//! Iteration driver.

use std::time::Instant;

use mesh_types::PolyMesh;
use tracing::{debug, info};

use crate::catmull_clark::subdivide_catmull_clark;
use crate::error::{SubdivideError, SubdivideResult};
use crate::loop_subdivision::subdivide_loop;
use crate::params::{SubdivideParams, SubdivisionMethod};
use crate::progress::{Progress, ProgressCallback};
use crate::result::{IterationStats, SubdivisionResult};

/// Subdivide a mesh using the specified parameters.
///
/// The input mesh is never modified. Each iteration is applied to the
/// previous iteration's output; nothing else is carried between them.
/// With `iterations == 0` the result is a copy with refreshed normals.
///
/// # Errors
///
/// Returns an error if:
/// - The mesh is empty (no vertices or faces)
/// - The resulting mesh would exceed `max_faces`
/// - Loop is chosen for non-triangle input without `triangulate_polygons`
/// - The mesh is malformed or non-manifold
///
/// # Examples
///
/// ```
/// use mesh_types::unit_cube;
/// use mesh_subdivide::{subdivide_mesh, SubdivideParams};
///
/// let params = SubdivideParams::catmull_clark().with_iterations(2);
/// let result = subdivide_mesh(&unit_cube(), &params)?;
///
/// // 6 quads -> 24 -> 96
/// assert_eq!(result.final_faces, 96);
/// assert!(result.mesh.is_quad_mesh());
/// # Ok::<(), mesh_subdivide::SubdivideError>(())
/// ```
///
/// Loop subdivision of a quad mesh, triangulating it first:
///
/// ```
/// use mesh_types::unit_cube;
/// use mesh_subdivide::{subdivide_mesh, SubdivideParams};
///
/// let params = SubdivideParams::loop_subdivision().with_triangulate_polygons(true);
/// let result = subdivide_mesh(&unit_cube(), &params)?;
///
/// // 12 fan triangles, each split in 4
/// assert_eq!(result.final_faces, 48);
/// # Ok::<(), mesh_subdivide::SubdivideError>(())
/// ```
pub fn subdivide_mesh(
    mesh: &PolyMesh,
    params: &SubdivideParams,
) -> SubdivideResult<SubdivisionResult> {
    subdivide_mesh_with_progress(mesh, params, None)
}

/// Subdivide a mesh, reporting progress after every iteration.
///
/// If the callback returns `false` after an iteration that is not the last,
/// the remaining iterations are skipped and
/// [`SubdivideError::Cancelled`] is returned. An iteration in flight is
/// always finished.
///
/// # Errors
///
/// Same as [`subdivide_mesh`], plus [`SubdivideError::Cancelled`].
pub fn subdivide_mesh_with_progress(
    mesh: &PolyMesh,
    params: &SubdivideParams,
    callback: Option<&ProgressCallback>,
) -> SubdivideResult<SubdivisionResult> {
    // Validate input
    if mesh.vertices.is_empty() {
        return Err(SubdivideError::EmptyMesh);
    }
    if mesh.faces.is_empty() {
        return Err(SubdivideError::NoFaces);
    }

    let original_faces = mesh.faces.len();
    let original_vertices = mesh.vertices.len();

    if params.iterations == 0 {
        return Ok(SubdivisionResult::unchanged(mesh.with_normals()?, params.method));
    }

    // Check projected size
    if let Some(max) = params.max_faces {
        let projected = params.projected_faces(mesh);
        if projected > max {
            return Err(SubdivideError::MeshTooLarge {
                current: original_faces,
                projected,
                max,
            });
        }
    }

    let triangulate = params.method == SubdivisionMethod::Loop
        && params.triangulate_polygons
        && !mesh.is_triangle_mesh();
    let fan;
    let source = if triangulate {
        fan = mesh.triangulated();
        debug!(
            faces = mesh.faces.len(),
            triangles = fan.faces.len(),
            "triangulated polygon input for Loop subdivision"
        );
        &fan
    } else {
        mesh
    };

    debug!(
        faces = original_faces,
        vertices = original_vertices,
        iterations = params.iterations,
        method = ?params.method,
        "subdividing mesh"
    );

    let start = Instant::now();
    let mut steps = Vec::with_capacity(params.iterations as usize);
    let mut current = subdivide_once(source, params)?;
    for i in 1..=params.iterations {
        if i > 1 {
            current = subdivide_once(&current, params)?;
        }
        let step = IterationStats {
            faces: current.faces.len(),
            vertices: current.vertices.len(),
            elapsed: start.elapsed(),
        };
        steps.push(step);
        debug!(
            iteration = i,
            faces = current.faces.len(),
            vertices = current.vertices.len(),
            "subdivision iteration complete"
        );

        if let Some(cb) = callback {
            let progress = Progress {
                current: i,
                total: params.iterations,
                faces: step.faces,
                vertices: step.vertices,
                elapsed: step.elapsed,
            };
            if !cb(&progress) && i < params.iterations {
                info!(completed = i, "subdivision cancelled");
                return Err(SubdivideError::Cancelled { completed: i });
            }
        }
    }

    Ok(SubdivisionResult {
        final_faces: current.faces.len(),
        final_vertices: current.vertices.len(),
        mesh: current,
        original_faces,
        original_vertices,
        iterations: params.iterations,
        method: params.method,
        triangulated: triangulate,
        steps,
    })
}

/// Perform a single subdivision iteration.
fn subdivide_once(mesh: &PolyMesh, params: &SubdivideParams) -> SubdivideResult<PolyMesh> {
    match params.method {
        SubdivisionMethod::CatmullClark => subdivide_catmull_clark(mesh, params.edge_average),
        SubdivisionMethod::Loop => subdivide_loop(mesh),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::params::EdgeAverage;
    use approx::assert_relative_eq;
    use mesh_types::{MeshError, Point3, unit_cube, unit_quad, unit_triangle};
    use std::sync::Mutex;

    #[test]
    fn empty_mesh_errors() {
        let err = subdivide_mesh(&PolyMesh::new(), &SubdivideParams::default()).unwrap_err();
        assert_eq!(err, SubdivideError::EmptyMesh);

        let mut no_faces = PolyMesh::new();
        no_faces.vertices.push(Point3::origin());
        let err = subdivide_mesh(&no_faces, &SubdivideParams::default()).unwrap_err();
        assert_eq!(err, SubdivideError::NoFaces);
    }

    #[test]
    fn zero_iterations_refreshes_normals() {
        let mut quad = unit_quad();
        quad.normals.clear();
        let result = subdivide_mesh(&quad, &SubdivideParams::new().with_iterations(0)).unwrap();

        assert_eq!(result.iterations, 0);
        assert!(!result.was_subdivided());
        assert_eq!(result.mesh.vertices, quad.vertices);
        assert_eq!(result.mesh.normals.len(), 4);
        assert!(quad.normals.is_empty());
    }

    #[test]
    fn cube_catmull_clark() {
        let result = subdivide_mesh(&unit_cube(), &SubdivideParams::catmull_clark()).unwrap();
        assert_eq!(result.final_vertices, 26);
        assert_eq!(result.final_faces, 24);
        assert_eq!(result.original_faces, 6);
        assert!(result.was_subdivided());
        assert_relative_eq!(result.face_ratio(), 4.0);
    }

    #[test]
    fn iterations_compound() {
        let params = SubdivideParams::catmull_clark().with_iterations(3);
        let result = subdivide_mesh(&unit_cube(), &params).unwrap();
        assert_eq!(result.final_faces, 6 * 4 * 4 * 4);
        assert_eq!(result.final_faces, params.projected_faces(&unit_cube()));
        // Closed quad mesh: V = F + 2 by Euler with E = 2F.
        assert_eq!(result.final_vertices, result.final_faces + 2);
    }

    #[test]
    fn loop_iterations() {
        let params = SubdivideParams::loop_subdivision().with_iterations(2);
        let result = subdivide_mesh(&unit_triangle(), &params).unwrap();
        assert_eq!(result.final_faces, 16);
        assert_eq!(result.final_vertices, 15);
        assert!(!result.triangulated);
    }

    #[test]
    fn loop_rejects_quads_by_default() {
        let err = subdivide_mesh(&unit_cube(), &SubdivideParams::loop_subdivision()).unwrap_err();
        assert!(matches!(err, SubdivideError::UnsupportedTopology { len: 4, .. }));
    }

    #[test]
    fn loop_can_triangulate_first() {
        let cube = unit_cube();
        let params = SubdivideParams::loop_subdivision().with_triangulate_polygons(true);
        let result = subdivide_mesh(&cube, &params).unwrap();
        assert_eq!(result.original_faces, 6);
        assert_eq!(result.final_faces, 48);
        assert_eq!(result.final_vertices, 8 + 18);
        assert!(result.mesh.is_triangle_mesh());
        assert!(result.triangulated);
        // Input is untouched.
        assert!(cube.is_quad_mesh());
    }

    #[test]
    fn max_faces_guard() {
        let params = SubdivideParams::catmull_clark()
            .with_iterations(2)
            .with_max_faces(50);
        let err = subdivide_mesh(&unit_cube(), &params).unwrap_err();
        assert_eq!(
            err,
            SubdivideError::MeshTooLarge {
                current: 6,
                projected: 96,
                max: 50
            }
        );

        let ok = params.with_max_faces(96);
        assert!(subdivide_mesh(&unit_cube(), &ok).is_ok());
    }

    #[test]
    fn topology_errors_surface() {
        let mut quad = unit_quad();
        quad.vertices.push(Point3::new(9.0, 9.0, 9.0));
        let err = subdivide_mesh(&quad, &SubdivideParams::default()).unwrap_err();
        assert_eq!(
            err,
            SubdivideError::Topology(MeshError::IsolatedVertex { vertex: 4 })
        );
    }

    #[test]
    fn edge_average_choice_changes_result() {
        let midpoints = subdivide_mesh(&unit_cube(), &SubdivideParams::catmull_clark()).unwrap();
        let edge_points = subdivide_mesh(
            &unit_cube(),
            &SubdivideParams::catmull_clark().with_edge_average(EdgeAverage::EdgePoints),
        )
        .unwrap();
        assert_eq!(midpoints.final_vertices, edge_points.final_vertices);
        assert!((midpoints.mesh.vertices[0] - edge_points.mesh.vertices[0]).norm() > 1e-3);
    }

    #[test]
    fn progress_reports_each_iteration() {
        let seen = std::sync::Arc::new(Mutex::new(Vec::new()));
        let sink = std::sync::Arc::clone(&seen);
        let callback: ProgressCallback = Box::new(move |p| {
            sink.lock().unwrap().push((p.current, p.total, p.faces));
            true
        });

        let params = SubdivideParams::catmull_clark().with_iterations(3);
        let result = subdivide_mesh_with_progress(&unit_cube(), &params, Some(&callback)).unwrap();

        assert_eq!(result.final_faces, 384);
        assert_eq!(
            *seen.lock().unwrap(),
            vec![(1, 3, 24), (2, 3, 96), (3, 3, 384)]
        );

        // The result keeps the same per-iteration counts.
        let steps: Vec<_> = result.steps.iter().map(|s| (s.faces, s.vertices)).collect();
        assert_eq!(steps, vec![(24, 26), (96, 98), (384, 386)]);
        assert!(result.steps.windows(2).all(|w| w[0].elapsed <= w[1].elapsed));
        assert_eq!(result.elapsed(), result.steps[2].elapsed);
    }

    #[test]
    fn cancel_between_iterations() {
        let callback: ProgressCallback = Box::new(|p| p.current < 2);
        let params = SubdivideParams::catmull_clark().with_iterations(5);
        let err = subdivide_mesh_with_progress(&unit_cube(), &params, Some(&callback)).unwrap_err();
        assert_eq!(err, SubdivideError::Cancelled { completed: 2 });
    }

    #[test]
    fn cancel_after_last_iteration_is_ignored() {
        let callback: ProgressCallback = Box::new(|_| false);
        let params = SubdivideParams::catmull_clark();
        let result = subdivide_mesh_with_progress(&unit_cube(), &params, Some(&callback)).unwrap();
        assert_eq!(result.final_faces, 24);
    }
}
