//! Primitive and test-surface generators.
//!
//! Every generator returns a mesh with vertex normals already estimated.

use nalgebra::Point3;
use smallvec::smallvec;
use tracing::warn;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::mesh::{Face, PolyMesh};
use crate::normals::estimate_vertex_normals;

/// Create a unit cube from 8 vertices and 6 quads.
///
/// The cube spans from (0,0,0) to (1,1,1). Quads wind counter-clockwise
/// when viewed from outside.
///
/// # Example
///
/// ```
/// use mesh_types::{unit_cube, MeshTopology};
///
/// let cube = unit_cube();
/// assert_eq!(cube.vertex_count(), 8);
/// assert_eq!(cube.face_count(), 6);
/// assert!(cube.is_quad_mesh());
/// ```
#[must_use]
pub fn unit_cube() -> PolyMesh {
    let vertices = vec![
        Point3::new(0.0, 0.0, 0.0), // 0
        Point3::new(1.0, 0.0, 0.0), // 1
        Point3::new(1.0, 1.0, 0.0), // 2
        Point3::new(0.0, 1.0, 0.0), // 3
        Point3::new(0.0, 0.0, 1.0), // 4
        Point3::new(1.0, 0.0, 1.0), // 5
        Point3::new(1.0, 1.0, 1.0), // 6
        Point3::new(0.0, 1.0, 1.0), // 7
    ];

    let faces: Vec<Face> = vec![
        smallvec![0, 3, 2, 1], // bottom (z=0), -Z
        smallvec![4, 5, 6, 7], // top (z=1), +Z
        smallvec![0, 1, 5, 4], // front (y=0), -Y
        smallvec![3, 7, 6, 2], // back (y=1), +Y
        smallvec![0, 4, 7, 3], // left (x=0), -X
        smallvec![1, 2, 6, 5], // right (x=1), +X
    ];

    with_estimated_normals(PolyMesh::from_parts(vertices, faces))
}

/// Create a single unit quad in the XY plane, facing +Z.
#[must_use]
pub fn unit_quad() -> PolyMesh {
    let vertices = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(1.0, 1.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
    ];
    with_estimated_normals(PolyMesh::from_parts(vertices, vec![smallvec![0, 1, 2, 3]]))
}

/// Create the right triangle `(0,0,0), (1,0,0), (0,1,0)`, facing +Z.
#[must_use]
pub fn unit_triangle() -> PolyMesh {
    let vertices = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
    ];
    with_estimated_normals(PolyMesh::from_parts(vertices, vec![smallvec![0, 1, 2]]))
}

/// Sampling grid for [`height_field`].
///
/// Samples cover the half-open ranges `[x_min, x_max)` and `[y_min, y_max)`
/// at a spacing of `resolution`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeightFieldParams {
    /// Lower bound of the x range (inclusive).
    pub x_min: f64,
    /// Upper bound of the x range (exclusive).
    pub x_max: f64,
    /// Lower bound of the y range (inclusive).
    pub y_min: f64,
    /// Upper bound of the y range (exclusive).
    pub y_max: f64,
    /// Distance between neighbouring samples.
    pub resolution: f64,
}

impl Default for HeightFieldParams {
    fn default() -> Self {
        Self {
            x_min: -10.0,
            x_max: 10.0,
            y_min: -10.0,
            y_max: 10.0,
            resolution: 1.0,
        }
    }
}

impl HeightFieldParams {
    /// Create new parameters with default values (20 x 20 samples over `[-10, 10)`).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the x range.
    #[must_use]
    pub const fn with_x_range(mut self, min: f64, max: f64) -> Self {
        self.x_min = min;
        self.x_max = max;
        self
    }

    /// Set the y range.
    #[must_use]
    pub const fn with_y_range(mut self, min: f64, max: f64) -> Self {
        self.y_min = min;
        self.y_max = max;
        self
    }

    /// Set the sample spacing.
    #[must_use]
    pub const fn with_resolution(mut self, resolution: f64) -> Self {
        self.resolution = resolution;
        self
    }

    /// Number of samples along x and y.
    ///
    /// Returns `(0, 0)` for a non-positive or non-finite resolution.
    #[must_use]
    pub fn sample_counts(&self) -> (usize, usize) {
        if !(self.resolution.is_finite() && self.resolution > 0.0) {
            return (0, 0);
        }
        (
            samples_along(self.x_min, self.x_max, self.resolution),
            samples_along(self.y_min, self.y_max, self.resolution),
        )
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn samples_along(min: f64, max: f64, step: f64) -> usize {
    let span = (max - min) / step;
    if span.is_finite() && span > 0.0 {
        // Tolerate accumulated error in the span so [-10, 10) step 0.1 gives 200.
        // Any non-empty range still holds its first sample.
        ((span - 1e-9).ceil() as usize).max(1)
    } else {
        0
    }
}

/// Sample `z = f(x, y)` on a regular grid and triangulate it.
///
/// Vertices are laid out row by row (y outer, x inner). Every grid cell with
/// lower-left sample `i` yields the CCW triangles `(i, i+1, i+xs)` and
/// `(i+1, i+xs+1, i+xs)`, where `xs` is the row length. Non-finite samples,
/// such as points outside a sphere's domain, are clamped to `z = 0`.
///
/// A grid with fewer than two samples along either axis has no faces.
///
/// # Example
///
/// ```
/// use mesh_types::{height_field, HeightFieldParams, MeshTopology};
///
/// let params = HeightFieldParams::new().with_x_range(0.0, 3.0).with_y_range(0.0, 2.0);
/// let mesh = height_field(&params, |x, y| x + y);
///
/// assert_eq!(mesh.vertex_count(), 6);
/// assert_eq!(mesh.face_count(), 4);
/// assert!(mesh.is_triangle_mesh());
/// ```
#[must_use]
pub fn height_field<F>(params: &HeightFieldParams, f: F) -> PolyMesh
where
    F: Fn(f64, f64) -> f64,
{
    let (xs, ys) = params.sample_counts();
    let cells = xs.saturating_sub(1) * ys.saturating_sub(1);
    let mut mesh = PolyMesh::with_capacity(xs * ys, cells * 2);

    for row in 0..ys {
        #[allow(clippy::cast_precision_loss)]
        let y = params.y_min + row as f64 * params.resolution;
        for col in 0..xs {
            #[allow(clippy::cast_precision_loss)]
            let x = params.x_min + col as f64 * params.resolution;
            let z = f(x, y);
            mesh.vertices
                .push(Point3::new(x, y, if z.is_finite() { z } else { 0.0 }));
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    let stride = xs as u32;
    for row in 0..ys.saturating_sub(1) {
        for col in 0..xs.saturating_sub(1) {
            #[allow(clippy::cast_possible_truncation)]
            let i = (row * xs + col) as u32;
            mesh.faces.push(smallvec![i, i + 1, i + stride]);
            mesh.faces.push(smallvec![i + 1, i + stride + 1, i + stride]);
        }
    }

    with_estimated_normals(mesh)
}

/// Analytic test surfaces sampled by [`height_field`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Surface {
    /// The plane `z = 1`.
    Plane,
    /// The cone `z = sqrt(x^2 + y^2)`.
    Cone,
    /// Upper hemisphere of radius 10.
    Sphere,
    /// Upper half of the ellipsoid with semi-axes 6, 8 and 10.
    Ellipsoid,
    /// Elliptic paraboloid `x^2/16 + y^2/9`.
    Paraboloid,
    /// Saddle `x^2/16 - y^2/9`.
    HyperbolicParaboloid,
}

impl Surface {
    /// Every surface, in a fixed order.
    pub const ALL: [Self; 6] = [
        Self::Plane,
        Self::Cone,
        Self::Sphere,
        Self::Ellipsoid,
        Self::Paraboloid,
        Self::HyperbolicParaboloid,
    ];

    /// Height of the surface at `(x, y)`.
    ///
    /// Outside the domain of the sphere and ellipsoid this is `NaN`.
    #[must_use]
    pub fn eval(self, x: f64, y: f64) -> f64 {
        match self {
            Self::Plane => 1.0,
            Self::Cone => x.hypot(y),
            Self::Sphere => (100.0 - x * x - y * y).sqrt(),
            Self::Ellipsoid => ((1.0 - x * x / 36.0 - y * y / 64.0) * 100.0).sqrt(),
            Self::Paraboloid => x * x / 16.0 + y * y / 9.0,
            Self::HyperbolicParaboloid => x * x / 16.0 - y * y / 9.0,
        }
    }

    /// Lower-case identifier for the surface.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Plane => "plane",
            Self::Cone => "cone",
            Self::Sphere => "sphere",
            Self::Ellipsoid => "ellipsoid",
            Self::Paraboloid => "paraboloid",
            Self::HyperbolicParaboloid => "hyperbolic_paraboloid",
        }
    }

    /// Sample this surface into a triangle mesh.
    #[must_use]
    pub fn mesh(self, params: &HeightFieldParams) -> PolyMesh {
        height_field(params, |x, y| self.eval(x, y))
    }
}

/// Attach estimated normals to a generated mesh.
///
/// Generators only emit in-range faces with three or more corners, so
/// estimation cannot fail for them. A failure is logged and leaves the
/// normals empty, which [`PolyMesh::has_normals`] reports.
fn with_estimated_normals(mut mesh: PolyMesh) -> PolyMesh {
    match estimate_vertex_normals(&mesh.vertices, &mesh.faces) {
        Ok(normals) => mesh.normals = normals,
        Err(err) => warn!(%err, "generated mesh rejected by normal estimation"),
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MeshAdjacency, MeshTopology, Triangle};
    use approx::assert_relative_eq;

    #[test]
    fn cube_faces_wind_outward() {
        let cube = unit_cube();
        let center = Point3::new(0.5, 0.5, 0.5);
        for (fi, face) in cube.faces.iter().enumerate() {
            let tri = Triangle::new(
                cube.vertices[face[0] as usize],
                cube.vertices[face[1] as usize],
                cube.vertices[face[2] as usize],
            );
            let outward = cube
                .face_centroid(fi)
                .map_or_else(nalgebra::Vector3::zeros, |c| c - center);
            assert!(tri.normal_unnormalized().dot(&outward) > 0.0, "face {fi}");
        }
    }

    #[test]
    fn cube_is_closed_and_manifold() {
        let cube = unit_cube();
        let adjacency = MeshAdjacency::build(cube.vertex_count(), &cube.faces);
        assert!(adjacency.as_ref().is_ok_and(MeshAdjacency::is_closed));
        assert_eq!(cube.normals.len(), 8);
    }

    #[test]
    fn quad_and_triangle_face_up() {
        for mesh in [unit_quad(), unit_triangle()] {
            assert_eq!(mesh.normals.len(), mesh.vertex_count());
            for n in &mesh.normals {
                assert_relative_eq!(n.z, 1.0, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn default_grid_matches_generator_layout() {
        let params = HeightFieldParams::default();
        assert_eq!(params.sample_counts(), (20, 20));

        let mesh = Surface::Plane.mesh(&params);
        assert_eq!(mesh.vertex_count(), 400);
        assert_eq!(mesh.face_count(), 19 * 19 * 2);
        assert_eq!(mesh.faces[0].as_slice(), &[0, 1, 20]);
        assert_eq!(mesh.faces[1].as_slice(), &[1, 21, 20]);
        assert_relative_eq!(mesh.vertices[0], Point3::new(-10.0, -10.0, 1.0));
        assert_relative_eq!(mesh.vertices[399], Point3::new(9.0, 9.0, 1.0));
    }

    #[test]
    fn height_field_winds_up() {
        let mesh = Surface::Paraboloid.mesh(&HeightFieldParams::new());
        // Interior normals of a bowl point up.
        let center = 10 * 20 + 10;
        assert!(mesh.normals[center].z > 0.9);
        for tri in mesh.triangles().take(10) {
            assert!(tri.normal_unnormalized().z > 0.0);
        }
    }

    #[test]
    fn sphere_clamps_outside_domain() {
        let mesh = Surface::Sphere.mesh(&HeightFieldParams::new());
        // (-10, -10) lies outside the radius-10 disc.
        assert_relative_eq!(mesh.vertices[0].z, 0.0);
        assert!(mesh.vertices.iter().all(|p| p.z.is_finite()));
        assert!(Surface::Sphere.eval(-10.0, -10.0).is_nan());
    }

    #[test]
    fn surface_values() {
        assert_relative_eq!(Surface::Cone.eval(3.0, 4.0), 5.0);
        assert_relative_eq!(Surface::Sphere.eval(0.0, 0.0), 10.0);
        assert_relative_eq!(Surface::Ellipsoid.eval(0.0, 0.0), 10.0);
        assert_relative_eq!(Surface::Paraboloid.eval(4.0, 3.0), 2.0);
        assert_relative_eq!(Surface::HyperbolicParaboloid.eval(4.0, 3.0), 0.0);
        assert_eq!(Surface::ALL.len(), 6);
        assert_eq!(Surface::HyperbolicParaboloid.name(), "hyperbolic_paraboloid");
    }

    #[test]
    fn fractional_resolution() {
        let params = HeightFieldParams::new()
            .with_x_range(0.0, 1.0)
            .with_y_range(0.0, 1.0)
            .with_resolution(0.1);
        assert_eq!(params.sample_counts(), (10, 10));
    }

    #[test]
    fn degenerate_grid_has_no_faces() {
        let params = HeightFieldParams::new().with_x_range(0.0, 1.0);
        let mesh = height_field(&params, |_, _| 0.0);
        assert_eq!(mesh.vertex_count(), 20);
        assert_eq!(mesh.face_count(), 0);

        let bad = HeightFieldParams::new().with_resolution(0.0);
        assert!(height_field(&bad, |_, _| 0.0).vertices.is_empty());
    }

    #[test]
    fn tiny_range_keeps_first_sample() {
        let params = HeightFieldParams::new()
            .with_x_range(0.0, 2.0)
            .with_y_range(0.0, 1e-10);
        assert_eq!(params.sample_counts(), (2, 1));

        let mesh = height_field(&params, |x, _| x);
        assert_eq!(mesh.vertex_count(), 2);
        assert_eq!(mesh.face_count(), 0);

        // Empty and inverted ranges still have no samples.
        let empty = HeightFieldParams::new().with_y_range(1.0, 1.0);
        assert_eq!(empty.sample_counts(), (20, 0));
        let inverted = HeightFieldParams::new().with_x_range(1.0, 0.0);
        assert_eq!(inverted.sample_counts(), (0, 20));
    }

    #[test]
    fn generators_always_carry_normals() {
        let mut meshes = vec![unit_cube(), unit_quad(), unit_triangle()];
        let coarse = HeightFieldParams::new().with_resolution(5.0);
        meshes.extend(Surface::ALL.iter().map(|s| s.mesh(&coarse)));
        let single_column = HeightFieldParams::new().with_x_range(0.0, 1.0);
        meshes.push(height_field(&single_column, |_, _| 0.0));

        for mesh in &meshes {
            assert!(mesh.has_normals());
            assert_eq!(mesh.normals.len(), mesh.vertex_count());
        }
    }
}
