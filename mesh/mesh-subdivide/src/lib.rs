//! Mesh subdivision algorithms.
//!
//! This crate refines [`PolyMesh`](mesh_types::PolyMesh) surfaces with two
//! schemes:
//!
//! - **Catmull-Clark**: accepts any polygon mesh; every k-gon becomes k quads
//! - **Loop**: triangle meshes only; every triangle becomes 4
//!
//! Both engines rebuild adjacency from the current face list, never mutate
//! their input, and re-estimate vertex normals on the output.
//!
//! # Examples
//!
//! Catmull-Clark on a cube:
//!
//! ```
//! use mesh_types::unit_cube;
//! use mesh_subdivide::{subdivide_mesh, SubdivideParams};
//!
//! let cube = unit_cube();
//! let result = subdivide_mesh(&cube, &SubdivideParams::catmull_clark())?;
//!
//! // 8 repositioned vertices + 12 edge points + 6 face points
//! assert_eq!(result.final_vertices, 26);
//! assert_eq!(result.final_faces, 24);
//! # Ok::<(), mesh_subdivide::SubdivideError>(())
//! ```
//!
//! Loop subdivision for smooth triangle surfaces:
//!
//! ```
//! use mesh_types::unit_triangle;
//! use mesh_subdivide::{subdivide_mesh, SubdivideParams};
//!
//! let params = SubdivideParams::loop_subdivision().with_iterations(2);
//! let result = subdivide_mesh(&unit_triangle(), &params)?;
//!
//! // 1 * 4^2 = 16 faces after 2 iterations
//! assert_eq!(result.final_faces, 16);
//! # Ok::<(), mesh_subdivide::SubdivideError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod catmull_clark;
mod error;
mod loop_subdivision;
mod params;
mod progress;
mod result;
mod subdivide;

pub use catmull_clark::subdivide_catmull_clark;
pub use error::{SubdivideError, SubdivideResult};
pub use loop_subdivision::{loop_beta, subdivide_loop};
pub use params::{EdgeAverage, MethodAdvice, SubdivideParams, SubdivisionMethod};
pub use progress::{Progress, ProgressCallback};
pub use result::{IterationStats, SubdivisionResult};
pub use subdivide::{subdivide_mesh, subdivide_mesh_with_progress};
