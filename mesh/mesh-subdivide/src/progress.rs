//! Progress reporting and cancellation between subdivision iterations.
//!
//! # Example
//!
//! ```
//! use mesh_types::unit_cube;
//! use mesh_subdivide::{subdivide_mesh_with_progress, ProgressCallback, SubdivideParams};
//!
//! let callback: ProgressCallback = Box::new(|progress| {
//!     assert!(progress.faces > 0);
//!     progress.current < 2 // stop after the second iteration
//! });
//!
//! let params = SubdivideParams::catmull_clark().with_iterations(4);
//! let err = subdivide_mesh_with_progress(&unit_cube(), &params, Some(&callback)).unwrap_err();
//! assert!(err.to_string().contains("2 iteration"));
//! ```

use std::time::Duration;

/// Progress information passed to callbacks after each iteration.
#[derive(Debug, Clone)]
pub struct Progress {
    /// Iterations completed so far (1-based once reported).
    pub current: u32,

    /// Total number of iterations requested.
    pub total: u32,

    /// Face count of the mesh produced by the latest iteration.
    pub faces: usize,

    /// Vertex count of the mesh produced by the latest iteration.
    pub vertices: usize,

    /// Elapsed time since subdivision started.
    pub elapsed: Duration,
}

impl Progress {
    /// Create a new progress report.
    #[must_use]
    pub const fn new(current: u32, total: u32) -> Self {
        Self {
            current,
            total,
            faces: 0,
            vertices: 0,
            elapsed: Duration::ZERO,
        }
    }

    /// Get progress as a fraction (0.0 to 1.0).
    #[inline]
    #[must_use]
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            f64::from(self.current) / f64::from(self.total)
        }
    }

    /// Get progress as a percentage (0 to 100).
    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn percent(&self) -> u32 {
        (self.fraction() * 100.0).round() as u32
    }

    /// Check if the operation is complete.
    #[inline]
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.current >= self.total
    }
}

/// Callback function for progress reporting.
///
/// Returns `true` to continue, `false` to request cancellation.
pub type ProgressCallback = Box<dyn Fn(&Progress) -> bool + Send + Sync>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fraction_and_percent() {
        let p = Progress::new(1, 4);
        assert!((p.fraction() - 0.25).abs() < 1e-12);
        assert_eq!(p.percent(), 25);
        assert!(!p.is_complete());

        let done = Progress::new(4, 4);
        assert_eq!(done.percent(), 100);
        assert!(done.is_complete());
    }

    #[test]
    fn zero_total_is_complete() {
        let p = Progress::new(0, 0);
        assert!((p.fraction() - 1.0).abs() < 1e-12);
        assert!(p.is_complete());
    }

    #[test]
    fn callback_can_cancel() {
        let callback: ProgressCallback = Box::new(|p| p.current < 3);
        assert!(callback(&Progress::new(2, 5)));
        assert!(!callback(&Progress::new(3, 5)));
    }
}
