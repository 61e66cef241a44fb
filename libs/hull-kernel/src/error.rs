//! # Error Types
//!
//! Error types for hull construction and post-processing.
//!
//! ## Error Policy
//!
//! - Malformed geometry is reported, never silently patched: the `try_*`
//!   constructors return these errors, while the plain constructors turn
//!   them into an empty hull.
//! - Internal invariant violations are not errors; they are checked by
//!   [`crate::hull::ConsistencyError`] and debug assertions.

use thiserror::Error;

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur while building or measuring a hull.
///
/// ## Example
///
/// ```rust
/// use glam::DVec3;
/// use hull_kernel::{Hull, HullError};
///
/// let points = [DVec3::ZERO, DVec3::X, DVec3::Y];
/// match Hull::try_from_points(&points, 0.0) {
///     Err(HullError::TooFewPoints { count, .. }) => assert_eq!(count, 3),
///     other => panic!("unexpected: {other:?}"),
/// }
/// ```
#[derive(Debug, Error, Clone, PartialEq)]
pub enum HullError {
    /// Fewer input points (or half-spaces) than a tetrahedron needs,
    /// counted after welding.
    #[error("Convex hull requires at least {required} distinct points, got {count}")]
    TooFewPoints {
        /// Number of usable inputs
        count: usize,
        /// Minimum number required
        required: usize,
    },

    /// The input has no extent beyond tolerance along any axis.
    #[error("Input spread {spread} does not exceed {threshold}")]
    NoSpread {
        /// Largest axis extent of the input
        spread: f64,
        /// Rejection threshold
        threshold: f64,
    },

    /// A required extremal point could not be found.
    #[error("Degenerate geometry: {0}")]
    Degenerate(&'static str),

    /// A half-space does not contain the interior point.
    #[error("Half-space {index} does not contain the interior point (offset {offset})")]
    InteriorOutside {
        /// Index of the offending half-space
        index: usize,
        /// Offset measured from the interior point
        offset: f64,
    },

    /// The half-space intersection is not bounded.
    #[error("Half-space intersection is unbounded")]
    Unbounded,

    /// Mass computation over a hull without positive volume.
    #[error("Hull volume must be positive, got {0}")]
    DegenerateVolume(f64),

    /// A tolerance or angle parameter is out of range.
    #[error("Invalid tolerance: {0}")]
    InvalidTolerance(f64),
}

impl HullError {
    /// Returns true for inputs rejected before any geometry was built
    /// (too few points, no spread, bad parameters).
    pub fn is_input_rejection(&self) -> bool {
        matches!(
            self,
            HullError::TooFewPoints { .. } | HullError::NoSpread { .. } | HullError::InvalidTolerance(_)
        )
    }
}

// =============================================================================
// RESULT TYPE ALIAS
// =============================================================================

/// Result type alias for hull operations.
pub type HullResult<T> = Result<T, HullError>;

// =============================================================================
// TESTS
// =============================================================================
