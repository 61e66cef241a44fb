//! # Configuration Constants
//!
//! Centralized constants for the convex hull kernel. Tolerance factors,
//! input limits and call-site defaults are defined here.
//!
//! ## Categories
//!
//! - **Precision**: Factors deriving the hull tolerances from the input scale
//! - **Limits**: Minimum input sizes
//! - **Defaults**: Weld tolerance, simplification angle, density

use std::fmt;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Scale applied to `f64::EPSILON` when deriving the base hull tolerance.
///
/// The base tolerance is `TOLERANCE_EPSILON_SCALE * EPSILON * (max|x| +
/// max|y| + max|z|)` over the centered input, so it grows with the
/// coordinate magnitude of the point cloud.
///
/// # Example
///
/// ```rust
/// use config::constants::TOLERANCE_EPSILON_SCALE;
///
/// let magnitude = 1.5; // unit cube centered on the origin
/// let tolerance = TOLERANCE_EPSILON_SCALE * f64::EPSILON * magnitude;
/// assert!(tolerance < 1e-14);
/// ```
pub const TOLERANCE_EPSILON_SCALE: f64 = 3.0;

/// Factor from the base tolerance to the minimum radius.
///
/// The minimum radius is the signed distance above which an apex sees a face
/// during horizon construction, and the convexity margin of the merge passes.
///
/// # Example
///
/// ```rust
/// use config::constants::MIN_RADIUS_FACTOR;
///
/// let min_radius = MIN_RADIUS_FACTOR * 1e-12;
/// assert_eq!(min_radius, 4e-12);
/// ```
pub const MIN_RADIUS_FACTOR: f64 = 4.0;

/// Factor from the minimum radius to the minimum outside distance.
///
/// A point must lie farther than this above a face plane to enter that
/// face's conflict list.
///
/// # Example
///
/// ```rust
/// use config::constants::{MIN_OUTSIDE_FACTOR, MIN_RADIUS_FACTOR};
///
/// let min_outside = MIN_OUTSIDE_FACTOR * MIN_RADIUS_FACTOR * 1e-12;
/// assert_eq!(min_outside, 8e-12);
/// ```
pub const MIN_OUTSIDE_FACTOR: f64 = 2.0;

/// Factor from the base tolerance to the minimum spread of the input.
///
/// The initial simplex is rejected when the largest axis extent, the
/// distance to the seed line or the distance to the seed plane does not
/// exceed `MIN_SPREAD_FACTOR * tolerance`.
pub const MIN_SPREAD_FACTOR: f64 = 100.0;

// =============================================================================
// LIMIT CONSTANTS
// =============================================================================

/// Minimum number of distinct points (or half-spaces) for a 3D hull.
///
/// # Example
///
/// ```rust
/// use config::constants::MIN_HULL_POINTS;
///
/// let points = 3;
/// assert!(points < MIN_HULL_POINTS);
/// ```
pub const MIN_HULL_POINTS: usize = 4;

// =============================================================================
// DEFAULT CONSTANTS
// =============================================================================

/// Default relative weld tolerance.
///
/// Fraction of the input bounding-box diagonal below which two input points
/// are welded into one before construction.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_WELD_TOLERANCE;
///
/// let diagonal = 10.0;
/// let weld_distance = DEFAULT_WELD_TOLERANCE * diagonal;
/// assert!(weld_distance < 1e-3);
/// ```
pub const DEFAULT_WELD_TOLERANCE: f64 = 1e-5;

/// Default maximum angle (radians) between face normals clustered together
/// by hull simplification. About 3 degrees.
pub const DEFAULT_MERGE_ANGLE: f64 = 0.05;

/// Default density used for mass computation.
pub const DEFAULT_DENSITY: f64 = 1.0;

// =============================================================================
// HULL CONFIGURATION
// =============================================================================

/// Call-site parameters for hull construction and simplification.
///
/// # Examples
/// ```
/// use config::constants::HullConfig;
/// let config = HullConfig::default();
/// assert!(config.merge_angle > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HullConfig {
    /// Relative weld tolerance (fraction of the bounding-box diagonal).
    pub weld_tolerance: f64,
    /// Maximum normal angle in radians merged by simplification.
    pub merge_angle: f64,
}

impl HullConfig {
    /// Builds a configuration enforcing strict validation of the supplied
    /// weld tolerance and merge angle.
    ///
    /// # Examples
    /// ```
    /// use config::constants::HullConfig;
    /// let cfg = HullConfig::new(1.0e-6, 0.1).expect("valid config");
    /// assert_eq!(cfg.merge_angle, 0.1);
    /// ```
    pub fn new(weld_tolerance: f64, merge_angle: f64) -> Result<Self, ConfigError> {
        if !(0.0..1.0).contains(&weld_tolerance) {
            return Err(ConfigError::InvalidWeldTolerance(weld_tolerance));
        }
        if !(merge_angle >= 0.0 && merge_angle < std::f64::consts::FRAC_PI_2) {
            return Err(ConfigError::InvalidMergeAngle(merge_angle));
        }
        Ok(Self {
            weld_tolerance,
            merge_angle,
        })
    }
}

impl Default for HullConfig {
    fn default() -> Self {
        Self {
            weld_tolerance: DEFAULT_WELD_TOLERANCE,
            merge_angle: DEFAULT_MERGE_ANGLE,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Raised when the weld tolerance is negative, NaN or not below one.
    InvalidWeldTolerance(f64),
    /// Raised when the merge angle is negative, NaN or at least a right angle.
    InvalidMergeAngle(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidWeldTolerance(value) => {
                write!(f, "weld_tolerance must be in [0, 1): {value}")
            }
            ConfigError::InvalidMergeAngle(value) => {
                write!(f, "merge_angle must be in [0, pi/2): {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
