//! # Config Crate
//!
//! Centralized configuration constants for the convex hull kernel.
//! All magic numbers and tunable parameters are defined here so the
//! tolerance policy of the engine lives in exactly one place.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{HullConfig, MIN_OUTSIDE_FACTOR, MIN_RADIUS_FACTOR};
//!
//! // Derived hull thresholds scale with the base tolerance
//! let tolerance = 1e-12;
//! let min_radius = MIN_RADIUS_FACTOR * tolerance;
//! let min_outside = MIN_OUTSIDE_FACTOR * min_radius;
//! assert!(min_outside > min_radius);
//!
//! // Call-site configuration is a plain validated value
//! let config = HullConfig::default();
//! assert!(config.weld_tolerance > 0.0);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **No Global State**: Configuration is passed as call parameters
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;
