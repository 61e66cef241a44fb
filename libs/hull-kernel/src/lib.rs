//! # Hull Kernel
//!
//! Convex hulls of 3D point sets and half-space intersections, built
//! incrementally with QuickHull over a half-edge mesh.
//!
//! ## Architecture
//!
//! ```text
//! points ─┐
//!         ├→ hull (simplex → conflict lists → horizon → cone → merge) → Hull
//! planes ─┘ (via the dual hull)                                        │
//!                                    HullMesh / HullData / Mesh / MassProperties
//! ```
//!
//! ## Guarantees
//!
//! A finished hull is closed and two-manifold, every face is a strictly
//! convex polygon wound counter-clockwise seen from outside, adjacent
//! faces are convex across their shared edge by at least the derived
//! `min_radius`, and every input point lies inside or within tolerance
//! of the surface.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::HullConfig;
//! use glam::DVec3;
//! use hull_kernel::convex_hull;
//!
//! let corners: Vec<DVec3> = (0..8)
//!     .map(|i| DVec3::new((i & 1) as f64, ((i >> 1) & 1) as f64, ((i >> 2) & 1) as f64))
//!     .collect();
//! let hull = convex_hull(&corners, &HullConfig::default());
//! assert_eq!(hull.face_count(), 6);
//! assert!((hull.volume() - 1.0).abs() < 1e-12);
//! ```

pub mod error;
pub mod hull;
pub mod list;
pub mod mass;
pub mod math;
pub mod mesh;
pub mod topology;

pub use error::{HullError, HullResult};
pub use hull::{BuildState, ConsistencyError, EdgeRecord, Hull, HullData, HullMesh, Tolerances};
pub use mass::MassProperties;
pub use mesh::Mesh;
pub use topology::{FaceKey, HalfEdgeKey, VertexKey};

use config::constants::HullConfig;
use glam::DVec3;

/// Convex hull of `points` with the weld tolerance of `config`.
///
/// Degenerate input yields an empty hull.
pub fn convex_hull(points: &[DVec3], config: &HullConfig) -> Hull {
    Hull::from_points(points, config.weld_tolerance)
}

/// Convex hull of the vertices of several meshes.
pub fn hull(meshes: &[&Mesh], config: &HullConfig) -> Hull {
    let points: Vec<DVec3> = meshes
        .iter()
        .flat_map(|mesh| mesh.vertices().iter().copied())
        .collect();
    convex_hull(&points, config)
}

/// Convex hull of `points`, simplified with the merge angle of `config`.
pub fn simplified_hull(points: &[DVec3], config: &HullConfig) -> Hull {
    let hull = convex_hull(points, config);
    if config.merge_angle > 0.0 {
        hull.simplify(config.merge_angle)
    } else {
        hull
    }
}
