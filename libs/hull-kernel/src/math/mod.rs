//! # Geometry Primitives
//!
//! Value types and algebra used throughout the kernel. Vectors, matrices and
//! quaternions are `glam`'s f64 types; this module adds planes, bounds and
//! the few matrix and polygon helpers the hull and mass code need.

mod aabb;
mod mat3;
mod plane;

pub use aabb::Aabb;
pub use mat3::{outer, symmetric_eigen, trace, CANONICAL_TETRAHEDRON_COVARIANCE};
pub use plane::Plane;

use glam::DVec3;

/// Newell normal of a closed polygon.
///
/// The length of the returned vector is twice the polygon area; its
/// direction follows the counter-clockwise winding. Vertices are taken
/// relative to `origin` to keep the cross products well conditioned.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use hull_kernel::math::newell_normal;
///
/// let square = [DVec3::ZERO, DVec3::X, DVec3::new(1.0, 1.0, 0.0), DVec3::Y];
/// let n = newell_normal(&square, DVec3::new(0.5, 0.5, 0.0));
/// assert_eq!(n, DVec3::new(0.0, 0.0, 2.0));
/// ```
pub fn newell_normal(polygon: &[DVec3], origin: DVec3) -> DVec3 {
    let mut normal = DVec3::ZERO;
    for (i, &p) in polygon.iter().enumerate() {
        let q = polygon[(i + 1) % polygon.len()];
        normal += (p - origin).cross(q - origin);
    }
    normal
}

/// Squared distance from `point` to the infinite line through `a` with
/// unit direction `dir`.
#[inline]
pub fn line_distance_squared(point: DVec3, a: DVec3, dir: DVec3) -> f64 {
    (point - a).cross(dir).length_squared()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_newell_triangle_matches_cross_product() {
        let (a, b, c) = (DVec3::new(1.0, 0.0, 0.0), DVec3::new(0.0, 2.0, 0.0), DVec3::new(0.0, 0.0, 3.0));
        let expected = (b - a).cross(c - a);
        let n = newell_normal(&[a, b, c], (a + b + c) / 3.0);
        assert_relative_eq!(n.x, expected.x, epsilon = 1e-12);
        assert_relative_eq!(n.y, expected.y, epsilon = 1e-12);
        assert_relative_eq!(n.z, expected.z, epsilon = 1e-12);
    }

    #[test]
    fn test_line_distance() {
        let d2 = line_distance_squared(DVec3::new(3.0, 4.0, 0.0), DVec3::ZERO, DVec3::X);
        assert_relative_eq!(d2, 16.0);
    }
}
