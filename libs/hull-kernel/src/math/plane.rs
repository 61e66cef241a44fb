//! # Plane
//!
//! Oriented plane `n·x - d = 0` with signed distance queries.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// A plane in 3D space defined by a unit normal and an offset from the
/// origin along that normal.
///
/// Positive signed distances are in front of the plane (outside a hull),
/// negative distances behind it.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use hull_kernel::math::Plane;
///
/// let plane = Plane::from_normal_and_point(DVec3::Z, DVec3::new(0.0, 0.0, 2.0));
/// assert_eq!(plane.distance(DVec3::new(5.0, 5.0, 3.0)), 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    /// Normal vector (unit length for normalized planes).
    pub normal: DVec3,
    /// Offset such that points on the plane satisfy `normal·x == offset`.
    pub offset: f64,
}

impl Plane {
    /// Creates a plane from a normal and an offset.
    #[inline]
    pub const fn new(normal: DVec3, offset: f64) -> Self {
        Self { normal, offset }
    }

    /// Creates a plane through `point` with the given normal.
    #[inline]
    pub fn from_normal_and_point(normal: DVec3, point: DVec3) -> Self {
        Self {
            normal,
            offset: normal.dot(point),
        }
    }

    /// Creates a plane from three counter-clockwise points.
    ///
    /// Returns `None` for collinear points.
    pub fn from_points(a: DVec3, b: DVec3, c: DVec3) -> Option<Self> {
        let normal = (b - a).cross(c - a).try_normalize()?;
        Some(Self::from_normal_and_point(normal, a))
    }

    /// Signed distance from `point` to the plane.
    ///
    /// Exact for unit normals; scaled by the normal length otherwise.
    #[inline]
    pub fn distance(&self, point: DVec3) -> f64 {
        self.normal.dot(point) - self.offset
    }

    /// Orthogonal projection of `point` onto the plane.
    #[inline]
    pub fn project(&self, point: DVec3) -> DVec3 {
        point - self.normal * self.distance(point)
    }

    /// Returns the plane moved by `delta`.
    #[inline]
    pub fn translate(&self, delta: DVec3) -> Self {
        Self {
            normal: self.normal,
            offset: self.offset + self.normal.dot(delta),
        }
    }

    /// Returns the plane with a unit normal, or `None` for a zero normal.
    pub fn normalize(&self) -> Option<Self> {
        let length = self.normal.length();
        if length <= 0.0 || !length.is_finite() {
            return None;
        }
        Some(Self {
            normal: self.normal / length,
            offset: self.offset / length,
        })
    }

    /// Returns the plane facing the opposite direction.
    #[inline]
    pub fn flip(&self) -> Self {
        Self {
            normal: -self.normal,
            offset: -self.offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_plane_from_points() {
        let plane = Plane::from_points(DVec3::ZERO, DVec3::X, DVec3::Y).unwrap();
        assert_relative_eq!(plane.normal.z, 1.0);
        assert_relative_eq!(plane.offset, 0.0);
        assert!(plane.distance(DVec3::Z) > 0.0);
    }

    #[test]
    fn test_plane_from_collinear_points() {
        assert!(Plane::from_points(DVec3::ZERO, DVec3::X, DVec3::X * 2.0).is_none());
    }

    #[test]
    fn test_plane_translate() {
        let plane = Plane::new(DVec3::Y, 1.0);
        let moved = plane.translate(DVec3::new(3.0, 2.0, 0.0));
        assert_relative_eq!(moved.offset, 3.0);
        assert_relative_eq!(moved.distance(DVec3::new(0.0, 3.0, 0.0)), 0.0);
    }

    #[test]
    fn test_plane_normalize_and_flip() {
        let plane = Plane::new(DVec3::new(0.0, 0.0, 2.0), 4.0).normalize().unwrap();
        assert_relative_eq!(plane.offset, 2.0);
        let flipped = plane.flip();
        assert_relative_eq!(flipped.distance(DVec3::ZERO), 2.0);
        assert!(Plane::new(DVec3::ZERO, 1.0).normalize().is_none());
    }

    #[test]
    fn test_plane_project() {
        let plane = Plane::new(DVec3::Z, 1.0);
        let p = plane.project(DVec3::new(2.0, 3.0, 7.0));
        assert_relative_eq!(p.z, 1.0);
        assert_relative_eq!(p.x, 2.0);
    }
}
