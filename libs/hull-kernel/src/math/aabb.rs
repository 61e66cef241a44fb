//! # Axis-Aligned Bounds

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box.
///
/// The empty box has `min = +inf` and `max = -inf` so that any union with a
/// point yields that point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Minimum corner.
    pub min: DVec3,
    /// Maximum corner.
    pub max: DVec3,
}

impl Default for Aabb {
    fn default() -> Self {
        Self::empty()
    }
}

impl Aabb {
    /// Creates a box from its corners.
    #[inline]
    pub const fn new(min: DVec3, max: DVec3) -> Self {
        Self { min, max }
    }

    /// The empty box.
    #[inline]
    pub const fn empty() -> Self {
        Self {
            min: DVec3::splat(f64::INFINITY),
            max: DVec3::splat(f64::NEG_INFINITY),
        }
    }

    /// Bounds of a point set; empty for an empty set.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a DVec3>) -> Self {
        points.into_iter().fold(Self::empty(), |b, p| b.grow(*p))
    }

    /// Returns true if no point has been added.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Returns the box extended to contain `point`.
    #[inline]
    pub fn grow(&self, point: DVec3) -> Self {
        Self {
            min: self.min.min(point),
            max: self.max.max(point),
        }
    }

    /// Smallest box containing both boxes.
    #[inline]
    pub fn union(&self, other: &Aabb) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Center point.
    #[inline]
    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

    /// Half-size along each axis.
    #[inline]
    pub fn extent(&self) -> DVec3 {
        (self.max - self.min) * 0.5
    }

    /// Full size along each axis.
    #[inline]
    pub fn size(&self) -> DVec3 {
        self.max - self.min
    }

    /// Length of the diagonal, zero for an empty box.
    pub fn diagonal(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.size().length()
        }
    }

    /// Index of the axis with the largest size (first wins on ties).
    pub fn largest_axis(&self) -> usize {
        let size = self.size();
        if size.x >= size.y && size.x >= size.z {
            0
        } else if size.y >= size.z {
            1
        } else {
            2
        }
    }

    /// Returns true if `point` lies inside or on the box.
    #[inline]
    pub fn contains(&self, point: DVec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_aabb_from_points() {
        let points = [DVec3::new(-1.0, 2.0, 0.0), DVec3::new(3.0, -2.0, 1.0)];
        let b = Aabb::from_points(&points);
        assert_eq!(b.min, DVec3::new(-1.0, -2.0, 0.0));
        assert_eq!(b.max, DVec3::new(3.0, 2.0, 1.0));
        assert_eq!(b.center(), DVec3::new(1.0, 0.0, 0.5));
        assert_eq!(b.extent(), DVec3::new(2.0, 2.0, 0.5));
        assert_eq!(b.largest_axis(), 0);
    }

    #[test]
    fn test_aabb_empty() {
        let b = Aabb::from_points(std::iter::empty());
        assert!(b.is_empty());
        assert_eq!(b.diagonal(), 0.0);
        assert!(!b.contains(DVec3::ZERO));
    }

    #[test]
    fn test_aabb_union() {
        let a = Aabb::new(DVec3::ZERO, DVec3::ONE);
        let b = Aabb::new(DVec3::splat(2.0), DVec3::splat(3.0));
        let u = a.union(&b);
        assert!(u.contains(DVec3::splat(1.5)));
        assert_relative_eq!(u.diagonal(), 3.0 * 3f64.sqrt());
        assert_eq!(Aabb::empty().union(&a), a);
    }
}
