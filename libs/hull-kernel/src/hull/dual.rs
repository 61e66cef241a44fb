//! Half-space intersection by polar duality.
//!
//! Relative to an interior point `p`, the half-space `n·x <= d` maps to the
//! dual point `n / (d - n·p)`. The hull of the dual points has one face per
//! vertex of the intersection: a dual face plane `(m, e)` maps back to the
//! primal vertex `m / e + p`. The primal hull is then rebuilt from those
//! vertices so redundant half-spaces disappear.

use super::Hull;
use crate::error::{HullError, HullResult};
use crate::math::Plane;
use config::constants::MIN_HULL_POINTS;
use glam::DVec3;

impl Hull {
    /// Intersects the half-spaces `plane.normal · x <= plane.offset`, or
    /// returns an empty hull if the intersection is degenerate, unbounded
    /// or does not contain `interior`.
    pub fn from_halfspaces(planes: &[Plane], relative_weld_tolerance: f64, interior: DVec3) -> Self {
        Self::try_from_halfspaces(planes, relative_weld_tolerance, interior).unwrap_or_else(|error| {
            if error.is_input_rejection() {
                tracing::debug!(%error, count = planes.len(), "half-space input rejected");
            } else {
                tracing::warn!(%error, count = planes.len(), "half-space intersection degenerated to empty");
            }
            Self::default()
        })
    }

    /// Intersects half-spaces around a point strictly inside all of them.
    ///
    /// # Example
    ///
    /// ```rust
    /// use glam::DVec3;
    /// use hull_kernel::{math::Plane, Hull};
    ///
    /// let planes: Vec<Plane> = [DVec3::X, DVec3::Y, DVec3::Z, -DVec3::X, -DVec3::Y, -DVec3::Z]
    ///     .into_iter()
    ///     .map(|n| Plane::new(n, 1.0))
    ///     .collect();
    /// let cube = Hull::try_from_halfspaces(&planes, 0.0, DVec3::ZERO).unwrap();
    /// assert_eq!(cube.vertex_count(), 8);
    /// assert_eq!(cube.face_count(), 6);
    /// ```
    pub fn try_from_halfspaces(
        planes: &[Plane],
        relative_weld_tolerance: f64,
        interior: DVec3,
    ) -> HullResult<Self> {
        if planes.len() < MIN_HULL_POINTS {
            return Err(HullError::TooFewPoints {
                count: planes.len(),
                required: MIN_HULL_POINTS,
            });
        }

        let mut dual_points = Vec::with_capacity(planes.len());
        for (index, plane) in planes.iter().enumerate() {
            let plane = plane
                .normalize()
                .ok_or(HullError::Degenerate("half-space with zero normal"))?;
            let offset = -plane.distance(interior);
            if !(offset > 0.0) {
                return Err(HullError::InteriorOutside { index, offset });
            }
            dual_points.push(plane.normal / offset);
        }

        let dual = Self::try_from_points(&dual_points, relative_weld_tolerance)?;
        let threshold = dual.tolerances.tolerance;
        let mut vertices = Vec::with_capacity(dual.face_count());
        for face in dual.face_keys() {
            let plane = dual.faces[face].plane;
            if plane.offset <= threshold {
                return Err(HullError::Unbounded);
            }
            vertices.push(plane.normal / plane.offset + interior);
        }
        tracing::trace!(
            halfspaces = planes.len(),
            supporting = dual.vertex_count(),
            vertices = vertices.len(),
            "dual hull built"
        );

        Self::try_from_points(&vertices, relative_weld_tolerance)
    }
}
