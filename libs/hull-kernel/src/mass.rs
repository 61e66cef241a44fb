//! # Mass Properties
//!
//! Volume, center of mass and inertia tensor of a solid hull of uniform
//! density.
//!
//! ## Algorithm
//!
//! Every face is fanned into triangles, and each triangle spans a
//! tetrahedron with a reference point inside the hull. With `A = [a b c]`
//! the corners relative to that point and `det = det(A)`:
//!
//! - volume: `det / 6`
//! - first moment: `det / 24 * (a + b + c)`
//! - covariance: `det * A * C * A^T` with `C` the canonical tetrahedron
//!   covariance
//!
//! The summed covariance is moved to the center of mass and turned into
//! the inertia tensor `trace(C) * I - C`.

use crate::error::{HullError, HullResult};
use crate::hull::Hull;
use crate::math::{outer, symmetric_eigen, trace, CANONICAL_TETRAHEDRON_COVARIANCE};
use glam::{DMat3, DQuat, DVec3};
use serde::{Deserialize, Serialize};

/// Integrated moments of a closed triangle surface about an origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Moments {
    pub volume: f64,
    pub first_moment: DVec3,
    pub covariance: DMat3,
}

/// Sums the tetrahedron moments of `triangles` against `origin`.
pub(crate) fn integrate(triangles: impl IntoIterator<Item = [DVec3; 3]>, origin: DVec3) -> Moments {
    let mut moments = Moments {
        volume: 0.0,
        first_moment: DVec3::ZERO,
        covariance: DMat3::ZERO,
    };
    for [a, b, c] in triangles {
        let (a, b, c) = (a - origin, b - origin, c - origin);
        let det = a.dot(b.cross(c));
        let frame = DMat3::from_cols(a, b, c);

        moments.volume += det / 6.0;
        moments.first_moment += (a + b + c) * (det / 24.0);
        moments.covariance =
            moments.covariance + frame * CANONICAL_TETRAHEDRON_COVARIANCE * frame.transpose() * det;
    }
    moments
}

/// Mass, center of mass and inertia of a uniform-density solid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MassProperties {
    /// Enclosed volume.
    pub volume: f64,
    /// Mass (`volume * density`).
    pub weight: f64,
    /// Center of mass.
    pub center: DVec3,
    /// Inertia tensor about the center of mass, in world axes.
    pub inertia: DMat3,
}

impl MassProperties {
    /// Principal moments of inertia and the rotation from the principal
    /// frame to world axes.
    ///
    /// # Example
    ///
    /// ```rust
    /// use glam::{DMat3, DVec3};
    /// use hull_kernel::MassProperties;
    ///
    /// let props = MassProperties {
    ///     volume: 1.0,
    ///     weight: 1.0,
    ///     center: DVec3::ZERO,
    ///     inertia: DMat3::from_diagonal(DVec3::new(1.0, 2.0, 3.0)),
    /// };
    /// let (moments, _rotation) = props.principal_frame();
    /// assert!((moments.x + moments.y + moments.z - 6.0).abs() < 1e-12);
    /// ```
    pub fn principal_frame(&self) -> (DVec3, DQuat) {
        let (moments, axes) = symmetric_eigen(&self.inertia);
        (moments, DQuat::from_mat3(&axes).normalize())
    }
}

impl Hull {
    /// Mass properties of the hull filled with material of `density`.
    ///
    /// Fails with [`HullError::DegenerateVolume`] for empty hulls.
    pub fn mass_properties(&self, density: f64) -> HullResult<MassProperties> {
        let origin = self.interior;
        let moments = integrate(self.fan_triangles(), origin);
        if !(moments.volume > 0.0) {
            return Err(HullError::DegenerateVolume(moments.volume));
        }

        let local_center = moments.first_moment / moments.volume;
        let central =
            moments.covariance - outer(local_center, local_center) * moments.volume;
        let inertia = DMat3::from_diagonal(DVec3::splat(trace(&central))) - central;

        Ok(MassProperties {
            volume: moments.volume,
            weight: moments.volume * density,
            center: local_center + origin,
            inertia: inertia * density,
        })
    }

    /// Enclosed volume; zero for an empty hull.
    pub fn volume(&self) -> f64 {
        integrate(self.fan_triangles(), self.interior).volume.max(0.0)
    }
}
