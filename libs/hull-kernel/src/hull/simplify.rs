//! Face-count reduction by clustering nearly parallel face normals.

use super::Hull;
use crate::error::{HullError, HullResult};
use crate::math::Plane;
use config::constants::DEFAULT_WELD_TOLERANCE;
use glam::DVec3;
use std::f64::consts::FRAC_PI_2;

/// Faces whose normals lie within the merge angle of `seed`.
struct NormalCluster {
    seed: DVec3,
    weighted: DVec3,
}

impl Hull {
    /// Rebuilds the hull with nearly parallel faces collapsed into one
    /// supporting plane each; falls back to a copy of `self` if the
    /// reduced plane set does not bound a solid.
    ///
    /// The result always contains the original hull.
    pub fn simplify(&self, max_merge_angle: f64) -> Hull {
        self.try_simplify(max_merge_angle).unwrap_or_else(|error| {
            tracing::debug!(%error, max_merge_angle, "hull simplification skipped");
            self.clone()
        })
    }

    /// Like [`Hull::simplify`] but reports why the reduction failed.
    ///
    /// Faces are visited largest first; each joins the first cluster whose
    /// seed normal is within `max_merge_angle`, otherwise it seeds a new
    /// one. Every cluster yields a plane with the area-weighted normal,
    /// pushed out to touch the farthest hull vertex.
    pub fn try_simplify(&self, max_merge_angle: f64) -> HullResult<Hull> {
        if !(0.0..FRAC_PI_2).contains(&max_merge_angle) {
            return Err(HullError::InvalidTolerance(max_merge_angle));
        }
        if self.is_empty() {
            return Ok(Hull::default());
        }

        let mut faces: Vec<(DVec3, f64)> = self
            .face_keys()
            .map(|f| (self.faces[f].plane.normal, self.faces[f].area))
            .collect();
        faces.sort_by(|a, b| b.1.total_cmp(&a.1));

        let min_dot = max_merge_angle.cos();
        let mut clusters: Vec<NormalCluster> = Vec::new();
        for (normal, area) in faces {
            match clusters.iter_mut().find(|c| c.seed.dot(normal) >= min_dot) {
                Some(cluster) => cluster.weighted += normal * area,
                None => clusters.push(NormalCluster {
                    seed: normal,
                    weighted: normal * area,
                }),
            }
        }

        let positions = self.vertex_positions();
        let planes: Vec<Plane> = clusters
            .iter()
            .map(|c| {
                let normal = c.weighted.try_normalize().unwrap_or(c.seed);
                let offset = positions
                    .iter()
                    .map(|&p| normal.dot(p))
                    .fold(f64::NEG_INFINITY, f64::max);
                Plane::new(normal, offset)
            })
            .collect();

        tracing::debug!(
            faces = self.face_count(),
            planes = planes.len(),
            "hull normals clustered"
        );
        Hull::try_from_halfspaces(&planes, DEFAULT_WELD_TOLERANCE, self.interior)
    }
}
