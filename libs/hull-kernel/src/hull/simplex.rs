//! Initial tetrahedron and conflict seeding.

use super::{BuildState, Hull};
use crate::error::{HullError, HullResult};
use crate::math::line_distance_squared;
use crate::topology::{HalfEdgeKey, VertexKey};
use config::constants::{MIN_HULL_POINTS, MIN_SPREAD_FACTOR};
use glam::DVec3;

impl Hull {
    /// Builds the initial tetrahedron from extreme points and distributes
    /// the remaining points over its faces.
    pub(super) fn build_initial_simplex(&mut self) -> HullResult<()> {
        let keys = self.vertex_list.keys(&self.vertices);
        let position = |k: VertexKey| self.vertices[k].position;
        let threshold = MIN_SPREAD_FACTOR * self.tolerances.tolerance;

        // Extreme points per axis
        let Some(&first) = keys.first() else {
            return Err(HullError::TooFewPoints {
                count: 0,
                required: MIN_HULL_POINTS,
            });
        };
        let mut min = [first; 3];
        let mut max = [first; 3];
        for &k in &keys {
            let p = position(k);
            for axis in 0..3 {
                if p[axis] < position(min[axis])[axis] {
                    min[axis] = k;
                }
                if p[axis] > position(max[axis])[axis] {
                    max[axis] = k;
                }
            }
        }

        let mut axis = 0;
        let mut spread = f64::NEG_INFINITY;
        for a in 0..3 {
            let s = position(max[a])[a] - position(min[a])[a];
            if s > spread {
                axis = a;
                spread = s;
            }
        }
        if spread <= threshold {
            return Err(HullError::NoSpread { spread, threshold });
        }

        let v0 = min[axis];
        let mut v1 = max[axis];
        let (p0, p1) = (position(v0), position(v1));
        let direction = (p1 - p0).normalize();

        // Farthest from the seed line
        let mut v2 = None;
        let mut best = threshold * threshold;
        for &k in &keys {
            let d = line_distance_squared(position(k), p0, direction);
            if d > best {
                best = d;
                v2 = Some(k);
            }
        }
        let Some(mut v2) = v2 else {
            return Err(HullError::Degenerate("all points are collinear"));
        };
        let p2 = position(v2);
        let normal = (p1 - p0).cross(p2 - p0).normalize_or_zero();

        // Farthest from the seed plane
        let mut v3 = None;
        let mut best = threshold;
        let mut side = 0.0;
        for &k in &keys {
            let d = normal.dot(position(k) - p0);
            if d.abs() > best {
                best = d.abs();
                side = d;
                v3 = Some(k);
            }
        }
        let Some(v3) = v3 else {
            return Err(HullError::Degenerate("all points are coplanar"));
        };
        if side < 0.0 {
            std::mem::swap(&mut v1, &mut v2);
        }

        let simplex = [v0, v1, v2, v3];
        self.interior = simplex.iter().map(|&k| position(k)).sum::<DVec3>() / 4.0;

        let faces = [
            self.create_face(&[v0, v2, v1]),
            self.create_face(&[v0, v1, v3]),
            self.create_face(&[v1, v2, v3]),
            self.create_face(&[v2, v0, v3]),
        ];
        let ring: Vec<HalfEdgeKey> = faces
            .iter()
            .flat_map(|&(face, _)| self.face_cycle(face).collect::<Vec<_>>())
            .collect();
        for &a in &ring {
            for &b in &ring {
                if self.edges[a].origin == self.destination(b)
                    && self.destination(a) == self.edges[b].origin
                {
                    self.edges[a].twin = b;
                }
            }
        }
        for &(face, _) in &faces {
            self.face_list.push_back(&mut self.faces, face);
        }

        // Everything else goes to the conflict lists or away.
        let candidates = faces.map(|(face, _)| face);
        for k in keys {
            if simplex.contains(&k) {
                continue;
            }
            self.vertex_list.remove(&mut self.vertices, k);
            self.assign_to_farthest_face(k, &candidates);
        }

        self.state = BuildState::InitialHullBuilt;
        tracing::debug!(
            axis,
            spread,
            conflicts = self.pending_conflicts(),
            "initial simplex built"
        );
        Ok(())
    }

    /// Number of vertices waiting in conflict lists.
    pub(crate) fn pending_conflicts(&self) -> usize {
        self.face_keys().map(|f| self.faces[f].conflicts.len()).sum()
    }
}
