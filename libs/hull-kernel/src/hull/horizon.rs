//! Horizon search.
//!
//! Depth-first walk over the faces visible from an apex, driven by an
//! explicit stack so deep visible regions cannot exhaust the call stack.
//! The horizon comes out as a closed loop of half-edges on deleted faces,
//! ordered so each edge ends where the next one starts.

use super::Hull;
use crate::topology::{FaceKey, FaceMark, HalfEdgeKey};
use glam::DVec3;

/// Edge walk over one visible face.
struct Frame {
    /// Edge that ends the walk (the edge the face was entered through).
    stop: HalfEdgeKey,
    /// Next edge to examine.
    cursor: HalfEdgeKey,
    /// Set while the walk has not moved yet; the seed face starts at its stop.
    fresh: bool,
}

impl Hull {
    /// Deletes every face visible from `eye`, starting at `face`, and
    /// returns the horizon.
    ///
    /// Conflict points of deleted faces are moved to the orphan list.
    pub(super) fn compute_horizon(&mut self, eye: DVec3, face: FaceKey) -> Vec<HalfEdgeKey> {
        let mut horizon = Vec::new();
        let Some(start) = self.faces[face].edge else {
            return horizon;
        };
        self.delete_visible_face(face);

        let mut stack = vec![Frame {
            stop: start,
            cursor: start,
            fresh: true,
        }];
        while let Some(frame) = stack.last_mut() {
            if !frame.fresh && frame.cursor == frame.stop {
                stack.pop();
                continue;
            }
            frame.fresh = false;
            let edge = frame.cursor;
            frame.cursor = self.edges[edge].next;

            let twin = self.edges[edge].twin;
            let neighbour = self.edges[twin].face;
            if self.faces[neighbour].mark != FaceMark::Visible {
                continue;
            }
            if self.faces[neighbour].plane.distance(eye) > self.tolerances.min_radius {
                self.delete_visible_face(neighbour);
                stack.push(Frame {
                    stop: twin,
                    cursor: self.edges[twin].next,
                    fresh: false,
                });
            } else {
                horizon.push(edge);
            }
        }

        tracing::trace!(edges = horizon.len(), "horizon found");
        horizon
    }

    fn delete_visible_face(&mut self, face: FaceKey) {
        self.orphan_conflicts(face);
        self.faces[face].mark = FaceMark::Deleted;
    }
}
