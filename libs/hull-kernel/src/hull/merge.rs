//! Face merging.
//!
//! New cone faces are merged with neighbours across edges that are not
//! convex by at least `min_radius`. The first pass only tests the larger
//! of two faces against the smaller one's centroid and defers faces that
//! fail the test only the other way; the second pass resolves those
//! deferred faces against either side.

use super::Hull;
use crate::topology::{FaceKey, FaceMark, HalfEdgeKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MergeRule {
    /// Merge when the larger face sees the smaller one's centroid.
    LargerFace,
    /// Merge when either face sees the other's centroid.
    EitherFace,
}

impl Hull {
    /// Runs both merge passes over the faces of a fresh cone.
    pub(super) fn merge_new_faces(&mut self, new_faces: &[FaceKey]) {
        let mut merges = 0usize;
        for &face in new_faces {
            if self.faces[face].mark == FaceMark::Visible {
                while self.merge_adjacent(face, MergeRule::LargerFace) {
                    merges += 1;
                }
            }
        }
        for &face in new_faces {
            if self.faces[face].mark == FaceMark::Concave {
                self.faces[face].mark = FaceMark::Visible;
                while self.merge_adjacent(face, MergeRule::EitherFace) {
                    merges += 1;
                }
            }
        }
        if merges > 0 {
            tracing::trace!(merges, "cone faces merged");
        }
    }

    /// Merges `face` with the first neighbour that violates `rule`.
    ///
    /// Returns true if a merge happened; the face must then be rescanned.
    fn merge_adjacent(&mut self, face: FaceKey, rule: MergeRule) -> bool {
        let Some(start) = self.faces[face].edge else {
            return false;
        };
        let min_radius = self.tolerances.min_radius;
        let mut convex = true;
        let mut edge = start;
        loop {
            let twin = self.edges[edge].twin;
            let neighbour = self.edges[twin].face;
            let merge = match rule {
                MergeRule::EitherFace => {
                    self.opposite_face_distance(edge) > -min_radius
                        || self.opposite_face_distance(twin) > -min_radius
                }
                MergeRule::LargerFace => {
                    let (larger, smaller) = if self.faces[face].area > self.faces[neighbour].area {
                        (edge, twin)
                    } else {
                        (twin, edge)
                    };
                    if self.opposite_face_distance(larger) > -min_radius {
                        true
                    } else {
                        if self.opposite_face_distance(smaller) > -min_radius {
                            convex = false;
                        }
                        false
                    }
                }
            };
            if merge {
                self.absorb_neighbour(edge);
                return true;
            }
            edge = self.edges[edge].next;
            if edge == start {
                break;
            }
        }
        if rule == MergeRule::LargerFace && (!convex || self.faces[face].flipped) {
            self.faces[face].mark = FaceMark::Concave;
        }
        false
    }

    /// Absorbs the face across `shared` into the face owning `shared`.
    ///
    /// The shared run is extended in both directions while the two faces
    /// keep bordering each other, then removed; the neighbour's remaining
    /// edges are reassigned to the surviving face.
    fn absorb_neighbour(&mut self, shared: HalfEdgeKey) {
        let face = self.edges[shared].face;
        let shared_twin = self.edges[shared].twin;
        let neighbour = self.edges[shared_twin].face;

        let mut adj_prev = self.edges[shared].prev;
        let mut adj_next = self.edges[shared].next;
        let mut opp_prev = self.edges[shared_twin].prev;
        let mut opp_next = self.edges[shared_twin].next;

        while self.opposite_face(adj_prev) == neighbour {
            adj_prev = self.edges[adj_prev].prev;
            opp_next = self.edges[opp_next].next;
        }
        while self.opposite_face(adj_next) == neighbour {
            opp_prev = self.edges[opp_prev].prev;
            adj_next = self.edges[adj_next].next;
        }

        let mut run = Vec::new();
        let mut edge = self.edges[adj_prev].next;
        while edge != adj_next {
            run.push(edge);
            run.push(self.edges[edge].twin);
            edge = self.edges[edge].next;
        }

        let opp_stop = self.edges[opp_prev].next;
        let mut edge = opp_next;
        while edge != opp_stop {
            self.edges[edge].face = face;
            edge = self.edges[edge].next;
        }

        if self.faces[face].edge.map_or(false, |e| run.contains(&e)) {
            self.faces[face].edge = Some(adj_next);
        }
        self.orphan_conflicts(neighbour);
        let record = &mut self.faces[neighbour];
        record.mark = FaceMark::Deleted;
        record.edge = None;

        let mut discarded = Vec::new();
        discarded.extend(self.connect(opp_prev, adj_next));
        discarded.extend(self.connect(adj_prev, opp_next));
        for edge in run {
            self.edges.remove(edge);
        }
        for face in discarded {
            self.orphan_conflicts(face);
        }

        self.update_face_geometry(face);
        debug_assert!(
            self.face_degree(face) >= 3,
            "merged face collapsed below a triangle"
        );
    }

    /// Joins `prev → edge` on the merged face.
    ///
    /// When both edges border the same third face, the vertex between them
    /// is redundant: `prev` is removed and `edge` spans both. The third
    /// face loses the matching edge, or is discarded entirely if it was a
    /// triangle; a discarded face is returned.
    fn connect(&mut self, prev: HalfEdgeKey, edge: HalfEdgeKey) -> Option<FaceKey> {
        let third = self.opposite_face(edge);
        if self.opposite_face(prev) != third {
            self.edges[prev].next = edge;
            self.edges[edge].prev = prev;
            return None;
        }

        let face = self.edges[edge].face;
        if self.faces[face].edge == Some(prev) {
            self.faces[face].edge = Some(edge);
        }

        let edge_twin = self.edges[edge].twin;
        let prev_twin = self.edges[prev].twin;
        let mut discarded = None;
        let new_twin = if self.face_degree(third) == 3 {
            let closing = self.edges[edge_twin].prev;
            let outer = self.edges[closing].twin;
            let record = &mut self.faces[third];
            record.mark = FaceMark::Deleted;
            record.edge = None;
            for e in [edge_twin, prev_twin, closing] {
                self.edges.remove(e);
            }
            discarded = Some(third);
            outer
        } else {
            let before = self.edges[edge_twin].prev;
            if self.faces[third].edge == Some(edge_twin) {
                self.faces[third].edge = Some(prev_twin);
            }
            self.edges[prev_twin].prev = before;
            self.edges[before].next = prev_twin;
            self.edges[prev_twin].origin = self.edges[edge_twin].origin;
            self.edges.remove(edge_twin);
            prev_twin
        };

        let before = self.edges[prev].prev;
        self.edges[edge].prev = before;
        self.edges[before].next = edge;
        self.edges[edge].origin = self.edges[prev].origin;
        self.edges.remove(prev);
        self.link_twins(edge, new_twin);

        if discarded.is_none() {
            self.update_face_geometry(third);
        }
        discarded
    }
}
