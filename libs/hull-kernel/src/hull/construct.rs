//! Main QuickHull loop and post-construction passes.

use super::{BuildState, Hull};
use crate::topology::{FaceKey, FaceMark, HalfEdgeKey, VertexKey, VertexMark};

impl Hull {
    /// Absorbs apex points until every conflict list is empty.
    pub(super) fn iterate(&mut self) {
        self.state = BuildState::Iterating;
        let mut iterations = 0usize;
        while let Some((apex, face)) = self.next_apex() {
            iterations += 1;
            tracing::trace!(
                iteration = iterations,
                distance = self.faces[face].plane.distance(self.vertices[apex].position),
                "adding apex"
            );
            self.add_apex(apex, face);
        }
        tracing::debug!(
            iterations,
            faces = self.face_list.len(),
            "quickhull iteration finished"
        );
    }

    /// Farthest conflicting vertex over all faces; ties keep the first one
    /// found in face order.
    fn next_apex(&self) -> Option<(VertexKey, FaceKey)> {
        let mut best: Option<(VertexKey, FaceKey, f64)> = None;
        for face in self.face_list.iter(&self.faces) {
            let plane = self.faces[face].plane;
            for vertex in self.faces[face].conflicts.iter(&self.vertices) {
                let distance = plane.distance(self.vertices[vertex].position);
                if best.map_or(true, |(_, _, d)| distance > d) {
                    best = Some((vertex, face, distance));
                }
            }
        }
        best.map(|(vertex, face, _)| (vertex, face))
    }

    fn add_apex(&mut self, apex: VertexKey, face: FaceKey) {
        let eye = self.vertices[apex].position;
        self.remove_conflict(apex);
        self.vertex_list.push_back(&mut self.vertices, apex);

        let horizon = self.compute_horizon(eye, face);
        let new_faces = self.build_cone(apex, &horizon);
        self.merge_new_faces(&new_faces);
        self.resolve_orphans(&new_faces);
        self.commit(&new_faces);
    }

    /// Connects every horizon edge to `apex` with a new triangle.
    ///
    /// The face for horizon edge `a → b` is `[a, b, apex]`; its first edge
    /// takes over the horizon edge's twin and its side edges pair up with
    /// the neighbouring cone faces.
    fn build_cone(&mut self, apex: VertexKey, horizon: &[HalfEdgeKey]) -> Vec<FaceKey> {
        let mut new_faces = Vec::with_capacity(horizon.len());
        let mut first_side: Option<HalfEdgeKey> = None;
        let mut prev_side: Option<HalfEdgeKey> = None;

        for &edge in horizon {
            let a = self.edges[edge].origin;
            let b = self.destination(edge);
            let outer = self.edges[edge].twin;

            let (face, base) = self.create_face(&[a, b, apex]);
            let up = self.edges[base].next;
            let down = self.edges[up].next;

            self.link_twins(base, outer);
            match prev_side {
                Some(prev) => self.link_twins(down, prev),
                None => first_side = Some(down),
            }
            prev_side = Some(up);
            new_faces.push(face);
        }
        if let (Some(first), Some(last)) = (first_side, prev_side) {
            self.link_twins(first, last);
        }
        new_faces
    }

    /// Reassigns every orphan to the new face it lies farthest outside of.
    fn resolve_orphans(&mut self, new_faces: &[FaceKey]) {
        while let Some(vertex) = self.orphans.pop_front(&mut self.vertices) {
            self.assign_to_farthest_face(vertex, new_faces);
        }
    }

    /// Frees deleted faces and appends the surviving new ones.
    fn commit(&mut self, new_faces: &[FaceKey]) {
        for face in self.face_list.keys(&self.faces) {
            if self.faces[face].mark == FaceMark::Deleted {
                self.face_list.remove(&mut self.faces, face);
                self.free_face(face);
            }
        }
        for &face in new_faces {
            if self.faces[face].mark == FaceMark::Deleted {
                self.free_face(face);
            } else {
                self.face_list.push_back(&mut self.faces, face);
            }
        }
    }

    fn free_face(&mut self, face: FaceKey) {
        debug_assert!(self.faces[face].conflicts.is_empty());
        let cycle: Vec<HalfEdgeKey> = self.face_cycle(face).collect();
        for edge in cycle {
            self.edges.remove(edge);
        }
        self.faces.remove(face);
    }

    /// Drops vertices no face references and gives every remaining vertex
    /// an outgoing half-edge.
    pub(super) fn cleanup(&mut self) {
        for face in self.face_list.keys(&self.faces) {
            let cycle: Vec<HalfEdgeKey> = self.face_cycle(face).collect();
            for edge in cycle {
                let vertex = &mut self.vertices[self.edges[edge].origin];
                vertex.mark = VertexMark::Confirmed;
                vertex.edge = Some(edge);
            }
        }

        let mut dropped = 0usize;
        for vertex in self.vertex_list.keys(&self.vertices) {
            if self.vertices[vertex].mark != VertexMark::Confirmed {
                self.vertex_list.remove(&mut self.vertices, vertex);
                self.vertices.remove(vertex);
                dropped += 1;
            }
        }
        self.state = BuildState::Cleaned;
        tracing::trace!(dropped, "unreferenced vertices removed");
    }

    /// Moves all geometry back to input space.
    pub(super) fn shift_back(&mut self) {
        let shift = self.shift;
        for vertex in self.vertices.values_mut() {
            vertex.position += shift;
        }
        for face in self.faces.values_mut() {
            face.plane = face.plane.translate(shift);
            face.centroid += shift;
        }
        self.interior += shift;
        self.state = BuildState::Done;
    }
}
