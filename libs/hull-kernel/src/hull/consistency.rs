//! Structural and geometric validation of a finished hull.

use super::{BuildState, Hull};
use crate::topology::{FaceKey, FaceMark, HalfEdgeKey, VertexKey, VertexMark};
use slotmap::SecondaryMap;
use thiserror::Error;

/// A violated hull invariant.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConsistencyError {
    /// A key does not resolve in its arena.
    #[error("Dangling {kind} reference")]
    Dangling {
        /// Element kind
        kind: &'static str,
    },

    /// A face has no boundary or fewer than three edges.
    #[error("Face {0:?} has fewer than three edges")]
    DegenerateFace(FaceKey),

    /// A listed face is marked deleted or concave.
    #[error("Face {0:?} carries a construction mark")]
    StaleFaceMark(FaceKey),

    /// An edge in a face cycle names another face, or its links disagree.
    #[error("Half-edge {0:?} is not correctly linked into its face cycle")]
    BrokenCycle(HalfEdgeKey),

    /// `twin(twin(e)) != e`.
    #[error("Half-edge {0:?} twin does not point back")]
    TwinMismatch(HalfEdgeKey),

    /// `origin(e) != origin(next(twin(e)))`.
    #[error("Half-edge {0:?} does not start where its twin ends")]
    OriginMismatch(HalfEdgeKey),

    /// An edge shorter than the hull tolerance.
    #[error("Half-edge {edge:?} has length {length}, not above tolerance {tolerance}")]
    ShortEdge {
        /// Offending edge
        edge: HalfEdgeKey,
        /// Its length
        length: f64,
        /// Hull tolerance
        tolerance: f64,
    },

    /// The interior point is not strictly behind a face plane.
    #[error("Interior point lies {distance} in front of face {face:?}")]
    InteriorOutside {
        /// Offending face
        face: FaceKey,
        /// Signed distance of the interior point
        distance: f64,
    },

    /// `V - E + F != 2`.
    #[error("Euler characteristic is {0}, expected 2")]
    EulerCharacteristic(i64),

    /// An edge starts at a vertex missing from the hull vertex list.
    #[error("Vertex {0:?} is referenced by a face but not confirmed")]
    UnlistedVertex(VertexKey),

    /// A vertex in a conflict list points at another face.
    #[error("Vertex {0:?} disagrees with the conflict list holding it")]
    ConflictMismatch(VertexKey),

    /// An arena holds elements no list or face cycle reaches.
    #[error("{kind} arena holds {stored} elements but {reachable} are reachable")]
    Leak {
        /// Element kind
        kind: &'static str,
        /// Elements in the arena
        stored: usize,
        /// Elements reachable from the hull lists
        reachable: usize,
    },
}

impl Hull {
    /// Runs every structural and geometric check.
    ///
    /// An empty hull is trivially consistent.
    pub fn check_consistency(&self) -> Result<(), ConsistencyError> {
        self.check_topology()?;
        self.check_geometry()
    }

    /// Returns true if [`Hull::check_consistency`] passes; logs the first
    /// violation otherwise.
    pub fn is_consistent(&self) -> bool {
        match self.check_consistency() {
            Ok(()) => true,
            Err(error) => {
                tracing::warn!(%error, "hull consistency check failed");
                false
            }
        }
    }

    /// Connectivity checks that must hold exactly, regardless of rounding.
    pub(crate) fn check_topology(&self) -> Result<(), ConsistencyError> {
        let mut reached_edges: SecondaryMap<HalfEdgeKey, ()> = SecondaryMap::new();
        let mut reached_faces = 0usize;

        for face in self.face_keys() {
            let record = self.faces.get(face).ok_or(ConsistencyError::Dangling { kind: "face" })?;
            if record.mark != FaceMark::Visible {
                return Err(ConsistencyError::StaleFaceMark(face));
            }
            for vertex in record.conflicts.iter(&self.vertices) {
                if self.vertices[vertex].conflict_face != Some(face) {
                    return Err(ConsistencyError::ConflictMismatch(vertex));
                }
            }

            let start = record.edge.ok_or(ConsistencyError::DegenerateFace(face))?;
            let mut edge = start;
            let mut degree = 0usize;
            loop {
                let half = self.edges.get(edge).ok_or(ConsistencyError::Dangling { kind: "half-edge" })?;
                if half.face != face
                    || reached_edges.insert(edge, ()).is_some()
                    || self.edges.get(half.next).map(|n| n.prev) != Some(edge)
                {
                    return Err(ConsistencyError::BrokenCycle(edge));
                }
                let twin = self
                    .edges
                    .get(half.twin)
                    .ok_or(ConsistencyError::TwinMismatch(edge))?;
                if twin.twin != edge {
                    return Err(ConsistencyError::TwinMismatch(edge));
                }
                let twin_next = self
                    .edges
                    .get(twin.next)
                    .ok_or(ConsistencyError::Dangling { kind: "half-edge" })?;
                if twin_next.origin != half.origin {
                    return Err(ConsistencyError::OriginMismatch(edge));
                }
                match self.vertices.get(half.origin) {
                    Some(v) if v.mark == VertexMark::Confirmed || self.state < BuildState::Cleaned => {}
                    Some(_) => return Err(ConsistencyError::UnlistedVertex(half.origin)),
                    None => return Err(ConsistencyError::Dangling { kind: "vertex" }),
                }

                degree += 1;
                edge = half.next;
                if edge == start {
                    break;
                }
            }
            if degree < 3 {
                return Err(ConsistencyError::DegenerateFace(face));
            }
            reached_faces += 1;
        }

        if reached_faces != self.faces.len() {
            return Err(ConsistencyError::Leak {
                kind: "face",
                stored: self.faces.len(),
                reachable: reached_faces,
            });
        }
        if reached_edges.len() != self.edges.len() {
            return Err(ConsistencyError::Leak {
                kind: "half-edge",
                stored: self.edges.len(),
                reachable: reached_edges.len(),
            });
        }

        if self.state >= BuildState::Cleaned && !self.is_empty() {
            let listed = self.vertex_list.len();
            if listed != self.vertices.len() {
                return Err(ConsistencyError::Leak {
                    kind: "vertex",
                    stored: self.vertices.len(),
                    reachable: listed,
                });
            }
            let euler = listed as i64 - self.edge_count() as i64 + self.face_count() as i64;
            if euler != 2 {
                return Err(ConsistencyError::EulerCharacteristic(euler));
            }
        }
        Ok(())
    }

    /// Checks that depend on the tolerances: no short edges and the
    /// interior point strictly behind every face.
    fn check_geometry(&self) -> Result<(), ConsistencyError> {
        let tolerance = self.tolerances.tolerance;
        for face in self.face_keys() {
            let record = &self.faces[face];
            let distance = record.plane.distance(self.interior);
            if !(distance < 0.0) {
                return Err(ConsistencyError::InteriorOutside { face, distance });
            }
            for edge in self.face_cycle(face) {
                let a = self.vertices[self.edges[edge].origin].position;
                let b = self.vertices[self.destination(edge)].position;
                let length = a.distance(b);
                if !(length > tolerance) {
                    return Err(ConsistencyError::ShortEdge {
                        edge,
                        length,
                        tolerance,
                    });
                }
            }
        }
        Ok(())
    }
}
