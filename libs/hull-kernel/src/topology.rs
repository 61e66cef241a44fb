//! Half-edge mesh records for hull construction.
//!
//! Elements live in per-hull `SlotMap` arenas and reference each other by
//! generation-checked keys. A half-edge always belongs to exactly one face;
//! faces own a closed cycle of at least three half-edges.

use crate::list::{KeyList, Link, Linked};
use crate::math::Plane;
use glam::DVec3;
use slotmap::new_key_type;

new_key_type! {
    /// Handle to a hull vertex.
    pub struct VertexKey;
    /// Handle to a directed half-edge.
    pub struct HalfEdgeKey;
    /// Handle to a hull face.
    pub struct FaceKey;
}

/// Cleanup-phase state of a vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VertexMark {
    /// Not (yet) known to be referenced by a finished face.
    #[default]
    Unconfirmed,
    /// Origin of at least one half-edge of the finished hull.
    Confirmed,
}

/// Hull-phase state of a face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FaceMark {
    /// Live face of the current hull.
    #[default]
    Visible,
    /// Hidden by an apex or absorbed by a merge; freed on commit.
    Deleted,
    /// New face with an unresolved convexity violation, revisited by the
    /// second merge pass.
    Concave,
}

/// A point of the input, placed on the hull or waiting in a conflict list.
#[derive(Debug, Clone)]
pub struct Vertex {
    /// Position (centered during construction, input space when done).
    pub position: DVec3,
    /// An outgoing half-edge once the vertex is on the finished hull.
    pub edge: Option<HalfEdgeKey>,
    /// Face whose conflict list currently holds this vertex.
    pub conflict_face: Option<FaceKey>,
    /// Cleanup-phase mark.
    pub mark: VertexMark,
    pub(crate) link: Link<VertexKey>,
}

impl Vertex {
    /// Creates a free-standing vertex.
    pub fn new(position: DVec3) -> Self {
        Self {
            position,
            edge: None,
            conflict_face: None,
            mark: VertexMark::Unconfirmed,
            link: Link::default(),
        }
    }
}

impl Linked<VertexKey> for Vertex {
    fn link(&self) -> &Link<VertexKey> {
        &self.link
    }
    fn link_mut(&mut self) -> &mut Link<VertexKey> {
        &mut self.link
    }
}

/// Directed edge `origin → next.origin` on the boundary of `face`.
#[derive(Debug, Clone, Copy)]
pub struct HalfEdge {
    /// Start vertex.
    pub origin: VertexKey,
    /// Owning face.
    pub face: FaceKey,
    /// Next edge counter-clockwise around the face.
    pub next: HalfEdgeKey,
    /// Previous edge around the face.
    pub prev: HalfEdgeKey,
    /// Antiparallel edge on the neighbouring face; null until linked.
    pub twin: HalfEdgeKey,
}

/// Convex polygon of the hull with its conflict list.
#[derive(Debug, Clone)]
pub struct Face {
    /// First edge of the boundary cycle.
    pub edge: Option<HalfEdgeKey>,
    /// Supporting plane; the hull interior has negative distance.
    pub plane: Plane,
    /// Average of the boundary vertices.
    pub centroid: DVec3,
    /// Polygon area.
    pub area: f64,
    /// Set when the plane puts the interior point on its positive side.
    pub flipped: bool,
    /// Hull-phase mark.
    pub mark: FaceMark,
    /// Vertices outside this face assigned to it.
    pub conflicts: KeyList<VertexKey>,
    pub(crate) link: Link<FaceKey>,
}

impl Face {
    pub(crate) fn new() -> Self {
        Self {
            edge: None,
            plane: Plane::new(DVec3::ZERO, 0.0),
            centroid: DVec3::ZERO,
            area: 0.0,
            flipped: false,
            mark: FaceMark::Visible,
            conflicts: KeyList::new(),
            link: Link::default(),
        }
    }

    /// Returns true unless the face has been deleted.
    #[inline]
    pub fn is_live(&self) -> bool {
        self.mark != FaceMark::Deleted
    }
}

impl Linked<FaceKey> for Face {
    fn link(&self) -> &Link<FaceKey> {
        &self.link
    }
    fn link_mut(&mut self) -> &mut Link<FaceKey> {
        &mut self.link
    }
}
