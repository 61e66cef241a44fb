//! # Convex Hull
//!
//! Incremental QuickHull over a half-edge mesh.
//!
//! ## Algorithm Steps
//!
//! 1. Center the input on its centroid, weld near-duplicates and derive
//!    tolerances from the coordinate magnitude
//! 2. Build an initial tetrahedron from the extremes of the widest axis
//! 3. Assign every other point to the face it lies farthest outside of
//! 4. While any conflict list is non-empty:
//!    a. Take the globally farthest conflicting point (the apex)
//!    b. Walk the faces it sees and collect the horizon
//!    c. Build a cone of new faces from the horizon to the apex
//!    d. Merge new faces with neighbours across non-convex edges
//!    e. Reassign the points of deleted faces to the new faces
//! 5. Drop vertices no face references and shift back to input space
//!
//! The half-space entry point builds the same hull in dual space first.

mod consistency;
mod construct;
mod dual;
mod export;
mod horizon;
mod merge;
mod preprocess;
mod simplex;
mod simplify;

#[cfg(test)]
mod tests;

pub use consistency::ConsistencyError;
pub use export::{EdgeRecord, HullData, HullMesh};

use crate::error::{HullError, HullResult};
use crate::list::KeyList;
use crate::math::{newell_normal, Aabb, Plane};
use crate::topology::{Face, FaceKey, HalfEdge, HalfEdgeKey, Vertex, VertexKey};
use config::constants::{MIN_OUTSIDE_FACTOR, MIN_RADIUS_FACTOR, TOLERANCE_EPSILON_SCALE};
use glam::DVec3;
use slotmap::{Key, SlotMap};

// =============================================================================
// TOLERANCES
// =============================================================================

/// Distance thresholds derived from the magnitude of the input.
///
/// All "outside" and "convex" decisions compare signed plane distances
/// against these values rather than a fixed epsilon.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Tolerances {
    /// Base numeric tolerance.
    pub tolerance: f64,
    /// Visibility and convexity margin (`4 · tolerance`).
    pub min_radius: f64,
    /// Conflict-list admission threshold (`2 · min_radius`).
    pub min_outside: f64,
}

impl Tolerances {
    /// Derives tolerances from `max|x| + max|y| + max|z|` of the input.
    ///
    /// # Example
    ///
    /// ```rust
    /// use hull_kernel::Tolerances;
    ///
    /// let t = Tolerances::from_magnitude(3.0);
    /// assert_eq!(t.min_radius, 4.0 * t.tolerance);
    /// assert_eq!(t.min_outside, 2.0 * t.min_radius);
    /// ```
    pub fn from_magnitude(magnitude: f64) -> Self {
        let tolerance = TOLERANCE_EPSILON_SCALE * f64::EPSILON * magnitude;
        let min_radius = MIN_RADIUS_FACTOR * tolerance;
        Self {
            tolerance,
            min_radius,
            min_outside: MIN_OUTSIDE_FACTOR * min_radius,
        }
    }
}

/// Construction progress of a [`Hull`], in phase order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum BuildState {
    /// Nothing built (also the state of a rejected input).
    #[default]
    Uninitialized,
    /// Initial tetrahedron and conflict lists are in place.
    InitialHullBuilt,
    /// Apex points are being absorbed.
    Iterating,
    /// Unreferenced vertices removed.
    Cleaned,
    /// Shifted back to input space; ready for queries.
    Done,
}

// =============================================================================
// HULL
// =============================================================================

/// A convex polyhedron as a half-edge mesh.
///
/// Each hull exclusively owns its vertex, half-edge and face arenas. Keys
/// handed out by accessors are only meaningful for the hull that produced
/// them.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use hull_kernel::Hull;
///
/// let points = [
///     DVec3::new(0.0, 0.0, 0.0),
///     DVec3::new(1.0, 0.0, 0.0),
///     DVec3::new(0.0, 1.0, 0.0),
///     DVec3::new(0.0, 0.0, 1.0),
/// ];
/// let hull = Hull::from_points(&points, 0.0);
/// assert_eq!(hull.face_count(), 4);
/// assert!(hull.is_consistent());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Hull {
    pub(crate) vertices: SlotMap<VertexKey, Vertex>,
    pub(crate) edges: SlotMap<HalfEdgeKey, HalfEdge>,
    pub(crate) faces: SlotMap<FaceKey, Face>,
    /// Hull vertices (plus absorbed ones until cleanup).
    pub(crate) vertex_list: KeyList<VertexKey>,
    pub(crate) face_list: KeyList<FaceKey>,
    /// Vertices released by deleted faces, waiting for reassignment.
    pub(crate) orphans: KeyList<VertexKey>,
    pub(crate) tolerances: Tolerances,
    /// Point strictly inside every face plane.
    pub(crate) interior: DVec3,
    /// Offset subtracted from the input during construction.
    pub(crate) shift: DVec3,
    pub(crate) state: BuildState,
}

impl Hull {
    /// Computes the hull of `points`, or an empty hull if the input is
    /// degenerate.
    ///
    /// `relative_weld_tolerance` is a fraction of the input bounding-box
    /// diagonal; points closer than that are welded before construction.
    pub fn from_points(points: &[DVec3], relative_weld_tolerance: f64) -> Self {
        Self::try_from_points(points, relative_weld_tolerance).unwrap_or_else(|error| {
            if error.is_input_rejection() {
                tracing::debug!(%error, count = points.len(), "convex hull input rejected");
            } else {
                tracing::warn!(%error, count = points.len(), "convex hull degenerated to empty");
            }
            Self::default()
        })
    }

    /// Computes the hull of `points`, reporting why a degenerate input was
    /// rejected.
    pub fn try_from_points(points: &[DVec3], relative_weld_tolerance: f64) -> HullResult<Self> {
        if !(0.0..1.0).contains(&relative_weld_tolerance) {
            return Err(HullError::InvalidTolerance(relative_weld_tolerance));
        }
        let prepared = preprocess::prepare(points, relative_weld_tolerance)?;

        let count = prepared.points.len();
        let mut hull = Self {
            vertices: SlotMap::with_capacity_and_key(count),
            edges: SlotMap::with_capacity_and_key(6 * count),
            faces: SlotMap::with_capacity_and_key(2 * count),
            tolerances: prepared.tolerances,
            shift: prepared.shift,
            ..Self::default()
        };
        for position in prepared.points {
            let key = hull.vertices.insert(Vertex::new(position));
            hull.vertex_list.push_back(&mut hull.vertices, key);
        }

        hull.build_initial_simplex()?;
        hull.iterate();
        hull.cleanup();
        hull.shift_back();

        debug_assert!(
            hull.check_topology().is_ok(),
            "hull topology invariant violated: {:?}",
            hull.check_topology()
        );
        tracing::debug!(
            vertices = hull.vertex_count(),
            faces = hull.face_count(),
            edges = hull.edge_count(),
            "convex hull built"
        );
        Ok(hull)
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Returns true if the hull has no faces.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.face_list.is_empty()
    }

    /// Number of hull vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertex_list.len()
    }

    /// Number of faces.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.face_list.len()
    }

    /// Number of undirected edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len() / 2
    }

    /// Derived tolerances of the last construction.
    #[inline]
    pub fn tolerances(&self) -> Tolerances {
        self.tolerances
    }

    /// A point strictly inside the hull.
    #[inline]
    pub fn interior_point(&self) -> DVec3 {
        self.interior
    }

    /// Construction progress.
    #[inline]
    pub fn state(&self) -> BuildState {
        self.state
    }

    /// Vertex keys in hull order.
    pub fn vertex_keys(&self) -> impl Iterator<Item = VertexKey> + '_ {
        self.vertex_list.iter(&self.vertices)
    }

    /// Face keys in hull order.
    pub fn face_keys(&self) -> impl Iterator<Item = FaceKey> + '_ {
        self.face_list.iter(&self.faces)
    }

    /// Looks up a vertex.
    pub fn vertex(&self, key: VertexKey) -> Option<&Vertex> {
        self.vertices.get(key)
    }

    /// Looks up a half-edge.
    pub fn half_edge(&self, key: HalfEdgeKey) -> Option<&HalfEdge> {
        self.edges.get(key)
    }

    /// Looks up a face.
    pub fn face(&self, key: FaceKey) -> Option<&Face> {
        self.faces.get(key)
    }

    /// Vertex positions in hull order.
    pub fn vertex_positions(&self) -> Vec<DVec3> {
        self.vertex_keys().map(|v| self.vertices[v].position).collect()
    }

    /// Face planes in hull order.
    pub fn planes(&self) -> Vec<Plane> {
        self.face_keys().map(|f| self.faces[f].plane).collect()
    }

    /// Boundary positions of `face`, counter-clockwise seen from outside.
    pub fn face_vertices(&self, face: FaceKey) -> Vec<DVec3> {
        self.face_cycle(face)
            .map(|e| self.vertices[self.edges[e].origin].position)
            .collect()
    }

    /// Bounds of the hull vertices.
    pub fn bounds(&self) -> Aabb {
        self.vertex_keys()
            .fold(Aabb::empty(), |b, v| b.grow(self.vertices[v].position))
    }

    // -------------------------------------------------------------------------
    // Mesh primitives
    // -------------------------------------------------------------------------

    /// Half-edges around `face`, starting at its first edge.
    pub(crate) fn face_cycle(&self, face: FaceKey) -> EdgeCycle<'_> {
        let start = self.faces.get(face).and_then(|f| f.edge);
        EdgeCycle {
            edges: &self.edges,
            start: start.unwrap_or_default(),
            cursor: start,
        }
    }

    /// Number of edges around `face`.
    pub(crate) fn face_degree(&self, face: FaceKey) -> usize {
        self.face_cycle(face).count()
    }

    /// End vertex of `edge`.
    #[inline]
    pub(crate) fn destination(&self, edge: HalfEdgeKey) -> VertexKey {
        self.edges[self.edges[edge].next].origin
    }

    /// Face across `edge`.
    #[inline]
    pub(crate) fn opposite_face(&self, edge: HalfEdgeKey) -> FaceKey {
        self.edges[self.edges[edge].twin].face
    }

    /// Height of the centroid of the face across `edge` above the plane of
    /// the face owning `edge`.
    #[inline]
    pub(crate) fn opposite_face_distance(&self, edge: HalfEdgeKey) -> f64 {
        let face = &self.faces[self.edges[edge].face];
        face.plane
            .distance(self.faces[self.opposite_face(edge)].centroid)
    }

    #[inline]
    pub(crate) fn link_twins(&mut self, a: HalfEdgeKey, b: HalfEdgeKey) {
        self.edges[a].twin = b;
        self.edges[b].twin = a;
    }

    /// Creates a face bounded by `corners` in counter-clockwise order and
    /// returns it with its first edge (`corners[0] → corners[1]`).
    ///
    /// Twins are left unlinked.
    pub(crate) fn create_face(&mut self, corners: &[VertexKey]) -> (FaceKey, HalfEdgeKey) {
        debug_assert!(corners.len() >= 3);
        let face = self.faces.insert(Face::new());
        let ring: Vec<HalfEdgeKey> = corners
            .iter()
            .map(|&origin| {
                self.edges.insert(HalfEdge {
                    origin,
                    face,
                    next: HalfEdgeKey::null(),
                    prev: HalfEdgeKey::null(),
                    twin: HalfEdgeKey::null(),
                })
            })
            .collect();
        for (i, &edge) in ring.iter().enumerate() {
            self.edges[edge].next = ring[(i + 1) % ring.len()];
            self.edges[edge].prev = ring[(i + ring.len() - 1) % ring.len()];
        }
        self.faces[face].edge = Some(ring[0]);
        self.update_face_geometry(face);
        (face, ring[0])
    }

    /// Recomputes centroid, area and plane of `face` (Newell normal).
    pub(crate) fn update_face_geometry(&mut self, face: FaceKey) {
        let polygon = self.face_vertices(face);
        if polygon.is_empty() {
            return;
        }
        let centroid = polygon.iter().copied().sum::<DVec3>() / polygon.len() as f64;
        let normal = newell_normal(&polygon, centroid);
        let area = 0.5 * normal.length();
        let plane = Plane::from_normal_and_point(normal.normalize_or_zero(), centroid);

        let record = &mut self.faces[face];
        record.centroid = centroid;
        record.area = area;
        record.plane = plane;
        record.flipped = !(plane.distance(self.interior) < 0.0);
    }

    // -------------------------------------------------------------------------
    // Conflict lists
    // -------------------------------------------------------------------------

    pub(crate) fn add_conflict(&mut self, face: FaceKey, vertex: VertexKey) {
        self.faces[face]
            .conflicts
            .push_back(&mut self.vertices, vertex);
        self.vertices[vertex].conflict_face = Some(face);
    }

    pub(crate) fn remove_conflict(&mut self, vertex: VertexKey) {
        if let Some(face) = self.vertices[vertex].conflict_face.take() {
            self.faces[face].conflicts.remove(&mut self.vertices, vertex);
        }
    }

    /// Moves the conflict list of `face` to the orphan list.
    pub(crate) fn orphan_conflicts(&mut self, face: FaceKey) {
        let mut conflicts = std::mem::take(&mut self.faces[face].conflicts);
        for vertex in conflicts.keys(&self.vertices) {
            self.vertices[vertex].conflict_face = None;
        }
        self.orphans.append(&mut self.vertices, &mut conflicts);
    }

    /// Hands `vertex` to the live candidate it lies farthest outside of, or
    /// frees it when no candidate clears `min_outside`.
    pub(crate) fn assign_to_farthest_face(&mut self, vertex: VertexKey, candidates: &[FaceKey]) {
        let position = self.vertices[vertex].position;
        let mut best: Option<(FaceKey, f64)> = None;
        for &face in candidates {
            let record = &self.faces[face];
            if !record.is_live() {
                continue;
            }
            let distance = record.plane.distance(position);
            if best.map_or(true, |(_, d)| distance > d) {
                best = Some((face, distance));
            }
        }
        match best {
            Some((face, distance)) if distance > self.tolerances.min_outside => {
                self.add_conflict(face, vertex);
            }
            _ => {
                self.vertices.remove(vertex);
            }
        }
    }
}

/// Iterator over the half-edges of one face.
pub(crate) struct EdgeCycle<'a> {
    edges: &'a SlotMap<HalfEdgeKey, HalfEdge>,
    start: HalfEdgeKey,
    cursor: Option<HalfEdgeKey>,
}

impl Iterator for EdgeCycle<'_> {
    type Item = HalfEdgeKey;

    fn next(&mut self) -> Option<HalfEdgeKey> {
        let edge = self.cursor?;
        let next = self.edges[edge].next;
        self.cursor = (next != self.start).then_some(next);
        Some(edge)
    }
}
