//! # Hull Export
//!
//! Flat views of a finished hull for rendering, serialization and
//! collision queries.
//!
//! - [`HullMesh`]: indexed polygons with one normal per face
//! - [`HullData`]: compact half-edge form with twins stored in adjacent
//!   slots (`twin(2k) == 2k + 1`)
//! - [`Mesh`]: fan triangulation

use super::Hull;
use crate::mass;
use crate::math::{Aabb, Plane};
use crate::mesh::Mesh;
use crate::topology::{FaceKey, HalfEdgeKey, VertexKey};
use config::constants::DEFAULT_DENSITY;
use glam::{DAffine3, DVec3};
use serde::{Deserialize, Serialize};
use slotmap::SecondaryMap;

// =============================================================================
// POLYGON MESH
// =============================================================================

/// Indexed polygon mesh of a hull.
///
/// Face `i` uses `face_vertex_counts[i]` consecutive entries of
/// `face_indices`, counter-clockwise seen from outside.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HullMesh {
    /// Vertex positions.
    pub vertices: Vec<DVec3>,
    /// Outward unit normal per face.
    pub face_normals: Vec<DVec3>,
    /// Number of corners per face.
    pub face_vertex_counts: Vec<u32>,
    /// Concatenated corner indices of all faces.
    pub face_indices: Vec<u32>,
}

impl HullMesh {
    /// Number of faces.
    pub fn face_count(&self) -> usize {
        self.face_vertex_counts.len()
    }

    /// Corner indices per face.
    pub fn faces(&self) -> impl Iterator<Item = &[u32]> + '_ {
        self.face_vertex_counts.iter().scan(0usize, |start, &count| {
            let range = *start..*start + count as usize;
            *start = range.end;
            Some(&self.face_indices[range])
        })
    }
}

// =============================================================================
// COMPACT HALF-EDGE FORM
// =============================================================================

/// One half-edge of [`HullData`], all links as indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRecord {
    /// Next edge around the face.
    pub next: u32,
    /// Opposite edge; always the other slot of the same pair.
    pub twin: u32,
    /// Start vertex.
    pub origin: u32,
    /// Owning face.
    pub face: u32,
}

/// Index-based snapshot of a hull, independent of the arenas.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HullData {
    /// Center of mass of the solid.
    pub centroid: DVec3,
    /// Vertex positions.
    pub vertices: Vec<DVec3>,
    /// Face planes, parallel to `faces`.
    pub planes: Vec<Plane>,
    /// Half-edges; pairs `(2k, 2k + 1)` are twins.
    pub edges: Vec<EdgeRecord>,
    /// First edge of each face.
    pub faces: Vec<u32>,
    /// Vertex bounds.
    pub bounds: Aabb,
    /// Enclosed volume.
    pub volume: f64,
}

impl HullData {
    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of faces.
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Edge indices around `face`.
    pub fn face_edges(&self, face: usize) -> Vec<u32> {
        let start = self.faces[face];
        let mut edges = vec![start];
        let mut edge = self.edges[start as usize].next;
        while edge != start && edges.len() <= self.edges.len() {
            edges.push(edge);
            edge = self.edges[edge as usize].next;
        }
        edges
    }

    /// Corner positions of `face`.
    pub fn face_vertices(&self, face: usize) -> Vec<DVec3> {
        self.face_edges(face)
            .into_iter()
            .map(|e| self.vertices[self.edges[e as usize].origin as usize])
            .collect()
    }

    /// Area centroid of `face`.
    pub fn face_centroid(&self, face: usize) -> DVec3 {
        let corners = self.face_vertices(face);
        let Some(&anchor) = corners.first() else {
            return DVec3::ZERO;
        };
        let mut weighted = DVec3::ZERO;
        let mut total = 0.0;
        for pair in corners[1..].windows(2) {
            let area = (pair[0] - anchor).cross(pair[1] - anchor).length();
            weighted += (anchor + pair[0] + pair[1]) * area;
            total += area;
        }
        if total > 0.0 {
            weighted / (3.0 * total)
        } else {
            corners.iter().copied().sum::<DVec3>() / corners.len() as f64
        }
    }

    /// Recomputes the enclosed volume from the faces.
    pub fn compute_volume(&self) -> f64 {
        let origin = self.bounds.center();
        let triangles = self.triangulate();
        mass::integrate(
            (0..triangles.triangle_count()).map(|i| triangles.triangle_positions(i)),
            origin,
        )
        .volume
    }

    /// Fan triangulation of every face.
    pub fn triangulate(&self) -> Mesh {
        let mut mesh = Mesh::with_capacity(self.vertices.len(), self.edges.len() / 2);
        for &v in &self.vertices {
            mesh.add_vertex(v);
        }
        for face in 0..self.faces.len() {
            let corners: Vec<u32> = self
                .face_edges(face)
                .into_iter()
                .map(|e| self.edges[e as usize].origin)
                .collect();
            mesh.add_polygon(&corners);
        }
        mesh
    }

    /// Applies an affine transform, updating planes, bounds, centroid and
    /// volume. Mirroring transforms are not supported and leave the faces
    /// wound inward.
    pub fn transform(&mut self, transform: &DAffine3) {
        for v in &mut self.vertices {
            *v = transform.transform_point3(*v);
        }
        let normal_matrix = transform.matrix3.inverse().transpose();
        for face in 0..self.faces.len() {
            let edge = self.edges[self.faces[face] as usize];
            let point = self.vertices[edge.origin as usize];
            let normal = (normal_matrix * self.planes[face].normal).normalize_or_zero();
            self.planes[face] = Plane::from_normal_and_point(normal, point);
        }
        self.centroid = transform.transform_point3(self.centroid);
        self.bounds = Aabb::from_points(&self.vertices);
        self.volume *= transform.matrix3.determinant().abs();
    }

    /// Checks index ranges, twin pairing and face ownership.
    pub fn validate(&self) -> bool {
        let (nv, ne, nf) = (
            self.vertices.len() as u32,
            self.edges.len() as u32,
            self.faces.len() as u32,
        );
        if self.planes.len() != self.faces.len() || ne % 2 != 0 {
            return false;
        }
        let edges_ok = self.edges.iter().enumerate().all(|(i, e)| {
            let next = self.edges.get(e.next as usize);
            let twin_next = self
                .edges
                .get(e.twin as usize)
                .and_then(|t| self.edges.get(t.next as usize));
            e.origin < nv
                && e.face < nf
                && e.twin == (i as u32 ^ 1)
                && next.map_or(false, |n| n.face == e.face)
                && twin_next.map_or(false, |n| n.origin == e.origin)
        });
        edges_ok
            && self
                .faces
                .iter()
                .enumerate()
                .all(|(f, &e)| e < ne && self.edges[e as usize].face == f as u32)
    }
}

// =============================================================================
// HULL EXPORT
// =============================================================================

impl Hull {
    /// Indexed polygon mesh of the hull.
    pub fn mesh(&self) -> HullMesh {
        let index = self.vertex_indices();
        let mut mesh = HullMesh {
            vertices: self.vertex_positions(),
            face_normals: Vec::with_capacity(self.face_count()),
            face_vertex_counts: Vec::with_capacity(self.face_count()),
            face_indices: Vec::with_capacity(2 * self.edge_count()),
        };
        for face in self.face_keys() {
            mesh.face_normals.push(self.faces[face].plane.normal);
            let start = mesh.face_indices.len();
            mesh.face_indices
                .extend(self.face_cycle(face).map(|e| index[self.edges[e].origin]));
            mesh.face_vertex_counts
                .push((mesh.face_indices.len() - start) as u32);
        }
        mesh
    }

    /// Fan triangulation of the hull.
    pub fn triangulate(&self) -> Mesh {
        let polygons = self.mesh();
        let mut mesh = Mesh::with_capacity(polygons.vertices.len(), 2 * self.face_count());
        for &v in &polygons.vertices {
            mesh.add_vertex(v);
        }
        for face in polygons.faces() {
            mesh.add_polygon(face);
        }
        mesh
    }

    /// Compact index form of the hull.
    pub fn to_data(&self) -> HullData {
        let vertex_index = self.vertex_indices();
        let mut face_index: SecondaryMap<FaceKey, u32> = SecondaryMap::new();
        for (i, face) in self.face_keys().enumerate() {
            face_index.insert(face, i as u32);
        }

        // Twins take adjacent slots.
        let mut edge_index: SecondaryMap<HalfEdgeKey, u32> = SecondaryMap::new();
        let mut order: Vec<HalfEdgeKey> = Vec::with_capacity(self.edges.len());
        for face in self.face_keys() {
            for edge in self.face_cycle(face) {
                if edge_index.contains_key(edge) {
                    continue;
                }
                let twin = self.edges[edge].twin;
                edge_index.insert(edge, order.len() as u32);
                order.push(edge);
                edge_index.insert(twin, order.len() as u32);
                order.push(twin);
            }
        }

        let edges = order
            .iter()
            .map(|&key| {
                let edge = &self.edges[key];
                EdgeRecord {
                    next: edge_index[edge.next],
                    twin: edge_index[edge.twin],
                    origin: vertex_index[edge.origin],
                    face: face_index[edge.face],
                }
            })
            .collect();
        let faces = self
            .face_keys()
            .filter_map(|f| self.faces[f].edge.map(|e| edge_index[e]))
            .collect();

        let (volume, centroid) = match self.mass_properties(DEFAULT_DENSITY) {
            Ok(props) => (props.volume, props.center),
            Err(_) => (0.0, self.interior),
        };
        HullData {
            centroid,
            vertices: self.vertex_positions(),
            planes: self.planes(),
            edges,
            faces,
            bounds: self.bounds(),
            volume,
        }
    }

    /// Position in hull vertex order for each vertex key.
    fn vertex_indices(&self) -> SecondaryMap<VertexKey, u32> {
        let mut index = SecondaryMap::with_capacity(self.vertex_count());
        for (i, vertex) in self.vertex_keys().enumerate() {
            index.insert(vertex, i as u32);
        }
        index
    }

    /// Corner positions of every fan triangle.
    pub(crate) fn fan_triangles(&self) -> Vec<[DVec3; 3]> {
        let mut triangles = Vec::with_capacity(2 * self.face_count());
        for face in self.face_keys() {
            let corners = self.face_vertices(face);
            if let Some((&first, rest)) = corners.split_first() {
                for pair in rest.windows(2) {
                    triangles.push([first, pair[0], pair[1]]);
                }
            }
        }
        triangles
    }
}
