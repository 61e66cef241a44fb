//! # Triangle Mesh
//!
//! Indexed triangle soup produced by hull triangulation and accepted as
//! hull input. Polygonal hull faces are fanned into triangles with
//! counter-clockwise winding seen from outside.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// An indexed triangle mesh in f64 precision.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use hull_kernel::Mesh;
///
/// let mut mesh = Mesh::new();
/// let a = mesh.add_vertex(DVec3::ZERO);
/// let b = mesh.add_vertex(DVec3::X);
/// let c = mesh.add_vertex(DVec3::Y);
/// mesh.add_triangle(a, b, c);
/// assert!(mesh.validate());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    vertices: Vec<DVec3>,
    triangles: Vec<[u32; 3]>,
}

impl Mesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mesh with pre-allocated capacity.
    pub fn with_capacity(vertex_count: usize, triangle_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            triangles: Vec::with_capacity(triangle_count),
        }
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Returns true if the mesh has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Adds a vertex and returns its index.
    pub fn add_vertex(&mut self, position: DVec3) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(position);
        index
    }

    /// Adds a triangle by vertex indices.
    pub fn add_triangle(&mut self, v0: u32, v1: u32, v2: u32) {
        self.triangles.push([v0, v1, v2]);
    }

    /// Adds a convex polygon as a triangle fan around its first index.
    pub fn add_polygon(&mut self, indices: &[u32]) {
        if let Some((&first, rest)) = indices.split_first() {
            for pair in rest.windows(2) {
                self.triangles.push([first, pair[0], pair[1]]);
            }
        }
    }

    /// Vertex positions.
    #[inline]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Triangle indices.
    #[inline]
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Corner positions of triangle `index`.
    #[inline]
    pub fn triangle_positions(&self, index: usize) -> [DVec3; 3] {
        self.triangles[index].map(|i| self.vertices[i as usize])
    }

    /// Checks that every index is in range and no triangle repeats a
    /// vertex.
    pub fn validate(&self) -> bool {
        let count = self.vertices.len() as u32;
        self.triangles.iter().all(|&[a, b, c]| {
            a < count && b < count && c < count && a != b && b != c && a != c
        })
    }

    /// Signed volume enclosed by the triangles; positive for a closed
    /// outward-wound surface.
    pub fn signed_volume(&self) -> f64 {
        self.triangles
            .iter()
            .map(|tri| {
                let [a, b, c] = tri.map(|i| self.vertices[i as usize]);
                a.dot(b.cross(c))
            })
            .sum::<f64>()
            / 6.0
    }
}
