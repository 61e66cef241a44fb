use super::*;
use crate::error::HullError;
use crate::mesh::Mesh;
use crate::topology::FaceMark;
use approx::assert_relative_eq;
use glam::{DAffine3, DQuat};

// =============================================================================
// FIXTURES
// =============================================================================

fn box_corners(min: DVec3, max: DVec3) -> Vec<DVec3> {
    (0..8)
        .map(|i| {
            DVec3::new(
                if i & 1 == 0 { min.x } else { max.x },
                if i & 2 == 0 { min.y } else { max.y },
                if i & 4 == 0 { min.z } else { max.z },
            )
        })
        .collect()
}

fn tetrahedron() -> Vec<DVec3> {
    vec![DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::Z]
}

/// Evenly spread points on a sphere.
fn fibonacci_sphere(count: usize, radius: f64) -> Vec<DVec3> {
    let golden = std::f64::consts::PI * (3.0 - 5.0_f64.sqrt());
    (0..count)
        .map(|i| {
            let y = 1.0 - 2.0 * (i as f64 + 0.5) / count as f64;
            let r = (1.0 - y * y).sqrt();
            let theta = golden * i as f64;
            DVec3::new(r * theta.cos(), y, r * theta.sin()) * radius
        })
        .collect()
}

fn box_planes(half: DVec3) -> Vec<Plane> {
    vec![
        Plane::new(DVec3::X, half.x),
        Plane::new(-DVec3::X, half.x),
        Plane::new(DVec3::Y, half.y),
        Plane::new(-DVec3::Y, half.y),
        Plane::new(DVec3::Z, half.z),
        Plane::new(-DVec3::Z, half.z),
    ]
}

fn assert_contains(hull: &Hull, points: &[DVec3], slack: f64) {
    for plane in hull.planes() {
        for &p in points {
            let d = plane.distance(p);
            assert!(d <= slack, "point {p:?} lies {d} outside the hull");
        }
    }
}

fn assert_convex_edges(hull: &Hull) {
    for face in hull.face_keys() {
        for edge in hull.face_cycle(face) {
            let d = hull.opposite_face_distance(edge);
            assert!(
                d < -hull.tolerances().min_radius,
                "edge {edge:?} is not convex ({d})"
            );
        }
    }
}

// =============================================================================
// CONSTRUCTION
// =============================================================================

#[test]
fn test_tetrahedron() {
    let hull = Hull::try_from_points(&tetrahedron(), 0.0).unwrap();

    assert_eq!(hull.vertex_count(), 4);
    assert_eq!(hull.face_count(), 4);
    assert_eq!(hull.edge_count(), 6);
    assert_eq!(hull.state(), BuildState::Done);
    assert!(hull.is_consistent());
    for face in hull.face_keys() {
        assert_eq!(hull.face_degree(face), 3);
    }
    assert_relative_eq!(hull.volume(), 1.0 / 6.0, epsilon = 1e-12);
}

#[test]
fn test_face_normals_point_outward() {
    let hull = Hull::from_points(&tetrahedron(), 0.0);
    let interior = hull.interior_point();
    for face in hull.face_keys() {
        let record = hull.face(face).unwrap();
        assert!(record.plane.distance(interior) < 0.0);
        assert!((record.centroid - interior).dot(record.plane.normal) > 0.0);
        assert_relative_eq!(record.plane.normal.length(), 1.0, epsilon = 1e-12);
    }
}

#[test]
fn test_box_merges_into_quads() {
    let points = box_corners(DVec3::ZERO, DVec3::new(2.0, 3.0, 4.0));
    let hull = Hull::try_from_points(&points, 0.0).unwrap();

    assert_eq!(hull.vertex_count(), 8);
    assert_eq!(hull.face_count(), 6);
    assert_eq!(hull.edge_count(), 12);
    for face in hull.face_keys() {
        assert_eq!(hull.face_degree(face), 4);
        let n = hull.face(face).unwrap().plane.normal;
        assert_relative_eq!(n.abs().max_element(), 1.0, epsilon = 1e-12);
    }
    assert_relative_eq!(hull.volume(), 24.0, epsilon = 1e-10);
    assert!(hull.is_consistent());
    assert_convex_edges(&hull);
}

#[test]
fn test_interior_points_are_dropped() {
    let mut points = box_corners(DVec3::splat(-1.0), DVec3::ONE);
    for i in 0..5 {
        for j in 0..5 {
            for k in 0..5 {
                points.push(DVec3::new(i as f64, j as f64, k as f64) * 0.4 - DVec3::splat(0.8));
            }
        }
    }
    let hull = Hull::from_points(&points, 0.0);

    assert_eq!(hull.vertex_count(), 8);
    assert_eq!(hull.face_count(), 6);
    assert_contains(&hull, &points, 1e-12);
}

#[test]
fn test_near_duplicates_are_welded() {
    let mut points = box_corners(DVec3::ZERO, DVec3::ONE);
    let jittered: Vec<DVec3> = points.iter().map(|&p| p + DVec3::splat(1e-9)).collect();
    points.extend(jittered);
    points.extend(box_corners(DVec3::ZERO, DVec3::ONE));

    let hull = Hull::try_from_points(&points, 1e-6).unwrap();
    assert_eq!(hull.vertex_count(), 8);
    assert_eq!(hull.face_count(), 6);
    assert!(hull.is_consistent());
}

#[test]
fn test_sphere_points() {
    let points = fibonacci_sphere(300, 2.0);
    let hull = Hull::try_from_points(&points, 0.0).unwrap();

    assert_eq!(hull.vertex_count(), 300);
    assert!(hull.is_consistent());
    assert_convex_edges(&hull);
    assert_contains(&hull, &points, 1e-9);
    let euler = hull.vertex_count() as i64 - hull.edge_count() as i64 + hull.face_count() as i64;
    assert_eq!(euler, 2);
}

#[test]
fn test_points_on_box_faces() {
    let mut points = box_corners(DVec3::ZERO, DVec3::ONE);
    for i in 1..4 {
        for j in 1..4 {
            let (u, v) = (i as f64 * 0.25, j as f64 * 0.25);
            points.push(DVec3::new(u, v, 0.0));
            points.push(DVec3::new(u, v, 1.0));
            points.push(DVec3::new(0.0, u, v));
            points.push(DVec3::new(1.0, u, v));
            points.push(DVec3::new(u, 0.0, v));
            points.push(DVec3::new(u, 1.0, v));
        }
    }
    let hull = Hull::try_from_points(&points, 0.0).unwrap();

    assert!(hull.is_consistent());
    assert_contains(&hull, &points, 1e-12);
    assert_relative_eq!(hull.volume(), 1.0, epsilon = 1e-10);
}

#[test]
fn test_far_from_origin() {
    let offset = DVec3::new(1.0e6, -2.0e6, 5.0e5);
    let points: Vec<DVec3> = box_corners(DVec3::ZERO, DVec3::ONE)
        .into_iter()
        .map(|p| p + offset)
        .collect();
    let hull = Hull::try_from_points(&points, 0.0).unwrap();

    assert_eq!(hull.face_count(), 6);
    assert!(hull.bounds().contains(offset + DVec3::splat(0.5)));
    assert_relative_eq!(hull.volume(), 1.0, epsilon = 1e-6);
    assert!(hull.is_consistent());
}

#[test]
fn test_point_sized_cloud_far_from_origin() {
    let base = 1.0e6_f64;
    let next = f64::from_bits(base.to_bits() + 1);
    let points = [
        DVec3::new(base, base, base),
        DVec3::new(next, base, base),
        DVec3::new(base, next, base),
        DVec3::new(base, base, next),
        DVec3::new(next, next, next),
    ];
    assert!(matches!(
        Hull::try_from_points(&points, 0.0),
        Err(HullError::NoSpread { .. })
    ));
    let hull = Hull::from_points(&points, 0.0);
    assert!(hull.is_empty());
    assert!(hull.is_consistent());
}

#[test]
fn test_small_box_far_from_origin() {
    let offset = DVec3::splat(1.0e6);
    let points: Vec<DVec3> = box_corners(DVec3::ZERO, DVec3::splat(1.0e-3))
        .into_iter()
        .map(|p| p + offset)
        .collect();
    let hull = Hull::try_from_points(&points, 0.0).unwrap();
    assert_eq!(hull.face_count(), 6);
    assert!(hull.is_consistent());
}

#[test]
fn test_vertices_know_an_outgoing_edge() {
    let hull = Hull::from_points(&box_corners(DVec3::ZERO, DVec3::ONE), 0.0);
    for key in hull.vertex_keys() {
        let vertex = hull.vertex(key).unwrap();
        let edge = vertex.edge.and_then(|e| hull.half_edge(e)).unwrap();
        assert_eq!(edge.origin, key);
        assert!(vertex.conflict_face.is_none());
    }
    for face in hull.face_keys() {
        assert_eq!(hull.face(face).unwrap().mark, FaceMark::Visible);
        assert!(hull.face(face).unwrap().conflicts.is_empty());
    }
}

// =============================================================================
// DEGENERATE INPUT
// =============================================================================

#[test]
fn test_too_few_points() {
    let err = Hull::try_from_points(&tetrahedron()[..3], 0.0).unwrap_err();
    assert_eq!(
        err,
        HullError::TooFewPoints {
            count: 3,
            required: 4
        }
    );
    assert!(Hull::from_points(&[], 0.0).is_empty());
}

#[test]
fn test_identical_points_weld_to_nothing() {
    let points = vec![DVec3::splat(3.0); 10];
    assert!(matches!(
        Hull::try_from_points(&points, 0.0),
        Err(HullError::TooFewPoints { count: 1, .. })
    ));
}

#[test]
fn test_collinear_points() {
    let points: Vec<DVec3> = (0..10).map(|i| DVec3::new(1.0, 2.0, 3.0) * i as f64).collect();
    assert_eq!(
        Hull::try_from_points(&points, 0.0).unwrap_err(),
        HullError::Degenerate("all points are collinear")
    );
    let hull = Hull::from_points(&points, 0.0);
    assert!(hull.is_empty());
    assert_eq!(hull.state(), BuildState::Uninitialized);
    assert!(hull.is_consistent());
}

#[test]
fn test_coplanar_points() {
    let points: Vec<DVec3> = (0..20)
        .map(|i| {
            let a = i as f64 * 0.3;
            DVec3::new(a.cos(), a.sin(), 0.0)
        })
        .collect();
    assert_eq!(
        Hull::try_from_points(&points, 0.0).unwrap_err(),
        HullError::Degenerate("all points are coplanar")
    );
}

#[test]
fn test_four_collinear_points() {
    let points = [
        DVec3::ZERO,
        DVec3::new(1.0, 1.0, 0.0),
        DVec3::new(2.0, 2.0, 0.0),
        DVec3::new(3.0, 3.0, 0.0),
    ];
    assert_eq!(
        Hull::try_from_points(&points, 0.0).unwrap_err(),
        HullError::Degenerate("all points are collinear")
    );
    assert!(Hull::from_points(&points, 0.0).is_empty());
}

#[test]
fn test_four_coplanar_points() {
    let points = [DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::new(1.0, 1.0, 0.0)];
    assert_eq!(
        Hull::try_from_points(&points, 0.0).unwrap_err(),
        HullError::Degenerate("all points are coplanar")
    );
    assert!(Hull::from_points(&points, 0.0).is_empty());
}

#[test]
fn test_invalid_weld_tolerance() {
    for tol in [-0.1, 1.0, f64::NAN] {
        assert!(matches!(
            Hull::try_from_points(&tetrahedron(), tol),
            Err(HullError::InvalidTolerance(_))
        ));
    }
}

// =============================================================================
// HALF-SPACES
// =============================================================================

#[test]
fn test_halfspace_box() {
    let planes = box_planes(DVec3::new(1.0, 2.0, 3.0));
    let hull = Hull::try_from_halfspaces(&planes, 0.0, DVec3::new(0.1, -0.2, 0.3)).unwrap();

    assert_eq!(hull.vertex_count(), 8);
    assert_eq!(hull.face_count(), 6);
    assert_relative_eq!(hull.volume(), 48.0, epsilon = 1e-9);
    let bounds = hull.bounds();
    assert_relative_eq!(bounds.max.z, 3.0, epsilon = 1e-12);
    assert_relative_eq!(bounds.min.y, -2.0, epsilon = 1e-12);
}

#[test]
fn test_redundant_halfspaces_are_ignored() {
    let mut planes = box_planes(DVec3::ONE);
    planes.push(Plane::new(DVec3::X, 5.0));
    planes.push(Plane::new(DVec3::new(1.0, 1.0, 1.0).normalize(), 10.0));
    let hull = Hull::try_from_halfspaces(&planes, 0.0, DVec3::ZERO).unwrap();
    assert_eq!(hull.face_count(), 6);
    assert_relative_eq!(hull.volume(), 8.0, epsilon = 1e-9);
}

#[test]
fn test_halfspaces_cut_corner() {
    let mut planes = box_planes(DVec3::ONE);
    planes.push(Plane::new(DVec3::new(1.0, 1.0, 1.0).normalize(), 2.0 / 3.0_f64.sqrt()));
    let hull = Hull::try_from_halfspaces(&planes, 0.0, DVec3::ZERO).unwrap();
    assert_eq!(hull.face_count(), 7);
    assert_eq!(hull.vertex_count(), 10);
    assert!(hull.is_consistent());
}

#[test]
fn test_halfspace_interior_outside() {
    let planes = box_planes(DVec3::ONE);
    let err = Hull::try_from_halfspaces(&planes, 0.0, DVec3::new(2.0, 0.0, 0.0)).unwrap_err();
    assert!(matches!(err, HullError::InteriorOutside { index: 0, .. }));
}

#[test]
fn test_halfspaces_unbounded() {
    let planes = vec![
        Plane::new(DVec3::X, 1.0),
        Plane::new(DVec3::Y, 1.0),
        Plane::new(DVec3::Z, 1.0),
        Plane::new(DVec3::ONE.normalize(), 1.0),
    ];
    assert_eq!(
        Hull::try_from_halfspaces(&planes, 0.0, DVec3::ZERO).unwrap_err(),
        HullError::Unbounded
    );
    assert!(Hull::from_halfspaces(&planes, 0.0, DVec3::ZERO).is_empty());
}

// =============================================================================
// SIMPLIFICATION
// =============================================================================

#[test]
fn test_simplify_reduces_sphere() {
    let points = fibonacci_sphere(400, 1.0);
    let hull = Hull::from_points(&points, 0.0);
    let simple = hull.try_simplify(0.35).unwrap();

    assert!(simple.face_count() < hull.face_count());
    assert!(simple.is_consistent());
    // Within the weld distance of the rebuild
    assert_contains(&simple, &points, 1e-4);
}

#[test]
fn test_simplify_keeps_box() {
    let hull = Hull::from_points(&box_corners(DVec3::ZERO, DVec3::new(1.0, 2.0, 3.0)), 0.0);
    let simple = hull.simplify(0.0);
    assert_eq!(simple.face_count(), 6);
    assert_relative_eq!(simple.volume(), 6.0, epsilon = 1e-9);
}

#[test]
fn test_simplify_rejects_bad_angle() {
    let hull = Hull::from_points(&tetrahedron(), 0.0);
    assert!(matches!(
        hull.try_simplify(2.0),
        Err(HullError::InvalidTolerance(_))
    ));
    assert_eq!(hull.simplify(2.0).face_count(), 4);
}

// =============================================================================
// EXPORT
// =============================================================================

#[test]
fn test_mesh_export() {
    let hull = Hull::from_points(&box_corners(DVec3::ZERO, DVec3::ONE), 0.0);
    let mesh = hull.mesh();

    assert_eq!(mesh.vertices.len(), 8);
    assert_eq!(mesh.face_count(), 6);
    assert_eq!(mesh.face_indices.len(), 24);
    for (face, normal) in mesh.faces().zip(&mesh.face_normals) {
        assert_eq!(face.len(), 4);
        let corners: Vec<DVec3> = face.iter().map(|&i| mesh.vertices[i as usize]).collect();
        let winding = (corners[1] - corners[0]).cross(corners[2] - corners[0]);
        assert!(winding.dot(*normal) > 0.0);
    }
}

#[test]
fn test_triangulate() {
    let hull = Hull::from_points(&box_corners(DVec3::ZERO, DVec3::new(2.0, 3.0, 4.0)), 0.0);
    let mesh = hull.triangulate();
    assert_eq!(mesh.triangle_count(), 12);
    assert!(mesh.validate());
    assert_relative_eq!(mesh.signed_volume(), 24.0, epsilon = 1e-10);
}

#[test]
fn test_hull_data() {
    let hull = Hull::from_points(&box_corners(DVec3::ZERO, DVec3::new(2.0, 3.0, 4.0)), 0.0);
    let data = hull.to_data();

    assert!(data.validate());
    assert_eq!(data.vertex_count(), 8);
    assert_eq!(data.face_count(), 6);
    assert_eq!(data.edges.len(), 24);
    assert_relative_eq!(data.volume, 24.0, epsilon = 1e-10);
    assert_relative_eq!(data.compute_volume(), 24.0, epsilon = 1e-10);
    assert_relative_eq!(data.centroid.z, 2.0, epsilon = 1e-12);
    for face in 0..data.face_count() {
        let c = data.face_centroid(face);
        assert_relative_eq!(data.planes[face].distance(c), 0.0, epsilon = 1e-12);
    }
    assert_eq!(data.triangulate().triangle_count(), 12);
}

#[test]
fn test_hull_data_transform() {
    let hull = Hull::from_points(&box_corners(DVec3::ZERO, DVec3::ONE), 0.0);
    let mut data = hull.to_data();
    let transform = DAffine3::from_scale_rotation_translation(
        DVec3::splat(2.0),
        DQuat::from_rotation_y(0.3),
        DVec3::new(5.0, 0.0, 0.0),
    );
    data.transform(&transform);

    assert!(data.validate());
    assert_relative_eq!(data.volume, 8.0, epsilon = 1e-10);
    assert_relative_eq!(data.compute_volume(), 8.0, epsilon = 1e-10);
    assert_relative_eq!(data.centroid.x, transform.transform_point3(DVec3::splat(0.5)).x, epsilon = 1e-12);
    for face in 0..data.face_count() {
        for v in data.face_vertices(face) {
            assert_relative_eq!(data.planes[face].distance(v), 0.0, epsilon = 1e-10);
        }
    }
}

#[test]
fn test_hull_data_serde_shape() {
    let data = Hull::from_points(&tetrahedron(), 0.0).to_data();
    assert_eq!(data.edges.len(), 12);
    for (i, edge) in data.edges.iter().enumerate() {
        assert_eq!(edge.twin as usize, i ^ 1);
    }
}

// =============================================================================
// FREE FUNCTIONS
// =============================================================================

#[test]
fn test_hull_of_meshes() {
    let (mut a, mut b) = (Mesh::new(), Mesh::new());
    for p in tetrahedron() {
        a.add_vertex(p);
        b.add_vertex(p + DVec3::new(3.0, 0.0, 0.0));
    }

    let hull = crate::hull(&[&a, &b], &config::constants::HullConfig::default());
    assert_eq!(hull.vertex_count(), 6);
    assert!(hull.is_consistent());
}
