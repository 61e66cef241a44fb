//! Property-based tests for hull construction.
//!
//! For random point clouds that produce a hull:
//! - The hull passes every consistency check
//! - Every input point lies inside or on the surface
//! - Rebuilding from the hull's own vertices reproduces the same faces and volume
//! - Exported forms agree on the enclosed volume

use glam::DVec3;
use hull_kernel::Hull;
use proptest::prelude::*;

// =============================================================================
// TEST CONFIGURATION
// =============================================================================

/// Strategy for finite coordinates in a moderate range
fn coordinate() -> impl Strategy<Value = f64> {
    -100.0..100.0f64
}

fn point() -> impl Strategy<Value = DVec3> {
    (coordinate(), coordinate(), coordinate()).prop_map(|(x, y, z)| DVec3::new(x, y, z))
}

fn cloud() -> impl Strategy<Value = Vec<DVec3>> {
    prop::collection::vec(point(), 4..80)
}

/// Allowed distance of an input point outside a face plane.
const SLACK: f64 = 1e-7;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Property: constructed hulls satisfy every structural invariant
    #[test]
    fn prop_hull_is_consistent(points in cloud()) {
        if let Ok(hull) = Hull::try_from_points(&points, 0.0) {
            prop_assert!(
                hull.check_consistency().is_ok(),
                "inconsistent hull: {:?}",
                hull.check_consistency().err()
            );
            prop_assert!(hull.vertex_count() >= 4);
            prop_assert!(hull.face_count() >= 4);
        }
    }

    /// Property: no input point lies outside the hull
    #[test]
    fn prop_hull_contains_input(points in cloud()) {
        if let Ok(hull) = Hull::try_from_points(&points, 0.0) {
            for plane in hull.planes() {
                for &p in &points {
                    prop_assert!(
                        plane.distance(p) <= SLACK,
                        "point {:?} is {} outside",
                        p,
                        plane.distance(p)
                    );
                }
            }
        }
    }

    /// Property: the hull of the hull's vertices is the same solid
    #[test]
    fn prop_hull_is_idempotent(points in cloud()) {
        if let Ok(hull) = Hull::try_from_points(&points, 0.0) {
            let again = Hull::try_from_points(&hull.vertex_positions(), 0.0);
            prop_assert!(again.is_ok());
            if let Ok(again) = again {
                prop_assert!(again.vertex_count() <= hull.vertex_count());
                prop_assert_eq!(again.face_count(), hull.face_count());
                let (a, b) = (hull.volume(), again.volume());
                prop_assert!((a - b).abs() <= 1e-9 * a.max(1.0), "volume {} vs {}", a, b);
            }
        }
    }

    /// Property: mass, triangulation and compact export agree on volume
    #[test]
    fn prop_exports_agree_on_volume(points in cloud()) {
        if let Ok(hull) = Hull::try_from_points(&points, 0.0) {
            let volume = hull.volume();
            prop_assert!(volume > 0.0);

            let mesh = hull.triangulate();
            prop_assert!(mesh.validate());
            prop_assert!((mesh.signed_volume() - volume).abs() <= 1e-7 * volume.max(1.0));

            let data = hull.to_data();
            prop_assert!(data.validate());
            prop_assert_eq!(data.edges.len(), 2 * hull.edge_count());
            prop_assert!((data.volume - volume).abs() <= 1e-9 * volume.max(1.0));
        }
    }

    /// Property: translating the input translates the hull
    #[test]
    fn prop_translation_invariance(points in cloud(), shift in point()) {
        let moved: Vec<DVec3> = points.iter().map(|&p| p + shift * 10.0).collect();
        if let (Ok(a), Ok(b)) = (
            Hull::try_from_points(&points, 0.0),
            Hull::try_from_points(&moved, 0.0),
        ) {
            let (va, vb) = (a.volume(), b.volume());
            prop_assert!((va - vb).abs() <= 1e-6 * va.max(1.0), "volume {} vs {}", va, vb);
        }
    }
}
