//! Input conditioning: centering, welding and tolerance derivation.

use super::Tolerances;
use crate::error::{HullError, HullResult};
use crate::math::Aabb;
use config::constants::MIN_HULL_POINTS;
use glam::DVec3;
use std::collections::{HashMap, HashSet};

/// Centered, welded input ready for construction.
#[derive(Debug, Clone)]
pub(super) struct Prepared {
    pub points: Vec<DVec3>,
    /// Centroid of the raw input; add back to return to input space.
    pub shift: DVec3,
    pub tolerances: Tolerances,
}

/// Shifts `points` onto their centroid, welds near-duplicates and derives
/// the tolerances from the result.
pub(super) fn prepare(points: &[DVec3], relative_weld_tolerance: f64) -> HullResult<Prepared> {
    if points.len() < MIN_HULL_POINTS {
        return Err(HullError::TooFewPoints {
            count: points.len(),
            required: MIN_HULL_POINTS,
        });
    }
    if points.iter().any(|p| !p.is_finite()) {
        return Err(HullError::Degenerate("non-finite input coordinate"));
    }

    let shift = points.iter().copied().sum::<DVec3>() / points.len() as f64;
    let centered: Vec<DVec3> = points.iter().map(|&p| p - shift).collect();

    let weld_distance = relative_weld_tolerance * Aabb::from_points(&centered).diagonal();
    let points = weld(&centered, weld_distance);
    if points.len() < MIN_HULL_POINTS {
        return Err(HullError::TooFewPoints {
            count: points.len(),
            required: MIN_HULL_POINTS,
        });
    }

    // Output coordinates carry the shift, so its magnitude bounds the
    // precision of every plane after shift-back.
    let max_abs = points
        .iter()
        .fold(DVec3::ZERO, |acc, p| acc.max(p.abs()))
        + shift.abs();
    let tolerances = Tolerances::from_magnitude(max_abs.x + max_abs.y + max_abs.z);

    tracing::debug!(
        input = centered.len(),
        welded = points.len(),
        tolerance = tolerances.tolerance,
        "hull input prepared"
    );
    Ok(Prepared {
        points,
        shift,
        tolerances,
    })
}

/// Removes points within `distance` of an earlier kept point.
///
/// Kept points are bucketed on a grid with cell size `distance`, so only
/// the 27 surrounding cells are searched per point. A non-positive
/// distance removes exact duplicates only.
pub(super) fn weld(points: &[DVec3], distance: f64) -> Vec<DVec3> {
    let mut kept = Vec::with_capacity(points.len());

    if !(distance > 0.0) {
        let mut seen = HashSet::with_capacity(points.len());
        for &p in points {
            // -0.0 and 0.0 are the same position.
            let bits = (p + DVec3::ZERO).to_array().map(f64::to_bits);
            if seen.insert(bits) {
                kept.push(p);
            }
        }
        return kept;
    }

    let inv_cell = 1.0 / distance;
    let cell_of = |p: DVec3| -> (i64, i64, i64) {
        let c = (p * inv_cell).floor();
        (c.x as i64, c.y as i64, c.z as i64)
    };
    let distance_sq = distance * distance;
    let mut grid: HashMap<(i64, i64, i64), Vec<usize>> = HashMap::new();

    for &p in points {
        let (cx, cy, cz) = cell_of(p);
        let mut duplicate = false;
        'search: for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let Some(bucket) = grid.get(&(cx + dx, cy + dy, cz + dz)) else {
                        continue;
                    };
                    if bucket
                        .iter()
                        .any(|&i| kept[i].distance_squared(p) <= distance_sq)
                    {
                        duplicate = true;
                        break 'search;
                    }
                }
            }
        }
        if !duplicate {
            grid.entry((cx, cy, cz)).or_default().push(kept.len());
            kept.push(p);
        }
    }
    kept
}
