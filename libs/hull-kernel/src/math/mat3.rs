//! # 3x3 Matrix Helpers
//!
//! Small additions on top of `glam::DMat3` used by mass computation and
//! principal-axis extraction.

use glam::{DMat3, DVec3};

/// Covariance of the canonical tetrahedron `(0, e_x, e_y, e_z)` scaled by
/// the determinant of its vertex matrix: `1/120 * [[2,1,1],[1,2,1],[1,1,2]]`.
pub const CANONICAL_TETRAHEDRON_COVARIANCE: DMat3 = DMat3::from_cols(
    DVec3::new(1.0 / 60.0, 1.0 / 120.0, 1.0 / 120.0),
    DVec3::new(1.0 / 120.0, 1.0 / 60.0, 1.0 / 120.0),
    DVec3::new(1.0 / 120.0, 1.0 / 120.0, 1.0 / 60.0),
);

/// Maximum Jacobi sweeps; 3x3 symmetric matrices converge in a handful.
const MAX_JACOBI_SWEEPS: usize = 32;

/// Outer product `a * b^T`.
#[inline]
pub fn outer(a: DVec3, b: DVec3) -> DMat3 {
    DMat3::from_cols(a * b.x, a * b.y, a * b.z)
}

/// Sum of the diagonal.
#[inline]
pub fn trace(m: &DMat3) -> f64 {
    m.x_axis.x + m.y_axis.y + m.z_axis.z
}

/// Eigen decomposition of a symmetric matrix by cyclic Jacobi rotations.
///
/// Returns the eigenvalues and a rotation whose columns are the matching
/// unit eigenvectors (right-handed).
///
/// # Example
///
/// ```rust
/// use glam::{DMat3, DVec3};
/// use hull_kernel::math::symmetric_eigen;
///
/// let m = DMat3::from_diagonal(DVec3::new(3.0, 1.0, 2.0));
/// let (values, vectors) = symmetric_eigen(&m);
/// assert!((values.x - 3.0).abs() < 1e-12);
/// assert!((vectors.determinant() - 1.0).abs() < 1e-12);
/// ```
pub fn symmetric_eigen(m: &DMat3) -> (DVec3, DMat3) {
    // a[row][col]
    let mut a = [[0.0f64; 3]; 3];
    for (col, axis) in [m.x_axis, m.y_axis, m.z_axis].iter().enumerate() {
        for row in 0..3 {
            a[row][col] = axis[row];
        }
    }
    let mut v = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

    let scale = a.iter().flatten().map(|x| x * x).sum::<f64>();
    for _ in 0..MAX_JACOBI_SWEEPS {
        let off = a[0][1] * a[0][1] + a[0][2] * a[0][2] + a[1][2] * a[1][2];
        if off <= scale * 1e-30 {
            break;
        }
        for (p, q) in [(0, 1), (0, 2), (1, 2)] {
            let apq = a[p][q];
            if apq.abs() <= f64::MIN_POSITIVE {
                continue;
            }
            let theta = (a[q][q] - a[p][p]) / (2.0 * apq);
            let t = theta.signum() / (theta.abs() + (theta * theta + 1.0).sqrt());
            let c = 1.0 / (t * t + 1.0).sqrt();
            let s = t * c;

            for row in a.iter_mut() {
                let (akp, akq) = (row[p], row[q]);
                row[p] = c * akp - s * akq;
                row[q] = s * akp + c * akq;
            }
            for k in 0..3 {
                let (apk, aqk) = (a[p][k], a[q][k]);
                a[p][k] = c * apk - s * aqk;
                a[q][k] = s * apk + c * aqk;
            }
            for row in v.iter_mut() {
                let (vkp, vkq) = (row[p], row[q]);
                row[p] = c * vkp - s * vkq;
                row[q] = s * vkp + c * vkq;
            }
        }
    }

    let values = DVec3::new(a[0][0], a[1][1], a[2][2]);
    let column = |j: usize| DVec3::new(v[0][j], v[1][j], v[2][j]);
    let mut vectors = DMat3::from_cols(column(0), column(1), column(2));
    if vectors.determinant() < 0.0 {
        vectors.z_axis = -vectors.z_axis;
    }
    (values, vectors)
}
