//! Direct least-squares ellipse fitting (Fitzgibbon et al., 1999) and the
//! orientation derived from it.
//!
//! Orientation convention: degrees from the +x image axis toward +y (rows
//! grow downward), normalized to `[0, 180)`.
use nalgebra::{DMatrix, Matrix3, Vector3};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Fewest boundary points for which an orientation is reported.
pub const MIN_FIT_POINTS: usize = 5;

/// Geometric ellipse: center, semi-axes (major first) and major-axis angle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ellipse {
    pub cx: f64,
    pub cy: f64,
    pub semi_major: f64,
    pub semi_minor: f64,
    pub angle_deg: f64,
}

/// Major-axis angle of the boundary, or `None` below [`MIN_FIT_POINTS`].
///
/// When the direct fit cannot produce a proper ellipse the principal axis of
/// the point covariance is used instead.
pub fn orientation_deg(points: &[[f64; 2]]) -> Option<f64> {
    if points.len() < MIN_FIT_POINTS {
        return None;
    }
    match fit_ellipse_direct(points) {
        Some(e) => Some(e.angle_deg),
        None => {
            debug!(
                "Ellipse fit failed on {} points, using covariance axis",
                points.len()
            );
            Some(principal_axis_deg(points))
        }
    }
}

/// Fit an ellipse to at least five points.
///
/// Returns `None` when the scatter system is singular (e.g. collinear points)
/// or the solution is not a proper, finite ellipse.
pub fn fit_ellipse_direct(points: &[[f64; 2]]) -> Option<Ellipse> {
    let n = points.len();
    if n < MIN_FIT_POINTS {
        return None;
    }

    let (mean_x, mean_y, scale) = normalization_params(points);
    if is_collinear(points, mean_x, mean_y) {
        return None;
    }

    let mut d = DMatrix::<f64>::zeros(n, 6);
    for (i, &[px, py]) in points.iter().enumerate() {
        let x = (px - mean_x) * scale;
        let y = (py - mean_y) * scale;
        d[(i, 0)] = x * x;
        d[(i, 1)] = x * y;
        d[(i, 2)] = y * y;
        d[(i, 3)] = x;
        d[(i, 4)] = y;
        d[(i, 5)] = 1.0;
    }

    let s = d.transpose() * &d;
    let s11: Matrix3<f64> = s.fixed_view::<3, 3>(0, 0).into_owned();
    let s12: Matrix3<f64> = s.fixed_view::<3, 3>(0, 3).into_owned();
    let s22: Matrix3<f64> = s.fixed_view::<3, 3>(3, 3).into_owned();

    // Ellipse constraint 4AC - B^2 = 1 in matrix form.
    let c1 = Matrix3::new(0.0, 0.0, 2.0, 0.0, -1.0, 0.0, 2.0, 0.0, 0.0);

    let s22_inv = s22.try_inverse()?;
    let m = s11 - s12 * s22_inv * s12.transpose();
    let system = c1.try_inverse()? * m;

    let a1 = constrained_eigenvector(&system)?;
    let a2 = -s22_inv * s12.transpose() * a1;

    let coeffs = denormalize_conic(
        [a1[0], a1[1], a1[2], a2[0], a2[1], a2[2]],
        mean_x,
        mean_y,
        scale,
    );
    conic_to_ellipse(coeffs)
}

/// Principal-axis angle of the point cloud's covariance, in `[0, 180)`.
pub fn principal_axis_deg(points: &[[f64; 2]]) -> f64 {
    let n = points.len().max(1) as f64;
    let mx = points.iter().map(|p| p[0]).sum::<f64>() / n;
    let my = points.iter().map(|p| p[1]).sum::<f64>() / n;

    let (mut sxx, mut syy, mut sxy) = (0.0, 0.0, 0.0);
    for p in points {
        let dx = p[0] - mx;
        let dy = p[1] - my;
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }
    normalize_angle_deg((0.5 * (2.0 * sxy).atan2(sxx - syy)).to_degrees())
}

pub(crate) fn normalize_angle_deg(angle: f64) -> f64 {
    let a = angle.rem_euclid(180.0);
    if a >= 180.0 { 0.0 } else { a }
}

/// Shift to the centroid and scale so the mean distance is sqrt(2).
fn normalization_params(points: &[[f64; 2]]) -> (f64, f64, f64) {
    let n = points.len() as f64;
    let mean_x = points.iter().map(|p| p[0]).sum::<f64>() / n;
    let mean_y = points.iter().map(|p| p[1]).sum::<f64>() / n;

    let mean_dist = points
        .iter()
        .map(|p| (p[0] - mean_x).hypot(p[1] - mean_y))
        .sum::<f64>()
        / n;

    let scale = if mean_dist > 1e-15 {
        std::f64::consts::SQRT_2 / mean_dist
    } else {
        1.0
    };
    (mean_x, mean_y, scale)
}

fn is_collinear(points: &[[f64; 2]], mean_x: f64, mean_y: f64) -> bool {
    let (mut sxx, mut syy, mut sxy) = (0.0, 0.0, 0.0);
    for p in points {
        let dx = p[0] - mean_x;
        let dy = p[1] - mean_y;
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }
    let trace = sxx + syy;
    sxx * syy - sxy * sxy <= 1e-12 * trace * trace
}

/// Undo `x' = s(x - mx), y' = s(y - my)` on conic coefficients.
fn denormalize_conic(c: [f64; 6], mx: f64, my: f64, s: f64) -> [f64; 6] {
    let [a_, b_, c_, d_, e_, f_] = c;
    let s2 = s * s;

    let a = a_ * s2;
    let b = b_ * s2;
    let c = c_ * s2;
    let d = -2.0 * a_ * s2 * mx - b_ * s2 * my + d_ * s;
    let e = -b_ * s2 * mx - 2.0 * c_ * s2 * my + e_ * s;
    let f =
        a_ * s2 * mx * mx + b_ * s2 * mx * my + c_ * s2 * my * my - d_ * s * mx - e_ * s * my + f_;

    [a, b, c, d, e, f]
}

/// Geometric parameters of `A x^2 + B xy + C y^2 + D x + E y + F = 0`.
fn conic_to_ellipse(coeffs: [f64; 6]) -> Option<Ellipse> {
    let [mut a, mut b, mut c, mut d, mut e, mut f] = coeffs;

    let det = 4.0 * a * c - b * b;
    if det <= 0.0 || !det.is_finite() {
        return None;
    }
    // Make the quadratic form positive definite.
    if a + c < 0.0 {
        a = -a;
        b = -b;
        c = -c;
        d = -d;
        e = -e;
        f = -f;
    }

    let cx = (b * e - 2.0 * c * d) / det;
    let cy = (b * d - 2.0 * a * e) / det;
    let f0 = f + (d * cx + e * cy) / 2.0;
    if f0 >= 0.0 {
        return None;
    }

    let mean = (a + c) / 2.0;
    let spread = ((a - c) / 2.0).hypot(b / 2.0);
    let lambda_small = mean - spread;
    let lambda_large = mean + spread;
    if lambda_small <= 0.0 {
        return None;
    }

    let semi_major = (-f0 / lambda_small).sqrt();
    let semi_minor = (-f0 / lambda_large).sqrt();

    // 0.5*atan2(B, A-C) points along the large-eigenvalue (minor) axis.
    let minor_dir = 0.5 * b.atan2(a - c);
    let angle_deg = normalize_angle_deg(minor_dir.to_degrees() + 90.0);

    let ellipse = Ellipse {
        cx,
        cy,
        semi_major,
        semi_minor,
        angle_deg,
    };
    let finite = [cx, cy, semi_major, semi_minor, angle_deg]
        .iter()
        .all(|v| v.is_finite());
    if finite && semi_minor > 0.0 {
        Some(ellipse)
    } else {
        None
    }
}

/// Eigenvector of `C1^-1 M` that satisfies the ellipse constraint.
fn constrained_eigenvector(system: &Matrix3<f64>) -> Option<Vector3<f64>> {
    let a = system;
    let tr = a.trace();
    let minor_sum = a[(0, 0)] * a[(1, 1)] - a[(0, 1)] * a[(1, 0)] + a[(0, 0)] * a[(2, 2)]
        - a[(0, 2)] * a[(2, 0)]
        + a[(1, 1)] * a[(2, 2)]
        - a[(1, 2)] * a[(2, 1)];
    let det = a.determinant();

    let mut best: Option<(f64, Vector3<f64>)> = None;
    for ev in solve_cubic_real(-tr, minor_sum, -det) {
        let shifted = system - Matrix3::identity() * ev;
        let Some(v) = null_vector_3x3(&shifted) else {
            continue;
        };
        let constraint = 4.0 * v[0] * v[2] - v[1] * v[1];
        if constraint > 0.0 && best.as_ref().is_none_or(|(b, _)| ev.abs() < *b) {
            best = Some((ev.abs(), v));
        }
    }
    best.map(|(_, v)| v)
}

/// Null vector of a rank-2 matrix: the adjugate row with the largest norm.
fn null_vector_3x3(m: &Matrix3<f64>) -> Option<Vector3<f64>> {
    let rows = [
        Vector3::new(
            m[(1, 1)] * m[(2, 2)] - m[(1, 2)] * m[(2, 1)],
            -(m[(1, 0)] * m[(2, 2)] - m[(1, 2)] * m[(2, 0)]),
            m[(1, 0)] * m[(2, 1)] - m[(1, 1)] * m[(2, 0)],
        ),
        Vector3::new(
            -(m[(0, 1)] * m[(2, 2)] - m[(0, 2)] * m[(2, 1)]),
            m[(0, 0)] * m[(2, 2)] - m[(0, 2)] * m[(2, 0)],
            -(m[(0, 0)] * m[(2, 1)] - m[(0, 1)] * m[(2, 0)]),
        ),
        Vector3::new(
            m[(0, 1)] * m[(1, 2)] - m[(0, 2)] * m[(1, 1)],
            -(m[(0, 0)] * m[(1, 2)] - m[(0, 2)] * m[(1, 0)]),
            m[(0, 0)] * m[(1, 1)] - m[(0, 1)] * m[(1, 0)],
        ),
    ];

    let best = rows
        .iter()
        .max_by(|a, b| a.norm_squared().total_cmp(&b.norm_squared()))?;
    let norm_sq = best.norm_squared();
    if norm_sq < 1e-30 {
        return None;
    }
    Some(best / norm_sq.sqrt())
}

/// Real roots of the monic cubic `x^3 + b x^2 + c x + d`.
fn solve_cubic_real(b: f64, c: f64, d: f64) -> Vec<f64> {
    let p = c - b * b / 3.0;
    let q = 2.0 * b * b * b / 27.0 - b * c / 3.0 + d;
    let shift = -b / 3.0;
    let disc = -4.0 * p * p * p - 27.0 * q * q;

    if disc >= 0.0 {
        let r = (-p / 3.0).sqrt();
        let cos_arg = if r.abs() < 1e-15 {
            0.0
        } else {
            (-q / (2.0 * r * r * r)).clamp(-1.0, 1.0)
        };
        let theta = cos_arg.acos();
        let tau = 2.0 * std::f64::consts::PI;
        (0..3)
            .map(|k| 2.0 * r * ((theta + tau * k as f64) / 3.0).cos() + shift)
            .collect()
    } else {
        let sqrt_disc = (q * q / 4.0 + p * p * p / 27.0).sqrt();
        let u = (-q / 2.0 + sqrt_disc).cbrt();
        let v = (-q / 2.0 - sqrt_disc).cbrt();
        vec![u + v + shift]
    }
}
