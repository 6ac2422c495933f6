//! Spatial and central moments of a closed polygon.
//!
//! Integrals are taken over the area enclosed by the contour using Green's
//! theorem, so a traced boundary yields the moments of the filled shape
//! without touching the pixel grid.
use imageproc::point::Point;
use serde::{Deserialize, Serialize};

/// Spatial moments `mPQ` up to order 3 and central moments `muPQ` of orders 2 and 3.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Moments {
    pub m00: f64,
    pub m10: f64,
    pub m01: f64,
    pub m20: f64,
    pub m11: f64,
    pub m02: f64,
    pub m30: f64,
    pub m21: f64,
    pub m12: f64,
    pub m03: f64,
    pub mu20: f64,
    pub mu11: f64,
    pub mu02: f64,
    pub mu30: f64,
    pub mu21: f64,
    pub mu12: f64,
    pub mu03: f64,
}

impl Moments {
    /// Moments of the polygon enclosed by `points`.
    ///
    /// Traversal direction does not matter: a clockwise contour has its sums
    /// negated so that `m00` is always the non-negative area.
    pub fn of_polygon(points: &[Point<i32>]) -> Self {
        let n = points.len();
        if n < 3 {
            return Self::default();
        }

        let (mut a00, mut a10, mut a01) = (0.0, 0.0, 0.0);
        let (mut a20, mut a11, mut a02) = (0.0, 0.0, 0.0);
        let (mut a30, mut a21, mut a12, mut a03) = (0.0, 0.0, 0.0, 0.0);

        let last = points[n - 1];
        let (mut xi_1, mut yi_1) = (last.x as f64, last.y as f64);
        let (mut xi_12, mut yi_12) = (xi_1 * xi_1, yi_1 * yi_1);

        for p in points {
            let (xi, yi) = (p.x as f64, p.y as f64);
            let (xi2, yi2) = (xi * xi, yi * yi);
            let dxy = xi_1 * yi - xi * yi_1;
            let xii_1 = xi_1 + xi;
            let yii_1 = yi_1 + yi;

            a00 += dxy;
            a10 += dxy * xii_1;
            a01 += dxy * yii_1;
            a20 += dxy * (xi_1 * xii_1 + xi2);
            a11 += dxy * (xi_1 * (yii_1 + yi_1) + xi * (yii_1 + yi));
            a02 += dxy * (yi_1 * yii_1 + yi2);
            a30 += dxy * xii_1 * (xi_12 + xi2);
            a03 += dxy * yii_1 * (yi_12 + yi2);
            a21 += dxy
                * (xi_12 * (3.0 * yi_1 + yi) + 2.0 * xi * xi_1 * yii_1 + xi2 * (yi_1 + 3.0 * yi));
            a12 += dxy
                * (yi_12 * (3.0 * xi_1 + xi) + 2.0 * yi * yi_1 * xii_1 + yi2 * (xi_1 + 3.0 * xi));

            xi_1 = xi;
            yi_1 = yi;
            xi_12 = xi2;
            yi_12 = yi2;
        }

        if a00.abs() <= f64::from(f32::EPSILON) {
            return Self::default();
        }

        let sign = if a00 > 0.0 { 1.0 } else { -1.0 };
        let mut m = Moments {
            m00: sign * a00 / 2.0,
            m10: sign * a10 / 6.0,
            m01: sign * a01 / 6.0,
            m20: sign * a20 / 12.0,
            m11: sign * a11 / 24.0,
            m02: sign * a02 / 12.0,
            m30: sign * a30 / 20.0,
            m21: sign * a21 / 60.0,
            m12: sign * a12 / 60.0,
            m03: sign * a03 / 20.0,
            ..Default::default()
        };
        m.complete_central();
        m
    }

    fn complete_central(&mut self) {
        if self.m00 == 0.0 {
            return;
        }
        let cx = self.m10 / self.m00;
        let cy = self.m01 / self.m00;

        self.mu20 = self.m20 - self.m10 * cx;
        self.mu11 = self.m11 - self.m10 * cy;
        self.mu02 = self.m02 - self.m01 * cy;
        self.mu30 = self.m30 - cx * (3.0 * self.mu20 + cx * self.m10);
        self.mu21 = self.m21 - cx * (2.0 * self.mu11 + cx * self.m01) - cy * self.mu20;
        self.mu12 = self.m12 - cy * (2.0 * self.mu11 + cy * self.m10) - cx * self.mu02;
        self.mu03 = self.m03 - cy * (3.0 * self.mu02 + cy * self.m01);
    }

    /// Centroid truncated to whole pixels; `(0, 0)` for a zero-area shape.
    pub fn centroid(&self) -> (i32, i32) {
        if self.m00 == 0.0 {
            return (0, 0);
        }
        (
            (self.m10 / self.m00) as i32,
            (self.m01 / self.m00) as i32,
        )
    }

    /// Moment-based elongation statistic `sqrt(1 - mu20 / (mu02 + 1e-5))`.
    ///
    /// This is not the conic eccentricity of the equivalent ellipse. It is
    /// kept as-is so reports stay comparable with earlier measurements, and
    /// it evaluates to NaN when `mu20` exceeds `mu02`. Returns 0 when both
    /// central moments vanish.
    pub fn eccentricity(&self) -> f64 {
        if self.mu02 + self.mu20 == 0.0 {
            return 0.0;
        }
        (1.0 - self.mu20 / (self.mu02 + ECCENTRICITY_EPSILON)).sqrt()
    }
}

const ECCENTRICITY_EPSILON: f64 = 1e-5;
