//! Mask binarization and outer-boundary extraction.
//!
//! Boundaries come from Suzuki–Abe border following
//! (`imageproc::contours::find_contours`); only outermost outer borders are
//! kept, then each chain is compressed to its corner points.
use image::imageops;
use image::{GrayImage, Luma};
use imageproc::contours::{BorderType, find_contours};
use imageproc::point::Point;
use tracing::debug;

use crate::types::BoundingBox;

/// One connected foreground component, described by its outer boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    /// Position in discovery order, stable across any later sort.
    pub index: usize,
    pub points: Vec<Point<i32>>,
}

/// Map every intensity above `threshold` to 255, everything else to 0.
pub fn binarize(gray: &GrayImage, threshold: u8) -> GrayImage {
    GrayImage::from_fn(gray.width(), gray.height(), |x, y| {
        if gray.get_pixel(x, y)[0] > threshold {
            Luma([255])
        } else {
            Luma([0])
        }
    })
}

/// Trace the outermost boundary of every foreground component.
///
/// Holes and components nested inside holes are skipped. The order is the
/// raster order in which the tracer meets each component's first pixel.
pub fn extract_regions(binary: &GrayImage) -> Vec<Region> {
    // The tracer only opens an outer border at x > 0, so components touching
    // column 0 need a background frame around them.
    let mut framed = GrayImage::new(binary.width() + 2, binary.height() + 2);
    imageops::replace(&mut framed, binary, 1, 1);

    let contours = find_contours::<i32>(&framed);
    let total = contours.len();

    let regions: Vec<Region> = contours
        .into_iter()
        .filter(|c| c.border_type == BorderType::Outer && c.parent.is_none())
        .enumerate()
        .map(|(index, c)| {
            let points: Vec<Point<i32>> = c
                .points
                .iter()
                .map(|p| Point::new(p.x - 1, p.y - 1))
                .collect();
            Region {
                index,
                points: simplify_chain(&points),
            }
        })
        .collect();

    debug!(
        "Traced {} borders, kept {} outer regions",
        total,
        regions.len()
    );
    regions
}

/// Drop every point that continues the previous step in the same direction.
///
/// Border points are 8-connected, so equal consecutive steps mean the point
/// lies on a straight horizontal, vertical or diagonal run.
pub fn simplify_chain(points: &[Point<i32>]) -> Vec<Point<i32>> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }

    (0..n)
        .filter(|&i| {
            let prev = points[(i + n - 1) % n];
            let cur = points[i];
            let next = points[(i + 1) % n];
            let step_in = (cur.x - prev.x, cur.y - prev.y);
            let step_out = (next.x - cur.x, next.y - cur.y);
            step_in != step_out
        })
        .map(|i| points[i])
        .collect()
}

/// Smallest axis-aligned rectangle covering all points, counted in whole pixels.
pub fn bounding_box(points: &[Point<i32>]) -> BoundingBox {
    let Some(first) = points.first() else {
        return BoundingBox::default();
    };

    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
    for p in &points[1..] {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }

    BoundingBox {
        x: min_x,
        y: min_y,
        width: (max_x - min_x + 1) as u32,
        height: (max_y - min_y + 1) as u32,
    }
}

/// Unsigned shoelace area of the closed polygon.
pub fn polygon_area(points: &[Point<i32>]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let twice: f64 = (0..n)
        .map(|i| {
            let a = points[i];
            let b = points[(i + 1) % n];
            a.x as f64 * b.y as f64 - b.x as f64 * a.y as f64
        })
        .sum();
    (twice / 2.0).abs()
}

/// Length of the closed polyline, including the segment back to the start.
pub fn closed_perimeter(points: &[Point<i32>]) -> f64 {
    match points {
        [] | [_] => 0.0,
        // There and back again.
        [a, b] => 2.0 * ((b.x - a.x) as f64).hypot((b.y - a.y) as f64),
        _ => imageproc::geometry::arc_length(points, true),
    }
}

/// Ordered convex hull of the boundary points.
pub fn convex_hull(points: &[Point<i32>]) -> Vec<Point<i32>> {
    if points.len() < 3 {
        let mut hull = points.to_vec();
        hull.dedup();
        return hull;
    }
    imageproc::geometry::convex_hull(points)
}
