use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::features::contour::{
    Region, bounding_box, closed_perimeter, convex_hull, polygon_area,
};
use crate::core::features::ellipse::orientation_deg;
use crate::core::features::enclosing::min_enclosing_circle;
use crate::core::features::moments::Moments;
use crate::types::{BoundingBox, Circle};

/// Scaled descriptors of one region. Pixel values use image coordinates,
/// `_cm` values are pixel values multiplied by the scaling factor (squared
/// for area).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionMetrics {
    pub index: usize,
    pub point_count: usize,
    pub area_px: f64,
    pub area_cm2: f64,
    pub perimeter_px: f64,
    pub perimeter_cm: f64,
    pub bounding_box: BoundingBox,
    pub width_cm: f64,
    pub height_cm: f64,
    /// `None` when the bounding box has zero height
    pub aspect_ratio: Option<f64>,
    pub convex_hull: Vec<[i32; 2]>,
    pub enclosing_circle: Circle,
    pub radius_cm: f64,
    pub centroid: (i32, i32),
    pub centroid_cm: (f64, f64),
    /// Major-axis angle in degrees, `[0, 180)`; `None` below five boundary points
    pub orientation_deg: Option<f64>,
    pub eccentricity: f64,
    pub moments: Moments,
}

pub fn compute_metrics(region: &Region, scaling_factor: f64) -> RegionMetrics {
    let points = &region.points;
    let s = scaling_factor;

    let area_px = polygon_area(points);
    let perimeter_px = closed_perimeter(points);

    let bbox = bounding_box(points);
    let hull = convex_hull(points);
    let circle = min_enclosing_circle(&hull);

    let moments = Moments::of_polygon(points);
    let centroid = moments.centroid();

    let fit_points: Vec<[f64; 2]> = points.iter().map(|p| [p.x as f64, p.y as f64]).collect();
    let orientation = orientation_deg(&fit_points);

    let metrics = RegionMetrics {
        index: region.index,
        point_count: points.len(),
        area_px,
        area_cm2: area_px * s * s,
        perimeter_px,
        perimeter_cm: perimeter_px * s,
        bounding_box: bbox,
        width_cm: bbox.width as f64 * s,
        height_cm: bbox.height as f64 * s,
        aspect_ratio: bbox.aspect_ratio(),
        convex_hull: hull.iter().map(|p| [p.x, p.y]).collect(),
        enclosing_circle: circle,
        radius_cm: circle.radius * s,
        centroid,
        centroid_cm: (centroid.0 as f64 * s, centroid.1 as f64 * s),
        orientation_deg: orientation,
        eccentricity: moments.eccentricity(),
        moments,
    };

    debug!(
        "Region {}: {} points, area {:.1} px^2, perimeter {:.1} px, centroid {:?}",
        metrics.index, metrics.point_count, metrics.area_px, metrics.perimeter_px, metrics.centroid
    );
    metrics
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::features::contour::extract_regions;
    use crate::core::features::contour::tests::mask_with_rects;
    use approx::assert_relative_eq;
    use image::Luma;
    use imageproc::point::Point;

    const SCALE: f64 = 0.03;

    fn single_region(mask: &image::GrayImage) -> Region {
        let mut regions = extract_regions(mask);
        assert_eq!(regions.len(), 1);
        regions.remove(0)
    }

    #[test]
    fn square_of_one_hundred_pixels() {
        let mask = mask_with_rects(200, 200, &[(50, 50, 100, 100)]);
        let m = compute_metrics(&single_region(&mask), SCALE);

        assert_eq!(m.point_count, 4);
        assert_relative_eq!(m.area_px, 99.0 * 99.0);
        assert_relative_eq!(m.area_cm2, 99.0 * 99.0 * 0.0009, epsilon = 1e-9);
        assert_relative_eq!(m.perimeter_px, 396.0, epsilon = 1e-9);
        assert_relative_eq!(m.perimeter_cm, 11.88, epsilon = 1e-9);
        assert_eq!(
            m.bounding_box,
            BoundingBox {
                x: 50,
                y: 50,
                width: 100,
                height: 100
            }
        );
        assert_relative_eq!(m.width_cm, 3.0, epsilon = 1e-9);
        assert_eq!(m.aspect_ratio, Some(1.0));
        assert_eq!(m.centroid, (99, 99));
        assert_relative_eq!(m.centroid_cm.0, 2.97, epsilon = 1e-9);
        assert_relative_eq!(m.enclosing_circle.cx, 99.5, epsilon = 1e-9);
        assert_relative_eq!(m.enclosing_circle.radius, 99.0 * std::f64::consts::SQRT_2 / 2.0, epsilon = 1e-6);
        assert_relative_eq!(m.radius_cm, m.enclosing_circle.radius * SCALE);
        assert_eq!(m.orientation_deg, None);
        assert!(m.eccentricity < 1e-3);
        assert_eq!(m.convex_hull.len(), 4);
    }

    #[test]
    fn clipped_corner_gives_orientation() {
        let mut mask = mask_with_rects(200, 200, &[(50, 50, 100, 100)]);
        mask.put_pixel(50, 50, Luma([0]));
        let m = compute_metrics(&single_region(&mask), SCALE);

        assert!(m.point_count >= 5);
        let angle = m.orientation_deg.expect("orientation defined");
        assert!((0.0..180.0).contains(&angle));
    }

    #[test]
    fn elongated_shapes_orient_along_long_side() {
        let mut wide = mask_with_rects(260, 100, &[(20, 30, 200, 40)]);
        wide.put_pixel(20, 30, Luma([0]));
        let w = compute_metrics(&single_region(&wide), SCALE);
        let a = w.orientation_deg.unwrap();
        assert!(a.min(180.0 - a) < 2.0, "wide angle {}", a);
        assert_relative_eq!(w.aspect_ratio.unwrap(), 5.0);

        let mut tall = mask_with_rects(100, 260, &[(40, 20, 40, 200)]);
        tall.put_pixel(40, 20, Luma([0]));
        let t = compute_metrics(&single_region(&tall), SCALE);
        assert!((t.orientation_deg.unwrap() - 90.0).abs() < 2.0);
        assert_relative_eq!(t.aspect_ratio.unwrap(), 0.2);
        assert!(t.eccentricity > 0.9 && t.eccentricity < 1.0);
    }

    #[test]
    fn scaled_values_follow_pixel_values() {
        let mask = mask_with_rects(300, 300, &[(10, 10, 37, 81), (120, 40, 150, 150)]);
        for region in extract_regions(&mask) {
            for scale in [0.01, 0.03, 0.5] {
                let m = compute_metrics(&region, scale);
                assert_relative_eq!(m.area_cm2, m.area_px * scale * scale, epsilon = 1e-6);
                assert_relative_eq!(m.perimeter_cm, m.perimeter_px * scale, epsilon = 1e-6);
                assert_relative_eq!(m.radius_cm, m.enclosing_circle.radius * scale, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn centroid_stays_inside_bounding_box() {
        let mask = image::GrayImage::from_fn(160, 160, |x, y| {
            let (dx, dy) = (x as f64 - 70.0, y as f64 - 90.0);
            let in_disc = dx * dx / 1600.0 + dy * dy / 400.0 <= 1.0;
            let in_bar = (120..140).contains(&x) && (10..150).contains(&y);
            Luma([if in_disc || in_bar { 255 } else { 0 }])
        });
        let regions = extract_regions(&mask);
        assert_eq!(regions.len(), 2);
        for r in &regions {
            let m = compute_metrics(r, SCALE);
            assert!(m.moments.m00 > 0.0);
            assert!(m.bounding_box.contains(m.centroid.0, m.centroid.1));
        }
    }

    #[test]
    fn single_pixel_region_uses_defaults() {
        let region = Region {
            index: 0,
            points: vec![Point::new(7, 9)],
        };
        let m = compute_metrics(&region, SCALE);
        assert_eq!(m.area_px, 0.0);
        assert_eq!(m.perimeter_px, 0.0);
        assert_eq!(m.centroid, (0, 0));
        assert_eq!(m.eccentricity, 0.0);
        assert_eq!(m.orientation_deg, None);
        assert_eq!(m.aspect_ratio, Some(1.0));
        assert_eq!(m.enclosing_circle.radius, 0.0);
    }

    #[test]
    fn empty_region_guards_every_division() {
        let region = Region {
            index: 3,
            points: Vec::new(),
        };
        let m = compute_metrics(&region, SCALE);
        assert_eq!(m.bounding_box, BoundingBox::default());
        assert_eq!(m.aspect_ratio, None);
        assert_eq!(m.centroid, (0, 0));
        assert_eq!(m.eccentricity, 0.0);
        assert!(m.convex_hull.is_empty());
    }
}
