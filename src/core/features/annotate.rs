//! Overlay rendering for the annotated output image.
use image::{GrayImage, Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut};
use imageproc::point::Point;

use crate::core::features::contour::Region;
use crate::core::features::metrics::RegionMetrics;

pub const CONTOUR_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
pub const BBOX_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
pub const HULL_COLOR: Rgb<u8> = Rgb([255, 255, 0]);
pub const CENTROID_COLOR: Rgb<u8> = Rgb([0, 0, 255]);
pub const ARROW_COLOR: Rgb<u8> = Rgb([255, 0, 0]);

const LINE_THICKNESS: i32 = 2;
const CENTROID_RADIUS: i32 = 4;
const ARROW_TIP_RATIO: f64 = 0.1;
/// Past this many canvas diagonals the shaft tip and both barbs are off the canvas.
const ARROW_REACH_DIAGONALS: f64 = 2.0;

/// Gray mask replicated into three channels.
pub fn canvas_from_mask(mask: &GrayImage) -> RgbImage {
    RgbImage::from_fn(mask.width(), mask.height(), |x, y| {
        let v = mask.get_pixel(x, y)[0];
        Rgb([v, v, v])
    })
}

/// Draw one region's overlays: contour, bounding box, hull, centroid, then
/// the orientation arrow when an orientation is defined.
pub fn render_annotations(
    canvas: &mut RgbImage,
    region: &Region,
    metrics: &RegionMetrics,
    arrow_length: f64,
) {
    let outline: Vec<(i32, i32)> = region.points.iter().map(|p: &Point<i32>| (p.x, p.y)).collect();
    draw_closed_polyline(canvas, &outline, CONTOUR_COLOR);

    let b = metrics.bounding_box;
    let (x0, y0) = (b.x, b.y);
    let (x1, y1) = (b.x + b.width as i32, b.y + b.height as i32);
    draw_closed_polyline(canvas, &[(x0, y0), (x1, y0), (x1, y1), (x0, y1)], BBOX_COLOR);

    let hull: Vec<(i32, i32)> = metrics.convex_hull.iter().map(|p| (p[0], p[1])).collect();
    draw_closed_polyline(canvas, &hull, HULL_COLOR);

    draw_filled_circle_mut(canvas, metrics.centroid, CENTROID_RADIUS, CENTROID_COLOR);

    if let Some(angle) = metrics.orientation_deg {
        let theta = angle.to_radians();
        let (cx, cy) = metrics.centroid;
        let diagonal = (canvas.width() as f64).hypot(canvas.height() as f64);
        let length = arrow_length.min(ARROW_REACH_DIAGONALS * diagonal);
        let end = (
            (cx as f64 + length * theta.cos()) as i32,
            (cy as f64 + length * theta.sin()) as i32,
        );
        draw_arrow(canvas, (cx, cy), end, ARROW_COLOR);
    }
}

fn draw_closed_polyline(canvas: &mut RgbImage, points: &[(i32, i32)], color: Rgb<u8>) {
    match points {
        [] => {}
        [p] => draw_thick_segment(canvas, *p, *p, color),
        _ => {
            for (i, &a) in points.iter().enumerate() {
                let b = points[(i + 1) % points.len()];
                draw_thick_segment(canvas, a, b, color);
            }
        }
    }
}

/// Shaft plus two barbs at the tip, each a tenth of the shaft length.
fn draw_arrow(canvas: &mut RgbImage, from: (i32, i32), to: (i32, i32), color: Rgb<u8>) {
    draw_thick_segment(canvas, from, to, color);

    let (dx, dy) = ((from.0 - to.0) as f64, (from.1 - to.1) as f64);
    let tip = dx.hypot(dy) * ARROW_TIP_RATIO;
    let back = dy.atan2(dx);
    for turn in [std::f64::consts::FRAC_PI_4, -std::f64::consts::FRAC_PI_4] {
        let barb = (
            (to.0 as f64 + tip * (back + turn).cos()).round() as i32,
            (to.1 as f64 + tip * (back + turn).sin()).round() as i32,
        );
        draw_thick_segment(canvas, barb, to, color);
    }
}

/// Segment drawn `LINE_THICKNESS` pixels wide by stacking offset copies.
fn draw_thick_segment(canvas: &mut RgbImage, a: (i32, i32), b: (i32, i32), color: Rgb<u8>) {
    for ox in 0..LINE_THICKNESS {
        for oy in 0..LINE_THICKNESS {
            draw_line_segment_mut(
                canvas,
                ((a.0 + ox) as f32, (a.1 + oy) as f32),
                ((b.0 + ox) as f32, (b.1 + oy) as f32),
                color,
            );
        }
    }
}
