//! Minimum enclosing circle of a point set.
use imageproc::point::Point;

use crate::types::Circle;

const CONTAIN_EPS: f64 = 1e-7;

/// Smallest circle containing every point.
///
/// Incremental Welzl construction. The circle of a set equals the circle of
/// its convex hull, so callers usually pass hull points to keep `n` small.
pub fn min_enclosing_circle(points: &[Point<i32>]) -> Circle {
    let pts: Vec<(f64, f64)> = points.iter().map(|p| (p.x as f64, p.y as f64)).collect();

    let Some(&first) = pts.first() else {
        return Circle::default();
    };

    let mut c = circle_from_one(first);
    for i in 1..pts.len() {
        if contains(&c, pts[i]) {
            continue;
        }
        c = circle_from_one(pts[i]);
        for j in 0..i {
            if contains(&c, pts[j]) {
                continue;
            }
            c = circle_from_two(pts[i], pts[j]);
            for k in 0..j {
                if !contains(&c, pts[k]) {
                    c = circle_from_three(pts[i], pts[j], pts[k]);
                }
            }
        }
    }
    c
}

fn contains(c: &Circle, p: (f64, f64)) -> bool {
    (p.0 - c.cx).hypot(p.1 - c.cy) <= c.radius + CONTAIN_EPS * c.radius.max(1.0)
}

fn circle_from_one(p: (f64, f64)) -> Circle {
    Circle {
        cx: p.0,
        cy: p.1,
        radius: 0.0,
    }
}

fn circle_from_two(a: (f64, f64), b: (f64, f64)) -> Circle {
    let cx = (a.0 + b.0) / 2.0;
    let cy = (a.1 + b.1) / 2.0;
    Circle {
        cx,
        cy,
        radius: (a.0 - cx).hypot(a.1 - cy),
    }
}

fn circle_from_three(a: (f64, f64), b: (f64, f64), c: (f64, f64)) -> Circle {
    let (bx, by) = (b.0 - a.0, b.1 - a.1);
    let (cx, cy) = (c.0 - a.0, c.1 - a.1);
    let d = 2.0 * (bx * cy - by * cx);

    if d.abs() < 1e-12 {
        // Collinear: the two farthest-apart points define the circle.
        let candidates = [circle_from_two(a, b), circle_from_two(a, c), circle_from_two(b, c)];
        return candidates
            .into_iter()
            .fold(Circle::default(), |best, cand| {
                if cand.radius > best.radius { cand } else { best }
            });
    }

    let b2 = bx * bx + by * by;
    let c2 = cx * cx + cy * cy;
    let ux = (cy * b2 - by * c2) / d;
    let uy = (bx * c2 - cx * b2) / d;
    Circle {
        cx: ux + a.0,
        cy: uy + a.1,
        radius: ux.hypot(uy),
    }
}
