//! Text and JSON renderings of extraction results.
use std::fmt::Write;

use serde::Serialize;

use crate::core::features::metrics::RegionMetrics;
use crate::error::Result;

pub const NO_REGIONS_MESSAGE: &str = "No contours found!";

/// Serialized shape of a full JSON report.
#[derive(Debug, Serialize)]
pub struct ReportDocument<'a> {
    pub source: Option<String>,
    pub scaling_factor: f64,
    pub image_width: u32,
    pub image_height: u32,
    pub regions: &'a [RegionMetrics],
}

/// One summary block per region, or the single no-regions line.
pub fn format_report(regions: &[RegionMetrics]) -> String {
    if regions.is_empty() {
        return format!("{NO_REGIONS_MESSAGE}\n");
    }
    regions.iter().map(format_region).collect()
}

pub fn format_region(m: &RegionMetrics) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(out, "--- Wound Feature Summary ---");
    let _ = writeln!(
        out,
        "Area: {} cm^2, Perimeter: {} cm",
        fixed(m.area_cm2, 2),
        fixed(m.perimeter_cm, 2)
    );
    let _ = writeln!(
        out,
        "Bounding Box: {} x {} cm",
        fixed(m.width_cm, 2),
        fixed(m.height_cm, 2)
    );
    let _ = writeln!(
        out,
        "Centroid: ({}, {}) cm",
        fixed(m.centroid_cm.0, 2),
        fixed(m.centroid_cm.1, 2)
    );
    let _ = writeln!(out, "Enclosing Circle Radius: {} cm", fixed(m.radius_cm, 2));
    match m.orientation_deg {
        Some(angle) => {
            let _ = writeln!(out, "Orientation: {} deg", fixed(angle, 1));
        }
        None => {
            let _ = writeln!(out, "Orientation: N/A");
        }
    }
    let _ = writeln!(out, "Eccentricity: {}", fixed(m.eccentricity, 2));
    let _ = writeln!(out, "--------------------------------");
    let _ = writeln!(out);
    out
}

pub fn format_json(document: &ReportDocument<'_>) -> Result<String> {
    Ok(serde_json::to_string_pretty(document)?)
}

/// Fixed-point formatting that spells NaN as `nan`.
fn fixed(value: f64, decimals: usize) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else {
        format!("{value:.decimals$}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::features::moments::Moments;
    use crate::types::{BoundingBox, Circle};

    fn sample(orientation: Option<f64>, eccentricity: f64) -> RegionMetrics {
        RegionMetrics {
            index: 0,
            point_count: 4,
            area_px: 9801.0,
            area_cm2: 8.8209,
            perimeter_px: 396.0,
            perimeter_cm: 11.88,
            bounding_box: BoundingBox {
                x: 50,
                y: 50,
                width: 100,
                height: 100,
            },
            width_cm: 3.0,
            height_cm: 3.0,
            aspect_ratio: Some(1.0),
            convex_hull: vec![[50, 50], [149, 50], [149, 149], [50, 149]],
            enclosing_circle: Circle {
                cx: 99.5,
                cy: 99.5,
                radius: 70.0036,
            },
            radius_cm: 2.100108,
            centroid: (99, 99),
            centroid_cm: (2.97, 2.97),
            orientation_deg: orientation,
            eccentricity,
            moments: Moments::default(),
        }
    }

    #[test]
    fn text_block_matches_expected_layout() {
        let text = format_region(&sample(None, 0.0036));
        let expected = "\
--- Wound Feature Summary ---
Area: 8.82 cm^2, Perimeter: 11.88 cm
Bounding Box: 3.00 x 3.00 cm
Centroid: (2.97, 2.97) cm
Enclosing Circle Radius: 2.10 cm
Orientation: N/A
Eccentricity: 0.00
--------------------------------

";
        assert_eq!(text, expected);
    }

    #[test]
    fn defined_orientation_uses_one_decimal() {
        let text = format_region(&sample(Some(135.04), 0.5));
        assert!(text.contains("Orientation: 135.0 deg\n"));
        assert!(text.contains("Eccentricity: 0.50\n"));

        // Zero is a real angle, not a missing one.
        let text = format_region(&sample(Some(0.0), 0.5));
        assert!(text.contains("Orientation: 0.0 deg\n"));
    }

    #[test]
    fn nan_eccentricity_is_spelled_out() {
        let text = format_region(&sample(Some(1.0), f64::NAN));
        assert!(text.contains("Eccentricity: nan\n"));
    }

    #[test]
    fn empty_report_is_single_line() {
        assert_eq!(format_report(&[]), "No contours found!\n");
    }

    #[test]
    fn report_concatenates_blocks() {
        let regions = vec![sample(None, 0.0), sample(Some(10.0), 0.1)];
        let text = format_report(&regions);
        assert_eq!(text.matches("--- Wound Feature Summary ---").count(), 2);
    }

    #[test]
    fn json_maps_undefined_values_to_null() {
        let mut m = sample(None, f64::NAN);
        m.aspect_ratio = None;
        let regions = [m];
        let doc = ReportDocument {
            source: Some("mask.png".to_string()),
            scaling_factor: 0.03,
            image_width: 200,
            image_height: 200,
            regions: &regions,
        };
        let json = format_json(&doc).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let region = &value["regions"][0];
        assert!(region["orientation_deg"].is_null());
        assert!(region["aspect_ratio"].is_null());
        assert!(region["eccentricity"].is_null());
        assert_eq!(region["bounding_box"]["width"], 100);
        assert_eq!(value["source"], "mask.png");
    }
}
