//! Shared types and enums used across WOUNDMET.
//! Includes `RegionOrder` and `ReportFormat`, plus the small geometric value
//! types (`BoundingBox`, `Circle`) carried by region metrics.
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Order in which regions are reported and annotated.
#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum RegionOrder {
    /// Whatever order the border follower discovers regions in (raster scan).
    #[default]
    Discovery,
    /// Sorted by bounding-box top edge, then left edge.
    TopLeft,
    /// Largest pixel area first.
    Area,
}

impl std::fmt::Display for RegionOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegionOrder::Discovery => write!(f, "Discovery"),
            RegionOrder::TopLeft => write!(f, "TopLeft"),
            RegionOrder::Area => write!(f, "Area"),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Serialize, Deserialize)]
pub enum ReportFormat {
    Text,
    Json,
}

/// Axis-aligned integer rectangle in pixel space.
///
/// `width`/`height` count pixels, so a single-point contour has a 1x1 box.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    /// Width over height, `None` when the box has no height.
    pub fn aspect_ratio(&self) -> Option<f64> {
        if self.height == 0 {
            None
        } else {
            Some(self.width as f64 / self.height as f64)
        }
    }

    /// Closed containment test: edges at `x + width` and `y + height` count as inside.
    pub fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x
            && py >= self.y
            && px <= self.x + self.width as i32
            && py <= self.y + self.height as i32
    }
}

#[derive(Copy, Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct Circle {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_ratio_guards_zero_height() {
        let flat = BoundingBox {
            x: 3,
            y: 4,
            width: 10,
            height: 0,
        };
        assert_eq!(flat.aspect_ratio(), None);

        let wide = BoundingBox {
            x: 0,
            y: 0,
            width: 30,
            height: 10,
        };
        assert_eq!(wide.aspect_ratio(), Some(3.0));
    }

    #[test]
    fn contains_is_closed_on_all_edges() {
        let b = BoundingBox {
            x: 10,
            y: 20,
            width: 5,
            height: 5,
        };
        assert!(b.contains(10, 20));
        assert!(b.contains(15, 25));
        assert!(!b.contains(9, 20));
        assert!(!b.contains(10, 26));
    }

    #[test]
    fn region_order_serializes_kebab_case() {
        let s = serde_json::to_string(&RegionOrder::TopLeft).unwrap();
        assert_eq!(s, "\"top-left\"");
        let back: RegionOrder = serde_json::from_str("\"area\"").unwrap();
        assert_eq!(back, RegionOrder::Area);
    }
}
