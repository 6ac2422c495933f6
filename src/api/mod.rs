//! High-level, ergonomic library API: run the full extraction on an in-memory
//! mask or a mask file, and render the results. Prefer these entrypoints over
//! the low-level `core::features` modules when integrating WOUNDMET.
use std::path::Path;

use image::{GrayImage, RgbImage};
use tracing::{debug, info};

use crate::core::features::annotate::{canvas_from_mask, render_annotations};
use crate::core::features::contour::{Region, binarize, extract_regions, polygon_area};
use crate::core::features::metrics::{RegionMetrics, compute_metrics};
use crate::core::params::ExtractorParams;
use crate::error::Result;
use crate::io::mask::load_mask;
use crate::io::writers::annotated::save_annotated;
use crate::io::writers::report::{ReportDocument, format_json, format_report};
use crate::types::RegionOrder;

/// Result of one extraction run
#[derive(Debug, Clone)]
pub struct ExtractionReport {
    pub width: u32,
    pub height: u32,
    pub scaling_factor: f64,
    /// Metrics in report order
    pub regions: Vec<RegionMetrics>,
    /// Binarized mask with all overlays drawn
    pub annotated: RgbImage,
}

impl ExtractionReport {
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn to_text(&self) -> String {
        format_report(&self.regions)
    }

    pub fn to_json(&self, source: Option<&Path>) -> Result<String> {
        format_json(&ReportDocument {
            source: source.map(|p| p.display().to_string()),
            scaling_factor: self.scaling_factor,
            image_width: self.width,
            image_height: self.height,
            regions: &self.regions,
        })
    }

    pub fn save_annotated(&self, output: &Path) -> Result<()> {
        save_annotated(output, &self.annotated)
    }
}

/// Per-image feature extraction with fixed parameters.
#[derive(Debug, Clone)]
pub struct WoundMetricsExtractor {
    params: ExtractorParams,
}

impl WoundMetricsExtractor {
    /// Validates `params` up front so every later call is infallible.
    pub fn new(params: ExtractorParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &ExtractorParams {
        &self.params
    }

    pub fn binarize(&self, gray: &GrayImage) -> GrayImage {
        binarize(gray, self.params.threshold)
    }

    /// Outer regions of an already binarized mask, in the configured order.
    pub fn extract_regions(&self, binary: &GrayImage) -> Vec<Region> {
        let mut regions = extract_regions(binary);
        order_regions(&mut regions, self.params.region_order);
        regions
    }

    pub fn compute_metrics(&self, region: &Region) -> RegionMetrics {
        compute_metrics(region, self.params.scaling_factor)
    }

    pub fn render_annotations(
        &self,
        canvas: &mut RgbImage,
        region: &Region,
        metrics: &RegionMetrics,
    ) {
        render_annotations(canvas, region, metrics, self.params.arrow_length);
    }

    /// Binarize, trace, measure and annotate every region of `gray`.
    pub fn extract(&self, gray: &GrayImage) -> ExtractionReport {
        let binary = self.binarize(gray);
        let regions = self.extract_regions(&binary);
        info!(
            "Found {} region(s) in {}x{} mask",
            regions.len(),
            binary.width(),
            binary.height()
        );

        let mut annotated = canvas_from_mask(&binary);
        let mut metrics = Vec::with_capacity(regions.len());
        for region in &regions {
            let m = self.compute_metrics(region);
            self.render_annotations(&mut annotated, region, &m);
            metrics.push(m);
        }

        ExtractionReport {
            width: binary.width(),
            height: binary.height(),
            scaling_factor: self.params.scaling_factor,
            regions: metrics,
            annotated,
        }
    }
}

/// Stable sort by the requested key; `Discovery` keeps tracer order.
pub fn order_regions(regions: &mut [Region], order: RegionOrder) {
    match order {
        RegionOrder::Discovery => {}
        RegionOrder::TopLeft => {
            regions.sort_by_key(|r| {
                let top = r.points.iter().map(|p| p.y).min().unwrap_or(0);
                let left = r.points.iter().map(|p| p.x).min().unwrap_or(0);
                (top, left)
            });
        }
        RegionOrder::Area => {
            regions.sort_by(|a, b| polygon_area(&b.points).total_cmp(&polygon_area(&a.points)));
        }
    }
    debug!("Ordered regions by {}", order);
}

/// Load `input` and run the full extraction with `params`.
pub fn extract_from_path(input: &Path, params: &ExtractorParams) -> Result<ExtractionReport> {
    let extractor = WoundMetricsExtractor::new(params.clone())?;
    let gray = load_mask(input)?;
    Ok(extractor.extract(&gray))
}
