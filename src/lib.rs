#![doc = r#"
WOUNDMET — geometric feature extraction from binary wound masks.

This crate turns a two-level mask (wound foreground on a dark background) into
per-region descriptors in physical units: area, perimeter, bounding box,
convex hull, minimum enclosing circle, centroid, orientation and a
moment-based eccentricity. It also renders an annotated color image with
the same overlays. It powers the WOUNDMET CLI and can be embedded in your own
Rust applications.

Stability
---------
The public library API is experimental in initial releases and may evolve.
Breaking changes can occur.

Add dependency
--------------
```toml
[dependencies]
woundmet = "0.1"
```

Quick start: measure a mask file
--------------------------------
```rust,no_run
use std::path::Path;
use woundmet::{extract_from_path, ExtractorParams};

fn main() -> woundmet::Result<()> {
    let params = ExtractorParams::default().with_scaling_factor(0.03);
    let report = extract_from_path(Path::new("/data/wound_mask.png"), &params)?;

    print!("{}", report.to_text());
    report.save_annotated(Path::new("/out/wound_annotated.png"))?;
    Ok(())
}
```

In-memory masks
---------------
```rust
use image::{GrayImage, Luma};
use woundmet::{ExtractorParams, WoundMetricsExtractor};

let mask = GrayImage::from_fn(200, 200, |x, y| {
    let inside = (50..150).contains(&x) && (50..150).contains(&y);
    Luma([if inside { 255 } else { 0 }])
});

let extractor = WoundMetricsExtractor::new(ExtractorParams::default()).unwrap();
let report = extractor.extract(&mask);

assert_eq!(report.regions.len(), 1);
let square = &report.regions[0];
assert_eq!(square.aspect_ratio, Some(1.0));
assert_eq!(square.orientation_deg, None); // four corner points only
```

Step by step
------------
The extractor exposes each stage so callers can interleave their own work:

```rust
use image::{GrayImage, Luma};
use woundmet::{ExtractorParams, RegionOrder, WoundMetricsExtractor};
use woundmet::core::features::annotate::canvas_from_mask;

let gray = GrayImage::from_fn(64, 64, |x, y| Luma([if x > 10 && y > 10 && x < 40 && y < 30 { 200 } else { 0 }]));
let extractor = WoundMetricsExtractor::new(
    ExtractorParams::default().with_region_order(RegionOrder::TopLeft),
).unwrap();

let binary = extractor.binarize(&gray);
let mut canvas = canvas_from_mask(&binary);
for region in extractor.extract_regions(&binary) {
    let metrics = extractor.compute_metrics(&region);
    extractor.render_annotations(&mut canvas, &region, &metrics);
}
```

Error handling
--------------
All fallible public functions return `woundmet::Result<T>`. Degenerate shapes
are not errors: zero-area regions get a `(0, 0)` centroid and zero
eccentricity, and a zero-height box has no aspect ratio. Unreadable input is
reported at load time.

```rust,no_run
use std::path::Path;
use woundmet::{extract_from_path, Error, ExtractorParams};

match extract_from_path(Path::new("/missing.png"), &ExtractorParams::default()) {
    Ok(report) => print!("{}", report.to_text()),
    Err(Error::Io(e)) => eprintln!("I/O error: {e}"),
    Err(Error::Image(e)) => eprintln!("Decode error: {e}"),
    Err(other) => eprintln!("Other error: {other}"),
}
```

Useful modules
--------------
- [`api`] — high-level entry points and `WoundMetricsExtractor`.
- [`core`] — contour tracing, moments, enclosing circle, ellipse fit, metrics, annotation.
- [`io`] — mask loading and report/image writers.
- [`types`] — shared enums and small geometric types.
- [`error`] — crate-level `Error` and `Result`.
"#]

// Core modules (public)
pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod types;

// Curated public API surface
// Types
pub use crate::core::features::contour::Region;
pub use crate::core::features::metrics::RegionMetrics;
pub use crate::core::features::moments::Moments;
pub use crate::core::params::ExtractorParams;
pub use error::{Error, Result};
pub use types::{BoundingBox, Circle, RegionOrder, ReportFormat};

// Readers and writers
pub use io::mask::{load_mask, mask_from_array};
pub use io::writers::annotated::save_annotated;
pub use io::writers::report::{format_region, format_report};

// High-level API re-exports
pub use api::{ExtractionReport, WoundMetricsExtractor, extract_from_path, order_regions};
