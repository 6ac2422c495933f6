pub mod annotate;
pub mod contour;
pub mod ellipse;
pub mod enclosing;
pub mod metrics;
pub mod moments;
