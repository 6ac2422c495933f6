//! Core building blocks: mask binarization, contour extraction, moment and
//! shape statistics, per-region metrics, and annotation rendering. These are
//! internal primitives consumed by the high-level `api` module.
pub mod features;
pub mod params;
