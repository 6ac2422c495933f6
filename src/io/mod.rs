//! I/O layer: mask loading from files or arrays, and `writers` for the
//! annotated image and the text/JSON reports.
pub mod mask;
pub use mask::{load_mask, mask_from_array};

pub mod writers;
