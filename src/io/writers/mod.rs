pub mod annotated;
pub mod report;
