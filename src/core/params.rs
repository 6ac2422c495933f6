use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::RegionOrder;

/// Estimated physical size of one mask pixel.
pub const DEFAULT_SCALING_FACTOR: f64 = 0.03;
pub const DEFAULT_THRESHOLD: u8 = 127;
pub const DEFAULT_ARROW_LENGTH: f64 = 50.0;

/// Extraction parameters suitable for config files and CLI presets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorParams {
    /// Centimeters per pixel
    pub scaling_factor: f64,
    /// Intensities strictly above this value are foreground
    pub threshold: u8,
    pub region_order: RegionOrder,
    /// Length of the orientation arrow in pixels
    pub arrow_length: f64,
}

impl Default for ExtractorParams {
    fn default() -> Self {
        Self {
            scaling_factor: DEFAULT_SCALING_FACTOR,
            threshold: DEFAULT_THRESHOLD,
            region_order: RegionOrder::Discovery,
            arrow_length: DEFAULT_ARROW_LENGTH,
        }
    }
}

impl ExtractorParams {
    pub fn with_scaling_factor(mut self, scaling_factor: f64) -> Self {
        self.scaling_factor = scaling_factor;
        self
    }

    pub fn with_region_order(mut self, order: RegionOrder) -> Self {
        self.region_order = order;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.scaling_factor.is_finite() || self.scaling_factor <= 0.0 {
            return Err(Error::invalid("scaling_factor", self.scaling_factor));
        }
        if !self.arrow_length.is_finite() || self.arrow_length < 0.0 {
            return Err(Error::invalid("arrow_length", self.arrow_length));
        }
        Ok(())
    }

    /// Read parameters from a JSON file; missing fields take their defaults.
    pub fn from_json_file(path: &std::path::Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let params: ExtractorParams = serde_json::from_str(&text)?;
        params.validate()?;
        Ok(params)
    }
}
