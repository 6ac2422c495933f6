use std::path::Path;

use image::RgbImage;
use tracing::info;

use crate::error::{Error, Result};

/// Write the annotated canvas; the encoder follows the file extension.
pub fn save_annotated(output: &Path, canvas: &RgbImage) -> Result<()> {
    let supported = output
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .is_some_and(|e| matches!(e.as_str(), "png" | "jpg" | "jpeg" | "bmp" | "tif" | "tiff"));
    if !supported {
        return Err(Error::invalid("output", output.display()));
    }

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    canvas.save(output)?;
    info!(
        "Wrote annotated image {:?} ({}x{})",
        output,
        canvas.width(),
        canvas.height()
    );
    Ok(())
}
