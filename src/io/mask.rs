//! Mask loading: decode any raster the `image` crate understands into 8-bit
//! luma, or adopt an in-memory `ndarray` grid.
use std::path::Path;

use image::GrayImage;
use ndarray::Array2;
use tracing::info;

use crate::error::{Error, Result};

/// Decode `path` as a grayscale mask.
///
/// Missing files and undecodable data are reported here rather than
/// surfacing later as an empty region list.
pub fn load_mask(path: &Path) -> Result<GrayImage> {
    if !path.is_file() {
        return Err(Error::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("mask not found: {}", path.display()),
        )));
    }

    let gray = image::open(path)?.to_luma8();
    ensure_non_empty(&gray)?;
    info!(
        "Loaded mask {:?}: {}x{}",
        path,
        gray.width(),
        gray.height()
    );
    Ok(gray)
}

/// Build a mask from a `(rows, cols)` intensity grid.
pub fn mask_from_array(data: &Array2<u8>) -> Result<GrayImage> {
    let (rows, cols) = data.dim();
    let gray = GrayImage::from_fn(cols as u32, rows as u32, |x, y| {
        image::Luma([data[[y as usize, x as usize]]])
    });
    ensure_non_empty(&gray)?;
    Ok(gray)
}

fn ensure_non_empty(gray: &GrayImage) -> Result<()> {
    if gray.width() == 0 || gray.height() == 0 {
        return Err(Error::EmptyImage {
            width: gray.width(),
            height: gray.height(),
        });
    }
    Ok(())
}
