//! Channel layout decision for the encode boundary

use super::grid::GridShape;
use super::normalize::Raster;
use crate::error::ConvertError;

/// How a raster's channels map onto an encoded image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageMode {
    /// Single-channel luminance
    Luma,
    /// Three interleaved channels
    Rgb,
    /// Four interleaved channels
    Rgba,
    /// Nonstandard channel count: keep channel 0, drop the rest.
    /// A documented lossy fallback, not an error.
    LumaFirstChannel,
}

/// Decide the channel layout for a grid shape.
///
/// # Errors
///
/// Returns [`ConvertError::UnsupportedShape`] for degenerate shapes (zero
/// rows, columns or channels).
pub fn image_mode(shape: &GridShape) -> Result<ImageMode, ConvertError> {
    if shape.rows == 0 || shape.cols == 0 {
        return Err(ConvertError::UnsupportedShape(format!(
            "{}x{} image",
            shape.cols, shape.rows
        )));
    }

    match shape.channels {
        None | Some(1) => Ok(ImageMode::Luma),
        Some(3) => Ok(ImageMode::Rgb),
        Some(4) => Ok(ImageMode::Rgba),
        Some(0) => Err(ConvertError::UnsupportedShape(
            "zero channels per pixel".to_string(),
        )),
        Some(_) => Ok(ImageMode::LumaFirstChannel),
    }
}

/// Reduce a multi-channel raster to its first channel
#[must_use]
pub fn select_first_channel(raster: &Raster) -> Raster {
    let stride = raster.shape.channel_count();
    let data = raster.data.iter().step_by(stride).copied().collect();

    Raster {
        shape: GridShape::two_dim(raster.shape.rows, raster.shape.cols),
        data,
    }
}
