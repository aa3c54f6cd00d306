//! Error kinds for the conversion pipeline
//!
//! Every error is caught at the single-file conversion boundary, printed
//! with the offending path, and turned into a per-file failure. Batch mode
//! keeps going past individual failures.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    /// The pixel data cannot be decoded, either because no codec backend
    /// was compiled in for the transfer syntax or because the decoder
    /// rejected the stream. Callers fall back to the raw pixel payload.
    #[error("cannot decode pixel data: {0}")]
    DecodeUnavailable(String),

    /// Pixel payload does not hold exactly rows x cols x channels samples.
    #[error(
        "pixel data holds {actual} samples, expected {expected} \
         ({rows}x{cols}x{channels})"
    )]
    ShapeMismatch {
        rows: u32,
        cols: u32,
        channels: u16,
        expected: usize,
        actual: usize,
    },

    /// Grid shape that cannot be mapped onto an image.
    #[error("unsupported pixel grid shape: {0}")]
    UnsupportedShape(String),

    /// Neither a decodable nor a raw pixel payload is present.
    #[error("no pixel data found{context}")]
    NoPixelData { context: String },

    /// Failure while opening the file or reading DICOM elements.
    #[error("{0}")]
    Parse(anyhow::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The JPEG encoder rejected the raster.
    #[error("JPEG encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

impl From<anyhow::Error> for ConvertError {
    fn from(err: anyhow::Error) -> Self {
        Self::Parse(err)
    }
}
