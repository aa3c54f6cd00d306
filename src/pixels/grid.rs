//! Pixel grid reconstruction from raw sample bytes
//!
//! A raw DICOM pixel payload is a flat byte sequence; the header dictates
//! element type (bit depth and signedness), byte order, and shape. The
//! reconstruction here mirrors a flat-buffer reinterpret followed by a
//! reshape, and fails when the element count does not match the header.

use crate::error::ConvertError;
use crate::types::{BitDepth, Dimensions, PixelRepresentation};

/// Byte order of multi-byte samples in a raw payload.
///
/// Always chosen explicitly by the caller (from the transfer syntax for raw
/// payloads, little-endian for decoder output) rather than assuming the
/// platform default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    Little,
    Big,
}

/// Grid shape: `(rows, cols)` or `(rows, cols, channels)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridShape {
    pub rows: u32,
    pub cols: u32,
    /// `None` for the two-dimensional single-plane form
    pub channels: Option<u16>,
}

impl GridShape {
    #[must_use]
    pub fn two_dim(rows: u32, cols: u32) -> Self {
        Self {
            rows,
            cols,
            channels: None,
        }
    }

    #[must_use]
    pub fn three_dim(rows: u32, cols: u32, channels: u16) -> Self {
        Self {
            rows,
            cols,
            channels: Some(channels),
        }
    }

    #[inline]
    #[must_use]
    pub fn channel_count(&self) -> usize {
        self.channels.map_or(1, usize::from)
    }

    #[inline]
    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.rows as usize * self.cols as usize * self.channel_count()
    }
}

/// Header fields needed to reinterpret a raw pixel payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderFields {
    pub dimensions: Dimensions,
    pub samples_per_pixel: u16,
    pub bit_depth: BitDepth,
    pub pixel_representation: PixelRepresentation,
}

impl HeaderFields {
    /// Shape the payload reshapes into: 2-D when there is a single sample
    /// per pixel, 3-D otherwise
    #[must_use]
    pub fn grid_shape(&self) -> GridShape {
        let rows = u32::from(self.dimensions.rows);
        let cols = u32::from(self.dimensions.cols);
        if self.samples_per_pixel == 1 {
            GridShape::two_dim(rows, cols)
        } else {
            GridShape::three_dim(rows, cols, self.samples_per_pixel)
        }
    }

    #[inline]
    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.dimensions.pixel_count() * usize::from(self.samples_per_pixel)
    }

    /// Byte length of a single frame
    #[inline]
    #[must_use]
    pub fn frame_byte_len(&self) -> usize {
        self.sample_count() * self.bit_depth.bytes_per_sample()
    }
}

impl Default for HeaderFields {
    /// Fallback values applied when the corresponding tags are absent
    fn default() -> Self {
        Self {
            dimensions: Dimensions::new(512, 512),
            samples_per_pixel: 1,
            bit_depth: BitDepth::new(16, 16),
            pixel_representation: PixelRepresentation::Unsigned,
        }
    }
}

/// Sample storage, kept in the element type the header calls for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Samples {
    U8(Vec<u8>),
    U16(Vec<u16>),
    I16(Vec<i16>),
    U32(Vec<u32>),
    I32(Vec<i32>),
}

impl Samples {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::U8(v) => v.len(),
            Self::U16(v) => v.len(),
            Self::I16(v) => v.len(),
            Self::U32(v) => v.len(),
            Self::I32(v) => v.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory pixel array before 8-bit normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    pub shape: GridShape,
    pub samples: Samples,
}

/// Reinterpret a raw byte payload as a typed pixel grid.
///
/// Element type selection: up to 8 bits allocated is unsigned 8-bit, up to
/// 16 bits is 16-bit with the header's signedness, anything wider is 32-bit
/// with the header's signedness.
///
/// # Errors
///
/// Returns [`ConvertError::ShapeMismatch`] when the payload does not hold
/// exactly `rows * cols * samples_per_pixel` elements.
pub fn reconstruct_from_raw(
    raw: &[u8],
    header: &HeaderFields,
    byte_order: ByteOrder,
) -> Result<PixelGrid, ConvertError> {
    let shape = header.grid_shape();
    let bytes_per_sample = header.bit_depth.bytes_per_sample();

    let expected = shape.sample_count();
    let actual = raw.len() / bytes_per_sample;
    if !raw.len().is_multiple_of(bytes_per_sample) || actual != expected {
        return Err(ConvertError::ShapeMismatch {
            rows: shape.rows,
            cols: shape.cols,
            channels: shape.channels.unwrap_or(1),
            expected,
            actual,
        });
    }

    let samples = match (bytes_per_sample, header.pixel_representation) {
        (1, _) => Samples::U8(raw.to_vec()),
        (2, PixelRepresentation::Unsigned) => Samples::U16(read_u16(raw, byte_order)),
        (2, PixelRepresentation::Signed) => Samples::I16(read_i16(raw, byte_order)),
        (_, PixelRepresentation::Unsigned) => Samples::U32(read_u32(raw, byte_order)),
        (_, PixelRepresentation::Signed) => Samples::I32(read_i32(raw, byte_order)),
    };

    Ok(PixelGrid { shape, samples })
}

fn read_u16(bytes: &[u8], order: ByteOrder) -> Vec<u16> {
    bytes
        .chunks_exact(2)
        .map(|chunk| match order {
            ByteOrder::Little => u16::from_le_bytes([chunk[0], chunk[1]]),
            ByteOrder::Big => u16::from_be_bytes([chunk[0], chunk[1]]),
        })
        .collect()
}

fn read_i16(bytes: &[u8], order: ByteOrder) -> Vec<i16> {
    bytes
        .chunks_exact(2)
        .map(|chunk| match order {
            ByteOrder::Little => i16::from_le_bytes([chunk[0], chunk[1]]),
            ByteOrder::Big => i16::from_be_bytes([chunk[0], chunk[1]]),
        })
        .collect()
}

fn read_u32(bytes: &[u8], order: ByteOrder) -> Vec<u32> {
    bytes
        .chunks_exact(4)
        .map(|chunk| match order {
            ByteOrder::Little => u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]),
            ByteOrder::Big => u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]),
        })
        .collect()
}

fn read_i32(bytes: &[u8], order: ByteOrder) -> Vec<i32> {
    bytes
        .chunks_exact(4)
        .map(|chunk| match order {
            ByteOrder::Little => i32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]),
            ByteOrder::Big => i32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]),
        })
        .collect()
}
