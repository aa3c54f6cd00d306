//! Min/max pixel normalization to an 8-bit raster

use super::grid::{GridShape, PixelGrid, Samples};

/// 8-bit pixel grid, the only form the encode step accepts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    pub shape: GridShape,
    pub data: Vec<u8>,
}

/// Collapse a pixel grid of any element type to an 8-bit raster.
///
/// 8-bit input passes through unchanged. Everything else is widened to f64,
/// scanned once for its global min and max, and scaled so that min maps to
/// 0 and max to 255. A constant-valued grid maps to all zeros; that is the
/// defined result, not a fallback.
#[must_use]
pub fn normalize(grid: PixelGrid) -> Raster {
    let PixelGrid { shape, samples } = grid;

    let data = match samples {
        Samples::U8(data) => data,
        Samples::U16(values) => scale_to_u8(&values),
        Samples::I16(values) => scale_to_u8(&values),
        Samples::U32(values) => scale_to_u8(&values),
        Samples::I32(values) => scale_to_u8(&values),
    };

    Raster { shape, data }
}

/// Global minimum and maximum of the widened sample values, in one pass
fn min_max<T: Copy + Into<f64>>(values: &[T]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), &val| {
            let val: f64 = val.into();
            (min.min(val), max.max(val))
        })
}

fn scale_to_u8<T: Copy + Into<f64>>(values: &[T]) -> Vec<u8> {
    let (min, max) = min_max(values);

    // Constant image: every sample normalizes to zero
    if max <= min {
        return vec![0; values.len()];
    }

    let range = max - min;
    values
        .iter()
        .map(|&val| {
            let normalized = (val.into() - min) / range;
            // Clamp guards against floating-point rounding at the extremes
            (normalized * 255.0).round().clamp(0.0, 255.0) as u8
        })
        .collect()
}
