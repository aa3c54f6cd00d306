//! Pixel grid reconstruction, normalization and channel layout
//!
//! The conversion core: rebuild a typed pixel grid from a raw sample
//! payload, collapse it to an 8-bit raster with min/max normalization, and
//! decide how its channels map onto an encoded image. All functions here
//! are pure and operate on in-memory arrays only.

mod grid;
mod layout;
mod normalize;

pub use grid::{reconstruct_from_raw, ByteOrder, GridShape, HeaderFields, PixelGrid, Samples};
pub use layout::{image_mode, select_first_channel, ImageMode};
pub use normalize::{normalize, Raster};
