//! Pixel payload extraction
//!
//! The payload is obtained by an ordered sequence of strategies: first the
//! full decoder (which handles compressed transfer syntaxes and normalizes
//! byte order), then the untouched PixelData bytes. Each strategy returns a
//! result; the next one runs only when the previous failed. Decode failures
//! that were recovered by the raw fallback are reported as notes so the
//! caller can surface them next to the file path.

use super::parser::{self, DicomObj};
use crate::capabilities::CodecSupport;
use crate::error::ConvertError;
use crate::types::TransferSyntax;
use anyhow::Context;
use dicom::dictionary_std::tags;
use dicom::pixeldata::PixelDecoder;

/// Pixel bytes plus how they were obtained
#[derive(Debug, Clone)]
pub enum PixelPayload {
    /// Decoder output; samples are little-endian
    Decoded(Vec<u8>),
    /// Untouched PixelData value; byte order follows the transfer syntax
    Raw(Vec<u8>),
}

impl PixelPayload {
    #[inline]
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        match self {
            Self::Decoded(bytes) | Self::Raw(bytes) => bytes,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_raw(&self) -> bool {
        matches!(self, Self::Raw(_))
    }
}

/// Extract the pixel payload, falling back from decoded to raw bytes.
///
/// # Errors
///
/// Returns [`ConvertError::NoPixelData`] when the file has no PixelData
/// element at all, or the raw strategy's error when both strategies fail.
pub fn extract_pixel_payload(
    obj: &DicomObj,
    bits_allocated: u16,
    transfer_syntax: &TransferSyntax,
    codecs: CodecSupport,
) -> Result<(PixelPayload, Vec<String>), ConvertError> {
    let mut notes = Vec::new();

    match decoded_payload(obj, bits_allocated, transfer_syntax, codecs) {
        Ok(bytes) => return Ok((PixelPayload::Decoded(bytes), notes)),
        Err(err) => notes.push(format!("{err}; trying the raw pixel payload")),
    }

    let bytes = raw_payload(obj)?;
    Ok((PixelPayload::Raw(bytes), notes))
}

/// Detect if transfer syntax uses compression
#[inline]
#[must_use]
fn detect_compression(uid: &str) -> bool {
    uid.starts_with("1.2.840.10008.1.2.4") // JPEG family
        || uid.starts_with("1.2.840.10008.1.2.5") // RLE lossless
}

/// Strategy 1: run the pixel-data decoder
fn decoded_payload(
    obj: &DicomObj,
    bits_allocated: u16,
    transfer_syntax: &TransferSyntax,
    codecs: CodecSupport,
) -> Result<Vec<u8>, ConvertError> {
    if detect_compression(&transfer_syntax.uid) && !codecs.any() {
        return Err(ConvertError::DecodeUnavailable(format!(
            "no codec backend compiled in for {transfer_syntax}"
        )));
    }

    // The decoder mishandles uncompressed big-endian 16-bit data, so swap
    // the raw bytes directly
    if bits_allocated == 16 && transfer_syntax.is_big_endian() {
        return big_endian_16bit(obj);
    }

    let decoded = obj
        .decode_pixel_data()
        .map_err(|e| ConvertError::DecodeUnavailable(e.to_string()))?;

    if bits_allocated == 32 {
        let data = decoded
            .to_vec::<u32>()
            .map_err(|e| ConvertError::DecodeUnavailable(e.to_string()))?
            .iter()
            .flat_map(|&v| v.to_le_bytes())
            .collect();
        Ok(data)
    } else if bits_allocated == 16 {
        // Use the decoder's raw output to avoid LUT transformations
        Ok(decoded.data().to_vec())
    } else {
        decoded
            .to_vec::<u8>()
            .map_err(|e| ConvertError::DecodeUnavailable(e.to_string()))
    }
}

/// Big-endian uncompressed 16-bit pixel data, byte-swapped to little-endian
fn big_endian_16bit(obj: &DicomObj) -> Result<Vec<u8>, ConvertError> {
    let raw = raw_payload(obj)?;

    if !raw.len().is_multiple_of(2) {
        return Err(ConvertError::DecodeUnavailable(
            "invalid 16-bit pixel data length".to_string(),
        ));
    }

    Ok(raw
        .chunks_exact(2)
        .flat_map(|chunk| {
            let value = u16::from_be_bytes([chunk[0], chunk[1]]);
            value.to_le_bytes()
        })
        .collect())
}

/// Strategy 2: the untouched PixelData bytes
fn raw_payload(obj: &DicomObj) -> Result<Vec<u8>, ConvertError> {
    let Some(element) = obj.get(tags::PIXEL_DATA) else {
        return Err(ConvertError::NoPixelData {
            context: parser::ErrorContext::from(obj).describe(),
        });
    };

    let bytes = element
        .to_bytes()
        .context("failed to read raw pixel data bytes")?;

    Ok(bytes.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compression_detection_covers_jpeg_and_rle() {
        assert!(detect_compression("1.2.840.10008.1.2.4.50")); // JPEG Baseline
        assert!(detect_compression("1.2.840.10008.1.2.4.90")); // JPEG 2000 Lossless
        assert!(detect_compression("1.2.840.10008.1.2.5")); // RLE
        assert!(!detect_compression("1.2.840.10008.1.2")); // Implicit VR LE
        assert!(!detect_compression("1.2.840.10008.1.2.1")); // Explicit VR LE
        assert!(!detect_compression("1.2.840.10008.1.2.2")); // Explicit VR BE
    }
}
