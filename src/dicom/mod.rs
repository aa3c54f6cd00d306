//! DICOM file parsing and metadata extraction
//!
//! This module is the boundary over the `dicom` object model: it opens
//! files, reads header fields (with defaults for absent tags), and pulls
//! out the pixel payload.

mod metadata;
pub(crate) mod parser;
mod photometric;
mod pixel_data;

// Re-export public API
pub use metadata::DicomMetadata;
pub use photometric::PhotometricInterpretation;
pub use pixel_data::PixelPayload;

use crate::capabilities::CodecSupport;
use crate::error::ConvertError;
use anyhow::{Context, Result};
use dicom::object::open_file;
use parser::DicomObj;
use std::path::Path;

/// Open and parse a DICOM file
pub fn open_dicom_file(file_path: &Path) -> Result<DicomObj> {
    open_file(file_path)
        .with_context(|| format!("Failed to open DICOM file: {}", file_path.display()))
}

/// Extract header metadata and the pixel payload from a DICOM object.
///
/// Also returns diagnostic notes produced when the decode strategy failed
/// and the raw payload was used instead, so callers can report them next
/// to the file path.
pub fn extract_dicom_data(
    obj: &DicomObj,
    codecs: CodecSupport,
) -> Result<(DicomMetadata, Vec<String>), ConvertError> {
    use dicom::dictionary_std::tags;

    let dimensions = parser::extract_dimensions(obj);
    let samples_per_pixel = parser::extract_samples_per_pixel(obj);
    let bit_depth = parser::extract_bit_depth(obj);
    let pixel_representation = parser::extract_pixel_representation(obj);
    let number_of_frames = parser::extract_number_of_frames(obj);
    let transfer_syntax = parser::extract_transfer_syntax(obj);
    let sop_class = parser::extract_sop_class(obj);
    let modality = parser::extract_modality(obj);

    let photometric_interpretation = obj
        .get(tags::PHOTOMETRIC_INTERPRETATION)
        .and_then(|e| e.value().to_str().ok())
        .and_then(|s| s.as_ref().parse().ok())
        .unwrap_or(PhotometricInterpretation::Monochrome2);

    let (payload, notes) =
        pixel_data::extract_pixel_payload(obj, bit_depth.allocated, &transfer_syntax, codecs)?;

    Ok((
        DicomMetadata {
            dimensions,
            samples_per_pixel,
            bit_depth,
            pixel_representation,
            number_of_frames,
            photometric_interpretation,
            payload,
            modality,
            sop_class,
            transfer_syntax,
        },
        notes,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;
    use crate::types::PixelRepresentation;
    use assert_matches::assert_matches;

    #[test]
    fn extracts_header_fields_from_a_full_object() {
        let pixels: Vec<u16> = (0..16).collect();
        let obj = test_support::grayscale_object(4, 4, &pixels);

        let (metadata, notes) =
            extract_dicom_data(&obj, CodecSupport::detect()).expect("extraction failed");

        assert_eq!(metadata.rows(), 4);
        assert_eq!(metadata.cols(), 4);
        assert_eq!(metadata.samples_per_pixel, 1);
        assert_eq!(metadata.bit_depth.allocated, 16);
        assert_eq!(metadata.pixel_representation, PixelRepresentation::Unsigned);
        assert_eq!(metadata.number_of_frames, 1);
        assert_eq!(
            metadata.photometric_interpretation,
            PhotometricInterpretation::Monochrome2
        );
        assert_eq!(metadata.modality.as_deref(), Some("OT"));
        assert_eq!(metadata.transfer_syntax.uid, "1.2.840.10008.1.2.1");
        assert!(!metadata.is_big_endian());

        // Uncompressed explicit VR LE decodes without a fallback
        assert!(notes.is_empty());
        assert!(!metadata.payload.is_raw());
        assert_eq!(metadata.payload.bytes().len(), 16 * 2);
    }

    #[test]
    fn absent_tags_fall_back_to_defaults() {
        // 512x512 single-sample 16-bit is assumed when the header is bare
        let obj = test_support::bare_object(vec![0u8; 512 * 512 * 2]);

        let (metadata, notes) =
            extract_dicom_data(&obj, CodecSupport::detect()).expect("extraction failed");

        assert_eq!(metadata.rows(), 512);
        assert_eq!(metadata.cols(), 512);
        assert_eq!(metadata.samples_per_pixel, 1);
        assert_eq!(metadata.bit_depth.allocated, 16);
        assert_eq!(metadata.bit_depth.stored, 16);
        assert_eq!(metadata.pixel_representation, PixelRepresentation::Unsigned);

        // The decoder cannot work without image pixel description tags, so
        // the raw payload strategy takes over and leaves a note behind
        assert!(metadata.payload.is_raw());
        assert_eq!(notes.len(), 1);
    }

    #[test]
    fn missing_pixel_data_reports_the_modality() {
        let obj = test_support::object_without_pixel_data("RTSTRUCT");

        let result = extract_dicom_data(&obj, CodecSupport::detect());
        assert_matches!(
            result,
            Err(ConvertError::NoPixelData { context }) if context.contains("RTSTRUCT")
        );
    }
}
