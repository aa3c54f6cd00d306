//! DICOM header metadata

use super::photometric::PhotometricInterpretation;
use super::pixel_data::PixelPayload;
use crate::pixels::HeaderFields;
use crate::types::{BitDepth, Dimensions, PixelRepresentation, SOPClass, TransferSyntax};

/// Header fields and pixel payload extracted from a DICOM file
#[derive(Debug, Clone)]
pub struct DicomMetadata {
    pub dimensions: Dimensions,
    pub samples_per_pixel: u16,
    pub bit_depth: BitDepth,
    pub pixel_representation: PixelRepresentation,
    pub number_of_frames: u32, // default 1 for single-frame
    pub photometric_interpretation: PhotometricInterpretation,

    /// Pixel bytes plus how they were obtained
    pub payload: PixelPayload,

    // Technical metadata for display and error context
    pub modality: Option<String>,
    pub sop_class: Option<SOPClass>,
    pub transfer_syntax: TransferSyntax,
}

impl DicomMetadata {
    #[inline(always)]
    #[must_use]
    pub fn rows(&self) -> u16 {
        self.dimensions.rows
    }

    #[inline(always)]
    #[must_use]
    pub fn cols(&self) -> u16 {
        self.dimensions.cols
    }

    /// Returns true if this DICOM file uses big-endian byte order
    #[inline(always)]
    #[must_use]
    pub fn is_big_endian(&self) -> bool {
        self.transfer_syntax.is_big_endian()
    }

    /// The subset of fields the pixel reconstruction needs
    #[must_use]
    pub fn header_fields(&self) -> HeaderFields {
        HeaderFields {
            dimensions: self.dimensions,
            samples_per_pixel: self.samples_per_pixel,
            bit_depth: self.bit_depth,
            pixel_representation: self.pixel_representation,
        }
    }
}
