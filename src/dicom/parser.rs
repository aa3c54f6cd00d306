//! Tag-level extraction helpers
//!
//! Header fields fall back to fixed defaults when the tag is absent, so a
//! minimal or partially broken file still reaches the raw-reconstruction
//! path with a usable header.

use crate::types::{BitDepth, Dimensions, PixelRepresentation, SOPClass, TransferSyntax};
use dicom::core::dictionary::UidDictionary;
use dicom::dictionary_std::sop_class;
use dicom::dictionary_std::tags;
use dicom::encoding::TransferSyntaxIndex;
use dicom::object::{FileDicomObject, InMemDicomObject, StandardDataDictionary};
use dicom::transfer_syntax::TransferSyntaxRegistry;

pub type DicomObj = FileDicomObject<InMemDicomObject<StandardDataDictionary>>;

/// Partial metadata for error message context
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    pub modality: Option<String>,
    pub sop_class: Option<SOPClass>,
}

impl ErrorContext {
    /// Suffix for error messages, pointing at non-image DICOM files when
    /// modality or SOP class hints are available
    #[must_use]
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();

        if let Some(modality) = &self.modality {
            parts.push(format!("Modality: {modality}"));
        }

        if let Some(sc) = &self.sop_class {
            parts.push(format!("SOP Class: {sc}")); // Uses Display: "Name (UID)"
        }

        if parts.is_empty() {
            String::new()
        } else {
            format!(
                " - this may be a non-image DICOM file ({})",
                parts.join(", ")
            )
        }
    }
}

impl From<&DicomObj> for ErrorContext {
    fn from(obj: &DicomObj) -> Self {
        ErrorContext {
            modality: extract_modality(obj),
            sop_class: extract_sop_class(obj),
        }
    }
}

/// Rows and Columns, defaulting to 512x512 when absent
pub fn extract_dimensions(obj: &DicomObj) -> Dimensions {
    let rows = obj
        .get(tags::ROWS)
        .and_then(|e| e.to_int::<u16>().ok())
        .unwrap_or(512);

    let cols = obj
        .get(tags::COLUMNS)
        .and_then(|e| e.to_int::<u16>().ok())
        .unwrap_or(512);

    Dimensions::new(rows, cols)
}

#[inline]
pub fn extract_samples_per_pixel(obj: &DicomObj) -> u16 {
    obj.get(tags::SAMPLES_PER_PIXEL)
        .and_then(|e| e.to_int::<u16>().ok())
        .unwrap_or(1)
}

/// Bits Allocated and Bits Stored; 16 bits allocated when absent, and
/// stored defaults to allocated
pub fn extract_bit_depth(obj: &DicomObj) -> BitDepth {
    let allocated = obj
        .get(tags::BITS_ALLOCATED)
        .and_then(|e| e.to_int::<u16>().ok())
        .unwrap_or(16);

    let stored = obj
        .get(tags::BITS_STORED)
        .and_then(|e| e.to_int::<u16>().ok())
        .unwrap_or(allocated);

    BitDepth::new(allocated, stored)
}

#[inline]
pub fn extract_pixel_representation(obj: &DicomObj) -> PixelRepresentation {
    obj.get(tags::PIXEL_REPRESENTATION)
        .and_then(|e| e.to_int::<u16>().ok())
        .unwrap_or(0)
        .into()
}

#[inline]
pub fn extract_number_of_frames(obj: &DicomObj) -> u32 {
    obj.get(tags::NUMBER_OF_FRAMES)
        .and_then(|e| e.to_int::<u32>().ok())
        .unwrap_or(1)
}

pub fn extract_transfer_syntax(obj: &DicomObj) -> TransferSyntax {
    let uid = obj.meta().transfer_syntax().to_string();
    let name = TransferSyntaxRegistry
        .get(&uid)
        .map_or_else(|| "Unknown".to_string(), |ts| ts.name().to_string());

    TransferSyntax::new(uid, name)
}

pub fn extract_sop_class(obj: &DicomObj) -> Option<SOPClass> {
    obj.get(tags::SOP_CLASS_UID)
        .and_then(|e| e.value().to_str().ok())
        .and_then(|uid| {
            sop_class::StandardSopClassDictionary
                .by_uid(&uid)
                .map(|entry| SOPClass::new(uid.to_string(), entry.name.to_string()))
        })
}

#[inline]
pub fn extract_modality(obj: &DicomObj) -> Option<String> {
    obj.get(tags::MODALITY)
        .and_then(|e| e.value().to_str().ok())
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_context_suffix_lists_available_hints() {
        let empty = ErrorContext::default();
        assert_eq!(empty.describe(), "");

        let with_modality = ErrorContext {
            modality: Some("RTSTRUCT".to_string()),
            sop_class: None,
        };
        assert_eq!(
            with_modality.describe(),
            " - this may be a non-image DICOM file (Modality: RTSTRUCT)"
        );
    }
}
