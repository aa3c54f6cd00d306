//! Shared helpers for building synthetic DICOM fixtures in tests

use dicom::core::{DataElement, PrimitiveValue, VR};
use dicom::dictionary_std::{tags, uids};
use dicom::object::{FileMetaTableBuilder, InMemDicomObject};
use std::path::Path;

use crate::dicom::parser::DicomObj;

const SOP_INSTANCE_UID: &str = "2.25.313668365062541988123439524761904350918";

fn attach_meta(obj: InMemDicomObject) -> DicomObj {
    obj.with_meta(
        FileMetaTableBuilder::new()
            .transfer_syntax(uids::EXPLICIT_VR_LITTLE_ENDIAN)
            .media_storage_sop_class_uid(uids::SECONDARY_CAPTURE_IMAGE_STORAGE)
            .media_storage_sop_instance_uid(SOP_INSTANCE_UID),
    )
    .expect("failed to build file meta table")
}

fn base_object() -> InMemDicomObject {
    let mut obj = InMemDicomObject::new_empty();
    obj.put(DataElement::new(
        tags::SOP_CLASS_UID,
        VR::UI,
        PrimitiveValue::from(uids::SECONDARY_CAPTURE_IMAGE_STORAGE),
    ));
    obj.put(DataElement::new(
        tags::SOP_INSTANCE_UID,
        VR::UI,
        PrimitiveValue::from(SOP_INSTANCE_UID),
    ));
    obj
}

/// Complete uncompressed single-sample 16-bit object with the given pixel
/// values in row-major order
pub fn grayscale_object(rows: u16, cols: u16, pixels: &[u16]) -> DicomObj {
    assert_eq!(
        pixels.len(),
        usize::from(rows) * usize::from(cols),
        "fixture pixel count must match the dimensions"
    );

    let mut obj = base_object();
    obj.put(DataElement::new(
        tags::MODALITY,
        VR::CS,
        PrimitiveValue::from("OT"),
    ));
    obj.put(DataElement::new(
        tags::PHOTOMETRIC_INTERPRETATION,
        VR::CS,
        PrimitiveValue::from("MONOCHROME2"),
    ));
    obj.put(DataElement::new(
        tags::SAMPLES_PER_PIXEL,
        VR::US,
        PrimitiveValue::from(1_u16),
    ));
    obj.put(DataElement::new(
        tags::ROWS,
        VR::US,
        PrimitiveValue::from(rows),
    ));
    obj.put(DataElement::new(
        tags::COLUMNS,
        VR::US,
        PrimitiveValue::from(cols),
    ));
    obj.put(DataElement::new(
        tags::BITS_ALLOCATED,
        VR::US,
        PrimitiveValue::from(16_u16),
    ));
    obj.put(DataElement::new(
        tags::BITS_STORED,
        VR::US,
        PrimitiveValue::from(16_u16),
    ));
    obj.put(DataElement::new(
        tags::HIGH_BIT,
        VR::US,
        PrimitiveValue::from(15_u16),
    ));
    obj.put(DataElement::new(
        tags::PIXEL_REPRESENTATION,
        VR::US,
        PrimitiveValue::from(0_u16),
    ));

    let bytes: Vec<u8> = pixels.iter().flat_map(|v| v.to_le_bytes()).collect();
    obj.put(DataElement::new(
        tags::PIXEL_DATA,
        VR::OW,
        PrimitiveValue::from(bytes),
    ));

    attach_meta(obj)
}

/// Object with a pixel payload but none of the image description tags
pub fn bare_object(pixel_bytes: Vec<u8>) -> DicomObj {
    let mut obj = base_object();
    obj.put(DataElement::new(
        tags::PIXEL_DATA,
        VR::OW,
        PrimitiveValue::from(pixel_bytes),
    ));
    attach_meta(obj)
}

/// Object carrying only identity tags and a modality, no PixelData
pub fn object_without_pixel_data(modality: &str) -> DicomObj {
    let mut obj = base_object();
    obj.put(DataElement::new(
        tags::MODALITY,
        VR::CS,
        PrimitiveValue::from(modality),
    ));
    attach_meta(obj)
}

/// Write a complete grayscale fixture to disk
pub fn write_grayscale_file(path: &Path, rows: u16, cols: u16, pixels: &[u16]) {
    grayscale_object(rows, cols, pixels)
        .write_to_file(path)
        .expect("failed to write DICOM fixture");
}
