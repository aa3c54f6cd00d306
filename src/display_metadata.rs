use crate::dicom::DicomMetadata;

pub fn print_metadata(metadata: &DicomMetadata) {
    println!(
        "{:20}: {}x{} [{}]",
        "Dimensions",
        metadata.dimensions,
        metadata.samples_per_pixel,
        metadata.photometric_interpretation
    );
    println!(
        "{:20}: {} ({})",
        "Bits", metadata.bit_depth, metadata.pixel_representation
    );

    if metadata.number_of_frames > 1 {
        println!("{:20}: {}", "Frames", metadata.number_of_frames);
    }

    print_field("Modality", metadata.modality.as_ref());
    print_sop_class_info(metadata);
    print_transfer_syntax_info(metadata);

    println!();
}

fn print_field(name: &str, value: Option<&String>) {
    if let Some(v) = value {
        println!("{name:20}: {v}");
    }
}

fn print_sop_class_info(metadata: &DicomMetadata) {
    if let Some(sop_class) = &metadata.sop_class {
        println!("{:20}: {}", "SOP Class UID", sop_class);
    }
}

fn print_transfer_syntax_info(metadata: &DicomMetadata) {
    println!("{:20}: {}", "Transfer Syntax", metadata.transfer_syntax);
}
