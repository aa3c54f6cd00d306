//! Single-file conversion pipeline
//!
//! open → extract → reconstruct → normalize → layout → encode → write.
//! Every failure propagates to the caller, which reports it and moves on;
//! nothing here retries.

use crate::capabilities::CodecSupport;
use crate::dicom::{self, DicomMetadata};
use crate::error::ConvertError;
use crate::pixels::{self, ByteOrder, ImageMode, PixelGrid, Raster};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, GrayImage, RgbImage, RgbaImage};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Settings shared by single-file and batch conversion
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Explicit output file or directory; the JPEG lands next to the
    /// input when unset
    pub output: Option<PathBuf>,
    /// JPEG quality (1-100), forwarded verbatim to the encoder
    pub quality: u8,
    /// Print extracted metadata before converting
    pub verbose: bool,
    pub codecs: CodecSupport,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            output: None,
            quality: 95,
            verbose: false,
            codecs: CodecSupport::detect(),
        }
    }
}

/// Convert one DICOM file to a JPEG and return the output path
pub fn convert_file(input: &Path, options: &ConvertOptions) -> Result<PathBuf, ConvertError> {
    let obj = dicom::open_dicom_file(input)?;
    let (metadata, notes) = dicom::extract_dicom_data(&obj, options.codecs)?;

    for note in &notes {
        println!("{}: {note}", input.display());
    }
    if options.verbose {
        crate::display_metadata::print_metadata(&metadata);
    }

    let raw_fallback = metadata.payload.is_raw();
    let grid = build_grid(&metadata)?;
    let raster = pixels::normalize(grid);
    let mode = pixels::image_mode(&raster.shape)?;
    let image = raster_to_image(raster, mode)?;

    let output_path = resolve_output_path(input, options.output.as_deref(), raw_fallback);
    write_jpeg(&image, &output_path, options.quality)?;

    Ok(output_path)
}

/// Rebuild the typed pixel grid from the payload bytes
fn build_grid(metadata: &DicomMetadata) -> Result<PixelGrid, ConvertError> {
    let header = metadata.header_fields();

    // Decoder output is already little-endian; raw payloads follow the
    // transfer syntax
    let byte_order = if metadata.payload.is_raw() && metadata.is_big_endian() {
        ByteOrder::Big
    } else {
        ByteOrder::Little
    };

    let bytes = metadata.payload.bytes();

    // Multi-frame payloads keep only the first frame
    let frame_len = header.frame_byte_len();
    let bytes =
        if frame_len > 0 && bytes.len() > frame_len && bytes.len().is_multiple_of(frame_len) {
            &bytes[..frame_len]
        } else {
            bytes
        };

    pixels::reconstruct_from_raw(bytes, &header, byte_order)
}

/// Map the raster onto an image buffer according to the layout decision
fn raster_to_image(raster: Raster, mode: ImageMode) -> Result<DynamicImage, ConvertError> {
    let width = raster.shape.cols;
    let height = raster.shape.rows;

    let image = match mode {
        ImageMode::Luma => {
            GrayImage::from_raw(width, height, raster.data).map(DynamicImage::ImageLuma8)
        }
        ImageMode::Rgb => {
            RgbImage::from_raw(width, height, raster.data).map(DynamicImage::ImageRgb8)
        }
        ImageMode::Rgba => {
            RgbaImage::from_raw(width, height, raster.data).map(DynamicImage::ImageRgba8)
        }
        ImageMode::LumaFirstChannel => {
            let single = pixels::select_first_channel(&raster);
            GrayImage::from_raw(width, height, single.data).map(DynamicImage::ImageLuma8)
        }
    };

    image.ok_or_else(|| {
        ConvertError::UnsupportedShape("raster does not fill the declared dimensions".to_string())
    })
}

/// Derive the output path: an explicit file path wins, an explicit
/// directory gets the derived file name, and by default the JPEG lands
/// next to the input. Raw-reconstruction results carry a `_raw` suffix.
#[must_use]
pub fn resolve_output_path(input: &Path, output: Option<&Path>, raw_fallback: bool) -> PathBuf {
    let file_name = derive_file_name(input, raw_fallback);

    match output {
        Some(path) if path.is_dir() => path.join(file_name),
        Some(path) => path.to_path_buf(),
        None => input.with_file_name(file_name),
    }
}

fn derive_file_name(input: &Path, raw_fallback: bool) -> String {
    let stem = input.file_stem().map_or_else(
        || "converted".to_string(),
        |s| s.to_string_lossy().into_owned(),
    );

    if raw_fallback {
        format!("{stem}_raw.jpg")
    } else {
        format!("{stem}.jpg")
    }
}

/// JPEG carries no alpha channel, so RGBA rasters are flattened to RGB at
/// the encode boundary
fn write_jpeg(image: &DynamicImage, path: &Path, quality: u8) -> Result<(), ConvertError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    let encoder = JpegEncoder::new_with_quality(&mut writer, quality);

    match image {
        DynamicImage::ImageRgba8(_) => image.to_rgb8().write_with_encoder(encoder)?,
        _ => image.write_with_encoder(encoder)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;
    use assert_matches::assert_matches;

    #[test]
    fn output_lands_next_to_the_input_by_default() {
        let path = resolve_output_path(Path::new("/data/scan.dcm"), None, false);
        assert_eq!(path, PathBuf::from("/data/scan.jpg"));
    }

    #[test]
    fn raw_reconstruction_gets_a_suffix() {
        let path = resolve_output_path(Path::new("/data/scan.dcm"), None, true);
        assert_eq!(path, PathBuf::from("/data/scan_raw.jpg"));
    }

    #[test]
    fn explicit_file_path_wins() {
        let path = resolve_output_path(
            Path::new("/data/scan.dcm"),
            Some(Path::new("/tmp/out.jpg")),
            false,
        );
        assert_eq!(path, PathBuf::from("/tmp/out.jpg"));
    }

    #[test]
    fn explicit_directory_gets_the_derived_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = resolve_output_path(Path::new("/data/scan.dcm"), Some(dir.path()), false);
        assert_eq!(path, dir.path().join("scan.jpg"));
    }

    #[test]
    fn gradient_converts_to_a_faithful_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("gradient.dcm");

        // 16 evenly spaced values; min maps to 0 and each step adds
        // exactly 17 after normalization (255 / 15)
        let values: Vec<u16> = (0..16).map(|i| i * 1000).collect();
        test_support::write_grayscale_file(&input, 4, 4, &values);

        let output = convert_file(&input, &ConvertOptions::default()).expect("conversion failed");
        assert_eq!(output, dir.path().join("gradient.jpg"));

        let decoded = image::open(&output).expect("output is not readable").to_luma8();
        assert_eq!(decoded.dimensions(), (4, 4));

        for (i, pixel) in decoded.pixels().enumerate() {
            let expected = i as i32 * 17;
            let actual = i32::from(pixel[0]);
            assert!(
                (actual - expected).abs() <= 12,
                "pixel {i}: got {actual}, expected about {expected}"
            );
        }
    }

    #[test]
    fn explicit_output_path_is_used() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("scan.dcm");
        let wanted = dir.path().join("elsewhere.jpg");

        test_support::write_grayscale_file(&input, 2, 2, &[0, 100, 200, 300]);

        let options = ConvertOptions {
            output: Some(wanted.clone()),
            ..ConvertOptions::default()
        };
        let output = convert_file(&input, &options).expect("conversion failed");
        assert_eq!(output, wanted);
        assert!(wanted.is_file());
    }

    #[test]
    fn non_dicom_input_fails_to_parse() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("garbage.dcm");
        std::fs::write(&input, b"not a dicom file").unwrap();

        let result = convert_file(&input, &ConvertOptions::default());
        assert_matches!(result, Err(ConvertError::Parse(_)));
    }

    #[test]
    fn constant_image_is_all_black() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("flat.dcm");
        test_support::write_grayscale_file(&input, 4, 4, &[777; 16]);

        let output = convert_file(&input, &ConvertOptions::default()).expect("conversion failed");
        let decoded = image::open(&output).unwrap().to_luma8();
        assert!(decoded.pixels().all(|p| p[0] <= 2));
    }
}
