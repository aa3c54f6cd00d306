//! Batch conversion over a directory

use crate::convert::{self, ConvertOptions};
use crate::error::ConvertError;
use std::ffi::OsStr;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Aggregate result of a directory run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub converted: usize,
    pub total: usize,
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{converted}/{total}",
            converted = self.converted,
            total = self.total
        )
    }
}

/// Non-recursive scan for files with the standard `.dcm` extension,
/// matched case-insensitively
pub fn find_dicom_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && has_dcm_extension(path))
        .collect();

    files.sort();
    Ok(files)
}

fn has_dcm_extension(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| ext.eq_ignore_ascii_case("dcm"))
}

/// Convert every DICOM file in a directory.
///
/// Per-file failures are printed with the offending path and skipped; the
/// run always continues to the end and reports the aggregate count.
pub fn convert_directory(
    input_dir: &Path,
    options: &ConvertOptions,
) -> Result<BatchSummary, ConvertError> {
    let files = find_dicom_files(input_dir)?;

    if files.is_empty() {
        println!("no DICOM files found in {}", input_dir.display());
        return Ok(BatchSummary {
            converted: 0,
            total: 0,
        });
    }

    if let Some(dir) = options.output.as_deref() {
        fs::create_dir_all(dir)?;
    }

    println!("found {} DICOM file(s)", files.len());

    let mut converted = 0;
    for file in &files {
        match convert::convert_file(file, options) {
            Ok(output) => {
                println!("converted {} -> {}", file.display(), output.display());
                converted += 1;
            }
            Err(err) => println!("error: {}: {err}", file.display()),
        }
    }

    let summary = BatchSummary {
        converted,
        total: files.len(),
    };
    println!("converted {summary} files");
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;

    #[test]
    fn summary_reports_converted_over_total() {
        let summary = BatchSummary {
            converted: 3,
            total: 4,
        };
        assert_eq!(summary.to_string(), "3/4");
    }

    #[test]
    fn scan_matches_the_extension_case_insensitively() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.dcm"), b"x").unwrap();
        fs::write(dir.path().join("b.DCM"), b"x").unwrap();
        fs::write(dir.path().join("notes.txt"), b"x").unwrap();
        fs::create_dir(dir.path().join("nested.dcm")).unwrap();

        let files = find_dicom_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .filter_map(|p| p.file_name().and_then(OsStr::to_str))
            .collect();
        assert_eq!(names, vec!["a.dcm", "b.DCM"]);
    }

    #[test]
    fn run_continues_past_corrupt_inputs() {
        let input_dir = tempfile::tempdir().unwrap();
        let output_dir = tempfile::tempdir().unwrap();

        for name in ["one.dcm", "two.dcm", "three.dcm"] {
            test_support::write_grayscale_file(
                &input_dir.path().join(name),
                4,
                4,
                &[0, 10, 20, 30, 40, 50, 60, 70, 80, 90, 100, 110, 120, 130, 140, 150],
            );
        }
        fs::write(input_dir.path().join("broken.dcm"), b"not a dicom file").unwrap();

        let options = ConvertOptions {
            output: Some(output_dir.path().to_path_buf()),
            ..ConvertOptions::default()
        };

        let summary = convert_directory(input_dir.path(), &options).unwrap();
        assert_eq!(
            summary,
            BatchSummary {
                converted: 3,
                total: 4,
            }
        );

        let mut outputs: Vec<_> = fs::read_dir(output_dir.path())
            .unwrap()
            .filter_map(Result::ok)
            .filter_map(|e| e.file_name().into_string().ok())
            .collect();
        outputs.sort();
        assert_eq!(outputs, vec!["one.jpg", "three.jpg", "two.jpg"]);
    }

    #[test]
    fn empty_directory_reports_zero_of_zero() {
        let dir = tempfile::tempdir().unwrap();
        let summary = convert_directory(dir.path(), &ConvertOptions::default()).unwrap();
        assert_eq!(
            summary,
            BatchSummary {
                converted: 0,
                total: 0,
            }
        );
    }
}
