use clap::Parser;
use std::path::PathBuf;

/// Convert DICOM files to JPEG images
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// DICOM file or directory to convert (prompts when omitted)
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Output file or directory (defaults next to the input)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// JPEG quality (1-100)
    #[arg(short, long, default_value_t = 95, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub quality: u8,

    /// Convert every .dcm file in the input directory
    #[arg(short, long)]
    pub batch: bool,

    /// Show DICOM metadata while converting
    #[arg(short, long)]
    pub verbose: bool,
}
