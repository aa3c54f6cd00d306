use clap::Parser;
use dcm2jpg::batch;
use dcm2jpg::capabilities::CodecSupport;
use dcm2jpg::cli::Args;
use dcm2jpg::convert::{self, ConvertOptions};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

fn main() {
    let args = Args::parse();

    let codecs = CodecSupport::detect();
    print_codec_status(codecs);

    let Some(input) = args.input.clone().or_else(prompt_for_path) else {
        println!("no input path given");
        return;
    };

    let options = ConvertOptions {
        output: args.output.clone(),
        quality: args.quality,
        verbose: args.verbose,
        codecs,
    };

    if args.batch || input.is_dir() {
        run_batch(&input, &options);
    } else {
        run_single(&input, &options);
    }
}

fn run_single(input: &Path, options: &ConvertOptions) {
    if !input.is_file() {
        println!("file not found: {}", input.display());
        return;
    }

    match convert::convert_file(input, options) {
        Ok(output) => println!("converted {} -> {}", input.display(), output.display()),
        Err(err) => println!("error: {}: {err}", input.display()),
    }
}

fn run_batch(input: &Path, options: &ConvertOptions) {
    if let Err(err) = batch::convert_directory(input, options) {
        println!("error: {}: {err}", input.display());
    }
}

/// Interactive fallback: with no input argument, ask for a file path
fn prompt_for_path() -> Option<PathBuf> {
    print!("DICOM file path: ");
    std::io::stdout().flush().ok()?;

    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line).ok()?;

    let trimmed = line.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(PathBuf::from(trimmed))
    }
}

fn print_codec_status(codecs: CodecSupport) {
    println!("native decoders : {}", availability(codecs.native));
    println!("GDCM backend    : {}", availability(codecs.gdcm));
    if !codecs.any() {
        println!("warning: compressed DICOM files will fall back to raw pixel data");
    }
    println!();
}

fn availability(present: bool) -> &'static str {
    if present { "available" } else { "not available" }
}
