use std::{
    fs::{File, OpenOptions},
    io::{BufReader, BufWriter},
    path::{Path, PathBuf},
};

pub use cli::CLIParser;
pub use error::Error;
use image::ops::{self, Operation};
use image::reader::ppm::PpmImageReader;
use image::writer::pnm::{OutputEncoding, PnmImageWriter};
use image::{FormatTag, ImageReader, ImageWriter};

mod cli;
mod error;
mod image;
mod logger;

pub type Result<T> = std::result::Result<T, error::Error>;

pub struct Arguments {
    input_file: PathBuf,
    output_basename: PathBuf,
    output_encoding: OutputEncoding,
    operation: Option<Operation>,
}

fn open_input_file(file_path: &Path) -> Result<File> {
    File::open(file_path)
        .map_err(|e| Error::UnableToOpenInputFileForReading(file_path.display().to_string(), e))
}

fn open_output_file(file_path: &Path) -> Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(file_path)
        .map_err(|e| Error::UnableToOpenOutputFileForWriting(file_path.display().to_string(), e))
}

fn requests_grayscale(arguments: &Arguments) -> bool {
    arguments.operation == Some(Operation::Grayscale)
}

fn output_format_tag(arguments: &Arguments) -> FormatTag {
    arguments
        .output_encoding
        .format_tag(requests_grayscale(arguments))
}

fn output_file_path(arguments: &Arguments) -> PathBuf {
    let extension = if output_format_tag(arguments).is_grayscale() {
        ".pgm"
    } else {
        ".ppm"
    };
    let mut path = arguments.output_basename.clone().into_os_string();
    path.push(extension);
    PathBuf::from(path)
}

pub fn process_ppm_image(arguments: &Arguments) -> Result<()> {
    let input_file = open_input_file(&arguments.input_file)?;
    let mut reader = PpmImageReader::new(BufReader::new(&input_file));
    let mut image = reader.read_image()?;
    if let Some(operation) = arguments.operation {
        ops::apply(&mut image, operation);
        log::info!("Applied operation {:?}", operation);
    }
    image.set_format_tag(output_format_tag(arguments));
    let output_path = output_file_path(arguments);
    let output_file = open_output_file(&output_path)?;
    let mut writer = PnmImageWriter::new(BufWriter::new(&output_file), &image);
    writer.write_image()
}
