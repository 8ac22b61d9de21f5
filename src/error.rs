use std::fmt::Display;

#[derive(Debug)]
pub enum Error {
    MalformedHeader(&'static str),
    TruncatedData { expected: usize, actual: usize },
    OutOfMemory,
    UnsupportedFormatTag(String),
    UnwritableDestination(std::io::Error),
    UnableToOpenInputFileForReading(String, std::io::Error),
    UnableToOpenOutputFileForWriting(String, std::io::Error),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedHeader(token_name) => {
                write!(f, "Token '{}' is missing or not a valid value", token_name)
            }
            Self::TruncatedData { expected, actual } => {
                write!(
                    f,
                    "Image data ended after {} of {} expected samples",
                    actual, expected
                )
            }
            Self::OutOfMemory => {
                write!(f, "Unable to allocate memory for image channels")
            }
            Self::UnsupportedFormatTag(tag) => {
                write!(
                    f,
                    "Unsupported format tag '{}', only P3 and P6 images can be read",
                    tag
                )
            }
            Self::UnwritableDestination(error) => {
                write!(f, "Unable to write image data to output: {}", error)
            }
            Self::UnableToOpenInputFileForReading(path, error) => {
                write!(
                    f,
                    "Unable to open input file '{}' for reading: {}",
                    path, error
                )
            }
            Self::UnableToOpenOutputFileForWriting(path, error) => {
                write!(
                    f,
                    "Unable to open output file '{}' for writing: {}",
                    path, error
                )
            }
        }
    }
}

impl std::error::Error for Error {}
