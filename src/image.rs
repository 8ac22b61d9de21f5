use std::fmt::Display;

use crate::error::Error;

pub mod ops;
pub mod reader;
pub mod writer;

/// Magic number of a netpbm image, naming encoding and channel arity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatTag {
    PlainPixmap,
    RawPixmap,
    PlainGraymap,
    RawGraymap,
}

impl FormatTag {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "P3" => Some(Self::PlainPixmap),
            "P6" => Some(Self::RawPixmap),
            "P2" => Some(Self::PlainGraymap),
            "P5" => Some(Self::RawGraymap),
            _ => None,
        }
    }

    pub fn token(&self) -> &'static str {
        match self {
            Self::PlainPixmap => "P3",
            Self::RawPixmap => "P6",
            Self::PlainGraymap => "P2",
            Self::RawGraymap => "P5",
        }
    }

    pub fn is_grayscale(&self) -> bool {
        matches!(self, Self::PlainGraymap | Self::RawGraymap)
    }
}

impl Display for FormatTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// One color channel of an image, stored row-major as 8 bit samples.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelGrid {
    samples: Vec<u8>,
    width: u32,
    height: u32,
}

impl ChannelGrid {
    /// Creates a zero-filled grid, surfacing allocation failure instead of
    /// aborting the process.
    pub fn allocate(width: u32, height: u32) -> crate::Result<Self> {
        let length = width as usize * height as usize;
        let mut samples = Vec::new();
        samples
            .try_reserve_exact(length)
            .map_err(|_| Error::OutOfMemory)?;
        samples.resize(length, 0);
        Ok(Self {
            samples,
            width,
            height,
        })
    }

    pub fn from_samples(width: u32, height: u32, samples: Vec<u8>) -> Self {
        debug_assert_eq!(samples.len(), width as usize * height as usize);
        Self {
            samples,
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn index(&self, row_index: u32, column_index: u32) -> usize {
        column_index as usize + row_index as usize * self.width as usize
    }

    pub fn sample(&self, row_index: u32, column_index: u32) -> u8 {
        self.samples[self.index(row_index, column_index)]
    }

    pub fn set_sample(&mut self, row_index: u32, column_index: u32, value: u8) {
        let index = self.index(row_index, column_index);
        self.samples[index] = value;
    }

    pub fn swap_samples(&mut self, first: (u32, u32), second: (u32, u32)) {
        let first_index = self.index(first.0, first.1);
        let second_index = self.index(second.0, second.1);
        self.samples.swap(first_index, second_index);
    }

    pub fn row_mut(&mut self, row_index: u32) -> &mut [u8] {
        let start = self.index(row_index, 0);
        let end = start + self.width as usize;
        &mut self.samples[start..end]
    }
}

/// An image decoded from one of the portable map formats. The comment block
/// and the declared maximum sample value are carried along unmodified so a
/// re-encode reproduces them. For grayscale tags only the red channel holds
/// meaningful data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    format_tag: FormatTag,
    comment: String,
    width: u32,
    height: u32,
    max_value: u32,
    red_gray: ChannelGrid,
    green: ChannelGrid,
    blue: ChannelGrid,
}

impl Image {
    pub fn new(
        format_tag: FormatTag,
        comment: String,
        max_value: u32,
        red_gray: ChannelGrid,
        green: ChannelGrid,
        blue: ChannelGrid,
    ) -> Self {
        debug_assert_eq!(red_gray.width(), green.width());
        debug_assert_eq!(red_gray.width(), blue.width());
        debug_assert_eq!(red_gray.height(), green.height());
        debug_assert_eq!(red_gray.height(), blue.height());
        Self {
            format_tag,
            comment,
            width: red_gray.width(),
            height: red_gray.height(),
            max_value,
            red_gray,
            green,
            blue,
        }
    }

    pub fn format_tag(&self) -> FormatTag {
        self.format_tag
    }

    pub fn set_format_tag(&mut self, format_tag: FormatTag) {
        self.format_tag = format_tag;
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn max_value(&self) -> u32 {
        self.max_value
    }

    pub fn red_gray_channel(&self) -> &ChannelGrid {
        &self.red_gray
    }

    pub fn green_channel(&self) -> &ChannelGrid {
        &self.green
    }

    pub fn blue_channel(&self) -> &ChannelGrid {
        &self.blue
    }
}

pub trait ImageReader {
    fn read_image(&mut self) -> crate::Result<Image>;
}

pub trait ImageWriter {
    fn write_image(&mut self) -> crate::Result<()>;
}
