use std::io::Write;

use clap::{builder::PossibleValue, ValueEnum};

use super::super::{ChannelGrid, FormatTag, Image, ImageWriter};
use crate::error::Error;

const RAW_SEPARATOR: u8 = b'\n';

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OutputEncoding {
    Ascii,
    Binary,
}

impl ValueEnum for OutputEncoding {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Ascii, Self::Binary]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        match self {
            Self::Ascii => Some(PossibleValue::new("ascii")),
            Self::Binary => Some(PossibleValue::new("binary")),
        }
    }
}

impl OutputEncoding {
    /// Selects the output format tag. Grayscale results switch from the
    /// pixmap family to the graymap family.
    pub fn format_tag(&self, grayscale: bool) -> FormatTag {
        match (self, grayscale) {
            (Self::Ascii, false) => FormatTag::PlainPixmap,
            (Self::Ascii, true) => FormatTag::PlainGraymap,
            (Self::Binary, false) => FormatTag::RawPixmap,
            (Self::Binary, true) => FormatTag::RawGraymap,
        }
    }
}

pub struct PnmImageWriter<'a, T: Write> {
    writer: T,
    image: &'a Image,
}

impl<'a, T: Write> PnmImageWriter<'a, T> {
    pub fn new(writer: T, image: &'a Image) -> Self {
        Self { writer, image }
    }

    fn write_preamble(&mut self) -> std::io::Result<()> {
        let image = self.image;
        writeln!(self.writer, "{}", image.format_tag().token())?;
        self.writer.write_all(image.comment().as_bytes())?;
        writeln!(self.writer, "{} {}", image.width(), image.height())
    }

    fn write_max_value_line(&mut self) -> std::io::Result<()> {
        writeln!(self.writer, "{}", self.image.max_value())
    }

    fn write_max_value_raw(&mut self) -> std::io::Result<()> {
        write!(self.writer, "{}", self.image.max_value())?;
        self.writer.write_all(&[RAW_SEPARATOR])
    }

    fn write_plain_samples(&mut self, channels: &[&ChannelGrid]) -> std::io::Result<()> {
        let width = self.image.width();
        let height = self.image.height();
        for row_index in 0..height {
            for column_index in 0..width {
                for channel in channels {
                    writeln!(self.writer, "{}", channel.sample(row_index, column_index))?;
                }
            }
        }
        Ok(())
    }

    fn write_raw_samples(&mut self, channels: &[&ChannelGrid]) -> std::io::Result<()> {
        let width = self.image.width();
        let height = self.image.height();
        let mut row_buffer = Vec::with_capacity(width as usize * channels.len());
        for row_index in 0..height {
            row_buffer.clear();
            for column_index in 0..width {
                for channel in channels {
                    row_buffer.push(channel.sample(row_index, column_index));
                }
            }
            self.writer.write_all(&row_buffer)?;
        }
        Ok(())
    }

    fn write_plain_pixmap(&mut self) -> std::io::Result<()> {
        let image = self.image;
        self.write_preamble()?;
        self.write_max_value_line()?;
        self.write_plain_samples(&[
            image.red_gray_channel(),
            image.green_channel(),
            image.blue_channel(),
        ])
    }

    fn write_raw_pixmap(&mut self) -> std::io::Result<()> {
        let image = self.image;
        self.write_preamble()?;
        self.write_max_value_raw()?;
        self.write_raw_samples(&[
            image.red_gray_channel(),
            image.green_channel(),
            image.blue_channel(),
        ])
    }

    fn write_plain_graymap(&mut self) -> std::io::Result<()> {
        let image = self.image;
        self.write_preamble()?;
        self.write_max_value_line()?;
        self.write_plain_samples(&[image.red_gray_channel()])
    }

    fn write_raw_graymap(&mut self) -> std::io::Result<()> {
        let image = self.image;
        self.write_preamble()?;
        self.write_max_value_raw()?;
        self.write_raw_samples(&[image.red_gray_channel()])
    }
}

impl<T: Write> ImageWriter for PnmImageWriter<'_, T> {
    fn write_image(&mut self) -> crate::Result<()> {
        log::info!(
            "Writing {} image of {}x{} pixels",
            self.image.format_tag(),
            self.image.width(),
            self.image.height()
        );
        let result = match self.image.format_tag() {
            FormatTag::PlainPixmap => self.write_plain_pixmap(),
            FormatTag::RawPixmap => self.write_raw_pixmap(),
            FormatTag::PlainGraymap => self.write_plain_graymap(),
            FormatTag::RawGraymap => self.write_raw_graymap(),
        };
        result.map_err(Error::UnwritableDestination)?;
        self.writer.flush().map_err(Error::UnwritableDestination)
    }
}
