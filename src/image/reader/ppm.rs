use std::io::{ErrorKind, Read};

use super::super::{ChannelGrid, FormatTag, Image, ImageReader};
use crate::error::Error;

const FORMAT_TAG_TOKEN_NAME: &str = "format tag";
const WIDTH_TOKEN_NAME: &str = "width";
const HEIGHT_TOKEN_NAME: &str = "height";
const MAX_VALUE_TOKEN_NAME: &str = "maximum value";
const SAMPLE_TOKEN_NAME: &str = "sample value";

/// Byte-level scanner with one byte of lookahead.
///
/// Token reads follow formatted extraction rules: leading whitespace is
/// skipped, the token is accumulated, and the delimiter after the token is
/// left unconsumed. Read errors are treated as end of stream.
struct ByteScanner<R: Read> {
    reader: R,
    peeked: Option<u8>,
}

impl<R: Read> ByteScanner<R> {
    fn new(reader: R) -> Self {
        Self {
            reader,
            peeked: None,
        }
    }

    fn next_byte(&mut self) -> Option<u8> {
        if let Some(byte) = self.peeked.take() {
            return Some(byte);
        }
        let mut buffer = [0u8; 1];
        loop {
            match self.reader.read(&mut buffer) {
                Ok(0) => return None,
                Ok(_) => return Some(buffer[0]),
                Err(error) if error.kind() == ErrorKind::Interrupted => continue,
                Err(_) => return None,
            }
        }
    }

    fn peek_byte(&mut self) -> Option<u8> {
        if self.peeked.is_none() {
            self.peeked = self.next_byte();
        }
        self.peeked
    }

    fn next_token(&mut self) -> Option<String> {
        let mut buffer = Vec::new();
        while let Some(byte) = self.peek_byte() {
            if byte.is_ascii_whitespace() {
                if !buffer.is_empty() {
                    break;
                }
                self.next_byte();
            } else {
                buffer.push(byte);
                self.next_byte();
            }
        }
        if buffer.is_empty() {
            None
        } else {
            Some(String::from_utf8_lossy(&buffer).into_owned())
        }
    }

    fn skip_line(&mut self) {
        while let Some(byte) = self.next_byte() {
            if byte == b'\n' {
                break;
            }
        }
    }

    /// Consumes one full line and returns it including its newline. A line
    /// cut short by the end of the stream still gets a trailing newline.
    fn read_line(&mut self) -> String {
        let mut buffer = Vec::new();
        while let Some(byte) = self.next_byte() {
            buffer.push(byte);
            if byte == b'\n' {
                break;
            }
        }
        if buffer.last() != Some(&b'\n') {
            buffer.push(b'\n');
        }
        String::from_utf8_lossy(&buffer).into_owned()
    }

    /// Fills `buffer` with raw bytes, draining the lookahead slot first.
    /// Returns the number of bytes actually filled.
    fn read_raw(&mut self, buffer: &mut [u8]) -> usize {
        let mut filled = 0;
        if let Some(byte) = self.peeked.take() {
            if buffer.is_empty() {
                self.peeked = Some(byte);
                return 0;
            }
            buffer[0] = byte;
            filled = 1;
        }
        while filled < buffer.len() {
            match self.reader.read(&mut buffer[filled..]) {
                Ok(0) => break,
                Ok(count) => filled += count,
                Err(error) if error.kind() == ErrorKind::Interrupted => continue,
                Err(_) => break,
            }
        }
        filled
    }
}

struct PpmHeader {
    comment: String,
    width: u32,
    height: u32,
    max_value: u32,
}

pub struct PpmImageReader<R: Read> {
    scanner: ByteScanner<R>,
}

impl<R: Read> PpmImageReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            scanner: ByteScanner::new(reader),
        }
    }

    /// Reads the leading magic number token and leaves the stream right
    /// after it, before the delimiter.
    pub fn read_format_tag(&mut self) -> crate::Result<FormatTag> {
        let token = self
            .scanner
            .next_token()
            .ok_or(Error::MalformedHeader(FORMAT_TAG_TOKEN_NAME))?;
        FormatTag::from_token(&token).ok_or(Error::UnsupportedFormatTag(token))
    }

    /// Decodes a plain (P3) image. The caller must already have consumed
    /// the format tag token.
    pub fn read_text_image(&mut self) -> crate::Result<Image> {
        let header = self.read_header()?;
        let mut red_gray = ChannelGrid::allocate(header.width, header.height)?;
        let mut green = ChannelGrid::allocate(header.width, header.height)?;
        let mut blue = ChannelGrid::allocate(header.width, header.height)?;
        let expected = header.width as usize * header.height as usize * 3;
        let mut consumed = 0;
        for row_index in 0..header.height {
            for column_index in 0..header.width {
                let red_value = self.read_text_sample(expected, &mut consumed)?;
                let green_value = self.read_text_sample(expected, &mut consumed)?;
                let blue_value = self.read_text_sample(expected, &mut consumed)?;
                red_gray.set_sample(row_index, column_index, red_value);
                green.set_sample(row_index, column_index, green_value);
                blue.set_sample(row_index, column_index, blue_value);
            }
        }
        Ok(Image::new(
            FormatTag::PlainPixmap,
            header.comment,
            header.max_value,
            red_gray,
            green,
            blue,
        ))
    }

    /// Decodes a raw (P6) image. The caller must already have consumed the
    /// format tag token.
    pub fn read_binary_image(&mut self) -> crate::Result<Image> {
        let header = self.read_header()?;
        // exactly one separator byte sits between the maximum value token
        // and the first raw sample
        self.scanner.next_byte();
        let mut red_gray = ChannelGrid::allocate(header.width, header.height)?;
        let mut green = ChannelGrid::allocate(header.width, header.height)?;
        let mut blue = ChannelGrid::allocate(header.width, header.height)?;
        let expected = header.width as usize * header.height as usize * 3;
        let mut consumed = 0;
        let mut pixel = [0u8; 3];
        for row_index in 0..header.height {
            for column_index in 0..header.width {
                let filled = self.scanner.read_raw(&mut pixel);
                if filled < pixel.len() {
                    return Err(Error::TruncatedData {
                        expected,
                        actual: consumed + filled,
                    });
                }
                consumed += filled;
                red_gray.set_sample(row_index, column_index, pixel[0]);
                green.set_sample(row_index, column_index, pixel[1]);
                blue.set_sample(row_index, column_index, pixel[2]);
            }
        }
        Ok(Image::new(
            FormatTag::RawPixmap,
            header.comment,
            header.max_value,
            red_gray,
            green,
            blue,
        ))
    }

    fn read_header(&mut self) -> crate::Result<PpmHeader> {
        self.scanner.skip_line();
        let mut comment = String::new();
        while self.scanner.peek_byte() == Some(b'#') {
            comment.push_str(&self.scanner.read_line());
        }
        let width = self.read_dimension(WIDTH_TOKEN_NAME)?;
        let height = self.read_dimension(HEIGHT_TOKEN_NAME)?;
        let max_value = self.read_header_value(MAX_VALUE_TOKEN_NAME)?;
        log::debug!(
            "Parsed image header: {}x{} pixels, maximum sample value {}",
            width,
            height,
            max_value
        );
        Ok(PpmHeader {
            comment,
            width,
            height,
            max_value,
        })
    }

    fn read_header_value(&mut self, token_name: &'static str) -> crate::Result<u32> {
        self.scanner
            .next_token()
            .ok_or(Error::MalformedHeader(token_name))?
            .parse::<u32>()
            .map_err(|_| Error::MalformedHeader(token_name))
    }

    fn read_dimension(&mut self, token_name: &'static str) -> crate::Result<u32> {
        let value = self.read_header_value(token_name)?;
        if value == 0 {
            return Err(Error::MalformedHeader(token_name));
        }
        Ok(value)
    }

    fn read_text_sample(&mut self, expected: usize, consumed: &mut usize) -> crate::Result<u8> {
        let token = self.scanner.next_token().ok_or(Error::TruncatedData {
            expected,
            actual: *consumed,
        })?;
        let value = token
            .parse::<u32>()
            .map_err(|_| Error::MalformedHeader(SAMPLE_TOKEN_NAME))?;
        *consumed += 1;
        Ok(value as u8)
    }
}

impl<R: Read> ImageReader for PpmImageReader<R> {
    fn read_image(&mut self) -> crate::Result<Image> {
        let image = match self.read_format_tag()? {
            FormatTag::PlainPixmap => self.read_text_image()?,
            FormatTag::RawPixmap => self.read_binary_image()?,
            tag => return Err(Error::UnsupportedFormatTag(tag.token().to_owned())),
        };
        log::info!(
            "Read {} image of {}x{} pixels",
            image.format_tag(),
            image.width(),
            image.height()
        );
        Ok(image)
    }
}
