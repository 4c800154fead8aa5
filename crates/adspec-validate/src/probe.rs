use std::io::{BufRead, Seek};

use serde::{Deserialize, Serialize};

use crate::error::DecodeError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn ratio(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Seekable buffered stream of encoded image data.
pub trait ImageSource: BufRead + Seek {}

impl<T: BufRead + Seek> ImageSource for T {}

/// Reads pixel dimensions out of an encoded image.
pub trait ImageProbe: Send + Sync {
    fn dimensions(&self, source: &mut dyn ImageSource) -> Result<Dimensions, DecodeError>;
}

/// Header-only probe backed by the `image` crate decoders.
#[derive(Clone, Copy, Debug, Default)]
pub struct RasterProbe;

impl ImageProbe for RasterProbe {
    fn dimensions(&self, source: &mut dyn ImageSource) -> Result<Dimensions, DecodeError> {
        let reader = image::ImageReader::new(source).with_guessed_format()?;
        if reader.format().is_none() {
            return Err(DecodeError::UnknownFormat);
        }
        let (width, height) = reader.into_dimensions()?;
        if width == 0 || height == 0 {
            return Err(DecodeError::Empty { width, height });
        }
        Ok(Dimensions { width, height })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn encode(width: u32, height: u32, format: image::ImageFormat) -> Vec<u8> {
        let img = image::RgbImage::new(width, height);
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, format).unwrap();
        buf.into_inner()
    }

    #[test]
    fn reads_png_dimensions() {
        let bytes = encode(64, 48, image::ImageFormat::Png);
        assert_eq!(RasterProbe.dimensions(&mut Cursor::new(&bytes)).unwrap(), Dimensions::new(64, 48));
    }

    #[test]
    fn reads_jpeg_dimensions() {
        let bytes = encode(33, 17, image::ImageFormat::Jpeg);
        assert_eq!(RasterProbe.dimensions(&mut Cursor::new(&bytes)).unwrap(), Dimensions::new(33, 17));
    }

    #[test]
    fn garbage_is_unknown_format() {
        let err = RasterProbe.dimensions(&mut Cursor::new(b"definitely not an image")).unwrap_err();
        assert!(matches!(err, DecodeError::UnknownFormat));
    }

    #[test]
    fn truncated_png_fails() {
        let bytes = encode(10, 10, image::ImageFormat::Png);
        assert!(RasterProbe.dimensions(&mut Cursor::new(&bytes[..12])).is_err());
    }

    #[test]
    fn stops_after_the_header() {
        let mut bytes = encode(16, 16, image::ImageFormat::Png);
        let encoded_len = bytes.len() as u64;
        bytes.resize(bytes.len() + 4 * 1024 * 1024, 0);
        let mut cursor = Cursor::new(bytes);
        assert_eq!(RasterProbe.dimensions(&mut cursor).unwrap(), Dimensions::new(16, 16));
        assert!(cursor.position() < encoded_len + 256 * 1024, "read {} bytes", cursor.position());
    }
}
