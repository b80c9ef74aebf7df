//! Image decoding for composing documents from pictures.

use std::path::{Path, PathBuf};

use ::image::RgbImage;
use tracing::{debug, instrument};

use super::ImageDecoder;
use crate::error::{PdfOpsError, Result};

/// A decoded picture, flattened to 8-bit RGB.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    /// Where the picture was read from.
    pub path: PathBuf,
    /// Pixel data.
    pub pixels: RgbImage,
}

impl DecodedImage {
    /// Width and height in pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }
}

/// Decodes PNG and JPEG files with the `image` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct RasterDecoder;

impl RasterDecoder {
    /// Create a new decoder.
    pub fn new() -> Self {
        Self
    }
}

impl ImageDecoder for RasterDecoder {
    type Image = DecodedImage;

    #[instrument(skip_all, fields(path = %path.display()))]
    fn decode(&self, path: &Path) -> Result<DecodedImage> {
        let decoded = ::image::open(path)
            .map_err(|err| PdfOpsError::unreadable_image(path, err.to_string()))?;

        // Alpha is dropped; pages have no transparency
        let pixels = decoded.to_rgb8();
        debug!(width = pixels.width(), height = pixels.height(), "Image decoded");

        Ok(DecodedImage {
            path: path.to_path_buf(),
            pixels,
        })
    }
}
