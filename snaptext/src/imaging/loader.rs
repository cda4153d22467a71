use std::path::Path;

use image::{DynamicImage, GenericImageView, ImageFormat, ImageReader};

use crate::error::{Result, SnapTextError};

/// Color mode of a decoded raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Grayscale,
    Color,
}

/// A decoded image: dimensions, pixel buffer, and color mode.
///
/// Immutable once produced — enhancement strategies build a new `Raster`
/// instead of mutating their input.
#[derive(Debug, Clone)]
pub struct Raster {
    image: DynamicImage,
}

impl Raster {
    pub fn new(image: DynamicImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    pub fn color_mode(&self) -> ColorMode {
        match self.image {
            DynamicImage::ImageLuma8(_)
            | DynamicImage::ImageLumaA8(_)
            | DynamicImage::ImageLuma16(_)
            | DynamicImage::ImageLumaA16(_) => ColorMode::Grayscale,
            _ => ColorMode::Color,
        }
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    /// Encode as PNG for handing off to the OCR engine.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>> {
        let mut output = Vec::new();
        self.image
            .write_to(&mut std::io::Cursor::new(&mut output), ImageFormat::Png)
            .map_err(|e| SnapTextError::Ocr(format!("Failed to encode image: {e}")))?;
        Ok(output)
    }
}

/// Decode raw image bytes into a [`Raster`].
///
/// The format is guessed from the content. Fails with
/// [`SnapTextError::EmptyInput`] for zero-length input and
/// [`SnapTextError::Decode`] for invalid or unsupported bytes.
pub fn load_from_bytes(bytes: &[u8]) -> Result<Raster> {
    if bytes.is_empty() {
        return Err(SnapTextError::EmptyInput);
    }

    let reader = ImageReader::new(std::io::Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| SnapTextError::Decode(format!("Failed to read image: {e}")))?;

    let image = reader
        .decode()
        .map_err(|e| SnapTextError::Decode(format!("Failed to decode image: {e}")))?;

    Ok(Raster::new(image))
}

/// Read a file and decode it into a [`Raster`].
pub fn load_from_path(path: &Path) -> Result<Raster> {
    let bytes = std::fs::read(path)?;
    load_from_bytes(&bytes)
}
