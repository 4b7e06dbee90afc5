//! Source image handling.
//!
//! A [`SourceImage`] is the decoded, immutable starting point of one pyramid:
//! every level raster is resampled from it directly, never from another level.
//! It is owned by the orchestrator for the duration of one image's pipeline
//! and dropped once all levels are produced.
//!
//! Decoding normalizes to 8-bit RGB up front. Tiles are always encoded as
//! JPEG, which cannot carry alpha or 16-bit channels, so flattening once here
//! keeps every downstream encode infallible with respect to color type.

use std::path::Path;

use image::{ImageReader, RgbImage};

use crate::error::DecodeError;

/// Immutable handle to one decoded source image.
#[derive(Debug, Clone)]
pub struct SourceImage {
    name: String,
    raster: RgbImage,
}

impl SourceImage {
    /// Decode the image at `path`.
    ///
    /// The pyramid is named after the file stem (`scan.png` -> `scan`).
    ///
    /// `max_pixels` is an explicit guard on the total pixel count, checked
    /// against the header dimensions before any pixel data is decoded. `None`
    /// accepts arbitrarily large images; the decoder's own built-in limits are
    /// disabled so this guard is the only one in effect.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] if the file cannot be read, is not a supported
    /// raster format, exceeds `max_pixels`, or has no usable file stem.
    pub fn open(path: &Path, max_pixels: Option<u64>) -> Result<Self, DecodeError> {
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .filter(|stem| !stem.is_empty())
            .ok_or_else(|| DecodeError::InvalidFileName {
                path: path.to_path_buf(),
            })?;

        if let Some(limit) = max_pixels {
            let (width, height) = ImageReader::open(path)?
                .with_guessed_format()?
                .into_dimensions()?;
            let pixels = u64::from(width) * u64::from(height);
            if pixels > limit {
                return Err(DecodeError::PixelLimitExceeded {
                    width,
                    height,
                    limit,
                });
            }
        }

        let mut reader = ImageReader::open(path)?.with_guessed_format()?;
        reader.no_limits();
        let raster = reader.decode()?.to_rgb8();

        Ok(Self { name, raster })
    }

    /// Create a source image from an already-decoded raster.
    pub fn from_raster(name: impl Into<String>, raster: RgbImage) -> Self {
        Self {
            name: name.into(),
            raster,
        }
    }

    /// Name of the pyramid this image produces (source file stem).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Full-resolution pixel data.
    pub fn raster(&self) -> &RgbImage {
        &self.raster
    }

    /// Source width in pixels.
    pub fn width(&self) -> u32 {
        self.raster.width()
    }

    /// Source height in pixels.
    pub fn height(&self) -> u32 {
        self.raster.height()
    }
}

// =============================================================================
// Tests
// =============================================================================
