//! Tiling of level rasters.
//!
//! A level raster is cut into a row-major grid of fixed-size tiles. Edge tiles
//! are truncated to the raster boundary, never padded, which is consistent
//! with an overlap of 0: the union of all tile boxes covers the raster exactly
//! once. The grid is a finite lazy iterator so tiles can be encoded and
//! written as they are produced, keeping peak memory at one raster plus one
//! tile.
//!
//! Encoding follows the tile server convention: each tile is cropped and
//! encoded independently as baseline JPEG at a fixed quality, so tile tasks
//! can run in parallel without shared state.

use bytes::Bytes;
use image::codecs::jpeg::JpegEncoder;
use image::{imageops, RgbImage};

use crate::error::EncodeError;

/// Default JPEG quality (1-100).
pub const DEFAULT_JPEG_QUALITY: u8 = 80;

/// Minimum allowed JPEG quality.
pub const MIN_JPEG_QUALITY: u8 = 1;

/// Maximum allowed JPEG quality.
pub const MAX_JPEG_QUALITY: u8 = 100;

// =============================================================================
// Tile Grid
// =============================================================================

/// Pixel bounds and grid position of one tile within a level raster.
///
/// The pixel box `[x, x + width) x [y, y + height)` is already clamped to the
/// raster extent; `width` and `height` are the actual (possibly truncated)
/// tile dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileBounds {
    /// Tile column index (0-indexed from left)
    pub col: u32,

    /// Tile row index (0-indexed from top)
    pub row: u32,

    /// Left pixel coordinate in the raster
    pub x: u32,

    /// Top pixel coordinate in the raster
    pub y: u32,

    /// Clamped tile width in pixels
    pub width: u32,

    /// Clamped tile height in pixels
    pub height: u32,
}

/// Finite lazy iterator over the tile grid of a `width` x `height` raster.
///
/// Iterates row-major: all columns of row 0, then row 1, and so on. An empty
/// raster yields no tiles.
#[derive(Debug, Clone)]
pub struct TileGrid {
    width: u32,
    height: u32,
    tile_size: u32,
    x: u32,
    y: u32,
}

impl TileGrid {
    /// Create a grid over a raster of the given dimensions.
    pub fn new(width: u32, height: u32, tile_size: u32) -> Self {
        assert!(tile_size > 0, "tile_size must be positive");
        Self {
            width,
            height,
            tile_size,
            x: 0,
            y: 0,
        }
    }

    /// Number of tile columns and rows this grid produces.
    pub fn tile_count(width: u32, height: u32, tile_size: u32) -> (u32, u32) {
        (width.div_ceil(tile_size), height.div_ceil(tile_size))
    }
}

impl Iterator for TileGrid {
    type Item = TileBounds;

    fn next(&mut self) -> Option<TileBounds> {
        if self.width == 0 || self.y >= self.height {
            return None;
        }

        let bounds = TileBounds {
            col: self.x / self.tile_size,
            row: self.y / self.tile_size,
            x: self.x,
            y: self.y,
            // Explicit clamp to the raster extent: edge tiles are smaller
            width: self.tile_size.min(self.width - self.x),
            height: self.tile_size.min(self.height - self.y),
        };

        self.x += self.tile_size;
        if self.x >= self.width {
            self.x = 0;
            self.y += self.tile_size;
        }

        Some(bounds)
    }
}

// =============================================================================
// JPEG Encoder
// =============================================================================

/// JPEG tile encoder.
///
/// Crops one tile out of a level raster and encodes it as baseline JPEG.
/// Stateless per tile: concurrent encode tasks over the same raster need no
/// synchronization.
#[derive(Debug, Clone)]
pub struct JpegTileEncoder {
    quality: u8,
}

impl JpegTileEncoder {
    /// Create an encoder with the given JPEG quality (clamped to 1-100).
    pub fn new(quality: u8) -> Self {
        Self {
            quality: quality.clamp(MIN_JPEG_QUALITY, MAX_JPEG_QUALITY),
        }
    }

    /// The quality this encoder writes tiles at.
    pub fn quality(&self) -> u8 {
        self.quality
    }

    /// Crop `bounds` out of `raster` and encode it as JPEG.
    ///
    /// `bounds` must lie within the raster, which [`TileGrid`] guarantees.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError`] if JPEG encoding fails.
    pub fn encode(&self, raster: &RgbImage, bounds: &TileBounds) -> Result<Bytes, EncodeError> {
        let tile = imageops::crop_imm(raster, bounds.x, bounds.y, bounds.width, bounds.height)
            .to_image();

        let mut output = Vec::new();
        let mut encoder = JpegEncoder::new_with_quality(&mut output, self.quality);
        encoder.encode_image(&tile).map_err(EncodeError::Encode)?;

        Ok(Bytes::from(output))
    }
}

impl Default for JpegTileEncoder {
    fn default() -> Self {
        Self::new(DEFAULT_JPEG_QUALITY)
    }
}

// =============================================================================
// Tests
// =============================================================================
