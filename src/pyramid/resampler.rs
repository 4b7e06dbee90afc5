//! Level resampling.
//!
//! Each pyramid level is resampled from the original source image, not from
//! the previously generated level. Independent per-level resampling costs more
//! compute than chaining 2x reductions, but chained downsampling compounds
//! blur and aliasing; sampling the original keeps visual quality consistent at
//! every level.
//!
//! Minification uses Lanczos3, a windowed-sinc filter with good anti-aliasing.
//! The full-resolution level is the one exception: its dimensions equal the
//! source, so it is returned as a borrow of the source raster and never run
//! through the filter.

use std::borrow::Cow;

use image::imageops::{self, FilterType};
use image::RgbImage;

use super::planner::PyramidLevel;
use super::source::SourceImage;
use crate::error::ResampleError;

/// Produce the full raster for one pyramid level.
///
/// Returns a borrowed raster when the level is the full-resolution one, and an
/// owned Lanczos3-filtered buffer otherwise. The buffer is transient: the
/// caller tiles it and drops it before the next level is produced.
///
/// # Errors
///
/// Returns [`ResampleError::InvalidDimensions`] if either target dimension is
/// zero. The planner never emits such levels, but the invariant is checked
/// here rather than assumed.
pub fn resample<'a>(
    source: &'a SourceImage,
    level: &PyramidLevel,
) -> Result<Cow<'a, RgbImage>, ResampleError> {
    if level.width == 0 || level.height == 0 {
        return Err(ResampleError::InvalidDimensions {
            width: level.width,
            height: level.height,
        });
    }

    if level.width == source.width() && level.height == source.height() {
        return Ok(Cow::Borrowed(source.raster()));
    }

    Ok(Cow::Owned(imageops::resize(
        source.raster(),
        level.width,
        level.height,
        FilterType::Lanczos3,
    )))
}

// =============================================================================
// Tests
// =============================================================================
