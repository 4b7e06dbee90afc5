//! Pyramid generation pipeline.
//!
//! Converts one decoded source image into a Deep Zoom tile pyramid:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                    Orchestrator                     │
//! │                                                     │
//! │   SourceImage ──> Planner ──> per level:            │
//! │                               Resampler ──> Tiler   │
//! │                                                     │
//! │   then: descriptor written last                     │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Components
//!
//! - [`SourceImage`]: immutable decoded source pixels, shared by every level
//! - [`plan_levels`]: pure derivation of level indices and dimensions
//! - [`resample`]: Lanczos3 downsampling of the source to one level's size
//! - [`TileGrid`] / [`JpegTileEncoder`]: lazy tile slicing and JPEG encoding
//! - [`generate_pyramid`]: the per-image pipeline, with per-image failure
//!   isolation for the batch driver sitting above

mod orchestrator;
mod planner;
mod resampler;
mod source;
mod tiler;

pub use orchestrator::{generate_pyramid, PyramidOptions, PyramidReport};
pub use planner::{level_dimensions, max_level, plan_levels, PyramidLevel, ZeroLevelPolicy};
pub use resampler::resample;
pub use source::SourceImage;
pub use tiler::{
    JpegTileEncoder, TileBounds, TileGrid, DEFAULT_JPEG_QUALITY, MAX_JPEG_QUALITY,
    MIN_JPEG_QUALITY,
};
