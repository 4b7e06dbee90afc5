use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when decoding a source image.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// I/O error while reading the source file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Source is not readable as a supported raster format
    #[error("unreadable or unsupported image data: {0}")]
    Image(#[from] image::ImageError),

    /// Source exceeds the configured pixel-count guard
    #[error("image is {width}x{height} pixels, exceeding the limit of {limit}")]
    PixelLimitExceeded { width: u32, height: u32, limit: u64 },

    /// Source path has no usable file stem to name the pyramid after
    #[error("cannot derive an image name from path: {}", .path.display())]
    InvalidFileName { path: PathBuf },
}

/// Errors producing a level raster from the source image.
#[derive(Debug, Clone, Error)]
pub enum ResampleError {
    /// Target dimensions are not positive
    #[error("invalid target dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}

/// Errors encoding or writing a single tile.
///
/// Per-tile failures are isolated: sibling tiles of the same level are still
/// produced, and the image as a whole is marked failed afterwards.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// JPEG encoding of the tile pixels failed
    #[error("JPEG encoding failed: {0}")]
    Encode(#[source] image::ImageError),

    /// Writing the encoded tile file failed
    #[error("failed to write tile: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that abort one source image's pipeline.
///
/// These are per-image failures: the batch driver reports them and continues
/// with the next image. A failed image has no descriptor written, so any
/// partial tile directory it leaves behind is not a valid pyramid.
#[derive(Debug, Error)]
pub enum PyramidError {
    /// The source image could not be decoded
    #[error("decode failed: {0}")]
    Decode(#[from] DecodeError),

    /// A level raster could not be produced
    #[error("resample failed: {0}")]
    Resample(#[from] ResampleError),

    /// Directory creation or descriptor write failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// One or more tiles of a level failed to encode or write
    #[error("{failed} of {total} tiles failed at level {level}")]
    TileFailures { level: u32, failed: usize, total: usize },
}

/// Errors that halt the whole batch.
///
/// The only fatal conditions are an unreadable source directory and an
/// unusable output root; everything else is isolated per image.
#[derive(Debug, Error)]
pub enum BatchError {
    /// The source directory cannot be read
    #[error("cannot read source directory {}: {source}", .path.display())]
    SourceDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The output root cannot be created
    #[error("cannot create output directory {}: {source}", .path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The worker pool could not be constructed
    #[error("failed to build worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}
