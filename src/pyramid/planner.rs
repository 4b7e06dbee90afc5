//! Level planning.
//!
//! Derives the ordered set of pyramid levels for a source image. This is pure
//! computation: no pixels are touched until the resampler runs.
//!
//! The level count comes from repeatedly halving the larger source dimension
//! (as a real number) until it reaches 1. Level dimensions are the source
//! dimensions divided by the corresponding power of two, truncated toward
//! zero. For extreme aspect ratios the truncation can reach zero on one axis;
//! [`ZeroLevelPolicy`] decides what happens to those levels.

// =============================================================================
// Types
// =============================================================================

/// One resolution step of the pyramid.
///
/// Index 0 is the smallest level; the highest index is the full-resolution
/// level whose dimensions equal the source image exactly. Levels are derived
/// deterministically from the source dimensions and never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PyramidLevel {
    /// Level index (0 = smallest)
    pub index: u32,

    /// Level width in pixels
    pub width: u32,

    /// Level height in pixels
    pub height: u32,
}

/// Policy for levels whose truncated width or height is zero.
///
/// A 1024x512 source reaches level 0 as 1x0.5, which truncates to 1x0.
/// Skipping drops such levels, leaving a gap at the smallest indices;
/// clamping instead keeps every index down to 0 at a minimum dimension of
/// 1 pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZeroLevelPolicy {
    /// Drop levels with a zero dimension
    #[default]
    Skip,

    /// Clamp zero dimensions to 1 so every level index exists
    ClampToOne,
}

// =============================================================================
// Planning
// =============================================================================

/// Number of halving steps needed to bring `max(width, height)` down to <= 1.
///
/// This is also the index of the full-resolution level.
pub fn max_level(width: u32, height: u32) -> u32 {
    let mut dim = f64::from(width.max(height));
    let mut count = 0;
    while dim > 1.0 {
        dim /= 2.0;
        count += 1;
    }
    count
}

/// Dimensions of level `index`, truncated toward zero.
pub fn level_dimensions(width: u32, height: u32, index: u32, max_level: u32) -> (u32, u32) {
    debug_assert!(index <= max_level);
    let divisor = 1u64 << (max_level - index);
    (
        (u64::from(width) / divisor) as u32,
        (u64::from(height) / divisor) as u32,
    )
}

/// Plan the pyramid levels for a `width` x `height` source image.
///
/// Levels are returned ordered ascending by index, from the smallest level up
/// to the full-resolution level. Pure function of its inputs; dimensions are
/// expected to be positive (decoded images always are).
pub fn plan_levels(width: u32, height: u32, policy: ZeroLevelPolicy) -> Vec<PyramidLevel> {
    let top = max_level(width, height);
    (0..=top)
        .filter_map(|index| {
            let (w, h) = level_dimensions(width, height, index, top);
            match policy {
                ZeroLevelPolicy::Skip if w == 0 || h == 0 => None,
                ZeroLevelPolicy::Skip => Some(PyramidLevel {
                    index,
                    width: w,
                    height: h,
                }),
                ZeroLevelPolicy::ClampToOne => Some(PyramidLevel {
                    index,
                    width: w.max(1),
                    height: h.max(1),
                }),
            }
        })
        .collect()
}

// =============================================================================
// Tests
// =============================================================================
