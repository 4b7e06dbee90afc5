//! Deep Zoom Image (DZI) descriptor and output layout.
//!
//! A pyramid is discoverable by viewers through two artifacts sitting next to
//! each other under the output root:
//!
//! ```text
//! <name>.dzi                      XML descriptor
//! <name>_files/<level>/<col>_<row>.jpeg
//! ```
//!
//! DZI levels are numbered from 0 (smallest) up to the full-resolution level,
//! and the descriptor always carries the *original* image dimensions, never
//! those of an intermediate level. Consumers parse `<name>` from the `.dzi`
//! filename and expect `<name>_files/` alongside it, so both paths are derived
//! here from the same name.

use std::path::{Path, PathBuf};

/// Edge length of a (non-truncated) tile in pixels.
pub const TILE_SIZE: u32 = 256;

/// Pixel overlap shared between adjacent tiles.
pub const TILE_OVERLAP: u32 = 0;

/// File format of the generated tiles.
pub const TILE_FORMAT: &str = "jpeg";

/// XML namespace of the DZI descriptor schema.
pub const DEEPZOOM_NAMESPACE: &str = "http://schemas.microsoft.com/deepzoom/2008";

// =============================================================================
// Descriptor
// =============================================================================

/// Metadata describing one generated pyramid.
///
/// Serialized as the DZI XML document:
///
/// ```xml
/// <?xml version="1.0" encoding="UTF-8"?>
/// <Image xmlns="http://schemas.microsoft.com/deepzoom/2008"
///        TileSize="256"
///        Overlap="0"
///        Format="jpeg">
///   <Size Width="46920" Height="33600" />
/// </Image>
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DziDescriptor {
    /// Original image width in pixels
    pub width: u32,

    /// Original image height in pixels
    pub height: u32,

    /// Tile edge length
    pub tile_size: u32,

    /// Overlap between adjacent tiles
    pub overlap: u32,

    /// Tile file format (e.g. "jpeg")
    pub format: String,
}

impl DziDescriptor {
    /// Create a descriptor for a source image with the fixed tile settings.
    pub fn for_source(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            tile_size: TILE_SIZE,
            overlap: TILE_OVERLAP,
            format: TILE_FORMAT.to_string(),
        }
    }

    /// Serialize the descriptor as a DZI XML document.
    ///
    /// The output is a pure function of the descriptor fields, so regenerating
    /// a pyramid produces byte-identical descriptor content.
    pub fn to_xml(&self) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<Image xmlns="{namespace}"
       TileSize="{tile_size}"
       Overlap="{overlap}"
       Format="{format}">
  <Size Width="{width}" Height="{height}" />
</Image>"#,
            namespace = DEEPZOOM_NAMESPACE,
            tile_size = self.tile_size,
            overlap = self.overlap,
            format = self.format,
            width = self.width,
            height = self.height,
        )
    }

    /// Parse a descriptor back out of a DZI XML document.
    ///
    /// Accepts any attribute ordering and whitespace; returns `None` if a
    /// required attribute is missing or malformed.
    pub fn from_xml(xml: &str) -> Option<Self> {
        Some(Self {
            width: attr_value(xml, "Width")?.parse().ok()?,
            height: attr_value(xml, "Height")?.parse().ok()?,
            tile_size: attr_value(xml, "TileSize")?.parse().ok()?,
            overlap: attr_value(xml, "Overlap")?.parse().ok()?,
            format: attr_value(xml, "Format")?.to_string(),
        })
    }
}

/// Extract the value of an XML attribute by scanning for `name="value"`.
fn attr_value<'a>(xml: &'a str, name: &str) -> Option<&'a str> {
    let needle = format!("{name}=\"");
    let start = xml.find(&needle)? + needle.len();
    let rest = &xml[start..];
    let end = rest.find('"')?;
    Some(&rest[..end])
}

// =============================================================================
// Output Layout
// =============================================================================

/// Path of the descriptor document for the image `name`.
pub fn descriptor_path(output_dir: &Path, name: &str) -> PathBuf {
    output_dir.join(format!("{name}.dzi"))
}

/// Path of the tile root directory for the image `name`.
pub fn tiles_dir(output_dir: &Path, name: &str) -> PathBuf {
    output_dir.join(format!("{name}_files"))
}

/// Path of one tile file relative to the tile root directory.
pub fn tile_relative_path(level: u32, col: u32, row: u32) -> PathBuf {
    PathBuf::from(level.to_string()).join(format!("{col}_{row}.{TILE_FORMAT}"))
}

// =============================================================================
// Tests
// =============================================================================
