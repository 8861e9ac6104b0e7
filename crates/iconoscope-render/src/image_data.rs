//! Image metadata for icon files.
//!
//! Only the header is read for raster images; the pixels are never decoded.
//!
//! # Example
//!
//! ```no_run
//! use iconoscope_render::image_data::read_dimensions;
//!
//! let (width, height) = read_dimensions("/usr/share/icons/hicolor/48x48/apps/firefox.png")?;
//! println!("{}x{}", width, height);
//!
//! # Ok::<(), iconoscope_render::RenderError>(())
//! ```

use std::path::Path;

use crate::error::{RenderError, RenderResult};

/// File format of an icon image, detected from its file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    /// Scalable Vector Graphics
    Svg,
    /// Portable Network Graphics (also used by `.symbolic.png`)
    Png,
    /// X PixMap
    Xpm,
    /// Anything else; decoding is attempted by content sniffing
    Other,
}

impl ImageFormat {
    /// Detect the format from a path's extension (case-insensitive).
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("svg") => ImageFormat::Svg,
            Some("png") => ImageFormat::Png,
            Some("xpm") => ImageFormat::Xpm,
            _ => ImageFormat::Other,
        }
    }

    /// Whether this format is resolution independent.
    pub fn is_vector(&self) -> bool {
        matches!(self, ImageFormat::Svg)
    }
}

/// Measured information about an icon image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageInfo {
    /// Width in pixels (natural size for vector images).
    pub width: u32,
    /// Height in pixels (natural size for vector images).
    pub height: u32,
    /// Detected file format.
    pub format: ImageFormat,
}

impl ImageInfo {
    /// Create a new image info, rejecting empty dimensions.
    pub fn new(width: u32, height: u32, format: ImageFormat) -> RenderResult<Self> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            format,
        })
    }
}

/// Read raster image dimensions without decoding the full image.
pub fn read_dimensions(path: impl AsRef<Path>) -> RenderResult<(u32, u32)> {
    let path = path.as_ref();
    image::image_dimensions(path).map_err(|e| match e {
        image::ImageError::IoError(source) => RenderError::io(path, source),
        image::ImageError::Unsupported(_) => RenderError::UnsupportedFormat(path.to_path_buf()),
        other => RenderError::image_load(path, other.to_string()),
    })
}
