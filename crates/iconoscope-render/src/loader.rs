//! The image-loading seam between the resolver and a rendering layer.
//!
//! The resolver never decodes pixels. It hands every resolved file to an
//! [`ImageLoader`] and records whatever size comes back. A GUI host can plug
//! in its own toolkit loader; [`FileImageLoader`] is the default and only
//! reads headers.

use std::path::Path;

use crate::error::{RenderError, RenderResult};
use crate::image_data::{ImageFormat, ImageInfo, read_dimensions};
use crate::svg;

/// Something that can measure an icon image file.
pub trait ImageLoader {
    /// Load the image at `path` far enough to report its pixel size.
    fn measure(&self, path: &Path) -> RenderResult<ImageInfo>;
}

impl<T: ImageLoader + ?Sized> ImageLoader for &T {
    fn measure(&self, path: &Path) -> RenderResult<ImageInfo> {
        (**self).measure(path)
    }
}

/// Measures icons straight from disk.
///
/// PNG headers are read through the `image` crate and SVG natural sizes through
/// `usvg`. XPM has no decoder and reports [`RenderError::UnsupportedFormat`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FileImageLoader;

impl FileImageLoader {
    /// Create a new file loader.
    pub fn new() -> Self {
        Self
    }
}

impl ImageLoader for FileImageLoader {
    fn measure(&self, path: &Path) -> RenderResult<ImageInfo> {
        let format = ImageFormat::from_path(path);
        let (width, height) = match format {
            ImageFormat::Svg => svg::natural_size(path)?,
            ImageFormat::Xpm => return Err(RenderError::UnsupportedFormat(path.to_path_buf())),
            ImageFormat::Png | ImageFormat::Other => read_dimensions(path)?,
        };
        tracing::trace!(target: "iconoscope_render", ?path, width, height, "measured image");
        ImageInfo::new(width, height, format)
    }
}

/// A loader that never measures anything.
///
/// Useful when only paths and metadata are wanted.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopImageLoader;

impl ImageLoader for NoopImageLoader {
    fn measure(&self, path: &Path) -> RenderResult<ImageInfo> {
        Err(RenderError::UnsupportedFormat(path.to_path_buf()))
    }
}
