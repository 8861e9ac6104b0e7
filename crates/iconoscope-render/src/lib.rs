//! Image measurement for the Iconoscope icon theme resolver.
//!
//! This crate is the rendering collaborator of `iconoscope-theme`. It does not
//! draw anything: it reports the pixel size of icon files so a viewer can lay
//! them out.
//!
//! - **Raster headers**: PNG dimensions via the `image` crate
//! - **SVG**: natural size via `usvg`
//! - **Pluggable**: hosts with their own toolkit implement [`ImageLoader`]
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use iconoscope_render::{FileImageLoader, ImageLoader};
//!
//! let info = FileImageLoader::new().measure(Path::new("/usr/share/pixmaps/debian-logo.png"))?;
//! println!("{}x{} {:?}", info.width, info.height, info.format);
//!
//! # Ok::<(), iconoscope_render::RenderError>(())
//! ```

pub mod image_data;
pub mod svg;

mod error;
mod loader;

pub use error::{RenderError, RenderResult};
pub use image_data::{ImageFormat, ImageInfo};
pub use loader::{FileImageLoader, ImageLoader, NoopImageLoader};
