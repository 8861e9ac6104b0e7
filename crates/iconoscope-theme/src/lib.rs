//! Freedesktop icon theme discovery and resolution for Iconoscope.
//!
//! This crate finds the icon themes installed under a set of search paths and
//! answers the question "which files does this theme provide for this icon
//! name?". It features:
//!
//! - **Scanner**: an allocation-free reader for `index.theme` files that keeps
//!   going past malformed lines
//! - **Discovery**: themes merged across search roots, plus an "unthemed" unit
//!   for loose icon files
//! - **Catalogs**: per-theme and global sorted icon name listings
//! - **Resolution**: every matching image, bucketed by scale and sorted by size
//! - **Browser**: an explicit browsing context driven by selection commands
//!
//! # Example
//!
//! ```no_run
//! use iconoscope_theme::prelude::*;
//!
//! let mut browser = IconBrowser::load(BrowserConfig::from_env());
//! for name in browser.theme_names() {
//!     println!("{}", name);
//! }
//!
//! if let Some(view) = browser.select(ThemeChoice::Named("Adwaita"), Some("edit-copy"))? {
//!     for image in view.images(1) {
//!         println!("{:?} {}", image.path, image.label.as_deref().unwrap_or(""));
//!     }
//! }
//! # Ok::<(), iconoscope_theme::Error>(())
//! ```

pub mod browser;
pub mod catalog;
pub mod config;
pub mod discovery;
pub mod index;
pub mod resolver;
pub mod scanner;
pub mod theme;
pub mod types;

mod error;

pub use browser::{ALL_THEMES_NAME, IconBrowser, ThemeChoice};
pub use catalog::GlobalCatalog;
pub use config::BrowserConfig;
pub use error::{Error, Result};
pub use iconoscope_render::{FileImageLoader, ImageLoader, NoopImageLoader};
pub use resolver::{IconImage, IconView, resolve};
pub use theme::{Theme, ThemeHandle, ThemeSet};

/// Log targets used by this crate.
///
/// Filter on these with a `tracing-subscriber` `EnvFilter`, e.g.
/// `RUST_LOG=iconoscope_theme::discovery=debug`.
pub mod targets {
    /// Theme discovery and search paths.
    pub const DISCOVERY: &str = "iconoscope_theme::discovery";
    /// Index file parsing.
    pub const INDEX: &str = "iconoscope_theme::index";
    /// Icon name catalogs.
    pub const CATALOG: &str = "iconoscope_theme::catalog";
    /// Icon resolution.
    pub const RESOLVE: &str = "iconoscope_theme::resolve";
    /// Browser selection.
    pub const BROWSER: &str = "iconoscope_theme::browser";
}

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::browser::{IconBrowser, ThemeChoice};
    pub use crate::config::BrowserConfig;
    pub use crate::resolver::{IconImage, IconView};
    pub use crate::theme::{Theme, ThemeSet};
    pub use crate::types::{IconContext, IconExtension, IconSizeType, ThemeInfo};
}
