//! Error types for the render crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or measuring an icon image.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The file could not be read.
    #[error("failed to read image '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file was read but could not be decoded.
    #[error("failed to decode image '{path}': {message}")]
    ImageLoad { path: PathBuf, message: String },

    /// No decoder is available for this file type.
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(PathBuf),

    /// The decoded image reported zero width or height.
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}

impl RenderError {
    /// Create an I/O error for the given path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a decode error for the given path.
    pub fn image_load(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ImageLoad {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;
