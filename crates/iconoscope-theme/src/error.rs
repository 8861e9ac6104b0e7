//! Error types for theme discovery and icon resolution.

use std::path::PathBuf;

use crate::scanner::SyntaxError;

/// Result type alias for resolver operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while discovering themes or resolving icons.
///
/// `Io` and `Syntax` never abort discovery; they are collected as diagnostics
/// so the caller can show whatever themes were readable.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// File or directory I/O error.
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed line in an index file.
    #[error("syntax error in '{path}': {source}")]
    Syntax {
        path: PathBuf,
        #[source]
        source: SyntaxError,
    },

    /// The icon is not provided by the theme it was resolved against.
    #[error("icon '{icon}' is not provided by theme '{theme}'")]
    IconNotInTheme { theme: String, icon: String },

    /// No theme with this name was discovered.
    #[error("theme '{0}' not found")]
    UnknownTheme(String),

    /// An icon was selected before any theme.
    #[error("no theme is selected")]
    NoThemeSelected,
}

impl Error {
    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a syntax error for an index file.
    pub fn syntax(path: impl Into<PathBuf>, source: SyntaxError) -> Self {
        Self::Syntax {
            path: path.into(),
            source,
        }
    }

    /// Create a missing-icon error.
    pub fn icon_not_in_theme(theme: impl Into<String>, icon: impl Into<String>) -> Self {
        Self::IconNotInTheme {
            theme: theme.into(),
            icon: icon.into(),
        }
    }
}
