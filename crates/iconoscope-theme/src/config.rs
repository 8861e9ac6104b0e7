//! Browser configuration and icon search paths.

use std::path::PathBuf;

/// Environment variable that replaces the default search paths.
///
/// Holds a colon-separated list of directories.
pub const SEARCH_PATH_ENV: &str = "ICONOSCOPE_ICON_PATH";

/// Theme selected on load when no other choice was made.
pub const DEFAULT_THEME: &str = "Hicolor";

const DEFAULT_DATA_DIRS: &str = "/usr/local/share:/usr/share";
const PIXMAPS_DIR: &str = "/usr/share/pixmaps";

/// Options for an [`IconBrowser`](crate::IconBrowser).
///
/// # Example
///
/// ```
/// use iconoscope_theme::BrowserConfig;
///
/// let config = BrowserConfig::new(vec!["/usr/share/icons".into()])
///     .with_default_theme("Adwaita")
///     .with_measure_images(false);
/// assert_eq!(config.default_theme, "Adwaita");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserConfig {
    /// Directories searched for themes and loose icons, in priority order.
    pub search_paths: Vec<PathBuf>,
    /// Display name of the theme selected after loading.
    pub default_theme: String,
    /// Whether resolved images are measured through the image loader.
    pub measure_images: bool,
}

impl BrowserConfig {
    /// Create a configuration with explicit search paths.
    pub fn new(search_paths: Vec<PathBuf>) -> Self {
        Self {
            search_paths,
            default_theme: DEFAULT_THEME.to_string(),
            measure_images: true,
        }
    }

    /// Create a configuration from the environment.
    pub fn from_env() -> Self {
        Self::new(default_search_paths())
    }

    /// Replace the search paths.
    pub fn with_search_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.search_paths = paths;
        self
    }

    /// Append a search path unless it is already listed.
    pub fn add_search_path(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        if !self.search_paths.contains(&path) {
            self.search_paths.push(path);
        }
    }

    /// Set the theme selected after loading.
    pub fn with_default_theme(mut self, name: impl Into<String>) -> Self {
        self.default_theme = name.into();
        self
    }

    /// Enable or disable image measurement.
    pub fn with_measure_images(mut self, measure: bool) -> Self {
        self.measure_images = measure;
        self
    }
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Icon search paths for the current user.
///
/// Follows the XDG base directory layout GTK uses:
/// `$XDG_DATA_HOME/icons`, `~/.icons`, `$XDG_DATA_DIRS/*/icons`, then
/// `/usr/share/pixmaps`. [`SEARCH_PATH_ENV`] replaces the whole list.
pub fn default_search_paths() -> Vec<PathBuf> {
    search_paths_from(|key| std::env::var(key).ok(), dirs::home_dir())
}

/// [`default_search_paths`] with the environment and home directory supplied
/// by the caller.
pub fn search_paths_from(
    lookup: impl Fn(&str) -> Option<String>,
    home: Option<PathBuf>,
) -> Vec<PathBuf> {
    let var = |key: &str| lookup(key).filter(|value| !value.is_empty());

    if let Some(list) = var(SEARCH_PATH_ENV) {
        tracing::debug!(target: crate::targets::DISCOVERY, paths = %list, "using {}", SEARCH_PATH_ENV);
        return dedup(split_path_list(&list).map(PathBuf::from));
    }

    let mut paths = Vec::new();

    // User icons
    if let Some(data_home) = var("XDG_DATA_HOME") {
        paths.push(PathBuf::from(data_home).join("icons"));
    } else if let Some(home) = &home {
        paths.push(home.join(".local/share/icons"));
    }
    if let Some(home) = &home {
        paths.push(home.join(".icons"));
    }

    // System icons
    let data_dirs = var("XDG_DATA_DIRS").unwrap_or_else(|| DEFAULT_DATA_DIRS.to_string());
    for dir in split_path_list(&data_dirs) {
        paths.push(PathBuf::from(dir).join("icons"));
    }

    paths.push(PathBuf::from(PIXMAPS_DIR));

    dedup(paths)
}

fn split_path_list(list: &str) -> impl Iterator<Item = &str> {
    list.split(':').filter(|dir| !dir.is_empty())
}

fn dedup(paths: impl IntoIterator<Item = PathBuf>) -> Vec<PathBuf> {
    let mut unique = Vec::new();
    for path in paths {
        if !unique.contains(&path) {
            unique.push(path);
        }
    }
    unique
}
