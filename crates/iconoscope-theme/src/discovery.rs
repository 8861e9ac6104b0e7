//! Filesystem theme discovery.
//!
//! Discovery runs in passes over the ordered search paths:
//!
//! 1. every subdirectory holding an `index.theme` becomes a theme keyed by
//!    its directory name (the first index found for an identifier wins);
//! 2. each theme collects every same-named directory from all search paths,
//!    so a theme spread over `~/.local/share/icons` and `/usr/share/icons`
//!    is seen as one;
//! 3. themes are sorted by display name;
//! 4. search paths holding loose icon files become the unthemed unit;
//! 5. every theme's icon names are collected.
//!
//! Missing search paths are skipped silently. I/O and syntax problems are
//! collected as diagnostics and never abort discovery.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::catalog;
use crate::error::Error;
use crate::index::INDEX_FILE;
use crate::theme::{Theme, ThemeSet};

/// Directory names never treated as themes.
const RESERVED_THEME_DIR: &str = "default";

/// Result of a discovery pass.
#[derive(Debug, Default)]
pub struct Discovery {
    /// The discovered themes with their icon names populated.
    pub themes: ThemeSet,
    /// Problems met along the way.
    pub diagnostics: Vec<Error>,
}

/// Discover every theme under the given search paths.
pub fn discover(search_paths: &[PathBuf]) -> Discovery {
    let search_paths = dedup_paths(search_paths);
    let mut diagnostics = Vec::new();

    let listings: Vec<(&Path, Vec<String>)> = search_paths
        .iter()
        .filter_map(|path| Some((path.as_path(), list_dir(path, &mut diagnostics)?)))
        .collect();

    let mut themes = find_themes(&listings, &mut diagnostics);
    for theme in &mut themes {
        let Some(id) = theme.id() else { continue };
        let roots = search_paths
            .iter()
            .map(|path| path.join(id))
            .filter(|dir| dir.is_dir())
            .collect();
        theme.set_directories(roots);
    }

    let mut unthemed = Theme::unthemed();
    for (path, entries) in &listings {
        if has_loose_icons(path, entries) {
            unthemed.add_directory(path.to_path_buf());
        }
    }

    let mut themes = ThemeSet::new(themes, unthemed);
    catalog::populate(&mut themes, &mut diagnostics);

    tracing::debug!(
        target: crate::targets::DISCOVERY,
        themes = themes.len(),
        unthemed_roots = themes.unthemed().directories().len(),
        diagnostics = diagnostics.len(),
        "discovery finished"
    );

    Discovery {
        themes,
        diagnostics,
    }
}

fn dedup_paths(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut unique: Vec<PathBuf> = Vec::with_capacity(paths.len());
    for path in paths {
        if !unique.contains(path) {
            unique.push(path.clone());
        }
    }
    unique
}

fn find_themes(listings: &[(&Path, Vec<String>)], diagnostics: &mut Vec<Error>) -> Vec<Theme> {
    let mut themes: Vec<Theme> = Vec::new();

    for (search_path, entries) in listings {
        for file_name in entries {
            if file_name == RESERVED_THEME_DIR || file_name.starts_with('.') {
                continue;
            }
            let theme_dir = search_path.join(file_name);
            let index_path = theme_dir.join(INDEX_FILE);
            if !theme_dir.is_dir() || !index_path.is_file() {
                continue;
            }
            if themes.iter().any(|t| t.id() == Some(file_name.as_str())) {
                tracing::trace!(
                    target: crate::targets::DISCOVERY,
                    ?index_path,
                    "theme already discovered, index ignored"
                );
                continue;
            }

            let source = match fs::read(&index_path) {
                Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
                Err(e) => {
                    tracing::warn!(
                        target: crate::targets::DISCOVERY,
                        ?index_path,
                        "failed to read theme index: {}",
                        e
                    );
                    diagnostics.push(Error::io(&index_path, e));
                    continue;
                }
            };

            let (theme, errors) = Theme::from_index(file_name.as_str(), source);
            for error in errors {
                tracing::warn!(
                    target: crate::targets::DISCOVERY,
                    ?index_path,
                    "syntax error in theme index: {}",
                    error
                );
                diagnostics.push(Error::syntax(&index_path, error));
            }

            tracing::debug!(
                target: crate::targets::DISCOVERY,
                id = theme.id(),
                name = theme.name(),
                "found theme"
            );
            themes.push(theme);
        }
    }

    themes
}

/// Whether a search path directly holds at least one icon file.
fn has_loose_icons(path: &Path, entries: &[String]) -> bool {
    entries
        .iter()
        .any(|name| catalog::icon_base_name(path, name).is_some())
}

/// Entry names of a directory. A missing directory yields `None` quietly.
fn list_dir(dir: &Path, diagnostics: &mut Vec<Error>) -> Option<Vec<String>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
        Err(e) => {
            tracing::warn!(target: crate::targets::DISCOVERY, ?dir, "cannot list search path: {}", e);
            diagnostics.push(Error::io(dir, e));
            return None;
        }
    };

    let mut names = Vec::new();
    for entry in entries {
        match entry {
            Ok(entry) => {
                if let Ok(name) = entry.file_name().into_string() {
                    names.push(name);
                }
            }
            Err(e) => {
                tracing::warn!(target: crate::targets::DISCOVERY, ?dir, "error while reading directory: {}", e);
                diagnostics.push(Error::io(dir, e));
            }
        }
    }
    // read_dir order is unspecified; keep discovery deterministic.
    names.sort();
    Some(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(path: PathBuf, contents: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        let mut file = File::create(path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
    }

    fn setup_search_paths() -> (TempDir, PathBuf, PathBuf) {
        let temp_dir = TempDir::new().unwrap();
        let local = temp_dir.path().join("local/icons");
        let system = temp_dir.path().join("system/icons");

        write_file(
            local.join("Adwaita/index.theme"),
            "[Icon Theme]\nName=Adwaita\n\n[16x16/actions]\nSize=16\n",
        );
        write_file(local.join("Adwaita/16x16/actions/edit-copy.png"), "");
        fs::create_dir_all(system.join("Adwaita/16x16/actions")).unwrap();
        write_file(system.join("Adwaita/16x16/actions/edit-cut.png"), "");

        write_file(
            system.join("hicolor/index.theme"),
            "[Icon Theme]\nName=Hicolor\n\n[48x48/apps]\nSize=48\n",
        );
        write_file(system.join("hicolor/48x48/apps/firefox.svg"), "");

        (temp_dir, local, system)
    }

    #[test]
    fn test_merges_directories_across_search_paths() {
        let (_temp_dir, local, system) = setup_search_paths();
        let discovery = discover(&[local.clone(), system.clone()]);

        assert!(discovery.diagnostics.is_empty());
        assert_eq!(discovery.themes.names(), vec!["Adwaita", "Hicolor"]);

        let adwaita = discovery.themes.get("Adwaita").unwrap();
        assert_eq!(
            adwaita.directories(),
            &[local.join("Adwaita"), system.join("Adwaita")]
        );
        assert!(adwaita.contains_icon("edit-copy"));
        assert!(adwaita.contains_icon("edit-cut"));
    }

    #[test]
    fn test_first_index_wins() {
        let (_temp_dir, local, system) = setup_search_paths();
        write_file(
            system.join("Adwaita/index.theme"),
            "[Icon Theme]\nName=Shadowed\n",
        );
        let discovery = discover(&[local, system]);
        assert_eq!(discovery.themes.len(), 2);
        assert!(discovery.themes.get("Adwaita").is_some());
        assert!(discovery.themes.get("Shadowed").is_none());
    }

    #[test]
    fn test_skips_default_hidden_and_plain_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().to_path_buf();
        write_file(root.join("default/index.theme"), "[Icon Theme]\nName=Default\n");
        write_file(root.join(".cache/index.theme"), "[Icon Theme]\nName=Cache\n");
        fs::create_dir_all(root.join("no-index")).unwrap();
        write_file(root.join("file-theme"), "");

        let discovery = discover(&[root]);
        assert!(discovery.themes.is_empty());
    }

    #[test]
    fn test_missing_search_path_is_silent() {
        let temp_dir = TempDir::new().unwrap();
        let discovery = discover(&[temp_dir.path().join("nope")]);
        assert!(discovery.themes.is_empty());
        assert!(discovery.diagnostics.is_empty());
    }

    #[test]
    fn test_duplicate_search_paths() {
        let (_temp_dir, local, system) = setup_search_paths();
        let discovery = discover(&[local.clone(), system.clone(), local.clone()]);
        let adwaita = discovery.themes.get("Adwaita").unwrap();
        assert_eq!(adwaita.directories().len(), 2);
    }

    #[test]
    fn test_unthemed_roots() {
        let (_temp_dir, local, system) = setup_search_paths();
        let pixmaps = system.parent().unwrap().join("pixmaps");
        write_file(pixmaps.join("foo.png"), "");
        write_file(pixmaps.join(".hidden.png"), "");

        let discovery = discover(&[local, system, pixmaps.clone()]);
        let unthemed = discovery.themes.unthemed();
        assert_eq!(unthemed.directories(), &[pixmaps]);
        assert_eq!(unthemed.icon_names(), vec!["foo"]);
    }

    #[test]
    fn test_unlistable_search_path_is_reported_once() {
        let temp_dir = TempDir::new().unwrap();
        let not_a_dir = temp_dir.path().join("notadir");
        write_file(not_a_dir.clone(), "");

        let discovery = discover(&[not_a_dir.clone()]);
        assert!(discovery.themes.is_empty());
        assert!(discovery.themes.unthemed().directories().is_empty());
        assert_eq!(discovery.diagnostics.len(), 1);
        assert!(matches!(
            &discovery.diagnostics[0],
            Error::Io { path, .. } if *path == not_a_dir
        ));
    }

    #[test]
    fn test_syntax_errors_are_reported() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().to_path_buf();
        write_file(
            root.join("broken/index.theme"),
            "[Icon Theme]\nName=Broken\n[16x16/apps\nSize=16\n[32x32/apps]\nSize=32\n",
        );
        write_file(root.join("broken/32x32/apps/ok.png"), "");

        let discovery = discover(&[root]);
        let broken = discovery.themes.get("Broken").unwrap();
        assert!(broken.contains_icon("ok"));
        assert_eq!(discovery.diagnostics.len(), 1);
        assert!(matches!(
            &discovery.diagnostics[0],
            Error::Syntax { source, .. } if source.line == 3
        ));
    }
}
