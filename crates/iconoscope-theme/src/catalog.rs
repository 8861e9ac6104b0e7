//! Icon name catalogs.
//!
//! Each theme gets the set of icon base names found under its directories.
//! The [`GlobalCatalog`] is the sorted union of every theme's names and backs
//! the "All" view.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::Error;
use crate::resolver::is_supported_scale;
use crate::theme::{Theme, ThemeHandle, ThemeSet};
use crate::types::IconExtension;

/// Compare two strings ignoring ASCII case.
pub fn cmp_ignore_ascii_case(a: &str, b: &str) -> Ordering {
    a.bytes()
        .map(|c| c.to_ascii_lowercase())
        .cmp(b.bytes().map(|c| c.to_ascii_lowercase()))
}

/// Catalog ordering: case-insensitive first, case-sensitive to break ties.
///
/// This sorts `a`, `B`, `b`, `C` rather than `B`, `C`, `a`, `b`.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    cmp_ignore_ascii_case(a, b).then_with(|| a.cmp(b))
}

/// Keep the names containing `query`. An empty query keeps everything.
pub fn filter_names<'n>(names: impl IntoIterator<Item = &'n str>, query: &str) -> Vec<&'n str> {
    names.into_iter().filter(|name| name.contains(query)).collect()
}

/// Collect the icon names a theme provides.
///
/// Named themes are scanned in every declared section directory under every
/// root, skipping sections whose scale resolution drops; the unthemed unit is scanned in its roots only. Missing directories
/// contribute nothing. Listing errors are appended to `diagnostics`.
pub fn collect_icon_names(theme: &Theme, diagnostics: &mut Vec<Error>) -> HashSet<String> {
    let mut names = HashSet::new();

    match theme.index() {
        Some(index) => {
            for root in theme.directories() {
                for section in index.sections.iter().filter(|s| is_supported_scale(s.scale)) {
                    scan_icon_files(&section.dir_in(root), &mut names, diagnostics);
                }
            }
        }
        None => {
            for root in theme.directories() {
                scan_icon_files(root, &mut names, diagnostics);
            }
        }
    }

    tracing::debug!(
        target: crate::targets::CATALOG,
        theme = theme.name(),
        icons = names.len(),
        "collected icon names"
    );
    names
}

/// Fill in the icon names of every theme in the set.
pub fn populate(themes: &mut ThemeSet, diagnostics: &mut Vec<Error>) {
    for theme in themes.iter_mut() {
        let names = collect_icon_names(theme, diagnostics);
        theme.set_icon_names(names);
    }
}

/// Base name of a directory entry if it is a visible regular icon file.
///
/// Symlinks are followed.
pub(crate) fn icon_base_name(dir: &Path, file_name: &str) -> Option<String> {
    if file_name.starts_with('.') {
        return None;
    }
    let (base, _) = IconExtension::split(file_name)?;
    dir.join(file_name).is_file().then(|| base.to_string())
}

fn scan_icon_files(dir: &Path, names: &mut HashSet<String>, diagnostics: &mut Vec<Error>) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return,
        Err(e) => {
            tracing::warn!(target: crate::targets::CATALOG, ?dir, "cannot list directory: {}", e);
            diagnostics.push(Error::io(dir, e));
            return;
        }
    };

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(target: crate::targets::CATALOG, ?dir, "error while reading directory: {}", e);
                diagnostics.push(Error::io(dir, e));
                continue;
            }
        };
        let file_name = entry.file_name();
        let Some(file_name) = file_name.to_str() else {
            continue;
        };
        if let Some(name) = icon_base_name(dir, file_name) {
            tracing::trace!(target: crate::targets::CATALOG, ?dir, icon = %name, "found icon");
            names.insert(name);
        }
    }
}

/// Sorted, deduplicated union of every theme's icon names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalCatalog {
    names: Vec<String>,
}

impl GlobalCatalog {
    /// Build the catalog from a populated theme set.
    pub fn build(themes: &ThemeSet) -> Self {
        let mut names: Vec<String> = themes
            .iter()
            .flat_map(Theme::raw_icon_names)
            .map(str::to_owned)
            .collect();
        names.sort_by(|a, b| compare_names(a, b));
        names.dedup();
        Self { names }
    }

    /// All names in catalog order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of distinct names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// The first name in catalog order.
    pub fn first(&self) -> Option<&str> {
        self.names.first().map(String::as_str)
    }

    /// Whether any theme provides this name.
    pub fn contains(&self, icon_name: &str) -> bool {
        self.names
            .binary_search_by(|entry| compare_names(entry, icon_name))
            .is_ok()
    }

    /// The theme an "All" selection of `icon_name` resolves against: the
    /// first theme in [`ThemeSet::iter`] order providing it. Loose icons
    /// therefore shadow themed ones.
    pub fn owner<'t>(&self, themes: &'t ThemeSet, icon_name: &str) -> Option<&'t Theme> {
        self.owner_handle(themes, icon_name)
            .and_then(|handle| themes.theme(handle))
    }

    /// Like [`GlobalCatalog::owner`], returning the theme's position.
    pub fn owner_handle(&self, themes: &ThemeSet, icon_name: &str) -> Option<ThemeHandle> {
        themes
            .handles()
            .find(|&handle| themes.theme(handle).is_some_and(|t| t.contains_icon(icon_name)))
    }

    /// Names containing `query`.
    pub fn filter(&self, query: &str) -> Vec<&str> {
        filter_names(self.names.iter().map(String::as_str), query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn touch(path: PathBuf) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        File::create(path).unwrap();
    }

    fn named_theme(id: &str, name: &str, root: &Path, index: &str) -> Theme {
        let (mut theme, _) = Theme::from_index(id, format!("[Icon Theme]\nName={}\n{}", name, index));
        theme.add_directory(root.to_path_buf());
        theme
    }

    #[test]
    fn test_compare_names() {
        let mut names = vec!["b", "C", "B", "a"];
        names.sort_by(|a, b| compare_names(a, b));
        assert_eq!(names, vec!["a", "B", "b", "C"]);
        assert_eq!(compare_names("edit", "edit"), Ordering::Equal);
    }

    #[test]
    fn test_filter_names() {
        let names = ["edit-copy", "edit-cut", "folder"];
        assert_eq!(filter_names(names, "edit"), vec!["edit-copy", "edit-cut"]);
        assert_eq!(filter_names(names, "").len(), 3);
        assert!(filter_names(names, "EDIT").is_empty());
    }

    #[test]
    fn test_collect_themed_icons() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("hicolor");
        touch(root.join("16x16/apps/firefox.png"));
        touch(root.join("16x16/apps/firefox.svg"));
        touch(root.join("16x16/apps/go-up.symbolic.png"));
        touch(root.join("16x16/apps/.hidden.png"));
        touch(root.join("16x16/apps/notes.txt"));
        touch(root.join("16x16/apps/archive.svgz"));
        touch(root.join("scalable/apps/gimp.svg"));
        // Not declared in the index, so never scanned.
        touch(root.join("undeclared/secret.png"));
        fs::create_dir_all(root.join("16x16/apps/dir.png")).unwrap();

        let theme = named_theme(
            "hicolor",
            "Hicolor",
            &root,
            "[16x16/apps]\nSize=16\n[scalable/apps]\nSize=128\n[missing/apps]\nSize=8\n",
        );
        let mut diagnostics = Vec::new();
        let names = collect_icon_names(&theme, &mut diagnostics);

        let mut names: Vec<_> = names.into_iter().collect();
        names.sort();
        assert_eq!(names, vec!["firefox", "gimp", "go-up"]);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_collect_across_roots() {
        let temp_dir = TempDir::new().unwrap();
        let first = temp_dir.path().join("a/breeze");
        let second = temp_dir.path().join("b/breeze");
        touch(first.join("22x22/actions/edit-copy.svg"));
        touch(second.join("22x22/actions/edit-cut.svg"));
        touch(second.join("22x22/actions/edit-copy.png"));

        let mut theme = named_theme("breeze", "Breeze", &first, "[22x22/actions]\nSize=22\n");
        theme.add_directory(second);
        let names = collect_icon_names(&theme, &mut Vec::new());
        assert_eq!(names.len(), 2);
        assert!(names.contains("edit-copy"));
        assert!(names.contains("edit-cut"));
    }

    #[test]
    fn test_collect_unthemed_icons() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("pixmaps");
        touch(root.join("foo.png"));
        touch(root.join("nested/bar.png"));

        let mut theme = Theme::unthemed();
        theme.add_directory(root);
        let names = collect_icon_names(&theme, &mut Vec::new());
        assert_eq!(names.into_iter().collect::<Vec<_>>(), vec!["foo".to_string()]);
    }

    #[test]
    fn test_global_catalog_dedup_and_owner() {
        let temp_dir = TempDir::new().unwrap();
        let zeta = temp_dir.path().join("zeta");
        let alpha = temp_dir.path().join("alpha");
        touch(zeta.join("apps/edit-copy.png"));
        touch(zeta.join("apps/Zed.png"));
        touch(alpha.join("apps/edit-copy.svg"));
        touch(alpha.join("apps/alpha-only.svg"));

        let mut themes = ThemeSet::new(
            vec![
                named_theme("zeta", "Zeta", &zeta, "[apps]\n"),
                named_theme("alpha", "alpha", &alpha, "[apps]\n"),
            ],
            Theme::unthemed(),
        );
        populate(&mut themes, &mut Vec::new());
        let catalog = GlobalCatalog::build(&themes);

        assert_eq!(catalog.names(), &["alpha-only", "edit-copy", "Zed"]);
        assert_eq!(catalog.first(), Some("alpha-only"));
        assert!(catalog.contains("Zed"));
        assert!(!catalog.contains("zed"));
        assert_eq!(catalog.owner(&themes, "edit-copy").map(Theme::name), Some("alpha"));
        assert_eq!(catalog.owner(&themes, "Zed").map(Theme::name), Some("Zeta"));
        assert!(catalog.owner(&themes, "missing").is_none());
        assert_eq!(catalog.filter("edit"), vec!["edit-copy"]);
    }

    #[test]
    fn test_owner_prefers_unthemed() {
        let temp_dir = TempDir::new().unwrap();
        let pixmaps = temp_dir.path().join("pixmaps");
        let alpha = temp_dir.path().join("alpha");
        touch(pixmaps.join("loose.xpm"));
        touch(pixmaps.join("shared.png"));
        touch(alpha.join("apps/shared.png"));
        touch(alpha.join("apps/themed.png"));

        let mut unthemed = Theme::unthemed();
        unthemed.add_directory(pixmaps);
        let mut themes = ThemeSet::new(vec![named_theme("alpha", "Alpha", &alpha, "[apps]\n")], unthemed);
        populate(&mut themes, &mut Vec::new());

        let catalog = GlobalCatalog::build(&themes);
        assert_eq!(catalog.owner(&themes, "loose").map(Theme::name), Some("None"));
        assert_eq!(catalog.owner_handle(&themes, "shared"), Some(ThemeHandle::Unthemed));
        assert_eq!(catalog.owner_handle(&themes, "themed"), Some(ThemeHandle::Themed(0)));
    }

    #[test]
    fn test_unsupported_scale_sections_are_not_cataloged() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("hi");
        touch(root.join("16x16@4/apps/aaa.png"));
        touch(root.join("16x16@0/apps/bbb.png"));
        touch(root.join("16x16/apps/zzz.png"));

        let theme = named_theme(
            "hi",
            "Hi",
            &root,
            "[16x16@4/apps]\nSize=16\nScale=4\n[16x16@0/apps]\nSize=16\nScale=0\n[16x16/apps]\nSize=16\n",
        );
        let names = collect_icon_names(&theme, &mut Vec::new());
        assert_eq!(names.into_iter().collect::<Vec<_>>(), vec!["zzz".to_string()]);
    }
}
