//! Theme records produced by discovery.

use std::collections::HashSet;
use std::path::PathBuf;

use crate::catalog::compare_names;
use crate::index::ThemeIndex;
use crate::scanner::SyntaxError;
use crate::types::ThemeInfo;

/// Display name of the synthetic theme holding loose icon files.
pub const UNTHEMED_NAME: &str = "None";

/// One icon theme, or the synthetic unthemed unit.
///
/// A theme is identified by its directory name and may be spread over several
/// search roots. It keeps its raw index text; directory sections are parsed
/// from it on demand and never stored.
#[derive(Debug, Clone)]
pub struct Theme {
    id: Option<String>,
    name: String,
    info: ThemeInfo,
    directories: Vec<PathBuf>,
    index: Option<String>,
    icon_names: HashSet<String>,
}

impl Theme {
    /// Create a theme from its directory name and index text.
    ///
    /// Returns the syntax errors met while reading the header so the caller
    /// can report them against the index path.
    pub fn from_index(id: impl Into<String>, index: String) -> (Self, Vec<SyntaxError>) {
        let id = id.into();
        let parsed = ThemeIndex::parse(&index);
        let name = parsed.name().unwrap_or(id.as_str()).to_string();
        let info = parsed.header.to_info();
        let diagnostics = parsed.diagnostics;

        let theme = Self {
            id: Some(id),
            name,
            info,
            directories: Vec::new(),
            index: Some(index),
            icon_names: HashSet::new(),
        };
        (theme, diagnostics)
    }

    /// Create the unthemed unit.
    pub fn unthemed() -> Self {
        Self {
            id: None,
            name: UNTHEMED_NAME.to_string(),
            info: ThemeInfo::default(),
            directories: Vec::new(),
            index: None,
            icon_names: HashSet::new(),
        }
    }

    /// Directory name of the theme; `None` for the unthemed unit.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Header metadata.
    pub fn info(&self) -> &ThemeInfo {
        &self.info
    }

    /// Whether this is the unthemed unit.
    pub fn is_unthemed(&self) -> bool {
        self.index.is_none()
    }

    /// Root directories, in search-path order.
    pub fn directories(&self) -> &[PathBuf] {
        &self.directories
    }

    /// Raw index text.
    pub fn index_source(&self) -> Option<&str> {
        self.index.as_deref()
    }

    /// Parse the index. The result borrows from this theme.
    pub fn index(&self) -> Option<ThemeIndex<'_>> {
        self.index.as_deref().map(ThemeIndex::parse)
    }

    /// Whether the theme provides an icon with this base name.
    pub fn contains_icon(&self, icon_name: &str) -> bool {
        self.icon_names.contains(icon_name)
    }

    /// Number of distinct icon names.
    pub fn icon_count(&self) -> usize {
        self.icon_names.len()
    }

    /// Icon names, sorted case-insensitively.
    pub fn icon_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.icon_names.iter().map(String::as_str).collect();
        names.sort_by(|a, b| compare_names(a, b));
        names
    }

    pub(crate) fn add_directory(&mut self, dir: impl Into<PathBuf>) {
        let dir = dir.into();
        if !self.directories.contains(&dir) {
            self.directories.push(dir);
        }
    }

    pub(crate) fn set_directories(&mut self, dirs: Vec<PathBuf>) {
        self.directories = dirs;
    }

    pub(crate) fn set_icon_names(&mut self, names: HashSet<String>) {
        self.icon_names = names;
    }

    pub(crate) fn raw_icon_names(&self) -> impl Iterator<Item = &str> {
        self.icon_names.iter().map(String::as_str)
    }
}

/// Position of a theme inside a [`ThemeSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeHandle {
    /// The unthemed unit.
    Unthemed,
    /// Index into the sorted themed list.
    Themed(usize),
}

/// All themes found by one discovery pass.
///
/// Named themes are kept sorted by display name. The unthemed unit is held
/// apart and listed first by [`ThemeSet::iter`].
#[derive(Debug, Clone)]
pub struct ThemeSet {
    themes: Vec<Theme>,
    unthemed: Theme,
}

impl ThemeSet {
    /// Build a set, sorting the named themes case-insensitively by name.
    ///
    /// The sort is stable, so equal names keep their discovery order.
    pub fn new(mut themes: Vec<Theme>, unthemed: Theme) -> Self {
        themes.sort_by(|a, b| crate::catalog::cmp_ignore_ascii_case(&a.name, &b.name));
        Self { themes, unthemed }
    }

    /// An empty set with an empty unthemed unit.
    pub fn empty() -> Self {
        Self::new(Vec::new(), Theme::unthemed())
    }

    /// Named themes in sorted order.
    pub fn themes(&self) -> &[Theme] {
        &self.themes
    }

    /// The unthemed unit.
    pub fn unthemed(&self) -> &Theme {
        &self.unthemed
    }

    /// Every theme: the unthemed unit first, then named themes in order.
    pub fn iter(&self) -> impl Iterator<Item = &Theme> {
        std::iter::once(&self.unthemed).chain(self.themes.iter())
    }

    /// Handles of every theme, in [`ThemeSet::iter`] order.
    pub fn handles(&self) -> impl Iterator<Item = ThemeHandle> {
        std::iter::once(ThemeHandle::Unthemed).chain((0..self.themes.len()).map(ThemeHandle::Themed))
    }

    /// Number of named themes.
    pub fn len(&self) -> usize {
        self.themes.len()
    }

    /// Whether no named theme was found.
    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }

    /// Display names of the named themes, in order.
    pub fn names(&self) -> Vec<&str> {
        self.themes.iter().map(Theme::name).collect()
    }

    /// Find a theme by display name. The unthemed unit answers to `"None"`
    /// unless a named theme already uses that name.
    ///
    /// Names are not unique: when several themes share one, the first in
    /// sorted order is returned. Use [`ThemeSet::handles`] to reach the
    /// others.
    pub fn find(&self, name: &str) -> Option<ThemeHandle> {
        self.themes
            .iter()
            .position(|t| t.name == name)
            .map(ThemeHandle::Themed)
            .or_else(|| (name == self.unthemed.name).then_some(ThemeHandle::Unthemed))
    }

    /// Find a named theme by directory name.
    pub fn find_by_id(&self, id: &str) -> Option<&Theme> {
        self.themes.iter().find(|t| t.id() == Some(id))
    }

    /// Look up a theme by display name.
    pub fn get(&self, name: &str) -> Option<&Theme> {
        self.find(name).and_then(|handle| self.theme(handle))
    }

    /// Resolve a handle.
    pub fn theme(&self, handle: ThemeHandle) -> Option<&Theme> {
        match handle {
            ThemeHandle::Unthemed => Some(&self.unthemed),
            ThemeHandle::Themed(i) => self.themes.get(i),
        }
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Theme> {
        std::iter::once(&mut self.unthemed).chain(self.themes.iter_mut())
    }
}

impl Default for ThemeSet {
    fn default() -> Self {
        Self::empty()
    }
}
