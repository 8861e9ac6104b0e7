//! The browsing context.
//!
//! [`IconBrowser`] owns everything one session of browsing needs: the
//! discovered themes, the global catalog, the current selection and the
//! [`IconView`] of the selected icon. A GUI drives it with the `select*`
//! commands and reads the listings back out.

use std::fmt;

use iconoscope_render::{FileImageLoader, ImageLoader, NoopImageLoader};

use crate::catalog::{GlobalCatalog, filter_names};
use crate::config::BrowserConfig;
use crate::discovery::{self, Discovery};
use crate::error::{Error, Result};
use crate::resolver::{IconView, resolve};
use crate::theme::{Theme, ThemeHandle, ThemeSet};

/// Name of the aggregate view over every theme.
pub const ALL_THEMES_NAME: &str = "All";

/// What a theme selector can pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeChoice<'a> {
    /// Every icon of every theme.
    All,
    /// One theme, by display name.
    Named(&'a str),
}

impl<'a> ThemeChoice<'a> {
    /// Map a selector entry to a choice. [`ALL_THEMES_NAME`] is the aggregate
    /// view; anything else names a theme.
    pub fn from_name(name: &'a str) -> Self {
        if name == ALL_THEMES_NAME {
            ThemeChoice::All
        } else {
            ThemeChoice::Named(name)
        }
    }
}

/// Browsing state over the installed icon themes.
pub struct IconBrowser {
    config: BrowserConfig,
    themes: ThemeSet,
    catalog: GlobalCatalog,
    diagnostics: Vec<Error>,
    loader: Box<dyn ImageLoader>,
    all_selected: bool,
    selected_theme: Option<ThemeHandle>,
    selected_icon: Option<String>,
    view: Option<IconView>,
    search: String,
}

impl IconBrowser {
    /// Discover themes and select the configured default theme.
    ///
    /// Never fails: unreadable themes and malformed index files end up in
    /// [`IconBrowser::diagnostics`].
    pub fn load(config: BrowserConfig) -> Self {
        Self::load_with_loader(config, FileImageLoader::new())
    }

    /// Like [`IconBrowser::load`] with a custom image loader.
    pub fn load_with_loader(config: BrowserConfig, loader: impl ImageLoader + 'static) -> Self {
        let Discovery {
            themes,
            diagnostics,
        } = discovery::discover(&config.search_paths);
        let catalog = GlobalCatalog::build(&themes);

        tracing::info!(
            target: crate::targets::BROWSER,
            themes = themes.len(),
            icons = catalog.len(),
            "icon browser loaded"
        );

        let mut browser = Self {
            config,
            themes,
            catalog,
            diagnostics,
            loader: Box::new(loader),
            all_selected: false,
            selected_theme: None,
            selected_icon: None,
            view: None,
            search: String::new(),
        };
        browser.select_initial();
        browser
    }

    fn select_initial(&mut self) {
        let default_theme = self.config.default_theme.clone();
        let name = if self.themes.find(&default_theme).is_some() {
            default_theme
        } else if let Some(first) = self.themes.themes().first() {
            tracing::debug!(
                target: crate::targets::BROWSER,
                "default theme '{}' not found, using '{}'",
                default_theme,
                first.name()
            );
            first.name().to_string()
        } else {
            return;
        };

        if let Err(e) = self.select(ThemeChoice::Named(&name), None) {
            tracing::warn!(target: crate::targets::BROWSER, "initial selection failed: {}", e);
        }
    }

    /// The configuration the browser was loaded with.
    pub fn config(&self) -> &BrowserConfig {
        &self.config
    }

    /// All discovered themes.
    pub fn themes(&self) -> &ThemeSet {
        &self.themes
    }

    /// The global icon catalog.
    pub fn catalog(&self) -> &GlobalCatalog {
        &self.catalog
    }

    /// Problems met while loading.
    pub fn diagnostics(&self) -> &[Error] {
        &self.diagnostics
    }

    /// Display names of the named themes, sorted.
    pub fn theme_names(&self) -> Vec<&str> {
        self.themes.names()
    }

    /// Display name of the unthemed unit.
    pub fn unthemed_name(&self) -> &str {
        self.themes.unthemed().name()
    }

    /// Sorted icon names of a theme.
    pub fn icon_names(&self, theme_name: &str) -> Result<Vec<&str>> {
        self.themes
            .get(theme_name)
            .map(Theme::icon_names)
            .ok_or_else(|| Error::UnknownTheme(theme_name.to_string()))
    }

    /// Every icon name of every theme, sorted.
    pub fn all_icon_names(&self) -> &[String] {
        self.catalog.names()
    }

    /// Display name of the theme an aggregate selection of `icon_name` uses.
    pub fn owner_of(&self, icon_name: &str) -> Option<&str> {
        self.catalog.owner(&self.themes, icon_name).map(Theme::name)
    }

    /// Change the selected theme and optionally the icon.
    ///
    /// With [`ThemeChoice::All`] the icon defaults to the first catalog entry
    /// and is resolved against its owning theme. With a named theme the
    /// current icon is kept when the theme has it, otherwise the theme's first
    /// icon is shown. Returns `Ok(None)` when there is nothing to show.
    ///
    /// On error the previous selection is left untouched.
    pub fn select(&mut self, choice: ThemeChoice<'_>, icon: Option<&str>) -> Result<Option<&IconView>> {
        match choice {
            ThemeChoice::All => {
                let icon_name = icon
                    .or_else(|| self.catalog.first())
                    .map(str::to_owned);
                let Some(icon_name) = icon_name else {
                    self.set_selection(true, None, None, None);
                    return Ok(None);
                };
                let handle = self
                    .catalog
                    .owner_handle(&self.themes, &icon_name)
                    .ok_or_else(|| Error::icon_not_in_theme(ALL_THEMES_NAME, icon_name.as_str()))?;
                self.show(true, handle, icon_name).map(Some)
            }
            ThemeChoice::Named(name) => {
                let handle = self
                    .themes
                    .find(name)
                    .ok_or_else(|| Error::UnknownTheme(name.to_string()))?;
                self.select_handle(handle, icon)
            }
        }
    }

    /// Select a theme by handle, like [`ThemeChoice::Named`].
    ///
    /// Display names may repeat, so this is the only way to reach every
    /// theme of [`ThemeSet::handles`].
    pub fn select_handle(&mut self, handle: ThemeHandle, icon: Option<&str>) -> Result<Option<&IconView>> {
        let theme = self.theme(handle)?;
        let icon_name = match icon {
            Some(icon) => Some(icon.to_string()),
            None => self
                .selected_icon
                .as_deref()
                .filter(|current| theme.contains_icon(current))
                .or_else(|| theme.icon_names().first().copied())
                .map(str::to_owned),
        };
        let Some(icon_name) = icon_name else {
            tracing::debug!(target: crate::targets::BROWSER, theme = theme.name(), "theme has no icons");
            self.set_selection(false, Some(handle), None, None);
            return Ok(None);
        };
        self.show(false, handle, icon_name).map(Some)
    }

    /// Change the selected icon within the current theme choice.
    ///
    /// In the aggregate view the icon's owning theme becomes the selected
    /// theme.
    pub fn select_icon(&mut self, icon_name: &str) -> Result<&IconView> {
        let handle = if self.all_selected {
            self.catalog
                .owner_handle(&self.themes, icon_name)
                .ok_or_else(|| Error::icon_not_in_theme(ALL_THEMES_NAME, icon_name))?
        } else {
            self.selected_theme.ok_or(Error::NoThemeSelected)?
        };
        self.show(self.all_selected, handle, icon_name.to_string())
    }

    fn show(&mut self, all: bool, handle: ThemeHandle, icon_name: String) -> Result<&IconView> {
        let theme = self.theme(handle)?;
        let loader: &dyn ImageLoader = if self.config.measure_images {
            self.loader.as_ref()
        } else {
            &NoopImageLoader
        };
        let view = resolve(theme, &icon_name, loader)?;

        tracing::debug!(
            target: crate::targets::BROWSER,
            theme = theme.name(),
            icon = %icon_name,
            all,
            "selected icon"
        );
        self.set_selection(all, Some(handle), Some(icon_name), Some(view));
        self.view.as_ref().ok_or(Error::NoThemeSelected)
    }

    fn set_selection(
        &mut self,
        all: bool,
        theme: Option<ThemeHandle>,
        icon: Option<String>,
        view: Option<IconView>,
    ) {
        self.view = None;
        self.all_selected = all;
        self.selected_theme = theme;
        self.selected_icon = icon;
        self.view = view;
    }

    fn theme(&self, handle: ThemeHandle) -> Result<&Theme> {
        self.themes.theme(handle).ok_or(Error::NoThemeSelected)
    }

    /// Whether the aggregate view is selected.
    pub fn is_all_selected(&self) -> bool {
        self.all_selected
    }

    /// The theme the current icon is resolved against.
    pub fn selected_theme(&self) -> Option<&Theme> {
        self.selected_theme.and_then(|handle| self.themes.theme(handle))
    }

    /// Name shown in a theme selector: [`ALL_THEMES_NAME`] in the aggregate
    /// view, otherwise the selected theme's name.
    pub fn selected_theme_name(&self) -> Option<&str> {
        if self.all_selected {
            Some(ALL_THEMES_NAME)
        } else {
            self.selected_theme().map(Theme::name)
        }
    }

    /// The selected icon name.
    pub fn selected_icon(&self) -> Option<&str> {
        self.selected_icon.as_deref()
    }

    /// The resolved images of the selected icon.
    pub fn view(&self) -> Option<&IconView> {
        self.view.as_ref()
    }

    /// Switch the displayed scale of the current view.
    pub fn set_scale(&mut self, scale: u32) -> bool {
        self.view.as_mut().is_some_and(|view| view.set_scale(scale))
    }

    /// Set the icon list filter.
    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
    }

    /// Reset the icon list filter.
    pub fn clear_search(&mut self) {
        self.search.clear();
    }

    /// The icon list filter.
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Icon names listed for the current theme choice, filtered by the
    /// search query.
    pub fn visible_icon_names(&self) -> Vec<&str> {
        if self.all_selected {
            self.catalog.filter(&self.search)
        } else {
            self.selected_theme()
                .map(|theme| filter_names(theme.icon_names(), &self.search))
                .unwrap_or_default()
        }
    }
}

impl fmt::Debug for IconBrowser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IconBrowser")
            .field("config", &self.config)
            .field("themes", &self.themes.len())
            .field("icons", &self.catalog.len())
            .field("all_selected", &self.all_selected)
            .field("selected_theme", &self.selected_theme_name())
            .field("selected_icon", &self.selected_icon)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_file(path: PathBuf, contents: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        File::create(path).unwrap().write_all(contents.as_bytes()).unwrap();
    }

    fn setup_browser() -> (TempDir, IconBrowser) {
        let temp_dir = TempDir::new().unwrap();
        let icons = temp_dir.path().join("icons");

        write_file(
            icons.join("hicolor/index.theme"),
            "[Icon Theme]\nName=Hicolor\n\n[48x48/apps]\nSize=48\n",
        );
        write_file(icons.join("hicolor/48x48/apps/firefox.png"), "");
        write_file(icons.join("hicolor/48x48/apps/gimp.png"), "");

        write_file(
            icons.join("breeze/index.theme"),
            "[Icon Theme]\nName=Breeze\n\n[22x22/actions]\nSize=22\n",
        );
        write_file(icons.join("breeze/22x22/actions/edit-copy.svg"), "");
        write_file(icons.join("breeze/22x22/actions/firefox.svg"), "");

        write_file(icons.join("empty/index.theme"), "[Icon Theme]\nName=Empty\n");

        let config = BrowserConfig::new(vec![icons]).with_measure_images(false);
        (temp_dir, IconBrowser::load(config))
    }

    #[test]
    fn test_load_selects_default_theme() {
        let (_temp_dir, browser) = setup_browser();
        assert_eq!(browser.theme_names(), vec!["Breeze", "Empty", "Hicolor"]);
        assert_eq!(browser.selected_theme_name(), Some("Hicolor"));
        assert_eq!(browser.selected_icon(), Some("firefox"));
        assert_eq!(browser.view().unwrap().icon_name(), "firefox");
        assert!(browser.diagnostics().is_empty());
    }

    #[test]
    fn test_load_falls_back_to_first_theme() {
        let temp_dir = TempDir::new().unwrap();
        write_file(
            temp_dir.path().join("oxygen/index.theme"),
            "[Icon Theme]\nName=Oxygen\n[16x16/apps]\n",
        );
        write_file(temp_dir.path().join("oxygen/16x16/apps/kate.png"), "");

        let config = BrowserConfig::new(vec![temp_dir.path().to_path_buf()]);
        let browser = IconBrowser::load_with_loader(config, NoopImageLoader);
        assert_eq!(browser.selected_theme_name(), Some("Oxygen"));
        assert_eq!(browser.selected_icon(), Some("kate"));
    }

    #[test]
    fn test_theme_change_keeps_icon() {
        let (_temp_dir, mut browser) = setup_browser();
        let view = browser.select(ThemeChoice::Named("Breeze"), None).unwrap().unwrap();
        assert_eq!(view.icon_name(), "firefox");
        assert_eq!(view.theme_name(), "Breeze");

        browser.select_icon("edit-copy").unwrap();
        let view = browser.select(ThemeChoice::Named("Hicolor"), None).unwrap().unwrap();
        assert_eq!(view.icon_name(), "firefox");
    }

    #[test]
    fn test_empty_theme_clears_view() {
        let (_temp_dir, mut browser) = setup_browser();
        assert!(browser.select(ThemeChoice::Named("Empty"), None).unwrap().is_none());
        assert!(browser.view().is_none());
        assert_eq!(browser.selected_theme_name(), Some("Empty"));
        assert!(matches!(browser.select_icon("firefox"), Err(Error::IconNotInTheme { .. })));
    }

    #[test]
    fn test_all_view() {
        let (_temp_dir, mut browser) = setup_browser();
        let view = browser.select(ThemeChoice::All, None).unwrap().unwrap();
        assert_eq!(view.icon_name(), "edit-copy");
        assert_eq!(browser.selected_theme_name(), Some(ALL_THEMES_NAME));
        assert_eq!(browser.selected_theme().map(Theme::name), Some("Breeze"));

        browser.select_icon("gimp").unwrap();
        assert_eq!(browser.selected_theme().map(Theme::name), Some("Hicolor"));
        assert_eq!(browser.owner_of("firefox"), Some("Breeze"));
        assert_eq!(browser.all_icon_names(), &["edit-copy", "firefox", "gimp"]);

        assert!(browser.select_icon("missing").is_err());
        assert_eq!(browser.selected_icon(), Some("gimp"));
    }

    #[test]
    fn test_unknown_theme() {
        let (_temp_dir, mut browser) = setup_browser();
        assert!(matches!(
            browser.select(ThemeChoice::Named("Nope"), None),
            Err(Error::UnknownTheme(name)) if name == "Nope"
        ));
        assert!(browser.icon_names("Nope").is_err());
        assert_eq!(browser.icon_names("Hicolor").unwrap(), vec!["firefox", "gimp"]);
    }

    #[test]
    fn test_explicit_icon_must_exist() {
        let (_temp_dir, mut browser) = setup_browser();
        let err = browser.select(ThemeChoice::Named("Hicolor"), Some("edit-copy")).unwrap_err();
        assert!(matches!(err, Error::IconNotInTheme { .. }));
        assert_eq!(browser.selected_theme_name(), Some("Hicolor"));
    }

    #[test]
    fn test_search_filter() {
        let (_temp_dir, mut browser) = setup_browser();
        browser.set_search("fire");
        assert_eq!(browser.visible_icon_names(), vec!["firefox"]);
        browser.select(ThemeChoice::All, None).unwrap();
        browser.set_search("e");
        assert_eq!(browser.visible_icon_names(), vec!["edit-copy", "firefox"]);
        browser.clear_search();
        assert_eq!(browser.visible_icon_names().len(), 3);
    }

    #[test]
    fn test_select_by_handle() {
        let temp_dir = TempDir::new().unwrap();
        let icons = temp_dir.path().to_path_buf();
        for (dir, icon) in [("twin-a", "first"), ("twin-b", "second")] {
            write_file(icons.join(dir).join("index.theme"), "[Icon Theme]\nName=Twin\n[apps]\n");
            write_file(icons.join(dir).join("apps").join(format!("{}.png", icon)), "");
        }
        write_file(icons.join("named-none/index.theme"), "[Icon Theme]\nName=None\n[apps]\n");
        write_file(icons.join("named-none/apps/themed.png"), "");
        write_file(icons.join("loose.png"), "");

        let config = BrowserConfig::new(vec![icons]);
        let mut browser = IconBrowser::load_with_loader(config, NoopImageLoader);
        assert_eq!(browser.theme_names(), vec!["None", "Twin", "Twin"]);

        let view = browser.select(ThemeChoice::Named("Twin"), None).unwrap().unwrap();
        assert_eq!(view.icon_name(), "first");
        let view = browser.select_handle(ThemeHandle::Themed(2), None).unwrap().unwrap();
        assert_eq!(view.icon_name(), "second");

        let view = browser.select(ThemeChoice::Named("None"), None).unwrap().unwrap();
        assert_eq!(view.icon_name(), "themed");
        let view = browser.select_handle(ThemeHandle::Unthemed, None).unwrap().unwrap();
        assert_eq!(view.icon_name(), "loose");
        assert!(browser.selected_theme().unwrap().is_unthemed());
    }

    #[test]
    fn test_choice_from_name() {
        assert_eq!(ThemeChoice::from_name("All"), ThemeChoice::All);
        assert_eq!(ThemeChoice::from_name("Breeze"), ThemeChoice::Named("Breeze"));
    }
}
