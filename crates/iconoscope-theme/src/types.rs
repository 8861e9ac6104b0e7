//! Core types for the icon theme system.
//!
//! This module provides:
//! - Recognized icon file extensions and their priority
//! - Icon context categories (Actions, Places, etc.)
//! - Directory size types (Fixed, Scalable, Threshold)
//! - Theme header metadata

/// A recognized icon file extension.
///
/// Variants are declared from highest to lowest priority, so the derived
/// ordering sorts the preferred extension first. Compressed SVG (`.svgz`) is
/// not recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IconExtension {
    /// `.svg`
    Svg,
    /// `.symbolic.png`
    SymbolicPng,
    /// `.png`
    Png,
    /// `.xpm`
    Xpm,
}

impl IconExtension {
    /// All extensions, highest priority first.
    pub const ALL: [IconExtension; 4] = [
        IconExtension::Svg,
        IconExtension::SymbolicPng,
        IconExtension::Png,
        IconExtension::Xpm,
    ];

    /// The file name suffix, including the leading dot.
    pub fn suffix(&self) -> &'static str {
        match self {
            IconExtension::Svg => ".svg",
            IconExtension::SymbolicPng => ".symbolic.png",
            IconExtension::Png => ".png",
            IconExtension::Xpm => ".xpm",
        }
    }

    /// Split a file name into its icon base name and extension.
    ///
    /// The first extension in priority order whose suffix matches wins, so
    /// `go-up.symbolic.png` yields `go-up`. Names with an empty base are
    /// rejected.
    pub fn split(file_name: &str) -> Option<(&str, IconExtension)> {
        Self::ALL.iter().find_map(|ext| {
            file_name
                .strip_suffix(ext.suffix())
                .filter(|base| !base.is_empty())
                .map(|base| (base, *ext))
        })
    }

    /// Whether a file name has a recognized icon extension.
    pub fn matches(file_name: &str) -> bool {
        Self::split(file_name).is_some()
    }

    /// The file name an icon would have with this extension.
    pub fn file_name(&self, icon_name: &str) -> String {
        format!("{}{}", icon_name, self.suffix())
    }
}

/// Icon context/category following freedesktop specification.
///
/// Contexts are informational here: resolution walks every section no matter
/// what context it declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconContext {
    /// Icons for user actions (copy, save, etc.)
    Actions,
    /// Loading and processing animations
    Animations,
    /// Application icons
    Applications,
    /// Program menu categories
    Categories,
    /// Hardware devices
    Devices,
    /// File/folder emblems and tags
    Emblems,
    /// Emoticons for chat
    Emotes,
    /// Country flags
    International,
    /// File type icons (MIME types)
    MimeTypes,
    /// Filesystem locations
    Places,
    /// System status indicators
    Status,
}

impl IconContext {
    /// Get the freedesktop context name.
    pub fn as_str(&self) -> &'static str {
        match self {
            IconContext::Actions => "Actions",
            IconContext::Animations => "Animations",
            IconContext::Applications => "Applications",
            IconContext::Categories => "Categories",
            IconContext::Devices => "Devices",
            IconContext::Emblems => "Emblems",
            IconContext::Emotes => "Emotes",
            IconContext::International => "International",
            IconContext::MimeTypes => "MimeTypes",
            IconContext::Places => "Places",
            IconContext::Status => "Status",
        }
    }

    /// Parse a context tag, accepting the common spellings themes use.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_ascii_lowercase().as_str() {
            "actions" => Some(IconContext::Actions),
            "animations" => Some(IconContext::Animations),
            "apps" | "applications" => Some(IconContext::Applications),
            "categories" => Some(IconContext::Categories),
            "devices" => Some(IconContext::Devices),
            "emblems" => Some(IconContext::Emblems),
            "emotes" => Some(IconContext::Emotes),
            "intl" | "international" => Some(IconContext::International),
            "mimetypes" | "mime-types" => Some(IconContext::MimeTypes),
            "places" => Some(IconContext::Places),
            "status" => Some(IconContext::Status),
            _ => None,
        }
    }
}

/// Size type for icon theme directories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IconSizeType {
    /// Fixed size icons - must match exactly
    Fixed,
    /// Scalable icons (typically SVG)
    Scalable,
    /// Threshold-based sizing - matches within a range
    #[default]
    Threshold,
}

impl IconSizeType {
    /// Parse a `Type` tag. Unknown tags fall back to `Threshold`.
    pub fn from_tag(tag: &str) -> Self {
        match tag.to_ascii_lowercase().as_str() {
            "fixed" => IconSizeType::Fixed,
            "scalable" => IconSizeType::Scalable,
            _ => IconSizeType::Threshold,
        }
    }
}

/// Header metadata of a theme, copied out of its `[Icon Theme]` section.
///
/// None of this drives resolution; it is kept for display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeInfo {
    /// Theme description
    pub comment: Option<String>,
    /// Parent themes named by `Inherits`
    pub inherits: Vec<String>,
    /// Whether to hide from theme selection UI
    pub hidden: bool,
    /// Theme example icon name
    pub example: Option<String>,
    /// Directories listed by `Directories` and `ScaledDirectories`
    pub directories: Vec<String>,
}
