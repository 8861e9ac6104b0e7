//! Icon resolution.
//!
//! [`resolve`] turns an icon name into every image file a theme provides for
//! it, grouped by scale factor and ordered smallest first. Matching inside a
//! directory always follows [`IconExtension`] priority, so the result never
//! depends on directory listing order.

use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

use iconoscope_render::ImageLoader;

use crate::error::{Error, Result};
use crate::index::DirectorySection;
use crate::theme::Theme;
use crate::types::{IconContext, IconExtension, IconSizeType};

/// Highest scale factor kept. Images from directories with a larger `Scale`
/// are dropped.
pub const MAX_SCALE: u32 = 3;

/// Label of images found in scalable directories.
pub const SCALABLE_LABEL: &str = "Scalable";

/// Label of images whose directory declares no usable size.
pub const UNKNOWN_SIZE_LABEL: &str = "Unknown";

/// One image file resolved for an icon name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconImage {
    /// Absolute path of the file.
    pub path: PathBuf,
    /// Path relative to `theme_dir`.
    pub relative_path: PathBuf,
    /// Theme root the file was found under.
    pub theme_dir: PathBuf,
    /// Nominal size of the directory.
    pub size: Option<u32>,
    /// `MinSize` of the directory.
    pub min_size: Option<u32>,
    /// `MaxSize` of the directory.
    pub max_size: Option<u32>,
    /// Scale factor, 1 to [`MAX_SCALE`].
    pub scale: u32,
    /// Whether the directory path marks the image as scalable.
    pub is_scalable: bool,
    /// Raw `Context` tag of the directory.
    pub context: Option<String>,
    /// Raw `Type` tag of the directory.
    pub size_type: Option<String>,
    /// Extension the file was matched with.
    pub extension: IconExtension,
    /// Display label; unset for unthemed images.
    pub label: Option<String>,
    /// File size in bytes.
    pub file_size: Option<u64>,
    /// Measured width in pixels.
    pub width: Option<u32>,
    /// Measured height in pixels.
    pub height: Option<u32>,
}

impl IconImage {
    fn from_section(
        root: &Path,
        section: &DirectorySection<'_>,
        icon_name: &str,
        path: PathBuf,
        extension: IconExtension,
    ) -> Self {
        let relative_path =
            Path::new(section.path.trim_start_matches('/')).join(extension.file_name(icon_name));
        Self {
            path,
            relative_path,
            theme_dir: root.to_path_buf(),
            size: section.size,
            min_size: section.min_size,
            max_size: section.max_size,
            scale: section.scale,
            is_scalable: section.is_scalable(),
            context: section.context.map(str::to_owned),
            size_type: section.size_type.map(str::to_owned),
            extension,
            label: None,
            file_size: None,
            width: None,
            height: None,
        }
    }

    fn unthemed(root: &Path, icon_name: &str, path: PathBuf, extension: IconExtension) -> Self {
        Self {
            relative_path: PathBuf::from(extension.file_name(icon_name)),
            path,
            theme_dir: root.to_path_buf(),
            size: None,
            min_size: None,
            max_size: None,
            scale: 1,
            is_scalable: false,
            context: None,
            size_type: None,
            extension,
            label: None,
            file_size: None,
            width: None,
            height: None,
        }
    }

    /// The `Context` tag as a known context.
    pub fn context_kind(&self) -> Option<IconContext> {
        self.context.as_deref().and_then(IconContext::from_tag)
    }

    /// The `Type` tag as a size type.
    pub fn size_type_kind(&self) -> Option<IconSizeType> {
        self.size_type.as_deref().map(IconSizeType::from_tag)
    }

    /// Measured `(width, height)`, if the loader could read the file.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.width.zip(self.height)
    }

    /// Display ordering inside a scale bucket: scalable images last,
    /// otherwise by nominal size with unset sizes first.
    pub fn display_cmp(&self, other: &Self) -> Ordering {
        match (self.is_scalable, other.is_scalable) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => self.size.cmp(&other.size),
        }
    }

    fn compute_label(&mut self, themed: bool) {
        self.label = themed.then(|| {
            if self.is_scalable {
                SCALABLE_LABEL.to_string()
            } else {
                self.size
                    .map_or_else(|| UNKNOWN_SIZE_LABEL.to_string(), |size| size.to_string())
            }
        });
    }
}

/// Every image of one icon name in one theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconView {
    icon_name: String,
    theme_name: String,
    buckets: [Vec<IconImage>; MAX_SCALE as usize],
    scale: u32,
}

impl IconView {
    fn new(icon_name: &str, theme_name: &str) -> Self {
        Self {
            icon_name: icon_name.to_string(),
            theme_name: theme_name.to_string(),
            buckets: Default::default(),
            scale: 1,
        }
    }

    /// The resolved icon name.
    pub fn icon_name(&self) -> &str {
        &self.icon_name
    }

    /// Display name of the theme the view was resolved against.
    pub fn theme_name(&self) -> &str {
        &self.theme_name
    }

    /// Images of one scale factor, smallest first. Out-of-range scales are
    /// empty.
    pub fn images(&self, scale: u32) -> &[IconImage] {
        bucket_index(scale)
            .and_then(|i| self.buckets.get(i))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// The scale currently shown.
    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Switch the displayed scale without resolving again.
    ///
    /// Returns `false` and leaves the scale alone when it is out of range.
    pub fn set_scale(&mut self, scale: u32) -> bool {
        if bucket_index(scale).is_none() {
            return false;
        }
        self.scale = scale;
        true
    }

    /// Images of the displayed scale.
    pub fn current_images(&self) -> &[IconImage] {
        self.images(self.scale)
    }

    /// Scale factors that have at least one image.
    pub fn available_scales(&self) -> Vec<u32> {
        (1..=MAX_SCALE).filter(|&s| !self.images(s).is_empty()).collect()
    }

    /// Total number of images across all scales.
    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    /// Whether no image was resolved.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All images, scale 1 first.
    pub fn iter(&self) -> impl Iterator<Item = &IconImage> {
        self.buckets.iter().flatten()
    }

    fn push(&mut self, image: IconImage) -> bool {
        match bucket_index(image.scale) {
            Some(i) => {
                self.buckets[i].push(image);
                true
            }
            None => {
                tracing::trace!(
                    target: crate::targets::RESOLVE,
                    path = ?image.path,
                    scale = image.scale,
                    "dropping image with unsupported scale"
                );
                false
            }
        }
    }
}

/// Whether images at `scale` are kept. Catalogs and resolution only look at
/// sections passing this.
pub fn is_supported_scale(scale: u32) -> bool {
    (1..=MAX_SCALE).contains(&scale)
}

fn bucket_index(scale: u32) -> Option<usize> {
    is_supported_scale(scale).then(|| scale as usize - 1)
}

/// Find `icon_name` in `dir`, trying extensions in priority order.
pub fn lookup_icon(dir: &Path, icon_name: &str) -> Option<(PathBuf, IconExtension)> {
    IconExtension::ALL.iter().find_map(|ext| {
        let path = dir.join(ext.file_name(icon_name));
        path.is_file().then_some((path, *ext))
    })
}

/// Resolve `icon_name` against `theme`.
///
/// Themed lookups walk the index sections under each root in turn and stop
/// after the first root that yields anything. The unthemed unit is looked up
/// directly in each of its roots. Every image is then labelled, sized on disk
/// and measured by `loader`.
///
/// Fails with [`Error::IconNotInTheme`] when nothing is found.
pub fn resolve(theme: &Theme, icon_name: &str, loader: &dyn ImageLoader) -> Result<IconView> {
    let mut view = IconView::new(icon_name, theme.name());

    let found = match theme.index() {
        Some(index) => {
            let mut found = false;
            for root in theme.directories() {
                for section in index.sections.iter().filter(|s| is_supported_scale(s.scale)) {
                    if let Some((path, ext)) = lookup_icon(&section.dir_in(root), icon_name) {
                        found |= view.push(IconImage::from_section(root, section, icon_name, path, ext));
                    }
                }
                if found {
                    break;
                }
            }
            found
        }
        None => {
            for root in theme.directories() {
                if let Some((path, ext)) = lookup_icon(root, icon_name) {
                    view.push(IconImage::unthemed(root, icon_name, path, ext));
                }
            }
            !view.is_empty()
        }
    };

    if !found {
        return Err(Error::icon_not_in_theme(theme.name(), icon_name));
    }

    for bucket in &mut view.buckets {
        bucket.sort_by(IconImage::display_cmp);
    }

    let themed = !theme.is_unthemed();
    for image in view.buckets.iter_mut().flatten() {
        image.compute_label(themed);
        image.file_size = fs::metadata(&image.path).ok().map(|m| m.len());
        match loader.measure(&image.path) {
            Ok(info) => {
                image.width = Some(info.width);
                image.height = Some(info.height);
            }
            Err(e) => {
                tracing::debug!(
                    target: crate::targets::RESOLVE,
                    path = ?image.path,
                    "could not measure image: {}",
                    e
                );
            }
        }
    }

    tracing::debug!(
        target: crate::targets::RESOLVE,
        theme = theme.name(),
        icon = icon_name,
        images = view.len(),
        "resolved icon"
    );
    Ok(view)
}
