//! `index.theme` parsing.
//!
//! A theme index is an INI file whose first section (conventionally
//! `[Icon Theme]`) describes the theme and whose every later section names a
//! subdirectory holding icons of one size, scale and context:
//!
//! ```text
//! [Icon Theme]
//! Name=Hicolor
//! Directories=48x48/apps,scalable/apps
//!
//! [48x48/apps]
//! Size=48
//! Context=Applications
//! Type=Threshold
//!
//! [scalable/apps]
//! Size=128
//! MinSize=8
//! MaxSize=512
//! Type=Scalable
//! ```
//!
//! [`ThemeIndex::parse`] borrows everything from the source buffer. Syntax
//! errors are collected instead of aborting, and whatever was read before
//! them stays available.

use std::path::{Path, PathBuf};

use crate::scanner::{Scanner, SyntaxError};
use crate::types::{IconContext, IconSizeType, ThemeInfo};

/// Name of the index file inside a theme directory.
pub const INDEX_FILE: &str = "index.theme";

/// Metadata from the first section of an index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeHeader<'a> {
    /// Name of the first section, usually `Icon Theme`.
    pub section: Option<&'a str>,
    /// Display name (`Name`).
    pub name: Option<&'a str>,
    /// `Comment`
    pub comment: Option<&'a str>,
    /// `Inherits`, split on commas.
    pub inherits: Vec<&'a str>,
    /// `Hidden`, unset when absent.
    pub hidden: Option<bool>,
    /// `Example`
    pub example: Option<&'a str>,
    /// `Directories`, split on commas.
    pub directories: Vec<&'a str>,
    /// `ScaledDirectories`, split on commas.
    pub scaled_directories: Vec<&'a str>,
}

impl<'a> ThemeHeader<'a> {
    /// Copy the informational keys out of the buffer.
    pub fn to_info(&self) -> ThemeInfo {
        ThemeInfo {
            comment: self.comment.map(str::to_owned),
            inherits: self.inherits.iter().map(|s| s.to_string()).collect(),
            hidden: self.hidden.unwrap_or(false),
            example: self.example.map(str::to_owned),
            directories: self.listed_directories().map(str::to_owned).collect(),
        }
    }

    /// `Directories` followed by `ScaledDirectories`, deduplicated.
    pub fn listed_directories(&self) -> impl Iterator<Item = &'a str> {
        let mut seen = Vec::new();
        self.directories
            .iter()
            .chain(&self.scaled_directories)
            .copied()
            .filter(move |dir| {
                let new = !seen.contains(dir);
                if new {
                    seen.push(*dir);
                }
                new
            })
    }
}

/// One subdirectory section of an index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectorySection<'a> {
    /// Directory path relative to a theme root (the section name).
    pub path: &'a str,
    /// Line of the section header.
    pub line: u32,
    /// `Size`, unset when absent or unparsable.
    pub size: Option<u32>,
    /// `MinSize`
    pub min_size: Option<u32>,
    /// `MaxSize`
    pub max_size: Option<u32>,
    /// `Scale`, 1 when absent or unparsable. Negative values read as 0.
    pub scale: u32,
    /// Raw `Type` tag.
    pub size_type: Option<&'a str>,
    /// Raw `Context` tag.
    pub context: Option<&'a str>,
}

impl<'a> DirectorySection<'a> {
    fn new(path: &'a str, line: u32) -> Self {
        Self {
            path,
            line,
            size: None,
            min_size: None,
            max_size: None,
            scale: 1,
            size_type: None,
            context: None,
        }
    }

    fn apply(&mut self, key: &'a str, value: &'a str) {
        match key {
            "Size" => self.size = parse_size(value),
            "MinSize" => self.min_size = parse_size(value),
            "MaxSize" => self.max_size = parse_size(value),
            "Scale" => {
                if let Some(scale) = parse_int(value) {
                    self.scale = u32::try_from(scale).unwrap_or(0);
                }
            }
            "Type" => self.size_type = Some(value),
            "Context" => self.context = Some(value),
            _ => {}
        }
    }

    /// Absolute directory of this section under a theme root.
    pub fn dir_in(&self, root: &Path) -> PathBuf {
        root.join(self.path.trim_start_matches('/'))
    }

    /// Whether icons here are treated as scalable.
    ///
    /// Theme authors mark these directories by name; the `Type` key is
    /// frequently wrong, so it is not consulted.
    pub fn is_scalable(&self) -> bool {
        self.path.contains("scalable")
    }

    /// The `Type` tag as a size type.
    pub fn size_type_kind(&self) -> Option<IconSizeType> {
        self.size_type.map(IconSizeType::from_tag)
    }

    /// The `Context` tag as a known context.
    pub fn context_kind(&self) -> Option<IconContext> {
        self.context.and_then(IconContext::from_tag)
    }
}

/// A parsed index, borrowing from its source buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeIndex<'a> {
    /// First-section metadata.
    pub header: ThemeHeader<'a>,
    /// Directory sections in file order.
    pub sections: Vec<DirectorySection<'a>>,
    /// Syntax errors met while parsing.
    pub diagnostics: Vec<SyntaxError>,
}

impl<'a> ThemeIndex<'a> {
    /// Parse an index buffer.
    pub fn parse(src: &'a str) -> Self {
        let mut index = ThemeIndex::default();
        let mut scanner = Scanner::new(src);

        match scanner.seek_next_section() {
            Ok(Some(section)) => {
                index.header.section = Some(section);
                let header = &mut index.header;
                read_entries(&mut scanner, &mut index.diagnostics, |key, value| {
                    header.apply(key, value)
                });
            }
            Ok(None) => return index,
            Err(err) => {
                index.diagnostics.push(err);
                scanner.skip_section();
            }
        }

        loop {
            scanner.skip_section();
            let line = scanner.line();
            match scanner.seek_next_section() {
                Ok(Some(path)) => {
                    let mut section = DirectorySection::new(path, line);
                    read_entries(&mut scanner, &mut index.diagnostics, |key, value| {
                        section.apply(key, value)
                    });
                    index.sections.push(section);
                }
                Ok(None) => break,
                Err(err) => {
                    tracing::debug!(
                        target: crate::targets::INDEX,
                        line = err.line,
                        "skipping malformed section"
                    );
                    index.diagnostics.push(err);
                    scanner.skip_section();
                }
            }
        }

        index
    }

    /// The display name, if the header declares one.
    pub fn name(&self) -> Option<&'a str> {
        self.header.name
    }

    /// Whether any syntax error was met.
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

impl<'a> ThemeHeader<'a> {
    fn apply(&mut self, key: &'a str, value: &'a str) {
        match key {
            "Name" => {
                self.name.get_or_insert(value);
            }
            "Comment" => {
                self.comment.get_or_insert(value);
            }
            "Example" => {
                self.example.get_or_insert(value);
            }
            "Hidden" => {
                self.hidden.get_or_insert(value.eq_ignore_ascii_case("true"));
            }
            "Inherits" if self.inherits.is_empty() => {
                self.inherits = split_list(value).collect();
            }
            "Directories" if self.directories.is_empty() => {
                self.directories = split_list(value).collect();
            }
            "ScaledDirectories" if self.scaled_directories.is_empty() => {
                self.scaled_directories = split_list(value).collect();
            }
            _ => {}
        }
    }
}

fn read_entries<'a>(
    scanner: &mut Scanner<'a>,
    diagnostics: &mut Vec<SyntaxError>,
    mut apply: impl FnMut(&'a str, &'a str),
) {
    loop {
        scanner.consume_ignored_lines();
        match scanner.seek_next_key_value() {
            Ok(Some((key, value))) => apply(key, value),
            Ok(None) => break,
            Err(err) => diagnostics.push(err),
        }
    }
}

fn split_list(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').map(str::trim).filter(|s| !s.is_empty())
}

/// Parse a leading decimal integer the way `sscanf("%i")` reads one.
///
/// Surrounding whitespace and an optional sign are accepted; anything after
/// the digits is ignored. Returns `None` when there are no digits.
pub fn parse_int(value: &str) -> Option<i64> {
    let value = value.trim_start();
    let (negative, digits) = match value.as_bytes().first() {
        Some(b'-') => (true, &value[1..]),
        Some(b'+') => (false, &value[1..]),
        _ => (false, value),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    let magnitude: i64 = digits[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

fn parse_size(value: &str) -> Option<u32> {
    parse_int(value).and_then(|n| u32::try_from(n).ok())
}
