//! Allocation-free INI/desktop-entry scanner.
//!
//! The [`Scanner`] walks an in-memory buffer line by line. Every string it
//! returns is a slice of that buffer, so nothing is copied and the lifetime
//! `'a` keeps the buffer alive for as long as any returned view is in use.
//! Callers that need a value beyond that must copy it out.
//!
//! The cursor always sits at the start of a line. Printing a file back looks
//! like this:
//!
//! ```
//! use iconoscope_theme::scanner::Scanner;
//!
//! let index = "[Icon Theme]\nName=Hicolor\n\n[48x48/apps]\nSize = 48\n";
//! let mut scanner = Scanner::new(index);
//! let mut out = String::new();
//! while let Ok(Some(section)) = scanner.seek_next_section() {
//!     out.push_str(&format!("[{}]\n", section));
//!     scanner.consume_ignored_lines();
//!     while let Ok(Some((key, value))) = scanner.seek_next_key_value() {
//!         out.push_str(&format!("{}={}\n", key, value));
//!         scanner.consume_ignored_lines();
//!     }
//! }
//! assert_eq!(out, "[Icon Theme]\nName=Hicolor\n[48x48/apps]\nSize=48\n");
//! ```

use std::fmt;

/// What was wrong with a malformed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    /// A `[` header line without a closing `]`.
    UnterminatedSection,
    /// Text after the closing `]` of a header line.
    TrailingSectionText,
    /// A line inside a section that is not `key=value`.
    MissingEquals,
}

impl fmt::Display for SyntaxErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnterminatedSection => write!(f, "missing ']' in section header"),
            Self::TrailingSectionText => write!(f, "unexpected text after section header"),
            Self::MissingEquals => write!(f, "expected '=' after key"),
        }
    }
}

/// A syntax error at a given line of an INI buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("line {line}: {kind}")]
pub struct SyntaxError {
    /// Line number where the error occurred (1-indexed).
    pub line: u32,
    /// The kind of error.
    pub kind: SyntaxErrorKind,
}

impl SyntaxError {
    /// Create a new syntax error.
    pub fn new(line: u32, kind: SyntaxErrorKind) -> Self {
        Self { line, kind }
    }
}

/// Cursor over an INI buffer.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    src: &'a str,
    pos: usize,
    line: u32,
}

impl<'a> Scanner<'a> {
    /// Create a scanner positioned at the start of `src`.
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            line: 1,
        }
    }

    /// Byte offset of the cursor.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Line number of the cursor (1-indexed).
    pub fn line(&self) -> u32 {
        self.line
    }

    /// True once the whole buffer has been consumed.
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    /// True at a section header or at the end of the buffer.
    pub fn is_end_of_section(&self) -> bool {
        self.is_at_end() || self.rest().starts_with('[')
    }

    /// Advance to the next section header and return its name.
    ///
    /// Returns `Ok(None)` with the cursor at the end when there are no more
    /// sections. On a malformed header the cursor is left on the line after
    /// it, so the caller can skip the section body and carry on.
    pub fn seek_next_section(&mut self) -> Result<Option<&'a str>, SyntaxError> {
        self.skip_section();
        if self.is_at_end() {
            return Ok(None);
        }

        let line = self.line;
        let header = &self.current_line()[1..];
        self.consume_line();

        let Some(close) = header.find(']') else {
            return Err(SyntaxError::new(line, SyntaxErrorKind::UnterminatedSection));
        };
        let trailing = &header[close + 1..];
        if !trailing.is_empty() && trailing != "\r" {
            return Err(SyntaxError::new(line, SyntaxErrorKind::TrailingSectionText));
        }

        Ok(Some(&header[..close]))
    }

    /// Parse one `key=value` line of the current section.
    ///
    /// Returns `Ok(None)` without consuming anything at the start of the next
    /// section or at the end of the buffer. A line without `=` is consumed and
    /// reported as an error.
    pub fn seek_next_key_value(&mut self) -> Result<Option<(&'a str, &'a str)>, SyntaxError> {
        if self.is_end_of_section() {
            return Ok(None);
        }

        let line = self.line;
        let text = self.current_line().trim_start_matches(is_blank);
        self.consume_line();

        let key_end = text
            .find(|c: char| c == '=' || c.is_ascii_whitespace())
            .unwrap_or(text.len());
        let key = &text[..key_end];

        let Some(value) = text[key_end..].trim_start_matches(is_blank).strip_prefix('=') else {
            return Err(SyntaxError::new(line, SyntaxErrorKind::MissingEquals));
        };
        let value = value.trim_start_matches(is_blank).trim_end();

        Ok(Some((key, value)))
    }

    /// Skip blank lines and `;`/`#` comment lines.
    pub fn consume_ignored_lines(&mut self) {
        while !self.is_at_end() {
            let text = self.current_line().trim();
            if text.is_empty() || text.starts_with(';') || text.starts_with('#') {
                self.consume_line();
            } else {
                break;
            }
        }
    }

    /// Skip everything up to the next section header.
    pub fn skip_section(&mut self) {
        while !self.is_at_end() && !self.rest().starts_with('[') {
            self.consume_line();
        }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn current_line(&self) -> &'a str {
        let rest = self.rest();
        match rest.find('\n') {
            Some(end) => &rest[..end],
            None => rest,
        }
    }

    fn consume_line(&mut self) {
        match self.rest().find('\n') {
            Some(end) => {
                self.pos += end + 1;
                self.line += 1;
            }
            None => self.pos = self.src.len(),
        }
    }
}

fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t'
}
