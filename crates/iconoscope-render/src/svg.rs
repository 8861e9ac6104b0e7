//! SVG sizing support.
//!
//! Icon SVGs have no pixel size of their own; the natural size declared by
//! their `width`/`height` attributes or `viewBox` is what a viewer shows.

use std::path::Path;

use resvg::usvg;

use crate::error::{RenderError, RenderResult};

/// Read the natural size of an SVG file, rounded up to whole pixels.
pub fn natural_size(path: impl AsRef<Path>) -> RenderResult<(u32, u32)> {
    let path = path.as_ref();
    let data = std::fs::read(path).map_err(|e| RenderError::io(path, e))?;
    natural_size_from_bytes(&data)
        .map_err(|message| RenderError::image_load(path, message))
}

/// Read the natural size of an SVG document held in memory.
pub fn natural_size_from_bytes(data: &[u8]) -> Result<(u32, u32), String> {
    let options = usvg::Options::default();
    let tree = usvg::Tree::from_data(data, &options)
        .map_err(|e| format!("Failed to parse SVG: {}", e))?;

    let size = tree.size();
    Ok((size.width().ceil() as u32, size.height().ceil() as u32))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="32" height="32" viewBox="0 0 32 32"><rect width="32" height="32"/></svg>"#;

    #[test]
    fn test_natural_size_from_bytes() {
        assert_eq!(natural_size_from_bytes(SQUARE.as_bytes()).unwrap(), (32, 32));
    }

    #[test]
    fn test_natural_size_rounds_up() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="15.5" height="16"><rect width="8" height="8"/></svg>"#;
        assert_eq!(natural_size_from_bytes(svg.as_bytes()).unwrap(), (16, 16));
    }

    #[test]
    fn test_invalid_svg() {
        assert!(natural_size_from_bytes(b"not an svg").is_err());
    }
}
