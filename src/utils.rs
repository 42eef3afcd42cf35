//! Utility functions

use crate::constants::APP_NAME;
use std::path::PathBuf;

// Rounded teal tile with a chain link, used in the nav bar
pub const LOGO_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 64 64"><rect x="2" y="2" width="60" height="60" rx="14" fill="#2dd4bf"/><path d="M26 38l12-12" fill="none" stroke="#042f2e" stroke-width="5" stroke-linecap="round"/><path d="M30 21l4-4a9 9 0 0 1 13 13l-4 4M34 43l-4 4a9 9 0 0 1-13-13l4-4" fill="none" stroke="#042f2e" stroke-width="5" stroke-linecap="round"/></svg>"##;

/// Rasterize the logo SVG to a square RGBA image.
pub fn rasterize_logo(size: u32) -> Option<(Vec<u8>, u32, u32)> {
    let tree = resvg::usvg::Tree::from_str(LOGO_SVG, &resvg::usvg::Options::default()).ok()?;
    let scale = size as f32 / tree.size().width();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size, size)?;
    resvg::render(
        &tree,
        resvg::usvg::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    Some((premul_to_straight(&pixmap), size, size))
}

fn premul_to_straight(pixmap: &resvg::tiny_skia::Pixmap) -> Vec<u8> {
    pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let a = p.alpha();
            if a == 0 {
                [0, 0, 0, 0]
            } else {
                let r = (p.red() as u16 * 255 / a as u16) as u8;
                let g = (p.green() as u16 * 255 / a as u16) as u8;
                let b = (p.blue() as u16 * 255 / a as u16) as u8;
                [r, g, b, a]
            }
        })
        .collect()
}

/// Get the app data directory path
pub fn get_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Up to two leading characters of a name, used when the avatar is missing
pub fn initials(name: &str) -> String {
    name.chars().take(2).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logo_rasterizes_to_requested_size() {
        let (pixels, w, h) = rasterize_logo(48).unwrap();
        assert_eq!((w, h), (48, 48));
        assert_eq!(pixels.len(), 48 * 48 * 4);
        // Corner is transparent, centre of the tile is opaque
        assert_eq!(pixels[3], 0);
        let centre = ((24 * 48) + 10) * 4;
        assert_eq!(pixels[centre + 3], 255);
    }

    #[test]
    fn initials_take_two_chars() {
        assert_eq!(initials("Atif Hasan"), "At");
        assert_eq!(initials("Ö"), "Ö");
        assert_eq!(initials(""), "");
    }
}
