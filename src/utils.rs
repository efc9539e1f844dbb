//! Utility functions

use crate::constants::APP_NAME;
use std::path::PathBuf;
use tracing::warn;

// Square viewBox, used for the window/taskbar icon
pub const ICON_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 64 64"><rect x="2" y="14" width="60" height="36" rx="10" fill="#18181b" stroke="#2dd4bf" stroke-width="3"/><circle cx="18" cy="32" r="6" fill="none" stroke="#34d399" stroke-width="3"/><path d="M30 32h14m-5-6 6 6-6 6" fill="none" stroke="#ffffff" stroke-width="3" stroke-linecap="round" stroke-linejoin="round"/></svg>"##;

/// Rasterize the icon SVG to a square straight-alpha RGBA image.
pub fn rasterize_icon(size: u32) -> Option<(Vec<u8>, u32, u32)> {
    let tree = match resvg::usvg::Tree::from_str(ICON_SVG, &resvg::usvg::Options::default()) {
        Ok(tree) => tree,
        Err(e) => {
            warn!(error = %e, "Failed to parse icon SVG");
            return None;
        }
    };
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

/// Get the app data directory (settings, logs)
pub fn get_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}
