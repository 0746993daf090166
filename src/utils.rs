//! Utility functions

use crate::constants::APP_NAME;
use chrono::NaiveDate;
use std::path::PathBuf;

// Globe mark used for the sidebar logo and window icon
pub const LOGO_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 120 120"><circle cx="60" cy="60" r="54" fill="#1c1917" stroke="#f59e0b" stroke-width="6"/><ellipse cx="60" cy="60" rx="22" ry="54" fill="none" stroke="#f59e0b" stroke-width="4"/><path d="M8 60h104M16 32h88M16 88h88" fill="none" stroke="#fde68a" stroke-width="4"/></svg>"##;

/// Rasterize the logo SVG to a square RGBA buffer.
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

/// Per-user folder for settings and logs
pub fn get_app_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// "February 09, 2024"
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%B %d, %Y").to_string()
}

/// "8.5/10", dropping a trailing ".0"
pub fn format_popularity(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{}/10", score as i64)
    } else {
        format!("{:.1}/10", score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_date_matches_card_format() {
        let d = NaiveDate::from_ymd_opt(2024, 2, 9).unwrap();
        assert_eq!(format_long_date(d), "February 09, 2024");
    }

    #[test]
    fn popularity_formatting() {
        assert_eq!(format_popularity(9.0), "9/10");
        assert_eq!(format_popularity(7.5), "7.5/10");
    }

    #[test]
    fn logo_rasterizes() {
        let (pixels, w, h) = rasterize_logo(32).unwrap();
        assert_eq!((w, h), (32, 32));
        assert_eq!(pixels.len(), 32 * 32 * 4);
    }
}
