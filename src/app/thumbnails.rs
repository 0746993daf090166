//! Gallery image loading and the per-session texture cache

use super::App;
use cultural_explorer::gallery::{self, ImageLookup};
use eframe::egui;
use std::path::Path;
use tracing::{debug, warn};

/// What a detail card shows in its image slot
#[derive(Clone)]
pub(crate) enum GalleryImage {
    Missing,
    Texture(egui::TextureHandle),
    Error(String),
}

impl App {
    /// Decode and upload the image at `path` once per session.
    pub(crate) fn gallery_image(&mut self, ctx: &egui::Context, path: &Path) -> GalleryImage {
        if let Some(cached) = self.image_cache.get(path) {
            return cached.clone();
        }

        let image = match gallery::load_image(path) {
            ImageLookup::Missing => GalleryImage::Missing,
            ImageLookup::Loaded(rgba) => {
                let size = [rgba.width() as usize, rgba.height() as usize];
                let pixels = rgba.into_raw();
                debug!(path = %path.display(), "Loaded gallery image");
                GalleryImage::Texture(ctx.load_texture(
                    path.to_string_lossy(),
                    egui::ColorImage::from_rgba_unmultiplied(size, &pixels),
                    egui::TextureOptions::LINEAR,
                ))
            }
            ImageLookup::Corrupt(e) => {
                warn!(path = %path.display(), error = %e, "Failed to decode gallery image");
                GalleryImage::Error(e)
            }
        };
        self.image_cache.insert(path.to_path_buf(), image.clone());
        image
    }

    /// Drop cached "no image" entries so newly fetched files get picked up.
    pub(crate) fn forget_missing_images(&mut self) {
        let before = self.image_cache.len();
        self.image_cache
            .retain(|_, image| !matches!(image, GalleryImage::Missing));
        debug!(
            dropped = before - self.image_cache.len(),
            "Cleared missing gallery images"
        );
    }
}
