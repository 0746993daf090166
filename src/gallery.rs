//! Deterministic image paths shared by the fetcher and the detail gallery

use crate::constants::{IMAGES_SUBDIR, IMAGE_EXTENSION};
use crate::types::ImageCategory;
use std::path::{Path, PathBuf};

/// Lowercase with spaces replaced by underscores
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase().replace(' ', "_")
}

/// `<assets_root>/assets/images/<folder>`
pub fn image_dir(assets_root: &Path, category: ImageCategory) -> PathBuf {
    assets_root.join(IMAGES_SUBDIR).join(category.folder())
}

/// `<assets_root>/assets/images/<folder>/<normalized-name>.jpg`
pub fn image_path(assets_root: &Path, category: ImageCategory, name: &str) -> PathBuf {
    image_dir(assets_root, category).join(format!("{}.{}", normalize_name(name), IMAGE_EXTENSION))
}

/// Result of looking up a row's image on disk
pub enum ImageLookup {
    Missing,
    Loaded(image::RgbaImage),
    Corrupt(String),
}

impl std::fmt::Debug for ImageLookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageLookup::Missing => f.write_str("Missing"),
            ImageLookup::Loaded(img) => write!(f, "Loaded({}x{})", img.width(), img.height()),
            ImageLookup::Corrupt(e) => write!(f, "Corrupt({e})"),
        }
    }
}

/// Decode the image at `path`. A missing file is not an error.
///
/// The format is sniffed from the file contents: the fetcher saves whatever
/// the server sent under a `.jpg` name.
pub fn load_image(path: &Path) -> ImageLookup {
    if !path.exists() {
        return ImageLookup::Missing;
    }
    let decoded = image::ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|e| e.to_string())
        .and_then(|reader| reader.decode().map_err(|e| e.to_string()));
    match decoded {
        Ok(img) => ImageLookup::Loaded(img.to_rgba8()),
        Err(e) => ImageLookup::Corrupt(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_is_lowercased_and_underscored() {
        let path = image_path(Path::new(""), ImageCategory::Heritage, "Great Wall of China");
        assert_eq!(path, PathBuf::from("assets/images/heritage/great_wall_of_china.jpg"));
        let path = image_path(Path::new("/srv"), ImageCategory::Events, "Día de Muertos");
        assert_eq!(path, PathBuf::from("/srv/assets/images/events/día_de_muertos.jpg"));
    }

    #[test]
    fn missing_file_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let lookup = load_image(&dir.path().join("nope.jpg"));
        assert!(matches!(lookup, ImageLookup::Missing));
    }

    #[test]
    fn garbage_file_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.jpg");
        std::fs::write(&path, b"not really a jpeg").unwrap();
        assert!(matches!(load_image(&path), ImageLookup::Corrupt(_)));
    }

    #[test]
    fn png_saved_under_jpg_name_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = image_path(dir.path(), ImageCategory::Heritage, "Great Wall of China");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        image::RgbaImage::from_pixel(2, 3, image::Rgba([10, 20, 30, 255]))
            .save_with_format(&path, image::ImageFormat::Png)
            .unwrap();
        assert_eq!(path.extension().unwrap(), "jpg");
        match load_image(&path) {
            ImageLookup::Loaded(img) => assert_eq!((img.width(), img.height()), (2, 3)),
            other => panic!("unexpected lookup: {other:?}"),
        }
    }

    #[test]
    fn real_jpeg_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("noh.jpg");
        image::RgbImage::from_pixel(4, 4, image::Rgb([200, 120, 40]))
            .save(&path)
            .unwrap();
        assert!(matches!(load_image(&path), ImageLookup::Loaded(_)));
    }
}
