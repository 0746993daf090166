//! Application constants and configuration

use std::time::Duration;

pub const APP_NAME: &str = "Cultural Data Explorer";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default folder (relative to the working directory) holding the CSV datasets
pub const DEFAULT_DATA_DIR: &str = "data";
/// Default root under which `assets/images/<category>/` lives
pub const DEFAULT_ASSETS_ROOT: &str = ".";

pub const HERITAGE_CSV: &str = "heritage_sites.csv";
pub const EVENTS_CSV: &str = "cultural_events.csv";
pub const ART_CSV: &str = "art_forms.csv";
pub const IMAGE_MANIFEST_CSV: &str = "image_urls.csv";

/// Image tree relative to the assets root
pub const IMAGES_SUBDIR: &str = "assets/images";
pub const IMAGE_EXTENSION: &str = "jpg";

pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);
pub const FETCH_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Filter dropdown entry meaning "no filter"
pub const ALL_OPTION: &str = "All";

pub const TOP_N: usize = 10;
pub const POPUP_DESCRIPTION_CHARS: usize = 100;
