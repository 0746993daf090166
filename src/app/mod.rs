//! App module - contains the main application state and logic

mod downloads;
mod filters;
mod modals;
mod thumbnails;
mod views;

use crate::theme;
use crate::ui::map::MapState;
use cultural_explorer::data::Datasets;
use cultural_explorer::error::LoadError;
use cultural_explorer::fetcher::FetchState;
use cultural_explorer::filters::{self as row_filters, ArtFilter, DateRange, EventFilter, SiteFilter};
use cultural_explorer::geo::{self, LatLon};
use cultural_explorer::settings::Settings;
use cultural_explorer::types::*;
use eframe::egui;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use thumbnails::GalleryImage;
use tracing::{debug, error, info};

// ============================================================================
// PAGE STATE
// ============================================================================

/// Filter selection of one page plus the row indices it last produced.
/// `hits` is cleared whenever the selection changes.
pub(crate) struct PageFilter<F> {
    pub(crate) filter: F,
    pub(crate) hits: Option<Vec<usize>>,
}

impl<F: Default> Default for PageFilter<F> {
    fn default() -> Self {
        Self {
            filter: F::default(),
            hits: None,
        }
    }
}

impl<F> PageFilter<F> {
    pub(crate) fn invalidate(&mut self) {
        self.hits = None;
    }
}

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    pub(crate) datasets: Datasets,
    /// Last error per dataset path; the page shows it until Retry
    pub(crate) load_errors: HashMap<PathBuf, LoadError>,
    pub(crate) assets_root: PathBuf,
    pub(crate) page: Page,
    pub(crate) logo_texture: Option<egui::TextureHandle>,
    // Filters
    pub(crate) sites: PageFilter<SiteFilter>,
    pub(crate) events: PageFilter<EventFilter>,
    pub(crate) art: PageFilter<ArtFilter>,
    /// Full span of the loaded events, the date pickers' reset value
    pub(crate) event_span: Option<DateRange>,
    // Maps
    pub(crate) home_map: MapState,
    pub(crate) site_map: MapState,
    // Gallery images, keyed by file path
    pub(crate) image_cache: HashMap<PathBuf, GalleryImage>,
    // Image fetch
    pub(crate) fetch_state: Arc<Mutex<FetchState>>,
    pub(crate) fetch_error: Option<String>,
    pub(crate) was_fetching: bool,
    pub(crate) runtime: Option<tokio::runtime::Runtime>,
    // Modals
    pub(crate) show_settings: bool,
    pub(crate) show_fetch_modal: bool,
    // Settings
    pub(crate) window_pos: Option<egui::Pos2>,
    pub(crate) window_size: Option<egui::Vec2>,
    pub(crate) needs_center: bool,
    pub(crate) app_data_dir: PathBuf,
}

// ============================================================================
// APP INITIALIZATION & HELPERS
// ============================================================================

impl App {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: Settings, app_data_dir: PathBuf) -> Self {
        // Force dark theme
        cc.egui_ctx.set_theme(egui::Theme::Dark);

        // Add Phosphor icons font
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        // Apply theme from theme.rs
        theme::apply_visuals(&cc.egui_ctx);

        let data_dir = settings.data_dir_or_default();
        let assets_root = settings.assets_root_or_default();
        info!(
            data_dir = %data_dir.display(),
            assets_root = %assets_root.display(),
            "Using dataset and image folders"
        );

        Self {
            datasets: Datasets::new(data_dir),
            load_errors: HashMap::new(),
            assets_root,
            page: settings.last_page,
            logo_texture: None,
            sites: PageFilter::default(),
            events: PageFilter::default(),
            art: PageFilter::default(),
            event_span: None,
            home_map: MapState::new(LatLon::WORLD_VIEW, 1.0),
            site_map: MapState::new(LatLon::WORLD_VIEW, 2.0),
            image_cache: HashMap::new(),
            fetch_state: Arc::new(Mutex::new(FetchState::default())),
            fetch_error: None,
            was_fetching: false,
            runtime: None,
            show_settings: false,
            show_fetch_modal: false,
            window_pos: None,
            window_size: None,
            needs_center: false,
            app_data_dir,
        }
    }

    pub fn save_settings(&self) {
        let settings = Settings {
            window_x: self.window_pos.map(|p| p.x),
            window_y: self.window_pos.map(|p| p.y),
            window_w: self.window_size.map(|s| s.x),
            window_h: self.window_size.map(|s| s.y),
            data_dir: Some(self.datasets.data_dir().to_string_lossy().to_string()),
            assets_root: Some(self.assets_root.to_string_lossy().to_string()),
            last_page: self.page,
        };
        settings.save(&self.app_data_dir);
    }

    // ------------------------------------------------------------------------
    // Dataset access
    // ------------------------------------------------------------------------

    /// Load through the cache, remembering a failure until [`App::retry_loads`].
    fn load<T: CsvRecord>(
        &mut self,
        get: fn(&mut Datasets) -> Result<Arc<Vec<T>>, LoadError>,
    ) -> Result<Arc<Vec<T>>, LoadError> {
        let path = self.datasets.path_of::<T>();
        if let Some(err) = self.load_errors.get(&path) {
            return Err(err.clone());
        }
        get(&mut self.datasets).map_err(|e| {
            error!(error = %e, "Dataset failed to load");
            self.load_errors.insert(path, e.clone());
            e
        })
    }

    pub(crate) fn heritage(&mut self) -> Result<Arc<Vec<HeritageSite>>, LoadError> {
        self.load(Datasets::heritage)
    }

    /// Events, with the date filter initialised to their full span on first load.
    pub(crate) fn events(&mut self) -> Result<Arc<Vec<CulturalEvent>>, LoadError> {
        let events = self.load(Datasets::events)?;
        if self.event_span.is_none() {
            self.event_span = DateRange::spanning(&events);
            self.events.filter.dates = self.event_span;
            self.events.invalidate();
        }
        Ok(events)
    }

    pub(crate) fn art(&mut self) -> Result<Arc<Vec<ArtForm>>, LoadError> {
        self.load(Datasets::art)
    }

    pub(crate) fn retry_loads(&mut self) {
        debug!(count = self.load_errors.len(), "Retrying failed dataset loads");
        self.load_errors.clear();
    }

    /// Switch to another data folder and start over with every page.
    pub(crate) fn set_data_dir(&mut self, dir: PathBuf) {
        info!(path = %dir.display(), "Data folder changed");
        self.datasets.set_data_dir(dir);
        self.load_errors.clear();
        self.sites = PageFilter::default();
        self.events = PageFilter::default();
        self.art = PageFilter::default();
        self.event_span = None;
        self.save_settings();
    }

    pub(crate) fn set_assets_root(&mut self, dir: PathBuf) {
        info!(path = %dir.display(), "Assets folder changed");
        self.assets_root = dir;
        self.image_cache.clear();
        self.save_settings();
    }

    // ------------------------------------------------------------------------
    // Filtered subsets
    // ------------------------------------------------------------------------

    /// Rows of `sites` matching the site filter. Recenters the site map when
    /// the subset changes.
    pub(crate) fn site_hits(&mut self, sites: &[HeritageSite]) -> Vec<usize> {
        if let Some(hits) = &self.sites.hits {
            return hits.clone();
        }
        let hits = row_filters::apply(sites, &self.sites.filter);
        debug!(shown = hits.len(), total = sites.len(), "Site filter applied");
        let center = geo::center(
            hits.iter()
                .map(|&i| LatLon::new(sites[i].latitude, sites[i].longitude)),
        );
        if let Some(center) = center {
            self.site_map.recenter(center);
        }
        self.sites.hits = Some(hits.clone());
        hits
    }

    pub(crate) fn event_hits(&mut self, events: &[CulturalEvent]) -> Vec<usize> {
        if let Some(hits) = &self.events.hits {
            return hits.clone();
        }
        let hits = row_filters::apply(events, &self.events.filter);
        debug!(shown = hits.len(), total = events.len(), "Event filter applied");
        self.events.hits = Some(hits.clone());
        hits
    }

    pub(crate) fn art_hits(&mut self, art: &[ArtForm]) -> Vec<usize> {
        if let Some(hits) = &self.art.hits {
            return hits.clone();
        }
        let hits = row_filters::apply(art, &self.art.filter);
        debug!(shown = hits.len(), total = art.len(), "Art filter applied");
        self.art.hits = Some(hits.clone());
        hits
    }
}
