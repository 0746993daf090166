//! Image fetch launched from the dashboard

use super::App;
use cultural_explorer::data::load_csv;
use cultural_explorer::fetcher::{self, FetchState, FetchStatus};
use cultural_explorer::types::{CsvRecord, ManifestRow};
use eframe::egui;
use tracing::{error, info};

impl App {
    /// Start the manifest batch on the background runtime. Progress lands in
    /// `fetch_state`; setup failures land in `fetch_error`.
    pub(crate) fn start_image_fetch(&mut self, ctx: &egui::Context) {
        self.show_fetch_modal = true;
        self.fetch_error = None;

        if self.fetch_state.lock().map(|s| s.running).unwrap_or(false) {
            return;
        }

        let manifest_path = self.datasets.data_dir().join(ManifestRow::FILE_NAME);
        let rows: Vec<ManifestRow> = match load_csv(&manifest_path) {
            Ok(rows) => rows,
            Err(e) => {
                error!(error = %e, "Failed to read image manifest");
                self.fetch_error = Some(e.to_string());
                return;
            }
        };

        if let Err(e) = fetcher::prepare_dirs(&self.assets_root) {
            error!(error = %e, "Failed to create image folders");
            self.fetch_error = Some(format!("Failed to create image folders: {}", e));
            return;
        }

        let client = match fetcher::build_client() {
            Ok(client) => client,
            Err(e) => {
                error!(error = %e, "Failed to build HTTP client");
                self.fetch_error = Some(e.to_string());
                return;
            }
        };

        if self.runtime.is_none() {
            match tokio::runtime::Runtime::new() {
                Ok(rt) => self.runtime = Some(rt),
                Err(e) => {
                    error!(error = %e, "Failed to start async runtime");
                    self.fetch_error = Some(format!("Failed to start async runtime: {}", e));
                    return;
                }
            }
        }

        let jobs = fetcher::plan(&rows, &self.assets_root);
        info!(count = jobs.len(), "Starting image fetch");

        if let Ok(mut s) = self.fetch_state.lock() {
            *s = FetchState {
                statuses: (0..jobs.len()).map(|i| (i, FetchStatus::Pending)).collect(),
                jobs: jobs.clone(),
                running: true,
                report: None,
            };
        }
        self.was_fetching = true;

        let state = self.fetch_state.clone();
        let ctx = ctx.clone();
        let Some(runtime) = &self.runtime else {
            return;
        };
        runtime.spawn(async move {
            let report = fetcher::run_batch(&client, &jobs, |idx, status| {
                if let Ok(mut s) = state.lock() {
                    s.statuses.insert(idx, status.clone());
                }
                ctx.request_repaint();
            })
            .await;

            if let Ok(mut s) = state.lock() {
                s.running = false;
                s.report = Some(report);
            }
            ctx.request_repaint();
        });
    }

    /// Called every frame; reacts once when a running batch finishes.
    pub(crate) fn poll_image_fetch(&mut self) {
        if !self.was_fetching {
            return;
        }
        let running = self.fetch_state.lock().map(|s| s.running).unwrap_or(false);
        if !running {
            self.was_fetching = false;
            self.forget_missing_images();
        }
    }
}
