//! Settings and image fetch modals

use super::App;
use crate::theme;
use cultural_explorer::fetcher::FetchStatus;
use eframe::egui;
use egui_phosphor::regular as icons;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Accent-colored group label inside a modal
fn group_label(ui: &mut egui::Ui, text: &str) {
    ui.add(egui::Label::new(egui::RichText::new(text).size(theme::FONT_LABEL).color(theme::ACCENT)).selectable(false));
    ui.add_space(2.0);
}

fn group_separator(ui: &mut egui::Ui) {
    ui.add_space(theme::SPACING_MD);
    ui.separator();
    ui.add_space(theme::SPACING_SM);
}

/// Read-only path with a folder picker button. Returns the newly picked folder.
fn folder_row(ui: &mut egui::Ui, current: &Path) -> Option<PathBuf> {
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 4.0;
        egui::Frame::new()
            .fill(theme::BG_INPUT)
            .stroke(egui::Stroke::new(theme::STROKE_DEFAULT, theme::BORDER_SUBTLE))
            .corner_radius(theme::RADIUS_DEFAULT)
            .inner_margin(egui::Margin::symmetric(6, 4))
            .show(ui, |ui| {
                ui.set_width(ui.available_width() - 40.0);
                ui.add(
                    egui::Label::new(
                        egui::RichText::new(current.display().to_string())
                            .size(theme::FONT_LABEL)
                            .color(theme::TEXT_SECONDARY),
                    )
                    .truncate(),
                );
            });
        let browse = ui
            .add(theme::button(icons::FOLDER_OPEN))
            .on_hover_text("Choose folder");
        if !browse.clicked() {
            return None;
        }
        let mut dialog = rfd::FileDialog::new();
        if current.is_dir() {
            dialog = dialog.set_directory(current);
        }
        dialog.pick_folder()
    })
    .inner
}

impl App {
    pub(crate) fn render_settings_modal(&mut self, ctx: &egui::Context) {
        if !self.show_settings {
            return;
        }

        let modal_response = egui::Modal::new(egui::Id::new("settings_modal"))
            .backdrop_color(egui::Color32::from_black_alpha(120))
            .frame(theme::modal_frame())
            .show(ctx, |ui| {
                ui.set_width(360.0);

                ui.horizontal(|ui| {
                    ui.add(egui::Label::new(egui::RichText::new("Settings").size(theme::FONT_HEADING).strong()).selectable(false));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.add(theme::button(icons::X)).clicked() {
                            self.show_settings = false;
                        }
                    });
                });
                ui.add_space(4.0);
                ui.separator();
                ui.add_space(theme::SPACING_SM);

                // Data folder
                group_label(ui, "Data Folder");
                ui.label(
                    egui::RichText::new("Folder holding the dataset CSV files")
                        .size(theme::FONT_SMALL)
                        .color(theme::TEXT_DIM),
                );
                if let Some(dir) = folder_row(ui, self.datasets.data_dir()) {
                    self.set_data_dir(dir);
                }

                group_separator(ui);

                // Assets folder
                group_label(ui, "Image Folder");
                ui.label(
                    egui::RichText::new("Root that contains assets/images/")
                        .size(theme::FONT_SMALL)
                        .color(theme::TEXT_DIM),
                );
                if let Some(dir) = folder_row(ui, &self.assets_root) {
                    self.set_assets_root(dir);
                }

                group_separator(ui);

                // Images
                group_label(ui, "Images");
                ui.horizontal(|ui| {
                    if ui
                        .add(theme::button_accent(format!("{}  Fetch Images", icons::DOWNLOAD_SIMPLE)))
                        .clicked()
                    {
                        self.show_settings = false;
                        self.start_image_fetch(ui.ctx());
                    }
                    if ui
                        .add(theme::button(format!("{}  Reload", icons::ARROW_CLOCKWISE)))
                        .on_hover_text("Re-read every gallery image from disk")
                        .clicked()
                    {
                        self.image_cache.clear();
                    }
                });

                group_separator(ui);

                // Logs
                group_label(ui, "Logs");
                if ui
                    .add(theme::button(format!("{}  Open Logs Folder", icons::FOLDER_OPEN)))
                    .clicked()
                {
                    let logs = self.app_data_dir.join("logs");
                    if let Err(e) = open::that(&logs) {
                        warn!(path = %logs.display(), error = %e, "Failed to open logs folder");
                    }
                }
            });

        if modal_response.should_close() {
            self.show_settings = false;
        }
    }

    pub(crate) fn render_fetch_modal(&mut self, ctx: &egui::Context) {
        if !self.show_fetch_modal {
            return;
        }

        // Snapshot so the lock is not held while drawing
        let (names, statuses, finished, running, report) = match self.fetch_state.lock() {
            Ok(state) => (
                state.jobs.iter().map(|j| j.name.clone()).collect::<Vec<_>>(),
                (0..state.jobs.len())
                    .map(|i| state.statuses.get(&i).cloned().unwrap_or(FetchStatus::Pending))
                    .collect::<Vec<_>>(),
                state.finished_count(),
                state.running,
                state.report.clone(),
            ),
            Err(_) => return,
        };
        let total = names.len();

        let modal_response = egui::Modal::new(egui::Id::new("fetch_modal"))
            .backdrop_color(egui::Color32::from_black_alpha(180))
            .frame(theme::modal_frame())
            .show(ctx, |ui| {
                ui.set_width(420.0);

                ui.horizontal(|ui| {
                    ui.colored_label(theme::ACCENT, icons::DOWNLOAD_SIMPLE);
                    ui.strong(if running {
                        format!("Fetching {} images", total)
                    } else {
                        "Image fetch".to_string()
                    });
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(format!("{}/{}", finished, total));
                    });
                });
                ui.add_space(theme::SPACING_SM);

                if let Some(err) = &self.fetch_error {
                    ui.colored_label(theme::STATUS_ERROR, format!("{}  {}", icons::WARNING, err));
                } else {
                    let progress = if total > 0 { finished as f32 / total as f32 } else { 1.0 };
                    ui.add(egui::ProgressBar::new(progress).fill(theme::ACCENT).animate(running));
                }

                if let Some(report) = &report {
                    ui.add_space(theme::SPACING_SM);
                    ui.horizontal(|ui| {
                        ui.colored_label(theme::STATUS_SUCCESS, icons::CHECK);
                        ui.label(format!("{} downloaded", report.downloaded));
                        ui.add_space(theme::SPACING_MD);
                        ui.colored_label(theme::TEXT_DIM, icons::FAST_FORWARD);
                        ui.label(format!("{} skipped", report.skipped));
                        ui.add_space(theme::SPACING_MD);
                        ui.colored_label(theme::STATUS_ERROR, icons::X_CIRCLE);
                        ui.label(format!("{} failed", report.failed.len()));
                    });
                }

                ui.add_space(theme::SPACING_SM);
                ui.separator();
                ui.add_space(theme::SPACING_SM);

                egui::ScrollArea::vertical()
                    .max_height(220.0)
                    .auto_shrink([false, true])
                    .show(ui, |ui| {
                        for (name, status) in names.iter().zip(&statuses) {
                            let (icon, color) = match status {
                                FetchStatus::Pending => (icons::CLOCK, theme::TEXT_DIM),
                                FetchStatus::Downloading => (icons::DOWNLOAD_SIMPLE, theme::STATUS_INFO),
                                FetchStatus::Complete => (icons::CHECK, theme::STATUS_SUCCESS),
                                FetchStatus::Skipped => (icons::FAST_FORWARD, theme::TEXT_DIM),
                                FetchStatus::Failed(_) => (icons::X_CIRCLE, theme::STATUS_ERROR),
                            };
                            ui.horizontal(|ui| {
                                ui.colored_label(color, icon);
                                ui.label(name.as_str());
                                if let FetchStatus::Failed(err) = status {
                                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                        ui.colored_label(theme::TEXT_DIM, err.as_str());
                                    });
                                }
                            });
                        }
                    });

                ui.add_space(theme::SPACING_SM);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if !running && ui.add(theme::button(format!("{}  Close", icons::X))).clicked() {
                        self.show_fetch_modal = false;
                    }
                });
            });

        if modal_response.should_close() && !running {
            self.show_fetch_modal = false;
        }
    }
}
