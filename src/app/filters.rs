//! Sidebar filter sections for each page

use super::App;
use crate::theme;
use chrono::NaiveDate;
use cultural_explorer::filters::{options, DateRange, Selection};
use cultural_explorer::types::Page;
use eframe::egui;
use tracing::debug;

/// Uppercase caption above a filter control
fn caption(ui: &mut egui::Ui, text: &str) {
    ui.add(
        egui::Label::new(
            egui::RichText::new(text)
                .color(theme::TEXT_DIM)
                .size(theme::FONT_SMALL),
        )
        .selectable(false),
    );
    ui.add_space(theme::SPACING_SM);
}

/// "All"-first dropdown. Returns true when the selection changed.
fn dropdown(ui: &mut egui::Ui, id: &str, label: &str, choices: &[String], selection: &mut Selection) -> bool {
    let mut changed = false;
    theme::section_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        caption(ui, label);
        egui::ComboBox::from_id_salt(id)
            .width(ui.available_width())
            .selected_text(selection.label())
            .show_ui(ui, |ui| {
                for choice in choices {
                    let selected = selection.label() == choice.as_str();
                    if ui.selectable_label(selected, choice.as_str()).clicked() && !selected {
                        *selection = Selection::from_label(choice);
                        changed = true;
                    }
                }
            });
    });
    ui.add_space(theme::SPACING_MD);
    changed
}

/// Start/end date pickers. Returns true when either date changed.
fn date_range(ui: &mut egui::Ui, range: &mut DateRange) -> bool {
    let mut changed = false;
    theme::section_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        caption(ui, "DATE RANGE");
        egui::Grid::new("event_date_range")
            .num_columns(2)
            .spacing([theme::SPACING_MD, theme::SPACING_SM])
            .show(ui, |ui| {
                ui.label(egui::RichText::new("From").color(theme::TEXT_MUTED));
                changed |= date_button(ui, "event_start", &mut range.start);
                ui.end_row();
                ui.label(egui::RichText::new("To").color(theme::TEXT_MUTED));
                changed |= date_button(ui, "event_end", &mut range.end);
                ui.end_row();
            });
        if range.start > range.end {
            ui.label(
                egui::RichText::new("Start date is after end date")
                    .size(theme::FONT_SMALL)
                    .color(theme::STATUS_WARNING),
            );
        }
    });
    ui.add_space(theme::SPACING_MD);
    changed
}

fn date_button(ui: &mut egui::Ui, id: &str, date: &mut NaiveDate) -> bool {
    ui.add(egui_extras::DatePickerButton::new(date).id_salt(id))
        .changed()
}

impl App {
    /// Filter controls for the current page, drawn in the sidebar
    pub(crate) fn render_filters(&mut self, ui: &mut egui::Ui) {
        match self.page {
            Page::Home => {
                ui.label(
                    egui::RichText::new("Pick a page to filter its dataset.")
                        .size(theme::FONT_SMALL)
                        .color(theme::TEXT_DIM),
                );
            }
            Page::Heritage => self.site_filters(ui),
            Page::Events => self.event_filters(ui),
            Page::Art => self.art_filters(ui),
        }
    }

    fn site_filters(&mut self, ui: &mut egui::Ui) {
        let Ok(sites) = self.heritage() else {
            return;
        };
        let countries = options(sites.iter(), |s| s.country.as_str());
        let kinds = options(sites.iter(), |s| s.kind.as_str());

        let filter = &mut self.sites.filter;
        let mut changed = dropdown(ui, "site_country", "COUNTRY", &countries, &mut filter.country);
        changed |= dropdown(ui, "site_type", "TYPE", &kinds, &mut filter.kind);

        if reset_button(ui, !filter.country.is_all() || !filter.kind.is_all()) {
            *filter = Default::default();
            changed = true;
        }
        if changed {
            debug!(filter = ?self.sites.filter, "Site filter changed");
            self.sites.invalidate();
        }
    }

    fn event_filters(&mut self, ui: &mut egui::Ui) {
        let Ok(events) = self.events() else {
            return;
        };
        let countries = options(events.iter(), |e| e.country.as_str());
        let kinds = options(events.iter(), |e| e.kind.as_str());
        let span = self.event_span;

        let filter = &mut self.events.filter;
        let mut changed = dropdown(ui, "event_country", "COUNTRY", &countries, &mut filter.country);
        changed |= dropdown(ui, "event_type", "TYPE", &kinds, &mut filter.kind);
        if let Some(range) = filter.dates.as_mut() {
            changed |= date_range(ui, range);
        }

        let narrowed = !filter.country.is_all() || !filter.kind.is_all() || filter.dates != span;
        if reset_button(ui, narrowed) {
            filter.country = Selection::All;
            filter.kind = Selection::All;
            filter.dates = span;
            changed = true;
        }
        if changed {
            debug!(filter = ?self.events.filter, "Event filter changed");
            self.events.invalidate();
        }
    }

    fn art_filters(&mut self, ui: &mut egui::Ui) {
        let Ok(art) = self.art() else {
            return;
        };
        let regions = options(art.iter(), |a| a.region.as_str());
        let categories = options(art.iter(), |a| a.category.as_str());

        let filter = &mut self.art.filter;
        let mut changed = dropdown(ui, "art_region", "REGION", &regions, &mut filter.region);
        changed |= dropdown(ui, "art_category", "CATEGORY", &categories, &mut filter.category);

        if reset_button(ui, !filter.region.is_all() || !filter.category.is_all()) {
            *filter = Default::default();
            changed = true;
        }
        if changed {
            debug!(filter = ?self.art.filter, "Art filter changed");
            self.art.invalidate();
        }
    }
}

fn reset_button(ui: &mut egui::Ui, enabled: bool) -> bool {
    ui.add_enabled(
        enabled,
        theme::button(format!("{}  Reset filters", egui_phosphor::regular::ARROW_COUNTER_CLOCKWISE)),
    )
    .clicked()
}
