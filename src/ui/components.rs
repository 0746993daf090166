//! Reusable UI components
//!
//! Standalone widgets shared by every page: headings, placeholders,
//! metric tiles and the labelled rows of a detail card.

use crate::theme;
use cultural_explorer::error::LoadError;
use eframe::egui;

/// Section heading with a Phosphor icon
pub fn section_heading(ui: &mut egui::Ui, icon: &str, text: &str) {
    ui.add(
        egui::Label::new(
            egui::RichText::new(format!("{}  {}", icon, text))
                .size(theme::FONT_TITLE)
                .color(theme::TEXT_PRIMARY)
                .strong(),
        )
        .selectable(false),
    );
    ui.add_space(theme::SPACING_SM);
}

/// Neutral "no data" box shown instead of an empty chart or map
pub fn placeholder(ui: &mut egui::Ui, height: f32, text: &str) {
    let (rect, _) = ui.allocate_exact_size(
        egui::vec2(ui.available_width(), height),
        egui::Sense::hover(),
    );
    let painter = ui.painter();
    painter.rect_filled(rect, theme::RADIUS_LARGE, theme::BG_INPUT);
    painter.rect_stroke(
        rect,
        theme::RADIUS_LARGE,
        egui::Stroke::new(theme::STROKE_DEFAULT, theme::BORDER_SUBTLE),
        egui::StrokeKind::Inside,
    );
    painter.text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        format!("{}  {}", egui_phosphor::regular::INFO, text),
        egui::FontId::proportional(theme::FONT_LABEL),
        theme::TEXT_DIM,
    );
}

/// Page body shown when the page's dataset could not be loaded.
/// Returns true when Retry was clicked.
pub fn load_error_panel(ui: &mut egui::Ui, err: &LoadError) -> bool {
    let mut retry = false;
    theme::card_frame()
        .stroke(egui::Stroke::new(theme::STROKE_MEDIUM, theme::STATUS_ERROR))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(
                egui::RichText::new(format!(
                    "{}  Could not load dataset",
                    egui_phosphor::regular::WARNING
                ))
                .size(theme::FONT_HEADING)
                .color(theme::STATUS_ERROR),
            );
            ui.add_space(theme::SPACING_SM);
            ui.label(egui::RichText::new(err.to_string()).color(theme::TEXT_SECONDARY));
            ui.label(
                egui::RichText::new("Check the data folder in Settings, then retry.")
                    .size(theme::FONT_SMALL)
                    .color(theme::TEXT_DIM),
            );
            ui.add_space(theme::SPACING_MD);
            retry = ui
                .add(theme::button(format!("{}  Retry", egui_phosphor::regular::ARROW_CLOCKWISE)))
                .clicked();
        });
    retry
}

/// Big-number tile for the quick statistics row
pub fn metric(ui: &mut egui::Ui, label: &str, value: usize) {
    theme::card_frame().show(ui, |ui| {
        ui.set_min_width(ui.available_width());
        ui.label(
            egui::RichText::new(label)
                .size(theme::FONT_SMALL)
                .color(theme::TEXT_MUTED),
        );
        ui.label(
            egui::RichText::new(value.to_string())
                .size(theme::FONT_DISPLAY)
                .color(theme::TEXT_PRIMARY)
                .strong(),
        );
    });
}

/// "**Label:** value" row inside a detail card
pub fn field(ui: &mut egui::Ui, label: &str, value: &str) {
    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing.x = 4.0;
        ui.label(
            egui::RichText::new(format!("{}:", label))
                .strong()
                .color(theme::TEXT_PRIMARY),
        );
        ui.label(egui::RichText::new(value).color(theme::TEXT_SECONDARY));
    });
}

/// Muted count line under a page title, e.g. "12 of 40 sites"
pub fn result_count(ui: &mut egui::Ui, shown: usize, total: usize, noun: &str) {
    ui.label(
        egui::RichText::new(format!("{} of {} {}", shown, total, noun))
            .size(theme::FONT_SMALL)
            .color(theme::TEXT_DIM),
    );
}
