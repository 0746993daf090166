//! Painted world map with pan, zoom and marker popups

use super::components::placeholder;
use crate::theme;
use cultural_explorer::geo::{LatLon, Marker, Projection};
use eframe::egui;

const MARKER_RADIUS: f32 = 5.0;
const HIT_RADIUS: f32 = 9.0;

/// View state of one map widget
#[derive(Debug, Clone)]
pub struct MapState {
    pub center: LatLon,
    pub zoom: f64,
    /// Marker whose popup stays open after a click
    pub pinned: Option<usize>,
}

impl MapState {
    pub fn new(center: LatLon, zoom: f64) -> Self {
        Self {
            center,
            zoom,
            pinned: None,
        }
    }

    /// Move to a new center after the marker set changed
    pub fn recenter(&mut self, center: LatLon) {
        self.center = center;
        self.pinned = None;
    }
}

/// Draw `markers` over a graticule; an empty slice shows a placeholder instead.
pub fn world_map(ui: &mut egui::Ui, state: &mut MapState, markers: &[Marker]) {
    if markers.is_empty() {
        placeholder(ui, theme::MAP_HEIGHT, "No locations match the current filters");
        return;
    }

    ui.horizontal(|ui| {
        if ui.add(theme::button(egui_phosphor::regular::PLUS)).on_hover_text("Zoom in").clicked() {
            state.zoom = (state.zoom * 2.0).min(Projection::MAX_ZOOM);
        }
        if ui.add(theme::button(egui_phosphor::regular::MINUS)).on_hover_text("Zoom out").clicked() {
            state.zoom = (state.zoom / 2.0).max(Projection::MIN_ZOOM);
        }
        if ui.add(theme::button(egui_phosphor::regular::ARROWS_OUT)).on_hover_text("Reset view").clicked() {
            state.zoom = Projection::MIN_ZOOM;
            state.pinned = None;
        }
    });

    let (rect, response) = ui.allocate_exact_size(
        egui::vec2(ui.available_width(), theme::MAP_HEIGHT),
        egui::Sense::click_and_drag(),
    );

    let mut projection = Projection {
        center: state.center,
        zoom: state.zoom,
        width: rect.width() as f64,
        height: rect.height() as f64,
    };

    if response.dragged() {
        let delta = response.drag_delta();
        projection.pan(delta.x as f64, delta.y as f64);
    }
    if response.hovered() {
        // Take the scroll so the page does not scroll underneath
        let scroll = ui.input_mut(|i| std::mem::take(&mut i.smooth_scroll_delta).y);
        if scroll != 0.0 {
            projection.zoom_by((scroll as f64 * 0.004).exp());
        }
    }
    state.center = projection.center;
    state.zoom = projection.zoom;

    let to_screen = |p: LatLon| {
        let (x, y) = projection.to_screen(p);
        egui::pos2(rect.left() + x as f32, rect.top() + y as f32)
    };

    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, theme::RADIUS_LARGE, theme::BG_MAP_OCEAN);

    // Graticule every 30 degrees
    for lon in (-180..=180).step_by(30) {
        let top = to_screen(LatLon::new(90.0, lon as f64));
        let bottom = to_screen(LatLon::new(-90.0, lon as f64));
        painter.line_segment([top, bottom], egui::Stroke::new(1.0, theme::MAP_GRID));
    }
    for lat in (-90..=90).step_by(30) {
        let color = if lat == 0 { theme::MAP_EQUATOR } else { theme::MAP_GRID };
        let left = to_screen(LatLon::new(lat as f64, -180.0));
        let right = to_screen(LatLon::new(lat as f64, 180.0));
        painter.line_segment([left, right], egui::Stroke::new(1.0, color));
    }

    let hover = response.hover_pos();
    let mut hovered = None;
    for (i, marker) in markers.iter().enumerate() {
        let pos = to_screen(marker.position);
        if !rect.expand(MARKER_RADIUS).contains(pos) {
            continue;
        }
        let under_pointer = hover.is_some_and(|h| h.distance(pos) <= HIT_RADIUS);
        if under_pointer {
            hovered = Some(i);
        }
        let is_hot = under_pointer || state.pinned == Some(i);
        let color = if is_hot { theme::MAP_MARKER_HOVER } else { theme::MAP_MARKER };
        painter.circle(
            pos,
            MARKER_RADIUS,
            color,
            egui::Stroke::new(theme::STROKE_MEDIUM, theme::BG_BASE),
        );
    }

    if response.clicked() {
        state.pinned = hovered;
    }

    // Pointer position while hovering, view center otherwise
    let readout = match hover {
        Some(h) => projection.to_latlon((h.x - rect.left()) as f64, (h.y - rect.top()) as f64),
        None => state.center,
    };
    painter.text(
        rect.left_bottom() + egui::vec2(theme::SPACING_MD, -theme::SPACING_MD),
        egui::Align2::LEFT_BOTTOM,
        format!("{:.2}°, {:.2}°  ×{:.1}", readout.lat, readout.lon, state.zoom),
        egui::FontId::proportional(theme::FONT_SMALL),
        theme::TEXT_DIM,
    );

    if let Some(i) = hovered {
        let marker = &markers[i];
        response.on_hover_ui_at_pointer(|ui| {
            ui.label(egui::RichText::new(&marker.label).strong());
        });
    }

    if let Some(marker) = state.pinned.and_then(|i| markers.get(i)) {
        theme::section_frame().show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(
                egui::RichText::new(format!("{}  {}", egui_phosphor::regular::MAP_PIN, marker.label))
                    .strong()
                    .color(theme::ACCENT_LIGHT),
            );
            ui.label(egui::RichText::new(&marker.popup).color(theme::TEXT_SECONDARY));
        });
    } else {
        ui.label(
            egui::RichText::new("Drag to pan, scroll to zoom, click a marker for details")
                .size(theme::FONT_SMALL)
                .color(theme::TEXT_DIM),
        );
    }
}
