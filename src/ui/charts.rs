//! Chart widgets: painted pie, plus bar and timeline charts on egui_plot

use super::components::placeholder;
use crate::theme;
use chrono::{Datelike, NaiveDate};
use cultural_explorer::summary::{self, TimelineSpan};
use eframe::egui;
use egui_plot::{uniform_grid_spacer, Bar, BarChart, Legend, Plot};
use std::f32::consts::{FRAC_PI_2, TAU};

const EMPTY_TEXT: &str = "No data for the current filters";
const LEGEND_ROW: f32 = 18.0;

/// Chart title above the plot area
pub fn chart_title(ui: &mut egui::Ui, title: &str) {
    ui.label(
        egui::RichText::new(title)
            .size(theme::FONT_HEADING)
            .color(theme::TEXT_SECONDARY),
    );
}

/// Proportion chart for (label, count) pairs, with a legend on the right.
pub fn pie_chart(ui: &mut egui::Ui, counts: &[(String, usize)]) {
    let shares = summary::proportions(counts);
    if shares.is_empty() {
        placeholder(ui, theme::CHART_HEIGHT, EMPTY_TEXT);
        return;
    }

    let (rect, response) = ui.allocate_exact_size(
        egui::vec2(ui.available_width(), theme::CHART_HEIGHT),
        egui::Sense::hover(),
    );
    let painter = ui.painter_at(rect);
    let radius = (rect.height() / 2.0 - theme::SPACING_MD).min(rect.width() * 0.3);
    let center = egui::pos2(rect.left() + radius + theme::SPACING_MD, rect.center().y);

    let hover_angle = response.hover_pos().and_then(|p| {
        let d = p - center;
        (d.length() <= radius).then(|| (d.y.atan2(d.x) + FRAC_PI_2).rem_euclid(TAU))
    });

    let mut hovered = None;
    let mut start = 0.0_f32;
    for (i, (label, share)) in shares.iter().enumerate() {
        let sweep = *share as f32 * TAU;
        let mut slice_radius = radius;
        if let Some(a) = hover_angle {
            if a >= start && a < start + sweep {
                hovered = Some(i);
                slice_radius += 4.0;
            }
        }
        paint_slice(&painter, center, slice_radius, start, sweep, theme::label_color(label));
        start += sweep;
    }

    // Slice separators
    if shares.len() > 1 {
        let mut angle = 0.0_f32;
        for (_, share) in &shares {
            let edge = center + polar(angle) * radius;
            painter.line_segment([center, edge], egui::Stroke::new(1.5, theme::BG_BASE));
            angle += *share as f32 * TAU;
        }
    }

    // Legend
    let legend_left = center.x + radius + theme::SPACING_XL;
    let max_rows = ((rect.height() - theme::SPACING_MD) / LEGEND_ROW).floor().max(1.0) as usize;
    let overflow = shares.len() > max_rows;
    let shown = if overflow { max_rows - 1 } else { shares.len() };
    let mut y = rect.top() + theme::SPACING_MD;
    for (label, share) in shares.iter().take(shown) {
        let swatch = egui::Rect::from_min_size(egui::pos2(legend_left, y + 3.0), egui::vec2(10.0, 10.0));
        painter.rect_filled(swatch, 2.0, theme::label_color(label));
        painter.text(
            egui::pos2(swatch.right() + 6.0, swatch.center().y),
            egui::Align2::LEFT_CENTER,
            format!("{}  {:.1}%", label, share * 100.0),
            egui::FontId::proportional(theme::FONT_LABEL),
            theme::TEXT_SECONDARY,
        );
        y += LEGEND_ROW;
    }
    if overflow {
        painter.text(
            egui::pos2(legend_left, y + 8.0),
            egui::Align2::LEFT_CENTER,
            format!("+{} more", shares.len() - shown),
            egui::FontId::proportional(theme::FONT_SMALL),
            theme::TEXT_DIM,
        );
    }

    if let Some(i) = hovered {
        let (label, count) = &counts[i];
        let share = shares[i].1;
        response.on_hover_ui_at_pointer(|ui| {
            ui.label(egui::RichText::new(label).strong());
            ui.label(format!("{} ({:.1}%)", count, share * 100.0));
        });
    }
}

fn polar(angle: f32) -> egui::Vec2 {
    // Angle 0 points up, increasing clockwise
    let a = angle - FRAC_PI_2;
    egui::vec2(a.cos(), a.sin())
}

/// Fill one slice as a fan of convex pieces no wider than a quarter turn.
fn paint_slice(painter: &egui::Painter, center: egui::Pos2, radius: f32, start: f32, sweep: f32, color: egui::Color32) {
    let pieces = (sweep / FRAC_PI_2).ceil().max(1.0) as usize;
    let piece = sweep / pieces as f32;
    for p in 0..pieces {
        let from = start + piece * p as f32;
        let steps = 16;
        let mut points = Vec::with_capacity(steps + 2);
        points.push(center);
        for s in 0..=steps {
            let a = from + piece * s as f32 / steps as f32;
            points.push(center + polar(a) * radius);
        }
        painter.add(egui::Shape::convex_polygon(points, color, egui::Stroke::NONE));
    }
}

/// Vertical bars for (label, value) pairs; each bar colored by its label.
pub fn bar_chart(ui: &mut egui::Ui, id: &str, values: &[(String, f64)]) {
    if values.is_empty() {
        placeholder(ui, theme::CHART_HEIGHT, EMPTY_TEXT);
        return;
    }

    let bars: Vec<Bar> = values
        .iter()
        .enumerate()
        .map(|(i, (label, value))| {
            Bar::new(i as f64, *value)
                .name(label)
                .width(0.7)
                .fill(theme::label_color(label))
        })
        .collect();

    let chart = BarChart::new(bars)
        .element_formatter(Box::new(|bar: &Bar, _: &BarChart| format!("{}: {:.2}", bar.name, bar.value)));
    let labels = values.iter().map(|(l, _)| l.clone()).collect();
    show_categorical(ui, id, labels, false, |plot_ui| plot_ui.bar_chart(chart));
}

/// Integer counts as bars, e.g. the top countries ranking.
pub fn count_chart(ui: &mut egui::Ui, id: &str, counts: &[(String, usize)]) {
    let values: Vec<(String, f64)> = counts.iter().map(|(l, n)| (l.clone(), *n as f64)).collect();
    bar_chart(ui, id, &values);
}

/// Bars for named items, each colored by a group label (one legend entry per group).
pub fn grouped_bar_chart(ui: &mut egui::Ui, id: &str, items: &[(String, String, f64)]) {
    if items.is_empty() {
        placeholder(ui, theme::CHART_HEIGHT, EMPTY_TEXT);
        return;
    }

    let mut groups: Vec<&str> = items.iter().map(|(_, g, _)| g.as_str()).collect();
    groups.sort_unstable();
    groups.dedup();

    let charts: Vec<BarChart> = groups
        .iter()
        .map(|group| {
            let bars: Vec<Bar> = items
                .iter()
                .enumerate()
                .filter(|(_, (_, g, _))| g.as_str() == *group)
                .map(|(i, (name, _, value))| Bar::new(i as f64, *value).name(name).width(0.7))
                .collect();
            BarChart::new(bars)
                .name(*group)
                .color(theme::label_color(group))
                .element_formatter(Box::new(|bar: &Bar, _: &BarChart| format!("{}: {}", bar.name, bar.value)))
        })
        .collect();

    let labels = items.iter().map(|(n, _, _)| n.clone()).collect();
    show_categorical(ui, id, labels, true, |plot_ui| {
        for chart in charts {
            plot_ui.bar_chart(chart);
        }
    });
}

/// Bar plot whose x axis shows `labels[i]` at integer position `i`.
fn show_categorical(
    ui: &mut egui::Ui,
    id: &str,
    labels: Vec<String>,
    legend: bool,
    add: impl FnOnce(&mut egui_plot::PlotUi),
) {
    let mut plot = Plot::new(id.to_string())
        .height(theme::CHART_HEIGHT)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .include_y(0.0)
        .x_grid_spacer(uniform_grid_spacer(|_| [1.0, 5.0, 10.0]))
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
                return String::new();
            }
            labels.get(idx as usize).cloned().unwrap_or_default()
        });
    if legend {
        plot = plot.legend(Legend::default());
    }
    plot.show(ui, add);
}

/// Horizontal span per event from start to end date, colored by event type.
pub fn timeline_chart(ui: &mut egui::Ui, id: &str, spans: &[TimelineSpan]) {
    if spans.is_empty() {
        placeholder(ui, theme::CHART_HEIGHT, EMPTY_TEXT);
        return;
    }

    let mut kinds: Vec<&str> = spans.iter().map(|s| s.kind.as_str()).collect();
    kinds.sort_unstable();
    kinds.dedup();

    let charts: Vec<BarChart> = kinds
        .iter()
        .map(|kind| {
            let bars: Vec<Bar> = spans
                .iter()
                .enumerate()
                .filter(|(_, s)| s.kind == *kind)
                .map(|(row, s)| {
                    Bar::new(row as f64, s.days() as f64)
                        .base_offset(s.start.num_days_from_ce() as f64)
                        .width(0.6)
                        .name(&s.name)
                })
                .collect();
            BarChart::new(bars)
                .name(*kind)
                .color(theme::label_color(kind))
                .horizontal()
                .element_formatter(Box::new(|bar: &Bar, _: &BarChart| {
                    let start = bar.base_offset.unwrap_or(0.0);
                    format!("{}\n{} - {}", bar.name, day_label(start, "%b %d, %Y"), day_label(start + bar.value - 1.0, "%b %d, %Y"))
                }))
        })
        .collect();

    let names: Vec<String> = spans.iter().map(|s| s.name.clone()).collect();
    let height = (spans.len() as f32 * 24.0).max(theme::CHART_HEIGHT);

    Plot::new(id.to_string())
        .height(height)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .legend(Legend::default())
        .y_grid_spacer(uniform_grid_spacer(|_| [1.0, 5.0, 10.0]))
        .x_axis_formatter(|mark, _range| day_label(mark.value, "%b %Y"))
        .y_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
                return String::new();
            }
            names.get(idx as usize).cloned().unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
        });
}

fn day_label(days_from_ce: f64, fmt: &str) -> String {
    NaiveDate::from_num_days_from_ce_opt(days_from_ce.round() as i32)
        .map(|d| d.format(fmt).to_string())
        .unwrap_or_default()
}
