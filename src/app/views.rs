//! Page bodies: home overview and the three dataset pages

use super::thumbnails::GalleryImage;
use super::App;
use crate::theme;
use crate::ui::charts;
use crate::ui::components::{field, load_error_panel, metric, placeholder, result_count, section_heading};
use crate::ui::map::world_map;
use cultural_explorer::constants::TOP_N;
use cultural_explorer::error::LoadError;
use cultural_explorer::gallery;
use cultural_explorer::geo;
use cultural_explorer::summary;
use cultural_explorer::types::*;
use cultural_explorer::utils::{format_long_date, format_popularity};
use eframe::egui;
use egui_phosphor::regular as icons;
use tracing::warn;

const IMAGE_SLOT_HEIGHT: f32 = 160.0;

fn page_title(ui: &mut egui::Ui, title: &str) {
    ui.add(
        egui::Label::new(
            egui::RichText::new(title)
                .size(theme::FONT_DISPLAY)
                .color(theme::TEXT_PRIMARY)
                .strong(),
        )
        .selectable(false),
    );
    ui.add_space(theme::SPACING_SM);
}

/// Two charts side by side
fn chart_pair(ui: &mut egui::Ui, left: impl FnOnce(&mut egui::Ui), right: impl FnOnce(&mut egui::Ui)) {
    ui.columns(2, |cols| {
        theme::section_frame().show(&mut cols[0], left);
        theme::section_frame().show(&mut cols[1], right);
    });
    ui.add_space(theme::SPACING_LG);
}

impl App {
    /// Draw the current page into the central panel
    pub(crate) fn render_page(&mut self, ui: &mut egui::Ui) {
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| match self.page {
                Page::Home => self.home_page(ui),
                Page::Heritage => self.heritage_page(ui),
                Page::Events => self.events_page(ui),
                Page::Art => self.art_page(ui),
            });
    }

    fn show_load_error(&mut self, ui: &mut egui::Ui, err: &LoadError) {
        if load_error_panel(ui, err) {
            self.retry_loads();
        }
    }

    // ------------------------------------------------------------------------
    // Home
    // ------------------------------------------------------------------------

    fn home_page(&mut self, ui: &mut egui::Ui) {
        page_title(ui, Page::Home.title());
        ui.label(
            egui::RichText::new(
                "Explore heritage sites, cultural events and traditional art forms from \
                 around the world. Use the sidebar to open a dataset and narrow it down.",
            )
            .color(theme::TEXT_SECONDARY),
        );
        ui.add_space(theme::SPACING_XL);

        let sites = match self.heritage() {
            Ok(rows) => rows,
            Err(e) => return self.show_load_error(ui, &e),
        };
        let events = match self.events() {
            Ok(rows) => rows,
            Err(e) => return self.show_load_error(ui, &e),
        };
        let art = match self.art() {
            Ok(rows) => rows,
            Err(e) => return self.show_load_error(ui, &e),
        };

        section_heading(ui, icons::GLOBE_HEMISPHERE_WEST, "Explore Heritage Sites Around the World");
        let markers = geo::overview_markers(sites.iter());
        world_map(ui, &mut self.home_map, &markers);
        ui.add_space(theme::SPACING_XL);

        section_heading(ui, icons::CHART_BAR, "Quick Statistics");
        ui.columns(3, |cols| {
            metric(&mut cols[0], "Heritage Sites", sites.len());
            metric(&mut cols[1], "Cultural Events", events.len());
            metric(&mut cols[2], "Art Forms", art.len());
        });
        ui.add_space(theme::SPACING_XL);

        theme::section_frame().show(ui, |ui| {
            charts::chart_title(ui, "Heritage Sites by Type");
            charts::pie_chart(ui, &summary::value_counts(sites.iter(), |s| s.kind.as_str()));
        });
        ui.add_space(theme::SPACING_XL);

        section_heading(ui, icons::SPARKLE, "Featured Sections");
        let featured = [
            (
                Page::Heritage,
                icons::BANK,
                "Discover UNESCO World Heritage sites and their history.",
            ),
            (
                Page::Events,
                icons::CALENDAR,
                "Browse festivals and celebrations across the year.",
            ),
            (
                Page::Art,
                icons::PALETTE,
                "Learn about traditional art forms and their popularity.",
            ),
        ];
        let mut target = None;
        ui.columns(featured.len(), |cols| {
            for (col, (page, icon, blurb)) in cols.iter_mut().zip(featured) {
                theme::card_frame().show(col, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.label(
                        egui::RichText::new(format!("{}  {}", icon, page.title()))
                            .size(theme::FONT_HEADING)
                            .color(theme::ACCENT_LIGHT),
                    );
                    ui.add_space(theme::SPACING_SM);
                    ui.label(egui::RichText::new(blurb).color(theme::TEXT_SECONDARY));
                    ui.add_space(theme::SPACING_MD);
                    if ui.add(theme::button_accent("Explore")).clicked() {
                        target = Some(page);
                    }
                });
            }
        });
        if let Some(page) = target {
            self.page = page;
        }
    }

    // ------------------------------------------------------------------------
    // Heritage sites
    // ------------------------------------------------------------------------

    fn heritage_page(&mut self, ui: &mut egui::Ui) {
        page_title(ui, Page::Heritage.title());
        let sites = match self.heritage() {
            Ok(rows) => rows,
            Err(e) => return self.show_load_error(ui, &e),
        };
        let hits = self.site_hits(&sites);
        result_count(ui, hits.len(), sites.len(), "sites");
        ui.add_space(theme::SPACING_LG);

        section_heading(ui, icons::MAP_TRIFOLD, "Heritage Sites Map");
        let markers = geo::site_markers(hits.iter().map(|&i| &sites[i]));
        world_map(ui, &mut self.site_map, &markers);
        ui.add_space(theme::SPACING_XL);

        let rows: &[HeritageSite] = &sites;
        let subset = || hits.iter().map(move |&i| &rows[i]);
        chart_pair(
            ui,
            |ui| {
                charts::chart_title(ui, "Heritage Sites by Type");
                charts::pie_chart(ui, &summary::value_counts(subset(), |s| s.kind.as_str()));
            },
            |ui| {
                charts::chart_title(ui, "Top 10 Countries by Number of Sites");
                charts::count_chart(
                    ui,
                    "site_countries",
                    &summary::top_n(subset(), |s| s.country.as_str(), TOP_N),
                );
            },
        );

        section_heading(ui, icons::LIST_BULLETS, "Detailed Information");
        if hits.is_empty() {
            placeholder(ui, IMAGE_SLOT_HEIGHT, "No heritage sites match the current filters");
            return;
        }
        for &i in &hits {
            let site = &sites[i];
            self.detail_card(ui, i, site, |ui| {
                field(ui, "Type", &site.kind);
                field(ui, "Location", &site.location);
                field(ui, "Year Established", &site.year);
                field(ui, "Description", &site.description);
            });
        }
    }

    // ------------------------------------------------------------------------
    // Cultural events
    // ------------------------------------------------------------------------

    fn events_page(&mut self, ui: &mut egui::Ui) {
        page_title(ui, Page::Events.title());
        let events = match self.events() {
            Ok(rows) => rows,
            Err(e) => return self.show_load_error(ui, &e),
        };
        let hits = self.event_hits(&events);
        result_count(ui, hits.len(), events.len(), "events");
        ui.add_space(theme::SPACING_LG);

        let rows: &[CulturalEvent] = &events;
        let subset = || hits.iter().map(move |&i| &rows[i]);

        theme::section_frame().show(ui, |ui| {
            charts::chart_title(ui, "Event Timeline");
            charts::timeline_chart(ui, "event_timeline", &summary::timeline(subset()));
        });
        ui.add_space(theme::SPACING_LG);

        chart_pair(
            ui,
            |ui| {
                charts::chart_title(ui, "Events by Type");
                charts::pie_chart(ui, &summary::value_counts(subset(), |e| e.kind.as_str()));
            },
            |ui| {
                charts::chart_title(ui, "Top 10 Countries by Number of Events");
                charts::count_chart(
                    ui,
                    "event_countries",
                    &summary::top_n(subset(), |e| e.country.as_str(), TOP_N),
                );
            },
        );

        section_heading(ui, icons::LIST_BULLETS, "Event Details");
        if hits.is_empty() {
            placeholder(ui, IMAGE_SLOT_HEIGHT, "No events match the current filters");
            return;
        }
        for &i in &hits {
            let event = &events[i];
            self.detail_card(ui, i, event, |ui| {
                field(ui, "Type", &event.kind);
                field(ui, "Location", &format!("{}, {}", event.location, event.country));
                field(
                    ui,
                    "Dates",
                    &format!(
                        "{} - {}",
                        format_long_date(event.start_date),
                        format_long_date(event.end_date)
                    ),
                );
                field(ui, "Description", &event.description);
            });
        }
    }

    // ------------------------------------------------------------------------
    // Art forms
    // ------------------------------------------------------------------------

    fn art_page(&mut self, ui: &mut egui::Ui) {
        page_title(ui, Page::Art.title());
        let art = match self.art() {
            Ok(rows) => rows,
            Err(e) => return self.show_load_error(ui, &e),
        };
        let hits = self.art_hits(&art);
        result_count(ui, hits.len(), art.len(), "art forms");
        ui.add_space(theme::SPACING_LG);

        let rows: &[ArtForm] = &art;
        let subset = || hits.iter().map(move |&i| &rows[i]);

        theme::section_frame().show(ui, |ui| {
            charts::chart_title(ui, "Art Forms by Popularity");
            let ranked: Vec<(String, String, f64)> = summary::popularity_ranking(subset())
                .into_iter()
                .map(|a| (a.name.clone(), a.category.clone(), a.popularity))
                .collect();
            charts::grouped_bar_chart(ui, "art_popularity", &ranked);
        });
        ui.add_space(theme::SPACING_LG);

        chart_pair(
            ui,
            |ui| {
                charts::chart_title(ui, "Art Forms by Category");
                charts::pie_chart(ui, &summary::value_counts(subset(), |a| a.category.as_str()));
            },
            |ui| {
                charts::chart_title(ui, "Average Popularity by Category");
                charts::bar_chart(
                    ui,
                    "art_mean_popularity",
                    &summary::mean_by(subset(), |a| a.category.as_str(), |a| a.popularity),
                );
            },
        );

        section_heading(ui, icons::LIST_BULLETS, "Art Form Details");
        if hits.is_empty() {
            placeholder(ui, IMAGE_SLOT_HEIGHT, "No art forms match the current filters");
            return;
        }
        for &i in &hits {
            let form = &art[i];
            self.detail_card(ui, i, form, |ui| {
                field(ui, "Category", &form.category);
                field(ui, "Region", &form.region);
                field(ui, "Time Period", &form.time_period);
                field(ui, "Popularity Score", &format_popularity(form.popularity));
                field(ui, "Description", &form.description);
            });
        }
    }

    // ------------------------------------------------------------------------
    // Detail cards
    // ------------------------------------------------------------------------

    /// Collapsible card titled by [`Record::card_title`], with the row's image on
    /// the left and `fields` on the right
    fn detail_card<T: Record>(
        &mut self,
        ui: &mut egui::Ui,
        row: usize,
        record: &T,
        fields: impl FnOnce(&mut egui::Ui),
    ) {
        let path = gallery::image_path(&self.assets_root, T::IMAGE_CATEGORY, record.name());
        theme::card_frame().show(ui, |ui| {
            ui.set_width(ui.available_width());
            egui::CollapsingHeader::new(egui::RichText::new(record.card_title()).size(theme::FONT_HEADING))
                .id_salt((T::FILE_NAME, row))
                .show(ui, |ui| {
                    ui.horizontal_top(|ui| {
                        ui.allocate_ui(
                            egui::vec2(theme::GALLERY_IMAGE_WIDTH, IMAGE_SLOT_HEIGHT),
                            |ui| {
                                ui.set_width(theme::GALLERY_IMAGE_WIDTH);
                                self.card_image(ui, &path);
                            },
                        );
                        ui.add_space(theme::SPACING_LG);
                        ui.vertical(fields);
                    });
                });
        });
        ui.add_space(theme::SPACING_MD);
    }

    fn card_image(&mut self, ui: &mut egui::Ui, path: &std::path::Path) {
        match self.gallery_image(ui.ctx(), path) {
            GalleryImage::Texture(texture) => {
                let size = texture.size_vec2();
                let scale = theme::GALLERY_IMAGE_WIDTH / size.x.max(1.0);
                ui.image(egui::load::SizedTexture::new(texture.id(), size * scale));
                if ui
                    .add(theme::button(format!("{}  Open", icons::ARROW_SQUARE_OUT)))
                    .on_hover_text(path.display().to_string())
                    .clicked()
                {
                    if let Err(e) = open::that(path) {
                        warn!(path = %path.display(), error = %e, "Failed to open image");
                    }
                }
            }
            GalleryImage::Missing => placeholder(ui, IMAGE_SLOT_HEIGHT, "No image available"),
            GalleryImage::Error(e) => {
                ui.label(
                    egui::RichText::new(format!("Error loading image: {}", e))
                        .color(theme::STATUS_ERROR),
                );
            }
        }
    }
}
