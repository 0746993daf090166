#![windows_subsystem = "windows"]
//! Cultural Data Explorer - Main entry point

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

mod app;
mod theme;
mod ui;

use app::App;
use cultural_explorer::constants::*;
use cultural_explorer::settings::Settings;
use cultural_explorer::types::Page;
use cultural_explorer::utils;
use eframe::egui;
use tracing::{info, warn};

/// Initialize file logging. Returns a guard that must be held for the app lifetime.
fn init_logging(data_dir: &std::path::Path) -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_subscriber::{fmt, EnvFilter, prelude::*};

    let logs_dir = data_dir.join("logs");
    std::fs::create_dir_all(&logs_dir).ok();

    let file_appender = tracing_appender::rolling::daily(&logs_dir, "cultural-explorer.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,cultural_explorer=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    guard
}

fn main() -> eframe::Result<()> {
    let data_dir = utils::get_app_data_dir();
    std::fs::create_dir_all(&data_dir).ok();

    // Initialize logging - guard must live for entire app lifetime
    let _log_guard = init_logging(&data_dir);

    info!(version = APP_VERSION, "Cultural Data Explorer starting");

    // Load saved window position/size
    let settings = Settings::load(&data_dir);
    let win_pos = match (settings.window_x, settings.window_y) {
        (Some(x), Some(y)) => Some(egui::pos2(x, y)),
        _ => None,
    };
    let win_size = match (settings.window_w, settings.window_h) {
        (Some(w), Some(h)) => Some(egui::vec2(w, h)),
        _ => None,
    };

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size(win_size.unwrap_or(egui::vec2(1400.0, 900.0)))
        .with_min_inner_size([1000.0, 640.0])
        .with_title(APP_NAME);

    // Window/taskbar icon from the logo SVG
    match utils::rasterize_logo(256) {
        Some((rgba, width, height)) => {
            viewport = viewport.with_icon(std::sync::Arc::new(egui::IconData { rgba, width, height }));
        }
        None => warn!("Failed to rasterize window icon"),
    }

    let needs_center = win_pos.is_none();

    if let Some(pos) = win_pos {
        viewport = viewport.with_position(pos);
    }

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        options,
        Box::new(move |cc| {
            let mut app = App::new(cc, settings, data_dir);
            app.needs_center = needs_center;
            Ok(Box::new(app))
        }),
    )
}

// ============================================================================
// MAIN UPDATE LOOP & UI RENDERING
// ============================================================================

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Track window position/size for saving on exit
        ctx.input(|i| {
            if let Some(rect) = i.viewport().outer_rect {
                self.window_pos = Some(rect.min);
            }
            if let Some(rect) = i.viewport().inner_rect {
                self.window_size = Some(rect.size());
            }
        });

        // Center window on first launch
        if self.needs_center {
            self.needs_center = false;
            if let Some(cmd) = egui::ViewportCommand::center_on_screen(ctx) {
                ctx.send_viewport_cmd(cmd);
            }
        }

        self.poll_image_fetch();
        self.render_fetch_modal(ctx);
        self.render_settings_modal(ctx);

        // Left sidebar - navigation and filters (must be added BEFORE CentralPanel)
        egui::SidePanel::left("nav_panel")
            .exact_width(theme::SIDEBAR_WIDTH)
            .resizable(false)
            .show_separator_line(false)
            .frame(
                egui::Frame::new()
                    .fill(theme::BG_BASE)
                    .inner_margin(egui::Margin { left: 16, right: 12, top: 0, bottom: 12 }),
            )
            .show(ctx, |ui| self.render_sidebar(ui, ctx));

        egui::CentralPanel::default()
            .frame(
                egui::Frame::new()
                    .fill(theme::BG_ELEVATED)
                    .inner_margin(egui::Margin::same(24)),
            )
            .show(ctx, |ui| self.render_page(ui));
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("Application shutting down");
        self.save_settings();
    }
}

// ============================================================================
// SIDEBAR
// ============================================================================

impl App {
    fn render_sidebar(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        // Header with logo, centered
        ui.add_space(21.0);
        ui.with_layout(egui::Layout::top_down(egui::Align::Center), |ui| {
            if self.logo_texture.is_none() {
                if let Some((pixels, w, h)) = utils::rasterize_logo((theme::LOGO_SIZE * 2.0) as u32) {
                    self.logo_texture = Some(ctx.load_texture(
                        "logo",
                        egui::ColorImage::from_rgba_unmultiplied([w as usize, h as usize], &pixels),
                        egui::TextureOptions::LINEAR,
                    ));
                }
            }
            if let Some(texture) = &self.logo_texture {
                ui.image(egui::load::SizedTexture::new(
                    texture.id(),
                    egui::vec2(theme::LOGO_SIZE, theme::LOGO_SIZE),
                ));
            }

            ui.add_space(4.0);
            ui.add(
                egui::Label::new(
                    egui::RichText::new("CULTURAL DATA EXPLORER")
                        .size(theme::FONT_SMALL)
                        .color(theme::TEXT_DIM),
                )
                .selectable(false),
            );
        });
        ui.add_space(theme::SPACING_XL);

        // Page navigation
        for page in Page::ALL {
            let icon = match page {
                Page::Home => egui_phosphor::regular::HOUSE,
                Page::Heritage => egui_phosphor::regular::BANK,
                Page::Events => egui_phosphor::regular::CALENDAR,
                Page::Art => egui_phosphor::regular::PALETTE,
            };
            let label = if page == Page::Home { "Home" } else { page.title() };
            if theme::nav_item(ui, icon, label, self.page == page) && self.page != page {
                info!(page = ?page, "Page selected");
                self.page = page;
            }
        }

        ui.add_space(theme::SPACING_LG);
        ui.separator();
        ui.add_space(theme::SPACING_LG);

        // Bottom bar: actions and version
        egui::TopBottomPanel::bottom("sidebar_actions")
            .frame(egui::Frame::new().fill(theme::BG_BASE))
            .show_separator_line(false)
            .show_inside(ui, |ui| {
                ui.separator();
                ui.add_space(theme::SPACING_SM);
                ui.horizontal(|ui| {
                    if ui
                        .add(theme::button(format!("{}  Settings", egui_phosphor::regular::GEAR)))
                        .clicked()
                    {
                        self.show_settings = true;
                    }
                    if ui
                        .add(theme::button(format!("{}  Fetch Images", egui_phosphor::regular::DOWNLOAD_SIMPLE)))
                        .on_hover_text("Download every image listed in image_urls.csv")
                        .clicked()
                    {
                        self.start_image_fetch(ctx);
                    }
                });
                ui.add_space(theme::SPACING_SM);
                ui.add(
                    egui::Label::new(
                        egui::RichText::new(format!("v{}", APP_VERSION))
                            .size(theme::FONT_SMALL)
                            .color(theme::TEXT_DIM),
                    )
                    .selectable(false),
                );
            });

        // Filters for the current page fill the rest
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(theme::BG_BASE))
            .show_inside(ui, |ui| {
                egui::ScrollArea::vertical()
                    .scroll_bar_visibility(egui::scroll_area::ScrollBarVisibility::AlwaysHidden)
                    .show(ui, |ui| self.render_filters(ui));
            });
    }
}
