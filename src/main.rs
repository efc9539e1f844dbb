#![windows_subsystem = "windows"]
//! Web Address Bar demo - hosts the control in an eframe window

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

mod app;

use app::App;
use eframe::egui;
use std::time::{Duration, Instant};
use tracing::{info, warn};
use web_address_bar::constants::*;
use web_address_bar::settings::Settings;
use web_address_bar::theme;
use web_address_bar::utils::{get_data_dir, rasterize_icon};

/// Initialize file logging. Returns a guard that must be held for the app lifetime.
fn init_logging(data_dir: &std::path::Path) -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let logs_dir = data_dir.join("logs");
    std::fs::create_dir_all(&logs_dir).ok();

    let file_appender = tracing_appender::rolling::daily(&logs_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

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
    let data_dir = get_data_dir();

    if let Err(e) = std::fs::create_dir_all(&data_dir) {
        eprintln!("Failed to create {}: {}", data_dir.display(), e);
    }

    // Initialize logging - guard must live for entire app lifetime
    let _log_guard = init_logging(&data_dir);

    info!(version = APP_VERSION, "{} starting", APP_NAME);

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
        .with_inner_size(win_size.unwrap_or(egui::vec2(900.0, 560.0)))
        .with_min_inner_size([480.0, 320.0])
        .with_title(APP_NAME);

    match rasterize_icon(64) {
        Some((rgba, width, height)) => {
            let icon = egui::IconData { rgba, width, height };
            viewport = viewport.with_icon(std::sync::Arc::new(icon));
        }
        None => warn!("Window icon unavailable"),
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
        let now = Instant::now();

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

        // Ctrl+L / Cmd+L jumps to the address field
        if ctx.input_mut(|i| i.consume_key(egui::Modifiers::COMMAND, egui::Key::L)) {
            let focused = self.address_bar.request_focus();
            info!(focused, "Address field focus requested");
        }

        self.tick(now);

        egui::TopBottomPanel::top("address_bar_panel")
            .frame(
                egui::Frame::new()
                    .fill(theme::BG_ELEVATED)
                    .inner_margin(egui::Margin::same(theme::SPACING_MD as i8)),
            )
            .show(ctx, |ui| {
                let output = self.address_bar.show(ui);
                if output.text_response.has_focus() {
                    ui.painter().rect_stroke(
                        output.response.rect,
                        theme::RADIUS_MEDIUM,
                        egui::Stroke::new(theme::STROKE_DEFAULT, theme::BORDER_FOCUS),
                        egui::StrokeKind::Inside,
                    );
                }
                if output.triggered.is_some() {
                    ctx.request_repaint();
                }

                ui.add_space(theme::SPACING_SM);
                ui.horizontal(|ui| {
                    let mut enabled = self.enabled;
                    if ui.checkbox(&mut enabled, "Enabled").changed() {
                        self.set_enabled(enabled);
                    }
                    ui.add_space(theme::SPACING_LG);
                    if ui.add(theme::button("Focus address")).clicked() {
                        self.address_bar.request_focus();
                    }
                    ui.add_space(theme::SPACING_LG);
                    ui.label(
                        egui::RichText::new(format!(
                            "enabled: {}  read-only: {}  button: {}",
                            self.address_bar.is_enabled(),
                            self.address_bar.is_read_only(),
                            if self.address_bar.is_button_active() { "active" } else { "inactive" },
                        ))
                        .size(theme::FONT_SMALL)
                        .color(theme::TEXT_DIM),
                    );
                });
            });

        // Consumer side: react to anything published during this frame
        self.handle_pending_events(now);
        self.tick(now);

        egui::TopBottomPanel::bottom("event_log_panel")
            .resizable(true)
            .default_height(theme::LOG_PANEL_HEIGHT)
            .show(ctx, |ui| {
                ui.add_space(theme::SPACING_XS);
                ui.label(
                    egui::RichText::new("EVENT LOG")
                        .size(theme::FONT_SMALL)
                        .color(theme::TEXT_MUTED),
                );
                theme::section_frame().show(ui, |ui| {
                    egui::ScrollArea::vertical()
                        .stick_to_bottom(true)
                        .auto_shrink([false, false])
                        .show(ui, |ui| {
                            for entry in &self.log {
                                let action = entry
                                    .action
                                    .map(|a| a.to_string())
                                    .unwrap_or_else(|| "-".to_string());
                                let color = match entry.outcome {
                                    "loading" | "reloading" | "loaded" => theme::TEXT_SECONDARY,
                                    "cancelled" => theme::STATUS_WARNING,
                                    o if o.starts_with("ignored") || o.starts_with("nothing") => {
                                        theme::STATUS_ERROR
                                    }
                                    _ => theme::TEXT_MUTED,
                                };
                                ui.label(
                                    egui::RichText::new(format!(
                                        "{}  {:<16} {:<12} {}",
                                        entry.time, action, entry.outcome, entry.address
                                    ))
                                    .monospace()
                                    .color(color),
                                );
                            }
                        });
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            let (line, color) = self.status_line();
            ui.vertical_centered(|ui| {
                ui.add_space(ui.available_height() / 3.0);
                if self.page.is_loading() {
                    ui.spinner();
                    ui.add_space(theme::SPACING_SM);
                }
                ui.label(egui::RichText::new(line).size(theme::FONT_HEADING).color(color));
            });
        });

        if self.page.is_loading() {
            ctx.request_repaint_after(Duration::from_millis(50));
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("Application shutting down");
        self.save_settings();
    }
}
