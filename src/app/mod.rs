//! App module - demo host state and the consumer side of the address bar

mod page;

use page::{status_for, PageLoad};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::{Duration, Instant};
use tracing::{debug, info};
use web_address_bar::settings::Settings;
use web_address_bar::{theme, ActionEvent, AddressBar, AddressBarAction, AddressBarOptions, StatusTone};

use eframe::egui;

/// Cap on the event log shown in the bottom panel
const MAX_LOG_ENTRIES: usize = 200;

pub struct LogEntry {
    pub time: String,
    /// None for host-side notices such as a finished load
    pub action: Option<AddressBarAction>,
    pub address: String,
    pub outcome: &'static str,
}

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    pub(crate) address_bar: AddressBar,
    pub(crate) pending: Rc<RefCell<VecDeque<ActionEvent>>>,
    pub(crate) page: PageLoad,
    /// Action the bar offered after the last tick
    pub(crate) offered: AddressBarAction,
    pub(crate) log: Vec<LogEntry>,
    pub(crate) enabled: bool,
    pub(crate) legacy_inverted_enabled: bool,
    pub(crate) page_load_time: Duration,
    pub(crate) window_pos: Option<egui::Pos2>,
    pub(crate) window_size: Option<egui::Vec2>,
    pub(crate) needs_center: bool,
    pub(crate) data_dir: PathBuf,
}

// ============================================================================
// APP INITIALIZATION & HELPERS
// ============================================================================

impl App {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: Settings, data_dir: PathBuf) -> Self {
        cc.egui_ctx.set_theme(egui::Theme::Dark);

        // Phosphor icons for the trigger button and status label
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        theme::apply_visuals(&cc.egui_ctx);

        Self::from_settings(settings, data_dir)
    }

    /// State without any egui styling; the bar is wired to the event queue.
    pub fn from_settings(settings: Settings, data_dir: PathBuf) -> Self {
        let mut address_bar = AddressBar::with_options(AddressBarOptions {
            legacy_inverted_enabled: settings.legacy_inverted_enabled,
            ..Default::default()
        });
        address_bar.set_text(settings.last_address.clone());
        let (status, tone) = status_for(&settings.last_address);
        address_bar.set_status(status, tone);

        let pending = Rc::new(RefCell::new(VecDeque::new()));
        let sink = pending.clone();
        address_bar.subscribe(move |event: &ActionEvent| sink.borrow_mut().push_back(*event));

        Self {
            address_bar,
            pending,
            page: PageLoad::default(),
            offered: AddressBarAction::default(),
            log: Vec::new(),
            enabled: true,
            legacy_inverted_enabled: settings.legacy_inverted_enabled,
            page_load_time: Duration::from_millis(settings.page_load_ms),
            window_pos: None,
            window_size: None,
            needs_center: false,
            data_dir,
        }
    }

    pub fn save_settings(&self) {
        let settings = Settings {
            window_x: self.window_pos.map(|p| p.x),
            window_y: self.window_pos.map(|p| p.y),
            window_w: self.window_size.map(|s| s.x),
            window_h: self.window_size.map(|s| s.y),
            last_address: self.address_bar.text().to_string(),
            legacy_inverted_enabled: self.legacy_inverted_enabled,
            page_load_ms: self.page_load_time.as_millis() as u64,
        };
        settings.save(&self.data_dir);
    }

    /// React to everything the bar published since the last frame.
    pub fn handle_pending_events(&mut self, now: Instant) {
        let events: Vec<ActionEvent> = self.pending.borrow_mut().drain(..).collect();
        for event in events {
            self.handle_event(event, now);
        }
    }

    fn handle_event(&mut self, event: ActionEvent, now: Instant) {
        let action = event.action_required();
        let typed = self.address_bar.text().trim().to_string();
        let outcome = match action {
            AddressBarAction::Navigate if typed.is_empty() => "ignored (empty address)",
            AddressBarAction::Navigate => {
                info!(address = %typed, "Navigating");
                self.begin_load(typed.clone(), now);
                "loading"
            }
            AddressBarAction::CancelNavigation => {
                if self.page.cancel() {
                    info!(address = %typed, "Navigation cancelled");
                    "cancelled"
                } else {
                    "nothing to cancel"
                }
            }
            AddressBarAction::Refresh => match self.page.address().map(str::to_string) {
                Some(address) => {
                    info!(address = %address, "Refreshing");
                    self.begin_load(address, now);
                    "reloading"
                }
                None => "nothing to refresh",
            },
        };
        self.push_log(Some(action), typed, outcome);
    }

    fn begin_load(&mut self, address: String, now: Instant) {
        let (status, tone) = status_for(&address);
        self.address_bar.set_status(status, tone);
        self.page.start(address, now);
    }

    /// Advance the simulated load and keep the bar's action in sync.
    pub fn tick(&mut self, now: Instant) {
        if self.page.poll(now, self.page_load_time) {
            let address = self.page.address().unwrap_or_default().to_string();
            debug!(address = %address, "Page load complete");
            self.push_log(None, address, "loaded");
        }
        let action = self.page.desired_action(self.address_bar.text());
        self.address_bar.set_current_action(action);

        // The status label describes the loaded page only while the bar offers
        // to refresh it
        match (self.offered, action) {
            (AddressBarAction::Refresh, next) if next != AddressBarAction::Refresh && !self.page.is_loading() => {
                debug!("Address edited away from loaded page, clearing status");
                self.address_bar.set_status("", StatusTone::Neutral);
            }
            (prev, AddressBarAction::Refresh) if prev != AddressBarAction::Refresh => {
                let (status, tone) = status_for(self.page.address().unwrap_or_default());
                self.address_bar.set_status(status, tone);
            }
            _ => {}
        }
        self.offered = action;
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        self.address_bar.set_enabled(enabled);
    }

    fn push_log(&mut self, action: Option<AddressBarAction>, address: String, outcome: &'static str) {
        self.log.push(LogEntry {
            time: chrono::Local::now().format("%H:%M:%S%.3f").to_string(),
            action,
            address,
            outcome,
        });
        if self.log.len() > MAX_LOG_ENTRIES {
            let excess = self.log.len() - MAX_LOG_ENTRIES;
            self.log.drain(..excess);
        }
    }

    pub fn status_line(&self) -> (String, egui::Color32) {
        match &self.page {
            PageLoad::Idle => ("No page loaded".to_string(), theme::TEXT_DIM),
            PageLoad::Loading { address, .. } => (format!("Loading {}…", address), theme::TEXT_MUTED),
            PageLoad::Loaded { address } => {
                let color = match status_for(address).1 {
                    StatusTone::Insecure => theme::STATUS_WARNING,
                    _ => theme::STATUS_SUCCESS,
                };
                (format!("Loaded {}", address), color)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app() -> (App, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            page_load_ms: 100,
            ..Default::default()
        };
        (App::from_settings(settings, dir.path().to_path_buf()), dir)
    }

    /// Read the offered action back through a trigger, then drop that event.
    fn offered(app: &mut App) -> AddressBarAction {
        let event = app.address_bar.on_text_key_down(egui::Key::Enter).unwrap();
        app.pending.borrow_mut().clear();
        event.action_required()
    }

    #[test]
    fn navigate_starts_load_and_offers_cancel() {
        let (mut app, _dir) = test_app();
        let t0 = Instant::now();
        app.address_bar.set_text("https://example.com");
        app.tick(t0);

        app.address_bar.on_text_key_down(egui::Key::Enter);
        app.handle_pending_events(t0);
        app.tick(t0);

        assert!(app.page.is_loading());
        assert_eq!(app.address_bar.status_tone(), StatusTone::Secure);
        assert_eq!(offered(&mut app), AddressBarAction::CancelNavigation);
        assert_eq!(app.log.last().map(|e| e.outcome), Some("loading"));
    }

    #[test]
    fn finished_load_offers_refresh_until_text_changes() {
        let (mut app, _dir) = test_app();
        let t0 = Instant::now();
        app.address_bar.set_text("http://example.com");
        app.address_bar.on_button_released(true);
        app.handle_pending_events(t0);

        app.tick(t0 + Duration::from_millis(150));
        assert_eq!(offered(&mut app), AddressBarAction::Refresh);

        app.address_bar.set_text("http://example.org");
        app.tick(t0 + Duration::from_millis(160));
        assert_eq!(offered(&mut app), AddressBarAction::Navigate);
    }

    #[test]
    fn editing_away_from_loaded_page_clears_status() {
        let (mut app, _dir) = test_app();
        let t0 = Instant::now();
        app.address_bar.set_text("https://example.com");
        app.address_bar.on_text_key_down(egui::Key::Enter);
        app.handle_pending_events(t0);
        app.tick(t0 + Duration::from_millis(150));
        assert_eq!(app.address_bar.status_text(), "Secure");

        app.address_bar.set_text("http://other.example");
        app.tick(t0 + Duration::from_millis(160));
        assert_eq!(app.address_bar.status_text(), "");
        assert_eq!(app.address_bar.status_tone(), StatusTone::Neutral);

        app.address_bar.set_text("https://example.com");
        app.tick(t0 + Duration::from_millis(170));
        assert_eq!(app.address_bar.status_text(), "Secure");
        assert_eq!(app.address_bar.status_tone(), StatusTone::Secure);
    }

    #[test]
    fn cancel_returns_to_navigate() {
        let (mut app, _dir) = test_app();
        let t0 = Instant::now();
        app.address_bar.set_text("example.com");
        app.address_bar.on_button_released(true);
        app.handle_pending_events(t0);
        app.tick(t0);

        app.address_bar.on_button_released(true);
        app.handle_pending_events(t0);
        app.tick(t0);

        assert_eq!(app.page, PageLoad::Idle);
        assert_eq!(offered(&mut app), AddressBarAction::Navigate);
        assert_eq!(app.log.last().map(|e| e.outcome), Some("cancelled"));
    }

    #[test]
    fn blank_address_is_ignored() {
        let (mut app, _dir) = test_app();
        app.address_bar.set_text("   ");
        app.address_bar.on_text_key_down(egui::Key::Enter);
        app.handle_pending_events(Instant::now());
        assert_eq!(app.page, PageLoad::Idle);
        assert_eq!(app.log.last().map(|e| e.outcome), Some("ignored (empty address)"));
    }

    #[test]
    fn settings_persist_last_address() {
        let (mut app, dir) = test_app();
        app.address_bar.set_text("https://kept.example");
        app.save_settings();
        let loaded = Settings::load(dir.path());
        assert_eq!(loaded.last_address, "https://kept.example");
        assert_eq!(loaded.page_load_ms, 100);
    }
}
