//! Address bar state and its host-facing contract
//!
//! Rendering lives in [`crate::ui`]; this module only tracks what the host set,
//! the derived button/inset state, and fires [`ActionEvent`]s on triggers.

use crate::action::{ActionEvent, AddressBarAction};
use crate::events::{EventSource, SubscriptionId};
use crate::layout::{compute_inset, LabelMargins};
use eframe::egui;
use tracing::{debug, trace};

/// Color/icon treatment of the certificate label. Display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusTone {
    #[default]
    Neutral,
    Secure,
    Insecure,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AddressBarOptions {
    /// Reproduce the old inverted `enabled` property: `set_enabled(true)`
    /// makes the field read-only while still enabling the button, and
    /// `is_enabled()` reports the read-only flag.
    pub legacy_inverted_enabled: bool,
    pub status_margins: LabelMargins,
}

pub struct AddressBar {
    pub(crate) id_salt: egui::Id,
    pub(crate) options: AddressBarOptions,
    pub(crate) text: String,
    pub(crate) read_only: bool,
    pub(crate) button_enabled: bool,
    pub(crate) button_active: bool,
    pub(crate) current_action: AddressBarAction,
    pub(crate) status_text: String,
    pub(crate) status_tone: StatusTone,
    pub(crate) status_label_width: Option<f32>,
    pub(crate) text_inset: f32,
    // Set on first show; needed to move focus from outside a frame
    pub(crate) ctx: Option<egui::Context>,
    pub(crate) text_edit_id: Option<egui::Id>,
    triggered: EventSource<ActionEvent>,
}

impl Default for AddressBar {
    fn default() -> Self {
        Self::with_options(AddressBarOptions::default())
    }
}

impl AddressBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: AddressBarOptions) -> Self {
        let margins = options.status_margins;
        let mut bar = Self {
            id_salt: egui::Id::new("address_bar"),
            options,
            text: String::new(),
            read_only: false,
            button_enabled: true,
            button_active: false,
            current_action: AddressBarAction::Navigate,
            status_text: String::new(),
            status_tone: StatusTone::Neutral,
            status_label_width: None,
            text_inset: compute_inset(0.0, margins.left, margins.right),
            ctx: None,
            text_edit_id: None,
            triggered: EventSource::new(),
        };
        bar.set_enabled(true);
        bar
    }

    /// Distinguish several bars in one window.
    pub fn id_salt(mut self, salt: impl std::hash::Hash) -> Self {
        self.id_salt = egui::Id::new(salt);
        self
    }

    // ------------------------------------------------------------------
    // Text
    // ------------------------------------------------------------------

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the address verbatim. Never fires an event.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.on_text_changed();
    }

    pub(crate) fn on_text_changed(&mut self) {
        let active = !self.text.is_empty();
        if active != self.button_active {
            trace!(active, "Trigger button activity changed");
        }
        self.button_active = active;
    }

    // ------------------------------------------------------------------
    // Enabled
    // ------------------------------------------------------------------

    pub fn is_enabled(&self) -> bool {
        if self.options.legacy_inverted_enabled {
            self.read_only
        } else {
            !self.read_only
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.read_only = if self.options.legacy_inverted_enabled {
            enabled
        } else {
            !enabled
        };
        self.button_enabled = enabled;
        debug!(enabled, read_only = self.read_only, "Address bar enabled state set");
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Whether the trigger button accepts presses right now.
    pub fn is_button_active(&self) -> bool {
        self.button_enabled && self.button_active
    }

    // ------------------------------------------------------------------
    // Focus
    // ------------------------------------------------------------------

    /// Move keyboard focus to the text field. Returns false until the bar has
    /// been shown at least once, and while the field is read-only.
    pub fn request_focus(&mut self) -> bool {
        if self.read_only {
            debug!("Focus refused, address field is read-only");
            return false;
        }
        match (&self.ctx, self.text_edit_id) {
            (Some(ctx), Some(id)) => ctx.memory_mut(|m| {
                m.request_focus(id);
                m.has_focus(id)
            }),
            _ => {
                debug!("Focus requested before address bar was shown");
                false
            }
        }
    }

    // ------------------------------------------------------------------
    // Action + event
    // ------------------------------------------------------------------

    /// Action reported by the next trigger. Never fires an event.
    pub fn set_current_action(&mut self, action: AddressBarAction) {
        if action != self.current_action {
            debug!(from = %self.current_action, to = %action, "Address bar action changed");
        }
        self.current_action = action;
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&ActionEvent) + 'static) -> SubscriptionId {
        self.triggered.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.triggered.unsubscribe(id)
    }

    /// Pointer released over the trigger button.
    pub fn on_button_released(&mut self, hovered: bool) -> Option<ActionEvent> {
        if !hovered || !self.is_button_active() {
            return None;
        }
        Some(self.fire())
    }

    /// Key pressed while the text field has focus.
    pub fn on_text_key_down(&mut self, key: egui::Key) -> Option<ActionEvent> {
        if key != egui::Key::Enter {
            return None;
        }
        Some(self.fire())
    }

    fn fire(&mut self) -> ActionEvent {
        let event = ActionEvent::new(self.current_action);
        debug!(action = %event.action_required(), listeners = self.triggered.len(), "Address bar triggered");
        self.triggered.publish(&event);
        event
    }

    // ------------------------------------------------------------------
    // Status label + layout
    // ------------------------------------------------------------------

    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    pub fn status_tone(&self) -> StatusTone {
        self.status_tone
    }

    pub fn set_status(&mut self, text: impl Into<String>, tone: StatusTone) {
        self.status_text = text.into();
        self.status_tone = tone;
    }

    pub fn status_margins(&self) -> LabelMargins {
        self.options.status_margins
    }

    pub fn set_status_margins(&mut self, margins: LabelMargins) {
        self.options.status_margins = margins;
        self.on_status_label_resized(self.status_label_width.unwrap_or(0.0));
    }

    /// Last measured width of the status label, once rendered.
    pub fn status_label_width(&self) -> Option<f32> {
        self.status_label_width
    }

    /// Layout callback for the status label.
    pub fn on_status_label_resized(&mut self, width: f32) {
        let m = self.options.status_margins;
        self.status_label_width = Some(width);
        self.text_inset = compute_inset(width, m.left, m.right);
        trace!(width, inset = self.text_inset, "Status label resized");
    }

    pub fn text_inset(&self) -> f32 {
        self.text_inset
    }
}
