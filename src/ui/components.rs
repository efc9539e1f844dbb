//! Address bar widget rendering
//!
//! Layout inside the rounded frame, left to right:
//! status label, text field (starting at `text_inset`), trigger button.
//! The label is painted over the field's left edge, the field itself is
//! placed after the inset so the two never overlap.

use crate::action::ActionEvent;
use crate::address_bar::{AddressBar, StatusTone};
use crate::theme;
use eframe::egui;

/// Result of showing the bar for one frame.
pub struct AddressBarOutput {
    /// Response covering the whole bar
    pub response: egui::Response,
    /// Response of the inner text field
    pub text_response: egui::Response,
    /// Response of the trigger button, tooltip attached
    pub button_response: egui::Response,
    /// Event fired this frame, also delivered to subscribers
    pub triggered: Option<ActionEvent>,
}

/// Glyph shown in front of the status text
pub fn status_icon(tone: StatusTone) -> &'static str {
    match tone {
        StatusTone::Neutral => egui_phosphor::regular::GLOBE,
        StatusTone::Secure => egui_phosphor::regular::LOCK,
        StatusTone::Insecure => egui_phosphor::regular::WARNING,
    }
}

fn status_color(tone: StatusTone) -> egui::Color32 {
    match tone {
        StatusTone::Neutral => theme::TEXT_DIM,
        StatusTone::Secure => theme::STATUS_SUCCESS,
        StatusTone::Insecure => theme::STATUS_WARNING,
    }
}

impl AddressBar {
    pub fn show(&mut self, ui: &mut egui::Ui) -> AddressBarOutput {
        let id = ui.make_persistent_id(self.id_salt);
        let text_id = id.with("text");
        self.ctx = Some(ui.ctx().clone());
        self.text_edit_id = Some(text_id);

        let frame = theme::address_frame().show(ui, |ui| {
            let (row_rect, _) = ui.allocate_exact_size(
                egui::vec2(ui.available_width(), theme::ADDRESS_BAR_HEIGHT),
                egui::Sense::hover(),
            );

            // Status label
            let margins = self.options.status_margins;
            let label = if self.status_text.is_empty() {
                status_icon(self.status_tone).to_string()
            } else {
                format!("{} {}", status_icon(self.status_tone), self.status_text)
            };
            let color = status_color(self.status_tone);
            let galley = ui.painter().layout_no_wrap(
                label,
                egui::FontId::proportional(theme::FONT_LABEL),
                color,
            );
            let label_width = galley.size().x;
            if self.status_label_width != Some(label_width) {
                self.on_status_label_resized(label_width);
            }
            let label_pos = egui::pos2(
                row_rect.left() + margins.left,
                row_rect.center().y - galley.size().y / 2.0,
            );
            ui.painter().galley(label_pos, galley, color);

            // Trigger button geometry; interaction comes after the text edit
            let button_size = theme::ADDRESS_BAR_HEIGHT;
            let button_rect = egui::Rect::from_min_size(
                egui::pos2(row_rect.right() - button_size, row_rect.top()),
                egui::vec2(button_size, button_size),
            );

            // Text field
            let text_left = row_rect.left() + self.text_inset;
            let text_right = (button_rect.left() - theme::SPACING_SM).max(text_left);
            let text_rect = egui::Rect::from_min_max(
                egui::pos2(text_left, row_rect.top()),
                egui::pos2(text_right, row_rect.bottom()),
            );
            let read_only = self.read_only;
            let mut read_only_view: &str;
            let buffer: &mut dyn egui::TextBuffer = if read_only {
                read_only_view = self.text.as_str();
                &mut read_only_view
            } else {
                &mut self.text
            };
            let text_resp = ui.put(
                text_rect,
                egui::TextEdit::singleline(buffer)
                    .id(text_id)
                    .hint_text("Enter address")
                    .frame(false)
                    .font(egui::FontId::proportional(theme::FONT_BODY))
                    .text_color(if read_only { theme::TEXT_MUTED } else { theme::TEXT_PRIMARY })
                    .desired_width(text_rect.width())
                    .vertical_align(egui::Align::Center),
            );
            if text_resp.changed() {
                self.on_text_changed();
            }

            let mut triggered = None;
            if text_resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                triggered = self.on_text_key_down(egui::Key::Enter);
            }

            // Trigger button, sensed with this frame's text
            let active = self.is_button_active();
            let sense = if active { egui::Sense::click() } else { egui::Sense::hover() };
            let button_resp = ui.interact(button_rect, id.with("button"), sense);
            if ui.is_rect_visible(button_rect) {
                let glyph_color = if !active {
                    theme::BTN_DISABLED_TEXT
                } else if button_resp.hovered() {
                    theme::TEXT_PRIMARY
                } else {
                    theme::TEXT_SECONDARY
                };
                if let Some((fill, draw_rect)) = theme::trigger_visual(&button_resp, active, button_rect) {
                    ui.painter().rect_filled(draw_rect, theme::RADIUS_DEFAULT, fill);
                }
                ui.painter().text(
                    button_rect.center(),
                    egui::Align2::CENTER_CENTER,
                    self.current_action.icon(),
                    egui::FontId::proportional(theme::FONT_HEADING),
                    glyph_color,
                );
            }
            if active && button_resp.hovered() {
                ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
            }
            if button_resp.clicked() {
                triggered = self.on_button_released(button_resp.hovered()).or(triggered);
            }
            let button_resp = button_resp.on_hover_text(self.current_action.tooltip());

            (text_resp, button_resp, triggered)
        });

        let (text_response, button_response, triggered) = frame.inner;
        AddressBarOutput {
            response: frame.response,
            text_response,
            button_response,
            triggered,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::AddressBarAction;
    use crate::layout::compute_inset;
    use std::cell::RefCell;
    use std::rc::Rc;

    const SCREEN: egui::Rect = egui::Rect {
        min: egui::Pos2::ZERO,
        max: egui::Pos2 { x: 800.0, y: 200.0 },
    };

    struct Shown {
        triggered: Option<ActionEvent>,
        button_rect: egui::Rect,
    }

    fn run_frame_with(ctx: &egui::Context, bar: &mut AddressBar, events: Vec<egui::Event>) -> Shown {
        let input = egui::RawInput {
            screen_rect: Some(SCREEN),
            events,
            ..Default::default()
        };
        let mut shown = Shown {
            triggered: None,
            button_rect: egui::Rect::NOTHING,
        };
        let _ = ctx.run(input, |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                let out = bar.show(ui);
                shown.triggered = shown.triggered.or(out.triggered);
                shown.button_rect = out.button_response.rect;
            });
        });
        shown
    }

    fn run_frame(ctx: &egui::Context, bar: &mut AddressBar) -> Option<ActionEvent> {
        run_frame_with(ctx, bar, Vec::new()).triggered
    }

    fn key_event(key: egui::Key) -> egui::Event {
        egui::Event::Key {
            key,
            physical_key: None,
            pressed: true,
            repeat: false,
            modifiers: egui::Modifiers::NONE,
        }
    }

    fn pointer_button(pos: egui::Pos2, pressed: bool) -> egui::Event {
        egui::Event::PointerButton {
            pos,
            button: egui::PointerButton::Primary,
            pressed,
            modifiers: egui::Modifiers::NONE,
        }
    }

    /// Show once, focus the field and let focus settle for a frame.
    fn focused_bar(ctx: &egui::Context, bar: &mut AddressBar) {
        run_frame(ctx, bar);
        assert!(bar.request_focus());
        run_frame(ctx, bar);
    }

    /// Hover, press and release over the trigger button.
    fn click_button(ctx: &egui::Context, bar: &mut AddressBar) -> Option<ActionEvent> {
        let center = run_frame_with(ctx, bar, Vec::new()).button_rect.center();
        let mut fired = run_frame_with(ctx, bar, vec![egui::Event::PointerMoved(center)]).triggered;
        fired = fired.or(run_frame_with(ctx, bar, vec![pointer_button(center, true)]).triggered);
        fired.or(run_frame_with(ctx, bar, vec![pointer_button(center, false)]).triggered)
    }

    #[test]
    fn rendering_measures_label_and_applies_inset() {
        let ctx = egui::Context::default();
        let mut bar = AddressBar::new();
        bar.set_status("Secure", StatusTone::Secure);

        run_frame(&ctx, &mut bar);

        let width = bar.status_label_width().expect("label measured");
        assert!(width > 0.0);
        let m = bar.status_margins();
        assert_eq!(bar.text_inset(), compute_inset(width, m.left, m.right));
    }

    #[test]
    fn longer_status_widens_inset() {
        let ctx = egui::Context::default();
        let mut bar = AddressBar::new();
        bar.set_status("Ok", StatusTone::Secure);
        run_frame(&ctx, &mut bar);
        let short = bar.text_inset();

        bar.set_status("Connection is not private", StatusTone::Insecure);
        run_frame(&ctx, &mut bar);
        assert!(bar.text_inset() > short);
    }

    #[test]
    fn idle_frames_do_not_fire() {
        let ctx = egui::Context::default();
        let fired = Rc::new(RefCell::new(0));
        let mut bar = AddressBar::new();
        let f = fired.clone();
        bar.subscribe(move |_| *f.borrow_mut() += 1);
        bar.set_text("https://example.com");

        for _ in 0..3 {
            assert_eq!(run_frame(&ctx, &mut bar), None);
        }
        assert_eq!(*fired.borrow(), 0);
        assert_eq!(bar.text(), "https://example.com");
    }

    #[test]
    fn focus_succeeds_after_show() {
        let ctx = egui::Context::default();
        let mut bar = AddressBar::new();
        run_frame(&ctx, &mut bar);
        assert!(bar.request_focus());
    }

    #[test]
    fn read_only_field_refuses_focus() {
        let ctx = egui::Context::default();
        let mut bar = AddressBar::new();
        run_frame(&ctx, &mut bar);

        bar.set_enabled(false);
        assert!(!bar.request_focus());

        bar.set_enabled(true);
        assert!(bar.request_focus());
    }

    #[test]
    fn enter_in_focused_field_fires_current_action() {
        let ctx = egui::Context::default();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut bar = AddressBar::new();
        let sink = seen.clone();
        bar.subscribe(move |e| sink.borrow_mut().push(e.action_required()));
        bar.set_text("https://example.com");
        bar.set_current_action(AddressBarAction::Refresh);
        focused_bar(&ctx, &mut bar);

        let shown = run_frame_with(&ctx, &mut bar, vec![key_event(egui::Key::Enter)]);

        assert_eq!(shown.triggered, Some(ActionEvent::new(AddressBarAction::Refresh)));
        assert_eq!(*seen.borrow(), vec![AddressBarAction::Refresh]);
    }

    #[test]
    fn clicking_button_fires_current_action() {
        let ctx = egui::Context::default();
        let mut bar = AddressBar::new();
        bar.set_text("https://example.com");
        bar.set_current_action(AddressBarAction::CancelNavigation);

        assert_eq!(
            click_button(&ctx, &mut bar),
            Some(ActionEvent::new(AddressBarAction::CancelNavigation))
        );
    }

    #[test]
    fn clicking_button_with_empty_text_does_nothing() {
        let ctx = egui::Context::default();
        let fired = Rc::new(RefCell::new(0));
        let mut bar = AddressBar::new();
        let f = fired.clone();
        bar.subscribe(move |_| *f.borrow_mut() += 1);

        assert_eq!(click_button(&ctx, &mut bar), None);
        assert_eq!(*fired.borrow(), 0);
    }

    #[test]
    fn typing_into_empty_field_activates_button() {
        let ctx = egui::Context::default();
        let mut bar = AddressBar::new();
        focused_bar(&ctx, &mut bar);
        assert!(!bar.is_button_active());

        let shown = run_frame_with(&ctx, &mut bar, vec![egui::Event::Text("x".to_string())]);

        assert_eq!(shown.triggered, None);
        assert_eq!(bar.text(), "x");
        assert!(bar.is_button_active());
    }
}
