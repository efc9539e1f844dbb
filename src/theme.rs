//! Centralized theme constants for the address bar and its demo host
//! All colors, sizes, and styling should reference these constants

use egui::Color32;

// =============================================================================
// COLORS - Backgrounds
// =============================================================================
pub const BG_BASE: Color32 = Color32::from_rgb(0x09, 0x09, 0x0b); // zinc-950
pub const BG_ELEVATED: Color32 = Color32::from_rgb(0x18, 0x18, 0x1b); // zinc-900
pub const BG_INPUT: Color32 = Color32::from_rgb(0x14, 0x14, 0x18); // input field background
pub const BG_SURFACE: Color32 = Color32::from_rgb(0x27, 0x27, 0x2a); // zinc-800
pub const BG_HOVER: Color32 = Color32::from_rgb(0x0f, 0x1a, 0x19); // subtle teal hover

// =============================================================================
// COLORS - Accent (Teal)
// =============================================================================
pub const ACCENT: Color32 = Color32::from_rgb(0x2d, 0xd4, 0xbf); // teal-400

// =============================================================================
// COLORS - Text
// =============================================================================
pub const TEXT_PRIMARY: Color32 = Color32::WHITE;
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(0xe4, 0xe4, 0xe7); // zinc-200
pub const TEXT_MUTED: Color32 = Color32::from_rgb(0xa1, 0xa1, 0xaa); // zinc-400
pub const TEXT_DIM: Color32 = Color32::from_rgb(0x71, 0x71, 0x7a); // zinc-500

// =============================================================================
// COLORS - Borders
// =============================================================================
pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(0x27, 0x27, 0x2a); // zinc-800
pub const BORDER_FOCUS: Color32 = Color32::from_rgb(0x11, 0x5e, 0x59); // teal-800

// =============================================================================
// COLORS - Status
// =============================================================================
pub const STATUS_SUCCESS: Color32 = Color32::from_rgb(0x34, 0xd3, 0x99); // emerald-400
pub const STATUS_WARNING: Color32 = Color32::from_rgb(0xfb, 0xbf, 0x24); // amber-400
pub const STATUS_ERROR: Color32 = Color32::from_rgb(0xf8, 0x71, 0x71); // red-400

// =============================================================================
// COLORS - Buttons
// =============================================================================
pub const BTN_DEFAULT: Color32 = Color32::from_rgb(0x3f, 0x3f, 0x46); // zinc-700
pub const BTN_DISABLED_TEXT: Color32 = Color32::from_rgb(0x71, 0x71, 0x7a); // zinc-500

// =============================================================================
// TYPOGRAPHY - Font Sizes
// =============================================================================
pub const FONT_HEADING: f32 = 16.0;
pub const FONT_BODY: f32 = 14.0;
pub const FONT_LABEL: f32 = 13.0;
pub const FONT_SMALL: f32 = 11.0;

// =============================================================================
// DIMENSIONS
// =============================================================================
pub const ADDRESS_BAR_HEIGHT: f32 = 28.0;
pub const LOG_PANEL_HEIGHT: f32 = 180.0;

// =============================================================================
// CORNER RADIUS
// =============================================================================
pub const RADIUS_DEFAULT: f32 = 4.0;
pub const RADIUS_MEDIUM: f32 = 6.0;

// =============================================================================
// STROKE WIDTHS
// =============================================================================
pub const STROKE_DEFAULT: f32 = 1.0;
pub const STROKE_MEDIUM: f32 = 1.5;

// =============================================================================
// SPACING
// =============================================================================
pub const SPACING_XS: f32 = 2.0;
pub const SPACING_SM: f32 = 4.0;
pub const SPACING_MD: f32 = 8.0;
pub const SPACING_LG: f32 = 12.0;

// =============================================================================
// HELPER - Apply global visuals
// =============================================================================

/// Dark visuals tuned for the address bar: teal caret and focus ring,
/// neutral selection, flat inactive widgets.
pub fn apply_visuals(ctx: &egui::Context) {
    let mut visuals = egui::Visuals::dark();
    visuals.panel_fill = BG_BASE;
    visuals.window_fill = BG_ELEVATED;
    visuals.extreme_bg_color = BG_INPUT;
    visuals.faint_bg_color = BG_ELEVATED;
    visuals.hyperlink_color = ACCENT;
    visuals.selection.bg_fill = Color32::from_rgb(0x3a, 0x3a, 0x3f);
    visuals.selection.stroke = egui::Stroke::new(STROKE_DEFAULT, BORDER_FOCUS);
    visuals.text_cursor.stroke = egui::Stroke::new(STROKE_MEDIUM, ACCENT);
    visuals.interact_cursor = Some(egui::CursorIcon::PointingHand);

    let widgets = &mut visuals.widgets;
    for w in [&mut widgets.noninteractive, &mut widgets.inactive, &mut widgets.open] {
        w.bg_stroke = egui::Stroke::new(STROKE_DEFAULT, BORDER_SUBTLE);
        w.corner_radius = RADIUS_DEFAULT.into();
    }
    widgets.inactive.weak_bg_fill = BG_ELEVATED;
    widgets.inactive.fg_stroke = egui::Stroke::new(STROKE_DEFAULT, TEXT_SECONDARY);
    widgets.hovered.bg_fill = BG_HOVER;
    widgets.hovered.bg_stroke = egui::Stroke::new(STROKE_DEFAULT, BORDER_FOCUS);
    widgets.hovered.corner_radius = RADIUS_DEFAULT.into();
    widgets.active.bg_stroke = egui::Stroke::new(STROKE_DEFAULT, ACCENT);
    widgets.active.corner_radius = RADIUS_DEFAULT.into();

    ctx.set_visuals(visuals);
    ctx.style_mut(|style| {
        style.interaction.selectable_labels = false;
        style.spacing.item_spacing = egui::vec2(SPACING_MD, 6.0);
        style.spacing.button_padding = egui::vec2(SPACING_LG, 6.0);
    });
}

// =============================================================================
// HELPER - Address bar frame
// =============================================================================
pub fn address_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(BG_INPUT)
        .stroke(egui::Stroke::new(STROKE_DEFAULT, BORDER_SUBTLE))
        .corner_radius(RADIUS_MEDIUM)
        .inner_margin(egui::Margin::symmetric(4, 2))
}

// =============================================================================
// HELPER - Section panel frame (with border)
// =============================================================================
pub fn section_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(Color32::from_rgb(0x14, 0x14, 0x18))
        .stroke(egui::Stroke::new(STROKE_DEFAULT, BORDER_SUBTLE))
        .corner_radius(RADIUS_DEFAULT)
        .inner_margin(egui::Margin::same(SPACING_LG as i8))
}

/// Default gray button
pub fn button(text: impl Into<String>) -> egui::Button<'static> {
    egui::Button::new(text.into())
        .fill(BTN_DEFAULT)
        .corner_radius(RADIUS_DEFAULT)
}

/// Background of the trigger button: none while inactive, a lifted fill
/// on hover and a slightly shrunk one while pressed.
pub fn trigger_visual(
    response: &egui::Response,
    active: bool,
    rect: egui::Rect,
) -> Option<(Color32, egui::Rect)> {
    if !active {
        None
    } else if response.is_pointer_button_down_on() {
        Some((lighten(BG_INPUT, 0.06), rect.shrink(1.5)))
    } else if response.hovered() {
        Some((lighten(BG_INPUT, 0.12), rect))
    } else {
        None
    }
}

fn lighten(c: Color32, amount: f32) -> Color32 {
    let r = (c.r() as f32 + (255.0 - c.r() as f32) * amount) as u8;
    let g = (c.g() as f32 + (255.0 - c.g() as f32) * amount) as u8;
    let b = (c.b() as f32 + (255.0 - c.b() as f32) * amount) as u8;
    Color32::from_rgb(r, g, b)
}
