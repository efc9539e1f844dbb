//! Text field inset driven by the status label width

/// Gap between the status label's right margin and the start of the text.
pub const LABEL_GAP: f32 = 2.0;

/// Horizontal margins around the status label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelMargins {
    pub left: f32,
    pub right: f32,
}

impl Default for LabelMargins {
    fn default() -> Self {
        Self {
            left: 4.0,
            right: 4.0,
        }
    }
}

/// Left inset for the text field so it starts right after the label.
pub fn compute_inset(label_width: f32, margin_left: f32, margin_right: f32) -> f32 {
    label_width + margin_left + margin_right + LABEL_GAP
}
