//! Action tag shown by the trigger button and the event payload it fires

use serde::{Deserialize, Serialize};
use std::fmt;

/// What the consumer of a trigger should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AddressBarAction {
    /// Navigate to the address currently in the text field.
    #[default]
    Navigate,
    /// Cancel the navigation in progress.
    CancelNavigation,
    /// Reload the current page.
    Refresh,
}

impl AddressBarAction {
    pub const ALL: [AddressBarAction; 3] = [
        AddressBarAction::Navigate,
        AddressBarAction::CancelNavigation,
        AddressBarAction::Refresh,
    ];

    /// Phosphor glyph drawn on the trigger button
    pub fn icon(self) -> &'static str {
        match self {
            AddressBarAction::Navigate => egui_phosphor::regular::ARROW_RIGHT,
            AddressBarAction::CancelNavigation => egui_phosphor::regular::X,
            AddressBarAction::Refresh => egui_phosphor::regular::ARROW_CLOCKWISE,
        }
    }

    pub fn tooltip(self) -> &'static str {
        match self {
            AddressBarAction::Navigate => "Go to address",
            AddressBarAction::CancelNavigation => "Stop loading this page",
            AddressBarAction::Refresh => "Reload this page",
        }
    }
}

impl fmt::Display for AddressBarAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressBarAction::Navigate => write!(f, "Navigate"),
            AddressBarAction::CancelNavigation => write!(f, "CancelNavigation"),
            AddressBarAction::Refresh => write!(f, "Refresh"),
        }
    }
}

/// Payload of a trigger: the action configured at the moment it fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionEvent {
    action_required: AddressBarAction,
}

impl ActionEvent {
    pub fn new(action_required: AddressBarAction) -> Self {
        Self { action_required }
    }

    pub fn action_required(&self) -> AddressBarAction {
        self.action_required
    }
}
