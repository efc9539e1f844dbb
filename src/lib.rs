//! Web Address Bar - browser-style address bar control for egui
//!
//! The control owns a text field, a certificate/status label and a trigger
//! button. Pressing the button or hitting Enter publishes an [`ActionEvent`]
//! carrying whatever [`AddressBarAction`] the host configured last.

pub mod action;
pub mod address_bar;
pub mod constants;
pub mod events;
pub mod layout;
pub mod settings;
pub mod theme;
pub mod ui;
pub mod utils;

pub use action::{ActionEvent, AddressBarAction};
pub use address_bar::{AddressBar, AddressBarOptions, StatusTone};
pub use events::{EventSource, SubscriptionId};
pub use layout::{compute_inset, LabelMargins};
pub use ui::AddressBarOutput;
