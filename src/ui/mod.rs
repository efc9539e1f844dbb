//! UI module - egui rendering of the address bar
//!
//! State and contract live in [`crate::address_bar`]; this module turns egui
//! responses into trigger inputs and paints the three child elements.

pub mod components;

pub use components::AddressBarOutput;
