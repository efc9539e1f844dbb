//! Simulated page load driving the address bar's action tag
//!
//! The host decides which action the bar shows; this is where that decision
//! lives for the demo. No network access: a load is a timestamp that
//! completes after a fixed delay.

use std::time::{Duration, Instant};
use web_address_bar::{AddressBarAction, StatusTone};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum PageLoad {
    #[default]
    Idle,
    Loading { address: String, started: Instant },
    Loaded { address: String },
}

impl PageLoad {
    pub fn start(&mut self, address: impl Into<String>, now: Instant) {
        *self = PageLoad::Loading {
            address: address.into(),
            started: now,
        };
    }

    /// Stop a load in progress. Returns false if nothing was loading.
    pub fn cancel(&mut self) -> bool {
        if matches!(self, PageLoad::Loading { .. }) {
            *self = PageLoad::Idle;
            true
        } else {
            false
        }
    }

    /// Advance the simulated load. Returns true on the frame it completes.
    pub fn poll(&mut self, now: Instant, load_time: Duration) -> bool {
        if let PageLoad::Loading { address, started } = self {
            if now.saturating_duration_since(*started) >= load_time {
                let address = std::mem::take(address);
                *self = PageLoad::Loaded { address };
                return true;
            }
        }
        false
    }

    pub fn address(&self) -> Option<&str> {
        match self {
            PageLoad::Idle => None,
            PageLoad::Loading { address, .. } | PageLoad::Loaded { address } => Some(address),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, PageLoad::Loading { .. })
    }

    /// Action the bar should offer given the page state and what is typed.
    pub fn desired_action(&self, typed: &str) -> AddressBarAction {
        match self {
            PageLoad::Idle => AddressBarAction::Navigate,
            PageLoad::Loading { .. } => AddressBarAction::CancelNavigation,
            PageLoad::Loaded { address } if address.as_str() == typed.trim() => AddressBarAction::Refresh,
            PageLoad::Loaded { .. } => AddressBarAction::Navigate,
        }
    }
}

/// Certificate label for an address, from its scheme only.
pub fn status_for(address: &str) -> (&'static str, StatusTone) {
    let lower = address.trim().to_ascii_lowercase();
    if lower.starts_with("https://") {
        ("Secure", StatusTone::Secure)
    } else if lower.starts_with("http://") {
        ("Not secure", StatusTone::Insecure)
    } else {
        ("", StatusTone::Neutral)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOAD: Duration = Duration::from_millis(500);

    #[test]
    fn idle_offers_navigate() {
        assert_eq!(PageLoad::Idle.desired_action("x"), AddressBarAction::Navigate);
    }

    #[test]
    fn load_lifecycle() {
        let t0 = Instant::now();
        let mut page = PageLoad::default();
        page.start("https://example.com", t0);
        assert!(page.is_loading());
        assert_eq!(page.desired_action("https://example.com"), AddressBarAction::CancelNavigation);

        assert!(!page.poll(t0 + Duration::from_millis(100), LOAD));
        assert!(page.poll(t0 + LOAD, LOAD));
        assert!(!page.poll(t0 + LOAD * 2, LOAD));

        assert_eq!(page.address(), Some("https://example.com"));
        assert_eq!(page.desired_action("https://example.com"), AddressBarAction::Refresh);
        assert_eq!(page.desired_action("https://other.example"), AddressBarAction::Navigate);
    }

    #[test]
    fn cancel_only_affects_loading() {
        let t0 = Instant::now();
        let mut page = PageLoad::default();
        assert!(!page.cancel());

        page.start("a", t0);
        assert!(page.cancel());
        assert_eq!(page, PageLoad::Idle);

        page.start("a", t0);
        page.poll(t0 + LOAD, LOAD);
        assert!(!page.cancel());
        assert_eq!(page.address(), Some("a"));
    }

    #[test]
    fn status_from_scheme() {
        assert_eq!(status_for("https://a.example").1, StatusTone::Secure);
        assert_eq!(status_for("HTTP://a.example").1, StatusTone::Insecure);
        assert_eq!(status_for("a.example"), ("", StatusTone::Neutral));
    }
}
