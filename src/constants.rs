//! Application constants and configuration

pub const APP_NAME: &str = "Web Address Bar";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const LOG_FILE_NAME: &str = "web-address-bar.log";
pub const DEFAULT_LOG_FILTER: &str = "info,web_address_bar=debug";
