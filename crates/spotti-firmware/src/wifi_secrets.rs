//! WiFi credentials, injected at build time.
//!
//! `build.rs` loads `WIFI_SSID` / `WIFI_PASSWORD` from the environment (or a
//! `.env` file next to this crate) and re-exports them to `env!`. Missing
//! values fall back to placeholders so the crate still builds without a
//! `.env`; change them before flashing.

pub const WIFI_SSID: &str = match option_env!("WIFI_SSID") {
    Some(ssid) => ssid,
    None => "SSID",
};

pub const WIFI_PASSWORD: &str = match option_env!("WIFI_PASSWORD") {
    Some(password) => password,
    None => "PASSWORD",
};
