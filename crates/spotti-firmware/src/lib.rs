//! ESP32-S3 firmware-specific modules for spotti
//!
//! This crate contains the hardware- and network-facing code that cannot
//! compile on desktop targets: WiFi bring-up, SNTP time sync, the HTTP
//! price fetch, the wall-clock anchor, and WiFi credential management.

#![no_std]

extern crate alloc;

pub mod fetch;
pub mod http;
pub mod net;
pub mod sntp;
pub mod wall_clock;
pub mod wifi_secrets;
