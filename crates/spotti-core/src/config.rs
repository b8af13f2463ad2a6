//! Compile-time configuration for the spot-price display.

/// Prices below this are in the low (green) band, c/kWh.
pub const PRICE_LOW_THRESHOLD: f32 = 10.0;

/// Prices at or above this are in the high (red) band, c/kWh.
pub const PRICE_HIGH_THRESHOLD: f32 = 20.0;

/// Minimum chart maximum, c/kWh. Keeps near-zero price days from
/// over-compressing the bars.
pub const CHART_SCALE_FLOOR: f32 = 20.0;

/// How often the feed is re-fetched.
pub const FETCH_INTERVAL_SECS: u64 = 3600;

/// How often the screen is redrawn.
pub const REDRAW_INTERVAL_SECS: u64 = 60;

/// Price feed endpoint. The document is public data; the device ships no CA
/// bundle, so the transfer runs over plain HTTP.
pub const FEED_HOST: &str = "api.porssisahko.net";
pub const FEED_PATH: &str = "/v2/latest-prices.json";
pub const FEED_PORT: u16 = 80;

/// Landscape panel dimensions.
pub const DISPLAY_WIDTH_PX: u32 = 320;
pub const DISPLAY_HEIGHT_PX: u32 = 240;

/// Colour-band thresholds, c/kWh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// Exclusive upper bound of the low band.
    pub low: f32,
    /// Inclusive lower bound of the high band.
    pub high: f32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            low: PRICE_LOW_THRESHOLD,
            high: PRICE_HIGH_THRESHOLD,
        }
    }
}
