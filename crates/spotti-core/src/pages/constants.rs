//! Layout and palette constants for the display pages.
//!
//! The panel is a 320x240 landscape TFT.

use embedded_graphics::pixelcolor::Rgb565;

// Color constants
// RGB565 format: R(5 bits), G(6 bits), B(5 bits)
// Convert from 8-bit RGB: R>>3, G>>2, B>>3
/// Separator rules and the scale annotations.
pub(super) const DARK_GRAY: Rgb565 = Rgb565::new(123 >> 3, 125 >> 2, 123 >> 3);

/// Hour and slot labels.
pub(super) const LIGHT_GRAY: Rgb565 = Rgb565::new(211 >> 3, 211 >> 2, 211 >> 3);

/// Mid-scale gridline, fainter than the rules.
pub(super) const GRID_GRAY: Rgb565 = Rgb565::new(60 >> 3, 60 >> 2, 60 >> 3);

/// Divider between the today and tomorrow bar series.
pub(super) const DIVIDER_GRAY: Rgb565 = Rgb565::new(80 >> 3, 80 >> 2, 80 >> 3);

// ============================================================================
// Header Layout
// ============================================================================

/// Horizontal padding of the header texts in pixels
pub(super) const HEADER_PADDING_PX: i32 = 4;

/// Top of the header text row in pixels
pub(super) const HEADER_TEXT_Y_PX: i32 = 4;

/// y of the rule under the header in pixels
pub(super) const HEADER_RULE_Y_PX: i32 = 16;

// ============================================================================
// Current-Price Readout
// ============================================================================

/// Baseline of the large price readout in pixels
pub(super) const READOUT_BASELINE_Y_PX: i32 = 52;

/// Leftward shift of the readout centre, leaving room for the unit label
pub(super) const READOUT_SHIFT_LEFT_PX: i32 = 20;

/// Top-left of the `c/kWh` unit label in pixels
pub(super) const UNIT_LABEL_X_PX: i32 = 262;
pub(super) const UNIT_LABEL_Y_PX: i32 = 46;

/// Baseline of the `klo HH:MM` slot label in pixels
pub(super) const SLOT_LABEL_Y_PX: i32 = 84;

/// y of the rule under the readout in pixels
pub(super) const READOUT_RULE_Y_PX: i32 = 90;

// ============================================================================
// Bar Chart
// ============================================================================

/// Left margin of the plot area, keeps room for the scale annotations
pub(super) const CHART_LEFT_PX: i32 = 18;

/// Top of the plot area in pixels
pub(super) const CHART_TOP_PX: i32 = 93;

/// Height of the plot area in pixels
pub(super) const CHART_HEIGHT_PX: u32 = 125;

/// Gap between the plot bottom and the hour labels in pixels
pub(super) const HOUR_LABEL_GAP_PX: i32 = 3;

/// An hour label under every sixth bar
pub(super) const HOUR_LABEL_STEP: usize = 6;

// ============================================================================
// Splash
// ============================================================================

/// Baseline of the `Ladataan...` splash line in pixels
pub(super) const SPLASH_BASELINE_Y_PX: i32 = 120;
