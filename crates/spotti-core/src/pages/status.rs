//! Boot and error status screens.
//!
//! One centered line of text, shown while the firmware brings up WiFi,
//! synchronizes the clock, and runs the first fetch, and as the terminal
//! screen when WiFi cannot be joined.

use core::cell::Cell;

use embedded_graphics::mono_font::ascii::FONT_10X20;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Alignment, Text};
use embedded_graphics::Drawable as EgDrawable;

use crate::config::{DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX};

/// Full-screen, single-line status page.
pub struct StatusPage {
    message: &'static str,
    color: Rgb565,
    /// Whether the page needs to be redrawn
    dirty: Cell<bool>,
}

impl StatusPage {
    pub fn new(message: &'static str, color: Rgb565) -> Self {
        Self {
            message,
            color,
            dirty: Cell::new(true),
        }
    }

    /// Shown while WiFi association is in progress.
    pub fn connecting() -> Self {
        Self::new("Yhdistetaan WiFiin...", Rgb565::WHITE)
    }

    /// Shown while the clock is synchronized over SNTP.
    pub fn syncing_time() -> Self {
        Self::new("Haetaan aika (NTP)...", Rgb565::YELLOW)
    }

    /// Shown during the first price fetch.
    pub fn fetching() -> Self {
        Self::new("Haetaan hinnat...", Rgb565::YELLOW)
    }

    /// Terminal screen when WiFi cannot be joined.
    pub fn wifi_failed() -> Self {
        Self::new("WiFi-yhteys eponnistui!", Rgb565::RED)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.get()
    }

    pub fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        if !self.dirty.get() {
            return Ok(());
        }

        display.clear(Rgb565::BLACK)?;

        EgDrawable::draw(
            &Text::with_alignment(
                self.message,
                Point::new((DISPLAY_WIDTH_PX / 2) as i32, (DISPLAY_HEIGHT_PX / 2) as i32),
                MonoTextStyle::new(&FONT_10X20, self.color),
                Alignment::Center,
            ),
            display,
        )?;

        self.dirty.set(false);
        Ok(())
    }
}
