//! The main price page.
//!
//! Header with the local clock, a large readout of the current quarter-hour
//! price coloured by its band, and the hourly bar chart: today's 24 bars
//! with the current hour highlighted, extended by tomorrow's 24 once the
//! next day's prices are published. Until the first aggregate arrives the
//! page shows a loading splash.

use core::cell::Cell;
use core::fmt::Write;

use embedded_graphics::mono_font::ascii::{FONT_6X10, FONT_10X20};
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};
use embedded_graphics::Drawable as EgDrawable;
use heapless::String;

use crate::chart::{ChartModel, PriceBand};
use crate::clock::{CivilDateTime, Instant};
use crate::config::{Thresholds, DISPLAY_WIDTH_PX};
use crate::prices::{AggregatedPrices, HOUR_SLOTS};

use super::constants::{
    CHART_HEIGHT_PX, CHART_LEFT_PX, CHART_TOP_PX, DARK_GRAY, DIVIDER_GRAY, GRID_GRAY,
    HEADER_PADDING_PX, HEADER_RULE_Y_PX, HEADER_TEXT_Y_PX, HOUR_LABEL_GAP_PX, HOUR_LABEL_STEP,
    LIGHT_GRAY, READOUT_BASELINE_Y_PX, READOUT_RULE_Y_PX, READOUT_SHIFT_LEFT_PX, SLOT_LABEL_Y_PX,
    SPLASH_BASELINE_Y_PX, UNIT_LABEL_X_PX, UNIT_LABEL_Y_PX,
};

/// Price display page.
pub struct PricePage {
    /// Latest published aggregate, if any fetch cycle has produced one.
    prices: Option<AggregatedPrices>,
    /// Local wall-clock time of the upcoming draw.
    now: CivilDateTime,
    thresholds: Thresholds,
    /// Whether the page needs to be redrawn
    dirty: Cell<bool>,
}

impl PricePage {
    pub fn new() -> Self {
        Self {
            prices: None,
            now: CivilDateTime::from_instant(Instant::from_secs(0), 0),
            thresholds: Thresholds::default(),
            dirty: Cell::new(true),
        }
    }

    /// Update the wall clock shown in the header and used for the
    /// current-slot readout and the highlighted bar.
    pub fn set_clock(&mut self, now: CivilDateTime) {
        if now != self.now {
            self.now = now;
            self.dirty.set(true);
        }
    }

    /// Replace the displayed aggregate with a fresh snapshot.
    pub fn set_prices(&mut self, prices: AggregatedPrices) {
        if self.prices != Some(prices) {
            self.prices = Some(prices);
            self.dirty.set(true);
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.get()
    }

    pub fn mark_dirty(&mut self) {
        self.dirty.set(true);
    }

    /// Render the page. Clears the dirty flag; a clean page draws nothing.
    pub fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        if !self.dirty.get() {
            return Ok(());
        }

        display.clear(Rgb565::BLACK)?;

        let center_x = (DISPLAY_WIDTH_PX / 2) as i32;
        let small_white = MonoTextStyle::new(&FONT_6X10, Rgb565::WHITE);

        // Header: title on the left, local time on the right.
        EgDrawable::draw(
            &Text::with_baseline(
                "PORSSISAHKO FI",
                Point::new(HEADER_PADDING_PX, HEADER_TEXT_Y_PX),
                small_white,
                Baseline::Top,
            ),
            display,
        )?;

        let mut clock_text: String<8> = String::new();
        let _ = write!(clock_text, "{:02}:{:02}", self.now.hour, self.now.minute);
        let right_top = TextStyleBuilder::new()
            .alignment(Alignment::Right)
            .baseline(Baseline::Top)
            .build();
        EgDrawable::draw(
            &Text::with_text_style(
                &clock_text,
                Point::new(DISPLAY_WIDTH_PX as i32 - HEADER_PADDING_PX, HEADER_TEXT_Y_PX),
                small_white,
                right_top,
            ),
            display,
        )?;
        hline(display, HEADER_RULE_Y_PX, DARK_GRAY)?;

        // Waiting splash until the first aggregate is published.
        let Some(prices) = &self.prices else {
            EgDrawable::draw(
                &Text::with_alignment(
                    "Ladataan...",
                    Point::new(center_x, SPLASH_BASELINE_Y_PX),
                    MonoTextStyle::new(&FONT_10X20, Rgb565::YELLOW),
                    Alignment::Center,
                ),
                display,
            )?;
            self.dirty.set(false);
            return Ok(());
        };

        // Large readout of the current 15-minute slot.
        let current = prices.price_at(&self.now);
        let band = PriceBand::classify(current, &self.thresholds);

        let mut value_text: String<12> = String::new();
        let _ = write!(value_text, "{current:.2}");
        EgDrawable::draw(
            &Text::with_alignment(
                &value_text,
                Point::new(center_x - READOUT_SHIFT_LEFT_PX, READOUT_BASELINE_Y_PX),
                MonoTextStyle::new(&FONT_10X20, band.color()),
                Alignment::Center,
            ),
            display,
        )?;
        EgDrawable::draw(
            &Text::with_baseline(
                "c/kWh",
                Point::new(UNIT_LABEL_X_PX, UNIT_LABEL_Y_PX),
                small_white,
                Baseline::Top,
            ),
            display,
        )?;

        let mut slot_text: String<12> = String::new();
        let _ = write!(
            slot_text,
            "klo {:02}:{:02}",
            self.now.hour,
            self.now.minute / 15 * 15
        );
        EgDrawable::draw(
            &Text::with_alignment(
                &slot_text,
                Point::new(center_x, SLOT_LABEL_Y_PX),
                MonoTextStyle::new(&FONT_6X10, LIGHT_GRAY),
                Alignment::Center,
            ),
            display,
        )?;
        hline(display, READOUT_RULE_Y_PX, DARK_GRAY)?;

        // Bar chart.
        let plot = Rectangle::new(
            Point::new(CHART_LEFT_PX, CHART_TOP_PX),
            Size::new(DISPLAY_WIDTH_PX - CHART_LEFT_PX as u32, CHART_HEIGHT_PX),
        );
        let model = ChartModel::new(prices, self.thresholds, plot, self.now.hour);

        Rectangle::new(
            Point::new(plot.top_left.x, model.mid_y()),
            Size::new(plot.size.width, 1),
        )
        .into_styled(PrimitiveStyle::with_fill(GRID_GRAY))
        .draw(display)?;

        if let Some(divider_x) = model.divider_x() {
            Rectangle::new(
                Point::new(divider_x, plot.top_left.y),
                Size::new(1, plot.size.height),
            )
            .into_styled(PrimitiveStyle::with_fill(DIVIDER_GRAY))
            .draw(display)?;
        }

        let label_y = plot.top_left.y + plot.size.height as i32 + HOUR_LABEL_GAP_PX;
        let label_style = MonoTextStyle::new(&FONT_6X10, LIGHT_GRAY);
        for (index, bar) in model.bars().enumerate() {
            bar.rect
                .into_styled(PrimitiveStyle::with_fill(bar.paint.color()))
                .draw(display)?;

            if index % HOUR_LABEL_STEP == 0 {
                let mut hour_text: String<4> = String::new();
                let _ = write!(hour_text, "{:02}", index % HOUR_SLOTS);
                EgDrawable::draw(
                    &Text::with_baseline(
                        &hour_text,
                        Point::new(bar.rect.top_left.x + 1, label_y),
                        label_style,
                        Baseline::Top,
                    ),
                    display,
                )?;
            }
        }

        // Scale annotations on the left margin: max, midpoint, zero.
        let scale_style = MonoTextStyle::new(&FONT_6X10, DARK_GRAY);
        let scale = model.scale();

        let mut max_text: String<8> = String::new();
        let _ = write!(max_text, "{:.0}", scale.max_value);
        EgDrawable::draw(
            &Text::with_baseline(&max_text, Point::new(0, plot.top_left.y), scale_style, Baseline::Top),
            display,
        )?;

        let mut mid_text: String<8> = String::new();
        let _ = write!(mid_text, "{:.0}", scale.mid_value);
        EgDrawable::draw(
            &Text::with_baseline(
                &mid_text,
                Point::new(0, model.mid_y() - 4),
                scale_style,
                Baseline::Top,
            ),
            display,
        )?;

        EgDrawable::draw(
            &Text::with_baseline(
                "0",
                Point::new(0, plot.top_left.y + plot.size.height as i32 - 8),
                scale_style,
                Baseline::Top,
            ),
            display,
        )?;

        self.dirty.set(false);
        Ok(())
    }
}

impl Default for PricePage {
    fn default() -> Self {
        Self::new()
    }
}

fn hline<D: DrawTarget<Color = Rgb565>>(
    display: &mut D,
    y: i32,
    color: Rgb565,
) -> Result<(), D::Error> {
    Rectangle::new(Point::new(0, y), Size::new(DISPLAY_WIDTH_PX, 1))
        .into_styled(PrimitiveStyle::with_fill(color))
        .draw(display)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::CivilDate;

    fn at(hour: u8, minute: u8) -> CivilDateTime {
        CivilDateTime {
            date: CivilDate::new(2025, 2, 24),
            hour,
            minute,
            second: 0,
        }
    }

    #[test]
    fn clock_change_marks_the_page_dirty() {
        let mut page = PricePage::new();
        page.dirty.set(false);

        page.set_clock(at(14, 35));
        assert!(page.is_dirty());

        page.dirty.set(false);
        page.set_clock(at(14, 35));
        assert!(!page.is_dirty());
    }

    #[test]
    fn republishing_an_identical_aggregate_stays_clean() {
        let mut page = PricePage::new();
        let prices = AggregatedPrices::default();

        page.set_prices(prices);
        assert!(page.is_dirty());

        page.dirty.set(false);
        page.set_prices(prices);
        assert!(!page.is_dirty());
    }
}
