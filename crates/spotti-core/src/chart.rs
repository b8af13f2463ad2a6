//! Render parameters for the price bar chart.
//!
//! Pure derivation from an [`AggregatedPrices`] snapshot: colour bands, the
//! vertical scale, and per-bar geometry. The pages consume these; nothing
//! here touches a display.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::config::{Thresholds, CHART_SCALE_FLOOR};
use crate::prices::{AggregatedPrices, HOUR_SLOTS};

/// Colour band of a price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceBand {
    Low,
    Mid,
    High,
}

impl PriceBand {
    /// Classify a price against the thresholds.
    ///
    /// A price exactly at the low threshold is already `Mid`; a price
    /// exactly at the high threshold is already `High`.
    pub fn classify(price: f32, thresholds: &Thresholds) -> Self {
        if price < thresholds.low {
            Self::Low
        } else if price < thresholds.high {
            Self::Mid
        } else {
            Self::High
        }
    }

    /// Display colour of the band.
    ///
    /// RGB565 from 8-bit RGB: R>>3, G>>2, B>>3.
    pub fn color(self) -> Rgb565 {
        match self {
            Self::Low => Rgb565::new(0, 210 >> 2, 0),
            Self::Mid => Rgb565::new(220 >> 3, 180 >> 2, 0),
            Self::High => Rgb565::new(220 >> 3, 30 >> 2, 0),
        }
    }
}

/// Vertical scale of the chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartScale {
    pub max_value: f32,
    pub mid_value: f32,
}

impl ChartScale {
    /// Scale covering today's (and, once published, tomorrow's) hourly
    /// averages, never below [`CHART_SCALE_FLOOR`].
    pub fn derive(prices: &AggregatedPrices) -> Self {
        let mut max_value = CHART_SCALE_FLOOR;
        for &value in &prices.hourly_today {
            max_value = max_value.max(value);
        }
        if prices.has_tomorrow {
            for &value in &prices.hourly_tomorrow {
                max_value = max_value.max(value);
            }
        }
        Self {
            max_value,
            mid_value: max_value / 2.0,
        }
    }
}

/// Screen rectangle of bar `index` out of `num_bars` across `plot`.
///
/// Bar width is fractional and each x is truncated independently, so
/// neighbouring bars may leave a one-pixel gap. Height is rounded and
/// floored at two pixels so a zero-price bar stays visible as a sliver.
pub fn bar_geometry(
    index: usize,
    num_bars: usize,
    value: f32,
    max_value: f32,
    plot: Rectangle,
) -> Rectangle {
    let bar_width = plot.size.width as f32 / num_bars as f32;
    let height = (((value / max_value) * plot.size.height as f32 + 0.5) as i32).max(2);
    let x = plot.top_left.x + (index as f32 * bar_width) as i32;
    let y = plot.top_left.y + plot.size.height as i32 - height;
    let width = (bar_width as i32 - 1).max(1) as u32;
    Rectangle::new(Point::new(x, y), Size::new(width, height as u32))
}

/// How a bar should be painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarPaint {
    /// The current-hour bar of the today series.
    Highlight,
    /// Any other bar, coloured by its price band.
    Band(PriceBand),
}

impl BarPaint {
    pub fn color(self) -> Rgb565 {
        match self {
            Self::Highlight => Rgb565::WHITE,
            Self::Band(band) => band.color(),
        }
    }
}

/// One renderable bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    pub rect: Rectangle,
    pub paint: BarPaint,
}

/// Everything the renderer needs to draw the bar chart.
pub struct ChartModel<'a> {
    prices: &'a AggregatedPrices,
    thresholds: Thresholds,
    plot: Rectangle,
    current_hour: u8,
    scale: ChartScale,
}

impl<'a> ChartModel<'a> {
    pub fn new(
        prices: &'a AggregatedPrices,
        thresholds: Thresholds,
        plot: Rectangle,
        current_hour: u8,
    ) -> Self {
        Self {
            prices,
            thresholds,
            plot,
            current_hour,
            scale: ChartScale::derive(prices),
        }
    }

    pub fn scale(&self) -> ChartScale {
        self.scale
    }

    /// 24 bars for today alone, 48 once tomorrow is published.
    pub fn num_bars(&self) -> usize {
        if self.prices.has_tomorrow {
            HOUR_SLOTS * 2
        } else {
            HOUR_SLOTS
        }
    }

    /// Bar `index`, where 0-23 are today's hours and 24-47 tomorrow's.
    ///
    /// Today's current-hour bar is highlighted regardless of its price.
    pub fn bar(&self, index: usize) -> Bar {
        let (value, is_today) = if index < HOUR_SLOTS {
            (self.prices.hourly_today[index], true)
        } else {
            (self.prices.hourly_tomorrow[index - HOUR_SLOTS], false)
        };

        let paint = if is_today && index == usize::from(self.current_hour) {
            BarPaint::Highlight
        } else {
            BarPaint::Band(PriceBand::classify(value, &self.thresholds))
        };

        Bar {
            rect: bar_geometry(index, self.num_bars(), value, self.scale.max_value, self.plot),
            paint,
        }
    }

    /// All bars, left to right.
    pub fn bars(&self) -> impl Iterator<Item = Bar> + '_ {
        (0..self.num_bars()).map(move |index| self.bar(index))
    }

    /// Gridline y for the scale midpoint.
    pub fn mid_y(&self) -> i32 {
        self.plot.top_left.y + self.plot.size.height as i32 / 2
    }

    /// x of the today/tomorrow divider; present only with 48 bars.
    pub fn divider_x(&self) -> Option<i32> {
        if !self.prices.has_tomorrow {
            return None;
        }
        let bar_width = self.plot.size.width as f32 / self.num_bars() as f32;
        Some(self.plot.top_left.x + (HOUR_SLOTS as f32 * bar_width) as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plot() -> Rectangle {
        Rectangle::new(Point::new(18, 93), Size::new(302, 125))
    }

    #[test]
    fn band_boundaries_are_asymmetric() {
        let thresholds = Thresholds::default();
        assert_eq!(PriceBand::classify(9.99, &thresholds), PriceBand::Low);
        assert_eq!(PriceBand::classify(10.0, &thresholds), PriceBand::Mid);
        assert_eq!(PriceBand::classify(19.99, &thresholds), PriceBand::Mid);
        assert_eq!(PriceBand::classify(20.0, &thresholds), PriceBand::High);
        assert_eq!(PriceBand::classify(20.01, &thresholds), PriceBand::High);
        assert_eq!(PriceBand::classify(-1.5, &thresholds), PriceBand::Low);
    }

    #[test]
    fn scale_never_drops_below_the_floor() {
        let mut prices = AggregatedPrices::default();
        prices.hourly_today = [3.0; HOUR_SLOTS];

        let scale = ChartScale::derive(&prices);
        assert_eq!(scale.max_value, 20.0);
        assert_eq!(scale.mid_value, 10.0);
    }

    #[test]
    fn scale_follows_the_dearest_hour() {
        let mut prices = AggregatedPrices::default();
        prices.hourly_today[17] = 42.0;

        let scale = ChartScale::derive(&prices);
        assert_eq!(scale.max_value, 42.0);
        assert_eq!(scale.mid_value, 21.0);
    }

    #[test]
    fn scale_counts_tomorrow_only_once_published() {
        let mut prices = AggregatedPrices::default();
        prices.hourly_tomorrow[8] = 99.0;

        assert_eq!(ChartScale::derive(&prices).max_value, 20.0);

        prices.has_tomorrow = true;
        assert_eq!(ChartScale::derive(&prices).max_value, 99.0);
    }

    #[test]
    fn zero_value_bars_keep_a_two_pixel_sliver() {
        let rect = bar_geometry(0, 24, 0.0, 20.0, plot());
        assert_eq!(rect.size.height, 2);

        let rect = bar_geometry(3, 48, 0.1, 50.0, plot());
        assert_eq!(rect.size.height, 2);
    }

    #[test]
    fn bar_heights_round_and_anchor_to_the_plot_bottom() {
        let plot = plot();
        let rect = bar_geometry(0, 24, 10.0, 20.0, plot);
        // 10/20 of 125 px is 62.5, rounded up.
        assert_eq!(rect.size.height, 63);
        assert_eq!(
            rect.top_left.y + rect.size.height as i32,
            plot.top_left.y + plot.size.height as i32
        );

        let full = bar_geometry(0, 24, 20.0, 20.0, plot);
        assert_eq!(full.size.height, 125);
        assert_eq!(full.top_left.y, plot.top_left.y);
    }

    #[test]
    fn bars_stay_inside_the_plot_width() {
        let plot = plot();
        for num_bars in [24usize, 48] {
            for index in 0..num_bars {
                let rect = bar_geometry(index, num_bars, 5.0, 20.0, plot);
                assert!(rect.top_left.x >= plot.top_left.x);
                assert!(
                    rect.top_left.x + rect.size.width as i32
                        <= plot.top_left.x + plot.size.width as i32,
                    "bar {index}/{num_bars} overflows"
                );
            }
        }
    }

    #[test]
    fn current_hour_is_highlighted_in_the_today_series_only() {
        let mut prices = AggregatedPrices::default();
        prices.hourly_today = [30.0; HOUR_SLOTS];
        prices.hourly_tomorrow = [30.0; HOUR_SLOTS];
        prices.has_tomorrow = true;

        let model = ChartModel::new(&prices, Thresholds::default(), plot(), 7);
        assert_eq!(model.bar(7).paint, BarPaint::Highlight);
        assert_eq!(model.bar(8).paint, BarPaint::Band(PriceBand::High));
        // Tomorrow's 07:00 bar is an ordinary banded bar.
        assert_eq!(model.bar(24 + 7).paint, BarPaint::Band(PriceBand::High));
    }

    #[test]
    fn bar_count_and_divider_track_tomorrow() {
        let mut prices = AggregatedPrices::default();

        let model = ChartModel::new(&prices, Thresholds::default(), plot(), 0);
        assert_eq!(model.num_bars(), 24);
        assert_eq!(model.divider_x(), None);

        prices.has_tomorrow = true;
        let model = ChartModel::new(&prices, Thresholds::default(), plot(), 0);
        assert_eq!(model.num_bars(), 48);
        let divider = model.divider_x().unwrap();
        // The divider sits at the boundary between bar 23 and bar 24.
        assert_eq!(divider, model.bar(24).rect.top_left.x);
    }
}
