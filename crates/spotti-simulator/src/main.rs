//! Desktop simulator for the spotti spot-price display.
//!
//! Renders the spotti-core price page in an SDL2 window via
//! `embedded-graphics-simulator`, feeding it a synthetic feed so the whole
//! pipeline (ISO timestamp parsing, local-day aggregation, chart derivation,
//! drawing) runs without hardware or network.
//!
//! # Key bindings
//!
//! | Key         | Action                                         |
//! |-------------|------------------------------------------------|
//! | T           | toggle tomorrow's prices (the ~14:00 release)  |
//! | Left/Right  | move the mock clock one hour                   |
//! | Q / Escape  | quit                                           |

use std::time::Duration;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{
    sdl2::Keycode, OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window,
};
use log::info;

use spotti_core::clock::{parse_utc, CivilDate, CivilDateTime, Instant};
use spotti_core::config::{DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX};
use spotti_core::feed::PriceEntry;
use spotti_core::pages::PricePage;
use spotti_core::prices::{aggregate, AggregatedPrices, HOUR_SLOTS, QUARTER_SLOTS};
use spotti_core::state::PriceStore;
use spotti_core::timezone::{Helsinki, TimeZone};

// ---------------------------------------------------------------------------
// Display constants
// ---------------------------------------------------------------------------

/// Pixel scale factor for the simulator window.
const WINDOW_SCALE: u32 = 2;

/// Target frame duration (~30 FPS).
const FRAME_DURATION: Duration = Duration::from_millis(33);

/// Fixed mock "today" (a winter Monday) so runs are reproducible.
const MOCK_TODAY: CivilDate = CivilDate::new(2025, 2, 24);

// ---------------------------------------------------------------------------
// Mock feed generation
// ---------------------------------------------------------------------------

/// Instant of local midnight opening `date` in Helsinki.
fn local_midnight(date: CivilDate) -> Instant {
    let guess = parse_utc(&format!(
        "{:04}-{:02}-{:02}T00:00:00Z",
        date.year, date.month, date.day
    ))
    .expect("formatted timestamp is well-formed");
    Instant::from_secs(guess.as_secs() - i64::from(Helsinki.utc_offset_secs(guess)))
}

/// ISO-8601 UTC string for an instant, the shape the real feed uses.
fn iso(at: Instant) -> String {
    let utc = CivilDateTime::from_instant(at, 0);
    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.000Z",
        utc.date.year, utc.date.month, utc.date.day, utc.hour, utc.minute, utc.second
    )
}

/// Synthetic price for a quarter-hour slot: a cheap night, a morning ramp,
/// and an expensive evening peak, crossing all three colour bands.
fn mock_price(slot: usize) -> f32 {
    let t = slot as f32 / QUARTER_SLOTS as f32 * core::f32::consts::TAU;
    let daily = 11.0 - 10.0 * t.cos();
    let ripple = 1.5 * (t * 3.0).sin();
    daily + ripple
}

/// Build a synthetic feed and run it through the real aggregation pipeline.
fn mock_aggregate(include_tomorrow: bool) -> AggregatedPrices {
    let mut raw: Vec<(String, f32)> = Vec::new();

    let today_start = local_midnight(MOCK_TODAY);
    for slot in 0..QUARTER_SLOTS {
        let at = Instant::from_secs(today_start.as_secs() + slot as i64 * 900);
        raw.push((iso(at), mock_price(slot)));
    }

    if include_tomorrow {
        let tomorrow_start = local_midnight(MOCK_TODAY.next());
        for hour in 0..HOUR_SLOTS {
            let at = Instant::from_secs(tomorrow_start.as_secs() + hour as i64 * 3600);
            // Tomorrow trends cheaper, with the same general shape.
            raw.push((iso(at), 0.6 * mock_price(hour * 4)));
        }
    }

    let entries: Vec<PriceEntry> = raw
        .iter()
        .map(|(start_date, price)| PriceEntry {
            price: *price,
            start_date,
        })
        .collect();

    aggregate(entries.iter(), MOCK_TODAY, &Helsinki)
}

fn mock_now(hour: u8) -> CivilDateTime {
    CivilDateTime {
        date: MOCK_TODAY,
        hour,
        minute: 35,
        second: 0,
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    env_logger::init();
    info!("Starting spotti simulator");
    info!(
        "Display: {}x{} (scale {}x)",
        DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX, WINDOW_SCALE
    );
    info!("Keys: T=toggle tomorrow  Left/Right=move clock  Q=Quit");

    // SDL2 display and window
    let mut display =
        SimulatorDisplay::<Rgb565>::new(Size::new(DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX));
    let output_settings = OutputSettingsBuilder::new().scale(WINDOW_SCALE).build();
    let mut window = Window::new("Spotti Simulator", &output_settings);

    // Mock state: publish today's prices through the real store.
    let store = PriceStore::new();
    let mut has_tomorrow = false;
    let mut hour: u8 = 14;
    store.publish(mock_aggregate(has_tomorrow));

    let mut page = PricePage::new();
    page.set_clock(mock_now(hour));
    if let Some(prices) = store.snapshot() {
        page.set_prices(prices);
    }

    // The SDL window is lazily initialized on the first `update()` call.
    // We must call `update()` once before `events()` or it will panic.
    let _ = display.clear(Rgb565::BLACK);
    page.mark_dirty();
    let _ = page.draw(&mut display);
    window.update(&display);

    // -----------------------------------------------------------------------
    // Main loop
    // -----------------------------------------------------------------------
    'running: loop {
        let frame_start = std::time::Instant::now();

        for event in window.events() {
            match event {
                SimulatorEvent::Quit => break 'running,

                SimulatorEvent::KeyDown { keycode, .. } => match keycode {
                    Keycode::Q | Keycode::Escape => break 'running,

                    Keycode::T => {
                        has_tomorrow = !has_tomorrow;
                        info!("tomorrow published: {has_tomorrow}");
                        store.publish(mock_aggregate(has_tomorrow));
                    }

                    Keycode::Left => {
                        hour = if hour == 0 { 23 } else { hour - 1 };
                        info!("mock clock: {hour:02}:35");
                    }

                    Keycode::Right => {
                        hour = if hour == 23 { 0 } else { hour + 1 };
                        info!("mock clock: {hour:02}:35");
                    }

                    _ => {}
                },

                _ => {}
            }
        }

        // --- Feed the page ---------------------------------------------
        page.set_clock(mock_now(hour));
        if let Some(prices) = store.snapshot() {
            page.set_prices(prices);
        }

        // --- Render -----------------------------------------------------
        if page.is_dirty() {
            let _ = display.clear(Rgb565::BLACK);
            if let Err(e) = page.draw(&mut display) {
                log::error!("Draw error: {:?}", e);
            }
        }
        window.update(&display);

        // --- Frame pacing -------------------------------------------------
        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_DURATION {
            std::thread::sleep(FRAME_DURATION - elapsed);
        }
    }

    info!("Simulator exiting");
}
