#![no_std]
#![no_main]
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
#![deny(clippy::large_stack_frames)]

use embassy_executor::Spawner;
use embassy_net::StackResources;
use embassy_time::{with_timeout, Duration, Timer};
use esp_hal::clock::CpuClock;
use esp_hal::gpio::{Level, Output, OutputConfig};
use esp_hal::timer::timg::TimerGroup;
use rtt_target::rprintln;
use static_cell::StaticCell;

// Display-LCD panel specific imports
use embedded_hal_bus::spi::ExclusiveDevice;
use esp_hal::spi::master::{Config, Spi};
use mipidsi::interface::SpiInterface;
use mipidsi::{models::ILI9342CRgb565, Builder as MipidsiBuilder};

use spotti_core::config::{
    DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX, FETCH_INTERVAL_SECS, REDRAW_INTERVAL_SECS,
};
use spotti_core::pages::{PricePage, StatusPage};
use spotti_core::state::PriceStore;
use spotti_core::timezone::{Helsinki, TimeZone};
use spotti_firmware::wall_clock::WallClock;
use spotti_firmware::{fetch, net, sntp};

const DISPLAY_WIDTH: u16 = DISPLAY_WIDTH_PX as u16;
const DISPLAY_HEIGHT: u16 = DISPLAY_HEIGHT_PX as u16;

/// How long to wait for DHCP before declaring WiFi failed.
const WIFI_TIMEOUT: Duration = Duration::from_secs(20);

#[panic_handler]
fn panic(info: &core::panic::PanicInfo) -> ! {
    rtt_target::rprintln!("PANIC: {}", info);
    loop {}
}

extern crate alloc;

// This creates a default app-descriptor required by the esp-idf bootloader.
// For more information see: <https://docs.espressif.com/projects/esp-idf/en/stable/esp32/api-reference/system/app_image_format.html#application-description>
esp_bootloader_esp_idf::esp_app_desc!();

/// Published price snapshot: written by the fetch cycle, read for render.
static PRICES: PriceStore = PriceStore::new();

#[allow(
    clippy::large_stack_frames,
    reason = "it's not unusual to allocate larger buffers etc. in main"
)]
#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    rtt_target::rtt_init_print!();

    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    esp_alloc::heap_allocator!(#[esp_hal::ram(reclaimed)] size: 73744);
    esp_alloc::psram_allocator!(peripherals.PSRAM, esp_hal::psram);

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    rprintln!("Embassy initialized!");

    let radio_init = esp_radio::init().expect("Failed to initialize Wi-Fi/BLE controller");
    let (wifi_controller, interfaces) =
        esp_radio::wifi::new(&radio_init, peripherals.WIFI, Default::default())
            .expect("Failed to initialize Wi-Fi controller");

    // Configure and initialize the display

    // 1. Configure SPI bus
    let spi_bus = Spi::new(peripherals.SPI2, Config::default())
        .unwrap()
        .with_sck(peripherals.GPIO36)
        .with_mosi(peripherals.GPIO37);

    // 2. Create a dummy CS pin (we don't use hardware CS for this display)
    let cs = Output::new(peripherals.GPIO35, Level::High, OutputConfig::default());

    // 3. Wrap the SPI bus as a SPI device (required by embedded-hal traits)
    let spi_device = ExclusiveDevice::new_no_delay(spi_bus, cs).unwrap();

    // 4. Set up DC (Data/Command) pin
    let dc = Output::new(peripherals.GPIO34, Level::Low, OutputConfig::default());

    // 5. Create a buffer for SPI batching (larger = faster, uses more RAM)
    let mut spi_buffer = [0u8; 512];

    // 6. Create display interface
    let di = SpiInterface::new(spi_device, dc, &mut spi_buffer);

    // 7. Build and initialize the display driver
    let mut display = MipidsiBuilder::new(ILI9342CRgb565, di)
        .display_size(DISPLAY_WIDTH, DISPLAY_HEIGHT)
        .init(&mut embassy_time::Delay)
        .expect("Failed to initialize display");

    rprintln!("Display initialized!");

    let _ = StatusPage::connecting().draw(&mut display);

    // Network stack with DHCP. The seed only randomizes TCP sequence
    // numbers; boot-time jitter in the tick counter is enough entropy here.
    let seed = embassy_time::Instant::now()
        .as_ticks()
        .wrapping_mul(0x9E37_79B9_7F4A_7C15);
    static RESOURCES: StaticCell<StackResources<8>> = StaticCell::new();
    let (stack, runner) = embassy_net::new(
        interfaces.sta,
        embassy_net::Config::dhcpv4(Default::default()),
        RESOURCES.init(StackResources::new()),
        seed,
    );

    spawner
        .spawn(net::net_task(runner))
        .expect("Failed to spawn the net task");
    spawner
        .spawn(net::connection_task(wifi_controller))
        .expect("Failed to spawn the WiFi task");

    if with_timeout(WIFI_TIMEOUT, stack.wait_config_up()).await.is_err() {
        rprintln!("WiFi failed");
        let _ = StatusPage::wifi_failed().draw(&mut display);
        loop {
            Timer::after(Duration::from_secs(1)).await;
        }
    }
    rprintln!("WiFi connected");

    // One SNTP reading anchors the wall clock for the rest of the uptime.
    let _ = StatusPage::syncing_time().draw(&mut display);
    let unix_now = loop {
        match sntp::query_unix_time(stack).await {
            Ok(secs) => break secs,
            Err(err) => {
                rprintln!("Waiting for NTP: {:?}", err);
                Timer::after(Duration::from_secs(5)).await;
            }
        }
    };
    let clock = WallClock::anchor(unix_now);

    let local = Helsinki.to_local(clock.now());
    rprintln!(
        "Time: {:04}-{:02}-{:02} {:02}:{:02}",
        local.date.year,
        local.date.month,
        local.date.day,
        local.hour,
        local.minute
    );

    let _ = StatusPage::fetching().draw(&mut display);
    if let Err(err) = fetch::refresh(stack, &PRICES, clock.now()).await {
        rprintln!("Initial fetch failed: {:?}", err);
    }
    let mut last_fetch = embassy_time::Instant::now();

    // Redraw every minute, re-fetch every hour. A failed fetch keeps the
    // previously published snapshot on screen.
    let mut page = PricePage::new();
    loop {
        if last_fetch.elapsed() >= Duration::from_secs(FETCH_INTERVAL_SECS) {
            if let Err(err) = fetch::refresh(stack, &PRICES, clock.now()).await {
                rprintln!("Fetch failed, keeping previous prices: {:?}", err);
            }
            last_fetch = embassy_time::Instant::now();
        }

        page.set_clock(Helsinki.to_local(clock.now()));
        if let Some(prices) = PRICES.snapshot() {
            page.set_prices(prices);
        }
        if let Err(err) = page.draw(&mut display) {
            rprintln!("Draw error: {:?}", err);
        }

        Timer::after(Duration::from_secs(REDRAW_INTERVAL_SECS)).await;
    }
}
