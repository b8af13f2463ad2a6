//! WiFi and network stack tasks.

use embassy_net::Runner;
use embassy_time::{Duration, Timer};
use esp_radio::wifi::{
    ClientConfiguration, Configuration, WifiController, WifiDevice, WifiEvent, WifiState,
};
use log::{info, warn};

use crate::wifi_secrets::{WIFI_PASSWORD, WIFI_SSID};

/// Keeps the station associated, reconnecting after a drop.
#[embassy_executor::task]
pub async fn connection_task(mut controller: WifiController<'static>) {
    loop {
        if esp_radio::wifi::wifi_state() == WifiState::StaConnected {
            // Associated; park until the link drops.
            controller.wait_for_event(WifiEvent::StaDisconnected).await;
            Timer::after(Duration::from_secs(5)).await;
        }

        if !matches!(controller.is_started(), Ok(true)) {
            let client_config = Configuration::Client(ClientConfiguration {
                ssid: WIFI_SSID.try_into().expect("SSID too long"),
                password: WIFI_PASSWORD.try_into().expect("password too long"),
                ..Default::default()
            });
            controller
                .set_configuration(&client_config)
                .expect("failed to apply WiFi configuration");
            controller
                .start_async()
                .await
                .expect("failed to start WiFi");
        }

        match controller.connect_async().await {
            Ok(()) => info!("wifi connected"),
            Err(err) => {
                warn!("wifi connect failed: {err:?}");
                Timer::after(Duration::from_secs(5)).await;
            }
        }
    }
}

/// Drives the embassy-net stack.
#[embassy_executor::task]
pub async fn net_task(mut runner: Runner<'static, WifiDevice<'static>>) {
    runner.run().await
}
