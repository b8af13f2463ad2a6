fn main() {
    // Make WIFI_SSID / WIFI_PASSWORD from a local .env visible to env!().
    let _ = dotenvy::dotenv();
    for key in ["WIFI_SSID", "WIFI_PASSWORD"] {
        if let Ok(value) = std::env::var(key) {
            println!("cargo:rustc-env={key}={value}");
        }
        println!("cargo:rerun-if-env-changed={key}");
    }
    println!("cargo:rerun-if-changed=.env");
}
