//! Diagnostic tool: show XInput devices and which ones trackguardd would pick
//! Usage: cargo run --bin list_devices -- [display]

use trackguard_common::tracing::{self, error, info, warn};
use trackguardd::backend::{close_quietly, InputBackend};
use trackguardd::locator::{find_touchpad, find_trackpoint};
use trackguardd::x11::X11Backend;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_target(false)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let display = args.get(1).map(String::as_str);

    let backend = match X11Backend::open(display) {
        Ok(backend) => backend,
        Err(e) => {
            error!("Can't open display: {}", e);
            std::process::exit(trackguard_common::FATAL_EXIT_CODE);
        }
    };

    let devices = backend.list_input_devices()?;
    info!("Found {} input devices:", devices.len());
    for device in &devices {
        let properties = match backend.open_device(device) {
            Ok(handle) => {
                let count = backend.list_device_properties(&handle).map(|p| p.len());
                close_quietly(&backend, &handle);
                count.map(|c| c.to_string()).unwrap_or_else(|_| "?".to_string())
            }
            Err(_) => "unavailable".to_string(),
        };
        info!("  - {} (properties: {})", device, properties);
    }

    match find_touchpad(&backend) {
        Ok(touchpad) => {
            info!("Touchpad: {}", touchpad.handle());
            close_quietly(&backend, touchpad.handle());
        }
        Err(e) => warn!("Touchpad: {}", e),
    }

    match find_trackpoint(&backend) {
        Ok(trackpoint) => {
            info!("Trackpoint: {}", trackpoint);
            close_quietly(&backend, &trackpoint);
        }
        Err(e) => warn!("Trackpoint: {}", e),
    }

    Ok(())
}
