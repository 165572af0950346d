//! Trackguard Daemon - Main Entry Point
//!
//! Disables the touchpad while the trackpoint is in use and re-enables it
//! once the trackpoint has been idle for the quiescence period. Takes no
//! arguments; every fatal error exits with status 2.

use tokio::signal::unix::{signal, SignalKind};
use trackguard_common::tracing::{error, info};
use trackguard_common::DaemonError;
use trackguardd::config::{ConfigManager, DaemonSettings};
use trackguardd::x11::X11Backend;
use trackguardd::Daemon;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let mut config_manager = ConfigManager::new();
    let config_result = config_manager.load_config().await;
    let settings = config_manager.config.daemon.clone();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(settings.max_level())
        .with_target(false)
        .init();

    info!("Starting Trackguard Daemon v{}", env!("CARGO_PKG_VERSION"));

    let result = match config_result {
        Ok(()) => {
            if config_manager.loaded_from_disk {
                info!("Loaded configuration from {}", config_manager.config_path.display());
            }
            run(&settings).await
        }
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        error!("{}", e);
        std::process::exit(e.exit_code());
    }

    info!("Trackguard Daemon shutdown complete");
}

async fn run(settings: &DaemonSettings) -> Result<(), DaemonError> {
    let backend = X11Backend::open(settings.display.as_deref()).map_err(DaemonError::Connection)?;
    let mut daemon = Daemon::locate(backend)?;

    let mut terminate = signal(SignalKind::terminate()).map_err(DaemonError::Signal)?;
    let mut interrupt = signal(SignalKind::interrupt()).map_err(DaemonError::Signal)?;
    let shutdown = async move {
        tokio::select! {
            _ = terminate.recv() => {
                info!("Received SIGTERM, shutting down gracefully");
            }
            _ = interrupt.recv() => {
                info!("Received SIGINT, shutting down gracefully");
            }
        }
    };

    let result = daemon.run(shutdown).await;
    daemon.shutdown();
    result
}
