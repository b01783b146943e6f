// Curtains — macOS menu-bar screen dimmer
// Uses Cocoa/AppKit via objc2 for the status item and overlay windows.

#[cfg(target_os = "macos")]
mod app;
#[cfg(target_os = "macos")]
mod defaults;
#[cfg(target_os = "macos")]
mod overlay;
#[cfg(target_os = "macos")]
mod tray;
#[cfg(target_os = "macos")]
mod ui;

use curtains_shared::config::{self, AppConfig};
use curtains_shared::logger;

fn main() {
    // Config is read before the logger exists, so its error is reported after init.
    let (cfg, config_error) = match config::try_load_config(&config::config_path()) {
        Ok(cfg) => (cfg, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    let log_path = cfg.log_to_file.then(config::log_file_path);
    if let Err(e) = logger::init_logger(cfg.level_filter(), log_path.as_deref()) {
        eprintln!("Failed to initialize logger: {}", e);
    }
    if let Some(e) = config_error {
        log::warn!("{}, using defaults", e);
    }

    #[cfg(target_os = "macos")]
    app::run(cfg);

    #[cfg(not(target_os = "macos"))]
    log::error!("Curtains draws its overlays with AppKit and only runs on macOS");
}
