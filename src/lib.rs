//! ghost-lens — Tauri application entry point.
//!
//! An invisible overlay utility: global hotkeys capture the screen, send
//! the image to a vision model, and render the returned code over the
//! screen. This is the app shell that wires together:
//! - Startup config (config.rs) — fatal without an API key
//! - The overlay window (overlay.rs)
//! - Screen capture (capture/), the Gemini client (llm/), response
//!   formatting (format.rs)
//! - The command router (router.rs), driven by global hotkeys (hotkeys.rs)
//!   and the tray (tray.rs)

pub mod capture;
pub mod config;
pub mod format;
pub mod hotkeys;
pub mod llm;
pub mod overlay;
pub mod router;
mod tray;

use capture::{ScreenCapture, SETTLE_DELAY};
use config::Config;
use llm::GeminiClient;
use overlay::TauriOverlay;
use router::CommandRouter;
use std::sync::Arc;

/// The fully wired router used by the shell, hotkeys, and tray.
pub type AppRouter = CommandRouter<ScreenCapture<TauriOverlay>, GeminiClient, TauriOverlay>;

/// Entry point — called by the Tauri runtime.
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    env_logger::init();

    // No credential, no process. Everything after this line is non-fatal.
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            log::error!("[CONFIG] {e}");
            std::process::exit(1);
        }
    };

    tauri::Builder::default()
        .plugin(tauri_plugin_global_shortcut::Builder::new().build())
        .setup(move |app| {
            log::info!("ghost-lens starting up");

            let overlay = Arc::new(TauriOverlay::create(app.handle())?);

            let shots_dir = dirs::picture_dir().unwrap_or_else(std::env::temp_dir);
            let capture = ScreenCapture::new(overlay.clone(), shots_dir, SETTLE_DELAY);
            let model = GeminiClient::new(config.api_key);
            let router = Arc::new(CommandRouter::new(capture, model, overlay, config.model));

            hotkeys::register(app.handle(), router.clone())?;
            tray::setup_tray(app.handle(), router)?;

            log::info!("Overlay ready — waiting for hotkeys");
            Ok(())
        })
        .build(tauri::generate_context!())
        .expect("error while building ghost-lens")
        .run(|app, event| {
            if let tauri::RunEvent::Exit = event {
                hotkeys::unregister(app);
            }
        });
}
