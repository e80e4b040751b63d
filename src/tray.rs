//! System tray — the only mouse-reachable entry point.
//!
//! The overlay ignores the cursor and is absent from the task switcher, so
//! the tray carries the quit affordance. Left-click triggers the same
//! capture dispatch as the hotkey.

use crate::router::Command;
use crate::AppRouter;
use std::sync::Arc;
use tauri::{
    image::Image as TauriImage,
    menu::{MenuBuilder, MenuItemBuilder},
    tray::{MouseButton, TrayIconBuilder, TrayIconEvent},
    AppHandle,
};

pub fn setup_tray(
    app: &AppHandle,
    router: Arc<AppRouter>,
) -> Result<(), Box<dyn std::error::Error>> {
    let quit_item = MenuItemBuilder::with_id("quit", "Quit ghost-lens").build(app)?;
    let menu = MenuBuilder::new(app).item(&quit_item).build()?;

    // Decode the PNG icon to RGBA for Tauri's Image type
    let icon_bytes = include_bytes!("../icons/32x32.png");
    let icon_img = image::load_from_memory(icon_bytes)
        .map_err(|e| format!("failed to decode tray icon: {e}"))?;
    let rgba = icon_img.to_rgba8();
    let (w, h) = (rgba.width(), rgba.height());
    let tray_icon = TauriImage::new_owned(rgba.into_raw(), w, h);

    let _tray = TrayIconBuilder::new()
        .icon(tray_icon)
        .tooltip("ghost-lens — click to capture")
        .menu(&menu)
        .show_menu_on_left_click(false)
        .on_tray_icon_event(move |_tray, event| {
            if let TrayIconEvent::Click {
                button: MouseButton::Left,
                ..
            } = event
            {
                log::info!("[TRAY] capture requested");
                let router = router.clone();
                tauri::async_runtime::spawn(async move {
                    router.dispatch(Command::Capture).await;
                });
            }
        })
        .on_menu_event(|app, event| {
            if event.id() == "quit" {
                log::info!("[TRAY] quit requested");
                app.exit(0);
            }
        })
        .build(app)?;

    Ok(())
}
