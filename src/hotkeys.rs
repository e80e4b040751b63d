//! Global hotkey surface — six fixed bindings, registered at startup and
//! dropped at shutdown.
//!
//! Cmd on macOS, Ctrl elsewhere:
//!   `'` capture        `Enter` query
//!   `[` scroll up      `]`     scroll down
//!   `.` shift right    `,`     shift left

use crate::router::Command;
use crate::AppRouter;
use std::sync::Arc;
use tauri::AppHandle;
use tauri_plugin_global_shortcut::{
    Code, GlobalShortcutExt, Modifiers, Shortcut, ShortcutState,
};

#[cfg(target_os = "macos")]
const PRIMARY: Modifiers = Modifiers::SUPER;
#[cfg(not(target_os = "macos"))]
const PRIMARY: Modifiers = Modifiers::CONTROL;

/// The fixed binding table. Not reconfigurable.
pub fn bindings() -> [(Shortcut, Command); 6] {
    [
        (Shortcut::new(Some(PRIMARY), Code::Quote), Command::Capture),
        (Shortcut::new(Some(PRIMARY), Code::Enter), Command::Query),
        (
            Shortcut::new(Some(PRIMARY), Code::BracketLeft),
            Command::ScrollUp,
        ),
        (
            Shortcut::new(Some(PRIMARY), Code::BracketRight),
            Command::ScrollDown,
        ),
        (
            Shortcut::new(Some(PRIMARY), Code::Period),
            Command::ShiftRight,
        ),
        (
            Shortcut::new(Some(PRIMARY), Code::Comma),
            Command::ShiftLeft,
        ),
    ]
}

/// Register all six bindings, each dispatching into the router on press.
pub fn register(
    app: &AppHandle,
    router: Arc<AppRouter>,
) -> Result<(), tauri_plugin_global_shortcut::Error> {
    for (shortcut, command) in bindings() {
        let router = router.clone();
        app.global_shortcut()
            .on_shortcut(shortcut, move |_app, _shortcut, event| {
                if event.state() != ShortcutState::Pressed {
                    return;
                }
                log::debug!("[HOTKEY] {command:?}");
                let router = router.clone();
                tauri::async_runtime::spawn(async move {
                    router.dispatch(command).await;
                });
            })?;
    }
    log::info!("[HOTKEY] 6 global bindings registered");
    Ok(())
}

/// Drop all bindings. Called once at process exit.
pub fn unregister(app: &AppHandle) {
    if let Err(e) = app.global_shortcut().unregister_all() {
        log::warn!("[HOTKEY] unregister failed: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn six_bindings_with_no_overlap() {
        let table = bindings();
        assert_eq!(table.len(), 6);
        for (i, (a, _)) in table.iter().enumerate() {
            for (b, _) in table.iter().skip(i + 1) {
                assert_ne!(a.id(), b.id(), "two commands share a hotkey");
            }
        }
    }

    #[test]
    fn every_command_is_bound_exactly_once() {
        let table = bindings();
        for (i, (_, a)) in table.iter().enumerate() {
            for (_, b) in table.iter().skip(i + 1) {
                assert_ne!(a, b, "command bound to two hotkeys");
            }
        }
    }
}
