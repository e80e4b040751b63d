//! The overlay surface — one always-on-top output window for the process
//! lifetime.
//!
//! The overlay is output-only: it never takes keyboard or mouse input. All
//! input arrives through global hotkeys, and the core pushes
//! [`OverlayMessage`]s one way through the [`OverlaySurface`] trait.

use tauri::{AppHandle, Emitter, PhysicalPosition, WebviewUrl, WebviewWindow, WebviewWindowBuilder};

/// Label of the single overlay window.
pub const OVERLAY_LABEL: &str = "overlay";

/// Scroll directive forwarded to the overlay content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

/// One-way message from the core to the display surface.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayMessage {
    /// Short human-readable status line.
    StatusText(String),
    /// Markup produced by the response formatter, ready to render.
    RenderedResult(String),
    /// Scroll the rendered content.
    Scroll(ScrollDirection),
}

/// The rendering surface the core talks to.
///
/// `hide`/`show` exist for the capture sequence — the overlay must not
/// appear in its own screenshot. `shift_horizontal` backs the nudge
/// hotkeys.
pub trait OverlaySurface: Send + Sync {
    fn show(&self);
    fn hide(&self);
    fn send(&self, message: OverlayMessage);
    fn shift_horizontal(&self, dx: i32);
}

/// Production surface wrapping the Tauri overlay window.
///
/// Window-handle failures are logged and swallowed here: a missed status
/// update or nudge must never take down a capture or query in flight.
pub struct TauriOverlay {
    window: WebviewWindow,
}

impl TauriOverlay {
    /// Create the overlay window: borderless, transparent, always on top,
    /// absent from the task switcher, and content-protected so external
    /// screen capture cannot record it. Capture still hides the window
    /// outright rather than relying on content protection alone.
    pub fn create(app: &AppHandle) -> tauri::Result<Self> {
        let window = WebviewWindowBuilder::new(
            app,
            OVERLAY_LABEL,
            WebviewUrl::App("index.html".into()),
        )
        .title("ghost-lens")
        .inner_size(800.0, 800.0)
        .resizable(false)
        .decorations(false)
        .transparent(true)
        .always_on_top(true)
        .skip_taskbar(true)
        .content_protected(true)
        .build()?;

        // Input-transparent: the surface never takes mouse focus. Nothing
        // in the overlay is clickable, so no forwarding is needed.
        window.set_ignore_cursor_events(true)?;

        Ok(Self { window })
    }
}

impl OverlaySurface for TauriOverlay {
    fn show(&self) {
        if let Err(e) = self.window.show() {
            log::warn!("[OVERLAY] show failed: {e}");
        }
    }

    fn hide(&self) {
        if let Err(e) = self.window.hide() {
            log::warn!("[OVERLAY] hide failed: {e}");
        }
    }

    fn send(&self, message: OverlayMessage) {
        let emitted = match message {
            OverlayMessage::StatusText(text) => self.window.emit("update-response", text),
            OverlayMessage::RenderedResult(markup) => self.window.emit("analysis-result", markup),
            OverlayMessage::Scroll(ScrollDirection::Up) => self.window.emit("scroll-up", ()),
            OverlayMessage::Scroll(ScrollDirection::Down) => self.window.emit("scroll-down", ()),
        };
        if let Err(e) = emitted {
            log::warn!("[OVERLAY] event emit failed: {e}");
        }
    }

    fn shift_horizontal(&self, dx: i32) {
        let moved = self.window.outer_position().and_then(|pos| {
            self.window
                .set_position(PhysicalPosition::new(pos.x + dx, pos.y))
        });
        if let Err(e) = moved {
            log::warn!("[OVERLAY] window shift failed: {e}");
        }
    }
}
