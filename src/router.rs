//! Command routing — the orchestration state machine.
//!
//! One dispatch function owns the whole hotkey surface: capture/query
//! sequencing, the single session slot holding the last capture, and the
//! busy-state policy. Overlapping triggers of the same action are ignored
//! with a logged notice. Scroll and shift commands bypass the state
//! machine entirely and may fire mid-capture or mid-query.

use crate::capture::{CaptureService, ImagePayload};
use crate::format;
use crate::llm::ModelClient;
use crate::overlay::{OverlayMessage, OverlaySurface, ScrollDirection};
use std::sync::{Arc, Mutex};

/// Fixed instruction sent with every query.
const INSTRUCTION: &str = "Write C++ code that solves the problem shown in this screenshot. \
     Reply with a single fenced code block.";

/// Horizontal nudge per shift command, in pixels.
const SHIFT_STEP: i32 = 50;

pub const STATUS_CAPTURE_READY: &str = "capture ready";
pub const STATUS_CAPTURE_FAILED: &str = "capture failed";
pub const STATUS_NO_CAPTURE: &str = "no capture available";
pub const STATUS_QUERY_FAILED: &str = "query failed";

/// A hotkey-triggered action. Each variant is bound to exactly one hotkey.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Capture,
    Query,
    ScrollUp,
    ScrollDown,
    ShiftRight,
    ShiftLeft,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Capturing,
    Querying,
}

pub struct CommandRouter<C, M, O> {
    capture: C,
    model: M,
    overlay: Arc<O>,
    model_id: String,
    phase: Mutex<Phase>,
    /// Most recent capture. Written only by `Capture`, read only by
    /// `Query`, never cleared during the process lifetime.
    last_capture: Mutex<Option<ImagePayload>>,
}

impl<C, M, O> CommandRouter<C, M, O>
where
    C: CaptureService,
    M: ModelClient,
    O: OverlaySurface,
{
    pub fn new(capture: C, model: M, overlay: Arc<O>, model_id: String) -> Self {
        Self {
            capture,
            model,
            overlay,
            model_id,
            phase: Mutex::new(Phase::Idle),
            last_capture: Mutex::new(None),
        }
    }

    /// Handle one hotkey-triggered command to completion.
    ///
    /// Never returns an error: every service failure is converted into a
    /// status message on the overlay plus a log entry. Nothing dispatched
    /// from here may take the process down.
    pub async fn dispatch(&self, command: Command) {
        match command {
            Command::Capture => self.run_capture().await,
            Command::Query => self.run_query().await,
            Command::ScrollUp => self.overlay.send(OverlayMessage::Scroll(ScrollDirection::Up)),
            Command::ScrollDown => self.overlay.send(OverlayMessage::Scroll(ScrollDirection::Down)),
            Command::ShiftRight => self.overlay.shift_horizontal(SHIFT_STEP),
            Command::ShiftLeft => self.overlay.shift_horizontal(-SHIFT_STEP),
        }
    }

    async fn run_capture(&self) {
        if !self.enter(Phase::Capturing) {
            return;
        }
        match self.capture.capture().await {
            Ok(payload) => {
                *self.last_capture.lock().unwrap() = Some(payload);
                self.status(STATUS_CAPTURE_READY);
            }
            Err(e) => {
                log::error!("[ROUTER] capture failed: {e}");
                self.status(STATUS_CAPTURE_FAILED);
            }
        }
        self.finish();
    }

    async fn run_query(&self) {
        let payload = self.last_capture.lock().unwrap().clone();
        let Some(payload) = payload else {
            // Nothing to send: notice, no suspension, no transition.
            self.status(STATUS_NO_CAPTURE);
            return;
        };
        if !self.enter(Phase::Querying) {
            return;
        }
        match self
            .model
            .query(&payload, INSTRUCTION, &self.model_id)
            .await
        {
            Ok(raw) => {
                self.overlay
                    .send(OverlayMessage::RenderedResult(format::format(&raw)));
            }
            Err(e) => {
                log::error!("[ROUTER] query failed: {e}");
                self.status(STATUS_QUERY_FAILED);
            }
        }
        self.finish();
    }

    /// Claim the state machine for a capture or query. Returns false — and
    /// logs a notice — when another capture/query is already in flight.
    /// The check-and-set is synchronous, before any suspension point, so
    /// overlapping triggers can never both reach a service.
    fn enter(&self, next: Phase) -> bool {
        let mut phase = self.phase.lock().unwrap();
        if *phase != Phase::Idle {
            log::info!("[ROUTER] {next:?} ignored while {:?}", *phase);
            return false;
        }
        *phase = next;
        true
    }

    fn finish(&self) {
        *self.phase.lock().unwrap() = Phase::Idle;
    }

    fn status(&self, text: &str) {
        self.overlay.send(OverlayMessage::StatusText(text.to_string()));
    }
}
