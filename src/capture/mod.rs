//! Screen capture domain — the capture contract, its payload type, and the
//! production service.
//!
//! Capture must never leave the overlay hidden: the surface is hidden
//! before the snapshot and restored on every exit path, success or failure.

mod screenshot;

use crate::overlay::OverlaySurface;
use image::DynamicImage;
use std::fmt;
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Delay between hiding the overlay and taking the snapshot, so the
/// compositor has redrawn without it.
pub const SETTLE_DELAY: Duration = Duration::from_millis(200);

/// An in-memory screen snapshot, ready for the wire.
#[derive(Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub bytes: Vec<u8>,
    pub mime_type: &'static str,
}

impl ImagePayload {
    pub fn png(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            mime_type: "image/png",
        }
    }
}

impl fmt::Debug for ImagePayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImagePayload")
            .field("len", &self.bytes.len())
            .field("mime_type", &self.mime_type)
            .finish()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("failed to enumerate monitors: {0}")]
    MonitorEnumeration(String),

    #[error("no monitor available to capture")]
    NoMonitor,

    #[error("screen capture failed: {0}")]
    CaptureFailed(String),

    #[error("PNG encoding failed: {0}")]
    EncodingFailed(String),

    #[error("snapshot file I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Contract for taking one screen snapshot.
pub trait CaptureService: Send + Sync {
    fn capture(&self) -> impl Future<Output = Result<ImagePayload, CaptureError>> + Send;
}

/// Restores overlay visibility on drop, so every exit path out of a
/// capture — including `?` returns — ends with exactly one `show()`.
struct RestoreVisibility<'a, O: OverlaySurface>(&'a O);

impl<O: OverlaySurface> Drop for RestoreVisibility<'_, O> {
    fn drop(&mut self) {
        self.0.show();
    }
}

/// Production capture service: hide the overlay, wait for the compositor
/// to settle, snapshot the primary monitor, round-trip the PNG through a
/// uniquely named file, restore the overlay.
pub struct ScreenCapture<O> {
    overlay: Arc<O>,
    shots_dir: PathBuf,
    settle: Duration,
}

impl<O: OverlaySurface> ScreenCapture<O> {
    pub fn new(overlay: Arc<O>, shots_dir: PathBuf, settle: Duration) -> Self {
        Self {
            overlay,
            shots_dir,
            settle,
        }
    }

    /// Run one capture with the given snapshot function.
    ///
    /// Split out from [`CaptureService::capture`] so the hide/settle/restore
    /// sequence can be driven in tests without touching the real screen.
    async fn capture_with<F>(&self, snapshot: F) -> Result<ImagePayload, CaptureError>
    where
        F: FnOnce() -> Result<DynamicImage, CaptureError>,
    {
        self.overlay.hide();
        let _restore = RestoreVisibility(self.overlay.as_ref());

        tokio::time::sleep(self.settle).await;

        let image = snapshot()?;
        let png = encode_png(&image)?;

        // Round-trip through a uniquely named file, then clean up. A leaked
        // file is only worth a warning — the payload is already in memory.
        std::fs::create_dir_all(&self.shots_dir)?;
        let path = self.shot_path();
        std::fs::write(&path, &png)?;
        let bytes = std::fs::read(&path)?;
        if let Err(e) = std::fs::remove_file(&path) {
            log::warn!("[CAPTURE] could not remove {}: {e}", path.display());
        }

        log::info!("[CAPTURE] {} bytes captured", bytes.len());
        Ok(ImagePayload::png(bytes))
    }

    /// Timestamp-named destination for the on-disk snapshot artifact.
    fn shot_path(&self) -> PathBuf {
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        self.shots_dir.join(format!("screenshot_{stamp}.png"))
    }
}

impl<O: OverlaySurface> CaptureService for ScreenCapture<O> {
    async fn capture(&self) -> Result<ImagePayload, CaptureError> {
        self.capture_with(screenshot::take_primary_monitor).await
    }
}

fn encode_png(image: &DynamicImage) -> Result<Vec<u8>, CaptureError> {
    let mut png = Vec::new();
    image
        .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
        .map_err(|e| CaptureError::EncodingFailed(e.to_string()))?;
    Ok(png)
}
