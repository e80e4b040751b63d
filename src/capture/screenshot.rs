//! Primary-monitor snapshot via the `xcap` crate.
//!
//! The one place that talks to the OS capture API. The caller owns
//! encoding and the overlay-visibility sequencing.

use super::CaptureError;
use image::DynamicImage;
use xcap::Monitor;

/// Snapshot the primary monitor, falling back to the first monitor when
/// none reports as primary.
pub fn take_primary_monitor() -> Result<DynamicImage, CaptureError> {
    let mut monitors =
        Monitor::all().map_err(|e| CaptureError::MonitorEnumeration(e.to_string()))?;

    if monitors.is_empty() {
        return Err(CaptureError::NoMonitor);
    }

    let index = monitors
        .iter()
        .position(|m| m.is_primary().unwrap_or(false))
        .unwrap_or(0);
    let target = monitors.swap_remove(index);

    let frame = target
        .capture_image()
        .map_err(|e| CaptureError::CaptureFailed(e.to_string()))?;

    Ok(DynamicImage::ImageRgba8(frame))
}
