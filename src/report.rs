//! Human-readable rendering of predictions.
//!
//! Presentation only — the pipeline itself never formats anything.

use crate::pipeline::{PassWindow, Prediction};
use chrono::{Local, TimeZone, Utc};
use chrono_tz::Tz;

const STAMP_FORMAT: &str = "%a %b %e %Y %H:%M:%S %Z";

/// Where to render risetimes.
#[derive(Debug, Clone, Copy)]
pub enum RenderZone {
    /// System-local time.
    Local,
    /// A named IANA zone.
    Named(Tz),
}

/// Render one pass window as a line, e.g.
/// `Next pass at Fri Oct 23 2015 03:12:36 UTC for 368 seconds!`
pub fn format_pass(pass: &PassWindow, zone: RenderZone) -> String {
    let utc = match Utc.timestamp_opt(pass.risetime, 0).single() {
        Some(t) => t,
        None => {
            return format!(
                "Next pass at (unrepresentable timestamp {}) for {} seconds!",
                pass.risetime, pass.duration
            );
        }
    };

    let stamp = match zone {
        RenderZone::Local => utc.with_timezone(&Local).format(STAMP_FORMAT).to_string(),
        RenderZone::Named(tz) => utc.with_timezone(&tz).format(STAMP_FORMAT).to_string(),
    };

    format!("Next pass at {} for {} seconds!", stamp, pass.duration)
}

/// One-line location summary for the stderr banner.
pub fn location_banner(prediction: &Prediction) -> String {
    match &prediction.ip {
        Some(ip) => format!("{} (via {})", prediction.coords, ip),
        None => format!("{}", prediction.coords),
    }
}
