//! Core types for the pass-prediction pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A latitude/longitude pair, resolved from the caller's public IP or
/// supplied directly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lon)
    }
}

/// One predicted interval during which the ISS is visible overhead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassWindow {
    /// Unix timestamp marking the start of the pass.
    pub risetime: i64,
    /// Visibility duration in seconds.
    pub duration: i64,
}

/// The full result of one pipeline run.
///
/// `ip` is None when the caller supplied coordinates directly and the
/// upstream stages were skipped.
#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    pub ip: Option<String>,
    pub coords: Coordinates,
    /// Pass windows in the order the remote service returned them.
    pub passes: Vec<PassWindow>,
}

/// Pipeline failures, one variant per class of breakage.
///
/// Every stage produces the same three kinds and they propagate unchanged
/// to the top-level caller — no stage wraps or reclassifies a downstream
/// error.
#[derive(Debug)]
pub enum PredictError {
    /// The outbound call could not be completed (network, DNS, timeout).
    Transport(String),
    /// The remote answered with a non-success status. Carries the raw body
    /// for diagnostics.
    RemoteService { status: u16, body: String },
    /// The body was not valid JSON or lacked an expected field.
    Parse(String),
}

impl fmt::Display for PredictError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(msg) => write!(f, "Network error: {}", msg),
            Self::RemoteService { status, body } => {
                write!(f, "Remote service returned status {}: {}", status, body.trim())
            }
            Self::Parse(msg) => write!(f, "Invalid API response: {}", msg),
        }
    }
}

impl std::error::Error for PredictError {}
