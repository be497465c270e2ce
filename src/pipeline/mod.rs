//! The three-stage prediction pipeline.
//!
//! Stage order: IP lookup → geolocation → pass prediction. Each stage's
//! output is the next stage's input, so the chain cannot be parallelized.

pub mod predictor;
pub mod stages;
pub mod types;

pub use predictor::Predictor;
pub use types::{Coordinates, PassWindow, PredictError, Prediction};
