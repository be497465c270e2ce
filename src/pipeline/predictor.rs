//! The predictor — runs the three stages as one linear chain.
//!
//! Full flow:  fetch_my_ip → fetch_coords_by_ip → fetch_pass_times
//! Each stage runs only if the previous one succeeded; the first failure
//! short-circuits the rest and propagates unchanged.

use super::stages;
use super::types::{Coordinates, PassWindow, PredictError, Prediction};
use crate::config::{Endpoints, PredictorConfig};

/// The pass predictor, holding the shared HTTP agent and endpoint config.
#[derive(Clone)]
pub struct Predictor {
    agent: ureq::Agent,
    endpoints: Endpoints,
}

impl Predictor {
    pub fn new(config: PredictorConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build();
        Self {
            agent,
            endpoints: config.endpoints,
        }
    }

    /// Run the full chain: who am I, where is that, when does the ISS pass.
    pub fn predict(&self) -> Result<Prediction, PredictError> {
        let ip = stages::fetch_my_ip(&self.agent, &self.endpoints)?;
        self.predict_for_ip(&ip)
    }

    /// Skip stage 1: geolocate a known address, then fetch passes.
    pub fn predict_for_ip(&self, ip: &str) -> Result<Prediction, PredictError> {
        let coords = stages::fetch_coords_by_ip(&self.agent, &self.endpoints, ip)?;
        let passes = stages::fetch_pass_times(&self.agent, &self.endpoints, coords)?;
        Ok(Prediction {
            ip: Some(ip.to_string()),
            coords,
            passes,
        })
    }

    /// Skip stages 1 and 2: fetch passes for known coordinates.
    pub fn predict_for_coords(&self, coords: Coordinates) -> Result<Prediction, PredictError> {
        let passes = stages::fetch_pass_times(&self.agent, &self.endpoints, coords)?;
        Ok(Prediction {
            ip: None,
            coords,
            passes,
        })
    }

    /// The pass windows for the caller's current location, in service order.
    pub fn next_passes_for_my_location(&self) -> Result<Vec<PassWindow>, PredictError> {
        Ok(self.predict()?.passes)
    }
}
