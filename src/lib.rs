//! Passwatch — upcoming ISS overhead passes for the caller's location.
//!
//! Chains three external lookups: public-IP discovery, IP geolocation, and
//! ISS pass prediction. The chain is strictly sequential and data-dependent;
//! the first failure short-circuits the remaining stages.

pub mod config;
pub mod pipeline;
pub mod report;
pub mod server;
