//! The three network stages: IP lookup, geolocation, pass prediction.
//!
//! Each stage issues exactly one GET and never retries. Status and transport
//! failures are distinguished at the call site; anything that is not a
//! well-formed body with the expected fields is a parse failure.

use super::types::{Coordinates, PassWindow, PredictError};
use crate::config::Endpoints;
use serde::de::DeserializeOwned;
use serde::Deserialize;

// ─── Shared request handling ────────────────────────────────────

fn get_json<T: DeserializeOwned>(agent: &ureq::Agent, url: &str) -> Result<T, PredictError> {
    let response = match agent.get(url).call() {
        Ok(r) => r,
        Err(ureq::Error::Status(status, r)) => {
            let body = r.into_string().unwrap_or_default();
            return Err(PredictError::RemoteService { status, body });
        }
        Err(ureq::Error::Transport(t)) => {
            return Err(PredictError::Transport(t.to_string()));
        }
    };

    response
        .into_json()
        .map_err(|e| PredictError::Parse(e.to_string()))
}

// ─── Stage 1: IP lookup ─────────────────────────────────────────

#[derive(Deserialize)]
struct IpLookupResult {
    ip: Option<String>,
}

/// Ask the IP-lookup service for the caller's public address.
pub fn fetch_my_ip(agent: &ureq::Agent, endpoints: &Endpoints) -> Result<String, PredictError> {
    let result: IpLookupResult = get_json(agent, &endpoints.ip_url)?;
    result
        .ip
        .ok_or_else(|| PredictError::Parse("no ip field".into()))
}

// ─── Stage 2: geolocation ───────────────────────────────────────

#[derive(Deserialize)]
struct GeoResult {
    latitude: Option<f64>,
    longitude: Option<f64>,
}

/// Percent-encode one path segment (minimal, no extra dep). Keeps IPv4
/// dotted quads untouched; escapes IPv6 colons and anything else unusual.
fn encode_segment(s: &str) -> String {
    s.bytes()
        .map(|b| match b {
            b'0'..=b'9' | b'A'..=b'Z' | b'a'..=b'z' | b'-' | b'_' | b'.' | b'~' => {
                (b as char).to_string()
            }
            _ => format!("%{:02X}", b),
        })
        .collect()
}

fn geo_url(base: &str, ip: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), encode_segment(ip))
}

/// Resolve an IP address to coordinates. The remote service is the arbiter
/// of address validity; no local validation beyond non-emptiness happens.
pub fn fetch_coords_by_ip(
    agent: &ureq::Agent,
    endpoints: &Endpoints,
    ip: &str,
) -> Result<Coordinates, PredictError> {
    let result: GeoResult = get_json(agent, &geo_url(&endpoints.geo_url, ip))?;
    let lat = result
        .latitude
        .ok_or_else(|| PredictError::Parse("no latitude".into()))?;
    let lon = result
        .longitude
        .ok_or_else(|| PredictError::Parse("no longitude".into()))?;
    Ok(Coordinates { lat, lon })
}

// ─── Stage 3: pass prediction ───────────────────────────────────

#[derive(Deserialize)]
struct PassTimesResult {
    response: Option<Vec<PassWindow>>,
}

fn pass_url(base: &str, coords: Coordinates) -> String {
    format!("{}?lat={}&lon={}", base, coords.lat, coords.lon)
}

/// Fetch upcoming pass windows for the given coordinates, in the order the
/// remote service returned them.
pub fn fetch_pass_times(
    agent: &ureq::Agent,
    endpoints: &Endpoints,
    coords: Coordinates,
) -> Result<Vec<PassWindow>, PredictError> {
    let result: PassTimesResult = get_json(agent, &pass_url(&endpoints.pass_url, coords))?;
    result
        .response
        .ok_or_else(|| PredictError::Parse("no response field".into()))
}
