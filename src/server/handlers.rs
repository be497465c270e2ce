use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

use super::state::AppState;
use crate::pipeline::{Coordinates, PredictError, Prediction};

// ─── Error response ──────────────────────────────────────────────

#[derive(Serialize)]
struct ApiErrorBody {
    error: String,
    code: u16,
}

pub(super) struct ApiError(StatusCode, String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorBody {
            error: self.1,
            code: self.0.as_u16(),
        };
        (self.0, Json(body)).into_response()
    }
}

fn api_error(status: StatusCode, msg: impl Into<String>) -> ApiError {
    ApiError(status, msg.into())
}

/// Map a pipeline failure to an HTTP status: an upstream collaborator
/// breaking is a gateway problem, an unintelligible body is ours.
fn upstream_error(e: PredictError) -> ApiError {
    let status = match e {
        PredictError::Transport(_) | PredictError::RemoteService { .. } => StatusCode::BAD_GATEWAY,
        PredictError::Parse(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    api_error(status, format!("{}", e))
}

// ─── GET /api/passes ─────────────────────────────────────────────

#[derive(Deserialize)]
pub struct PassesQuery {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

pub async fn passes(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PassesQuery>,
) -> Result<Json<Prediction>, Response> {
    let start = Instant::now();

    let coords = match (params.lat, params.lon) {
        (Some(lat), Some(lon)) => {
            if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
                return Err(api_error(
                    StatusCode::BAD_REQUEST,
                    "lat must be in -90..90 and lon in -180..180",
                )
                .into_response());
            }
            Some(Coordinates { lat, lon })
        }
        (None, None) => None,
        _ => {
            return Err(api_error(
                StatusCode::BAD_REQUEST,
                "lat and lon must be given together",
            )
            .into_response());
        }
    };

    // The pipeline is blocking; keep it off the async workers.
    let predictor = state.predictor.clone();
    let prediction = tokio::task::spawn_blocking(move || match coords {
        Some(c) => predictor.predict_for_coords(c),
        None => predictor.predict(),
    })
    .await
    .map_err(|e| {
        api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("prediction task failed: {}", e),
        )
        .into_response()
    })?
    .map_err(|e| upstream_error(e).into_response())?;

    eprintln!(
        "[{}] GET /api/passes -> {} passes ({:.1}ms)",
        Utc::now().format("%H:%M:%S"),
        prediction.passes.len(),
        start.elapsed().as_secs_f64() * 1000.0,
    );

    Ok(Json(prediction))
}
