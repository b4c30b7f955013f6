use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use lucky_core::{FlagSource, Frame, RedeemError, TickEngine};
use lucky_shared::{ApiError, FrameView, MessageBody, RedeemRequest, RedeemResponse};

const RECENT_MAX: i64 = 30;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<TickEngine>,
    pub flags: Arc<dyn FlagSource>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/frame", get(route_current))
        .route("/api/frame/:tick_id", get(route_frame))
        .route("/api/recent/:n", get(route_recent))
        .route("/api/redeem", post(route_redeem))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

fn status_of(err: &ApiError) -> StatusCode {
    match err {
        ApiError::NotFound => StatusCode::NOT_FOUND,
        ApiError::Forbidden => StatusCode::FORBIDDEN,
        ApiError::NoFrameYet => StatusCode::SERVICE_UNAVAILABLE,
    }
}

fn api_error(err: RedeemError) -> ApiError {
    match err {
        RedeemError::NotFound(_) => ApiError::NotFound,
        RedeemError::Forbidden(_) => ApiError::Forbidden,
    }
}

struct Rejection(ApiError);

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        let body = MessageBody {
            message: self.0.to_string(),
        };
        (status_of(&self.0), Json(body)).into_response()
    }
}

// Tick ids travel as signed integers; a negative id names no tick.
fn engine_id(tick_id: i64) -> Result<u64, ApiError> {
    u64::try_from(tick_id).map_err(|_| ApiError::NotFound)
}

fn wire_id(tick_id: u64) -> i64 {
    i64::try_from(tick_id).unwrap_or(i64::MAX)
}

fn public(f: &Frame) -> FrameView {
    FrameView {
        tick_id: wire_id(f.tick_id),
        unix_seconds: f.unix_seconds,
        reels: f.reels.to_vec(),
        jackpot_preview: f.jackpot_preview,
        sample_ints: f.sample_ints.clone(),
        sample_bytes_hex: f.sample_bytes_hex.clone(),
    }
}

async fn route_current(State(state): State<AppState>) -> Result<Json<FrameView>, Rejection> {
    let frame = state
        .engine
        .current()
        .ok_or(Rejection(ApiError::NoFrameYet))?;
    Ok(Json(public(&frame)))
}

async fn route_frame(
    State(state): State<AppState>,
    Path(tick_id): Path<i64>,
) -> Result<Json<FrameView>, Rejection> {
    let tick_id = engine_id(tick_id).map_err(Rejection)?;
    let frame = state
        .engine
        .get(tick_id)
        .ok_or(Rejection(ApiError::NotFound))?;
    Ok(Json(public(&frame)))
}

async fn route_recent(State(state): State<AppState>, Path(n): Path<i64>) -> Json<Vec<FrameView>> {
    let count = n.clamp(1, RECENT_MAX) as usize;
    let frames = state.engine.recent(count);
    Json(frames.iter().map(|f| public(f)).collect())
}

async fn route_redeem(
    State(state): State<AppState>,
    Json(req): Json<RedeemRequest>,
) -> (StatusCode, Json<RedeemResponse>) {
    let outcome = engine_id(req.tick_id).and_then(|tick_id| {
        state
            .engine
            .redeem(tick_id, req.code, state.flags.as_ref())
            .map_err(api_error)
    });
    match outcome {
        Ok(won) => {
            info!(tick_id = won.tick_id, "redeem succeeded");
            (
                StatusCode::OK,
                Json(RedeemResponse::jackpot(wire_id(won.tick_id), won.flag)),
            )
        }
        Err(err) => {
            (status_of(&err), Json(RedeemResponse::failed(err.to_string())))
        }
    }
}
