// Route table
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    clear_data, get_snapshot, get_status, health_check, index, lock, set_frequency,
    stream_events, toggle_tracking, toggle_transmitting, unlock,
};
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/healthz", get(health_check))
        .route("/api/status", get(get_status))
        .route("/api/snapshot", get(get_snapshot))
        .route("/api/events", get(stream_events))
        .route("/api/tracking/toggle", post(toggle_tracking))
        .route("/api/transmitting/toggle", post(toggle_transmitting))
        .route("/api/clear", post(clear_data))
        .route("/api/frequency", post(set_frequency))
        .route("/api/lock", post(lock))
        .route("/api/unlock", post(unlock))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
