// HTTP request handlers
use crate::application::dashboard_service::{ControlStatus, DashboardView};
use crate::domain::error::DashboardError;
use crate::infrastructure::event_stream::sse_from_receiver;
use crate::infrastructure::http_response::{accepts_brotli, json_response};
use crate::presentation::app_state::AppState;
use axum::{
    Json,
    extract::State,
    http::HeaderMap,
    response::{Html, IntoResponse},
};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

const INDEX_HTML: &str = include_str!("../../static/index.html");

/// Frequency as typed by the user; numbers and strings are both accepted
/// and validated the same way.
#[derive(Deserialize)]
pub struct FrequencyRequest {
    pub value: Value,
}

impl FrequencyRequest {
    fn raw_input(&self) -> String {
        match &self.value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

#[derive(Deserialize)]
pub struct UnlockRequest {
    pub password: String,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn get_status(State(state): State<Arc<AppState>>) -> Json<ControlStatus> {
    Json(state.dashboard_service.status().await)
}

/// Full dashboard state, Brotli-compressed when the client accepts it
pub async fn get_snapshot(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let compress = accepts_brotli(&headers);
    let view = state.dashboard_service.snapshot().await;

    match json_response(&view, compress).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// Live redraw events
pub async fn stream_events(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    sse_from_receiver(state.dashboard_service.subscribe())
}

pub async fn toggle_tracking(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ControlStatus>, DashboardError> {
    state.dashboard_service.toggle_tracking().await.map(Json)
}

pub async fn toggle_transmitting(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ControlStatus>, DashboardError> {
    state.dashboard_service.toggle_transmitting().await.map(Json)
}

pub async fn clear_data(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DashboardView>, DashboardError> {
    state.dashboard_service.clear().await.map(Json)
}

pub async fn set_frequency(
    State(state): State<Arc<AppState>>,
    Json(request): Json<FrequencyRequest>,
) -> Result<Json<ControlStatus>, DashboardError> {
    state
        .dashboard_service
        .set_frequency(&request.raw_input())
        .await
        .map(Json)
}

pub async fn lock(State(state): State<Arc<AppState>>) -> Json<ControlStatus> {
    Json(state.dashboard_service.lock().await)
}

pub async fn unlock(
    State(state): State<Arc<AppState>>,
    Json(request): Json<UnlockRequest>,
) -> Result<Json<ControlStatus>, DashboardError> {
    state.dashboard_service.unlock(&request.password).await.map(Json)
}
