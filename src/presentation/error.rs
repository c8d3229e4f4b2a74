// Mapping of dashboard errors to HTTP responses
use crate::domain::error::DashboardError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

impl DashboardError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            DashboardError::InvalidFrequency(_) => StatusCode::BAD_REQUEST,
            DashboardError::WrongPassword => StatusCode::UNAUTHORIZED,
            DashboardError::Locked => StatusCode::LOCKED,
            DashboardError::InvalidCapacity => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to the user.
    pub fn user_message(&self) -> &'static str {
        match self {
            DashboardError::InvalidFrequency(_) => "frequency must be an integer between 1 and 5",
            DashboardError::WrongPassword => "incorrect password",
            DashboardError::Locked => "dashboard is locked",
            DashboardError::InvalidCapacity => "dashboard is misconfigured",
        }
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(json!({ "error": self.user_message() }))).into_response()
    }
}
