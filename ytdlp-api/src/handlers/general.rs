use axum::{
    Json,
    extract::State,
    http::StatusCode
};
use serde::Serialize;

use crate::error::ApiError;
use crate::health::HealthReport;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct Greeting {
    pub message: &'static str,
    pub service: String
}

#[derive(Debug, Serialize)]
pub struct Message {
    pub message: &'static str
}

pub async fn root(State(state): State<AppState>) -> Json<Greeting> {
    Json(Greeting {
        message: "Hello world!",
        service: state.config.service_name.clone()
    })
}

pub async fn authd() -> Json<Message> {
    Json(Message {
        message: "Hello auth!"
    })
}

pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthReport>) {
    let report = state.health.run();

    let status = if report.is_healthy() {
        StatusCode::OK
    } else {
        tracing::warn!(?report, "health check failed");
        StatusCode::INTERNAL_SERVER_ERROR
    };

    (status, Json(report))
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
