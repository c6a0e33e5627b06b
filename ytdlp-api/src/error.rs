use std::any::Any;

use axum::{
    Json,
    extract::rejection::QueryRejection,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response}
};
use serde::{Deserialize, Serialize};

/// JSON body of every 4xx/5xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub code: u16,
    pub name: String,
    pub description: String
}

impl ErrorEnvelope {
    pub fn new(status: StatusCode, description: impl Into<String>) -> Self {
        Self {
            code: status.as_u16(),
            name: status.canonical_reason().unwrap_or("Unknown Error").to_string(),
            description: description.into()
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0} querystring required")]
    MissingParam(&'static str),

    #[error("{0}")]
    BadRequest(String),

    #[error("missing or invalid credentials")]
    Unauthorized { realm: String },

    #[error("the requested URL was not found on the server")]
    NotFound,

    #[error("the method is not allowed for the requested URL")]
    MethodNotAllowed,

    #[error(transparent)]
    Extraction(#[from] yt_dlp::Error),

    #[error("{0}")]
    Internal(String)
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingParam(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Extraction(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    pub fn envelope(&self) -> ErrorEnvelope {
        ErrorEnvelope::new(self.status(), self.to_string())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Extraction(err) => {
                tracing::warn!(error = %err, exit_code = ?err.exit_code(), "extraction failed");
            }
            ApiError::Internal(message) => tracing::error!("internal error: {}", message),
            other => tracing::debug!(status = %other.status(), "request rejected: {}", other)
        }

        let mut response = (self.status(), Json(self.envelope())).into_response();

        if let ApiError::Unauthorized { realm } = &self {
            if let Ok(challenge) = HeaderValue::from_str(&format!("Basic realm=\"{realm}\"")) {
                response.headers_mut().insert(header::WWW_AUTHENTICATE, challenge);
            }
        }

        response
    }
}

/// Response for a handler that panicked, used by `CatchPanicLayer`.
#[allow(clippy::needless_pass_by_value)]
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "handler panicked".to_string()
    };

    ApiError::Internal(detail).into_response()
}
