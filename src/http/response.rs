//! Error responses.
//!
//! # Responsibilities
//! - Map upstream failures to proxy status codes
//! - Map rejected inbound bodies and queries to client errors
//! - Answer unknown routes, wrong methods and slow requests
//! - Render every failure as `{"detail": "..."}`
//!
//! # Design Decisions
//! - Unreadable bodies are unprocessable (422) like invalid fields, except
//!   oversize ones (413)
//! - Upstream HTTP errors keep the upstream status code
//! - Unreachable upstreams answer 503, unparseable upstream payloads 500
//! - Details never carry credentials; callers redact before constructing

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Errors surfaced to proxy clients.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Inbound body or query could not be extracted.
    #[error("{detail}")]
    Rejected { status: StatusCode, detail: String },

    /// Inbound request parsed but failed semantic checks.
    #[error("{0}")]
    InvalidRequest(String),

    /// Upstream answered with a non-success status.
    #[error("External API Error ({code}): {body} | Sent Payload: {sent}", code = .status.as_u16())]
    Upstream {
        status: StatusCode,
        body: String,
        sent: String,
    },

    /// Upstream could not be reached or did not answer in time.
    #[error("Could not connect to external API: {0}")]
    Unavailable(String),

    /// Upstream payload did not match the response schema.
    #[error("Invalid response from external API: {0}")]
    InvalidResponse(String),

    /// Upstream acknowledged the query but had nothing to return.
    #[error("{0}")]
    NoData(String),

    /// A required upstream credential is not configured.
    #[error("{0}")]
    NotConfigured(&'static str),

    #[error("Not Found")]
    RouteNotFound,

    #[error("Method Not Allowed")]
    MethodNotAllowed,

    /// The proxy's own request deadline passed.
    #[error("Request Timeout")]
    Timeout,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Rejected { status, .. } => *status,
            ApiError::InvalidRequest(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Upstream { status, .. } => *status,
            ApiError::Unavailable(_) | ApiError::NotConfigured(_) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            ApiError::InvalidResponse(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NoData(_) | ApiError::RouteNotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Timeout => StatusCode::REQUEST_TIMEOUT,
        }
    }
}

/// Body of every error response.
#[derive(Serialize, ToSchema)]
#[schema(example = json!({"detail": "Could not connect to external API: connection refused"}))]
pub struct ErrorBody {
    pub detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!(status = status.as_u16(), error = %self, "Request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "Request rejected");
        }
        (status, Json(ErrorBody { detail: self.to_string() })).into_response()
    }
}

/// Malformed JSON and a wrong content type count as unprocessable input.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let status = if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            StatusCode::PAYLOAD_TOO_LARGE
        } else {
            StatusCode::UNPROCESSABLE_ENTITY
        };
        ApiError::Rejected {
            status,
            detail: rejection.body_text(),
        }
    }
}

/// Fallback for paths without a route.
pub async fn route_not_found() -> ApiError {
    ApiError::RouteNotFound
}

/// Fallback for known paths hit with an unsupported method.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// Query strings only fail on missing or mistyped parameters, reported as
/// unprocessable like body fields.
impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Rejected {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            detail: rejection.body_text(),
        }
    }
}
