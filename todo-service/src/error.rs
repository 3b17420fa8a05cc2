//! Error type shared by every handler.
//!
//! Each variant renders as `{"error": "<message>"}` with its status code, so
//! clients can rely on a single error shape regardless of which route failed.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum TodoError {
    #[error("Title is required")]
    TitleRequired,

    #[error("Priority must be low, medium, or high")]
    InvalidPriority,

    #[error("Invalid category")]
    InvalidCategory,

    /// The body or query string could not be decoded into the expected shape.
    #[error("{0}")]
    Malformed(String),

    #[error("Todo not found")]
    NotFound,

    #[error("Route not found")]
    RouteNotFound,

    /// Never carries details; whatever went wrong is logged, not returned.
    #[error("Something went wrong!")]
    Internal,
}

impl TodoError {
    pub fn status(&self) -> StatusCode {
        match self {
            TodoError::TitleRequired
            | TodoError::InvalidPriority
            | TodoError::InvalidCategory
            | TodoError::Malformed(_) => StatusCode::BAD_REQUEST,
            TodoError::NotFound | TodoError::RouteNotFound => StatusCode::NOT_FOUND,
            TodoError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for TodoError {
    fn from(rejection: JsonRejection) -> Self {
        TodoError::Malformed(rejection.body_text())
    }
}

impl From<QueryRejection> for TodoError {
    fn from(rejection: QueryRejection) -> Self {
        TodoError::Malformed(rejection.body_text())
    }
}

impl IntoResponse for TodoError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_client_error() {
            tracing::debug!(%status, error = %self, "request rejected");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
