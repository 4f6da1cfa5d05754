use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("command not found: {0}")]
    CommandNotFound(String),

    #[error("player not tracked: {0}")]
    PlayerNotFound(String),

    #[error("core error: {0}")]
    Core(#[from] lpt_core::CoreError),

    #[error("tracking error: {0}")]
    Track(#[from] lpt_core::TrackError),
}

#[cfg(feature = "http")]
impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        use axum::http::StatusCode;

        let status = match &self {
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Core(lpt_core::CoreError::InvalidArguments(_)) => StatusCode::BAD_REQUEST,
            ApiError::CommandNotFound(_) | ApiError::PlayerNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Core(_) | ApiError::Track(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = serde_json::json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}
