use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

/// Failure of the data layer while answering a request. There is no fallback dataset, so the
/// request fails with a server error instead of pretending the data is empty.
pub struct ApiError(anyhow::Error);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!("Failed to serve request {:?}", self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to load presence data: {:#}", self.0),
        )
            .into_response()
    }
}

impl<E: Into<anyhow::Error>> From<E> for ApiError {
    fn from(value: E) -> Self {
        Self(value.into())
    }
}
