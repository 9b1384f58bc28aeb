use axum::{
    response::{IntoResponse, Response},
    Json,
};

use super::upstream::UpstreamError;

/// An upstream failure tagged with the endpoint's short message.
///
/// Renders as `{ "error": <message>, "details": <upstream body> }` with the
/// upstream status code.
#[derive(Debug, thiserror::Error)]
#[error("{message}: {source}")]
pub struct ApiError {
    message: &'static str,
    #[source]
    source: UpstreamError,
}

impl ApiError {
    pub fn new(message: &'static str, source: UpstreamError) -> Self {
        Self { message, source }
    }

    /// For `map_err`: `.map_err(ApiError::with("Failed to fetch contacts"))`.
    pub fn with(message: &'static str) -> impl FnOnce(UpstreamError) -> Self {
        move |source| Self::new(message, source)
    }

    pub fn message(&self) -> &'static str {
        self.message
    }

    pub fn upstream(&self) -> &UpstreamError {
        &self.source
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let details = self.source.details();
        log::error!("{}: {}", self.message, details);
        (
            self.source.status(),
            Json(serde_json::json!({
                "error": self.message,
                "details": details,
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_error_envelope() {
        let err = ApiError::new(
            "Failed to fetch contacts",
            UpstreamError::Status {
                status: 401,
                body: serde_json::json!({"category": "INVALID_AUTHENTICATION"}),
            },
        );
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "Failed to fetch contacts");
        assert_eq!(body["details"]["category"], "INVALID_AUTHENTICATION");
    }
}
