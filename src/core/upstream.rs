//! Failures of outbound calls to the CRM and the language model.

use axum::http::StatusCode;
use reqwest::Response;
use serde::de::DeserializeOwned;
use serde_json::Value;

#[derive(Debug, Clone, thiserror::Error)]
pub enum UpstreamError {
    /// The remote service answered with a non-2xx status.
    #[error("upstream responded with {status}: {body}")]
    Status { status: u16, body: Value },
    /// No response was received.
    #[error("upstream request failed: {0}")]
    Transport(String),
    /// A 2xx response whose body did not match the expected shape.
    #[error("unexpected upstream response: {0}")]
    Decode(String),
}

impl UpstreamError {
    /// Status to relay to the HTTP caller; 500 unless the remote sent one.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Status { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            Self::Transport(_) | Self::Decode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Remote body when there is one, otherwise the failure message.
    pub fn details(&self) -> Value {
        match self {
            Self::Status { body, .. } => body.clone(),
            Self::Transport(msg) | Self::Decode(msg) => Value::String(msg.clone()),
        }
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// Decodes a successful JSON body, or turns the error reply into `UpstreamError::Status`.
pub async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, UpstreamError> {
    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        let body = serde_json::from_str(&text).unwrap_or(Value::String(text));
        return Err(UpstreamError::Status {
            status: status.as_u16(),
            body,
        });
    }

    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| UpstreamError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_error_keeps_remote_status_and_body() {
        let err = UpstreamError::Status {
            status: 404,
            body: json!({"message": "resource not found"}),
        };
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.details()["message"], "resource not found");
    }

    #[test]
    fn test_transport_error_defaults_to_500() {
        let err = UpstreamError::Transport("connection refused".to_string());
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.details(), json!("connection refused"));
    }

    #[test]
    fn test_out_of_range_status_defaults_to_500() {
        let err = UpstreamError::Status {
            status: 42,
            body: Value::Null,
        };
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
