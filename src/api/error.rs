//! HTTP error responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Error envelope returned by the endpoint.
///
/// ```json
/// {"error": {"message": "Missing bearer token", "type": "authentication_error", "code": "unauthorized"}}
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiError {
    pub error: ApiErrorBody,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiErrorBody {
    pub message: String,
    pub r#type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ApiError {
    fn new(message: &str, kind: &str, code: &str) -> Self {
        Self {
            error: ApiErrorBody {
                message: message.to_string(),
                r#type: kind.to_string(),
                code: Some(code.to_string()),
            },
        }
    }

    /// Create an unauthorized error (401).
    pub fn unauthorized(message: &str) -> Self {
        Self::new(message, "authentication_error", "unauthorized")
    }

    /// Create a bad gateway error (502), used when reply delivery fails.
    pub fn bad_gateway(message: &str) -> Self {
        Self::new(message, "server_error", "bad_gateway")
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self.error.code.as_deref() {
            Some("unauthorized") => StatusCode::UNAUTHORIZED,
            Some("bad_gateway") => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::unauthorized("no").status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::bad_gateway("down").status_code(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&ApiError::bad_gateway("channel down")).unwrap();
        assert!(json.contains("\"type\":\"server_error\""));
        assert!(json.contains("\"code\":\"bad_gateway\""));
        assert!(json.contains("channel down"));
    }
}
