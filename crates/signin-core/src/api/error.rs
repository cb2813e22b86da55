use thiserror::Error;

use crate::models::LoginResponse;

#[derive(Error, Debug)]
pub enum ApiError {
    /// The endpoint answered with an error body
    #[error("Login rejected: {0}")]
    Rejected(String),

    #[error("Unauthorized - invalid credentials")]
    Unauthorized,

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            let mut end = MAX_ERROR_BODY_LENGTH;
            while !body.is_char_boundary(end) {
                end -= 1;
            }
            format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
        }
    }

    /// Map a non-success response to an error. An `{"error": ...}` body wins
    /// over the status code.
    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        if let Ok(LoginResponse::Failure { error }) = serde_json::from_str(body) {
            return ApiError::Rejected(error);
        }

        let truncated = Self::truncate_body(body);
        match status.as_u16() {
            401 => ApiError::Unauthorized,
            500..=599 => ApiError::ServerError(truncated),
            _ => ApiError::InvalidResponse(format!("Status {}: {}", status, truncated)),
        }
    }

    /// Message for the sign-in error indicator
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Rejected(message) => format!("Sign in failed: {}", message),
            ApiError::Unauthorized => "Invalid email or password".to_string(),
            ApiError::ServerError(_) => "Server error. Please try again later.".to_string(),
            ApiError::NetworkError(e) if e.is_timeout() => {
                "Connection timed out. Please try again.".to_string()
            }
            ApiError::NetworkError(_) => {
                "Unable to connect to server. Check your internet connection.".to_string()
            }
            ApiError::InvalidResponse(_) => "Unexpected response from server".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_error_body_becomes_rejected() {
        let err = ApiError::from_status(StatusCode::BAD_REQUEST, r#"{"error":"user not found"}"#);
        assert!(matches!(err, ApiError::Rejected(ref m) if m == "user not found"));
        assert_eq!(err.user_message(), "Sign in failed: user not found");
    }

    #[test]
    fn test_status_mapping_without_error_body() {
        assert!(matches!(
            ApiError::from_status(StatusCode::UNAUTHORIZED, ""),
            ApiError::Unauthorized
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::BAD_GATEWAY, "<html>"),
            ApiError::ServerError(_)
        ));
        let err = ApiError::from_status(StatusCode::BAD_REQUEST, "nope");
        assert!(err.to_string().contains("400"));
    }

    #[test]
    fn test_truncate_body() {
        let long = "x".repeat(MAX_ERROR_BODY_LENGTH + 10);
        let truncated = ApiError::truncate_body(&long);
        assert!(truncated.starts_with(&"x".repeat(MAX_ERROR_BODY_LENGTH)));
        assert!(truncated.contains("510 total bytes"));

        assert_eq!(ApiError::truncate_body("short"), "short");
    }

    #[test]
    fn test_truncate_body_respects_char_boundaries() {
        let long = "é".repeat(MAX_ERROR_BODY_LENGTH);
        // Must not panic on a multi-byte boundary
        let truncated = ApiError::truncate_body(&long);
        assert!(truncated.contains("truncated"));
    }
}
