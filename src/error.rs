//! Error types for the Coinbase client library.

use serde::Deserialize;
use thiserror::Error;

/// The main error type for all Coinbase client operations.
#[derive(Error, Debug)]
pub enum CoinbaseError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP request with middleware failed
    #[error("HTTP request failed: {0}")]
    HttpMiddleware(#[from] reqwest_middleware::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// Coinbase API returned an error
    #[error("Coinbase API error: {0}")]
    Api(ApiError),

    /// Authentication error (signing failed or a signing header is missing)
    #[error("Authentication error: {0}")]
    Auth(String),

    /// The request could not be built from the given arguments
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Invalid response from the API
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl CoinbaseError {
    /// Returns true for network, I/O and decoding failures.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            CoinbaseError::Http(_)
                | CoinbaseError::HttpMiddleware(_)
                | CoinbaseError::Json(_)
                | CoinbaseError::Url(_)
                | CoinbaseError::InvalidResponse(_)
        )
    }

    /// Returns true when the remote service answered with an error body.
    pub fn is_api(&self) -> bool {
        matches!(self, CoinbaseError::Api(_))
    }

    /// The API error, if this is one.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            CoinbaseError::Api(e) => Some(e),
            _ => None,
        }
    }
}

/// One entry of Coinbase's `errors` array.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ErrorEntry {
    /// Machine-readable error id (e.g. `not_found`).
    pub id: String,
    /// Human-readable message.
    #[serde(default)]
    pub message: String,
    /// Link to documentation for the error, when provided.
    #[serde(default)]
    pub url: Option<String>,
}

/// Error body returned by the v2 API: `{"errors": [{"id": ..., "message": ...}]}`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorResponse {
    pub errors: Vec<ErrorEntry>,
}

/// Coinbase API error codes and messages.
///
/// These are errors returned by the Coinbase API itself in the response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status of the response, when the error came from one
    pub status: Option<u16>,
    /// The error id from Coinbase (e.g., "validation_error")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Any further entries of the `errors` array
    pub additional: Vec<ErrorEntry>,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.status {
            Some(status) => write!(f, "{} (HTTP {}): {}", self.code, status, self.message),
            None => write!(f, "{}: {}", self.code, self.message),
        }
    }
}

impl ApiError {
    /// Create a new API error from code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: None,
            code: code.into(),
            message: message.into(),
            additional: Vec::new(),
        }
    }

    /// Attach the HTTP status the error arrived with.
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Build an API error from Coinbase's `errors` array.
    ///
    /// The first entry becomes the primary code and message.
    pub fn from_errors(errors: &[ErrorEntry]) -> Option<Self> {
        let (first, rest) = errors.split_first()?;
        Some(Self {
            status: None,
            code: first.id.clone(),
            message: first.message.clone(),
            additional: rest.to_vec(),
        })
    }

    /// Build an API error from an error response body.
    ///
    /// Bodies that are not a well-formed `errors` array still produce an
    /// error, with the code derived from the HTTP status and the raw body as
    /// the message.
    pub fn from_body(status: u16, body: &str) -> Self {
        serde_json::from_str::<ErrorResponse>(body)
            .ok()
            .and_then(|r| Self::from_errors(&r.errors))
            .unwrap_or_else(|| {
                let message = if body.trim().is_empty() {
                    format!("HTTP {status}")
                } else {
                    body.to_string()
                };
                Self::new(error_codes::for_status(status), message)
            })
            .with_status(status)
    }

    /// Check if the requested resource does not exist.
    pub fn is_not_found(&self) -> bool {
        self.code == error_codes::NOT_FOUND
    }

    /// Check if the request was rejected by validation (bad amount, duplicate name, ...).
    pub fn is_validation_error(&self) -> bool {
        self.code == error_codes::VALIDATION_ERROR || self.code == error_codes::PARAM_REQUIRED
    }

    /// Check if the key, signature or timestamp was rejected.
    pub fn is_authentication_error(&self) -> bool {
        matches!(
            self.code.as_str(),
            error_codes::AUTHENTICATION_ERROR
                | error_codes::INVALID_TOKEN
                | error_codes::REVOKED_TOKEN
                | error_codes::EXPIRED_TOKEN
                | error_codes::INVALID_SCOPE
        )
    }

    /// Check if this is a rate limit error.
    pub fn is_rate_limit(&self) -> bool {
        self.code == error_codes::RATE_LIMIT_EXCEEDED
    }

    /// Check if the operation needs a second factor.
    pub fn is_two_factor_required(&self) -> bool {
        self.code == error_codes::TWO_FACTOR_REQUIRED
    }
}

/// Known Coinbase v2 error ids for pattern matching.
pub mod error_codes {
    pub const TWO_FACTOR_REQUIRED: &str = "two_factor_required";
    pub const PARAM_REQUIRED: &str = "param_required";
    pub const VALIDATION_ERROR: &str = "validation_error";
    pub const INVALID_REQUEST: &str = "invalid_request";
    pub const PERSONAL_DETAILS_REQUIRED: &str = "personal_details_required";
    pub const IDENTITY_VERIFICATION_REQUIRED: &str = "identity_verification_required";
    pub const UNVERIFIED_EMAIL: &str = "unverified_email";

    pub const AUTHENTICATION_ERROR: &str = "authentication_error";
    pub const INVALID_TOKEN: &str = "invalid_token";
    pub const REVOKED_TOKEN: &str = "revoked_token";
    pub const EXPIRED_TOKEN: &str = "expired_token";
    pub const INVALID_SCOPE: &str = "invalid_scope";

    pub const NOT_FOUND: &str = "not_found";
    pub const RATE_LIMIT_EXCEEDED: &str = "rate_limit_exceeded";
    pub const INTERNAL_SERVER_ERROR: &str = "internal_server_error";

    /// Fallback id for statuses Coinbase does not document.
    pub const UNKNOWN: &str = "unknown";

    /// The documented error id for an HTTP status.
    pub fn for_status(status: u16) -> &'static str {
        match status {
            400 => INVALID_REQUEST,
            401 => AUTHENTICATION_ERROR,
            402 => TWO_FACTOR_REQUIRED,
            403 => INVALID_SCOPE,
            404 => NOT_FOUND,
            422 => VALIDATION_ERROR,
            429 => RATE_LIMIT_EXCEEDED,
            500..=599 => INTERNAL_SERVER_ERROR,
            _ => UNKNOWN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_from_body() {
        let body = r#"{"errors":[{"id":"not_found","message":"Not found"}]}"#;
        let error = ApiError::from_body(404, body);
        assert_eq!(error.code, "not_found");
        assert_eq!(error.message, "Not found");
        assert_eq!(error.status, Some(404));
        assert!(error.is_not_found());
        assert!(error.additional.is_empty());
    }

    #[test]
    fn test_api_error_keeps_additional_entries() {
        let body = r#"{"errors":[
            {"id":"validation_error","message":"Name is taken"},
            {"id":"param_required","message":"Currency is required"}
        ]}"#;
        let error = ApiError::from_body(422, body);
        assert!(error.is_validation_error());
        assert_eq!(error.additional.len(), 1);
        assert_eq!(error.additional[0].id, "param_required");
    }

    #[test]
    fn test_malformed_body_still_api_error() {
        let error = ApiError::from_body(500, "<html>Bad gateway</html>");
        assert_eq!(error.code, error_codes::INTERNAL_SERVER_ERROR);
        assert_eq!(error.message, "<html>Bad gateway</html>");

        let error = ApiError::from_body(401, r#"{"errors": []}"#);
        assert!(error.is_authentication_error());

        let error = ApiError::from_body(418, "");
        assert_eq!(error.code, error_codes::UNKNOWN);
        assert_eq!(error.message, "HTTP 418");
    }

    #[test]
    fn test_api_error_display() {
        let error = ApiError::new("validation_error", "Insufficient funds");
        assert_eq!(error.to_string(), "validation_error: Insufficient funds");
        let error = error.with_status(422);
        assert_eq!(
            error.to_string(),
            "validation_error (HTTP 422): Insufficient funds"
        );
    }

    #[test]
    fn test_error_classification() {
        let api = CoinbaseError::Api(ApiError::new("not_found", "missing"));
        assert!(api.is_api());
        assert!(!api.is_transport());
        assert!(api.api_error().is_some());

        let transport = CoinbaseError::InvalidResponse("truncated".to_string());
        assert!(transport.is_transport());
        assert!(!transport.is_api());
    }
}
