//! Client error types

use thiserror::Error;

/// Error body returned by the remote API on failure
#[derive(Debug, serde::Deserialize)]
pub(crate) struct ApiErrorResponse {
    pub message: String,
}

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// No bearer token in the session; the request was never sent
    #[error("Token not found")]
    MissingToken,

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Remote API rejected the request with a message
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication rejected (401)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Sale id not present in the loaded collection
    #[error("Sale {0} not found")]
    SaleNotFound(i64),

    /// Product id not present in the loaded catalog
    #[error("Product {0} not found")]
    ProductNotFound(i64),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// CSV writer error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// File system error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// Message carried by the remote API, if any
    pub fn api_message(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Whether the failure happened before anything was sent
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::MissingToken | Self::SaleNotFound(_) | Self::ProductNotFound(_) | Self::Config(_)
        )
    }

    /// Build the error for a non-success status and its body text
    pub(crate) fn from_status(status: http::StatusCode, text: String) -> Self {
        if let Ok(api_err) = serde_json::from_str::<ApiErrorResponse>(&text) {
            if status == http::StatusCode::UNAUTHORIZED {
                return Self::Unauthorized(api_err.message);
            }
            return Self::Api {
                status: status.as_u16(),
                message: api_err.message,
            };
        }
        match status {
            http::StatusCode::UNAUTHORIZED => Self::Unauthorized("Unauthorized".into()),
            http::StatusCode::FORBIDDEN => Self::Forbidden(text),
            http::StatusCode::NOT_FOUND => Self::NotFound(text),
            http::StatusCode::BAD_REQUEST => Self::Validation(text),
            _ => Self::Internal(text),
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
