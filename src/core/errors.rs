//! Custom error types for translator operations

use thiserror::Error;

/// Translator-related errors
#[derive(Error, Debug)]
pub enum TranslatorError {
    /// No subscription key configured, or the configuration is unusable
    #[error("Configuration error: {message}")]
    ConfigError {
        /// What is missing or malformed
        message: String,
    },

    /// Request exceeds a documented endpoint limit
    #[error("{limit} - Microsoft Translator ({endpoint}) {message}")]
    LimitExceeded {
        /// Endpoint that refused the request
        endpoint: &'static str,
        /// `TEXT_COUNT_OVER_LIMIT` or `TEXT_TOO_LARGE`
        limit: &'static str,
        /// Limit as the service documents it
        message: String,
    },

    /// Argument the service cannot accept
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// Which argument was rejected
        message: String,
    },

    /// Token issuance returned a non-200 response
    #[error("Error retrieving token from Microsoft Translator API ({status}): {message}")]
    AuthError {
        /// HTTP status of the token response
        status: u16,
        /// Token response body
        message: String,
    },

    /// Network or stream failure
    #[error("Network error: {message}")]
    TransportError {
        /// Underlying transport error
        message: String,
    },

    /// Upstream returned a status other than 200/204
    #[error("Error retrieving result from Microsoft Translator API ({status}): {body}")]
    ApiError {
        /// HTTP status of the response
        status: u16,
        /// Raw response body
        body: String,
    },

    /// Response body is not the expected JSON shape
    #[error("Invalid response: {message}")]
    DecodeError {
        /// Decoder error
        message: String,
    },

    /// Response decoded but carried no result where one was required
    #[error("Parsing result failed: {message}")]
    NoResult {
        /// What was missing
        message: String,
    },
}

impl TranslatorError {
    /// Errors the caller fixes by changing the request or configuration
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            TranslatorError::ConfigError { .. }
                | TranslatorError::LimitExceeded { .. }
                | TranslatorError::InvalidInput { .. }
        )
    }

    /// Errors where the same call may succeed later
    pub fn is_transient(&self) -> bool {
        match self {
            TranslatorError::TransportError { .. } => true,
            TranslatorError::ApiError { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    pub(crate) fn no_result(message: impl Into<String>) -> Self {
        TranslatorError::NoResult {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for TranslatorError {
    fn from(err: reqwest::Error) -> Self {
        TranslatorError::TransportError {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for TranslatorError {
    fn from(err: serde_json::Error) -> Self {
        TranslatorError::DecodeError {
            message: err.to_string(),
        }
    }
}

impl From<anyhow::Error> for TranslatorError {
    fn from(err: anyhow::Error) -> Self {
        TranslatorError::ConfigError {
            message: err.to_string(),
        }
    }
}

/// Result type for translator operations
pub type Result<T> = std::result::Result<T, TranslatorError>;
