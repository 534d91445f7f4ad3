use thiserror::Error;

/// Unified error type for all connector operations
///
/// Every fallible operation in the crate surfaces one of these variants.
/// Transport, signing and decoding failures are kept distinct so callers can
/// react differently to a rejected order versus a dropped connection.
#[derive(Error, Debug)]
pub enum ExchangeError {
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Authentication error: {0}")]
    AuthError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timed out: {0}")]
    TimeoutError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Other error: {0}")]
    Other(String),
}

impl ExchangeError {
    /// True when the error came back from the exchange itself rather than
    /// from the transport or the local pipeline.
    #[must_use]
    pub const fn is_api_error(&self) -> bool {
        matches!(self, Self::ApiError { .. })
    }

    /// HTTP status of an API rejection, if this is one.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::ApiError { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<crate::core::config::ConfigError> for ExchangeError {
    fn from(err: crate::core::config::ConfigError) -> Self {
        Self::ConfigurationError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_exposes_status() {
        let err = ExchangeError::ApiError {
            status: 400,
            message: "Invalid product_code".to_string(),
        };
        assert!(err.is_api_error());
        assert_eq!(err.status(), Some(400));
        assert_eq!(
            err.to_string(),
            "API error: 400 - Invalid product_code"
        );
    }

    #[test]
    fn transport_errors_carry_no_status() {
        let err = ExchangeError::TimeoutError("deadline elapsed".to_string());
        assert!(!err.is_api_error());
        assert_eq!(err.status(), None);
    }
}
