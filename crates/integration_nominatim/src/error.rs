//! Geocoding error types

use thiserror::Error;

/// Errors that can occur during geocoding
#[derive(Debug, Error)]
pub enum GeocodingError {
    /// Connection to the geocoding service failed
    #[error("Geocoding connection failed: {0}")]
    ConnectionFailed(String),

    /// The service answered with a non-success status
    #[error("Geocoding request failed: {0}")]
    RequestFailed(String),

    /// The response body could not be interpreted
    #[error("Geocoding parse error: {0}")]
    ParseError(String),

    /// The query was rejected before sending
    #[error("Invalid geocoding query: {0}")]
    InvalidQuery(String),

    /// Request timeout
    #[error("Geocoding request timed out")]
    Timeout,

    /// Configuration error
    #[error("Geocoding configuration error: {0}")]
    ConfigurationError(String),
}

impl GeocodingError {
    /// Whether the failure happened on the wire or in the response
    ///
    /// Everything except query and configuration problems.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_) | Self::RequestFailed(_) | Self::ParseError(_) | Self::Timeout
        )
    }
}

impl From<reqwest::Error> for GeocodingError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else if e.is_decode() {
            Self::ParseError(e.to_string())
        } else {
            Self::ConnectionFailed(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_errors() {
        assert!(GeocodingError::ConnectionFailed("x".to_string()).is_transport());
        assert!(GeocodingError::RequestFailed("HTTP 500".to_string()).is_transport());
        assert!(GeocodingError::ParseError("x".to_string()).is_transport());
        assert!(GeocodingError::Timeout.is_transport());
    }

    #[test]
    fn test_non_transport_errors() {
        assert!(!GeocodingError::InvalidQuery("empty".to_string()).is_transport());
        assert!(!GeocodingError::ConfigurationError("x".to_string()).is_transport());
    }

    #[test]
    fn test_error_display() {
        let err = GeocodingError::RequestFailed("HTTP 503".to_string());
        assert!(err.to_string().contains("503"));

        let err = GeocodingError::Timeout;
        assert!(err.to_string().contains("timed out"));
    }
}
