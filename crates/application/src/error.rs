//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Geocoding transport failure or malformed provider response
    #[error("Network error: {0}")]
    Network(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Whether the failure originates from the external geocoding service
    pub const fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

#[cfg(test)]
mod tests {
    use domain::Coordinate;

    use super::*;

    #[test]
    fn network_errors_are_flagged() {
        assert!(ApplicationError::Network("timeout".to_string()).is_network());
        assert!(!ApplicationError::Internal("x".to_string()).is_network());
    }

    #[test]
    fn domain_error_converts_transparently() {
        let domain_err: DomainError = Coordinate::new(95.0, 0.0).unwrap_err().into();
        let message = domain_err.to_string();
        let err: ApplicationError = domain_err.into();
        assert!(matches!(err, ApplicationError::Domain(_)));
        assert_eq!(err.to_string(), message);
    }

    #[test]
    fn error_display() {
        let err = ApplicationError::NotFound("session abc".to_string());
        assert_eq!(err.to_string(), "Not found: session abc");
    }
}
