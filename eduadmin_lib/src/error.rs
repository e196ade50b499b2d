//! Error types for the library layer.

/// Errors produced by the library layer, wrapping upstream API errors
/// and adding session-store, serialization, and input validation failures.
#[derive(thiserror::Error, Debug)]
pub enum AdminError {
    /// An error from the underlying API client.
    #[error("API error: {0}")]
    Api(#[from] eduadmin_api::Error),
    /// JSON serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    /// User-provided input failed validation.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// Reading or writing the persisted session failed.
    #[error("Session store error: {0}")]
    SessionStore(String),
}

impl AdminError {
    /// True when the underlying failure is an expired session (401).
    /// Hosts short-circuit to the login flow instead of retrying.
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::Api(eduadmin_api::Error::SessionExpired))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_expired_detected_through_wrapper() {
        let err = AdminError::from(eduadmin_api::Error::SessionExpired);
        assert!(err.is_session_expired());
    }

    #[test]
    fn other_errors_are_not_session_expired() {
        let err = AdminError::from(eduadmin_api::Error::RequestFailed);
        assert!(!err.is_session_expired());
        let err = AdminError::InvalidInput("bad page".to_string());
        assert!(!err.is_session_expired());
    }
}
