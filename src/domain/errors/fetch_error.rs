//! Remote fetch error types.

use thiserror::Error;

/// Errors surfaced by the catalog client, the resource transport and the
/// fetch coordinator. None of them is retried internally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum FetchError {
    #[error("bad server response: HTTP {status}")]
    BadResponse { status: u16 },

    #[error("cannot decode content: {message}")]
    DecodeFailure { message: String },

    #[error("network error: {message}")]
    Network { message: String },
}

impl FetchError {
    /// Creates bad response error.
    #[must_use]
    pub const fn bad_response(status: u16) -> Self {
        Self::BadResponse { status }
    }

    /// Creates decode failure error.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::DecodeFailure {
            message: message.into(),
        }
    }

    /// Creates network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Maps a reqwest failure that happened before a status was available.
    #[must_use]
    pub fn from_request(error: &reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::network("request timed out")
        } else if error.is_connect() {
            Self::network("failed to connect")
        } else if error.is_decode() {
            Self::decode(error.to_string())
        } else {
            Self::network(error.to_string())
        }
    }

    /// Returns whether the server answered with a non-success status.
    #[must_use]
    pub const fn is_bad_response(&self) -> bool {
        matches!(self, Self::BadResponse { .. })
    }

    /// Returns whether the payload could not be interpreted.
    #[must_use]
    pub const fn is_decode_failure(&self) -> bool {
        matches!(self, Self::DecodeFailure { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_human_readable() {
        assert_eq!(
            FetchError::bad_response(503).to_string(),
            "bad server response: HTTP 503"
        );
        assert_eq!(
            FetchError::decode("not an image").to_string(),
            "cannot decode content: not an image"
        );
    }

    #[test]
    fn test_classification() {
        assert!(FetchError::bad_response(404).is_bad_response());
        assert!(FetchError::decode("x").is_decode_failure());
        assert!(!FetchError::network("x").is_bad_response());
    }
}
