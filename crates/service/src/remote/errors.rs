use thiserror::Error;

/// Failure of a remote backend call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RemoteError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request timed out")]
    Timeout,
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[error("rejected by backend ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("decode error: {0}")]
    Decode(String),
    #[error("session changed while the request was in flight")]
    Stale,
}

impl RemoteError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, RemoteError::Unauthorized(_))
    }

    /// Network trouble rather than an answer from the backend.
    pub fn is_transient(&self) -> bool {
        matches!(self, RemoteError::Network(_) | RemoteError::Timeout)
    }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            RemoteError::Network(_) => 2001,
            RemoteError::Timeout => 2002,
            RemoteError::Unauthorized(_) => 2003,
            RemoteError::Rejected { .. } => 2004,
            RemoteError::Decode(_) => 2005,
            RemoteError::Stale => 2006,
        }
    }
}

impl From<reqwest::Error> for RemoteError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            RemoteError::Timeout
        } else if e.is_decode() {
            RemoteError::Decode(e.to_string())
        } else {
            RemoteError::Network(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_covers_transport_failures_only() {
        assert!(RemoteError::Network("reset".into()).is_transient());
        assert!(RemoteError::Timeout.is_transient());
        assert!(!RemoteError::Unauthorized("no".into()).is_transient());
        assert!(!RemoteError::Stale.is_transient());
        assert_eq!(RemoteError::Stale.code(), 2006);
    }
}
