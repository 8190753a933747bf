use thiserror::Error;

/// Login failures. The display text is what the login form shows.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GateError {
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("Authentication failed. Please try again.")]
    VerificationFailed,
    #[error("Login failed. Please try again.")]
    LoginFailed,
    #[error("Login was superseded by a newer request")]
    Superseded,
}

impl GateError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            GateError::InvalidCredentials => 1004,
            GateError::VerificationFailed => 1005,
            GateError::LoginFailed => 1006,
            GateError::Superseded => 1007,
        }
    }
}
