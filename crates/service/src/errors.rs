use thiserror::Error;

use crate::booking::validation::ValidationResult;
use crate::remote::RemoteError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("booking form has {} invalid field(s)", .0.errors.len())]
    Validation(ValidationResult),
    #[error(transparent)]
    Remote(#[from] RemoteError),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ServiceError::Remote(e) if e.is_unauthorized())
    }
}
