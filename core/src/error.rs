use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenError {
    #[error("Invalid parameter '{parameter}': {reason}")]
    InvalidParameter {
        parameter: &'static str,
        reason:    String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Cannot build {name} distribution: {reason}")]
    Distribution { name: &'static str, reason: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GenError {
    pub(crate) fn invalid(parameter: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            parameter,
            reason: reason.into(),
        }
    }

    pub(crate) fn distribution(name: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Distribution {
            name,
            reason: err.to_string(),
        }
    }
}

pub type GenResult<T> = Result<T, GenError>;
