use thiserror::Error;

use crate::db::models::ClaimStatus;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ClaimError {
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },
    #[error("claim {id} not found")]
    NotFound { id: i64 },
    #[error("claim {id} is {current} and cannot become {requested}")]
    Conflict {
        id: i64,
        current: ClaimStatus,
        requested: ClaimStatus,
    },
    #[error("storage failure: {0}")]
    Storage(String),
}

impl ClaimError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// Short heading for the message shown to the user.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "Validation Error",
            Self::NotFound { .. } => "Selection Error",
            Self::Conflict { .. } => "Status Error",
            Self::Storage(_) => "Database Error",
        }
    }
}

impl From<anyhow::Error> for ClaimError {
    fn from(err: anyhow::Error) -> Self {
        Self::Storage(format!("{err:#}"))
    }
}

pub type ClaimResult<T> = Result<T, ClaimError>;
