//! Error types for the projection engine

use thiserror::Error;

/// Input validation failures raised at the boundary of each engine function.
///
/// Every variant names the offending input and the constraint it violated so the
/// calling application can show a corrective message. None of these are transient.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProjectionError {
    #[error("invalid date `{field}`: {reason}")]
    InvalidDate { field: &'static str, reason: String },

    #[error("invalid payment `{field}`: {reason}")]
    InvalidPayment { field: &'static str, reason: String },

    #[error("invalid goal `{field}`: {reason}")]
    InvalidGoal { field: &'static str, reason: String },

    /// Account balance or rate out of range
    #[error("invalid account `{field}`: {reason}")]
    InvalidAccount { field: &'static str, reason: String },
}

impl ProjectionError {
    pub fn invalid_date(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidDate { field, reason: reason.into() }
    }

    pub fn invalid_payment(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidPayment { field, reason: reason.into() }
    }

    pub fn invalid_goal(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidGoal { field, reason: reason.into() }
    }

    pub fn invalid_account(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidAccount { field, reason: reason.into() }
    }

    /// Name of the input that failed validation
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidDate { field, .. }
            | Self::InvalidPayment { field, .. }
            | Self::InvalidGoal { field, .. }
            | Self::InvalidAccount { field, .. } => field,
        }
    }
}

pub type Result<T> = std::result::Result<T, ProjectionError>;
