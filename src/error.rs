//! Error handling for the securitization investigator
//!
//! Adapter-level failures are deliberately absent here: a source that errors
//! or times out contributes nothing to the run and is recorded in the run
//! summary, never surfaced as an error. Only profile validation problems
//! reach the caller.

use thiserror::Error;

/// Errors surfaced by the public investigation API
#[derive(Error, Debug)]
pub enum InvestigationError {
    #[error("Unknown debt type '{key}', expected one of: mortgage, auto, credit_card, student_loan, personal_loan")]
    UnknownDebtType { key: String },

    #[error("Invalid profile: {reason}")]
    InvalidProfile { reason: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl InvestigationError {
    pub fn invalid_profile(reason: impl Into<String>) -> Self {
        Self::InvalidProfile {
            reason: reason.into(),
        }
    }
}

/// Result type alias for convenience
pub type InvestigationResult<T> = Result<T, InvestigationError>;
