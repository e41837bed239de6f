use primitives::{CandidateId, ElectionId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Machine-readable failure category, stable across transports.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
)]
pub enum ErrorKind {
    /// Malformed input such as an empty name or a deadline in the past
    InvalidArgument,
    /// The referenced election or candidate does not exist
    NotFound,
    /// The election's lifecycle does not allow the operation
    InvalidState,
    /// A uniqueness rule would be violated
    Conflict,
    /// The caller lacks the required privilege
    Unauthorized,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),
}

impl LedgerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            LedgerError::NotFound(_) => ErrorKind::NotFound,
            LedgerError::InvalidState(_) => ErrorKind::InvalidState,
            LedgerError::Conflict(_) => ErrorKind::Conflict,
            LedgerError::Unauthorized(_) => ErrorKind::Unauthorized,
        }
    }

    pub(crate) fn election_not_found(election_id: ElectionId) -> Self {
        LedgerError::NotFound(format!("election {election_id} does not exist"))
    }

    pub(crate) fn candidate_not_found(election_id: ElectionId, candidate_id: CandidateId) -> Self {
        LedgerError::NotFound(format!(
            "candidate {candidate_id} does not exist in election {election_id}"
        ))
    }

    pub(crate) fn election_ended(election_id: ElectionId) -> Self {
        LedgerError::InvalidState(format!("election {election_id} has ended"))
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;
