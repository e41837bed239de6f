use primitives::{Address, CandidateId, Credential, ElectionId, EventSeq, Timestamp};
use serde::{Deserialize, Serialize};

/// Why an election stopped accepting votes.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize, strum_macros::Display)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "snake_case")]
pub enum CloseReason {
    /// The administrator closed it explicitly.
    Admin,

    /// A call observed that the deadline had passed and closed it on the
    /// system's behalf.
    DeadlineExpired,
}

/// Notifications emitted by the ledger, one per successful state change.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize, strum_macros::Display)]
#[serde(tag = "type")]
#[non_exhaustive]
pub enum Event {
    /// A new election was stored under `id`.
    ElectionCreated { id: ElectionId },

    /// Candidate `id` was appended to election `election_id`.
    CandidateAdded {
        #[serde(rename = "electionId")]
        election_id: ElectionId,
        id: CandidateId,
    },

    /// `credential` is now bound to `account`.
    VoterRegistered {
        credential: Credential,
        account: Address,
    },

    /// `account` voted for `candidate_id` in `election_id`.
    VoteCasted {
        #[serde(rename = "electionId")]
        election_id: ElectionId,
        #[serde(rename = "candidateId")]
        candidate_id: CandidateId,
        account: Address,
    },

    /// Election `id` became inactive.
    ElectionClosed { id: ElectionId, reason: CloseReason },
}

impl Event {
    /// Election the notification refers to, if any.
    pub fn election_id(&self) -> Option<ElectionId> {
        match self {
            Event::ElectionCreated { id } | Event::ElectionClosed { id, .. } => Some(*id),
            Event::CandidateAdded { election_id, .. } | Event::VoteCasted { election_id, .. } => {
                Some(*election_id)
            },
            Event::VoterRegistered { .. } => None,
        }
    }
}

/// A notification together with its position in the ledger's history.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    /// 1-based, gapless sequence number
    pub seq: EventSeq,
    pub timestamp: Timestamp,
    pub event: Event,
}
