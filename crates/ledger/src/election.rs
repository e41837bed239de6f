use std::collections::HashSet;

use primitives::{Address, CandidateId, ElectionId, Timestamp};
use serde::{Deserialize, Serialize};

/// A named option within an election.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub id: CandidateId,
    pub name: String,
    pub vote_count: u64,
}

/// A named ballot with a deadline, a candidate list and an open/closed state.
///
/// Owned by the ledger's store; callers only ever see the snapshot types
/// below.
#[derive(Debug, Clone)]
pub struct Election {
    pub id: ElectionId,
    pub name: String,
    pub deadline: Timestamp,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub created_by: Address,

    /// Indexed by `candidate id - 1`
    candidates: Vec<Candidate>,

    /// Accounts that already voted here
    vote_record: HashSet<Address>,
}

impl Election {
    pub(crate) fn new(
        id: ElectionId,
        name: String,
        deadline: Timestamp,
        created_at: Timestamp,
        created_by: Address,
    ) -> Self {
        Self {
            id,
            name,
            deadline,
            is_active: true,
            created_at,
            created_by,
            candidates: Vec::new(),
            vote_record: HashSet::new(),
        }
    }

    /// True once `now` has reached the deadline, whether or not the election
    /// has been flipped inactive yet.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        now >= self.deadline
    }

    /// Still flagged active although its deadline passed. Such an election
    /// must be closed before anything else looks at it.
    pub(crate) fn needs_auto_close(&self, now: Timestamp) -> bool {
        self.is_active && self.is_expired(now)
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn candidate(&self, candidate_id: CandidateId) -> Option<&Candidate> {
        let idx = candidate_id.checked_sub(1)?;
        self.candidates.get(usize::try_from(idx).ok()?)
    }

    pub(crate) fn candidate_mut(&mut self, candidate_id: CandidateId) -> Option<&mut Candidate> {
        let idx = candidate_id.checked_sub(1)?;
        self.candidates.get_mut(usize::try_from(idx).ok()?)
    }

    pub(crate) fn push_candidate(&mut self, name: String) -> CandidateId {
        let id = self.candidates.len() as CandidateId + 1;

        self.candidates.push(Candidate {
            id,
            name,
            vote_count: 0,
        });

        id
    }

    pub fn has_voted(&self, account: &Address) -> bool {
        self.vote_record.contains(account)
    }

    pub(crate) fn record_voter(&mut self, account: Address) {
        self.vote_record.insert(account);
    }

    pub fn total_votes(&self) -> u64 {
        self.candidates.iter().map(|c| c.vote_count).sum()
    }

    pub fn time_left(&self, now: Timestamp) -> u64 {
        self.deadline.saturating_sub(now)
    }
}

/// One row of an election's tally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateResult {
    pub id: CandidateId,
    pub name: String,
    pub vote_count: u64,
}

impl From<&Candidate> for CandidateResult {
    fn from(candidate: &Candidate) -> Self {
        Self {
            id: candidate.id,
            name: candidate.name.clone(),
            vote_count: candidate.vote_count,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElectionStatus {
    pub is_active: bool,
    pub deadline: Timestamp,
    /// Seconds until the deadline, 0 once it passed
    pub time_left: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElectionSummary {
    pub id: ElectionId,
    pub name: String,
    pub deadline: Timestamp,
    pub is_active: bool,
    pub candidate_count: u64,
    pub total_votes: u64,
    pub created_at: Timestamp,
    pub created_by: Address,
}

impl From<&Election> for ElectionSummary {
    fn from(election: &Election) -> Self {
        Self {
            id: election.id,
            name: election.name.clone(),
            deadline: election.deadline,
            is_active: election.is_active,
            candidate_count: election.candidates.len() as u64,
            total_votes: election.total_votes(),
            created_at: election.created_at,
            created_by: election.created_by,
        }
    }
}
