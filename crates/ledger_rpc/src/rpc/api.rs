use events::EventRecord;
use jsonrpsee::{core::Error, proc_macros::rpc};
use ledger::{CandidateResult, ElectionStatus, ElectionSummary, LedgerInfo};
use primitives::{Address, CandidateId, ElectionId, EventSeq, Timestamp};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionReceipt {
    pub id: ElectionId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateReceipt {
    pub id: CandidateId,
}

#[rpc(server, client, namespace = "ledger")]
pub trait LedgerApi {
    /// Creates an election that accepts votes until `deadline`
    #[method(name = "createElection")]
    async fn create_election(
        &self,
        caller: Address,
        name: String,
        deadline: Timestamp,
    ) -> Result<ElectionReceipt, Error>;

    /// Appends a candidate to an open election
    #[method(name = "addCandidate")]
    async fn add_candidate(
        &self,
        caller: Address,
        election_id: ElectionId,
        name: String,
    ) -> Result<CandidateReceipt, Error>;

    /// Binds a credential to the calling account
    #[method(name = "registerVoter")]
    async fn register_voter(&self, caller: Address, credential: String) -> Result<(), Error>;

    #[method(name = "vote")]
    async fn vote(
        &self,
        caller: Address,
        election_id: ElectionId,
        candidate_id: CandidateId,
    ) -> Result<(), Error>;

    /// Closes an election before its deadline. Admin only
    #[method(name = "closeElection")]
    async fn close_election(&self, caller: Address, election_id: ElectionId)
        -> Result<(), Error>;

    /// Returns every candidate of an election with its vote count
    #[method(name = "getResults")]
    async fn get_results(
        &self,
        caller: Address,
        election_id: ElectionId,
    ) -> Result<Vec<CandidateResult>, Error>;

    #[method(name = "getElectionStatus")]
    async fn get_election_status(
        &self,
        caller: Address,
        election_id: ElectionId,
    ) -> Result<ElectionStatus, Error>;

    #[method(name = "getCandidate")]
    async fn get_candidate(
        &self,
        election_id: ElectionId,
        candidate_id: CandidateId,
    ) -> Result<CandidateResult, Error>;

    #[method(name = "getElection")]
    async fn get_election(&self, election_id: ElectionId) -> Result<ElectionSummary, Error>;

    /// Returns a summary of all elections in id order
    #[method(name = "listElections")]
    async fn list_elections(&self) -> Result<Vec<ElectionSummary>, Error>;

    #[method(name = "electionCount")]
    async fn election_count(&self) -> Result<u64, Error>;

    #[method(name = "hasVoted")]
    async fn has_voted(&self, election_id: ElectionId, account: Address) -> Result<bool, Error>;

    #[method(name = "isRegistered")]
    async fn is_registered(&self, account: Address) -> Result<bool, Error>;

    /// Returns the admin, the registration policy and the ledger's progress
    #[method(name = "getInfo")]
    async fn get_info(&self) -> Result<LedgerInfo, Error>;

    /// Returns notifications recorded after `after_seq`, oldest first
    #[method(name = "getEvents")]
    async fn get_events(&self, after_seq: EventSeq, limit: usize)
        -> Result<Vec<EventRecord>, Error>;
}
