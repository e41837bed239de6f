use std::sync::Arc;

use async_trait::async_trait;
use events::EventRecord;
use jsonrpsee::core::Error;
use ledger::{CandidateResult, ElectionStatus, ElectionSummary, LedgerEngine, LedgerInfo};
use primitives::{Address, CandidateId, ElectionId, EventSeq, Timestamp};
use telemetry::debug;

use crate::{
    into_rpc_error,
    rpc::api::{CandidateReceipt, ElectionReceipt, LedgerApiServer},
};

#[derive(Debug, Clone)]
pub struct RpcServerImpl {
    pub engine: Arc<LedgerEngine>,
}

#[async_trait]
impl LedgerApiServer for RpcServerImpl {
    async fn create_election(
        &self,
        caller: Address,
        name: String,
        deadline: Timestamp,
    ) -> Result<ElectionReceipt, Error> {
        debug!("Received a createElection RPC request from {caller}");

        let id = self
            .engine
            .create_election(caller, &name, deadline)
            .map_err(into_rpc_error)?;

        Ok(ElectionReceipt { id })
    }

    async fn add_candidate(
        &self,
        caller: Address,
        election_id: ElectionId,
        name: String,
    ) -> Result<CandidateReceipt, Error> {
        debug!("Received an addCandidate RPC request from {caller}");

        let id = self
            .engine
            .add_candidate(caller, election_id, &name)
            .map_err(into_rpc_error)?;

        Ok(CandidateReceipt { id })
    }

    async fn register_voter(&self, caller: Address, credential: String) -> Result<(), Error> {
        debug!("Received a registerVoter RPC request from {caller}");

        self.engine
            .register_voter(caller, &credential)
            .map_err(into_rpc_error)
    }

    async fn vote(
        &self,
        caller: Address,
        election_id: ElectionId,
        candidate_id: CandidateId,
    ) -> Result<(), Error> {
        debug!("Received a vote RPC request from {caller}");

        self.engine
            .vote(caller, election_id, candidate_id)
            .map_err(into_rpc_error)
    }

    async fn close_election(&self, caller: Address, election_id: ElectionId) -> Result<(), Error> {
        debug!("Received a closeElection RPC request from {caller}");

        self.engine
            .close_election(caller, election_id)
            .map_err(into_rpc_error)
    }

    async fn get_results(
        &self,
        caller: Address,
        election_id: ElectionId,
    ) -> Result<Vec<CandidateResult>, Error> {
        debug!("Received a getResults RPC request from {caller}");

        self.engine
            .get_results(caller, election_id)
            .map_err(into_rpc_error)
    }

    async fn get_election_status(
        &self,
        caller: Address,
        election_id: ElectionId,
    ) -> Result<ElectionStatus, Error> {
        debug!("Received a getElectionStatus RPC request from {caller}");

        self.engine
            .get_election_status(caller, election_id)
            .map_err(into_rpc_error)
    }

    async fn get_candidate(
        &self,
        election_id: ElectionId,
        candidate_id: CandidateId,
    ) -> Result<CandidateResult, Error> {
        debug!("Received a getCandidate RPC request");

        self.engine
            .get_candidate(election_id, candidate_id)
            .map_err(into_rpc_error)
    }

    async fn get_election(&self, election_id: ElectionId) -> Result<ElectionSummary, Error> {
        debug!("Received a getElection RPC request");

        self.engine
            .get_election(election_id)
            .map_err(into_rpc_error)
    }

    async fn list_elections(&self) -> Result<Vec<ElectionSummary>, Error> {
        debug!("Received a listElections RPC request");

        Ok(self.engine.list_elections())
    }

    async fn election_count(&self) -> Result<u64, Error> {
        debug!("Received an electionCount RPC request");

        Ok(self.engine.election_count())
    }

    async fn has_voted(&self, election_id: ElectionId, account: Address) -> Result<bool, Error> {
        debug!("Received a hasVoted RPC request for {account}");

        self.engine
            .has_voted(election_id, &account)
            .map_err(into_rpc_error)
    }

    async fn is_registered(&self, account: Address) -> Result<bool, Error> {
        debug!("Received an isRegistered RPC request for {account}");

        Ok(self.engine.is_registered(&account))
    }

    async fn get_info(&self) -> Result<LedgerInfo, Error> {
        debug!("Received a getInfo RPC request");

        Ok(self.engine.info())
    }

    async fn get_events(&self, after_seq: EventSeq, limit: usize) -> Result<Vec<EventRecord>, Error> {
        debug!("Received a getEvents RPC request after {after_seq}");

        Ok(self.engine.events_since(after_seq, limit))
    }
}
