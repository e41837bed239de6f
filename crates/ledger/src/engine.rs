use std::sync::Arc;

use events::{event_channel, CloseReason, Event, EventPublisher, EventRecord, EventSubscriber};
use ledger_config::{LedgerConfig, RegistrationPolicy};
use parking_lot::{RwLock, RwLockUpgradableReadGuard, RwLockWriteGuard};
use primitives::{Address, CandidateId, Credential, ElectionId, EventSeq, Timestamp};
use serde::{Deserialize, Serialize};
use telemetry::{debug, info};

use crate::{
    clock::{Clock, SystemClock},
    election::{CandidateResult, Election, ElectionStatus, ElectionSummary},
    state::LedgerState,
    LedgerError,
    Result,
};

/// Snapshot of the ledger's identity and progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerInfo {
    pub admin: Address,
    pub registration: RegistrationPolicy,
    pub election_count: u64,
    pub last_event_seq: EventSeq,
}

/// Owns every election, candidate and voter registration and enforces the
/// voting rules over them.
///
/// Mutations are serialized behind one writer lock, so each check and the
/// change it guards happen atomically. Reads share the lock and only upgrade
/// it when they find an election that has to be closed because its deadline
/// passed.
#[derive(Debug)]
pub struct LedgerEngine {
    admin: Address,
    registration: RegistrationPolicy,
    max_events_per_page: usize,
    clock: Arc<dyn Clock>,
    events_tx: EventPublisher,
    state: RwLock<LedgerState>,
}

impl LedgerEngine {
    pub fn new(config: &LedgerConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: &LedgerConfig, clock: Arc<dyn Clock>) -> Self {
        let (events_tx, _) = event_channel(config.event_buffer);

        info!(
            admin = %config.admin,
            registration = %config.registration,
            "ledger engine initialized"
        );

        Self {
            admin: config.admin,
            registration: config.registration,
            max_events_per_page: config.max_events_per_page.max(1),
            clock,
            events_tx: events_tx.clone(),
            state: RwLock::new(LedgerState::new(events_tx)),
        }
    }

    pub fn admin(&self) -> Address {
        self.admin
    }

    pub fn registration_policy(&self) -> RegistrationPolicy {
        self.registration
    }

    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    /// Live feed of every notification recorded from now on.
    pub fn subscribe(&self) -> EventSubscriber {
        self.events_tx.subscribe()
    }

    /// Stores a new active election and returns its id.
    pub fn create_election(
        &self,
        caller: Address,
        name: &str,
        deadline: Timestamp,
    ) -> Result<ElectionId> {
        let result = self.try_create_election(caller, name, deadline);
        log_rejection("create_election", caller, result)
    }

    fn try_create_election(
        &self,
        caller: Address,
        name: &str,
        deadline: Timestamp,
    ) -> Result<ElectionId> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LedgerError::InvalidArgument(
                "election name must not be empty".into(),
            ));
        }

        let mut state = self.state.write();
        let now = self.clock.now();

        if deadline <= now {
            return Err(LedgerError::InvalidArgument(format!(
                "deadline {deadline} is not in the future (now {now})"
            )));
        }

        let id = state.next_election_id();
        state
            .elections
            .push(Election::new(id, name.to_string(), deadline, now, caller));
        state.emit(now, Event::ElectionCreated { id });

        info!(election_id = id, election_name = name, deadline, %caller, "election created");

        Ok(id)
    }

    /// Appends a candidate to an open election and returns its id within
    /// that election.
    pub fn add_candidate(
        &self,
        caller: Address,
        election_id: ElectionId,
        name: &str,
    ) -> Result<CandidateId> {
        let result = self.try_add_candidate(election_id, name);
        log_rejection("add_candidate", caller, result)
    }

    fn try_add_candidate(&self, election_id: ElectionId, name: &str) -> Result<CandidateId> {
        let mut state = self.state.write();
        let now = self.clock.now();

        Self::ensure_open(&mut state, election_id, now)?;

        let name = name.trim();
        if name.is_empty() {
            return Err(LedgerError::InvalidArgument(
                "candidate name must not be empty".into(),
            ));
        }

        let id = state
            .election_mut(election_id)?
            .push_candidate(name.to_string());
        state.emit(now, Event::CandidateAdded { election_id, id });

        info!(election_id, candidate_id = id, candidate_name = name, "candidate added");

        Ok(id)
    }

    /// Binds `credential` to `caller`. A credential can only ever be bound
    /// once.
    pub fn register_voter(&self, caller: Address, credential: &str) -> Result<()> {
        let result = self.try_register_voter(caller, credential);
        log_rejection("register_voter", caller, result)
    }

    fn try_register_voter(&self, caller: Address, credential: &str) -> Result<()> {
        let credential: Credential = credential.trim().to_string();
        if credential.is_empty() {
            return Err(LedgerError::InvalidArgument(
                "credential must not be empty".into(),
            ));
        }

        let mut state = self.state.write();
        let now = self.clock.now();

        if state.registrations.contains_key(&credential) {
            return Err(LedgerError::Conflict(format!(
                "credential {credential} already registered"
            )));
        }

        state.registrations.insert(credential.clone(), caller);
        state.registered_accounts.insert(caller);
        state.emit(
            now,
            Event::VoterRegistered {
                credential,
                account: caller,
            },
        );

        info!(account = %caller, "voter registered");

        Ok(())
    }

    /// Records `caller`'s single vote for `candidate_id`.
    pub fn vote(
        &self,
        caller: Address,
        election_id: ElectionId,
        candidate_id: CandidateId,
    ) -> Result<()> {
        let result = self.try_vote(caller, election_id, candidate_id);
        log_rejection("vote", caller, result)
    }

    fn try_vote(
        &self,
        caller: Address,
        election_id: ElectionId,
        candidate_id: CandidateId,
    ) -> Result<()> {
        let mut state = self.state.write();
        let now = self.clock.now();

        Self::ensure_open(&mut state, election_id, now)?;

        let election = state.election(election_id)?;

        if election.candidate(candidate_id).is_none() {
            return Err(LedgerError::candidate_not_found(election_id, candidate_id));
        }

        if election.has_voted(&caller) {
            return Err(LedgerError::Conflict(format!(
                "{caller} already voted in election {election_id}"
            )));
        }

        if self.registration.is_required() && !state.is_registered(&caller) {
            return Err(LedgerError::Unauthorized(format!(
                "{caller} is not a registered voter"
            )));
        }

        let election = state.election_mut(election_id)?;
        if let Some(candidate) = election.candidate_mut(candidate_id) {
            candidate.vote_count += 1;
        }
        election.record_voter(caller);

        state.emit(
            now,
            Event::VoteCasted {
                election_id,
                candidate_id,
                account: caller,
            },
        );

        info!(election_id, candidate_id, account = %caller, "vote cast");

        Ok(())
    }

    /// Ends an election ahead of its deadline. Reserved to the admin.
    pub fn close_election(&self, caller: Address, election_id: ElectionId) -> Result<()> {
        let result = self.try_close_election(caller, election_id);
        log_rejection("close_election", caller, result)
    }

    fn try_close_election(&self, caller: Address, election_id: ElectionId) -> Result<()> {
        if caller != self.admin {
            return Err(LedgerError::Unauthorized(format!(
                "only the admin can close elections, {caller} is not the admin"
            )));
        }

        let mut state = self.state.write();
        let now = self.clock.now();

        state.election(election_id)?;
        state.auto_close(election_id, now)?;

        let election = state.election_mut(election_id)?;
        if !election.is_active {
            return Err(LedgerError::InvalidState(format!(
                "election {election_id} is not active"
            )));
        }

        election.is_active = false;
        state.emit(
            now,
            Event::ElectionClosed {
                id: election_id,
                reason: CloseReason::Admin,
            },
        );

        info!(election_id, "election closed by admin");

        Ok(())
    }

    /// Tally of every candidate in ascending id order.
    pub fn get_results(
        &self,
        caller: Address,
        election_id: ElectionId,
    ) -> Result<Vec<CandidateResult>> {
        debug!(election_id, %caller, "results requested");

        self.observe_election(election_id, |election, _| {
            election
                .candidates()
                .iter()
                .map(CandidateResult::from)
                .collect()
        })
    }

    pub fn get_election_status(
        &self,
        caller: Address,
        election_id: ElectionId,
    ) -> Result<ElectionStatus> {
        debug!(election_id, %caller, "status requested");

        self.observe_election(election_id, |election, now| ElectionStatus {
            is_active: election.is_active,
            deadline: election.deadline,
            time_left: election.time_left(now),
        })
    }

    pub fn get_candidate(
        &self,
        election_id: ElectionId,
        candidate_id: CandidateId,
    ) -> Result<CandidateResult> {
        let state = self.state.read();

        state
            .election(election_id)?
            .candidate(candidate_id)
            .map(CandidateResult::from)
            .ok_or_else(|| LedgerError::candidate_not_found(election_id, candidate_id))
    }

    pub fn get_election(&self, election_id: ElectionId) -> Result<ElectionSummary> {
        self.observe_election(election_id, |election, _| ElectionSummary::from(election))
    }

    /// Every election in id order, with expired ones closed first.
    pub fn list_elections(&self) -> Vec<ElectionSummary> {
        let now = self.clock.now();
        let state = self.state.upgradable_read();

        if state.any_needs_auto_close(now) {
            let mut state = RwLockUpgradableReadGuard::upgrade(state);
            state.auto_close_all(now);
            let state = RwLockWriteGuard::downgrade(state);

            return state.elections.iter().map(ElectionSummary::from).collect();
        }

        state.elections.iter().map(ElectionSummary::from).collect()
    }

    pub fn election_count(&self) -> u64 {
        self.state.read().elections.len() as u64
    }

    pub fn has_voted(&self, election_id: ElectionId, account: &Address) -> Result<bool> {
        let state = self.state.read();
        Ok(state.election(election_id)?.has_voted(account))
    }

    pub fn is_registered(&self, account: &Address) -> bool {
        self.state.read().is_registered(account)
    }

    /// Records with a sequence number greater than `after`, at most one page.
    pub fn events_since(&self, after: EventSeq, limit: usize) -> Vec<EventRecord> {
        let limit = limit.min(self.max_events_per_page);
        self.state.read().event_log.since(after, limit)
    }

    pub fn info(&self) -> LedgerInfo {
        let state = self.state.read();

        LedgerInfo {
            admin: self.admin,
            registration: self.registration,
            election_count: state.elections.len() as u64,
            last_event_seq: state.event_log.last_seq(),
        }
    }

    /// Fails unless the election exists and still accepts changes. An
    /// expired election is closed here and the close stays committed.
    fn ensure_open(state: &mut LedgerState, election_id: ElectionId, now: Timestamp) -> Result<()> {
        state.election(election_id)?;

        if state.auto_close(election_id, now)? || !state.election(election_id)?.is_active {
            return Err(LedgerError::election_ended(election_id));
        }

        Ok(())
    }

    /// Runs `view` over an election, closing it first if its deadline has
    /// passed.
    fn observe_election<T>(
        &self,
        election_id: ElectionId,
        view: impl FnOnce(&Election, Timestamp) -> T,
    ) -> Result<T> {
        let now = self.clock.now();
        let state = self.state.upgradable_read();

        if state.election(election_id)?.needs_auto_close(now) {
            let mut state = RwLockUpgradableReadGuard::upgrade(state);
            state.auto_close(election_id, now)?;
            let state = RwLockWriteGuard::downgrade(state);

            return Ok(view(state.election(election_id)?, now));
        }

        Ok(view(state.election(election_id)?, now))
    }
}

fn log_rejection<T>(operation: &str, caller: Address, result: Result<T>) -> Result<T> {
    if let Err(err) = &result {
        debug!(operation, %caller, kind = %err.kind(), "request rejected: {err}");
    }

    result
}

#[cfg(test)]
mod tests {
    use ledger_config::LedgerConfigBuilder;
    use primitives::mock_address;

    use super::*;
    use crate::{ErrorKind, MockClock};

    const START: Timestamp = 1_700_000_000;

    fn engine_with(registration: RegistrationPolicy) -> (LedgerEngine, MockClock, Address) {
        let admin = mock_address(b"0");
        let config = LedgerConfigBuilder::default()
            .admin(admin)
            .registration(registration)
            .build()
            .unwrap();

        let clock = MockClock::new(START);
        let engine = LedgerEngine::with_clock(&config, Arc::new(clock.clone()));

        (engine, clock, admin)
    }

    fn engine() -> (LedgerEngine, MockClock, Address) {
        engine_with(RegistrationPolicy::Required)
    }

    fn kind<T: std::fmt::Debug>(result: Result<T>) -> ErrorKind {
        result.unwrap_err().kind()
    }

    #[test]
    fn election_names_are_trimmed_and_required() {
        let (engine, _, admin) = engine();

        assert_eq!(
            kind(engine.create_election(admin, "   ", START + 10)),
            ErrorKind::InvalidArgument
        );

        let id = engine.create_election(admin, "  Board  ", START + 10).unwrap();
        assert_eq!(engine.get_election(id).unwrap().name, "Board");
    }

    #[test]
    fn deadline_equal_to_now_is_rejected() {
        let (engine, _, admin) = engine();

        assert_eq!(
            kind(engine.create_election(admin, "Board", START)),
            ErrorKind::InvalidArgument
        );
        assert_eq!(engine.create_election(admin, "Board", START + 1).unwrap(), 1);
    }

    #[test]
    fn add_candidate_checks_existence_then_state_then_name() {
        let (engine, clock, admin) = engine();

        assert_eq!(kind(engine.add_candidate(admin, 1, "")), ErrorKind::NotFound);

        engine.create_election(admin, "Board", START + 10).unwrap();
        assert_eq!(
            kind(engine.add_candidate(admin, 1, " ")),
            ErrorKind::InvalidArgument
        );

        clock.set(START + 10);
        assert_eq!(kind(engine.add_candidate(admin, 1, "")), ErrorKind::InvalidState);
    }

    #[test]
    fn empty_or_duplicate_credentials_are_rejected() {
        let (engine, _, _) = engine();
        let voter = mock_address(b"1");

        assert_eq!(
            kind(engine.register_voter(voter, "")),
            ErrorKind::InvalidArgument
        );

        engine.register_voter(voter, "35202-1234567-1").unwrap();
        assert!(engine.is_registered(&voter));

        assert_eq!(
            kind(engine.register_voter(mock_address(b"2"), "35202-1234567-1")),
            ErrorKind::Conflict
        );
        assert!(!engine.is_registered(&mock_address(b"2")));
    }

    #[test]
    fn accounts_may_hold_several_credentials() {
        let (engine, _, _) = engine();
        let voter = mock_address(b"1");

        engine.register_voter(voter, "cnic-1").unwrap();
        engine.register_voter(voter, "cnic-2").unwrap();

        assert!(engine.is_registered(&voter));
    }

    #[test]
    fn vote_checks_run_in_order() {
        let (engine, clock, admin) = engine();
        let voter = mock_address(b"1");

        assert_eq!(kind(engine.vote(voter, 1, 1)), ErrorKind::NotFound);

        engine.create_election(admin, "Board", START + 10).unwrap();
        assert_eq!(kind(engine.vote(voter, 1, 1)), ErrorKind::NotFound);

        engine.add_candidate(admin, 1, "Alice").unwrap();
        assert_eq!(kind(engine.vote(voter, 1, 1)), ErrorKind::Unauthorized);

        engine.register_voter(voter, "cnic-1").unwrap();
        engine.vote(voter, 1, 1).unwrap();
        assert_eq!(kind(engine.vote(voter, 1, 1)), ErrorKind::Conflict);

        clock.set(START + 10);
        assert_eq!(kind(engine.vote(voter, 1, 1)), ErrorKind::InvalidState);
    }

    #[test]
    fn optional_registration_lets_anyone_vote() {
        let (engine, _, admin) = engine_with(RegistrationPolicy::Optional);
        let voter = mock_address(b"7");

        engine.create_election(admin, "Board", START + 10).unwrap();
        engine.add_candidate(admin, 1, "Alice").unwrap();

        engine.vote(voter, 1, 1).unwrap();

        assert!(engine.has_voted(1, &voter).unwrap());
    }

    #[test]
    fn close_checks_admin_before_existence() {
        let (engine, _, admin) = engine();

        assert_eq!(
            kind(engine.close_election(mock_address(b"1"), 42)),
            ErrorKind::Unauthorized
        );
        assert_eq!(kind(engine.close_election(admin, 42)), ErrorKind::NotFound);
    }

    #[test]
    fn closing_twice_is_invalid_state() {
        let (engine, _, admin) = engine();
        engine.create_election(admin, "Board", START + 10).unwrap();

        engine.close_election(admin, 1).unwrap();

        assert_eq!(kind(engine.close_election(admin, 1)), ErrorKind::InvalidState);
    }

    #[test]
    fn status_reports_time_left_and_lazily_closes() {
        let (engine, clock, admin) = engine();
        engine.create_election(admin, "Board", START + 100).unwrap();

        clock.advance(40);
        let status = engine.get_election_status(admin, 1).unwrap();
        assert!(status.is_active);
        assert_eq!(status.time_left, 60);

        clock.advance(100);
        let status = engine.get_election_status(admin, 1).unwrap();
        assert!(!status.is_active);
        assert_eq!(status.time_left, 0);
        assert_eq!(status.deadline, START + 100);

        let closes: Vec<_> = engine
            .events_since(0, 100)
            .into_iter()
            .filter(|r| matches!(r.event, Event::ElectionClosed { .. }))
            .collect();
        assert_eq!(closes.len(), 1);
    }

    #[test]
    fn candidate_lookup() {
        let (engine, _, admin) = engine();
        engine.create_election(admin, "Board", START + 10).unwrap();
        engine.add_candidate(admin, 1, "Alice").unwrap();

        let alice = engine.get_candidate(1, 1).unwrap();
        assert_eq!(alice.name, "Alice");
        assert_eq!(alice.vote_count, 0);

        assert_eq!(kind(engine.get_candidate(1, 2)), ErrorKind::NotFound);
        assert_eq!(kind(engine.get_candidate(2, 1)), ErrorKind::NotFound);
    }

    #[test]
    fn list_elections_closes_expired_ones() {
        let (engine, clock, admin) = engine();
        engine.create_election(admin, "Short", START + 10).unwrap();
        engine.create_election(admin, "Long", START + 1000).unwrap();

        clock.advance(20);
        let listed = engine.list_elections();

        assert_eq!(listed.len(), 2);
        assert!(!listed[0].is_active);
        assert!(listed[1].is_active);
        assert_eq!(engine.election_count(), 2);
    }

    #[test]
    fn event_pages_are_capped() {
        let admin = mock_address(b"0");
        let config = LedgerConfigBuilder::default()
            .admin(admin)
            .max_events_per_page(2)
            .build()
            .unwrap();
        let engine = LedgerEngine::with_clock(&config, Arc::new(MockClock::new(START)));

        for _ in 0..5 {
            engine.create_election(admin, "Board", START + 10).unwrap();
        }

        let page = engine.events_since(0, 100);
        assert_eq!(page.iter().map(|r| r.seq).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(engine.info().last_event_seq, 5);
    }

    #[test]
    fn info_reports_admin_and_policy() {
        let (engine, _, admin) = engine_with(RegistrationPolicy::Optional);

        let info = engine.info();

        assert_eq!(info.admin, admin);
        assert_eq!(info.registration, RegistrationPolicy::Optional);
        assert_eq!(info.election_count, 0);
        assert_eq!(info.last_event_seq, 0);
    }
}
