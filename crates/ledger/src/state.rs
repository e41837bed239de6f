use std::collections::{HashMap, HashSet};

use events::{CloseReason, Event, EventLog, EventPublisher, EventRecord};
use primitives::{Address, Credential, ElectionId, Timestamp};
use telemetry::info;

use crate::{election::Election, LedgerError, Result};

/// Everything the ledger owns. Only ever touched through the engine's lock.
#[derive(Debug)]
pub(crate) struct LedgerState {
    /// Indexed by `election id - 1`
    pub elections: Vec<Election>,
    pub registrations: HashMap<Credential, Address>,
    pub registered_accounts: HashSet<Address>,
    pub event_log: EventLog,
    events_tx: EventPublisher,
}

impl LedgerState {
    pub fn new(events_tx: EventPublisher) -> Self {
        Self {
            elections: Vec::new(),
            registrations: HashMap::new(),
            registered_accounts: HashSet::new(),
            event_log: EventLog::new(),
            events_tx,
        }
    }

    pub fn next_election_id(&self) -> ElectionId {
        self.elections.len() as ElectionId + 1
    }

    pub fn election(&self, election_id: ElectionId) -> Result<&Election> {
        election_id
            .checked_sub(1)
            .and_then(|idx| usize::try_from(idx).ok())
            .and_then(|idx| self.elections.get(idx))
            .ok_or_else(|| LedgerError::election_not_found(election_id))
    }

    pub fn election_mut(&mut self, election_id: ElectionId) -> Result<&mut Election> {
        election_id
            .checked_sub(1)
            .and_then(|idx| usize::try_from(idx).ok())
            .and_then(|idx| self.elections.get_mut(idx))
            .ok_or_else(|| LedgerError::election_not_found(election_id))
    }

    /// True if any stored election is still flagged active past its deadline.
    pub fn any_needs_auto_close(&self, now: Timestamp) -> bool {
        self.elections.iter().any(|e| e.needs_auto_close(now))
    }

    /// Appends `event` to the history and forwards it to live subscribers.
    pub fn emit(&mut self, now: Timestamp, event: Event) -> EventRecord {
        let record = self.event_log.append(now, event);

        // NOTE: no live subscribers is not an error, the log keeps the record
        let _ = self.events_tx.send(record.clone());

        record
    }

    /// Flips an expired election inactive and records why. Returns whether a
    /// close actually happened.
    pub fn auto_close(&mut self, election_id: ElectionId, now: Timestamp) -> Result<bool> {
        let election = self.election_mut(election_id)?;

        if !election.needs_auto_close(now) {
            return Ok(false);
        }

        election.is_active = false;
        let deadline = election.deadline;

        self.emit(
            now,
            Event::ElectionClosed {
                id: election_id,
                reason: CloseReason::DeadlineExpired,
            },
        );

        info!(election_id, deadline, now, "election closed after its deadline");

        Ok(true)
    }

    /// Closes every election whose deadline has passed, in id order.
    pub fn auto_close_all(&mut self, now: Timestamp) {
        let expired: Vec<ElectionId> = self
            .elections
            .iter()
            .filter(|e| e.needs_auto_close(now))
            .map(|e| e.id)
            .collect();

        for election_id in expired {
            // ids come straight from the store
            let _ = self.auto_close(election_id, now);
        }
    }

    pub fn is_registered(&self, account: &Address) -> bool {
        self.registered_accounts.contains(account)
    }
}
