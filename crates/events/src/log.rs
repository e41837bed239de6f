use primitives::{EventSeq, Timestamp};

use crate::{Event, EventRecord};

/// Append-only history of ledger notifications.
///
/// Sequence numbers start at 1 and never skip, so `records[seq - 1]` is the
/// record with sequence number `seq`.
#[derive(Debug, Default, Clone)]
pub struct EventLog {
    records: Vec<EventRecord>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, timestamp: Timestamp, event: Event) -> EventRecord {
        let record = EventRecord {
            seq: self.last_seq() + 1,
            timestamp,
            event,
        };

        self.records.push(record.clone());

        record
    }

    /// Sequence number of the latest record, 0 when empty.
    pub fn last_seq(&self) -> EventSeq {
        self.records.len() as EventSeq
    }

    /// Up to `limit` records with a sequence number greater than `after`.
    pub fn since(&self, after: EventSeq, limit: usize) -> Vec<EventRecord> {
        let start = usize::try_from(after)
            .unwrap_or(usize::MAX)
            .min(self.records.len());

        self.records[start..].iter().take(limit).cloned().collect()
    }
}
