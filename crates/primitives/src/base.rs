/// Sequential, 1-based identifier of an election.
pub type ElectionId = u64;

/// Sequential, 1-based identifier of a candidate, scoped to its election.
pub type CandidateId = u64;

/// Seconds since the Unix epoch.
pub type Timestamp = u64;

/// Sequence number of a ledger notification.
pub type EventSeq = u64;

/// National identity credential (CNIC) used to deduplicate voter
/// registrations.
pub type Credential = String;

pub const SECONDS_PER_MINUTE: u64 = 60;
pub const DEFAULT_JSONRPC_ADDRESS: &str = "127.0.0.1:9293";
pub const DEFAULT_EVENT_BUFFER: usize = 1000;
pub const DEFAULT_MAX_EVENTS_PER_PAGE: usize = 100;
