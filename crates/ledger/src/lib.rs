//! The election ledger: elections, candidates, voter registrations and the
//! rules that govern how they change.
//!
//! [`LedgerEngine`] is the only way in. It serializes every state change
//! behind a single writer lock, records a notification for each one, and
//! answers queries with owned snapshots.

pub mod clock;
pub mod election;
pub mod engine;
pub mod result;
mod state;

pub use crate::{clock::*, election::*, engine::*, result::*};
