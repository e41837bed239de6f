use tokio::sync::broadcast::{Receiver, Sender};

pub use crate::{event::*, log::*};

mod event;
mod log;

pub const DEFAULT_BUFFER: usize = primitives::DEFAULT_EVENT_BUFFER;

pub type EventPublisher = Sender<EventRecord>;
pub type EventSubscriber = Receiver<EventRecord>;

/// Creates the channel live subscribers use to follow ledger notifications.
pub fn event_channel(capacity: usize) -> (EventPublisher, EventSubscriber) {
    tokio::sync::broadcast::channel(capacity.max(1))
}
