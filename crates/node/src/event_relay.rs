use events::{EventRecord, EventSubscriber};
use telemetry::{info, warn};
use tokio::sync::{broadcast::error::RecvError, oneshot};

/// Follows the ledger's live notifications and logs each of them until told
/// to stop or until the ledger goes away. Returns how many records it saw.
pub async fn relay_events(mut events_rx: EventSubscriber, mut stop_rx: oneshot::Receiver<()>) -> u64 {
    let mut relayed = 0;

    loop {
        tokio::select! {
            _ = &mut stop_rx => {
                info!("event relay received stop signal");
                break;
            },
            received = events_rx.recv() => match received {
                Ok(record) => {
                    log_record(&record);
                    relayed += 1;
                },
                Err(RecvError::Lagged(skipped)) => {
                    warn!("event relay lagged behind, {skipped} notifications skipped");
                },
                Err(RecvError::Closed) => break,
            },
        }
    }

    relayed
}

fn log_record(record: &EventRecord) {
    info!(
        seq = record.seq,
        timestamp = record.timestamp,
        election_id = ?record.event.election_id(),
        "{}",
        record.event
    );
}
