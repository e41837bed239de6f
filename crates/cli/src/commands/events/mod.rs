use std::time::Duration;

use clap::Parser;
use events::EventRecord;
use jsonrpsee::core::client::Client;
use ledger_rpc::rpc::api::LedgerApiClient;
use primitives::{EventSeq, DEFAULT_MAX_EVENTS_PER_PAGE};

use crate::{
    commands::utils::{print_json, ClientOpts},
    result::Result,
};

#[derive(Parser, Debug)]
pub struct EventsOpts {
    #[clap(flatten)]
    pub client: ClientOpts,

    /// Only print notifications with a greater sequence number
    #[clap(long, value_parser, default_value = "0")]
    pub after: EventSeq,

    /// Page size requested from the node. The node may return fewer.
    #[clap(long, value_parser, default_value_t = DEFAULT_MAX_EVENTS_PER_PAGE)]
    pub limit: usize,

    /// Keep polling for new notifications
    #[clap(long, action, default_value = "false")]
    pub follow: bool,

    /// Seconds between polls when following
    #[clap(long, value_parser, default_value = "2")]
    pub interval: u64,
}

pub async fn exec(args: EventsOpts) -> Result<()> {
    let client = args.client.connect().await?;
    let mut after = args.after;

    loop {
        after = drain_events(&client, after, args.limit, |record| print_json(record)).await?;

        if !args.follow {
            return Ok(());
        }

        tokio::time::sleep(Duration::from_secs(args.interval.max(1))).await;
    }
}

/// Hands every record newer than `after` to `sink`, page by page, until the
/// node returns an empty page. Returns the last sequence number seen.
async fn drain_events<F>(
    client: &Client,
    mut after: EventSeq,
    limit: usize,
    mut sink: F,
) -> Result<EventSeq>
where
    F: FnMut(&EventRecord) -> Result<()>,
{
    loop {
        let records = client.get_events(after, limit).await?;

        match records.last() {
            Some(last) => after = last.seq,
            None => return Ok(after),
        }

        for record in &records {
            sink(record)?;
        }
    }
}
