use std::net::SocketAddr;

use jsonrpsee::core::client::Client;
use ledger_rpc::rpc::client::create_client;
use primitives::{Address, Timestamp, DEFAULT_JSONRPC_ADDRESS, SECONDS_PER_MINUTE};
use serde::Serialize;

use crate::result::{CliError, Result};

/// Where to reach a running node.
#[derive(clap::Parser, Debug, Clone)]
pub struct ClientOpts {
    /// JSON-RPC address of the node
    #[clap(long, value_parser, default_value = DEFAULT_JSONRPC_ADDRESS)]
    pub rpc_address: SocketAddr,
}

impl ClientOpts {
    pub async fn connect(&self) -> Result<Client> {
        Ok(create_client(self.rpc_address).await?)
    }
}

/// Account the request is made on behalf of.
#[derive(clap::Parser, Debug, Clone)]
pub struct CallerOpts {
    /// Account id of the caller, e.g. one printed by `ballot keygen`
    #[clap(long = "from", value_parser, value_name = "ADDRESS")]
    pub caller: Address,
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Absolute deadline `minutes` from `now`.
pub fn deadline_from_duration(now: Timestamp, minutes: u64) -> Result<Timestamp> {
    minutes
        .checked_mul(SECONDS_PER_MINUTE)
        .and_then(|seconds| now.checked_add(seconds))
        .ok_or_else(|| CliError::OptsError(format!("duration of {minutes} minutes is too long")))
}

pub fn unix_now() -> Timestamp {
    chrono::Utc::now().timestamp().max(0) as Timestamp
}
