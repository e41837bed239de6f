use std::net::SocketAddr;

use derive_builder::Builder;
use primitives::{
    Address, DEFAULT_EVENT_BUFFER, DEFAULT_JSONRPC_ADDRESS, DEFAULT_MAX_EVENTS_PER_PAGE,
};
use serde::{Deserialize, Serialize};

use crate::RegistrationPolicy;

#[derive(Builder, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// The single account allowed to force-close elections
    pub admin: Address,

    /// Whether voters must hold a registered credential
    #[builder(default)]
    #[serde(default)]
    pub registration: RegistrationPolicy,

    /// Address the node listens for JSON-RPC connections
    #[builder(default = "default_jsonrpc_server_address()")]
    #[serde(default = "default_jsonrpc_server_address")]
    pub jsonrpc_server_address: SocketAddr,

    /// Capacity of the broadcast channel that feeds live event subscribers
    #[builder(default = "DEFAULT_EVENT_BUFFER")]
    #[serde(default = "default_event_buffer")]
    pub event_buffer: usize,

    /// Upper bound on the number of records a single events page returns
    #[builder(default = "DEFAULT_MAX_EVENTS_PER_PAGE")]
    #[serde(default = "default_max_events_per_page")]
    pub max_events_per_page: usize,
}

impl LedgerConfig {
    pub fn new(admin: Address) -> Self {
        Self {
            admin,
            registration: RegistrationPolicy::default(),
            jsonrpc_server_address: default_jsonrpc_server_address(),
            event_buffer: DEFAULT_EVENT_BUFFER,
            max_events_per_page: DEFAULT_MAX_EVENTS_PER_PAGE,
        }
    }
}

pub fn default_jsonrpc_server_address() -> SocketAddr {
    // NOTE: constant is a valid socket address literal
    DEFAULT_JSONRPC_ADDRESS
        .parse()
        .unwrap_or_else(|_| SocketAddr::from(([127, 0, 0, 1], 9293)))
}

fn default_event_buffer() -> usize {
    DEFAULT_EVENT_BUFFER
}

fn default_max_events_per_page() -> usize {
    DEFAULT_MAX_EVENTS_PER_PAGE
}
