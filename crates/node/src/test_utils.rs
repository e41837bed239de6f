use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use ledger_config::{LedgerConfig, LedgerConfigBuilder, RegistrationPolicy};
use primitives::{mock_address, Address};

pub fn mock_admin() -> Address {
    mock_address(b"admin")
}

/// Config for a node bound to an ephemeral local port.
pub fn create_mock_ledger_config() -> LedgerConfig {
    let jsonrpc_server_address = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)), 0);

    LedgerConfigBuilder::default()
        .admin(mock_admin())
        .registration(RegistrationPolicy::Required)
        .jsonrpc_server_address(jsonrpc_server_address)
        .event_buffer(64)
        .max_events_per_page(50)
        .build()
        .expect("failed to build mock ledger config")
}
