use std::net::SocketAddr;

use ledger_config::{ConfigOverrides, LedgerConfig, RegistrationPolicy};
use node::Node;
use primitives::Address;
use telemetry::info;

use crate::result::{CliError, Result};

#[derive(clap::Parser, Debug, Clone, Default)]
pub struct RunOpts {
    /// Shows debugging config information
    #[clap(long, action, default_value = "false")]
    pub debug_config: bool,

    /// Account allowed to close elections
    #[clap(long, value_parser)]
    pub admin: Option<Address>,

    /// Whether voters must register a credential first (required|optional)
    #[clap(long, value_parser)]
    pub registration: Option<RegistrationPolicy>,

    #[clap(long, value_parser)]
    pub jsonrpc_api_address: Option<SocketAddr>,

    /// Capacity of the live notification channel
    #[clap(long, value_parser)]
    pub event_buffer: Option<usize>,

    /// Most notifications returned by a single events request
    #[clap(long, value_parser)]
    pub max_events_per_page: Option<usize>,
}

impl RunOpts {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            admin: self.admin,
            registration: self.registration,
            jsonrpc_server_address: self.jsonrpc_api_address,
            event_buffer: self.event_buffer,
            max_events_per_page: self.max_events_per_page,
        }
    }
}

#[telemetry::instrument(skip_all)]
pub async fn run(node_config: LedgerConfig) -> Result<()> {
    let ledger_node = Node::start(node_config)
        .await
        .map_err(|err| CliError::Other(err.to_string()))?;

    info!(
        "ledger node serving JSON-RPC at {} with {} registration",
        ledger_node.jsonrpc_server_address(),
        ledger_node.config().registration
    );

    tokio::signal::ctrl_c()
        .await
        .map_err(|err| CliError::Other(format!("failed to listen for ctrl+c: {err}")))?;

    ledger_node.stop().await?;

    info!("Node stopped");

    Ok(())
}
