use std::{net::SocketAddr, sync::Arc};

use jsonrpsee::server::ServerHandle;
use ledger::LedgerEngine;
use ledger_config::LedgerConfig;
use ledger_rpc::rpc::{JsonRpcServer, JsonRpcServerConfig};
use telemetry::info;
use tokio::{sync::oneshot, task::JoinHandle};

use crate::{
    event_relay::relay_events,
    result::{NodeError, Result},
};

/// A running ledger: one engine, the JSON-RPC server in front of it and the
/// task relaying its notifications to the logs.
#[derive(Debug)]
pub struct Node {
    config: LedgerConfig,
    engine: Arc<LedgerEngine>,
    jsonrpc_server_handle: ServerHandle,
    jsonrpc_server_address: SocketAddr,
    event_relay_handle: JoinHandle<u64>,
    event_relay_stop_tx: oneshot::Sender<()>,
}

impl Node {
    /// Main node setup and execution entrypoint, called only by applications
    /// that intend to serve a ledger
    #[telemetry::instrument(skip_all)]
    pub async fn start(config: LedgerConfig) -> Result<Self> {
        let engine = Arc::new(LedgerEngine::new(&config));
        Self::start_with_engine(config, engine).await
    }

    /// Serves an already built engine, e.g. one driven by a mock clock.
    pub async fn start_with_engine(config: LedgerConfig, engine: Arc<LedgerEngine>) -> Result<Self> {
        info!(
            admin = %config.admin,
            registration = %config.registration,
            "starting ledger node"
        );

        let events_rx = engine.subscribe();
        let (event_relay_stop_tx, event_relay_stop_rx) = oneshot::channel();
        let event_relay_handle = tokio::spawn(relay_events(events_rx, event_relay_stop_rx));

        let jsonrpc_server_config = JsonRpcServerConfig {
            address: config.jsonrpc_server_address,
            engine: engine.clone(),
        };

        let (jsonrpc_server_handle, jsonrpc_server_address) =
            JsonRpcServer::run(&jsonrpc_server_config)
                .await
                .map_err(|err| NodeError::Other(format!("unable to start JSON-RPC server: {err}")))?;

        info!("JSON-RPC server started at {jsonrpc_server_address}");

        Ok(Self {
            config,
            engine,
            jsonrpc_server_handle,
            jsonrpc_server_address,
            event_relay_handle,
            event_relay_stop_tx,
        })
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn engine(&self) -> Arc<LedgerEngine> {
        self.engine.clone()
    }

    /// Address the JSON-RPC server actually bound to
    pub fn jsonrpc_server_address(&self) -> SocketAddr {
        self.jsonrpc_server_address
    }

    /// Shuts the JSON-RPC server down and stops the event relay. Returns true
    /// once both have finished.
    pub async fn stop(self) -> Result<bool> {
        info!("stopping ledger node");

        self.jsonrpc_server_handle
            .stop()
            .map_err(|err| NodeError::Other(format!("JSON-RPC server already stopped: {err}")))?;
        self.jsonrpc_server_handle.stopped().await;

        // the relay may have exited on its own already
        let _ = self.event_relay_stop_tx.send(());
        let relayed = self.event_relay_handle.await?;

        info!("node shutdown complete, {relayed} notifications relayed");

        Ok(true)
    }
}
