use std::{net::SocketAddr, sync::Arc};

use jsonrpsee::server::{ServerBuilder, ServerHandle};
use ledger::LedgerEngine;
use telemetry::info;

use crate::rpc::{api::LedgerApiServer, server_impl::RpcServerImpl};

#[derive(Debug, Clone)]
pub struct JsonRpcServerConfig {
    pub address: SocketAddr,
    pub engine: Arc<LedgerEngine>,
}

#[derive(Debug)]
pub struct JsonRpcServer;

impl JsonRpcServer {
    /// Binds the server and starts serving in the background. The returned
    /// address is the one actually bound, which differs from the configured
    /// one when port 0 was requested.
    pub async fn run(config: &JsonRpcServerConfig) -> crate::Result<(ServerHandle, SocketAddr)> {
        let server = ServerBuilder::default().build(config.address).await?;

        let server_impl = RpcServerImpl {
            engine: config.engine.clone(),
        };

        let addr = server.local_addr()?;
        let handle = server.start(server_impl.into_rpc())?;

        info!("JSON-RPC server listening on {addr}");

        Ok((handle, addr))
    }
}
