use ledger_rpc::ApiError;
use thiserror::Error;
use tokio::task::JoinError;

#[derive(Debug, Error)]
pub enum NodeError {
    #[error("{0}")]
    Api(#[from] ApiError),

    #[error("{0}")]
    Join(#[from] JoinError),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, NodeError>;
