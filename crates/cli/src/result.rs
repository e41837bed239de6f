use ledger::ErrorKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("no subcommand provided")]
    NoSubcommand,

    #[error("opts error: {0}")]
    OptsError(String),

    #[error("node error: {0}")]
    Node(#[from] node::result::NodeError),

    #[error("config error: {0}")]
    Config(#[from] ledger_config::ConfigError),

    #[error("api error: {0}")]
    Api(#[from] ledger_rpc::ApiError),

    #[error("request rejected ({kind}): {message}")]
    Rejected { kind: ErrorKind, message: String },

    #[error("rpc error: {0}")]
    Rpc(jsonrpsee::core::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl From<jsonrpsee::core::Error> for CliError {
    fn from(err: jsonrpsee::core::Error) -> Self {
        match ledger_rpc::error_kind(&err) {
            Some(kind) => CliError::Rejected {
                kind,
                message: rejection_message(&err),
            },
            None => CliError::Rpc(err),
        }
    }
}

fn rejection_message(err: &jsonrpsee::core::Error) -> String {
    use jsonrpsee::types::error::CallError;

    match err {
        jsonrpsee::core::Error::Call(CallError::Custom(object)) => object.message().to_string(),
        other => other.to_string(),
    }
}

pub type Result<T> = std::result::Result<T, CliError>;
