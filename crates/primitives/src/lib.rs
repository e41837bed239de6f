pub mod address;
pub mod base;
pub mod environment;

pub use address::*;
pub use base::*;
pub use environment::*;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("invalid deployment {0} provided")]
    InvalidDeployment(String),

    #[error("invalid address {0}: {1}")]
    InvalidAddress(String, String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;
