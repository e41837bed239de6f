use std::{net::SocketAddr, path::Path};

use config::{Config, Environment, File};
use primitives::{
    Address, DEFAULT_EVENT_BUFFER, DEFAULT_JSONRPC_ADDRESS, DEFAULT_MAX_EVENTS_PER_PAGE,
};
use thiserror::Error;

use crate::{LedgerConfig, RegistrationPolicy};

pub const CONFIG_ENV_PREFIX: &str = "BALLOT";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unable to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("config file {0} does not exist")]
    MissingFile(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Values given explicitly on the command line. Set fields beat every other
/// source.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub admin: Option<Address>,
    pub registration: Option<RegistrationPolicy>,
    pub jsonrpc_server_address: Option<SocketAddr>,
    pub event_buffer: Option<usize>,
    pub max_events_per_page: Option<usize>,
}

/// Loads a [`LedgerConfig`] from built-in defaults, then the optional file at
/// `path`, then `BALLOT_*` environment variables, later sources winning.
pub fn load_config(path: Option<&Path>) -> Result<LedgerConfig> {
    load_config_with_overrides(path, &ConfigOverrides::default())
}

/// Same as [`load_config`] with `overrides` applied on top.
pub fn load_config_with_overrides(
    path: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<LedgerConfig> {
    let mut builder = Config::builder()
        .set_default("registration", "required")?
        .set_default("jsonrpc_server_address", DEFAULT_JSONRPC_ADDRESS)?
        .set_default("event_buffer", DEFAULT_EVENT_BUFFER as i64)?
        .set_default("max_events_per_page", DEFAULT_MAX_EVENTS_PER_PAGE as i64)?;

    if let Some(path) = path {
        if !path.exists() {
            return Err(ConfigError::MissingFile(path.display().to_string()));
        }

        builder = builder.add_source(File::from(path));
    }

    builder = builder.add_source(Environment::with_prefix(CONFIG_ENV_PREFIX).try_parsing(true));

    if let Some(admin) = overrides.admin {
        builder = builder.set_override("admin", admin.to_string())?;
    }
    if let Some(registration) = overrides.registration {
        builder = builder.set_override("registration", registration.to_string())?;
    }
    if let Some(address) = overrides.jsonrpc_server_address {
        builder = builder.set_override("jsonrpc_server_address", address.to_string())?;
    }
    if let Some(event_buffer) = overrides.event_buffer {
        builder = builder.set_override("event_buffer", event_buffer as i64)?;
    }
    if let Some(max_events_per_page) = overrides.max_events_per_page {
        builder = builder.set_override("max_events_per_page", max_events_per_page as i64)?;
    }

    let config = builder.build()?;

    Ok(config.try_deserialize()?)
}
