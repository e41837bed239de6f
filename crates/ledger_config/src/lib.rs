mod loader;
pub mod ledger_config;
mod registration;

pub use crate::{ledger_config::*, loader::*, registration::*};
