use clap::Parser;
use primitives::{generate_account_keypair, generate_mock_account_keypair, Address};
use serde_json::json;
use telemetry::info;

use crate::{commands::utils::print_json, result::Result};

#[derive(Debug, Parser)]
pub struct KeygenCmd {
    /// Derive the keypair from a seed instead of the OS RNG. For local
    /// testing only.
    #[clap(long, value_parser)]
    seed: Option<String>,
}

pub fn exec(args: KeygenCmd) -> Result<()> {
    let (_, public_key) = match &args.seed {
        Some(seed) => {
            info!("Deriving keypair from seed");
            generate_mock_account_keypair(seed.as_bytes())
        },
        None => generate_account_keypair(),
    };

    let address = Address::new(public_key);

    print_json(&json!({
        "address": address,
        "publicKey": public_key.to_string(),
    }))
}
