use clap::{Parser, Subcommand};
use ledger_rpc::rpc::api::LedgerApiClient;
use primitives::Address;
use serde_json::json;

use crate::{
    commands::utils::{print_json, CallerOpts, ClientOpts},
    result::Result,
};

#[derive(Parser, Debug)]
pub struct VoterOpts {
    #[clap(flatten)]
    pub client: ClientOpts,

    #[clap(subcommand)]
    pub subcommand: VoterCmd,
}

#[derive(Debug, Subcommand)]
pub enum VoterCmd {
    /// Bind a national identity credential to an account
    Register(RegisterOpts),

    /// Print whether an account holds a registered credential
    Status(StatusOpts),
}

#[derive(Parser, Debug)]
pub struct RegisterOpts {
    #[clap(flatten)]
    pub caller: CallerOpts,

    /// Credential such as a CNIC number
    #[clap(long, value_parser)]
    pub credential: String,
}

#[derive(Parser, Debug)]
pub struct StatusOpts {
    #[clap(long, value_parser)]
    pub account: Address,
}

pub async fn exec(args: VoterOpts) -> Result<()> {
    let client = args.client.connect().await?;

    match args.subcommand {
        VoterCmd::Register(opts) => {
            client
                .register_voter(opts.caller.caller, opts.credential)
                .await?;

            print_json(&json!({ "account": opts.caller.caller, "registered": true }))
        },
        VoterCmd::Status(opts) => {
            let registered = client.is_registered(opts.account).await?;

            print_json(&json!({ "account": opts.account, "registered": registered }))
        },
    }
}
