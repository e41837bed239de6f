mod run;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use ledger_config::load_config_with_overrides;
pub use run::*;

use crate::{commands::utils::print_json, result::Result};

#[derive(Debug, Subcommand)]
pub enum NodeCmd {
    /// Run a node with the provided configuration
    Run(RunOpts),

    /// Prints the configuration a node would start with
    Info(RunOpts),
}

#[derive(Parser, Debug)]
pub struct NodeOpts {
    #[clap(subcommand)]
    pub subcommand: NodeCmd,
}

pub async fn exec(args: NodeOpts, config_path: Option<PathBuf>) -> Result<()> {
    match args.subcommand {
        NodeCmd::Run(opts) => {
            let node_config = load_config_with_overrides(config_path.as_deref(), &opts.overrides())?;

            if opts.debug_config {
                dbg!(&node_config);
            }

            run(node_config).await
        },
        NodeCmd::Info(opts) => {
            let node_config = load_config_with_overrides(config_path.as_deref(), &opts.overrides())?;

            print_json(&node_config)
        },
    }
}
