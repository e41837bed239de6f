use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::{
    election::ElectionOpts,
    events::EventsOpts,
    keygen::KeygenCmd,
    node::NodeOpts,
    voter::VoterOpts,
};

#[derive(Parser, Debug)]
#[clap(name = "ballot", author, version, about, long_about = None, arg_required_else_help(true))]
pub struct Args {
    /// Sets a custom config file
    #[clap(short, long, value_parser, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run and control ledger nodes
    Node(Box<NodeOpts>),

    /// Create, vote in and inspect elections
    Election(ElectionOpts),

    /// Register voters and check their registration
    Voter(VoterOpts),

    /// Read the ledger's notification history
    Events(EventsOpts),

    /// Generate a new account
    Keygen(KeygenCmd),
}
