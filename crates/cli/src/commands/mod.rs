pub mod election;
pub mod events;
pub mod keygen;
pub mod node;
pub(crate) mod utils;
pub mod voter;

use crate::{
    cli::{Args, Commands},
    result::{CliError, Result},
};

pub async fn exec(args: Args) -> Result<()> {
    telemetry::debug!("args: {:?}", args);

    match args.command {
        Some(Commands::Node(node_args)) => node::exec(*node_args, args.config).await,
        Some(Commands::Election(election_args)) => election::exec(election_args).await,
        Some(Commands::Voter(voter_args)) => voter::exec(voter_args).await,
        Some(Commands::Events(events_args)) => events::exec(events_args).await,
        Some(Commands::Keygen(keygen_args)) => keygen::exec(keygen_args),
        None => Err(CliError::NoSubcommand),
    }
}
