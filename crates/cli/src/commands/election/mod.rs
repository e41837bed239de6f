use clap::{Parser, Subcommand};
use ledger_rpc::rpc::api::LedgerApiClient;
use primitives::{Address, CandidateId, ElectionId, Timestamp};
use serde_json::json;
use telemetry::info;

use crate::{
    commands::utils::{deadline_from_duration, print_json, unix_now, CallerOpts, ClientOpts},
    result::{CliError, Result},
};

#[derive(Parser, Debug)]
pub struct ElectionOpts {
    #[clap(flatten)]
    pub client: ClientOpts,

    #[clap(subcommand)]
    pub subcommand: ElectionCmd,
}

#[derive(Debug, Subcommand)]
pub enum ElectionCmd {
    /// Create a new election
    Create(CreateOpts),

    /// Add a candidate to an open election
    AddCandidate(AddCandidateOpts),

    /// Cast a vote
    Vote(VoteOpts),

    /// Close an election before its deadline (admin only)
    Close(CloseOpts),

    /// Print every candidate with its vote count
    Results(ElectionRefOpts),

    /// Print whether an election is open and how long it has left
    Status(ElectionRefOpts),

    /// Print a single candidate
    Candidate(CandidateRefOpts),

    /// Print an election's summary
    Get(ElectionIdOpts),

    /// List every election
    List,

    /// Print whether an account voted in an election
    HasVoted(HasVotedOpts),
}

#[derive(Parser, Debug)]
pub struct CreateOpts {
    #[clap(flatten)]
    pub caller: CallerOpts,

    #[clap(long, value_parser)]
    pub name: String,

    /// Absolute deadline in seconds since the Unix epoch
    #[clap(
        long,
        value_parser,
        conflicts_with = "duration-minutes",
        required_unless_present = "duration-minutes"
    )]
    pub deadline: Option<Timestamp>,

    /// Deadline relative to now
    #[clap(long, value_parser)]
    pub duration_minutes: Option<u64>,
}

impl CreateOpts {
    fn resolve_deadline(&self, now: Timestamp) -> Result<Timestamp> {
        match (self.deadline, self.duration_minutes) {
            (Some(deadline), _) => Ok(deadline),
            (None, Some(minutes)) => deadline_from_duration(now, minutes),
            (None, None) => Err(CliError::OptsError(
                "either --deadline or --duration-minutes is required".into(),
            )),
        }
    }
}

#[derive(Parser, Debug)]
pub struct AddCandidateOpts {
    #[clap(flatten)]
    pub caller: CallerOpts,

    #[clap(long, value_parser)]
    pub election_id: ElectionId,

    #[clap(long, value_parser)]
    pub name: String,
}

#[derive(Parser, Debug)]
pub struct VoteOpts {
    #[clap(flatten)]
    pub caller: CallerOpts,

    #[clap(long, value_parser)]
    pub election_id: ElectionId,

    #[clap(long, value_parser)]
    pub candidate_id: CandidateId,
}

#[derive(Parser, Debug)]
pub struct CloseOpts {
    #[clap(flatten)]
    pub caller: CallerOpts,

    #[clap(long, value_parser)]
    pub election_id: ElectionId,
}

#[derive(Parser, Debug)]
pub struct ElectionRefOpts {
    #[clap(flatten)]
    pub caller: CallerOpts,

    #[clap(long, value_parser)]
    pub election_id: ElectionId,
}

#[derive(Parser, Debug)]
pub struct ElectionIdOpts {
    #[clap(long, value_parser)]
    pub election_id: ElectionId,
}

#[derive(Parser, Debug)]
pub struct CandidateRefOpts {
    #[clap(long, value_parser)]
    pub election_id: ElectionId,

    #[clap(long, value_parser)]
    pub candidate_id: CandidateId,
}

#[derive(Parser, Debug)]
pub struct HasVotedOpts {
    #[clap(long, value_parser)]
    pub election_id: ElectionId,

    #[clap(long, value_parser)]
    pub account: Address,
}

pub async fn exec(args: ElectionOpts) -> Result<()> {
    let client = args.client.connect().await?;

    match args.subcommand {
        ElectionCmd::Create(opts) => {
            let deadline = opts.resolve_deadline(unix_now())?;
            let receipt = client
                .create_election(opts.caller.caller, opts.name, deadline)
                .await?;

            info!("created election {} closing at {deadline}", receipt.id);

            print_json(&receipt)
        },
        ElectionCmd::AddCandidate(opts) => {
            let receipt = client
                .add_candidate(opts.caller.caller, opts.election_id, opts.name)
                .await?;

            print_json(&receipt)
        },
        ElectionCmd::Vote(opts) => {
            client
                .vote(opts.caller.caller, opts.election_id, opts.candidate_id)
                .await?;

            print_json(&json!({
                "electionId": opts.election_id,
                "candidateId": opts.candidate_id,
                "voted": true,
            }))
        },
        ElectionCmd::Close(opts) => {
            client
                .close_election(opts.caller.caller, opts.election_id)
                .await?;

            print_json(&json!({ "id": opts.election_id, "isActive": false }))
        },
        ElectionCmd::Results(opts) => {
            let results = client
                .get_results(opts.caller.caller, opts.election_id)
                .await?;

            print_json(&results)
        },
        ElectionCmd::Status(opts) => {
            let status = client
                .get_election_status(opts.caller.caller, opts.election_id)
                .await?;

            print_json(&status)
        },
        ElectionCmd::Candidate(opts) => {
            let candidate = client
                .get_candidate(opts.election_id, opts.candidate_id)
                .await?;

            print_json(&candidate)
        },
        ElectionCmd::Get(opts) => print_json(&client.get_election(opts.election_id).await?),
        ElectionCmd::List => print_json(&client.list_elections().await?),
        ElectionCmd::HasVoted(opts) => {
            let has_voted = client.has_voted(opts.election_id, opts.account).await?;

            print_json(&json!({ "hasVoted": has_voted }))
        },
    }
}
