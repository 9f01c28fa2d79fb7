//! Command-line entry point for the candidate registry.
//!
//! Prints JSON bodies on success and a `{"status", "message"}` envelope on
//! stderr on failure, exiting with a code derived from the status.

mod api;

use api::{Failure, Request};
use candidate_core::{core_version, AppConfig, CandidateId, CandidateInput};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "candidate", version, about = "Manage election candidates")]
struct Cli {
    /// TOML config file; built-in defaults are used when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// SQLite database file, overriding `[database].path`.
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List every candidate with party and election summaries.
    List,
    /// Show one candidate.
    Get {
        #[arg(long)]
        id: Option<CandidateId>,
    },
    /// Register a new candidate.
    Create(CandidateArgs),
    /// Replace all fields of an existing candidate.
    Update {
        #[arg(long)]
        id: Option<CandidateId>,
        #[command(flatten)]
        fields: CandidateArgs,
    },
    /// Remove a candidate whose election has no votes.
    Delete {
        #[arg(long)]
        id: Option<CandidateId>,
    },
    /// Print the core crate version.
    Version,
}

// Every field stays optional so the service reports which one is missing.
#[derive(Debug, Args)]
struct CandidateArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    party_id: Option<i64>,
    #[arg(long)]
    election_id: Option<i64>,
    #[arg(long = "number")]
    number_election: Option<i64>,
}

impl From<CandidateArgs> for CandidateInput {
    fn from(value: CandidateArgs) -> Self {
        Self {
            name: value.name,
            party_id: value.party_id,
            election_id: value.election_id,
            number_election: value.number_election,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(body) => {
            println!("{body}");
            ExitCode::SUCCESS
        }
        Err(failure) => {
            let envelope = serde_json::to_string(&failure)
                .unwrap_or_else(|_| format!("{{\"status\":{}}}", failure.status));
            eprintln!("{envelope}");
            ExitCode::from(failure.exit_code())
        }
    }
}

fn run(cli: Cli) -> Result<String, Failure> {
    let request = match cli.command {
        Command::Version => return Ok(format!("candidate_core version={}", core_version())),
        Command::List => Request::List,
        Command::Get { id } => Request::Get(id),
        Command::Create(fields) => Request::Create(fields.into()),
        Command::Update { id, fields } => Request::Update(id, fields.into()),
        Command::Delete { id } => Request::Delete(id),
    };

    let mut config = match cli.config.as_ref() {
        Some(path) => {
            AppConfig::load(path).map_err(|err| Failure::internal(err.to_string()))?
        }
        None => AppConfig::default(),
    };
    if let Some(db) = cli.db {
        config.database.path = db;
    }

    let body = api::execute(&config, request)?;
    Ok(body.to_string())
}
