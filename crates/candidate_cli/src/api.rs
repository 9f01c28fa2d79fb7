//! Command-level API over the candidate service.
//!
//! # Responsibility
//! - Wire config, storage and peer clients into one `CandidateService`.
//! - Translate service results into JSON bodies and status codes.
//!
//! # Invariants
//! - Domain failures never panic; they become a `Failure` envelope.
//! - Status codes come from `ErrorKind::status_code`, nothing else.

use candidate_core::db::open_db;
use candidate_core::{
    init_logging_from_config, AppConfig, CandidateId, CandidateInput, CandidateRepository,
    CandidateService, CandidateServiceError, ElectionLookup, ErrorKind, HttpElectionClient,
    HttpPartyClient, PartyLookup, SqliteCandidateRepository,
};
use log::info;
use serde::Serialize;
use serde_json::Value;

/// One candidate command, decoupled from argument parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    List,
    Get(Option<CandidateId>),
    Create(CandidateInput),
    Update(Option<CandidateId>, CandidateInput),
    Delete(Option<CandidateId>),
}

/// Error envelope written to stderr.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub status: u16,
    pub message: String,
}

impl Failure {
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: ErrorKind::Internal.status_code(),
            message: message.into(),
        }
    }

    /// Process exit code for this failure.
    pub fn exit_code(&self) -> u8 {
        match self.status {
            400 => 2,
            404 => 3,
            422 => 4,
            502 => 5,
            _ => 1,
        }
    }
}

impl From<CandidateServiceError> for Failure {
    fn from(value: CandidateServiceError) -> Self {
        Self {
            status: value.kind().status_code(),
            message: value.to_string(),
        }
    }
}

/// Runs one request against the configured store and peer services.
pub fn execute(config: &AppConfig, request: Request) -> Result<Value, Failure> {
    init_logging_from_config(&config.logging).map_err(Failure::internal)?;

    let conn =
        open_db(&config.database.path).map_err(|err| Failure::internal(err.to_string()))?;

    let parties = HttpPartyClient::new(&config.party_service)
        .map_err(|err| Failure::internal(err.to_string()))?;
    let elections = HttpElectionClient::new(&config.election_service)
        .map_err(|err| Failure::internal(err.to_string()))?;

    let service = CandidateService::new(SqliteCandidateRepository::new(&conn), parties, elections);
    info!(
        "event=cli_request module=cli status=start request={}",
        request_name(&request)
    );
    dispatch(&service, request)
}

/// Executes a request on an already-wired service.
pub fn dispatch<R, P, E>(
    service: &CandidateService<R, P, E>,
    request: Request,
) -> Result<Value, Failure>
where
    R: CandidateRepository,
    P: PartyLookup,
    E: ElectionLookup,
{
    match request {
        Request::List => to_json(service.list_candidates()?),
        Request::Get(id) => to_json(service.get_candidate(id)?),
        Request::Create(input) => to_json(service.create_candidate(&input)?),
        Request::Update(id, input) => to_json(service.update_candidate(id, &input)?),
        Request::Delete(id) => to_json(service.delete_candidate(id)?),
    }
}

fn to_json<T: Serialize>(value: T) -> Result<Value, Failure> {
    serde_json::to_value(value).map_err(|err| Failure::internal(err.to_string()))
}

fn request_name(request: &Request) -> &'static str {
    match request {
        Request::List => "list",
        Request::Get(_) => "get",
        Request::Create(_) => "create",
        Request::Update(..) => "update",
        Request::Delete(_) => "delete",
    }
}
