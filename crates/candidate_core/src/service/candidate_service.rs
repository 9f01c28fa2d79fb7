//! Candidate use-case service.
//!
//! # Responsibility
//! - Validate candidate input against the Party and Election services.
//! - Enforce registration uniqueness and the election vote lock.
//! - Assemble enriched output from stored records and remote summaries.
//!
//! # Invariants
//! - Every mutating call writes to the repository at most once, and only
//!   after all checks have passed.
//! - Any lookup failure aborts the operation, including "not found".
//! - A candidate whose election has votes can be neither updated nor deleted.

use crate::client::{ElectionLookup, LookupError, PartyLookup};
use crate::model::candidate::{
    is_full_name, number_belongs_to_party, Candidate, CandidateId, CandidateInput,
    CandidateOutput, ElectionId, ElectionSummary, GenericOutput, NewCandidate, PartySummary,
};
use crate::repo::candidate_repo::{CandidateRepository, RepoError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub const MESSAGE_INVALID_ID: &str = "invalid id";
pub const MESSAGE_CANDIDATE_NOT_FOUND: &str = "candidate not found";
pub const MESSAGE_INVALID_NAME: &str = "invalid name";
pub const MESSAGE_INVALID_NUMBER_ELECTION: &str = "invalid number election";
pub const MESSAGE_INVALID_PARTY: &str = "invalid party";
pub const MESSAGE_NUMBER_NOT_IN_PARTY: &str = "number doesn't belong to party";
pub const MESSAGE_INVALID_ELECTION_ID: &str = "invalid election id";
pub const MESSAGE_INVALID_ELECTION: &str = "invalid election";
pub const MESSAGE_INVALID_PARTY_OR_ELECTION: &str = "invalid party or election";
pub const MESSAGE_DUPLICATE_CANDIDATE: &str = "duplicate candidate";
pub const MESSAGE_ELECTION_HAS_VOTES: &str = "this election already has votes";
pub const MESSAGE_CANDIDATE_DELETED: &str = "candidate deleted";

pub type ServiceResult<T> = Result<T, CandidateServiceError>;

/// Caller-facing failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    ValidationFailed,
    NotFound,
    UpstreamFailure,
    Internal,
}

impl ErrorKind {
    /// Transport status code the API layer reports for this kind.
    pub fn status_code(self) -> u16 {
        match self {
            Self::InvalidArgument => 400,
            Self::ValidationFailed => 422,
            Self::NotFound => 404,
            Self::UpstreamFailure => 502,
            Self::Internal => 500,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidArgument => "invalid_argument",
            Self::ValidationFailed => "validation_failed",
            Self::NotFound => "not_found",
            Self::UpstreamFailure => "upstream_failure",
            Self::Internal => "internal",
        }
    }
}

/// Service error for candidate use-cases.
#[derive(Debug)]
pub enum CandidateServiceError {
    /// Missing identifier or missing input field.
    InvalidArgument(&'static str),
    /// Cross-entity rule violation.
    ValidationFailed(&'static str),
    /// Target candidate does not exist.
    NotFound(CandidateId),
    /// A peer lookup failed; `message` names the reference that is invalid.
    UpstreamFailure {
        message: &'static str,
        source: LookupError,
    },
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl CandidateServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::ValidationFailed(_) => ErrorKind::ValidationFailed,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::UpstreamFailure { source, .. } if source.is_server_error() => {
                ErrorKind::UpstreamFailure
            }
            // The peer answered, and the answer says the reference is bad.
            Self::UpstreamFailure { .. } => ErrorKind::ValidationFailed,
            Self::Repo(_) => ErrorKind::Internal,
        }
    }

    fn upstream(message: &'static str) -> impl FnOnce(LookupError) -> Self {
        move |source| Self::UpstreamFailure { message, source }
    }
}

impl Display for CandidateServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArgument(message) | Self::ValidationFailed(message) => {
                write!(f, "{message}")
            }
            Self::NotFound(_) => write!(f, "{MESSAGE_CANDIDATE_NOT_FOUND}"),
            Self::UpstreamFailure { message, .. } => write!(f, "{message}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CandidateServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::UpstreamFailure { source, .. } => Some(source),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for CandidateServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NotFound(id),
            RepoError::DuplicateRegistration { .. } => {
                Self::ValidationFailed(MESSAGE_DUPLICATE_CANDIDATE)
            }
            other => Self::Repo(other),
        }
    }
}

/// Input that passed validation, with the lookups it resolved.
struct ValidatedInput {
    fields: NewCandidate,
    party: PartySummary,
    election: ElectionSummary,
}

/// Candidate service facade over the store and the two lookup clients.
pub struct CandidateService<R, P, E> {
    repo: R,
    parties: P,
    elections: E,
}

impl<R, P, E> CandidateService<R, P, E>
where
    R: CandidateRepository,
    P: PartyLookup,
    E: ElectionLookup,
{
    pub fn new(repo: R, parties: P, elections: E) -> Self {
        Self {
            repo,
            parties,
            elections,
        }
    }

    /// Lists every candidate with its party and election summaries.
    pub fn list_candidates(&self) -> ServiceResult<Vec<CandidateOutput>> {
        let started_at = Instant::now();
        let result = self
            .repo
            .list_candidates()
            .map_err(CandidateServiceError::from)
            .and_then(|rows| {
                rows.iter()
                    .map(|candidate| self.enrich(candidate))
                    .collect::<ServiceResult<Vec<_>>>()
            });
        log_outcome("candidate_list", None, started_at, &result);
        result
    }

    /// Gets one enriched candidate.
    pub fn get_candidate(&self, id: Option<CandidateId>) -> ServiceResult<CandidateOutput> {
        let started_at = Instant::now();
        let result = require_id(id)
            .and_then(|id| self.load(id))
            .and_then(|candidate| self.enrich(&candidate));
        log_outcome("candidate_get", id, started_at, &result);
        result
    }

    /// Validates and stores a new candidate.
    pub fn create_candidate(&self, input: &CandidateInput) -> ServiceResult<CandidateOutput> {
        let started_at = Instant::now();
        let result = self.create_inner(input);
        let created_id = result.as_ref().ok().map(|output| output.id);
        log_outcome("candidate_create", created_id, started_at, &result);
        result
    }

    /// Replaces all mutable fields of an existing candidate.
    ///
    /// The vote lock is checked against the candidate's current election,
    /// before the new values are applied.
    pub fn update_candidate(
        &self,
        id: Option<CandidateId>,
        input: &CandidateInput,
    ) -> ServiceResult<CandidateOutput> {
        let started_at = Instant::now();
        let result = self.update_inner(id, input);
        log_outcome("candidate_update", id, started_at, &result);
        result
    }

    /// Removes a candidate whose election has no votes yet.
    pub fn delete_candidate(&self, id: Option<CandidateId>) -> ServiceResult<GenericOutput> {
        let started_at = Instant::now();
        let result = self.delete_inner(id);
        log_outcome("candidate_delete", id, started_at, &result);
        result
    }

    fn create_inner(&self, input: &CandidateInput) -> ServiceResult<CandidateOutput> {
        let validated = self.validate_input(input)?;
        self.check_duplicate(&validated.fields, None)?;

        let created = self.repo.create_candidate(&validated.fields)?;
        Ok(CandidateOutput::from_parts(
            &created,
            validated.party,
            validated.election,
        ))
    }

    fn update_inner(
        &self,
        id: Option<CandidateId>,
        input: &CandidateInput,
    ) -> ServiceResult<CandidateOutput> {
        let id = require_id(id)?;
        let validated = self.validate_input(input)?;
        self.check_duplicate(&validated.fields, Some(id))?;

        let mut candidate = self.load(id)?;
        self.check_no_votes(candidate.election_id)?;

        candidate.overwrite(validated.fields);
        self.repo.update_candidate(&candidate)?;
        Ok(CandidateOutput::from_parts(
            &candidate,
            validated.party,
            validated.election,
        ))
    }

    fn delete_inner(&self, id: Option<CandidateId>) -> ServiceResult<GenericOutput> {
        let id = require_id(id)?;
        let candidate = self.load(id)?;
        self.check_no_votes(candidate.election_id)?;

        self.repo.delete_candidate(candidate.id)?;
        Ok(GenericOutput::new(MESSAGE_CANDIDATE_DELETED))
    }

    fn load(&self, id: CandidateId) -> ServiceResult<Candidate> {
        self.repo
            .get_candidate(id)?
            .ok_or(CandidateServiceError::NotFound(id))
    }

    fn enrich(&self, candidate: &Candidate) -> ServiceResult<CandidateOutput> {
        let party = self
            .parties
            .party_by_id(candidate.party_id)
            .map_err(CandidateServiceError::upstream(MESSAGE_INVALID_PARTY_OR_ELECTION))?;
        let election = self
            .elections
            .election_by_id(candidate.election_id)
            .map_err(CandidateServiceError::upstream(MESSAGE_INVALID_PARTY_OR_ELECTION))?;
        Ok(CandidateOutput::from_parts(candidate, party, election))
    }

    fn validate_input(&self, input: &CandidateInput) -> ServiceResult<ValidatedInput> {
        let name = match input.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => return Err(CandidateServiceError::InvalidArgument(MESSAGE_INVALID_NAME)),
        };
        if !is_full_name(name) {
            return Err(CandidateServiceError::ValidationFailed(MESSAGE_INVALID_NAME));
        }

        let number_election = input.number_election.ok_or(
            CandidateServiceError::InvalidArgument(MESSAGE_INVALID_NUMBER_ELECTION),
        )?;
        let party_id = input
            .party_id
            .ok_or(CandidateServiceError::InvalidArgument(MESSAGE_INVALID_PARTY))?;

        let party = self
            .parties
            .party_by_id(party_id)
            .map_err(CandidateServiceError::upstream(MESSAGE_INVALID_PARTY))?;
        if !number_belongs_to_party(number_election, party.number) {
            return Err(CandidateServiceError::ValidationFailed(
                MESSAGE_NUMBER_NOT_IN_PARTY,
            ));
        }

        let election_id = input.election_id.ok_or(
            CandidateServiceError::InvalidArgument(MESSAGE_INVALID_ELECTION_ID),
        )?;
        let election = self
            .elections
            .election_by_id(election_id)
            .map_err(CandidateServiceError::upstream(MESSAGE_INVALID_ELECTION_ID))?;

        Ok(ValidatedInput {
            fields: NewCandidate {
                name: name.to_string(),
                party_id,
                election_id,
                number_election,
            },
            party,
            election,
        })
    }

    fn check_duplicate(
        &self,
        fields: &NewCandidate,
        current_id: Option<CandidateId>,
    ) -> ServiceResult<()> {
        let existing = self
            .repo
            .find_by_number_and_election(fields.number_election, fields.election_id)?;
        match existing {
            Some(candidate) if Some(candidate.id) != current_id => Err(
                CandidateServiceError::ValidationFailed(MESSAGE_DUPLICATE_CANDIDATE),
            ),
            _ => Ok(()),
        }
    }

    fn check_no_votes(&self, election_id: ElectionId) -> ServiceResult<()> {
        let result = self
            .elections
            .election_result(election_id)
            .map_err(CandidateServiceError::upstream(MESSAGE_INVALID_ELECTION))?;
        if result.total_votes > 0 {
            return Err(CandidateServiceError::ValidationFailed(
                MESSAGE_ELECTION_HAS_VOTES,
            ));
        }
        Ok(())
    }
}

fn require_id(id: Option<CandidateId>) -> ServiceResult<CandidateId> {
    id.ok_or(CandidateServiceError::InvalidArgument(MESSAGE_INVALID_ID))
}

fn log_outcome<T>(
    event: &'static str,
    candidate_id: Option<CandidateId>,
    started_at: Instant,
    result: &ServiceResult<T>,
) {
    let id = candidate_id.map_or_else(|| "none".to_string(), |id| id.to_string());
    match result {
        Ok(_) => info!(
            "event={event} module=service status=ok candidate_id={id} duration_ms={}",
            started_at.elapsed().as_millis()
        ),
        Err(err) => warn!(
            "event={event} module=service status=error candidate_id={id} duration_ms={} error_code={} error={}",
            started_at.elapsed().as_millis(),
            err.kind().as_str(),
            err
        ),
    }
}
