//! Candidate repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over the `candidates` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Each write call performs exactly one SQL mutation.
//! - The `(number_election, election_id)` unique index is surfaced as
//!   `RepoError::DuplicateRegistration`, not as a raw database error.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::DbError;
use crate::model::candidate::{Candidate, CandidateId, ElectionId, NewCandidate};
use rusqlite::{params, Connection, ErrorCode, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const CANDIDATE_SELECT_SQL: &str = "SELECT
    id,
    name,
    party_id,
    election_id,
    number_election
FROM candidates";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for candidate persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(CandidateId),
    /// Another row already holds this `(number_election, election_id)` pair.
    DuplicateRegistration {
        number_election: i64,
        election_id: ElectionId,
    },
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "candidate not found: {id}"),
            Self::DuplicateRegistration {
                number_election,
                election_id,
            } => write!(
                f,
                "number {number_election} already registered in election {election_id}"
            ),
            Self::InvalidData(message) => {
                write!(f, "invalid persisted candidate data: {message}")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for candidate CRUD operations.
pub trait CandidateRepository {
    fn list_candidates(&self) -> RepoResult<Vec<Candidate>>;
    fn get_candidate(&self, id: CandidateId) -> RepoResult<Option<Candidate>>;
    /// Returns the first candidate registered with `number_election` in
    /// `election_id`, if any.
    fn find_by_number_and_election(
        &self,
        number_election: i64,
        election_id: ElectionId,
    ) -> RepoResult<Option<Candidate>>;
    fn create_candidate(&self, candidate: &NewCandidate) -> RepoResult<Candidate>;
    fn update_candidate(&self, candidate: &Candidate) -> RepoResult<()>;
    fn delete_candidate(&self, id: CandidateId) -> RepoResult<()>;
}

/// SQLite-backed candidate repository.
pub struct SqliteCandidateRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCandidateRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl CandidateRepository for SqliteCandidateRepository<'_> {
    fn list_candidates(&self) -> RepoResult<Vec<Candidate>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CANDIDATE_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut candidates = Vec::new();

        while let Some(row) = rows.next()? {
            candidates.push(parse_candidate_row(row)?);
        }

        Ok(candidates)
    }

    fn get_candidate(&self, id: CandidateId) -> RepoResult<Option<Candidate>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CANDIDATE_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_candidate_row(row)?));
        }

        Ok(None)
    }

    fn find_by_number_and_election(
        &self,
        number_election: i64,
        election_id: ElectionId,
    ) -> RepoResult<Option<Candidate>> {
        let mut stmt = self.conn.prepare(&format!(
            "{CANDIDATE_SELECT_SQL}
             WHERE number_election = ?1 AND election_id = ?2
             ORDER BY id ASC
             LIMIT 1;"
        ))?;
        let mut rows = stmt.query(params![number_election, election_id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_candidate_row(row)?));
        }

        Ok(None)
    }

    fn create_candidate(&self, candidate: &NewCandidate) -> RepoResult<Candidate> {
        self.conn
            .execute(
                "INSERT INTO candidates (
                    name,
                    party_id,
                    election_id,
                    number_election
                ) VALUES (?1, ?2, ?3, ?4);",
                params![
                    candidate.name.as_str(),
                    candidate.party_id,
                    candidate.election_id,
                    candidate.number_election,
                ],
            )
            .map_err(|err| {
                map_unique_violation(err, candidate.number_election, candidate.election_id)
            })?;

        let id = self.conn.last_insert_rowid();
        Ok(candidate.clone().with_id(id))
    }

    fn update_candidate(&self, candidate: &Candidate) -> RepoResult<()> {
        let changed = self
            .conn
            .execute(
                "UPDATE candidates
                 SET
                    name = ?1,
                    party_id = ?2,
                    election_id = ?3,
                    number_election = ?4,
                    updated_at = (strftime('%s', 'now') * 1000)
                 WHERE id = ?5;",
                params![
                    candidate.name.as_str(),
                    candidate.party_id,
                    candidate.election_id,
                    candidate.number_election,
                    candidate.id,
                ],
            )
            .map_err(|err| {
                map_unique_violation(err, candidate.number_election, candidate.election_id)
            })?;

        if changed == 0 {
            return Err(RepoError::NotFound(candidate.id));
        }

        Ok(())
    }

    fn delete_candidate(&self, id: CandidateId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM candidates WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

/// Counts stored candidates. Used by diagnostics and tests.
pub fn count_candidates(conn: &Connection) -> RepoResult<i64> {
    let count = conn.query_row("SELECT COUNT(*) FROM candidates;", [], |row| row.get(0))?;
    Ok(count)
}

fn map_unique_violation(
    err: rusqlite::Error,
    number_election: i64,
    election_id: ElectionId,
) -> RepoError {
    match &err {
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.code == ErrorCode::ConstraintViolation
                && failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            RepoError::DuplicateRegistration {
                number_election,
                election_id,
            }
        }
        _ => err.into(),
    }
}

fn parse_candidate_row(row: &Row<'_>) -> RepoResult<Candidate> {
    let name: String = row.get("name")?;
    if name.trim().is_empty() {
        let id: CandidateId = row.get("id")?;
        return Err(RepoError::InvalidData(format!(
            "empty name for candidate {id} in candidates.name"
        )));
    }

    Ok(Candidate {
        id: row.get("id")?,
        name,
        party_id: row.get("party_id")?,
        election_id: row.get("election_id")?,
        number_election: row.get("number_election")?,
    })
}
