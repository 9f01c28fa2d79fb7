//! Read-only clients for the peer Party and Election services.
//!
//! # Responsibility
//! - Define the lookup contracts the candidate service depends on.
//! - Classify every remote failure into one `LookupError` kind.
//!
//! # Invariants
//! - Lookups never mutate remote state.
//! - HTTP status classification happens once, in `LookupError::from_status`,
//!   and is shared by every caller (validation, enrichment, vote checks).

use crate::model::candidate::{
    ElectionId, ElectionResult, ElectionSummary, PartyId, PartySummary,
};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod http;

pub use http::{HttpElectionClient, HttpPartyClient};

pub type LookupResult<T> = Result<T, LookupError>;

/// Classified failure of one remote lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// The peer service answered that the entity does not exist.
    NotFound,
    /// The peer service failed with a 5xx status.
    Server { status: u16 },
    /// The peer service rejected the request with a non-404 4xx status.
    Client { status: u16 },
    /// The request never produced a response (connect, timeout, TLS).
    Transport(String),
    /// The response body could not be decoded.
    Decode(String),
}

impl LookupError {
    /// Classifies a non-success HTTP status code.
    pub fn from_status(status: u16) -> Self {
        match status {
            404 => Self::NotFound,
            500..=599 => Self::Server { status },
            _ => Self::Client { status },
        }
    }

    /// Returns whether the failure originated on the remote side.
    pub fn is_server_error(&self) -> bool {
        matches!(
            self,
            Self::Server { .. } | Self::Transport(_) | Self::Decode(_)
        )
    }

    /// Stable short code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Server { .. } => "server_error",
            Self::Client { .. } => "client_error",
            Self::Transport(_) => "transport_error",
            Self::Decode(_) => "decode_error",
        }
    }
}

impl Display for LookupError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => write!(f, "remote entity not found"),
            Self::Server { status } => write!(f, "remote service error (status {status})"),
            Self::Client { status } => write!(f, "remote request rejected (status {status})"),
            Self::Transport(message) => write!(f, "remote service unreachable: {message}"),
            Self::Decode(message) => write!(f, "invalid remote response: {message}"),
        }
    }
}

impl Error for LookupError {}

/// Read access to the Party service.
pub trait PartyLookup {
    fn party_by_id(&self, id: PartyId) -> LookupResult<PartySummary>;
}

/// Read access to the Election service.
pub trait ElectionLookup {
    fn election_by_id(&self, id: ElectionId) -> LookupResult<ElectionSummary>;
    /// Returns vote totals recorded so far for `id`.
    fn election_result(&self, id: ElectionId) -> LookupResult<ElectionResult>;
}

impl<T: PartyLookup + ?Sized> PartyLookup for &T {
    fn party_by_id(&self, id: PartyId) -> LookupResult<PartySummary> {
        (**self).party_by_id(id)
    }
}

impl<T: ElectionLookup + ?Sized> ElectionLookup for &T {
    fn election_by_id(&self, id: ElectionId) -> LookupResult<ElectionSummary> {
        (**self).election_by_id(id)
    }

    fn election_result(&self, id: ElectionId) -> LookupResult<ElectionResult> {
        (**self).election_result(id)
    }
}

#[cfg(test)]
mod tests {
    use super::LookupError;

    #[test]
    fn from_status_separates_not_found_server_and_client_errors() {
        assert_eq!(LookupError::from_status(404), LookupError::NotFound);
        assert_eq!(
            LookupError::from_status(500),
            LookupError::Server { status: 500 }
        );
        assert_eq!(
            LookupError::from_status(503),
            LookupError::Server { status: 503 }
        );
        assert_eq!(
            LookupError::from_status(400),
            LookupError::Client { status: 400 }
        );
    }

    #[test]
    fn only_remote_side_failures_count_as_server_errors() {
        assert!(LookupError::Server { status: 502 }.is_server_error());
        assert!(LookupError::Transport("refused".to_string()).is_server_error());
        assert!(LookupError::Decode("eof".to_string()).is_server_error());
        assert!(!LookupError::NotFound.is_server_error());
        assert!(!LookupError::Client { status: 401 }.is_server_error());
    }
}
