//! Core domain logic for the candidate registry.
//! This crate is the single source of truth for candidate business rules.

pub mod client;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use client::{
    ElectionLookup, HttpElectionClient, HttpPartyClient, LookupError, LookupResult, PartyLookup,
};
pub use config::{AppConfig, ConfigError, DatabaseConfig, EndpointConfig, LoggingConfig};
pub use logging::{default_log_level, init_logging, init_logging_from_config, logging_status};
pub use model::candidate::{
    Candidate, CandidateId, CandidateInput, CandidateOutput, ElectionId, ElectionResult,
    ElectionSummary, GenericOutput, NewCandidate, PartyId, PartySummary,
};
pub use repo::candidate_repo::{
    CandidateRepository, RepoError, RepoResult, SqliteCandidateRepository,
};
pub use service::candidate_service::{
    CandidateService, CandidateServiceError, ErrorKind, ServiceResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
