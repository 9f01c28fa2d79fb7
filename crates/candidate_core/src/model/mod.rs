//! Candidate domain model.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep input, stored and output shapes separate with explicit conversions.
//!
//! # Invariants
//! - Every candidate is identified by a store-assigned `CandidateId`.
//! - Deletion is a hard delete; there is no tombstone state.

pub mod candidate;
