//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the candidate store contract used by the service layer.
//! - Isolate SQLite query details from business orchestration.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`,
//!   `DuplicateRegistration`) in addition to DB transport errors.
//! - Repositories do not check party/election references; the service does.

pub mod candidate_repo;
