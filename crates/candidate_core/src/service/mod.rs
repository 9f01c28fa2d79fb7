//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository and lookup-client calls into use-case APIs.
//! - Keep the API layer decoupled from storage and transport details.

pub mod candidate_service;
