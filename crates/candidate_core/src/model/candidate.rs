//! Candidate domain model and its input/output shapes.
//!
//! # Responsibility
//! - Define the persisted `Candidate` record.
//! - Define the caller-facing input shape and the enriched output shape.
//! - Provide explicit field-by-field conversions between those shapes.
//!
//! # Invariants
//! - `id` is assigned by the store and never changes afterwards.
//! - `(number_election, election_id)` is unique across all candidates.
//! - `name` is a full name: trimmed length >= 5 with at least two tokens.

use serde::{Deserialize, Serialize};

/// Store-assigned candidate identifier.
pub type CandidateId = i64;
/// Identifier of a party owned by the remote Party service.
pub type PartyId = i64;
/// Identifier of an election owned by the remote Election service.
pub type ElectionId = i64;

/// Minimum trimmed length accepted for a candidate full name.
pub const MIN_NAME_CHARS: usize = 5;

/// Persisted candidate record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: CandidateId,
    pub name: String,
    pub party_id: PartyId,
    pub election_id: ElectionId,
    /// Registration number, prefixed by the party's official number.
    pub number_election: i64,
}

/// Candidate fields before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCandidate {
    pub name: String,
    pub party_id: PartyId,
    pub election_id: ElectionId,
    pub number_election: i64,
}

impl NewCandidate {
    /// Attaches the store-assigned id.
    pub fn with_id(self, id: CandidateId) -> Candidate {
        Candidate {
            id,
            name: self.name,
            party_id: self.party_id,
            election_id: self.election_id,
            number_election: self.number_election,
        }
    }
}

impl Candidate {
    /// Replaces all four mutable fields, keeping the id.
    pub fn overwrite(&mut self, fields: NewCandidate) {
        self.name = fields.name;
        self.party_id = fields.party_id;
        self.election_id = fields.election_id;
        self.number_election = fields.number_election;
    }
}

/// Raw candidate input as received from the API layer.
///
/// Every field is optional so a missing value can be reported precisely
/// instead of failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateInput {
    pub name: Option<String>,
    pub party_id: Option<PartyId>,
    pub election_id: Option<ElectionId>,
    pub number_election: Option<i64>,
}

/// Party summary served by the Party service.
///
/// `id` and `number` are required; a body without them is a decode failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartySummary {
    pub id: PartyId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub code: String,
    /// Official party number; candidate numbers must start with it.
    pub number: i64,
}

/// Election summary served by the Election service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElectionSummary {
    pub id: ElectionId,
    #[serde(default)]
    pub year: i32,
    #[serde(default)]
    pub state_code: String,
    #[serde(default)]
    pub description: String,
}

/// Vote totals of one election. A body without `totalVotes` does not decode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElectionResult {
    pub total_votes: i64,
}

/// Candidate enriched with its party and election summaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateOutput {
    pub id: CandidateId,
    pub name: String,
    pub number_election: i64,
    pub party: PartySummary,
    pub election: ElectionSummary,
}

impl CandidateOutput {
    /// Builds the output shape from a stored record and its lookups.
    pub fn from_parts(
        candidate: &Candidate,
        party: PartySummary,
        election: ElectionSummary,
    ) -> Self {
        Self {
            id: candidate.id,
            name: candidate.name.clone(),
            number_election: candidate.number_election,
            party,
            election,
        }
    }
}

/// Plain confirmation message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericOutput {
    pub message: String,
}

impl GenericOutput {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Returns whether `name` reads as a full name.
///
/// The trimmed value must be at least `MIN_NAME_CHARS` long and contain an
/// interior space separating first and last name.
pub fn is_full_name(name: &str) -> bool {
    let trimmed = name.trim();
    trimmed.chars().count() >= MIN_NAME_CHARS && trimmed.contains(' ')
}

/// Returns whether `number_election` is prefixed by `party_number`.
///
/// Compares decimal string forms, so `150` belongs to party `15` and
/// `1` belongs to party `1`, but `51` does not belong to party `15`.
pub fn number_belongs_to_party(number_election: i64, party_number: i64) -> bool {
    number_election
        .to_string()
        .starts_with(&party_number.to_string())
}

#[cfg(test)]
mod tests {
    use super::{is_full_name, number_belongs_to_party, NewCandidate};

    #[test]
    fn full_name_requires_length_and_two_tokens() {
        assert!(is_full_name("Jane Doe"));
        assert!(is_full_name("  Ana Li  "));
        assert!(!is_full_name("Jo D"));
        assert!(!is_full_name("Madonna"));
        assert!(!is_full_name("     "));
    }

    #[test]
    fn trailing_space_is_not_an_interior_space() {
        assert!(!is_full_name("Prince   "));
    }

    #[test]
    fn party_prefix_compares_decimal_strings() {
        assert!(number_belongs_to_party(150, 15));
        assert!(number_belongs_to_party(15, 15));
        assert!(!number_belongs_to_party(51, 15));
        assert!(!number_belongs_to_party(1, 15));
    }

    #[test]
    fn with_id_keeps_all_fields() {
        let draft = NewCandidate {
            name: "Jane Doe".to_string(),
            party_id: 1,
            election_id: 10,
            number_election: 150,
        };
        let candidate = draft.clone().with_id(7);
        assert_eq!(candidate.id, 7);
        assert_eq!(candidate.name, draft.name);
        assert_eq!(candidate.party_id, 1);
        assert_eq!(candidate.election_id, 10);
        assert_eq!(candidate.number_election, 150);
    }
}
