//! In-process stand-ins for the Party and Election services.

#![allow(dead_code)]

use candidate_core::{
    CandidateInput, ElectionId, ElectionLookup, ElectionResult, ElectionSummary, LookupError,
    LookupResult, PartyId, PartyLookup, PartySummary,
};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

#[derive(Default)]
pub struct FakeParties {
    parties: RefCell<HashMap<PartyId, PartySummary>>,
    failures: RefCell<HashMap<PartyId, LookupError>>,
    pub calls: Cell<usize>,
}

impl FakeParties {
    pub fn with_party(self, id: PartyId, number: i64) -> Self {
        self.parties.borrow_mut().insert(
            id,
            PartySummary {
                id,
                name: format!("Party {id}"),
                code: format!("P{id}"),
                number,
            },
        );
        self
    }

    pub fn fail(&self, id: PartyId, error: LookupError) {
        self.failures.borrow_mut().insert(id, error);
    }
}

impl PartyLookup for FakeParties {
    fn party_by_id(&self, id: PartyId) -> LookupResult<PartySummary> {
        self.calls.set(self.calls.get() + 1);
        if let Some(error) = self.failures.borrow().get(&id) {
            return Err(error.clone());
        }
        self.parties
            .borrow()
            .get(&id)
            .cloned()
            .ok_or(LookupError::NotFound)
    }
}

#[derive(Default)]
pub struct FakeElections {
    elections: RefCell<HashMap<ElectionId, ElectionSummary>>,
    votes: RefCell<HashMap<ElectionId, i64>>,
    failures: RefCell<HashMap<ElectionId, LookupError>>,
    result_failures: RefCell<HashMap<ElectionId, LookupError>>,
}

impl FakeElections {
    pub fn with_election(self, id: ElectionId) -> Self {
        self.elections.borrow_mut().insert(
            id,
            ElectionSummary {
                id,
                year: 2026,
                state_code: "RS".to_string(),
                description: format!("Election {id}"),
            },
        );
        self
    }

    pub fn set_votes(&self, id: ElectionId, total_votes: i64) {
        self.votes.borrow_mut().insert(id, total_votes);
    }

    pub fn fail(&self, id: ElectionId, error: LookupError) {
        self.failures.borrow_mut().insert(id, error);
    }

    pub fn fail_results(&self, id: ElectionId, error: LookupError) {
        self.result_failures.borrow_mut().insert(id, error);
    }
}

impl ElectionLookup for FakeElections {
    fn election_by_id(&self, id: ElectionId) -> LookupResult<ElectionSummary> {
        if let Some(error) = self.failures.borrow().get(&id) {
            return Err(error.clone());
        }
        self.elections
            .borrow()
            .get(&id)
            .cloned()
            .ok_or(LookupError::NotFound)
    }

    fn election_result(&self, id: ElectionId) -> LookupResult<ElectionResult> {
        if let Some(error) = self.result_failures.borrow().get(&id) {
            return Err(error.clone());
        }
        if !self.elections.borrow().contains_key(&id) {
            return Err(LookupError::NotFound);
        }
        let total_votes = self.votes.borrow().get(&id).copied().unwrap_or(0);
        Ok(ElectionResult { total_votes })
    }
}

pub fn input(
    name: &str,
    party_id: PartyId,
    election_id: ElectionId,
    number: i64,
) -> CandidateInput {
    CandidateInput {
        name: Some(name.to_string()),
        party_id: Some(party_id),
        election_id: Some(election_id),
        number_election: Some(number),
    }
}

/// Party 1 numbered 15, party 2 numbered 1, party 3 numbered 40;
/// elections 10 and 20.
pub fn standard_peers() -> (FakeParties, FakeElections) {
    let parties = FakeParties::default()
        .with_party(1, 15)
        .with_party(2, 1)
        .with_party(3, 40);
    let elections = FakeElections::default()
        .with_election(10)
        .with_election(20);
    (parties, elections)
}
