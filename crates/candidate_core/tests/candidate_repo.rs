use candidate_core::db::open_db_in_memory;
use candidate_core::repo::candidate_repo::count_candidates;
use candidate_core::{CandidateRepository, NewCandidate, RepoError, SqliteCandidateRepository};

fn draft(name: &str, election_id: i64, number_election: i64) -> NewCandidate {
    NewCandidate {
        name: name.to_string(),
        party_id: 1,
        election_id,
        number_election,
    }
}

#[test]
fn create_assigns_increasing_ids_and_get_reads_back() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCandidateRepository::new(&conn);

    let first = repo.create_candidate(&draft("Jane Doe", 10, 150)).unwrap();
    let second = repo.create_candidate(&draft("John Roe", 10, 151)).unwrap();
    assert!(second.id > first.id);

    let loaded = repo.get_candidate(first.id).unwrap().unwrap();
    assert_eq!(loaded, first);
    assert!(repo.get_candidate(9_999).unwrap().is_none());
}

#[test]
fn find_by_number_and_election_matches_both_columns() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCandidateRepository::new(&conn);

    let stored = repo.create_candidate(&draft("Jane Doe", 10, 150)).unwrap();

    let found = repo.find_by_number_and_election(150, 10).unwrap();
    assert_eq!(found.map(|candidate| candidate.id), Some(stored.id));
    assert!(repo.find_by_number_and_election(150, 20).unwrap().is_none());
    assert!(repo.find_by_number_and_election(151, 10).unwrap().is_none());
}

#[test]
fn unique_index_surfaces_as_duplicate_registration() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCandidateRepository::new(&conn);

    repo.create_candidate(&draft("Jane Doe", 10, 150)).unwrap();
    let err = repo
        .create_candidate(&draft("John Roe", 10, 150))
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::DuplicateRegistration {
            number_election: 150,
            election_id: 10
        }
    ));

    let mut other = repo.create_candidate(&draft("John Roe", 10, 151)).unwrap();
    other.number_election = 150;
    let err = repo.update_candidate(&other).unwrap_err();
    assert!(matches!(err, RepoError::DuplicateRegistration { .. }));
}

#[test]
fn update_overwrites_row_and_reports_missing_id() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCandidateRepository::new(&conn);

    let mut candidate = repo.create_candidate(&draft("Jane Doe", 10, 150)).unwrap();
    candidate.overwrite(NewCandidate {
        name: "Jane Q Doe".to_string(),
        party_id: 3,
        election_id: 20,
        number_election: 4001,
    });
    repo.update_candidate(&candidate).unwrap();
    assert_eq!(repo.get_candidate(candidate.id).unwrap(), Some(candidate.clone()));

    candidate.id = 9_999;
    let err = repo.update_candidate(&candidate).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(9_999)));
}

#[test]
fn delete_is_hard_and_second_delete_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCandidateRepository::new(&conn);

    let candidate = repo.create_candidate(&draft("Jane Doe", 10, 150)).unwrap();
    repo.delete_candidate(candidate.id).unwrap();

    assert!(repo.get_candidate(candidate.id).unwrap().is_none());
    assert_eq!(count_candidates(&conn).unwrap(), 0);

    let err = repo.delete_candidate(candidate.id).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == candidate.id));
}

#[test]
fn list_returns_rows_in_id_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCandidateRepository::new(&conn);

    let ids: Vec<i64> = [150, 151, 152]
        .into_iter()
        .map(|number| repo.create_candidate(&draft("Jane Doe", 10, number)).unwrap().id)
        .collect();

    let listed: Vec<i64> = repo
        .list_candidates()
        .unwrap()
        .into_iter()
        .map(|candidate| candidate.id)
        .collect();
    assert_eq!(listed, ids);
}

#[test]
fn blank_persisted_name_is_rejected_on_read() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO candidates (name, party_id, election_id, number_election)
         VALUES ('  ', 1, 10, 150);",
        [],
    )
    .unwrap();

    let repo = SqliteCandidateRepository::new(&conn);
    let err = repo.list_candidates().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}
