use std::fs;

use anyhow::Result;
use maplit::btreeset;
use pretty_assertions::assert_eq;
use uuid::Uuid;

use crate::store::FileQuorumStateStore;
use crate::store::QuorumStateStore;
use crate::ElectionState;
use crate::KRaftVersion;
use crate::ReplicaKey;

#[test]
fn test_read_absent_record() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store = FileQuorumStateStore::new(dir.path().join("quorum-state"));

    assert_eq!(None, store.read_election_state()?);
    Ok(())
}

#[test]
fn test_read_empty_record() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("quorum-state");
    fs::write(&path, b"")?;
    let store = FileQuorumStateStore::new(path);

    assert_eq!(None, store.read_election_state()?);
    Ok(())
}

#[test]
fn test_write_then_read_round_trip() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store = FileQuorumStateStore::new(dir.path().join("quorum-state"));

    let elections = vec![
        ElectionState::with_unknown_leader(0, btreeset! {1, 2, 3}),
        ElectionState::with_elected_leader(5, 1, btreeset! {1, 2, 3}),
        ElectionState::with_voted_candidate(
            7,
            ReplicaKey::new(2, Uuid::new_v4()),
            btreeset! {1, 2, 3},
        ),
        ElectionState::with_voted_candidate(
            8,
            ReplicaKey::without_directory(3),
            btreeset! {1, 2, 3},
        ),
    ];

    for election in elections {
        store.write_election_state(&election, KRaftVersion::V1)?;
        assert_eq!(Some(election), store.read_election_state()?);
    }
    Ok(())
}

#[test]
fn test_overwrite_replaces_previous_record() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store = FileQuorumStateStore::new(dir.path().join("quorum-state"));

    store.write_election_state(
        &ElectionState::with_elected_leader(5, 1, btreeset! {1, 2, 3}),
        KRaftVersion::V1,
    )?;
    store.write_election_state(
        &ElectionState::with_unknown_leader(6, btreeset! {1, 2, 3}),
        KRaftVersion::V1,
    )?;

    assert_eq!(
        Some(ElectionState::with_unknown_leader(6, btreeset! {1, 2, 3})),
        store.read_election_state()?
    );
    Ok(())
}

#[test]
fn test_garbage_record_is_a_read_error() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("quorum-state");
    fs::write(&path, b"not json at all")?;
    let store = FileQuorumStateStore::new(path);

    assert!(store.read_election_state().is_err());
    Ok(())
}

#[test]
fn test_record_with_leader_and_vote_is_corrupt() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("quorum-state");
    fs::write(
        &path,
        br#"{"version":1,"epoch":5,"leader_id":1,"voted_id":2,"voted_directory_id":null,"voter_ids":[1,2,3]}"#,
    )?;
    let store = FileQuorumStateStore::new(path);

    assert!(store.read_election_state().is_err());
    Ok(())
}
