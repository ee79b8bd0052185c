//! Initialization from the durable election record, reconciled against the
//! end of the local log.

mod fixtures;

use anyhow::Result;
use maplit::btreeset;
use pretty_assertions::assert_eq;
use uuid::Uuid;

use fixtures::FixtureBuilder;
use raft_quorum::ElectionState;
use raft_quorum::Endpoints;
use raft_quorum::OffsetAndEpoch;
use raft_quorum::QuorumError;
use raft_quorum::QuorumStateStore;
use raft_quorum::ReplicaKey;
use raft_quorum::PartitionView;

#[test]
fn test_empty_store_starts_unattached_at_epoch_0() -> Result<()> {
    let mut fx = FixtureBuilder::new(Some(1)).build();
    fx.quorum.initialize(OffsetAndEpoch::new(0, 0))?;

    assert!(fx.quorum.is_unattached());
    assert!(fx.quorum.is_unattached_not_voted());
    assert_eq!(0, fx.quorum.epoch());
    assert_eq!(None, fx.quorum.leader_id());
    assert!(fx.quorum.is_voter());

    // Initialization is itself a durable transition.
    assert_eq!(
        Some(ElectionState::with_unknown_leader(0, btreeset! {1, 2, 3})),
        fx.store.read_election_state()?
    );
    Ok(())
}

#[test]
fn test_voted_record_without_local_id_cannot_start() {
    let election =
        ElectionState::with_voted_candidate(5, ReplicaKey::new(2, Uuid::new_v4()), btreeset! {1, 2, 3});
    let mut fx = FixtureBuilder::new(None).stored_election(election.clone()).build();

    assert_eq!(
        Err(QuorumError::VotedWithoutLocalId { election }),
        fx.quorum.initialize(OffsetAndEpoch::new(0, 0))
    );
}

#[test]
fn test_log_ahead_of_store_trusts_the_log() -> Result<()> {
    // The log recorded epoch 5 but the quorum store only saw epoch 2.
    let mut fx = FixtureBuilder::new(Some(1))
        .stored_election(ElectionState::with_unknown_leader(2, btreeset! {1, 2, 3}))
        .build();
    fx.quorum.initialize(OffsetAndEpoch::new(100, 5))?;

    assert!(fx.quorum.is_unattached());
    assert_eq!(5, fx.quorum.epoch());
    assert_eq!(None, fx.quorum.leader_id());

    // A subsequent election starts above the log's epoch.
    fx.quorum.transition_to_candidate()?;
    assert_eq!(6, fx.quorum.epoch());
    assert_eq!(1, fx.quorum.candidate_state()?.retries());
    Ok(())
}

#[test]
fn test_ex_leader_restarts_resigned() -> Result<()> {
    let mut fx = FixtureBuilder::new(Some(1))
        .stored_election(ElectionState::with_elected_leader(5, 1, btreeset! {1, 2, 3}))
        .build();
    fx.quorum.initialize(OffsetAndEpoch::new(0, 5))?;

    assert!(fx.quorum.is_resigned());
    assert_eq!(5, fx.quorum.epoch());
    assert_eq!(Some(1), fx.quorum.leader_id());
    assert!(!fx.quorum.has_remote_leader());
    assert_eq!(&btreeset! {2, 3}, fx.quorum.resigned_state()?.unacked_voters());

    // The epoch may only move forward from here.
    assert!(matches!(
        fx.quorum.transition_to_unattached(5),
        Err(QuorumError::NonMonotonicEpoch { .. })
    ));
    fx.quorum.transition_to_unattached(6)?;
    assert_eq!(6, fx.quorum.epoch());
    Ok(())
}

#[test]
fn test_vote_for_ourselves_restarts_candidate() -> Result<()> {
    let dir = Uuid::new_v4();
    let mut fx = FixtureBuilder::new(Some(1))
        .local_dir(dir)
        .stored_election(ElectionState::with_voted_candidate(
            7,
            ReplicaKey::new(1, dir),
            btreeset! {1, 2, 3},
        ))
        .build();
    fx.quorum.initialize(OffsetAndEpoch::new(0, 7))?;

    assert!(fx.quorum.is_candidate());
    assert_eq!(7, fx.quorum.epoch());
    assert_eq!(1, fx.quorum.candidate_state()?.retries());
    assert_eq!(&btreeset! {1}, fx.quorum.candidate_state()?.granting_voters());
    Ok(())
}

#[test]
fn test_vote_for_another_incarnation_of_our_id_stays_unattached() -> Result<()> {
    // Same id, different directory id: that vote was for our predecessor.
    let mut fx = FixtureBuilder::new(Some(1))
        .stored_election(ElectionState::with_voted_candidate(
            7,
            ReplicaKey::new(1, Uuid::new_v4()),
            btreeset! {1, 2, 3},
        ))
        .build();
    fx.quorum.initialize(OffsetAndEpoch::new(0, 7))?;

    assert!(fx.quorum.is_unattached_and_voted());
    assert_eq!(7, fx.quorum.epoch());
    Ok(())
}

#[test]
fn test_vote_for_other_candidate_restarts_unattached_voted() -> Result<()> {
    let voted = ReplicaKey::new(2, Uuid::new_v4());
    let mut fx = FixtureBuilder::new(Some(1))
        .stored_election(ElectionState::with_voted_candidate(4, voted, btreeset! {1, 2, 3}))
        .build();
    fx.quorum.initialize(OffsetAndEpoch::new(0, 4))?;

    assert!(fx.quorum.is_unattached_and_voted());
    assert_eq!(4, fx.quorum.epoch());
    assert_eq!(Some(&voted), fx.quorum.unattached_state()?.voted_key());

    // Still at most one vote per epoch after the restart.
    assert!(matches!(
        fx.quorum
            .transition_to_unattached_voted(4, ReplicaKey::new(3, Uuid::new_v4())),
        Err(QuorumError::InvalidTransition { .. })
    ));
    Ok(())
}

#[test]
fn test_known_leader_with_endpoints_restarts_follower() -> Result<()> {
    let mut fx = FixtureBuilder::new(Some(1))
        .stored_election(ElectionState::with_elected_leader(9, 2, btreeset! {1, 2, 3}))
        .build();
    fx.quorum.initialize(OffsetAndEpoch::new(0, 9))?;

    assert!(fx.quorum.is_follower());
    assert_eq!(9, fx.quorum.epoch());
    assert_eq!(Some(2), fx.quorum.leader_id());
    assert!(fx.quorum.has_remote_leader());
    assert_eq!(
        Some("replica-2:9093"),
        fx.quorum.leader_endpoints().address("CONTROLLER")
    );
    Ok(())
}

#[test]
fn test_leader_without_known_endpoints_restarts_unattached() -> Result<()> {
    // The stored leader 7 is not in the latest voter set.
    let mut fx = FixtureBuilder::new(Some(1))
        .stored_election(ElectionState::with_elected_leader(9, 7, btreeset! {1, 2, 3}))
        .build();
    fx.quorum.initialize(OffsetAndEpoch::new(0, 9))?;

    assert!(fx.quorum.is_unattached());
    assert_eq!(9, fx.quorum.epoch());
    assert_eq!(Some(7), fx.quorum.leader_id());
    assert_eq!(None, fx.quorum.unattached_state()?.voted_key());
    assert!(fx.quorum.leader_endpoints().is_empty());
    Ok(())
}

#[test]
fn test_observer_with_local_id_outside_voter_set() -> Result<()> {
    let mut fx = FixtureBuilder::new(Some(9)).build();
    fx.quorum.initialize(OffsetAndEpoch::new(0, 0))?;

    assert!(fx.quorum.is_observer());
    assert!(!fx.quorum.is_only_voter());
    assert!(fx.quorum.is_unattached());
    Ok(())
}

#[test]
fn test_reinitialize_after_unattached_voted_round_trips() -> Result<()> {
    let voted = ReplicaKey::new(2, Uuid::new_v4());
    let mut fx = FixtureBuilder::new(Some(1)).build();
    fx.quorum.initialize(OffsetAndEpoch::new(0, 0))?;
    fx.quorum.transition_to_unattached_voted(4, voted)?;

    // Restart against the same store and partition view.
    let mut restarted = fixtures::build_with_store(
        Some(1),
        fx.local_dir,
        fx.partition.last_voter_set(),
        fx.store.clone(),
        fixtures::ELECTION_TIMEOUT_MS,
    );
    restarted.quorum.initialize(OffsetAndEpoch::new(0, 4))?;

    assert!(restarted.quorum.is_unattached_and_voted());
    assert_eq!(4, restarted.quorum.epoch());
    assert_eq!(Some(&voted), restarted.quorum.unattached_state()?.voted_key());
    Ok(())
}

#[test]
fn test_reinitialize_after_follower_round_trips() -> Result<()> {
    let mut fx = FixtureBuilder::new(Some(1)).build();
    fx.quorum.initialize(OffsetAndEpoch::new(0, 0))?;
    fx.quorum
        .transition_to_follower(3, 2, Endpoints::single("CONTROLLER", "replica-2:9093"))?;

    let mut restarted = fixtures::build_with_store(
        Some(1),
        fx.local_dir,
        fx.partition.last_voter_set(),
        fx.store.clone(),
        fixtures::ELECTION_TIMEOUT_MS,
    );
    restarted.quorum.initialize(OffsetAndEpoch::new(0, 3))?;

    assert!(restarted.quorum.is_follower());
    assert_eq!(3, restarted.quorum.epoch());
    assert_eq!(Some(2), restarted.quorum.leader_id());
    Ok(())
}

#[test]
fn test_reinitialize_after_winning_an_election_resigns() -> Result<()> {
    let mut fx = FixtureBuilder::new(Some(1)).build();
    fx.quorum.initialize(OffsetAndEpoch::new(0, 0))?;
    fx.quorum.transition_to_candidate()?;
    fx.quorum.candidate_state_mut()?.record_granted_vote(2);
    fx.quorum.transition_to_leader(100, ())?;
    assert!(fx.quorum.is_leader());

    let mut restarted = fixtures::build_with_store(
        Some(1),
        fx.local_dir,
        fx.partition.last_voter_set(),
        fx.store.clone(),
        fixtures::ELECTION_TIMEOUT_MS,
    );
    restarted.quorum.initialize(OffsetAndEpoch::new(100, 1))?;

    assert!(restarted.quorum.is_resigned());
    assert_eq!(1, restarted.quorum.epoch());
    assert_eq!(Some(1), restarted.quorum.leader_id());
    Ok(())
}
