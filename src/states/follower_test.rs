use std::time::Duration;
use std::time::Instant;

use maplit::btreeset;
use pretty_assertions::assert_eq;
use uuid::Uuid;

use crate::states::FollowerState;
use crate::Endpoints;
use crate::LogOffsetMetadata;
use crate::ReplicaKey;

fn follower(now: Instant) -> FollowerState {
    FollowerState::new(
        now,
        3,
        2,
        Endpoints::single("CONTROLLER", "replica-2:9093"),
        btreeset! {1, 2, 3},
        None,
        Duration::from_millis(2000),
    )
}

#[test]
fn test_fetch_timeout_expiry_and_reset() {
    let now = Instant::now();
    let mut state = follower(now);

    assert!(!state.has_fetch_timeout_expired(now));
    assert!(state.has_fetch_timeout_expired(now + Duration::from_millis(2000)));

    state.reset_fetch_timeout(now + Duration::from_millis(1500));
    assert!(!state.has_fetch_timeout_expired(now + Duration::from_millis(2000)));
    assert_eq!(
        Duration::from_millis(1500),
        state.remaining_fetch_time(now + Duration::from_millis(2000))
    );
}

#[test]
fn test_high_watermark_is_monotonic() {
    let mut state = follower(Instant::now());

    assert!(state.update_high_watermark(LogOffsetMetadata::new(10)));
    assert_eq!(Some(LogOffsetMetadata::new(10)), state.high_watermark());

    // Same offset: no change to report.
    assert!(!state.update_high_watermark(LogOffsetMetadata::new(10)));

    // Regression: ignored.
    assert!(!state.update_high_watermark(LogOffsetMetadata::new(5)));
    assert_eq!(Some(LogOffsetMetadata::new(10)), state.high_watermark());

    assert!(state.update_high_watermark(LogOffsetMetadata::new(11)));
    assert_eq!(Some(LogOffsetMetadata::new(11)), state.high_watermark());
}

#[test]
fn test_follower_never_grants_votes() {
    let state = follower(Instant::now());

    assert!(!state.can_grant_vote(&ReplicaKey::new(3, Uuid::new_v4())));
}

#[test]
fn test_election_reports_the_leader() {
    let state = follower(Instant::now());
    let election = state.election();

    assert_eq!(3, election.epoch());
    assert_eq!(Some(2), election.leader_id());
    assert!(!election.has_voted());
}
