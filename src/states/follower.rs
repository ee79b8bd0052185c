use std::collections::BTreeSet;
use std::fmt;
use std::time::Duration;
use std::time::Instant;

use crate::election::ElectionState;
use crate::election::Epoch;
use crate::endpoints::Endpoints;
use crate::offset::LogOffsetMetadata;
use crate::replica::ReplicaId;
use crate::replica::ReplicaKey;

/// A replica fetching from an elected leader.
///
/// The fetch deadline is reset by the outer engine whenever the leader
/// makes progress; once it expires, a voter gives up on the leader and
/// campaigns.
#[derive(Debug, Clone)]
pub struct FollowerState {
    epoch: Epoch,
    leader_id: ReplicaId,
    leader_endpoints: Endpoints,
    voter_ids: BTreeSet<ReplicaId>,
    high_watermark: Option<LogOffsetMetadata>,
    fetch_timeout: Duration,
    fetch_deadline: Instant,
}

impl FollowerState {
    pub fn new(
        now: Instant,
        epoch: Epoch,
        leader_id: ReplicaId,
        leader_endpoints: Endpoints,
        voter_ids: BTreeSet<ReplicaId>,
        high_watermark: Option<LogOffsetMetadata>,
        fetch_timeout: Duration,
    ) -> Self {
        Self {
            epoch,
            leader_id,
            leader_endpoints,
            voter_ids,
            high_watermark,
            fetch_timeout,
            fetch_deadline: now + fetch_timeout,
        }
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    pub fn leader_id(&self) -> ReplicaId {
        self.leader_id
    }

    pub fn leader_endpoints(&self) -> &Endpoints {
        &self.leader_endpoints
    }

    pub fn high_watermark(&self) -> Option<LogOffsetMetadata> {
        self.high_watermark
    }

    pub fn has_fetch_timeout_expired(&self, now: Instant) -> bool {
        now >= self.fetch_deadline
    }

    pub fn remaining_fetch_time(&self, now: Instant) -> Duration {
        self.fetch_deadline.saturating_duration_since(now)
    }

    /// Restart the fetch deadline after observing progress from the leader.
    pub fn reset_fetch_timeout(&mut self, now: Instant) {
        self.fetch_deadline = now + self.fetch_timeout;
    }

    /// Advance the high watermark as reported by the leader. The watermark
    /// never moves backwards; a stale report is ignored.
    pub fn update_high_watermark(&mut self, high_watermark: LogOffsetMetadata) -> bool {
        if let Some(current) = self.high_watermark {
            if high_watermark.offset < current.offset {
                tracing::warn!(
                    current = current.offset,
                    reported = high_watermark.offset,
                    epoch = self.epoch,
                    "ignoring non-monotonic high watermark update"
                );
                return false;
            }
            if high_watermark.offset == current.offset {
                return false;
            }
        }
        self.high_watermark = Some(high_watermark);
        true
    }

    pub fn election(&self) -> ElectionState {
        ElectionState::with_elected_leader(self.epoch, self.leader_id, self.voter_ids.clone())
    }

    pub fn can_grant_vote(&self, candidate: &ReplicaKey) -> bool {
        tracing::debug!(
            %candidate,
            leader_id = self.leader_id,
            epoch = self.epoch,
            "rejecting vote request since we are already following a leader in this epoch"
        );
        false
    }
}

impl fmt::Display for FollowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Follower(epoch={}, leader={}, endpoints={}, voters={:?})",
            self.epoch, self.leader_id, self.leader_endpoints, self.voter_ids,
        )
    }
}
