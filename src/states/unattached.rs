use std::collections::BTreeSet;
use std::fmt;
use std::time::Duration;
use std::time::Instant;

use crate::election::ElectionState;
use crate::election::Epoch;
use crate::offset::LogOffsetMetadata;
use crate::replica::ReplicaId;
use crate::replica::ReplicaKey;

/// A replica that knows its epoch but is not attached to a leader.
///
/// It may remember the id of a leader whose endpoints are unknown, or the
/// candidate it voted for in this epoch, but never both. A voter in this
/// state self-nominates once the election timeout expires; an observer
/// carries no deadline and waits to discover a leader.
#[derive(Debug, Clone)]
pub struct UnattachedState {
    epoch: Epoch,
    leader_id: Option<ReplicaId>,
    voted_key: Option<ReplicaKey>,
    voter_ids: BTreeSet<ReplicaId>,
    high_watermark: Option<LogOffsetMetadata>,
    election_timeout: Option<Duration>,
    election_deadline: Option<Instant>,
}

impl UnattachedState {
    pub fn new(
        now: Instant,
        epoch: Epoch,
        leader_id: Option<ReplicaId>,
        voted_key: Option<ReplicaKey>,
        voter_ids: BTreeSet<ReplicaId>,
        high_watermark: Option<LogOffsetMetadata>,
        election_timeout: Option<Duration>,
    ) -> Self {
        debug_assert!(
            leader_id.is_none() || voted_key.is_none(),
            "unattached state cannot carry both a leader and a vote"
        );
        Self {
            epoch,
            leader_id,
            voted_key,
            voter_ids,
            high_watermark,
            election_timeout,
            election_deadline: election_timeout.and_then(|t| now.checked_add(t)),
        }
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    pub fn leader_id(&self) -> Option<ReplicaId> {
        self.leader_id
    }

    pub fn voted_key(&self) -> Option<&ReplicaKey> {
        self.voted_key.as_ref()
    }

    pub fn high_watermark(&self) -> Option<LogOffsetMetadata> {
        self.high_watermark
    }

    /// The timeout this state was created with; `None` for observers, which
    /// never self-nominate.
    pub fn election_timeout(&self) -> Option<Duration> {
        self.election_timeout
    }

    pub fn has_election_timeout_expired(&self, now: Instant) -> bool {
        match self.election_deadline {
            Some(deadline) => now >= deadline,
            None => false,
        }
    }

    /// Time left until self-nomination; `None` when there is no deadline.
    pub fn remaining_election_time(&self, now: Instant) -> Option<Duration> {
        self.election_deadline.map(|d| d.saturating_duration_since(now))
    }

    pub fn election(&self) -> ElectionState {
        if let Some(voted) = self.voted_key {
            ElectionState::with_voted_candidate(self.epoch, voted, self.voter_ids.clone())
        } else if let Some(leader_id) = self.leader_id {
            ElectionState::with_elected_leader(self.epoch, leader_id, self.voter_ids.clone())
        } else {
            ElectionState::with_unknown_leader(self.epoch, self.voter_ids.clone())
        }
    }

    pub fn can_grant_vote(&self, candidate: &ReplicaKey, log_up_to_date: bool) -> bool {
        if let Some(voted) = &self.voted_key {
            // At most one vote per epoch: only the recorded candidate may
            // be granted again.
            let granted = voted.matches(candidate);
            if !granted {
                tracing::debug!(
                    %candidate,
                    voted = %voted,
                    epoch = self.epoch,
                    "rejecting vote request since we already voted in this epoch"
                );
            }
            return granted;
        }

        if self.leader_id.is_some() {
            tracing::debug!(
                %candidate,
                leader_id = self.leader_id,
                epoch = self.epoch,
                "rejecting vote request since we already know of a leader for this epoch"
            );
            return false;
        }

        if !log_up_to_date {
            tracing::debug!(
                %candidate,
                epoch = self.epoch,
                "rejecting vote request since the candidate's log is not up to date with ours"
            );
        }
        log_up_to_date
    }
}

impl fmt::Display for UnattachedState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unattached(epoch={}, leader={:?}, voted={}, voters={:?})",
            self.epoch,
            self.leader_id,
            self.voted_key.map(|k| k.to_string()).unwrap_or_else(|| "None".to_string()),
            self.voter_ids,
        )
    }
}
