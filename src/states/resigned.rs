use std::collections::BTreeSet;
use std::fmt;
use std::time::Duration;
use std::time::Instant;

use crate::election::ElectionState;
use crate::election::Epoch;
use crate::endpoints::Endpoints;
use crate::replica::ReplicaId;
use crate::replica::ReplicaKey;

/// An ex-leader that has given up leadership without leaving its epoch.
///
/// Remaining in the epoch keeps the replica from voting for anyone else in
/// it and from re-assigning offsets an unflushed tail may already have
/// claimed. The state notifies the other voters of the resignation and
/// tracks who has acknowledged it; once the election timeout expires the
/// replica moves on.
///
/// This is soft state: it is never persisted, and a restarted ex-leader is
/// placed back into it from the durable election record alone.
#[derive(Debug, Clone)]
pub struct ResignedState {
    local_id: ReplicaId,
    epoch: Epoch,
    voter_ids: BTreeSet<ReplicaId>,
    unacked_voters: BTreeSet<ReplicaId>,
    preferred_successors: Vec<ReplicaKey>,
    local_listeners: Endpoints,
    election_timeout: Duration,
    election_deadline: Instant,
}

impl ResignedState {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        now: Instant,
        local_id: ReplicaId,
        epoch: Epoch,
        voter_ids: BTreeSet<ReplicaId>,
        election_timeout: Duration,
        preferred_successors: Vec<ReplicaKey>,
        local_listeners: Endpoints,
    ) -> Self {
        let unacked_voters = voter_ids.iter().copied().filter(|id| *id != local_id).collect();
        Self {
            local_id,
            epoch,
            voter_ids,
            unacked_voters,
            preferred_successors,
            local_listeners,
            election_timeout,
            election_deadline: now + election_timeout,
        }
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    pub fn local_id(&self) -> ReplicaId {
        self.local_id
    }

    pub fn voter_ids(&self) -> &BTreeSet<ReplicaId> {
        &self.voter_ids
    }

    /// The voters that have not yet acknowledged the resignation.
    pub fn unacked_voters(&self) -> &BTreeSet<ReplicaId> {
        &self.unacked_voters
    }

    /// Record that `id` has learned of the resignation. Returns whether the
    /// acknowledgement was newly recorded.
    pub fn acknowledge_resignation(&mut self, id: ReplicaId) -> bool {
        if !self.voter_ids.contains(&id) {
            tracing::warn!(id, epoch = self.epoch, "ignoring resignation ack from a non-voter");
            return false;
        }
        self.unacked_voters.remove(&id)
    }

    /// The successors the resigning leader would prefer, in order.
    pub fn preferred_successors(&self) -> &[ReplicaKey] {
        &self.preferred_successors
    }

    pub fn local_listeners(&self) -> &Endpoints {
        &self.local_listeners
    }

    pub fn election_timeout(&self) -> Duration {
        self.election_timeout
    }

    pub fn has_election_timeout_expired(&self, now: Instant) -> bool {
        now >= self.election_deadline
    }

    pub fn remaining_election_time(&self, now: Instant) -> Duration {
        self.election_deadline.saturating_duration_since(now)
    }

    pub fn election(&self) -> ElectionState {
        ElectionState::with_elected_leader(self.epoch, self.local_id, self.voter_ids.clone())
    }

    pub fn can_grant_vote(&self, candidate: &ReplicaKey) -> bool {
        tracing::debug!(
            %candidate,
            epoch = self.epoch,
            "rejecting vote request since we resigned leadership of this epoch"
        );
        false
    }
}

impl fmt::Display for ResignedState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Resigned(localId={}, epoch={}, unacked={:?}, preferredSuccessors=[",
            self.local_id, self.epoch, self.unacked_voters,
        )?;
        for (i, key) in self.preferred_successors.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", key)?;
        }
        write!(f, "])")
    }
}
