use std::collections::BTreeSet;
use std::fmt;
use std::time::Duration;
use std::time::Instant;

use crate::election::ElectionState;
use crate::election::Epoch;
use crate::offset::LogOffsetMetadata;
use crate::replica::ReplicaId;
use crate::replica::ReplicaKey;
use crate::voters::VoterSet;

/// A voter campaigning for leadership in its epoch.
///
/// The candidate votes for itself on entry and tallies the responses of the
/// other voters. It wins once a majority has granted, and has lost once the
/// voters still unrecorded can no longer complete a majority.
#[derive(Debug, Clone)]
pub struct CandidateState {
    local_key: ReplicaKey,
    epoch: Epoch,
    voters: VoterSet,
    granting: BTreeSet<ReplicaId>,
    rejecting: BTreeSet<ReplicaId>,
    retries: u32,
    high_watermark: Option<LogOffsetMetadata>,
    election_timeout: Duration,
    election_deadline: Instant,
}

impl CandidateState {
    pub fn new(
        now: Instant,
        local_key: ReplicaKey,
        epoch: Epoch,
        voters: VoterSet,
        high_watermark: Option<LogOffsetMetadata>,
        retries: u32,
        election_timeout: Duration,
    ) -> Self {
        let mut granting = BTreeSet::new();
        granting.insert(local_key.id());

        Self {
            local_key,
            epoch,
            voters,
            granting,
            rejecting: BTreeSet::new(),
            retries,
            high_watermark,
            election_timeout,
            election_deadline: now + election_timeout,
        }
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    pub fn local_key(&self) -> &ReplicaKey {
        &self.local_key
    }

    /// How many elections this replica has started without a winner,
    /// including the current one.
    pub fn retries(&self) -> u32 {
        self.retries
    }

    pub fn high_watermark(&self) -> Option<LogOffsetMetadata> {
        self.high_watermark
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

    fn majority_size(&self) -> usize {
        self.voters.len() / 2 + 1
    }

    /// Record a granted vote from `id`. Returns whether the grant was newly
    /// recorded.
    pub fn record_granted_vote(&mut self, id: ReplicaId) -> bool {
        if !self.voters.is_voter_id(id) {
            tracing::warn!(id, epoch = self.epoch, "ignoring granted vote from a non-voter");
            return false;
        }
        if self.rejecting.contains(&id) {
            tracing::warn!(
                id,
                epoch = self.epoch,
                "ignoring granted vote from a voter which previously rejected"
            );
            return false;
        }
        self.granting.insert(id)
    }

    /// Record a rejected vote from `id`. Returns whether the rejection was
    /// newly recorded.
    pub fn record_rejected_vote(&mut self, id: ReplicaId) -> bool {
        if !self.voters.is_voter_id(id) {
            tracing::warn!(id, epoch = self.epoch, "ignoring rejected vote from a non-voter");
            return false;
        }
        if self.granting.contains(&id) {
            tracing::warn!(
                id,
                epoch = self.epoch,
                "ignoring rejected vote from a voter which previously granted"
            );
            return false;
        }
        self.rejecting.insert(id)
    }

    /// Whether a majority of the voters has granted the vote.
    pub fn is_vote_granted(&self) -> bool {
        self.granting.len() >= self.majority_size()
    }

    /// Whether the election can no longer be won: the granted and the still
    /// unrecorded voters together cannot complete a majority.
    pub fn is_vote_rejected(&self) -> bool {
        self.granting.len() + self.unrecorded_voters().len() < self.majority_size()
    }

    pub fn granting_voters(&self) -> &BTreeSet<ReplicaId> {
        &self.granting
    }

    pub fn rejecting_voters(&self) -> &BTreeSet<ReplicaId> {
        &self.rejecting
    }

    /// The voters whose answer has not been recorded yet.
    pub fn unrecorded_voters(&self) -> BTreeSet<ReplicaId> {
        self.voters
            .voter_ids()
            .into_iter()
            .filter(|id| !self.granting.contains(id) && !self.rejecting.contains(id))
            .collect()
    }

    pub fn election(&self) -> ElectionState {
        ElectionState::with_voted_candidate(self.epoch, self.local_key, self.voters.voter_ids())
    }

    pub fn can_grant_vote(&self, candidate: &ReplicaKey) -> bool {
        // The candidate has voted for itself in this epoch.
        tracing::debug!(
            %candidate,
            epoch = self.epoch,
            "rejecting vote request since we are already a candidate in this epoch"
        );
        false
    }
}

impl fmt::Display for CandidateState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Candidate(localKey={}, epoch={}, retries={}, granting={:?}, rejecting={:?})",
            self.local_key, self.epoch, self.retries, self.granting, self.rejecting,
        )
    }
}
