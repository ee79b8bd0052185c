use std::collections::BTreeSet;
use std::fmt;
use std::io;

use crate::election::ElectionState;
use crate::election::Epoch;
use crate::endpoints::Endpoints;
use crate::offset::LogOffsetMetadata;
use crate::replica::ReplicaId;
use crate::replica::ReplicaKey;
use crate::states::BatchAccumulator;
use crate::version::KRaftVersion;
use crate::voters::VoterSet;

/// The elected leader of an epoch.
///
/// The leader snapshots the voter set, its establishing offset and the
/// active protocol version at election time, and owns the batch accumulator
/// for the records it appends.
///
/// A new leader starts with no high watermark, whatever the previous state
/// knew. The published high watermark must only ever grow, and the only
/// point at which a fresh leader can be certain of that is once a majority
/// of voters has acknowledged an offset at or after the start of its epoch.
#[derive(Debug)]
pub struct LeaderState<A> {
    local_key: ReplicaKey,
    epoch: Epoch,
    epoch_start_offset: u64,
    voters: VoterSet,
    voters_offset: Option<u64>,
    kraft_version: KRaftVersion,
    granting_voters: BTreeSet<ReplicaId>,
    accumulator: A,
    local_listeners: Endpoints,
    high_watermark: Option<LogOffsetMetadata>,
    closed: bool,
}

impl<A> LeaderState<A> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        local_key: ReplicaKey,
        epoch: Epoch,
        epoch_start_offset: u64,
        voters: VoterSet,
        voters_offset: Option<u64>,
        kraft_version: KRaftVersion,
        granting_voters: BTreeSet<ReplicaId>,
        accumulator: A,
        local_listeners: Endpoints,
    ) -> Self {
        Self {
            local_key,
            epoch,
            epoch_start_offset,
            voters,
            voters_offset,
            kraft_version,
            granting_voters,
            accumulator,
            local_listeners,
            high_watermark: None,
            closed: false,
        }
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    pub fn local_id(&self) -> ReplicaId {
        self.local_key.id()
    }

    pub fn local_key(&self) -> &ReplicaKey {
        &self.local_key
    }

    /// The offset of the first record of this leader's epoch.
    pub fn epoch_start_offset(&self) -> u64 {
        self.epoch_start_offset
    }

    pub fn voters(&self) -> &VoterSet {
        &self.voters
    }

    pub fn voters_offset(&self) -> Option<u64> {
        self.voters_offset
    }

    pub fn kraft_version(&self) -> KRaftVersion {
        self.kraft_version
    }

    /// The voters that granted the election this leadership came out of.
    pub fn granting_voters(&self) -> &BTreeSet<ReplicaId> {
        &self.granting_voters
    }

    pub fn accumulator(&self) -> &A {
        &self.accumulator
    }

    pub fn accumulator_mut(&mut self) -> &mut A {
        &mut self.accumulator
    }

    pub fn local_listeners(&self) -> &Endpoints {
        &self.local_listeners
    }

    pub fn high_watermark(&self) -> Option<LogOffsetMetadata> {
        self.high_watermark
    }

    /// Publish a high watermark once a majority of voters has reached
    /// `high_watermark`. Offsets before the start of this epoch, or behind
    /// the already published watermark, are ignored.
    pub fn maybe_update_high_watermark(&mut self, high_watermark: LogOffsetMetadata) -> bool {
        if high_watermark.offset < self.epoch_start_offset {
            tracing::debug!(
                offset = high_watermark.offset,
                epoch_start_offset = self.epoch_start_offset,
                epoch = self.epoch,
                "not publishing a high watermark before the start of the epoch"
            );
            return false;
        }
        if let Some(current) = self.high_watermark {
            if high_watermark.offset <= current.offset {
                return false;
            }
        }
        self.high_watermark = Some(high_watermark);
        true
    }

    pub fn election(&self) -> ElectionState {
        ElectionState::with_elected_leader(self.epoch, self.local_key.id(), self.voters.voter_ids())
    }

    pub fn can_grant_vote(&self, candidate: &ReplicaKey) -> bool {
        tracing::debug!(
            %candidate,
            epoch = self.epoch,
            "rejecting vote request since we are the leader of this epoch"
        );
        false
    }
}

impl<A> LeaderState<A>
where A: BatchAccumulator
{
    /// Release the accumulator. Idempotent.
    pub fn close(&mut self) -> io::Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.accumulator.close()
    }
}

impl<A> fmt::Display for LeaderState<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Leader(localKey={}, epoch={}, epochStartOffset={}, granting={:?}, hwm={:?})",
            self.local_key, self.epoch, self.epoch_start_offset, self.granting_voters, self.high_watermark,
        )
    }
}
