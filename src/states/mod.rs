//! The per-role states owned by the quorum state manager.
//!
//! The six roles form a closed set, so they are modeled as one tagged
//! variant, [`EpochState`], with a shared operation set. The manager holds
//! exactly one at a time; on every transition the outgoing state is closed
//! and dropped before the new one becomes visible.

use std::fmt;
use std::io;

use crate::election::ElectionState;
use crate::election::Epoch;
use crate::endpoints::Endpoints;
use crate::offset::LogOffsetMetadata;
use crate::replica::ReplicaId;
use crate::replica::ReplicaKey;

mod candidate;
mod follower;
mod leader;
mod resigned;
mod unattached;

#[cfg(test)]
mod follower_test;

pub use candidate::CandidateState;
pub use follower::FollowerState;
pub use leader::LeaderState;
pub use resigned::ResignedState;
pub use unattached::UnattachedState;

/// Accumulator of records appended while leading.
///
/// The leader state owns the accumulator for its epoch and releases it when
/// leadership ends. The manager never looks inside it.
pub trait BatchAccumulator {
    /// Release buffered records and any resources backing them. Called at
    /// most once, when the owning leader state is closed.
    fn close(&mut self) -> io::Result<()>;
}

impl BatchAccumulator for () {
    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// The role tag, used in diagnostics and error reporting.
///
/// `Unattached` covers both the plain and the voted sub-state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleName {
    Unattached,
    Candidate,
    Leader,
    Follower,
    Resigned,
}

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// The active role of a replica in its epoch.
///
/// Generic over the batch accumulator type `A` carried by the leader.
#[derive(Debug)]
pub enum EpochState<A> {
    Unattached(UnattachedState),
    Candidate(CandidateState),
    Leader(LeaderState<A>),
    Follower(FollowerState),
    Resigned(ResignedState),
}

impl<A> EpochState<A> {
    pub fn name(&self) -> RoleName {
        match self {
            EpochState::Unattached(_) => RoleName::Unattached,
            EpochState::Candidate(_) => RoleName::Candidate,
            EpochState::Leader(_) => RoleName::Leader,
            EpochState::Follower(_) => RoleName::Follower,
            EpochState::Resigned(_) => RoleName::Resigned,
        }
    }

    pub fn epoch(&self) -> Epoch {
        match self {
            EpochState::Unattached(s) => s.epoch(),
            EpochState::Candidate(s) => s.epoch(),
            EpochState::Leader(s) => s.epoch(),
            EpochState::Follower(s) => s.epoch(),
            EpochState::Resigned(s) => s.epoch(),
        }
    }

    /// What this role persists in the election store.
    pub fn election(&self) -> ElectionState {
        match self {
            EpochState::Unattached(s) => s.election(),
            EpochState::Candidate(s) => s.election(),
            EpochState::Leader(s) => s.election(),
            EpochState::Follower(s) => s.election(),
            EpochState::Resigned(s) => s.election(),
        }
    }

    /// The leader this role knows of, if any.
    ///
    /// A leader and a resigned ex-leader report themselves; a candidate
    /// reports none even though it has voted.
    pub fn leader_id(&self) -> Option<ReplicaId> {
        match self {
            EpochState::Unattached(s) => s.leader_id(),
            EpochState::Candidate(_) => None,
            EpochState::Leader(s) => Some(s.local_id()),
            EpochState::Follower(s) => Some(s.leader_id()),
            EpochState::Resigned(s) => Some(s.local_id()),
        }
    }

    /// The endpoints of the known leader; empty when no leader is known or
    /// its endpoints have not been discovered.
    pub fn leader_endpoints(&self) -> &Endpoints {
        match self {
            EpochState::Unattached(_) => Endpoints::empty_ref(),
            EpochState::Candidate(_) => Endpoints::empty_ref(),
            EpochState::Leader(s) => s.local_listeners(),
            EpochState::Follower(s) => s.leader_endpoints(),
            EpochState::Resigned(s) => s.local_listeners(),
        }
    }

    pub fn high_watermark(&self) -> Option<LogOffsetMetadata> {
        match self {
            EpochState::Unattached(s) => s.high_watermark(),
            EpochState::Candidate(s) => s.high_watermark(),
            EpochState::Leader(s) => s.high_watermark(),
            EpochState::Follower(s) => s.high_watermark(),
            EpochState::Resigned(_) => None,
        }
    }

    /// Whether this role would grant a vote to `candidate`.
    pub fn can_grant_vote(&self, candidate: &ReplicaKey, log_up_to_date: bool) -> bool {
        match self {
            EpochState::Unattached(s) => s.can_grant_vote(candidate, log_up_to_date),
            EpochState::Candidate(s) => s.can_grant_vote(candidate),
            EpochState::Leader(s) => s.can_grant_vote(candidate),
            EpochState::Follower(s) => s.can_grant_vote(candidate),
            EpochState::Resigned(s) => s.can_grant_vote(candidate),
        }
    }
}

impl<A> EpochState<A>
where A: BatchAccumulator
{
    /// Release role-local resources. Idempotent.
    ///
    /// Only the leader owns resources that can fail to release; the other
    /// roles always succeed.
    pub fn close(&mut self) -> io::Result<()> {
        match self {
            EpochState::Leader(s) => s.close(),
            _ => Ok(()),
        }
    }
}

impl<A> fmt::Display for EpochState<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EpochState::Unattached(s) => fmt::Display::fmt(s, f),
            EpochState::Candidate(s) => fmt::Display::fmt(s, f),
            EpochState::Leader(s) => fmt::Display::fmt(s, f),
            EpochState::Follower(s) => fmt::Display::fmt(s, f),
            EpochState::Resigned(s) => fmt::Display::fmt(s, f),
        }
    }
}
