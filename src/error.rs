use std::fmt;

use anyerror::AnyError;

use crate::election::ElectionState;
use crate::election::Epoch;
use crate::replica::ReplicaId;
use crate::replica::ReplicaKey;
use crate::states::RoleName;

/// What the store was operating on when an error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSubject {
    /// The election record itself.
    Election,
    /// The backing store as a whole.
    Store,
}

impl fmt::Display for ErrorSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// What the store was doing when an error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorVerb {
    Read,
    Write,
}

impl fmt::Display for ErrorVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Error raised by the quorum state store.
///
/// A write failure is surfaced before the in-memory state is swapped, so
/// the manager is left on its previous state and the caller decides whether
/// to retry or abort.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("storage error: when {verb} {subject}: {source}")]
pub struct StorageError {
    subject: ErrorSubject,
    verb: ErrorVerb,
    source: AnyError,
}

impl StorageError {
    pub fn new(subject: ErrorSubject, verb: ErrorVerb, source: AnyError) -> Self {
        Self {
            subject,
            verb,
            source,
        }
    }

    pub fn from_io_error(subject: ErrorSubject, verb: ErrorVerb, error: &std::io::Error) -> Self {
        Self::new(subject, verb, AnyError::new(error))
    }

    pub fn subject(&self) -> ErrorSubject {
        self.subject
    }

    pub fn verb(&self) -> ErrorVerb {
        self.verb
    }
}

/// Errors raised by [`QuorumState`](crate::QuorumState) operations.
///
/// Every variant except `Storage` reports a violated precondition and is
/// treated by callers as a programming bug; the active state is unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuorumError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The stored election record carries a vote but the replica has no
    /// voting identity. The replica cannot start.
    #[error("initialized quorum state ({election}) with a voted candidate but without a local id")]
    VotedWithoutLocalId { election: ElectionState },

    #[error("cannot transition to {target} with epoch {epoch} from current state {current}")]
    NonMonotonicEpoch {
        target: RoleName,
        epoch: Epoch,
        current: String,
    },

    #[error("cannot transition to voted for {candidate} and epoch {epoch} since it matches the local id")]
    VoteForSelf { candidate: ReplicaKey, epoch: Epoch },

    #[error("cannot transition to {target} without a local replica id")]
    LocalIdRequired { target: RoleName },

    #[error("cannot transition to follower with leader {leader_id} and epoch {epoch} since it matches the local id")]
    FollowSelf { leader_id: ReplicaId, epoch: Epoch },

    #[error("cannot transition to follower with leader {leader_id} and epoch {epoch} without a leader endpoint")]
    MissingLeaderEndpoints { leader_id: ReplicaId, epoch: Epoch },

    #[error("cannot transition to {target} from current state {current}")]
    InvalidTransition { target: RoleName, current: String },

    #[error("cannot transition to {target} since the local replica is not one of the voters {voters}")]
    NotVoter { target: RoleName, voters: String },

    #[error("cannot become leader without majority votes granted")]
    VotesNotGranted,

    /// A checked state projection found a different role active.
    #[error("expected to be {expected}, but the current state is {current}")]
    UnexpectedRole { expected: RoleName, current: String },
}
