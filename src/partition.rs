use std::fmt::Debug;

use crate::version::KRaftVersion;
use crate::voters::VoterSet;

/// Read access to the partition control-record state machine.
///
/// The control records in the log establish the authoritative voter set and
/// the active protocol version; this trait exposes the latest of each. The
/// quorum state manager queries it at every transition and never caches the
/// answers.
pub trait PartitionView: Debug + Send + Sync {
    /// The latest voter set found in the log.
    fn last_voter_set(&self) -> VoterSet;

    /// The log offset at which the latest voter set was established, if it
    /// came from a control record rather than the bootstrap configuration.
    fn last_voter_set_offset(&self) -> Option<u64>;

    /// The protocol version currently in effect.
    fn last_kraft_version(&self) -> KRaftVersion;
}
