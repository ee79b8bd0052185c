//! Durable storage of the election record.

use std::fmt::Debug;
use std::path::Path;

use crate::election::ElectionState;
use crate::error::StorageError;
use crate::version::KRaftVersion;

mod file;

#[cfg(test)]
mod file_test;

pub use file::FileQuorumStateStore;

/// A durable single-record store for the replica's election state.
///
/// Writes must be atomic and synchronously durable before returning: the
/// manager swaps its in-memory role only after a successful write, and a
/// crash at any point must recover either the previous or the new record,
/// never a mix.
pub trait QuorumStateStore: Debug + Send + Sync {
    /// The stored election state; `None` if nothing has been written yet.
    fn read_election_state(&self) -> Result<Option<ElectionState>, StorageError>;

    /// Persist `election` under the given protocol version.
    fn write_election_state(
        &self,
        election: &ElectionState,
        version: KRaftVersion,
    ) -> Result<(), StorageError>;

    /// Where the record lives, for diagnostics.
    fn path(&self) -> &Path;
}
