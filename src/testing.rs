//! Test doubles for the manager's injected collaborators.
//!
//! These are exported so that engines embedding the crate can reuse them in
//! their own tests: an in-memory store, a partition view with fixed
//! answers, and a hand-driven clock.

use std::path::Path;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;
use std::time::Instant;

use anyerror::AnyError;

use crate::clock::Clock;
use crate::election::ElectionState;
use crate::error::ErrorSubject;
use crate::error::ErrorVerb;
use crate::error::StorageError;
use crate::partition::PartitionView;
use crate::store::QuorumStateStore;
use crate::version::KRaftVersion;
use crate::voters::VoterSet;

/// In-memory [`QuorumStateStore`].
///
/// Writes can be made to fail on demand to exercise the storage-error
/// paths.
#[derive(Debug)]
pub struct MemoryQuorumStateStore {
    path: PathBuf,
    record: Mutex<Option<(ElectionState, KRaftVersion)>>,
    fail_writes: Mutex<bool>,
}

impl Default for MemoryQuorumStateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryQuorumStateStore {
    pub fn new() -> Self {
        Self {
            path: PathBuf::from("<memory>"),
            record: Mutex::new(None),
            fail_writes: Mutex::new(false),
        }
    }

    /// Seed the store with a pre-existing record, as if a previous
    /// incarnation had written it.
    pub fn with_election(election: ElectionState, version: KRaftVersion) -> Self {
        let store = Self::new();
        *store.record.lock().unwrap() = Some((election, version));
        store
    }

    pub fn set_fail_writes(&self, fail: bool) {
        *self.fail_writes.lock().unwrap() = fail;
    }

    /// The version recorded with the last write.
    pub fn last_written_version(&self) -> Option<KRaftVersion> {
        self.record.lock().unwrap().as_ref().map(|(_, v)| *v)
    }
}

impl QuorumStateStore for MemoryQuorumStateStore {
    fn read_election_state(&self) -> Result<Option<ElectionState>, StorageError> {
        Ok(self.record.lock().unwrap().as_ref().map(|(e, _)| e.clone()))
    }

    fn write_election_state(
        &self,
        election: &ElectionState,
        version: KRaftVersion,
    ) -> Result<(), StorageError> {
        if *self.fail_writes.lock().unwrap() {
            return Err(StorageError::new(
                ErrorSubject::Election,
                ErrorVerb::Write,
                AnyError::error("injected write failure"),
            ));
        }
        *self.record.lock().unwrap() = Some((election.clone(), version));
        Ok(())
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

/// A [`PartitionView`] with fixed answers, updatable mid-test to model
/// voter-set reconfiguration.
#[derive(Debug)]
pub struct FixedPartitionView {
    voters: Mutex<VoterSet>,
    voters_offset: Mutex<Option<u64>>,
    version: Mutex<KRaftVersion>,
}

impl FixedPartitionView {
    pub fn new(voters: VoterSet, version: KRaftVersion) -> Self {
        Self {
            voters: Mutex::new(voters),
            voters_offset: Mutex::new(None),
            version: Mutex::new(version),
        }
    }

    pub fn set_voter_set(&self, voters: VoterSet, offset: Option<u64>) {
        *self.voters.lock().unwrap() = voters;
        *self.voters_offset.lock().unwrap() = offset;
    }

    pub fn set_kraft_version(&self, version: KRaftVersion) {
        *self.version.lock().unwrap() = version;
    }
}

impl PartitionView for FixedPartitionView {
    fn last_voter_set(&self) -> VoterSet {
        self.voters.lock().unwrap().clone()
    }

    fn last_voter_set_offset(&self) -> Option<u64> {
        *self.voters_offset.lock().unwrap()
    }

    fn last_kraft_version(&self) -> KRaftVersion {
        *self.version.lock().unwrap()
    }
}

/// A [`Clock`] that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<Instant>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Mutex::new(Instant::now()),
        }
    }

    pub fn advance(&self, duration: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += duration;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock().unwrap()
    }
}
