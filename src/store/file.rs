use std::collections::BTreeSet;
use std::fs;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use anyerror::AnyError;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;
use validit::Validate;

use crate::election::ElectionState;
use crate::election::Epoch;
use crate::error::ErrorSubject;
use crate::error::ErrorVerb;
use crate::error::StorageError;
use crate::replica::ReplicaId;
use crate::replica::ReplicaKey;
use crate::store::QuorumStateStore;
use crate::version::KRaftVersion;

/// The on-disk shape of the election record.
///
/// The voted directory id is stored separately from the voted id so that
/// records written before directory ids existed keep deserializing.
#[derive(Debug, Serialize, Deserialize)]
struct StoredElection {
    version: u16,
    epoch: Epoch,
    leader_id: Option<ReplicaId>,
    voted_id: Option<ReplicaId>,
    voted_directory_id: Option<Uuid>,
    voter_ids: BTreeSet<ReplicaId>,
}

impl StoredElection {
    fn from_election(election: &ElectionState, version: KRaftVersion) -> Self {
        Self {
            version: version.feature_level(),
            epoch: election.epoch(),
            leader_id: election.leader_id(),
            voted_id: election.voted_key().map(|k| k.id()),
            voted_directory_id: election.voted_key().and_then(|k| k.directory_id()),
            voter_ids: election.voter_ids().clone(),
        }
    }

    fn into_election(self) -> ElectionState {
        match (self.voted_id, self.leader_id) {
            (Some(voted_id), _) => {
                let key = match self.voted_directory_id {
                    Some(dir) => ReplicaKey::new(voted_id, dir),
                    None => ReplicaKey::without_directory(voted_id),
                };
                ElectionState::with_voted_candidate(self.epoch, key, self.voter_ids)
            }
            (None, Some(leader_id)) => {
                ElectionState::with_elected_leader(self.epoch, leader_id, self.voter_ids)
            }
            (None, None) => ElectionState::with_unknown_leader(self.epoch, self.voter_ids),
        }
    }
}

/// File-backed [`QuorumStateStore`] keeping the election record as a small
/// JSON document.
///
/// Writes go to a temporary file in the same directory which is fsynced and
/// renamed over the record, then the directory itself is fsynced. Either
/// the old or the new record survives a crash at any point.
#[derive(Debug)]
pub struct FileQuorumStateStore {
    path: PathBuf,
}

impl FileQuorumStateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn read_err(error: &(impl std::error::Error + 'static)) -> StorageError {
        StorageError::new(ErrorSubject::Election, ErrorVerb::Read, AnyError::new(error))
    }

    fn write_err(error: &(impl std::error::Error + 'static)) -> StorageError {
        StorageError::new(ErrorSubject::Election, ErrorVerb::Write, AnyError::new(error))
    }
}

impl QuorumStateStore for FileQuorumStateStore {
    fn read_election_state(&self) -> Result<Option<ElectionState>, StorageError> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Self::read_err(&e)),
        };

        if data.is_empty() {
            return Ok(None);
        }

        let stored: StoredElection = serde_json::from_slice(&data).map_err(|e| Self::read_err(&e))?;
        if stored.voted_id.is_some() && stored.leader_id.is_some() {
            return Err(StorageError::new(
                ErrorSubject::Election,
                ErrorVerb::Read,
                AnyError::error(format!(
                    "corrupt election record in {}: both a leader and a voted candidate in epoch {}",
                    self.path.display(),
                    stored.epoch
                )),
            ));
        }
        let election = stored.into_election();
        debug_assert!(election.validate().is_ok());
        Ok(Some(election))
    }

    fn write_election_state(
        &self,
        election: &ElectionState,
        version: KRaftVersion,
    ) -> Result<(), StorageError> {
        let stored = StoredElection::from_election(election, version);
        let data = serde_json::to_vec(&stored).map_err(|e| Self::write_err(&e))?;

        let temp = self.temp_path();
        let mut file = File::create(&temp).map_err(|e| Self::write_err(&e))?;
        file.write_all(&data).map_err(|e| Self::write_err(&e))?;
        file.sync_all().map_err(|e| Self::write_err(&e))?;
        drop(file);

        fs::rename(&temp, &self.path).map_err(|e| Self::write_err(&e))?;

        if let Some(dir) = self.path.parent() {
            let dir = File::open(dir).map_err(|e| Self::write_err(&e))?;
            dir.sync_all().map_err(|e| Self::write_err(&e))?;
        }
        Ok(())
    }

    fn path(&self) -> &Path {
        &self.path
    }
}
