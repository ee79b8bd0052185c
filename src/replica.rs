use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Identifier of a replica within the cluster.
///
/// Negative values are never valid replica ids; `-1` is used as a sentinel
/// in diagnostic accessors only.
pub type ReplicaId = i32;

/// Identity of one storage incarnation of a replica.
///
/// The directory id distinguishes a reformatted replica from its
/// predecessor at the same id: two keys with the same id but different
/// directory ids are different replicas. A key without a directory id was
/// recorded before directory ids existed and matches any incarnation of the
/// same id.
#[derive(Debug, Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReplicaKey {
    id: ReplicaId,
    directory_id: Option<Uuid>,
}

impl ReplicaKey {
    pub fn new(id: ReplicaId, directory_id: Uuid) -> Self {
        Self {
            id,
            directory_id: Some(directory_id),
        }
    }

    /// A key recorded without a directory id.
    pub fn without_directory(id: ReplicaId) -> Self {
        Self {
            id,
            directory_id: None,
        }
    }

    pub fn id(&self) -> ReplicaId {
        self.id
    }

    pub fn directory_id(&self) -> Option<Uuid> {
        self.directory_id
    }

    /// Whether this recorded key refers to `other`.
    ///
    /// Ids must be equal. A recorded key without a directory id matches any
    /// directory id; a recorded key with a directory id requires an exact
    /// match.
    pub fn matches(&self, other: &ReplicaKey) -> bool {
        if self.id != other.id {
            return false;
        }
        match self.directory_id {
            None => true,
            Some(dir) => other.directory_id == Some(dir),
        }
    }
}

impl fmt::Display for ReplicaKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.directory_id {
            Some(dir) => write!(f, "{}-{}", self.id, dir),
            None => write!(f, "{}", self.id),
        }
    }
}
