use std::collections::BTreeSet;
use std::error::Error;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use validit::Validate;

use crate::replica::ReplicaId;
use crate::replica::ReplicaKey;

/// A leader term. Monotonically non-decreasing across the life of the
/// cluster partition.
pub type Epoch = u32;

/// The durable record of an election decision.
///
/// This is what the quorum state store persists for a replica: the epoch,
/// and either the leader it knows of or the candidate it voted for, never
/// both. The voter ids are a cached snapshot kept for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionState {
    epoch: Epoch,
    leader_id: Option<ReplicaId>,
    voted_key: Option<ReplicaKey>,
    voter_ids: BTreeSet<ReplicaId>,
}

impl ElectionState {
    /// An epoch in which no leader is known and no vote has been cast.
    pub fn with_unknown_leader(epoch: Epoch, voter_ids: BTreeSet<ReplicaId>) -> Self {
        Self {
            epoch,
            leader_id: None,
            voted_key: None,
            voter_ids,
        }
    }

    pub fn with_elected_leader(
        epoch: Epoch,
        leader_id: ReplicaId,
        voter_ids: BTreeSet<ReplicaId>,
    ) -> Self {
        Self {
            epoch,
            leader_id: Some(leader_id),
            voted_key: None,
            voter_ids,
        }
    }

    pub fn with_voted_candidate(
        epoch: Epoch,
        voted_key: ReplicaKey,
        voter_ids: BTreeSet<ReplicaId>,
    ) -> Self {
        Self {
            epoch,
            leader_id: None,
            voted_key: Some(voted_key),
            voter_ids,
        }
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    pub fn leader_id(&self) -> Option<ReplicaId> {
        self.leader_id
    }

    /// The known leader id, or `-1` when no leader is known.
    pub fn leader_id_or_sentinel(&self) -> ReplicaId {
        self.leader_id.unwrap_or(-1)
    }

    pub fn voted_key(&self) -> Option<&ReplicaKey> {
        self.voted_key.as_ref()
    }

    pub fn voter_ids(&self) -> &BTreeSet<ReplicaId> {
        &self.voter_ids
    }

    pub fn has_leader(&self) -> bool {
        self.leader_id.is_some()
    }

    pub fn has_voted(&self) -> bool {
        self.voted_key.is_some()
    }

    pub fn is_leader(&self, id: ReplicaId) -> bool {
        self.leader_id == Some(id)
    }

    /// Whether the recorded vote refers to `candidate`, honoring the
    /// directory-id wildcard of pre-upgrade votes.
    pub fn is_voted_candidate(&self, candidate: &ReplicaKey) -> bool {
        match &self.voted_key {
            Some(voted) => voted.matches(candidate),
            None => false,
        }
    }
}

impl Validate for ElectionState {
    fn validate(&self) -> Result<(), Box<dyn Error>> {
        if self.leader_id.is_some() && self.voted_key.is_some() {
            return Err(format!(
                "election state carries both a leader ({}) and a voted candidate ({}) in epoch {}",
                self.leader_id_or_sentinel(),
                self.voted_key.as_ref().map(|k| k.to_string()).unwrap_or_default(),
                self.epoch
            )
            .into());
        }
        Ok(())
    }
}

impl fmt::Display for ElectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Election(epoch={}, leader=", self.epoch)?;
        match self.leader_id {
            Some(id) => write!(f, "{}", id)?,
            None => write!(f, "None")?,
        }
        write!(f, ", voted=")?;
        match &self.voted_key {
            Some(key) => write!(f, "{}", key)?,
            None => write!(f, "None")?,
        }
        write!(f, ", voters={:?})", self.voter_ids)
    }
}
