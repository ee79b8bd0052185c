use std::fmt;

use crate::election::Epoch;
use crate::offset::LogOffsetMetadata;
use crate::replica::ReplicaId;
use crate::replica::ReplicaKey;
use crate::states::RoleName;

/// The pair every consumer of quorum state ultimately cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeaderAndEpoch {
    pub leader_id: Option<ReplicaId>,
    pub epoch: Epoch,
}

impl LeaderAndEpoch {
    pub fn new(leader_id: Option<ReplicaId>, epoch: Epoch) -> Self {
        Self { leader_id, epoch }
    }

    pub fn is_leader(&self, id: ReplicaId) -> bool {
        self.leader_id == Some(id)
    }
}

impl fmt::Display for LeaderAndEpoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.leader_id {
            Some(id) => write!(f, "LeaderAndEpoch(leader={}, epoch={})", id, self.epoch),
            None => write!(f, "LeaderAndEpoch(leader=None, epoch={})", self.epoch),
        }
    }
}

/// An immutable snapshot of the active role, published through a watch
/// channel after every completed transition.
///
/// This is the only surface other threads may observe; they never touch the
/// role state itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuorumMetrics {
    pub role: RoleName,
    pub epoch: Epoch,
    pub leader_id: Option<ReplicaId>,
    pub voted_key: Option<ReplicaKey>,
    pub high_watermark: Option<LogOffsetMetadata>,
}

impl QuorumMetrics {
    pub fn leader_and_epoch(&self) -> LeaderAndEpoch {
        LeaderAndEpoch::new(self.leader_id, self.epoch)
    }
}

impl Default for QuorumMetrics {
    fn default() -> Self {
        Self {
            role: RoleName::Unattached,
            epoch: 0,
            leader_id: None,
            voted_key: None,
            high_watermark: None,
        }
    }
}

impl fmt::Display for QuorumMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "QuorumMetrics(role={}, epoch={}, leader={:?}, hwm={:?})",
            self.role, self.epoch, self.leader_id, self.high_watermark
        )
    }
}
