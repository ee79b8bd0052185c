#![allow(dead_code)]

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use uuid::Uuid;

use raft_quorum::testing::FixedPartitionView;
use raft_quorum::testing::ManualClock;
use raft_quorum::testing::MemoryQuorumStateStore;
use raft_quorum::ElectionState;
use raft_quorum::Endpoints;
use raft_quorum::KRaftVersion;
use raft_quorum::QuorumConfig;
use raft_quorum::QuorumState;
use raft_quorum::ReplicaId;
use raft_quorum::ReplicaKey;
use raft_quorum::SupportedVersionRange;
use raft_quorum::VoterNode;
use raft_quorum::VoterSet;

pub const ELECTION_TIMEOUT_MS: u64 = 1000;
pub const FETCH_TIMEOUT_MS: u64 = 2000;

pub fn voter(id: ReplicaId, dir: Uuid) -> VoterNode {
    VoterNode::new(
        ReplicaKey::new(id, dir),
        Endpoints::single("CONTROLLER", format!("replica-{}:9093", id)),
        SupportedVersionRange::default(),
    )
}

/// A three-member voter set `{1, 2, 3}` where voter `1` has `dir1`.
pub fn three_voters(dir1: Uuid) -> VoterSet {
    VoterSet::new(vec![
        voter(1, dir1),
        voter(2, Uuid::new_v4()),
        voter(3, Uuid::new_v4()),
    ])
}

pub struct Fixture {
    pub quorum: QuorumState,
    pub store: Arc<MemoryQuorumStateStore>,
    pub partition: Arc<FixedPartitionView>,
    pub clock: Arc<ManualClock>,
    pub local_dir: Uuid,
}

pub struct FixtureBuilder {
    local_id: Option<ReplicaId>,
    local_dir: Uuid,
    voters: Option<VoterSet>,
    stored: Option<ElectionState>,
    election_timeout_ms: u64,
}

impl FixtureBuilder {
    pub fn new(local_id: Option<ReplicaId>) -> Self {
        Self {
            local_id,
            local_dir: Uuid::new_v4(),
            voters: None,
            stored: None,
            election_timeout_ms: ELECTION_TIMEOUT_MS,
        }
    }

    pub fn local_dir(mut self, dir: Uuid) -> Self {
        self.local_dir = dir;
        self
    }

    pub fn voters(mut self, voters: VoterSet) -> Self {
        self.voters = Some(voters);
        self
    }

    pub fn stored_election(mut self, election: ElectionState) -> Self {
        self.stored = Some(election);
        self
    }

    pub fn election_timeout_ms(mut self, timeout: u64) -> Self {
        self.election_timeout_ms = timeout;
        self
    }

    pub fn build(self) -> Fixture {
        let store = match self.stored {
            Some(election) => Arc::new(MemoryQuorumStateStore::with_election(
                election,
                KRaftVersion::V1,
            )),
            None => Arc::new(MemoryQuorumStateStore::new()),
        };
        let voters = self.voters.unwrap_or_else(|| three_voters(self.local_dir));
        build_with_store(
            self.local_id,
            self.local_dir,
            voters,
            store,
            self.election_timeout_ms,
        )
    }
}

pub fn build_with_store(
    local_id: Option<ReplicaId>,
    local_dir: Uuid,
    voters: VoterSet,
    store: Arc<MemoryQuorumStateStore>,
    election_timeout_ms: u64,
) -> Fixture {
    let clock = Arc::new(ManualClock::new());
    let partition = Arc::new(FixedPartitionView::new(voters, KRaftVersion::V1));
    let config = QuorumConfig {
        election_timeout_ms,
        fetch_timeout_ms: FETCH_TIMEOUT_MS,
    };
    let quorum: QuorumState = QuorumState::new(
        local_id,
        local_dir,
        partition.clone(),
        Endpoints::single("CONTROLLER", "replica-local:9093"),
        SupportedVersionRange::default(),
        &config,
        store.clone(),
        clock.clone(),
        StdRng::seed_from_u64(23),
    );
    Fixture {
        quorum,
        store,
        partition,
        clock,
        local_dir,
    }
}
