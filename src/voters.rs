use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::endpoints::Endpoints;
use crate::replica::ReplicaId;
use crate::replica::ReplicaKey;
use crate::version::SupportedVersionRange;

/// One member of the voter set: its storage identity, advertised endpoints
/// and the protocol versions it can speak.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoterNode {
    key: ReplicaKey,
    listeners: Endpoints,
    supported_version: SupportedVersionRange,
}

impl VoterNode {
    pub fn new(key: ReplicaKey, listeners: Endpoints, supported_version: SupportedVersionRange) -> Self {
        Self {
            key,
            listeners,
            supported_version,
        }
    }

    pub fn key(&self) -> &ReplicaKey {
        &self.key
    }

    pub fn listeners(&self) -> &Endpoints {
        &self.listeners
    }

    pub fn supported_version(&self) -> SupportedVersionRange {
        self.supported_version
    }
}

/// The authoritative set of replicas currently eligible to vote,
/// established by a control record in the log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoterSet {
    voters: BTreeMap<ReplicaId, VoterNode>,
}

impl VoterSet {
    pub fn new(nodes: impl IntoIterator<Item = VoterNode>) -> Self {
        Self {
            voters: nodes.into_iter().map(|n| (n.key.id(), n)).collect(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.voters.is_empty()
    }

    pub fn len(&self) -> usize {
        self.voters.len()
    }

    /// Membership by full replica key, honoring the directory-id wildcard
    /// for voter sets recorded before directory ids existed.
    pub fn is_voter(&self, key: &ReplicaKey) -> bool {
        match self.voters.get(&key.id()) {
            Some(node) => node.key.matches(key),
            None => false,
        }
    }

    /// Membership by id only.
    pub fn is_voter_id(&self, id: ReplicaId) -> bool {
        self.voters.contains_key(&id)
    }

    /// Whether `key` is the single member of the voter set.
    pub fn is_only_voter(&self, key: &ReplicaKey) -> bool {
        self.voters.len() == 1 && self.is_voter(key)
    }

    pub fn voter_ids(&self) -> BTreeSet<ReplicaId> {
        self.voters.keys().copied().collect()
    }

    /// The endpoints advertised by the voter with `id`; empty if the id is
    /// not a voter or advertises no endpoints.
    pub fn listeners(&self, id: ReplicaId) -> Endpoints {
        self.voters.get(&id).map(|n| n.listeners.clone()).unwrap_or_default()
    }

    pub fn get(&self, id: ReplicaId) -> Option<&VoterNode> {
        self.voters.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &VoterNode> {
        self.voters.values()
    }
}

impl fmt::Display for VoterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, node) in self.voters.values().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", node.key)?;
        }
        write!(f, "]")
    }
}
