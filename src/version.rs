use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// Version of the replication protocol active for the partition.
///
/// `V0` predates dynamic voter sets and directory ids; `V1` introduces
/// both. The active version is established by a control record in the log
/// and read through [`PartitionView`](crate::PartitionView).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum KRaftVersion {
    #[default]
    V0,
    V1,
}

impl KRaftVersion {
    /// The feature level written to storage for this version.
    pub fn feature_level(&self) -> u16 {
        match self {
            KRaftVersion::V0 => 0,
            KRaftVersion::V1 => 1,
        }
    }

    pub fn from_feature_level(level: u16) -> Option<Self> {
        match level {
            0 => Some(KRaftVersion::V0),
            1 => Some(KRaftVersion::V1),
            _ => None,
        }
    }
}

impl fmt::Display for KRaftVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.feature_level())
    }
}

/// The inclusive range of protocol feature levels a replica can speak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportedVersionRange {
    pub min: u16,
    pub max: u16,
}

impl SupportedVersionRange {
    pub fn new(min: u16, max: u16) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, version: KRaftVersion) -> bool {
        let level = version.feature_level();
        self.min <= level && level <= self.max
    }
}

impl Default for SupportedVersionRange {
    fn default() -> Self {
        Self { min: 0, max: 1 }
    }
}

impl fmt::Display for SupportedVersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}
