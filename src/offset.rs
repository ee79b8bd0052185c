use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::election::Epoch;

/// The end position of the local log: the next offset to be written and the
/// epoch of the last written record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OffsetAndEpoch {
    pub offset: u64,
    pub epoch: Epoch,
}

impl OffsetAndEpoch {
    pub fn new(offset: u64, epoch: Epoch) -> Self {
        Self { offset, epoch }
    }
}

impl fmt::Display for OffsetAndEpoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(offset={}, epoch={})", self.offset, self.epoch)
    }
}

/// A log offset as tracked for the high watermark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LogOffsetMetadata {
    pub offset: u64,
}

impl LogOffsetMetadata {
    pub fn new(offset: u64) -> Self {
        Self { offset }
    }
}

impl fmt::Display for LogOffsetMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.offset)
    }
}
