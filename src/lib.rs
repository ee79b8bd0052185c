//! Quorum state management for a Raft-style replicated log.
//!
//! This crate owns a replica's role in its epoch, enforces the legal
//! transitions between roles, and persists the election decisions a replica
//! must never forget across restarts: which epoch it is in, whom it voted
//! for, and which leader it follows.
//!
//! The central type is [`QuorumState`]. It holds exactly one active
//! [`EpochState`] at a time and is the single gate through which every vote,
//! election timeout and leader discovery must pass before the surrounding
//! Raft engine acts on it.
//!
//! # Roles and transitions
//!
//! A replica that is a member of the latest voter set (a **voter**) moves
//! through the full state machine:
//!
//! - `Resigned` transitions to `Unattached` (new election with a higher
//!   epoch), `Candidate` (election timeout expired) or `Follower` (leader
//!   discovered with an equal or larger epoch).
//! - `Unattached` transitions to `Unattached` (higher epoch, or after
//!   voting), `Candidate` or `Follower`.
//! - `Candidate` transitions to `Unattached`, `Candidate` (election timeout,
//!   bumping the retry counter) or `Leader` (majority of votes granted).
//! - `Leader` transitions to `Unattached` (higher epoch) or `Resigned`
//!   (graceful shutdown).
//! - `Follower` transitions to `Unattached`, `Candidate` (fetch timeout) or
//!   `Follower` (leader with a larger epoch, or more complete endpoints).
//!
//! A replica outside the voter set (an **observer**) is restricted to the
//! `Unattached` / `Follower` subgraph and never votes, campaigns or resigns.
//!
//! # Durability
//!
//! Every transition that must survive a crash (voting, advancing the epoch,
//! electing or following a leader) is written to the [`QuorumStateStore`]
//! before it becomes observable. Entering `Resigned` is the one soft
//! transition: the durable epoch plus the initialization rules reconstruct
//! it after a restart.
//!
//! # Concurrency
//!
//! All mutations are driven by a single engine thread through `&mut self`
//! methods. Reporter threads observe the manager through the
//! [`QuorumMetrics`] watch channel returned by [`QuorumState::metrics`],
//! which is replaced atomically after every completed transition.

mod clock;
mod config;
mod election;
mod endpoints;
mod error;
mod metrics;
mod offset;
mod partition;
mod quorum_state;
mod replica;
mod states;
mod store;
pub mod testing;
mod version;
mod voters;


pub use clock::Clock;
pub use clock::SystemClock;
pub use config::ConfigError;
pub use config::QuorumConfig;
pub use election::ElectionState;
pub use election::Epoch;
pub use endpoints::Endpoints;
pub use error::ErrorSubject;
pub use error::ErrorVerb;
pub use error::QuorumError;
pub use error::StorageError;
pub use metrics::LeaderAndEpoch;
pub use metrics::QuorumMetrics;
pub use offset::LogOffsetMetadata;
pub use offset::OffsetAndEpoch;
pub use partition::PartitionView;
pub use quorum_state::QuorumState;
pub use replica::ReplicaId;
pub use replica::ReplicaKey;
pub use states::BatchAccumulator;
pub use states::CandidateState;
pub use states::EpochState;
pub use states::FollowerState;
pub use states::LeaderState;
pub use states::ResignedState;
pub use states::RoleName;
pub use states::UnattachedState;
pub use store::FileQuorumStateStore;
pub use store::QuorumStateStore;
pub use version::KRaftVersion;
pub use version::SupportedVersionRange;
pub use voters::VoterNode;
pub use voters::VoterSet;
