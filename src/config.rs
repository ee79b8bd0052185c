//! Quorum runtime configuration.

use clap::Parser;

/// Timing configuration of the quorum state manager.
///
/// The struct is a `clap` parser so an embedding binary can splice these
/// flags into its own command line:
///
/// ```
/// # use raft_quorum::QuorumConfig;
/// let config = QuorumConfig {
///     election_timeout_ms: 1000,
///     fetch_timeout_ms: 2000,
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Parser)]
pub struct QuorumConfig {
    /// Base election timeout in milliseconds.
    ///
    /// Actual timeouts are drawn uniformly from `[base, 2*base)` so that
    /// replicas do not campaign in lockstep. A base of `0` disables the
    /// randomization and produces immediate timeouts, which is only useful
    /// in tests.
    #[clap(long, env = "RAFT_ELECTION_TIMEOUT_MS", default_value = "1000")]
    pub election_timeout_ms: u64,

    /// How long a follower waits without progress from the leader before it
    /// considers the leader lost, in milliseconds.
    #[clap(long, env = "RAFT_FETCH_TIMEOUT_MS", default_value = "2000")]
    pub fetch_timeout_ms: u64,
}

impl Default for QuorumConfig {
    fn default() -> Self {
        <Self as Parser>::parse_from(Vec::<&'static str>::new())
    }
}

impl QuorumConfig {
    /// Validate the config and return it on success.
    pub fn validate(self) -> Result<QuorumConfig, ConfigError> {
        if self.fetch_timeout_ms == 0 {
            return Err(ConfigError::FetchTimeoutIs0);
        }

        if self.election_timeout_ms > 0 && self.fetch_timeout_ms < self.election_timeout_ms {
            return Err(ConfigError::FetchTimeoutLTElectionTimeout {
                fetch_timeout_ms: self.fetch_timeout_ms,
                election_timeout_ms: self.election_timeout_ms,
            });
        }

        Ok(self)
    }
}

/// Error variants related to configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A follower with a zero fetch timeout would campaign on every poll.
    #[error("fetch_timeout_ms must be > 0")]
    FetchTimeoutIs0,

    /// Followers must outlast at least one election timeout before they
    /// give up on a leader.
    #[error("fetch_timeout_ms({fetch_timeout_ms}) must be >= election_timeout_ms({election_timeout_ms})")]
    FetchTimeoutLTElectionTimeout {
        fetch_timeout_ms: u64,
        election_timeout_ms: u64,
    },
}
