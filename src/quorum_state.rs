use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::Rng;
use tokio::sync::watch;
use uuid::Uuid;
use validit::Validate;

use crate::clock::Clock;
use crate::config::QuorumConfig;
use crate::election::ElectionState;
use crate::election::Epoch;
use crate::endpoints::Endpoints;
use crate::error::QuorumError;
use crate::metrics::LeaderAndEpoch;
use crate::metrics::QuorumMetrics;
use crate::offset::LogOffsetMetadata;
use crate::offset::OffsetAndEpoch;
use crate::partition::PartitionView;
use crate::replica::ReplicaId;
use crate::replica::ReplicaKey;
use crate::states::BatchAccumulator;
use crate::states::CandidateState;
use crate::states::EpochState;
use crate::states::FollowerState;
use crate::states::LeaderState;
use crate::states::ResignedState;
use crate::states::RoleName;
use crate::states::UnattachedState;
use crate::store::QuorumStateStore;
use crate::version::SupportedVersionRange;
use crate::voters::VoterNode;

/// The quorum state manager: owner of the replica's role in its epoch.
///
/// The manager validates every transition against the current role,
/// persists the ones that must survive a crash before they become
/// observable, and exposes typed accessors over the single active
/// [`EpochState`]. It is driven by one engine thread; all transition
/// methods take `&mut self` and run to completion. It does not drive
/// timers, does not decide when to start elections and does not count
/// votes.
///
/// Collaborators are injected at construction: the durable election store,
/// the partition view that knows the latest voter set and protocol version,
/// the time source and the randomness used for election timeouts.
pub struct QuorumState<A = ()> {
    local_id: Option<ReplicaId>,
    local_directory_id: Uuid,
    partition_state: Arc<dyn PartitionView>,
    local_listeners: Endpoints,
    local_supported_version: SupportedVersionRange,
    election_timeout_ms: u64,
    fetch_timeout_ms: u64,
    store: Arc<dyn QuorumStateStore>,
    clock: Arc<dyn Clock>,
    rng: StdRng,
    state: Option<EpochState<A>>,
    metrics_tx: watch::Sender<QuorumMetrics>,
}

impl<A> QuorumState<A>
where A: BatchAccumulator
{
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        local_id: Option<ReplicaId>,
        local_directory_id: Uuid,
        partition_state: Arc<dyn PartitionView>,
        local_listeners: Endpoints,
        local_supported_version: SupportedVersionRange,
        config: &QuorumConfig,
        store: Arc<dyn QuorumStateStore>,
        clock: Arc<dyn Clock>,
        rng: StdRng,
    ) -> Self {
        let (metrics_tx, _) = watch::channel(QuorumMetrics::default());
        Self {
            local_id,
            local_directory_id,
            partition_state,
            local_listeners,
            local_supported_version,
            election_timeout_ms: config.election_timeout_ms,
            fetch_timeout_ms: config.fetch_timeout_ms,
            store,
            clock,
            rng,
            state: None,
            metrics_tx,
        }
    }

    /// Select and install the initial role from the durable election record,
    /// reconciled against the end of the local log.
    ///
    /// We initialize in whatever state we were in on shutdown. An election
    /// may have happened in the meantime; the replica finds out about it
    /// through the first vote or begin-epoch exchange.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn initialize(&mut self, log_end: OffsetAndEpoch) -> Result<(), QuorumError> {
        let voters = self.partition_state.last_voter_set();
        let election = match self.store.read_election_state()? {
            Some(election) => election,
            None => ElectionState::with_unknown_leader(0, voters.voter_ids()),
        };

        let local_key = self.local_replica_key();
        if election.has_voted() && local_key.is_none() {
            return Err(QuorumError::VotedWithoutLocalId { election });
        }

        let now = self.clock.now();
        let election_timeout = Duration::from_millis(self.random_election_timeout());
        let fetch_timeout = Duration::from_millis(self.fetch_timeout_ms);

        let initial_state = if election.epoch() < log_end.epoch {
            // The log saw a higher epoch than the store recorded, which can
            // happen when the quorum file write raced a crash. Trust the log.
            tracing::warn!(
                store = %self.store.path().display(),
                stored_epoch = election.epoch(),
                log_epoch = log_end.epoch,
                "epoch from the quorum store is smaller than the last epoch written to the log"
            );
            EpochState::Unattached(UnattachedState::new(
                now,
                log_end.epoch,
                None,
                None,
                voters.voter_ids(),
                None,
                Some(election_timeout),
            ))
        } else if let Some(local) = local_key.filter(|k| election.is_leader(k.id())) {
            // A restarted ex-leader starts out resigned in its old epoch.
            // That keeps it from voting for another leader in the same
            // epoch, and from re-assigning offsets that an unflushed log
            // tail may already have claimed.
            EpochState::Resigned(ResignedState::new(
                now,
                local.id(),
                election.epoch(),
                voters.voter_ids(),
                election_timeout,
                Vec::new(),
                self.local_listeners.clone(),
            ))
        } else if let Some(local) = local_key.filter(|k| election.is_voted_candidate(k)) {
            EpochState::Candidate(CandidateState::new(
                now,
                local,
                election.epoch(),
                voters,
                None,
                1,
                election_timeout,
            ))
        } else if election.has_voted() {
            EpochState::Unattached(UnattachedState::new(
                now,
                election.epoch(),
                None,
                election.voted_key().copied(),
                voters.voter_ids(),
                None,
                Some(election_timeout),
            ))
        } else if let Some(leader_id) = election.leader_id() {
            let leader_endpoints = voters.listeners(leader_id);
            if leader_endpoints.is_empty() {
                // Without endpoints the replica cannot fetch from the
                // leader. Fall back to unattached, remembering the leader
                // id, and rediscover the endpoints through the bootstrap
                // servers or a begin-epoch request from the leader.
                tracing::info!(
                    %election,
                    voters = %voters,
                    "the stored leader is not a member of the latest voter set; \
                     starting unattached instead of following"
                );
                EpochState::Unattached(UnattachedState::new(
                    now,
                    election.epoch(),
                    Some(leader_id),
                    None,
                    voters.voter_ids(),
                    None,
                    Some(election_timeout),
                ))
            } else {
                EpochState::Follower(FollowerState::new(
                    now,
                    election.epoch(),
                    leader_id,
                    leader_endpoints,
                    voters.voter_ids(),
                    None,
                    fetch_timeout,
                ))
            }
        } else {
            EpochState::Unattached(UnattachedState::new(
                now,
                election.epoch(),
                None,
                None,
                voters.voter_ids(),
                None,
                Some(election_timeout),
            ))
        };

        self.durable_transition(initial_state)
    }

    /// Leave leadership without leaving the epoch, announcing the
    /// successors this replica would prefer.
    ///
    /// This is the one soft transition: nothing is persisted, and a restart
    /// reconstructs the state from the durable election record alone.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn transition_to_resigned(
        &mut self,
        preferred_successors: Vec<ReplicaKey>,
    ) -> Result<(), QuorumError> {
        if !self.is_leader() {
            return Err(QuorumError::InvalidTransition {
                target: RoleName::Resigned,
                current: self.describe(),
            });
        }
        let local_id = match self.local_id {
            Some(id) => id,
            None => return Err(QuorumError::LocalIdRequired { target: RoleName::Resigned }),
        };

        let epoch = self.epoch();
        let election_timeout = Duration::from_millis(self.random_election_timeout());
        let now = self.clock.now();
        let voter_ids = self.partition_state.last_voter_set().voter_ids();

        self.memory_transition(EpochState::Resigned(ResignedState::new(
            now,
            local_id,
            epoch,
            voter_ids,
            election_timeout,
            preferred_successors,
            self.local_listeners.clone(),
        )));
        Ok(())
    }

    /// Move to a higher epoch without knowing its leader.
    ///
    /// A candidate or an already unattached replica keeps its remaining
    /// election time, so that bumping epochs does not keep extending the
    /// timer; an observer gets no timer at all.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn transition_to_unattached(&mut self, epoch: Epoch) -> Result<(), QuorumError> {
        let current_epoch = self.epoch();
        if epoch <= current_epoch {
            return Err(QuorumError::NonMonotonicEpoch {
                target: RoleName::Unattached,
                epoch,
                current: self.describe(),
            });
        }

        let now = self.clock.now();
        let election_timeout = if self.is_observer() {
            None
        } else if self.is_candidate() {
            Some(self.candidate_state()?.remaining_election_time(now))
        } else if self.is_unattached() {
            self.unattached_state()?.remaining_election_time(now)
        } else {
            Some(Duration::from_millis(self.random_election_timeout()))
        };

        let high_watermark = self.high_watermark();
        let voter_ids = self.partition_state.last_voter_set().voter_ids();

        self.durable_transition(EpochState::Unattached(UnattachedState::new(
            now,
            epoch,
            None,
            None,
            voter_ids,
            high_watermark,
            election_timeout,
        )))
    }

    /// Grant a vote to a candidate, staying unattached.
    ///
    /// The replica does not begin fetching until the election concludes and
    /// [`transition_to_follower`](Self::transition_to_follower) is invoked.
    /// The election timeout is drawn fresh: the candidate has at least as
    /// good a chance of being elected as this replica would.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn transition_to_unattached_voted(
        &mut self,
        epoch: Epoch,
        candidate_key: ReplicaKey,
    ) -> Result<(), QuorumError> {
        let current_epoch = self.epoch();
        if Some(candidate_key.id()) == self.local_id {
            return Err(QuorumError::VoteForSelf {
                candidate: candidate_key,
                epoch,
            });
        }
        if self.local_id.is_none() {
            return Err(QuorumError::LocalIdRequired {
                target: RoleName::Unattached,
            });
        }
        if epoch < current_epoch {
            return Err(QuorumError::NonMonotonicEpoch {
                target: RoleName::Unattached,
                epoch,
                current: self.describe(),
            });
        }
        if epoch == current_epoch && !self.is_unattached_not_voted() {
            return Err(QuorumError::InvalidTransition {
                target: RoleName::Unattached,
                current: self.describe(),
            });
        }

        let high_watermark = self.high_watermark();
        let election_timeout = Duration::from_millis(self.random_election_timeout());
        let now = self.clock.now();
        let voter_ids = self.partition_state.last_voter_set().voter_ids();

        self.durable_transition(EpochState::Unattached(UnattachedState::new(
            now,
            epoch,
            None,
            Some(candidate_key),
            voter_ids,
            high_watermark,
            Some(election_timeout),
        )))?;
        tracing::debug!(candidate = %candidate_key, epoch, "voted for candidate");
        Ok(())
    }

    /// Become a follower of an elected leader so that fetching can begin.
    ///
    /// Within an epoch the leader's endpoint set may only grow: replacing a
    /// follower state with one knowing the same or fewer endpoints is
    /// refused.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn transition_to_follower(
        &mut self,
        epoch: Epoch,
        leader_id: ReplicaId,
        endpoints: Endpoints,
    ) -> Result<(), QuorumError> {
        let current_epoch = self.epoch();
        if endpoints.is_empty() {
            return Err(QuorumError::MissingLeaderEndpoints { leader_id, epoch });
        }
        if Some(leader_id) == self.local_id {
            return Err(QuorumError::FollowSelf { leader_id, epoch });
        }
        if epoch < current_epoch {
            return Err(QuorumError::NonMonotonicEpoch {
                target: RoleName::Follower,
                epoch,
                current: self.describe(),
            });
        }
        if epoch == current_epoch {
            if let Some(follower) = self.maybe_follower_state() {
                if follower.leader_endpoints().len() >= endpoints.len() {
                    return Err(QuorumError::InvalidTransition {
                        target: RoleName::Follower,
                        current: self.describe(),
                    });
                }
            } else if self.is_leader() {
                return Err(QuorumError::InvalidTransition {
                    target: RoleName::Follower,
                    current: self.describe(),
                });
            }
        }

        let high_watermark = self.high_watermark();
        let now = self.clock.now();
        let voter_ids = self.partition_state.last_voter_set().voter_ids();

        self.durable_transition(EpochState::Follower(FollowerState::new(
            now,
            epoch,
            leader_id,
            endpoints,
            voter_ids,
            high_watermark,
            Duration::from_millis(self.fetch_timeout_ms),
        )))
    }

    /// Start campaigning in the next epoch, voting for ourselves.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn transition_to_candidate(&mut self) -> Result<(), QuorumError> {
        if self.is_observer() {
            return Err(QuorumError::NotVoter {
                target: RoleName::Candidate,
                voters: self.partition_state.last_voter_set().to_string(),
            });
        }
        if self.is_leader() {
            return Err(QuorumError::InvalidTransition {
                target: RoleName::Candidate,
                current: self.describe(),
            });
        }
        let local_key = match self.local_replica_key() {
            Some(key) => key,
            None => return Err(QuorumError::LocalIdRequired { target: RoleName::Candidate }),
        };

        let retries = self.maybe_candidate_state().map(|c| c.retries() + 1).unwrap_or(1);
        let new_epoch = self.epoch() + 1;
        let high_watermark = self.high_watermark();
        let election_timeout = Duration::from_millis(self.random_election_timeout());
        let now = self.clock.now();
        let voters = self.partition_state.last_voter_set();

        self.durable_transition(EpochState::Candidate(CandidateState::new(
            now,
            local_key,
            new_epoch,
            voters,
            high_watermark,
            retries,
            election_timeout,
        )))
    }

    /// Take leadership of the current epoch after winning its election.
    ///
    /// The new leader does not inherit the previous high watermark. The
    /// published watermark must only ever grow, and the only way a new
    /// leader can be certain of that is to wait until a majority of voters
    /// has reached the start of its epoch. The local state machine observer
    /// stalls briefly; global monotonicity survives the leader change.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn transition_to_leader(
        &mut self,
        epoch_start_offset: u64,
        accumulator: A,
    ) -> Result<(), QuorumError> {
        if self.is_observer() {
            return Err(QuorumError::NotVoter {
                target: RoleName::Leader,
                voters: self.partition_state.last_voter_set().to_string(),
            });
        }
        if !self.is_candidate() {
            return Err(QuorumError::InvalidTransition {
                target: RoleName::Leader,
                current: self.describe(),
            });
        }

        let candidate = self.candidate_state()?;
        if !candidate.is_vote_granted() {
            return Err(QuorumError::VotesNotGranted);
        }
        let local_key = *candidate.local_key();
        let epoch = candidate.epoch();
        let granting_voters = candidate.granting_voters().clone();

        let voters = self.partition_state.last_voter_set();
        let voters_offset = self.partition_state.last_voter_set_offset();
        let kraft_version = self.partition_state.last_kraft_version();

        self.durable_transition(EpochState::Leader(LeaderState::new(
            local_key,
            epoch,
            epoch_start_offset,
            voters,
            voters_offset,
            kraft_version,
            granting_voters,
            accumulator,
            self.local_listeners.clone(),
        )))
    }

    fn durable_transition(&mut self, new_state: EpochState<A>) -> Result<(), QuorumError> {
        tracing::info!(from = %self.describe(), to = %new_state, "attempting durable transition");

        let election = new_state.election();
        debug_assert!(election.validate().is_ok());
        self.store
            .write_election_state(&election, self.partition_state.last_kraft_version())?;

        self.memory_transition(new_state);
        Ok(())
    }

    fn memory_transition(&mut self, new_state: EpochState<A>) {
        let mut previous = self.state.take();
        if let Some(prev) = previous.as_mut() {
            // The durable record already reflects the new state; failing to
            // release the old one would leave the in-memory view
            // inconsistent with it, so there is nothing sensible to recover.
            if let Err(e) = prev.close() {
                panic!(
                    "failed to transition from {} to {}: {}",
                    prev.name(),
                    new_state.name(),
                    e
                );
            }
        }

        match &previous {
            Some(prev) => tracing::info!(from = %prev, to = %new_state, "completed transition"),
            None => tracing::info!(to = %new_state, "initialized quorum state"),
        }

        self.metrics_tx.send_replace(Self::snapshot(&new_state));
        self.state = Some(new_state);
    }

    fn snapshot(state: &EpochState<A>) -> QuorumMetrics {
        let election = state.election();
        QuorumMetrics {
            role: state.name(),
            epoch: state.epoch(),
            leader_id: state.leader_id(),
            voted_key: election.voted_key().copied(),
            high_watermark: state.high_watermark(),
        }
    }

    /// Draw an election timeout in `[base, 2*base)`, or `0` when the
    /// configured base is `0`.
    fn random_election_timeout(&mut self) -> u64 {
        if self.election_timeout_ms == 0 {
            return 0;
        }
        self.election_timeout_ms + self.rng.random_range(0..self.election_timeout_ms)
    }

    fn role(&self) -> &EpochState<A> {
        self.state.as_ref().expect("quorum state has not been initialized")
    }

    fn role_mut(&mut self) -> &mut EpochState<A> {
        self.state.as_mut().expect("quorum state has not been initialized")
    }

    fn describe(&self) -> String {
        match &self.state {
            Some(state) => state.to_string(),
            None => "Uninitialized".to_string(),
        }
    }

    // --- local identity ---

    pub fn local_id(&self) -> Option<ReplicaId> {
        self.local_id
    }

    pub fn local_id_or_sentinel(&self) -> ReplicaId {
        self.local_id.unwrap_or(-1)
    }

    pub fn local_directory_id(&self) -> Uuid {
        self.local_directory_id
    }

    /// The full key of this storage incarnation; `None` for replicas
    /// without a voting identity.
    pub fn local_replica_key(&self) -> Option<ReplicaKey> {
        self.local_id.map(|id| ReplicaKey::new(id, self.local_directory_id))
    }

    /// This replica as a voter-set member.
    pub fn local_voter_node(&self) -> Option<VoterNode> {
        self.local_replica_key().map(|key| {
            VoterNode::new(key, self.local_listeners.clone(), self.local_supported_version)
        })
    }

    // --- observed state ---

    pub fn epoch(&self) -> Epoch {
        self.role().epoch()
    }

    pub fn leader_id(&self) -> Option<ReplicaId> {
        self.role().leader_id()
    }

    pub fn leader_id_or_sentinel(&self) -> ReplicaId {
        self.leader_id().unwrap_or(-1)
    }

    pub fn leader_and_epoch(&self) -> LeaderAndEpoch {
        LeaderAndEpoch::new(self.leader_id(), self.epoch())
    }

    pub fn leader_endpoints(&self) -> &Endpoints {
        self.role().leader_endpoints()
    }

    pub fn high_watermark(&self) -> Option<LogOffsetMetadata> {
        self.role().high_watermark()
    }

    /// Whether the active role would grant a vote to `candidate`.
    pub fn can_grant_vote(&self, candidate: &ReplicaKey, log_up_to_date: bool) -> bool {
        self.role().can_grant_vote(candidate, log_up_to_date)
    }

    /// A watch over the published role snapshot, for reporter threads.
    pub fn metrics(&self) -> watch::Receiver<QuorumMetrics> {
        self.metrics_tx.subscribe()
    }

    // --- predicates ---

    pub fn has_leader(&self) -> bool {
        self.leader_id().is_some()
    }

    pub fn has_remote_leader(&self) -> bool {
        self.has_leader() && self.leader_id_or_sentinel() != self.local_id_or_sentinel()
    }

    /// Whether this replica is a member of the latest voter set.
    pub fn is_voter(&self) -> bool {
        match self.local_replica_key() {
            Some(key) => self.partition_state.last_voter_set().is_voter(&key),
            None => false,
        }
    }

    /// Whether `key` is a member of the latest voter set.
    pub fn is_voter_key(&self, key: &ReplicaKey) -> bool {
        self.partition_state.last_voter_set().is_voter(key)
    }

    pub fn is_observer(&self) -> bool {
        !self.is_voter()
    }

    /// Whether this replica is the single member of the voter set.
    pub fn is_only_voter(&self) -> bool {
        match self.local_replica_key() {
            Some(key) => self.partition_state.last_voter_set().is_only_voter(&key),
            None => false,
        }
    }

    pub fn is_unattached(&self) -> bool {
        matches!(self.role(), EpochState::Unattached(_))
    }

    pub fn is_unattached_not_voted(&self) -> bool {
        self.maybe_unattached_state().map(|s| s.voted_key().is_none()).unwrap_or(false)
    }

    pub fn is_unattached_and_voted(&self) -> bool {
        self.maybe_unattached_state().map(|s| s.voted_key().is_some()).unwrap_or(false)
    }

    pub fn is_candidate(&self) -> bool {
        matches!(self.role(), EpochState::Candidate(_))
    }

    pub fn is_leader(&self) -> bool {
        matches!(self.role(), EpochState::Leader(_))
    }

    pub fn is_follower(&self) -> bool {
        matches!(self.role(), EpochState::Follower(_))
    }

    pub fn is_resigned(&self) -> bool {
        matches!(self.role(), EpochState::Resigned(_))
    }

    // --- checked and optional projections ---

    pub fn unattached_state(&self) -> Result<&UnattachedState, QuorumError> {
        match self.role() {
            EpochState::Unattached(s) => Ok(s),
            other => Err(QuorumError::UnexpectedRole {
                expected: RoleName::Unattached,
                current: other.to_string(),
            }),
        }
    }

    pub fn maybe_unattached_state(&self) -> Option<&UnattachedState> {
        match self.role() {
            EpochState::Unattached(s) => Some(s),
            _ => None,
        }
    }

    pub fn candidate_state(&self) -> Result<&CandidateState, QuorumError> {
        match self.role() {
            EpochState::Candidate(s) => Ok(s),
            other => Err(QuorumError::UnexpectedRole {
                expected: RoleName::Candidate,
                current: other.to_string(),
            }),
        }
    }

    pub fn candidate_state_mut(&mut self) -> Result<&mut CandidateState, QuorumError> {
        let current = self.describe();
        match self.role_mut() {
            EpochState::Candidate(s) => Ok(s),
            _ => Err(QuorumError::UnexpectedRole {
                expected: RoleName::Candidate,
                current,
            }),
        }
    }

    pub fn maybe_candidate_state(&self) -> Option<&CandidateState> {
        match self.role() {
            EpochState::Candidate(s) => Some(s),
            _ => None,
        }
    }

    pub fn leader_state(&self) -> Result<&LeaderState<A>, QuorumError> {
        match self.role() {
            EpochState::Leader(s) => Ok(s),
            other => Err(QuorumError::UnexpectedRole {
                expected: RoleName::Leader,
                current: other.to_string(),
            }),
        }
    }

    pub fn leader_state_mut(&mut self) -> Result<&mut LeaderState<A>, QuorumError> {
        let current = self.describe();
        match self.role_mut() {
            EpochState::Leader(s) => Ok(s),
            _ => Err(QuorumError::UnexpectedRole {
                expected: RoleName::Leader,
                current,
            }),
        }
    }

    pub fn maybe_leader_state(&self) -> Option<&LeaderState<A>> {
        match self.role() {
            EpochState::Leader(s) => Some(s),
            _ => None,
        }
    }

    pub fn follower_state(&self) -> Result<&FollowerState, QuorumError> {
        match self.role() {
            EpochState::Follower(s) => Ok(s),
            other => Err(QuorumError::UnexpectedRole {
                expected: RoleName::Follower,
                current: other.to_string(),
            }),
        }
    }

    pub fn follower_state_mut(&mut self) -> Result<&mut FollowerState, QuorumError> {
        let current = self.describe();
        match self.role_mut() {
            EpochState::Follower(s) => Ok(s),
            _ => Err(QuorumError::UnexpectedRole {
                expected: RoleName::Follower,
                current,
            }),
        }
    }

    pub fn maybe_follower_state(&self) -> Option<&FollowerState> {
        match self.role() {
            EpochState::Follower(s) => Some(s),
            _ => None,
        }
    }

    pub fn resigned_state(&self) -> Result<&ResignedState, QuorumError> {
        match self.role() {
            EpochState::Resigned(s) => Ok(s),
            other => Err(QuorumError::UnexpectedRole {
                expected: RoleName::Resigned,
                current: other.to_string(),
            }),
        }
    }

    pub fn resigned_state_mut(&mut self) -> Result<&mut ResignedState, QuorumError> {
        let current = self.describe();
        match self.role_mut() {
            EpochState::Resigned(s) => Ok(s),
            _ => Err(QuorumError::UnexpectedRole {
                expected: RoleName::Resigned,
                current,
            }),
        }
    }

    pub fn maybe_resigned_state(&self) -> Option<&ResignedState> {
        match self.role() {
            EpochState::Resigned(s) => Some(s),
            _ => None,
        }
    }
}
