//! Remote peer estates: handshake state, session keys, and liveness.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use stead_core::{SessionId, TransactionId, TransactionIndex};
use stead_keys::{KeyMaterial, RemoteKeyRing};

use crate::addr::DEFAULT_TEST_PORT;
use crate::estate::{Estate, EstateBuilder};
use crate::error::Result;
use crate::liveness::LivenessTimer;
use crate::stack::Stack;
use crate::time::{FrozenTimeSource, TimeSource};

/// Policy outcome for whether a remote's long-term key is trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Acceptance {
    /// Decision deferred, awaiting operator or policy input.
    Pending,
    /// Long-term key accepted.
    Accepted,
    /// Long-term key rejected.
    Rejected,
}

/// A remote peer's estate record.
///
/// Tracks the handshake flags, the remote's key material and this side's
/// session keys, the freshness window for counters the remote sends as
/// initiator, the set of exchanges currently open with it, and the
/// keep-alive heartbeat.
///
/// Created when a stack first learns of a peer; destroyed when the stack
/// evicts it.
pub struct RemoteEstate {
    estate: Estate,
    joined: Option<bool>,
    allowed: Option<bool>,
    alive: Option<bool>,
    acceptance: Option<Acceptance>,
    keys: RemoteKeyRing,
    last_session_id: SessionId,
    last_transaction_id: TransactionId,
    transactions: BTreeSet<TransactionIndex>,
    period: Duration,
    offset: Duration,
    timer: LivenessTimer,
    time_source: Arc<dyn TimeSource>,
}

impl RemoteEstate {
    /// Default heartbeat interval.
    pub const PERIOD: Duration = Duration::from_secs(1);

    /// Default first-arm jitter. Staggering only the initial countdown
    /// keeps two peers' heartbeats from probing each other in lockstep.
    pub const OFFSET: Duration = Duration::from_millis(500);

    /// Start building a remote estate.
    pub fn builder<'a>() -> RemoteEstateBuilder<'a> {
        RemoteEstateBuilder::default()
    }

    /// The shared identity record.
    pub fn estate(&self) -> &Estate {
        &self.estate
    }

    /// Mutable access to the identity record, for counter advancement.
    pub fn estate_mut(&mut self) -> &mut Estate {
        &mut self.estate
    }

    /// Join-handshake progress; `None` until the first join resolves.
    pub fn joined(&self) -> Option<bool> {
        self.joined
    }

    pub fn set_joined(&mut self, joined: bool) {
        self.joined = Some(joined);
    }

    /// Allow-handshake progress; cleared by [`rekey`](Self::rekey).
    pub fn allowed(&self) -> Option<bool> {
        self.allowed
    }

    pub fn set_allowed(&mut self, allowed: bool) {
        self.allowed = Some(allowed);
    }

    /// Liveness as last established; `None` until first evidence.
    pub fn alive(&self) -> Option<bool> {
        self.alive
    }

    pub fn set_alive(&mut self, alive: bool) {
        self.alive = Some(alive);
    }

    /// Trust decision for the remote's long-term key.
    pub fn acceptance(&self) -> Option<Acceptance> {
        self.acceptance
    }

    pub fn set_acceptance(&mut self, acceptance: Acceptance) {
        self.acceptance = Some(acceptance);
    }

    /// The remote's key material and this side's session keys.
    pub fn keys(&self) -> &RemoteKeyRing {
        &self.keys
    }

    /// Mutable key access, for recording peer keys learned in handshakes.
    pub fn keys_mut(&mut self) -> &mut RemoteKeyRing {
        &mut self.keys
    }

    /// Discard session key state and start a fresh handshake window.
    ///
    /// Replaces the ephemeral self pair, forgets the peer's ephemeral key,
    /// and clears `allowed` in the same operation; packets sealed under
    /// the old pair are unreadable from here on.
    pub fn rekey(&mut self) {
        self.allowed = None;
        self.keys.rekey();
        tracing::debug!(id = self.estate.id().value(), "session keys regenerated");
    }

    /// Highest validated session id received from this remote as
    /// initiator.
    pub fn last_session_id(&self) -> SessionId {
        self.last_session_id
    }

    /// Highest validated transaction id received from this remote as
    /// initiator.
    pub fn last_transaction_id(&self) -> TransactionId {
        self.last_transaction_id
    }

    /// Whether `candidate` is fresher than the last validated remote
    /// session id, under circular ordering.
    pub fn is_newer_remote_session_id(&self, candidate: SessionId) -> bool {
        candidate.is_newer_than(self.last_session_id)
    }

    /// Whether `candidate` is fresher than the last validated remote
    /// transaction id, under circular ordering.
    pub fn is_newer_remote_transaction_id(&self, candidate: TransactionId) -> bool {
        candidate.is_newer_than(self.last_transaction_id)
    }

    /// Record `candidate` if it is fresher than the stored value.
    /// Returns whether it was stored. The window only moves forward.
    pub fn update_remote_session_id(&mut self, candidate: SessionId) -> bool {
        if self.is_newer_remote_session_id(candidate) {
            self.last_session_id = candidate;
            true
        } else {
            false
        }
    }

    /// Record `candidate` if it is fresher than the stored value.
    /// Returns whether it was stored. The window only moves forward.
    pub fn update_remote_transaction_id(&mut self, candidate: TransactionId) -> bool {
        if self.is_newer_remote_transaction_id(candidate) {
            self.last_transaction_id = candidate;
            true
        } else {
            false
        }
    }

    /// Explicitly reset the remote session window, e.g. after the remote
    /// restarts.
    pub fn reset_remote_session_id(&mut self, sid: SessionId) {
        self.last_session_id = sid;
    }

    /// Explicitly reset the remote transaction window.
    pub fn reset_remote_transaction_id(&mut self, tid: TransactionId) {
        self.last_transaction_id = tid;
    }

    /// Track an exchange opened with this remote. Returns `false` if it
    /// was already tracked.
    pub fn track_transaction(&mut self, index: TransactionIndex) -> bool {
        self.transactions.insert(index)
    }

    /// Drop a completed or torn-down exchange. Returns whether it was
    /// present.
    pub fn untrack_transaction(&mut self, index: &TransactionIndex) -> bool {
        self.transactions.remove(index)
    }

    /// Exchanges currently open with this remote. The transaction layer
    /// tears these down if the remote is declared dead.
    pub fn outstanding_transactions(&self) -> &BTreeSet<TransactionIndex> {
        &self.transactions
    }

    /// Heartbeat interval.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// First-arm jitter.
    pub fn offset(&self) -> Duration {
        self.offset
    }

    /// The heartbeat countdown.
    pub fn timer(&self) -> &LivenessTimer {
        &self.timer
    }

    /// The time source the heartbeat currently runs on.
    pub fn time_source(&self) -> Arc<dyn TimeSource> {
        self.time_source.clone()
    }

    /// Rebind to a different time source, recreating the heartbeat timer
    /// with the initial jittered duration. Used when the estate migrates
    /// between stacks.
    pub fn rebind(&mut self, source: Arc<dyn TimeSource>) {
        self.timer = LivenessTimer::new(source.clone(), self.period + self.offset);
        self.time_source = source;
    }

    /// Note fresh traffic from this remote: restart the heartbeat for one
    /// full period (no jitter) and record liveness. Any received traffic
    /// is evidence of liveness.
    pub fn refresh(&mut self, alive: bool) {
        self.timer.restart(self.period);
        self.alive = Some(alive);
    }

    /// Periodic keep-alive processing, called by the stack's scheduler at
    /// a cadence finer than `period`.
    ///
    /// On expiry the timer rearms for one period and the stack is asked to
    /// probe this estate: exactly one probe per expiry event, however many
    /// polling ticks observe it.
    pub fn process(&mut self, stack: &dyn Stack) {
        if self.timer.expired() {
            self.timer.restart(self.period);
            tracing::debug!(id = self.estate.id().value(), "keep-alive probe");
            stack.send_keep_alive(self.estate.id());
        }
    }
}

impl std::fmt::Debug for RemoteEstate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteEstate")
            .field("estate", &self.estate)
            .field("joined", &self.joined)
            .field("allowed", &self.allowed)
            .field("alive", &self.alive)
            .field("acceptance", &self.acceptance)
            .field("keys", &self.keys)
            .field("last_session_id", &self.last_session_id)
            .field("last_transaction_id", &self.last_transaction_id)
            .field("transactions", &self.transactions)
            .field("period", &self.period)
            .field("offset", &self.offset)
            .field("timer", &self.timer)
            .finish()
    }
}

/// Builder for [`RemoteEstate`].
///
/// With neither `host` nor an `address` pair supplied, the estate
/// defaults to `("127.0.0.1", DEFAULT_TEST_PORT)`.
#[derive(Default)]
pub struct RemoteEstateBuilder<'a> {
    inner: EstateBuilder<'a>,
    stack: Option<&'a dyn Stack>,
    time_source: Option<Arc<dyn TimeSource>>,
    verkey: Option<KeyMaterial>,
    pubkey: Option<KeyMaterial>,
    acceptance: Option<Acceptance>,
    last_session_id: SessionId,
    last_transaction_id: TransactionId,
    period: Option<Duration>,
    offset: Option<Duration>,
}

impl<'a> RemoteEstateBuilder<'a> {
    /// Attach the owning stack; supplies id allocation and the shared
    /// time source.
    pub fn stack(mut self, stack: &'a dyn Stack) -> Self {
        self.stack = Some(stack);
        self.inner = self.inner.stack(stack);
        self
    }

    /// Override the time source the heartbeat runs on. Takes precedence
    /// over the stack's.
    pub fn time_source(mut self, source: Arc<dyn TimeSource>) -> Self {
        self.time_source = Some(source);
        self
    }

    /// Use an explicit id instead of asking the stack for one.
    pub fn id(mut self, id: stead_core::EstateId) -> Self {
        self.inner = self.inner.id(id);
        self
    }

    /// Human-readable label; defaults to `"estate<id>"`.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.inner = self.inner.name(name);
        self
    }

    /// Starting session counter value.
    pub fn session_id(mut self, sid: SessionId) -> Self {
        self.inner = self.inner.session_id(sid);
        self
    }

    /// Starting transaction counter value.
    pub fn transaction_id(mut self, tid: TransactionId) -> Self {
        self.inner = self.inner.transaction_id(tid);
        self
    }

    /// Host to resolve.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.inner = self.inner.host(host);
        self
    }

    /// Port.
    pub fn port(mut self, port: u16) -> Self {
        self.inner = self.inner.port(port);
        self
    }

    /// Explicit `(host, port)` pair; overrides `host` and `port`.
    pub fn address(mut self, host: impl Into<String>, port: u16) -> Self {
        self.inner = self.inner.address(host, port);
        self
    }

    /// The remote's long-term verification key, if already known.
    pub fn verkey(mut self, material: KeyMaterial) -> Self {
        self.verkey = Some(material);
        self
    }

    /// The remote's long-term public encryption key, if already known.
    pub fn pubkey(mut self, material: KeyMaterial) -> Self {
        self.pubkey = Some(material);
        self
    }

    /// Initial trust decision for the remote's long-term key.
    pub fn acceptance(mut self, acceptance: Acceptance) -> Self {
        self.acceptance = Some(acceptance);
        self
    }

    /// Last validated remote-initiated session id.
    pub fn last_session_id(mut self, sid: SessionId) -> Self {
        self.last_session_id = sid;
        self
    }

    /// Last validated remote-initiated transaction id.
    pub fn last_transaction_id(mut self, tid: TransactionId) -> Self {
        self.last_transaction_id = tid;
        self
    }

    /// Heartbeat interval; defaults to [`RemoteEstate::PERIOD`].
    pub fn period(mut self, period: Duration) -> Self {
        self.period = Some(period);
        self
    }

    /// First-arm jitter; defaults to [`RemoteEstate::OFFSET`].
    pub fn offset(mut self, offset: Duration) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Build the remote estate, arming its heartbeat for
    /// `period + offset`.
    pub fn build(self) -> Result<RemoteEstate> {
        let mut inner = self.inner;
        if !inner.is_addressed() {
            inner = inner.address("127.0.0.1", DEFAULT_TEST_PORT);
        }
        let estate = inner.build()?;

        let keys = RemoteKeyRing::new(self.verkey.as_ref(), self.pubkey.as_ref())?;

        let time_source = match self.time_source {
            Some(source) => source,
            None => match self.stack {
                Some(stack) => stack.time_source(),
                None => Arc::new(FrozenTimeSource),
            },
        };

        let period = self.period.unwrap_or(RemoteEstate::PERIOD);
        let offset = self.offset.unwrap_or(RemoteEstate::OFFSET);
        let timer = LivenessTimer::new(time_source.clone(), period + offset);

        Ok(RemoteEstate {
            estate,
            joined: None,
            allowed: None,
            alive: None,
            acceptance: self.acceptance,
            keys,
            last_session_id: self.last_session_id,
            last_transaction_id: self.last_transaction_id,
            transactions: BTreeSet::new(),
            period,
            offset,
            timer,
            time_source,
        })
    }
}
