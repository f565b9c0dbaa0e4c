//! Heartbeat countdown for remote-estate liveness.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::time::TimeSource;

/// A one-shot countdown measured against an injected time source.
///
/// The timer is armed from construction or [`restart`] until its deadline
/// passes, after which it reads as expired until rearmed. Expiry is
/// level-derived from the deadline rather than edge-detected, so a late
/// polling tick still observes it.
///
/// [`restart`]: LivenessTimer::restart
pub struct LivenessTimer {
    source: Arc<dyn TimeSource>,
    deadline: Duration,
}

impl LivenessTimer {
    /// Arm a timer for `duration` from now.
    pub fn new(source: Arc<dyn TimeSource>, duration: Duration) -> Self {
        let deadline = source.now() + duration;
        Self { source, deadline }
    }

    /// Rearm for `duration` from now, regardless of current state.
    pub fn restart(&mut self, duration: Duration) {
        self.deadline = self.source.now() + duration;
    }

    /// Whether the countdown has passed its deadline.
    pub fn expired(&self) -> bool {
        self.source.now() >= self.deadline
    }

    /// Time left until expiry; zero once expired.
    pub fn remaining(&self) -> Duration {
        self.deadline.saturating_sub(self.source.now())
    }
}

impl fmt::Debug for LivenessTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LivenessTimer")
            .field("deadline", &self.deadline)
            .field("expired", &self.expired())
            .finish()
    }
}
