//! Injected time capability for liveness timers.
//!
//! Estates never read the system clock directly: the owning stack hands
//! every estate the same [`TimeSource`], and tests substitute a manually
//! advanced one so timers can be driven deterministically.

use std::time::{Duration, Instant};

/// Monotonic time capability, shared read-only by all estates of one stack.
pub trait TimeSource: Send + Sync {
    /// Elapsed time since this source's epoch.
    fn now(&self) -> Duration;
}

/// Time source backed by a monotonic system instant.
pub struct SystemTimeSource {
    epoch: Instant,
}

impl SystemTimeSource {
    /// Create a source whose epoch is now.
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Default for SystemTimeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Duration {
        self.epoch.elapsed()
    }
}

/// Time source pinned at zero.
///
/// Estates constructed without a stack fall back to this; their timers
/// cannot expire until the estate is rebound to a live source.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrozenTimeSource;

impl TimeSource for FrozenTimeSource {
    fn now(&self) -> Duration {
        Duration::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_source_advances() {
        let source = SystemTimeSource::new();
        let first = source.now();
        let second = source.now();
        assert!(second >= first);
    }

    #[test]
    fn test_frozen_source_stays_at_zero() {
        let source = FrozenTimeSource;
        assert_eq!(source.now(), Duration::ZERO);
        assert_eq!(source.now(), Duration::ZERO);
    }
}
