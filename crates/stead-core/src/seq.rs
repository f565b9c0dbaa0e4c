//! Wraparound-safe 32-bit sequence arithmetic.
//!
//! Session and transaction identifiers are 32-bit counters that can wrap
//! during a long-lived session. Freshness is decided modulo 2^32: a
//! candidate is newer than the current value iff the forward distance to it
//! is within half the sequence space. Zero is reserved to mean
//! "unset/never sent", so the increment wraps past the maximum to 1, never
//! to 0.

/// Half of the 32-bit sequence space.
const HALF_WINDOW: u32 = 1 << 31;

/// The next counter value: increments by one, wrapping past `u32::MAX` to 1.
pub const fn next_value(current: u32) -> u32 {
    match current.checked_add(1) {
        Some(next) => next,
        None => 1,
    }
}

/// Whether `candidate` occurs after `current` under modulo-2^32 circular
/// ordering.
///
/// True iff `(candidate - current) mod 2^32` is non-zero and strictly less
/// than 2^31. Equal values are not newer. Plain integer comparison breaks
/// once a counter wraps; the circular test keeps classifying up to ~2
/// billion steps of forward progress as fresh while rejecting the stale
/// half of the space.
pub const fn is_newer(candidate: u32, current: u32) -> bool {
    let ahead = candidate.wrapping_sub(current);
    ahead != 0 && ahead < HALF_WINDOW
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_next_value_increments() {
        assert_eq!(next_value(0), 1);
        assert_eq!(next_value(1), 2);
        assert_eq!(next_value(41), 42);
    }

    #[test]
    fn test_next_value_wraps_to_one() {
        assert_eq!(next_value(0xFFFF_FFFE), 0xFFFF_FFFF);
        assert_eq!(next_value(0xFFFF_FFFF), 1);
    }

    #[test]
    fn test_is_newer_basic_window() {
        assert!(is_newer(150, 100));
        assert!(!is_newer(50, 100));
        assert!(!is_newer(100, 100));
    }

    #[test]
    fn test_is_newer_across_wrap() {
        assert!(is_newer(5, 0xFFFF_FFF0));
        assert!(!is_newer(0xFFFF_FFF0, 5));
    }

    #[test]
    fn test_is_newer_window_edges() {
        assert!(is_newer(HALF_WINDOW - 1, 0));
        assert!(!is_newer(HALF_WINDOW, 0));
        assert!(!is_newer(u32::MAX, 0));
    }

    proptest! {
        #[test]
        fn newer_iff_forward_distance_in_half_window(current: u32, k: u32) {
            let candidate = current.wrapping_add(k);
            let expected = k != 0 && k < HALF_WINDOW;
            prop_assert_eq!(is_newer(candidate, current), expected);
        }

        #[test]
        fn equal_is_never_newer(value: u32) {
            prop_assert!(!is_newer(value, value));
        }

        #[test]
        fn next_value_is_never_zero(current: u32) {
            prop_assert_ne!(next_value(current), 0);
        }
    }
}
