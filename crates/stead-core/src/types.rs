//! Strong type definitions for estate identity and sequencing.
//!
//! All identifiers are newtypes to prevent misuse at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::seq;

/// A process-scoped estate identifier.
///
/// Unique among all estates known to one stack at any time. Assigned once
/// at creation and immutable thereafter. Id 0 designates an
/// anonymous/unbound estate, used for local bootstrap before registration.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct EstateId(pub u32);

impl EstateId {
    /// The anonymous/unbound estate id.
    pub const UNBOUND: Self = Self(0);

    /// Create from a raw value.
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    pub const fn value(&self) -> u32 {
        self.0
    }

    /// Whether this is the anonymous/unbound id.
    pub const fn is_unbound(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for EstateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for EstateId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// A 32-bit session identifier.
///
/// Distinguishes successive sessions with one peer. 0 means "unset/never
/// sent"; the counter skips it on rollover.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct SessionId(pub u32);

impl SessionId {
    /// The "never sent" sentinel.
    pub const UNSET: Self = Self(0);

    /// Create from a raw value.
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    pub const fn value(&self) -> u32 {
        self.0
    }

    /// The next session id in sequence, wrapping past the 32-bit maximum
    /// to 1.
    pub const fn next(self) -> Self {
        Self(seq::next_value(self.0))
    }

    /// Whether `self` occurs after `other` under circular ordering.
    pub const fn is_newer_than(self, other: Self) -> bool {
        seq::is_newer(self.0, other.0)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for SessionId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// A 32-bit transaction identifier.
///
/// Distinguishes in-session exchanges. Same sequencing rules as
/// [`SessionId`].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct TransactionId(pub u32);

impl TransactionId {
    /// The "never sent" sentinel.
    pub const UNSET: Self = Self(0);

    /// Create from a raw value.
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    pub const fn value(&self) -> u32 {
        self.0
    }

    /// The next transaction id in sequence, wrapping past the 32-bit
    /// maximum to 1.
    pub const fn next(self) -> Self {
        Self(seq::next_value(self.0))
    }

    /// Whether `self` occurs after `other` under circular ordering.
    pub const fn is_newer_than(self, other: Self) -> bool {
        seq::is_newer(self.0, other.0)
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for TransactionId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// Reference to an in-flight exchange with one remote estate.
///
/// The transaction layer tracks these against the remote so it knows what
/// to tear down if the remote is declared dead. Opaque to this core.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct TransactionIndex {
    /// Whether the remote side initiated the exchange.
    pub initiated_remotely: bool,

    /// The estate the exchange is open with.
    pub estate: EstateId,

    /// Session the exchange belongs to.
    pub session: SessionId,

    /// Transaction counter value of the exchange.
    pub transaction: TransactionId,
}
