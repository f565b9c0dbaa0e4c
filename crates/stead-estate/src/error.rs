//! Error types for estate construction.

use thiserror::Error;

use stead_core::EstateId;
use stead_keys::KeyError;

/// Result type for estate operations.
pub type Result<T> = std::result::Result<T, EstateError>;

/// Errors surfaced while building or mutating estates.
///
/// No operation here retries; retry policy belongs to the transport layer.
#[derive(Debug, Error)]
pub enum EstateError {
    /// An explicit id collides with an existing entry in the stack's
    /// remote-estate table. Choose another id or omit it for
    /// auto-allocation.
    #[error("duplicate estate id: {0}")]
    DuplicateEstateId(EstateId),

    /// The supplied host cannot be resolved to a numeric address.
    #[error("cannot resolve host {host:?}: {reason}")]
    AddressResolutionFailure { host: String, reason: String },

    /// Key-ring construction failed; estate creation aborts.
    #[error(transparent)]
    Key(#[from] KeyError),
}
