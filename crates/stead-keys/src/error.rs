//! Error types for key material and key rings.

use thiserror::Error;

/// Result type for key operations.
pub type Result<T> = std::result::Result<T, KeyError>;

/// Errors raised while building or using key material.
#[derive(Debug, Error)]
pub enum KeyError {
    /// Malformed seed or key input. The ring under construction is
    /// abandoned; callers must not use a partially built one.
    #[error("invalid key material: {0}")]
    InvalidKeyMaterial(String),

    #[error("signature verification failed")]
    InvalidSignature,

    #[error("encryption error: {0}")]
    Encrypt(String),

    #[error("decryption error: {0}")]
    Decrypt(String),
}
