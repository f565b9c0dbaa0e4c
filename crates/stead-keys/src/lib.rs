//! # Stead Keys
//!
//! Two-tier key material for stead estates.
//!
//! Every estate carries long-term identity keys (an Ed25519 signing pair
//! and an X25519 encryption pair, published once and trusted via an
//! external acceptance policy) and, for remote estates, a short-term X25519
//! session pair that is regenerated on every rekey.
//!
//! ## Key Types
//!
//! - [`SigningKeypair`] / [`VerifyKey`] / [`Signature`] - Ed25519 identity
//!   signing
//! - [`X25519Keypair`] / [`X25519PublicKey`] - key agreement, long-term or
//!   ephemeral
//! - [`LocalKeyRing`] - this party's long-term keys
//! - [`RemoteKeyRing`] - a peer's keys plus the rotating session pair
//!
//! ## Construction
//!
//! Ring constructors accept a raw 32-byte seed or a hex-encoded one
//! ([`KeyMaterial`]); absent material generates fresh keys for roles that
//! need a private component and leaves public holders unset. Malformed
//! material fails with [`KeyError::InvalidKeyMaterial`] and no partial ring
//! survives.

pub mod agreement;
pub mod error;
pub mod material;
pub mod ring;
pub mod sign;

pub use agreement::{SealedMessage, X25519Keypair, X25519PublicKey};
pub use error::{KeyError, Result};
pub use material::KeyMaterial;
pub use ring::{LocalKeyRing, RemoteKeyRing};
pub use sign::{Signature, SigningKeypair, VerifyKey};
