//! X25519 key agreement and sealed-message encryption.
//!
//! Encryption keys come in two tiers: a long-term pair whose public half is
//! published once, and a short-term session pair regenerated on every
//! rekey. Both are plain X25519 keypairs; a message sealed from one pair to
//! a peer public key derives a ChaCha20-Poly1305 key from the shared
//! secret.

use chacha20poly1305::{
    aead::{Aead, KeyInit},
    ChaCha20Poly1305, Nonce,
};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;
use x25519_dalek::{PublicKey, StaticSecret};

use crate::error::{KeyError, Result};
use crate::material::KeyMaterial;

/// An X25519 public encryption key (32 bytes).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct X25519PublicKey(pub [u8; 32]);

impl X25519PublicKey {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Build from supplied material.
    pub fn from_material(material: &KeyMaterial) -> Result<Self> {
        Ok(Self(material.to_bytes()?))
    }

    /// Convert to x25519-dalek PublicKey.
    pub fn to_dalek(&self) -> PublicKey {
        PublicKey::from(self.0)
    }
}

impl fmt::Debug for X25519PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "X25519Pub({})", &self.to_hex()[..16])
    }
}

impl AsRef<[u8]> for X25519PublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<PublicKey> for X25519PublicKey {
    fn from(pk: PublicKey) -> Self {
        Self(*pk.as_bytes())
    }
}

impl From<[u8; 32]> for X25519PublicKey {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

/// Nonce and ciphertext produced by [`X25519Keypair::seal`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedMessage {
    /// Random 96-bit nonce.
    pub nonce: [u8; 12],
    /// ChaCha20-Poly1305 ciphertext with its authentication tag.
    pub ciphertext: Vec<u8>,
}

/// An X25519 keypair for an encryption role, long-term or ephemeral.
///
/// An ephemeral pair is replaced wholesale on rekey; its secret half is
/// never reused across sessions.
#[derive(Clone)]
pub struct X25519Keypair {
    secret: StaticSecret,
}

impl X25519Keypair {
    /// Generate a new random keypair.
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let mut bytes = [0u8; 32];
        rng.fill_bytes(&mut bytes);
        Self {
            secret: StaticSecret::from(bytes),
        }
    }

    /// Create from a 32-byte seed.
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self {
            secret: StaticSecret::from(seed),
        }
    }

    /// Build from supplied material, or generate fresh when absent.
    pub fn from_material(material: Option<&KeyMaterial>) -> Result<Self> {
        match material {
            Some(material) => Ok(Self::from_seed(material.to_bytes()?)),
            None => Ok(Self::generate()),
        }
    }

    /// The public half of this pair.
    pub fn public_key(&self) -> X25519PublicKey {
        X25519PublicKey::from(PublicKey::from(&self.secret))
    }

    /// Seal a message for `peer`. Only the holder of the peer secret can
    /// open it.
    pub fn seal(&self, plaintext: &[u8], peer: &X25519PublicKey) -> Result<SealedMessage> {
        let cipher = self.session_cipher(peer)?;
        let mut nonce = [0u8; 12];
        rand::thread_rng().fill_bytes(&mut nonce);
        let ciphertext = cipher
            .encrypt(Nonce::from_slice(&nonce), plaintext)
            .map_err(|e| KeyError::Encrypt(e.to_string()))?;
        Ok(SealedMessage { nonce, ciphertext })
    }

    /// Open a message sealed by `peer` for this pair.
    pub fn open(&self, sealed: &SealedMessage, peer: &X25519PublicKey) -> Result<Vec<u8>> {
        let cipher = self.session_cipher(peer)?;
        cipher
            .decrypt(Nonce::from_slice(&sealed.nonce), sealed.ciphertext.as_slice())
            .map_err(|e| KeyError::Decrypt(e.to_string()))
    }

    /// Derive the symmetric cipher shared with `peer`.
    ///
    /// The raw shared secret is run through a keyed derivation for domain
    /// separation before it touches the AEAD.
    fn session_cipher(&self, peer: &X25519PublicKey) -> Result<ChaCha20Poly1305> {
        let shared = self.secret.diffie_hellman(&peer.to_dalek());
        let mut hasher = blake3::Hasher::new_derive_key("stead-keys-v0-session");
        hasher.update(shared.as_bytes());
        let key = hasher.finalize();
        ChaCha20Poly1305::new_from_slice(key.as_bytes())
            .map_err(|e| KeyError::Encrypt(e.to_string()))
    }
}

impl fmt::Debug for X25519Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "X25519Keypair({:?})", self.public_key())
    }
}
