//! Key rings: the per-estate bundles of key material.

use std::fmt;

use crate::agreement::{X25519Keypair, X25519PublicKey};
use crate::error::Result;
use crate::material::KeyMaterial;
use crate::sign::{SigningKeypair, VerifyKey};

/// Long-term key material held by the local estate.
///
/// The signer authenticates outgoing material; the encrypter's public half
/// is the durable key published to peers.
#[derive(Clone)]
pub struct LocalKeyRing {
    /// Long-term identity signing pair.
    pub signer: SigningKeypair,
    /// Long-term encryption pair.
    pub encrypter: X25519Keypair,
}

impl LocalKeyRing {
    /// Build from supplied material; absent entries generate fresh keys.
    pub fn new(sigkey: Option<&KeyMaterial>, prikey: Option<&KeyMaterial>) -> Result<Self> {
        Ok(Self {
            signer: SigningKeypair::from_material(sigkey)?,
            encrypter: X25519Keypair::from_material(prikey)?,
        })
    }
}

impl fmt::Debug for LocalKeyRing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalKeyRing")
            .field("signer", &self.signer)
            .field("encrypter", &self.encrypter)
            .finish()
    }
}

/// Key material tracked for a remote estate.
///
/// Long-term entries are set once at construction and never rotated here;
/// the ephemeral pair is the only part that changes, via [`rekey`].
///
/// [`rekey`]: RemoteKeyRing::rekey
#[derive(Debug, Clone)]
pub struct RemoteKeyRing {
    /// The remote's long-term verification key, once learned.
    pub verifier: Option<VerifyKey>,
    /// The remote's long-term public encryption key, once learned.
    pub long_term_peer: Option<X25519PublicKey>,
    /// This side's short-term pair for the current session with the remote.
    pub ephemeral_self: X25519Keypair,
    /// The remote's short-term public key as last received.
    pub ephemeral_peer: Option<X25519PublicKey>,
}

impl RemoteKeyRing {
    /// Build from optional long-term material; the ephemeral pair is
    /// always freshly generated.
    pub fn new(verkey: Option<&KeyMaterial>, pubkey: Option<&KeyMaterial>) -> Result<Self> {
        let verifier = verkey.map(VerifyKey::from_material).transpose()?;
        let long_term_peer = pubkey.map(X25519PublicKey::from_material).transpose()?;
        Ok(Self {
            verifier,
            long_term_peer,
            ephemeral_self: X25519Keypair::generate(),
            ephemeral_peer: None,
        })
    }

    /// Discard the session keys and start over with a fresh ephemeral pair.
    ///
    /// Anything sealed under the old pair becomes unreadable immediately;
    /// callers must not have in-flight traffic depending on it.
    pub fn rekey(&mut self) {
        self.ephemeral_self = X25519Keypair::generate();
        self.ephemeral_peer = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_ring_from_seeds() {
        let sig = KeyMaterial::from([0x01u8; 32]);
        let pri = KeyMaterial::from(hex::encode([0x02u8; 32]));
        let ring = LocalKeyRing::new(Some(&sig), Some(&pri)).unwrap();
        assert_eq!(
            ring.signer.verify_key(),
            SigningKeypair::from_seed(&[0x01u8; 32]).verify_key()
        );
        assert_eq!(
            ring.encrypter.public_key(),
            X25519Keypair::from_seed([0x02u8; 32]).public_key()
        );
    }

    #[test]
    fn test_local_ring_generates_when_absent() {
        let a = LocalKeyRing::new(None, None).unwrap();
        let b = LocalKeyRing::new(None, None).unwrap();
        assert_ne!(a.signer.verify_key(), b.signer.verify_key());
        assert_ne!(a.encrypter.public_key(), b.encrypter.public_key());
    }

    #[test]
    fn test_local_ring_malformed_material_fails() {
        let bad = KeyMaterial::from("0xnope");
        assert!(LocalKeyRing::new(Some(&bad), None).is_err());
        assert!(LocalKeyRing::new(None, Some(&bad)).is_err());
    }

    #[test]
    fn test_remote_ring_unset_holders() {
        let ring = RemoteKeyRing::new(None, None).unwrap();
        assert!(ring.verifier.is_none());
        assert!(ring.long_term_peer.is_none());
        assert!(ring.ephemeral_peer.is_none());
    }

    #[test]
    fn test_remote_ring_long_term_from_material() {
        let verkey = KeyMaterial::from([0x0au8; 32]);
        let pubkey = KeyMaterial::from([0x0bu8; 32]);
        let ring = RemoteKeyRing::new(Some(&verkey), Some(&pubkey)).unwrap();
        assert_eq!(ring.verifier, Some(VerifyKey::from_bytes([0x0au8; 32])));
        assert_eq!(
            ring.long_term_peer,
            Some(X25519PublicKey::from_bytes([0x0bu8; 32]))
        );
    }

    #[test]
    fn test_rekey_replaces_ephemeral_pair() {
        let mut ring = RemoteKeyRing::new(None, None).unwrap();
        ring.ephemeral_peer = Some(X25519PublicKey::from_bytes([0x0cu8; 32]));
        let before = ring.ephemeral_self.public_key();

        ring.rekey();

        assert_ne!(ring.ephemeral_self.public_key(), before);
        assert!(ring.ephemeral_peer.is_none());
    }
}
