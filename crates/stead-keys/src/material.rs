//! Seed and key input accepted by ring constructors.

use crate::error::{KeyError, Result};

/// Key material supplied to a constructor: a raw 32-byte seed/key or its
/// hex encoding. Fully-formed keypairs go through the typed constructors
/// directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyMaterial {
    /// Raw 32 bytes.
    Raw([u8; 32]),
    /// Hex-encoded 32 bytes.
    Hex(String),
}

impl KeyMaterial {
    /// Decode to the underlying 32 bytes.
    pub fn to_bytes(&self) -> Result<[u8; 32]> {
        match self {
            Self::Raw(bytes) => Ok(*bytes),
            Self::Hex(s) => {
                let bytes = hex::decode(s)
                    .map_err(|e| KeyError::InvalidKeyMaterial(format!("bad hex: {e}")))?;
                bytes.as_slice().try_into().map_err(|_| {
                    KeyError::InvalidKeyMaterial(format!(
                        "expected 32 bytes, got {}",
                        bytes.len()
                    ))
                })
            }
        }
    }
}

impl From<[u8; 32]> for KeyMaterial {
    fn from(bytes: [u8; 32]) -> Self {
        Self::Raw(bytes)
    }
}

impl From<&str> for KeyMaterial {
    fn from(s: &str) -> Self {
        Self::Hex(s.to_string())
    }
}

impl From<String> for KeyMaterial {
    fn from(s: String) -> Self {
        Self::Hex(s)
    }
}
