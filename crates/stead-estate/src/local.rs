//! The local (self) estate.

use stead_keys::{KeyMaterial, LocalKeyRing, Signature};

use crate::estate::{Estate, EstateBuilder};
use crate::error::Result;
use crate::stack::Stack;

/// This process's own estate: identity plus long-term signing and
/// decryption keys.
///
/// Created exactly once per stack, at stack initialization, and destroyed
/// with it. Peers learn the public halves of both keys through the join
/// handshake.
#[derive(Debug)]
pub struct LocalEstate {
    estate: Estate,
    main: bool,
    keys: LocalKeyRing,
}

impl LocalEstate {
    /// Start building a local estate.
    pub fn builder<'a>() -> LocalEstateBuilder<'a> {
        LocalEstateBuilder::default()
    }

    /// The shared identity record.
    pub fn estate(&self) -> &Estate {
        &self.estate
    }

    /// Mutable access to the identity record, for counter advancement.
    pub fn estate_mut(&mut self) -> &mut Estate {
        &mut self.estate
    }

    /// Whether this is the stack's primary/self estate.
    pub fn is_main(&self) -> bool {
        self.main
    }

    /// Long-term key material.
    pub fn keys(&self) -> &LocalKeyRing {
        &self.keys
    }

    /// Sign outgoing material with the long-term identity key.
    pub fn sign(&self, message: &[u8]) -> Signature {
        self.keys.signer.sign(message)
    }
}

/// Builder for [`LocalEstate`].
///
/// The name defaults to the stack's name when one is attached, then to
/// `"estate<id>"`.
#[derive(Default)]
pub struct LocalEstateBuilder<'a> {
    inner: EstateBuilder<'a>,
    stack: Option<&'a dyn Stack>,
    name: Option<String>,
    main: bool,
    sigkey: Option<KeyMaterial>,
    prikey: Option<KeyMaterial>,
}

impl<'a> LocalEstateBuilder<'a> {
    /// Attach the owning stack.
    pub fn stack(mut self, stack: &'a dyn Stack) -> Self {
        self.stack = Some(stack);
        self.inner = self.inner.stack(stack);
        self
    }

    /// Use an explicit id instead of asking the stack for one.
    pub fn id(mut self, id: stead_core::EstateId) -> Self {
        self.inner = self.inner.id(id);
        self
    }

    /// Human-readable label.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Mark this estate as the stack's primary/self estate.
    pub fn main(mut self, main: bool) -> Self {
        self.main = main;
        self
    }

    /// Starting session counter value.
    pub fn session_id(mut self, sid: stead_core::SessionId) -> Self {
        self.inner = self.inner.session_id(sid);
        self
    }

    /// Starting transaction counter value.
    pub fn transaction_id(mut self, tid: stead_core::TransactionId) -> Self {
        self.inner = self.inner.transaction_id(tid);
        self
    }

    /// Host to resolve; empty means the any-address.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.inner = self.inner.host(host);
        self
    }

    /// Port; defaults to [`DEFAULT_PORT`](crate::addr::DEFAULT_PORT).
    pub fn port(mut self, port: u16) -> Self {
        self.inner = self.inner.port(port);
        self
    }

    /// Explicit `(host, port)` pair; overrides `host` and `port`.
    pub fn address(mut self, host: impl Into<String>, port: u16) -> Self {
        self.inner = self.inner.address(host, port);
        self
    }

    /// Long-term signing key material; generated fresh when absent.
    pub fn sigkey(mut self, material: KeyMaterial) -> Self {
        self.sigkey = Some(material);
        self
    }

    /// Long-term encryption key material; generated fresh when absent.
    pub fn prikey(mut self, material: KeyMaterial) -> Self {
        self.prikey = Some(material);
        self
    }

    /// Build the local estate, generating any absent key material.
    pub fn build(self) -> Result<LocalEstate> {
        let mut inner = self.inner;
        match self.name {
            Some(name) => inner = inner.name(name),
            None => {
                if let Some(stack) = self.stack {
                    inner = inner.name(stack.name());
                }
            }
        }

        let estate = inner.build()?;
        let keys = LocalKeyRing::new(self.sigkey.as_ref(), self.prikey.as_ref())?;

        Ok(LocalEstate {
            estate,
            main: self.main,
            keys,
        })
    }
}
