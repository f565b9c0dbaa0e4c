//! The shared estate identity record.

use std::net::IpAddr;

use stead_core::{EstateId, SessionId, TransactionId};

use crate::addr::{self, DEFAULT_PORT};
use crate::error::{EstateError, Result};
use crate::stack::Stack;

/// Identity record shared by local and remote estates.
///
/// Tracks addressing and the rolling session/transaction counters. The id
/// is assigned at construction and immutable thereafter; counters only
/// move through [`next_session_id`]/[`next_transaction_id`] or an explicit
/// reset.
///
/// [`next_session_id`]: Estate::next_session_id
/// [`next_transaction_id`]: Estate::next_transaction_id
#[derive(Debug, Clone)]
pub struct Estate {
    id: EstateId,
    name: String,
    session_id: SessionId,
    transaction_id: TransactionId,
    host: IpAddr,
    port: u16,
    display_host: String,
}

impl Estate {
    /// Start building an estate record.
    pub fn builder<'a>() -> EstateBuilder<'a> {
        EstateBuilder::default()
    }

    /// This estate's process-scoped identifier.
    pub fn id(&self) -> EstateId {
        self.id
    }

    /// Human-readable label.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current session counter value.
    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    /// Current transaction counter value.
    pub fn transaction_id(&self) -> TransactionId {
        self.transaction_id
    }

    /// The resolved `(host, port)` address.
    pub fn address(&self) -> (IpAddr, u16) {
        (self.host, self.port)
    }

    /// Replace the resolved address.
    pub fn set_address(&mut self, host: IpAddr, port: u16) {
        self.host = host;
        self.port = port;
        self.display_host = addr::display_host(host);
    }

    /// Name this estate's address is displayed under. The any-address
    /// renders via loopback, never literally.
    pub fn display_host(&self) -> &str {
        &self.display_host
    }

    /// Advance the session counter and return the new value.
    pub fn next_session_id(&mut self) -> SessionId {
        self.session_id = self.session_id.next();
        self.session_id
    }

    /// Advance the transaction counter and return the new value.
    pub fn next_transaction_id(&mut self) -> TransactionId {
        self.transaction_id = self.transaction_id.next();
        self.transaction_id
    }

    /// Reset the session counter to an explicit starting point.
    pub fn reset_session_id(&mut self, sid: SessionId) {
        self.session_id = sid;
    }

    /// Reset the transaction counter to an explicit starting point.
    pub fn reset_transaction_id(&mut self, tid: TransactionId) {
        self.transaction_id = tid;
    }
}

/// Builder for [`Estate`].
///
/// An explicit [`address`] pair takes precedence over separately supplied
/// [`host`]/[`port`]. Without a stack, an unspecified id stays 0
/// (anonymous/unbound).
///
/// [`address`]: EstateBuilder::address
/// [`host`]: EstateBuilder::host
/// [`port`]: EstateBuilder::port
#[derive(Default)]
pub struct EstateBuilder<'a> {
    stack: Option<&'a dyn Stack>,
    id: Option<EstateId>,
    name: Option<String>,
    session_id: SessionId,
    transaction_id: TransactionId,
    host: Option<String>,
    port: Option<u16>,
    address: Option<(String, u16)>,
}

impl<'a> EstateBuilder<'a> {
    /// Attach the owning stack, used for id allocation and collision
    /// checks while building.
    pub fn stack(mut self, stack: &'a dyn Stack) -> Self {
        self.stack = Some(stack);
        self
    }

    /// Use an explicit id instead of asking the stack for one.
    pub fn id(mut self, id: EstateId) -> Self {
        self.id = Some(id);
        self
    }

    /// Human-readable label; defaults to `"estate<id>"`.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Starting session counter value.
    pub fn session_id(mut self, sid: SessionId) -> Self {
        self.session_id = sid;
        self
    }

    /// Starting transaction counter value.
    pub fn transaction_id(mut self, tid: TransactionId) -> Self {
        self.transaction_id = tid;
        self
    }

    /// Host to resolve; empty means the any-address.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Port; defaults to [`DEFAULT_PORT`].
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Explicit `(host, port)` pair; overrides `host` and `port`.
    pub fn address(mut self, host: impl Into<String>, port: u16) -> Self {
        self.address = Some((host.into(), port));
        self
    }

    /// Whether a host or address pair has been supplied.
    pub(crate) fn is_addressed(&self) -> bool {
        self.host.is_some() || self.address.is_some()
    }

    /// Resolve identity and addressing into an estate record.
    pub fn build(self) -> Result<Estate> {
        let id = match self.id {
            Some(id) => {
                if let Some(stack) = self.stack {
                    if stack.has_remote(id) {
                        return Err(EstateError::DuplicateEstateId(id));
                    }
                }
                id
            }
            None => match self.stack {
                Some(stack) => {
                    let mut id = stack.next_estate_id();
                    while stack.has_remote(id) {
                        id = stack.next_estate_id();
                    }
                    id
                }
                None => EstateId::UNBOUND,
            },
        };

        let (host, port) = match self.address {
            Some((host, port)) => (host, port),
            None => (
                self.host.unwrap_or_default(),
                self.port.unwrap_or(DEFAULT_PORT),
            ),
        };
        let host = addr::resolve_host(&host, port)?;

        let name = match self.name {
            Some(name) if !name.is_empty() => name,
            _ => format!("estate{}", id.value()),
        };

        tracing::debug!(id = id.value(), name = %name, "estate created");

        Ok(Estate {
            id,
            name,
            session_id: self.session_id,
            transaction_id: self.transaction_id,
            host,
            port,
            display_host: addr::display_host(host),
        })
    }
}
