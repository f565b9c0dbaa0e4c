//! # Stead Estate
//!
//! Peer identity records and session continuity for a secure,
//! connectionless transport.
//!
//! Each communicating party is an estate: addressing, rolling
//! session/transaction counters, key material, and (for remotes) liveness
//! state. The owning stack creates one [`LocalEstate`] and zero or more
//! [`RemoteEstate`] records, each addressed by a process-wide-unique
//! [`EstateId`](stead_core::EstateId).
//!
//! This crate performs no network I/O and parses no packets. It consumes
//! two injected capabilities - the owning [`Stack`] and a [`TimeSource`] -
//! and exposes the sequencing, rekey, and liveness primitives the
//! transaction and scheduler layers call.
//!
//! All mutating operations are synchronous and expected to run on the
//! stack's single control thread; estates carry no internal locking.

pub mod addr;
pub mod error;
pub mod estate;
pub mod liveness;
pub mod local;
pub mod remote;
pub mod stack;
pub mod time;

pub use addr::{DEFAULT_PORT, DEFAULT_TEST_PORT};
pub use error::{EstateError, Result};
pub use estate::{Estate, EstateBuilder};
pub use liveness::LivenessTimer;
pub use local::{LocalEstate, LocalEstateBuilder};
pub use remote::{Acceptance, RemoteEstate, RemoteEstateBuilder};
pub use stack::Stack;
pub use time::{FrozenTimeSource, SystemTimeSource, TimeSource};
