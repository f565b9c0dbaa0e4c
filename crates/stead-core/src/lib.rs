//! # Stead Core
//!
//! Pure identity and sequencing primitives for the stead transport core.
//!
//! This crate contains no I/O, no crypto, no timers. It is pure computation
//! over the identifiers every higher layer passes around.
//!
//! ## Key Types
//!
//! - [`EstateId`] - Process-scoped identifier of a protocol endpoint
//! - [`SessionId`] / [`TransactionId`] - Rolling 32-bit counters that
//!   survive wraparound
//! - [`TransactionIndex`] - Reference to an in-flight exchange
//!
//! ## Sequencing
//!
//! Session and transaction identifiers advance modulo 2^32 and are compared
//! under circular ordering. See the [`seq`] module.

pub mod seq;
pub mod types;

pub use seq::{is_newer, next_value};
pub use types::{EstateId, SessionId, TransactionId, TransactionIndex};
