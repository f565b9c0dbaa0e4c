//! # Stead Testkit
//!
//! Testing utilities for the stead transport core.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: a recording [`TestStack`](fixtures::TestStack) and a
//!   manually advanced time source for driving timers deterministically
//! - **Generators**: proptest strategies for identifiers and key material
//!
//! ## Fixtures
//!
//! ```rust
//! use stead_estate::RemoteEstate;
//! use stead_testkit::fixtures::TestStack;
//!
//! let stack = TestStack::new("alpha");
//! let mut remote = RemoteEstate::builder().stack(&stack).build().unwrap();
//!
//! stack.advance(remote.period() + remote.offset());
//! remote.process(&stack);
//! assert_eq!(stack.probes().len(), 1);
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use stead_testkit::generators;
//!
//! proptest! {
//!     #[test]
//!     fn advancing_is_always_newer(sid in generators::session_id()) {
//!         prop_assert!(sid.next().is_newer_than(sid));
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::{ManualTimeSource, TestStack};
