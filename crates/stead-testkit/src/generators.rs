//! Proptest generators for property-based testing.

use proptest::prelude::*;

use stead_core::{EstateId, SessionId, TransactionId, TransactionIndex};
use stead_keys::KeyMaterial;

/// Generate a random estate id.
pub fn estate_id() -> impl Strategy<Value = EstateId> {
    any::<u32>().prop_map(EstateId::new)
}

/// Generate a random session id.
pub fn session_id() -> impl Strategy<Value = SessionId> {
    any::<u32>().prop_map(SessionId::new)
}

/// Generate a random transaction id.
pub fn transaction_id() -> impl Strategy<Value = TransactionId> {
    any::<u32>().prop_map(TransactionId::new)
}

/// Generate a random 32-byte key seed.
pub fn key_seed() -> impl Strategy<Value = [u8; 32]> {
    any::<[u8; 32]>()
}

/// Generate key material in either accepted encoding.
pub fn key_material() -> impl Strategy<Value = KeyMaterial> {
    prop_oneof![
        key_seed().prop_map(KeyMaterial::from),
        key_seed().prop_map(|seed| KeyMaterial::from(hex::encode(seed))),
    ]
}

/// Generate a transaction index.
pub fn transaction_index() -> impl Strategy<Value = TransactionIndex> {
    (any::<bool>(), estate_id(), session_id(), transaction_id()).prop_map(
        |(initiated_remotely, estate, session, transaction)| TransactionIndex {
            initiated_remotely,
            estate,
            session,
            transaction,
        },
    )
}
