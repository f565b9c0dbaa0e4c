//! End-to-end scenarios for estate identity, sequencing, keys, and
//! liveness, driven through the testkit stack.

use std::time::Duration;

use stead_core::{EstateId, SessionId, TransactionId, TransactionIndex};
use stead_estate::{
    Acceptance, EstateError, LocalEstate, RemoteEstate, DEFAULT_PORT, DEFAULT_TEST_PORT,
};
use stead_keys::KeyMaterial;
use stead_testkit::TestStack;

#[test]
fn local_estate_binds_any_address_but_displays_loopback() {
    let stack = TestStack::new("alpha");
    let local = LocalEstate::builder()
        .stack(&stack)
        .main(true)
        .host("0.0.0.0")
        .port(DEFAULT_PORT)
        .build()
        .unwrap();

    let (host, port) = local.estate().address();
    assert_eq!(host.to_string(), "0.0.0.0");
    assert_eq!(port, DEFAULT_PORT);
    assert_eq!(local.estate().display_host(), "127.0.0.1");
}

#[test]
fn local_estate_name_defaults_to_stack_name() {
    let stack = TestStack::new("alpha");
    let local = LocalEstate::builder().stack(&stack).build().unwrap();
    assert_eq!(local.estate().name(), "alpha");

    let named = LocalEstate::builder()
        .stack(&stack)
        .name("custom")
        .build()
        .unwrap();
    assert_eq!(named.estate().name(), "custom");
}

#[test]
fn remote_estate_defaults_to_loopback_test_port() {
    let remote = RemoteEstate::builder().build().unwrap();
    let (host, port) = remote.estate().address();
    assert_eq!(host.to_string(), "127.0.0.1");
    assert_eq!(port, DEFAULT_TEST_PORT);
}

#[test]
fn session_counter_rolls_past_maximum_to_one() {
    let stack = TestStack::new("alpha");
    let mut local = LocalEstate::builder()
        .stack(&stack)
        .session_id(SessionId::new(0xFFFF_FFFE))
        .build()
        .unwrap();

    assert_eq!(
        local.estate_mut().next_session_id(),
        SessionId::new(0xFFFF_FFFF)
    );
    assert_eq!(local.estate_mut().next_session_id(), SessionId::new(1));
    assert_eq!(local.estate_mut().next_session_id(), SessionId::new(2));
}

#[test]
fn remote_session_window_rejects_stale_and_equal_candidates() {
    let mut remote = RemoteEstate::builder()
        .last_session_id(SessionId::new(100))
        .build()
        .unwrap();

    assert!(!remote.is_newer_remote_session_id(SessionId::new(50)));
    assert!(remote.is_newer_remote_session_id(SessionId::new(150)));
    assert!(!remote.is_newer_remote_session_id(SessionId::new(100)));
}

#[test]
fn estate_ids_are_allocated_around_occupied_slots() {
    let stack = TestStack::new("alpha");
    stack.occupy(EstateId::new(1));

    let remote = RemoteEstate::builder().stack(&stack).build().unwrap();
    assert_eq!(remote.estate().id(), EstateId::new(2));

    let err = RemoteEstate::builder()
        .stack(&stack)
        .id(EstateId::new(1))
        .build()
        .unwrap_err();
    assert!(matches!(err, EstateError::DuplicateEstateId(_)));
}

#[test]
fn heartbeat_probes_follow_period_after_jittered_first_arm() {
    let stack = TestStack::new("alpha");
    let mut remote = RemoteEstate::builder()
        .stack(&stack)
        .period(Duration::from_secs(4))
        .offset(Duration::from_secs(2))
        .build()
        .unwrap();
    let id = remote.estate().id();

    // First countdown runs period + offset.
    stack.advance(Duration::from_secs(4));
    remote.process(&stack);
    assert!(stack.probes().is_empty());

    stack.advance(Duration::from_secs(2));
    remote.process(&stack);
    assert_eq!(stack.probes(), vec![id]);

    // Rearmed for one period; polling twice inside it stays silent.
    stack.advance(Duration::from_secs(3));
    remote.process(&stack);
    remote.process(&stack);
    assert_eq!(stack.probes(), vec![id]);

    stack.advance(Duration::from_secs(1));
    remote.process(&stack);
    assert_eq!(stack.probes(), vec![id, id]);
}

#[test]
fn refresh_marks_alive_and_restarts_without_jitter() {
    let stack = TestStack::new("alpha");
    let mut remote = RemoteEstate::builder().stack(&stack).build().unwrap();

    stack.advance(Duration::from_millis(700));
    remote.refresh(true);

    assert_eq!(remote.alive(), Some(true));
    assert_eq!(remote.timer().remaining(), remote.period());
}

#[test]
fn rekey_invalidates_session_state_and_old_ciphertexts() {
    let stack = TestStack::new("alpha");
    let mut remote = RemoteEstate::builder().stack(&stack).build().unwrap();
    remote.set_allowed(true);
    remote.set_acceptance(Acceptance::Accepted);

    // A peer seals a message to our current ephemeral key.
    let peer = stead_keys::X25519Keypair::generate();
    let sealed = peer
        .seal(b"allow cookie", &remote.keys().ephemeral_self.public_key())
        .unwrap();
    assert_eq!(
        remote
            .keys()
            .ephemeral_self
            .open(&sealed, &peer.public_key())
            .unwrap(),
        b"allow cookie"
    );

    let before = remote.keys().ephemeral_self.public_key();
    remote.rekey();

    assert_eq!(remote.allowed(), None);
    assert_ne!(remote.keys().ephemeral_self.public_key(), before);
    // Acceptance of the long-term key is untouched by a session rekey.
    assert_eq!(remote.acceptance(), Some(Acceptance::Accepted));
    // The discarded ephemeral secret is gone with the old pair.
    assert!(remote
        .keys()
        .ephemeral_self
        .open(&sealed, &peer.public_key())
        .is_err());
}

#[test]
fn signed_material_verifies_against_published_verify_key() {
    let stack = TestStack::new("alpha");
    let local = LocalEstate::builder()
        .stack(&stack)
        .sigkey(KeyMaterial::from([0x5au8; 32]))
        .build()
        .unwrap();

    // The remote record for "alpha" on the other side holds alpha's
    // published verify key as hex material.
    let verkey_hex = local.keys().signer.verify_key().to_hex();
    let remote = RemoteEstate::builder()
        .verkey(KeyMaterial::from(verkey_hex))
        .build()
        .unwrap();

    let signature = local.sign(b"join request");
    remote
        .keys()
        .verifier
        .expect("verify key was supplied")
        .verify(b"join request", &signature)
        .expect("signature must verify against published key");
}

#[test]
fn outstanding_transactions_survive_until_untracked() {
    let stack = TestStack::new("alpha");
    let mut remote = RemoteEstate::builder().stack(&stack).build().unwrap();

    let index = TransactionIndex {
        initiated_remotely: true,
        estate: remote.estate().id(),
        session: SessionId::new(7),
        transaction: TransactionId::new(3),
    };
    assert!(remote.track_transaction(index));
    assert!(remote.outstanding_transactions().contains(&index));

    // Teardown after the remote is declared dead.
    remote.set_alive(false);
    assert!(remote.untrack_transaction(&index));
    assert!(remote.outstanding_transactions().is_empty());
}

#[test]
fn rebinding_to_a_new_stack_rearms_the_heartbeat() {
    let old = TestStack::new("old");
    let mut remote = RemoteEstate::builder().stack(&old).build().unwrap();

    old.advance(Duration::from_secs(60));
    assert!(remote.timer().expired());

    let new = TestStack::new("new");
    remote.rebind(new.clock());
    assert!(!remote.timer().expired());
    assert_eq!(remote.timer().remaining(), remote.period() + remote.offset());
}
