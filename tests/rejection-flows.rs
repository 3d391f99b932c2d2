//! Replay, staleness, and expiry rejection flows across the full surface.

mod common;

use alloy_primitives::{Address, B256, U256};
use common::{bridge_id, VaultCustody};
use gravity_crypto::{
    digest::{batch_digest, valset_checkpoint},
    errors::VerifyError,
};
use gravity_primitives::{batch::TransferBatch, params::BridgeParams};
use gravity_protocol::{clock::FixedClock, Bridge, BridgeError};
use gravity_test_utils::{example_powers, generate_signers, sign_with_all, valset_of, Signer};

struct Harness {
    bridge: Bridge,
    vault: VaultCustody,
    signers: Vec<Signer>,
    addresses: Vec<Address>,
    token: Address,
}

fn setup() -> Harness {
    common::init_logging();

    let signers = generate_signers(8);
    let addresses: Vec<Address> = signers.iter().map(|s| s.address()).collect();
    let params = BridgeParams::new(bridge_id(), 6666).expect("valid params");
    let mut bridge = Bridge::new(params, &addresses, &example_powers()).expect("genesis");

    let token = Address::from([0xee; 20]);
    let mut vault = VaultCustody::new();
    bridge
        .deposit(
            &mut vault,
            token,
            Address::from([0x0a; 20]),
            B256::repeat_byte(0xd0),
            B256::ZERO,
            U256::from(10_000),
        )
        .expect("funding deposit");

    Harness {
        bridge,
        vault,
        signers,
        addresses,
        token,
    }
}

fn simple_batch(token: Address, nonce: u64) -> TransferBatch {
    TransferBatch::from_parts(
        token,
        &[U256::from(5)],
        &[Address::from([0x09; 20])],
        &[U256::from(1)],
        nonce,
        1_000_000,
        Address::from([0xfe; 20]),
    )
    .expect("valid batch")
}

fn submit(
    h: &mut Harness,
    batch: &TransferBatch,
    sigs: &[Option<gravity_primitives::sig::RecoverableSig>],
    height: u64,
) -> Result<gravity_protocol::events::BatchExecuted, BridgeError> {
    let amounts: Vec<U256> = batch.amounts().collect();
    let destinations: Vec<Address> = batch.destinations().collect();
    let fees: Vec<U256> = batch.fees().collect();

    h.bridge.submit_batch(
        &mut h.vault,
        &FixedClock(height),
        &h.addresses,
        &example_powers(),
        0,
        sigs,
        &amounts,
        &destinations,
        &fees,
        batch.nonce,
        batch.asset,
        batch.timeout,
        batch.fee_receiver,
    )
}

#[test]
fn batch_replay_rejects_idempotently() {
    let mut h = setup();

    let batch = simple_batch(h.token, 1);
    let sigs = sign_with_all(&h.signers, batch_digest(bridge_id(), &batch));

    submit(&mut h, &batch, &sigs, 10).expect("first submission accepted");
    let balance_after = h.vault.balance(h.token);
    let event_nonce_after = h.bridge.event_nonce();

    // Byte-identical resubmission: rejected, nothing moves.
    let res = submit(&mut h, &batch, &sigs, 10);
    assert_eq!(
        res.err(),
        Some(BridgeError::BatchNonceNotIncreasing {
            asset: h.token,
            last: 1,
            proposed: 1
        })
    );
    assert_eq!(h.vault.balance(h.token), balance_after);
    assert_eq!(h.bridge.event_nonce(), event_nonce_after);
}

#[test]
fn expired_batch_rejects() {
    let mut h = setup();

    let batch = simple_batch(h.token, 1);
    let sigs = sign_with_all(&h.signers, batch_digest(bridge_id(), &batch));

    let res = submit(&mut h, &batch, &sigs, batch.timeout);
    assert_eq!(
        res.err(),
        Some(BridgeError::Expired {
            timeout: batch.timeout,
            height: batch.timeout
        })
    );
    assert_eq!(h.bridge.last_batch_nonce(h.token), 0);
}

#[test]
fn superseded_set_cannot_authorize() {
    let mut h = setup();

    // Rotate to a fresh cohort of validators.
    let new_signers: Vec<Signer> = (200..208).map(Signer::from_seed).collect();
    let new_addresses: Vec<Address> = new_signers.iter().map(|s| s.address()).collect();
    let new_set = valset_of(&new_signers, &example_powers(), 1);

    let rotation_sigs = sign_with_all(&h.signers, valset_checkpoint(bridge_id(), &new_set));
    h.bridge
        .update_valset(
            &new_addresses,
            &example_powers(),
            1,
            &h.addresses,
            &example_powers(),
            0,
            &rotation_sigs,
        )
        .expect("rotation accepted");

    // Asserting the pre-rotation set is now a stale view.
    let batch = simple_batch(h.token, 1);
    let old_sigs = sign_with_all(&h.signers, batch_digest(bridge_id(), &batch));
    let res = submit(&mut h, &batch, &old_sigs, 10);
    assert!(matches!(res, Err(BridgeError::StaleCheckpoint { .. })));

    // Asserting the live set but signing with the superseded cohort is a
    // quorum failure.
    let amounts: Vec<U256> = batch.amounts().collect();
    let destinations: Vec<Address> = batch.destinations().collect();
    let fees: Vec<U256> = batch.fees().collect();
    let res = h.bridge.submit_batch(
        &mut h.vault,
        &FixedClock(10),
        &new_addresses,
        &example_powers(),
        1,
        &old_sigs,
        &amounts,
        &destinations,
        &fees,
        batch.nonce,
        batch.asset,
        batch.timeout,
        batch.fee_receiver,
    );
    assert!(matches!(
        res,
        Err(BridgeError::Quorum(VerifyError::SignerMismatch { .. }))
    ));
    assert_eq!(h.bridge.last_batch_nonce(h.token), 0);

    // The new cohort's signatures work.
    let new_sigs = sign_with_all(&new_signers, batch_digest(bridge_id(), &batch));
    h.bridge
        .submit_batch(
            &mut h.vault,
            &FixedClock(10),
            &new_addresses,
            &example_powers(),
            1,
            &new_sigs,
            &amounts,
            &destinations,
            &fees,
            batch.nonce,
            batch.asset,
            batch.timeout,
            batch.fee_receiver,
        )
        .expect("live cohort batch accepted");
}

#[test]
fn rotation_replay_rejects_idempotently() {
    let mut h = setup();

    let next = valset_of(&h.signers, &example_powers(), 1);
    let sigs = sign_with_all(&h.signers, valset_checkpoint(bridge_id(), &next));

    h.bridge
        .update_valset(
            &h.addresses,
            &example_powers(),
            1,
            &h.addresses,
            &example_powers(),
            0,
            &sigs,
        )
        .expect("first rotation accepted");
    let checkpoint_after = h.bridge.current_checkpoint();

    // Identical resubmission: the asserted old set no longer matches.
    let res = h.bridge.update_valset(
        &h.addresses,
        &example_powers(),
        1,
        &h.addresses,
        &example_powers(),
        0,
        &sigs,
    );
    assert!(matches!(res, Err(BridgeError::StaleCheckpoint { .. })));
    assert_eq!(h.bridge.current_checkpoint(), checkpoint_after);
    assert_eq!(h.bridge.current_valset().nonce(), 1);
}
