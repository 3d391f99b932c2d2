//! Transfer-batch authorization.

use alloy_primitives::U256;
use gravity_crypto::{
    digest::{batch_digest, valset_checkpoint},
    verifier::verify_quorum,
};
use gravity_primitives::{batch::TransferBatch, sig::RecoverableSig, validator::ValidatorSet};
use gravity_state::BridgeState;
use tracing::info;

use crate::{
    clock::ChainClock,
    custody::AssetCustody,
    errors::{BridgeError, BridgeResult},
    events::BatchExecuted,
};

/// Authorizes and executes a transfer batch.
///
/// The batch always binds to the validator set current at call time:
/// `asserted_valset` must re-derive the stored checkpoint, and `sigs` must
/// come from that exact set.  The nonce ledger is updated *before* custody
/// is invoked, so a reentrant custody call observing bridge state cannot
/// replay this batch.
pub fn submit_batch(
    state: &mut BridgeState,
    custody: &mut impl AssetCustody,
    clock: &impl ChainClock,
    asserted_valset: &ValidatorSet,
    sigs: &[Option<RecoverableSig>],
    batch: &TransferBatch,
) -> BridgeResult<BatchExecuted> {
    let height = clock.current_height();
    if height >= batch.timeout {
        return Err(BridgeError::Expired {
            timeout: batch.timeout,
            height,
        });
    }

    // Anti-replay: strict per-asset nonce increase.
    let last = state.last_batch_nonce(batch.asset);
    if batch.nonce <= last {
        return Err(BridgeError::BatchNonceNotIncreasing {
            asset: batch.asset,
            last,
            proposed: batch.nonce,
        });
    }

    // The caller must be voting from the live set.
    let bridge_id = state.params().bridge_id();
    let derived = valset_checkpoint(bridge_id, asserted_valset);
    let expected = state.current_checkpoint();
    if derived != expected {
        return Err(BridgeError::StaleCheckpoint { expected, derived });
    }

    let digest = batch_digest(bridge_id, batch);
    verify_quorum(
        digest,
        state.current_valset(),
        asserted_valset.validators(),
        sigs,
        state.params().power_threshold_bps(),
    )?;

    // Computed before any mutation so an overflow rejection stays
    // side-effect-free.
    let total_fees = batch.total_fees().map_err(BridgeError::MalformedBatch)?;

    // Commit point.  Custody runs strictly after this.
    state.record_batch_nonce(batch.asset, batch.nonce);
    let event_nonce = state.next_event_nonce();

    for transfer in &batch.transfers {
        custody.release(batch.asset, transfer.destination, transfer.amount)?;
    }
    if total_fees > U256::ZERO {
        custody.release(batch.asset, batch.fee_receiver, total_fees)?;
    }

    info!(
        asset = %batch.asset,
        batch_nonce = batch.nonce,
        event_nonce,
        transfers = batch.transfers.len(),
        "transfer batch executed"
    );

    Ok(BatchExecuted {
        asset: batch.asset,
        batch_nonce: batch.nonce,
        event_nonce,
        transfer_count: batch.transfers.len(),
        total_fees,
    })
}
