//! Validator-set rotation.

use gravity_crypto::{digest::valset_checkpoint, verifier::verify_quorum};
use gravity_primitives::{sig::RecoverableSig, validator::ValidatorSet};
use gravity_state::BridgeState;
use tracing::info;

use crate::{
    errors::{BridgeError, BridgeResult},
    events::ValsetUpdated,
};

/// Rotates the live validator set to `proposed`.
///
/// `asserted_current` is the caller's view of the set it is voting from; it
/// must re-derive the stored checkpoint exactly or the call rejects as
/// stale.  `sigs` is aligned positionally with `asserted_current`'s members.
/// The quorum is checked against the *current* (pre-rotation) set over the
/// checkpoint of the proposed set.
///
/// On acceptance the store is swapped atomically and a [`ValsetUpdated`]
/// notification is returned; on any rejection state is untouched.
pub fn update_valset(
    state: &mut BridgeState,
    proposed: &ValidatorSet,
    asserted_current: &ValidatorSet,
    sigs: &[Option<RecoverableSig>],
) -> BridgeResult<ValsetUpdated> {
    let bridge_id = state.params().bridge_id();

    // Bind the call to the caller's believed state.
    let derived = valset_checkpoint(bridge_id, asserted_current);
    let expected = state.current_checkpoint();
    if derived != expected {
        return Err(BridgeError::StaleCheckpoint { expected, derived });
    }

    // Anti-replay: strict nonce increase.
    let current_nonce = state.current_valset().nonce();
    if proposed.nonce() <= current_nonce {
        return Err(BridgeError::ValsetNonceNotIncreasing {
            current: current_nonce,
            proposed: proposed.nonce(),
        });
    }

    // Quorum of the current set over the new set's checkpoint.
    let new_checkpoint = valset_checkpoint(bridge_id, proposed);
    verify_quorum(
        new_checkpoint,
        state.current_valset(),
        asserted_current.validators(),
        sigs,
        state.params().power_threshold_bps(),
    )?;

    state.replace_valset(proposed.clone(), new_checkpoint);
    let event_nonce = state.next_event_nonce();

    info!(
        valset_nonce = proposed.nonce(),
        event_nonce,
        checkpoint = %new_checkpoint,
        total_power = proposed.total_power(),
        "validator set rotated"
    );

    Ok(ValsetUpdated {
        valset_nonce: proposed.nonce(),
        event_nonce,
        validators: proposed.addresses().collect(),
        powers: proposed.powers().collect(),
    })
}
