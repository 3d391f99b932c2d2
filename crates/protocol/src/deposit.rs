//! Inbound deposits.
//!
//! Deposits need no signatures; they exist here so the event-nonce stream
//! covers inbound transfers and so custody is only reachable through an
//! initialized bridge.

use alloy_primitives::{Address, B256, U256};
use gravity_state::BridgeState;
use tracing::info;

use crate::{
    custody::AssetCustody,
    errors::{BridgeError, BridgeResult},
    events::DepositReceived,
};

/// Takes `amount` of `asset` from `sender` into bridge custody, destined
/// for `destination` on the chain identified by `target_chain`.
pub fn deposit(
    state: &mut BridgeState,
    custody: &mut impl AssetCustody,
    asset: Address,
    sender: Address,
    destination: B256,
    target_chain: B256,
    amount: U256,
) -> BridgeResult<DepositReceived> {
    if amount == U256::ZERO {
        return Err(BridgeError::ZeroDeposit);
    }

    custody.collect(asset, sender, amount)?;
    let event_nonce = state.next_event_nonce();

    info!(%asset, %sender, %amount, event_nonce, "deposit received");

    Ok(DepositReceived {
        asset,
        sender,
        destination,
        target_chain,
        amount,
        event_nonce,
    })
}
