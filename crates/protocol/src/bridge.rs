//! Caller-facing bridge surface.
//!
//! Operations accept the parallel-array shapes external callers use and
//! assemble them into the typed forms the protocols consume.  Signature
//! slots are `Option`s: an absent entry is a validator that did not
//! participate, not an invalid signature.

use alloy_primitives::{Address, B256, U256};
use gravity_primitives::{
    batch::TransferBatch,
    params::BridgeParams,
    sig::RecoverableSig,
    validator::{Power, ValidatorSet},
};
use gravity_state::BridgeState;

use crate::{
    batch,
    clock::ChainClock,
    custody::AssetCustody,
    deposit,
    errors::BridgeResult,
    events::{BatchExecuted, DepositReceived, ValsetUpdated},
    rotation,
};

/// The governance core of the bridge.
///
/// Owns the only mutable state; each operation runs to completion within a
/// single `&mut self` call, so there is no interleaving between validation
/// and commit.
#[derive(Clone, Debug)]
pub struct Bridge {
    state: BridgeState,
}

impl Bridge {
    /// Initializes the bridge from genesis validator arrays with valset
    /// nonce 0.
    pub fn new(
        params: BridgeParams,
        genesis_addresses: &[Address],
        genesis_powers: &[Power],
    ) -> BridgeResult<Self> {
        let genesis = ValidatorSet::from_parts(genesis_addresses, genesis_powers, 0)?;
        Ok(Self {
            state: BridgeState::genesis(params, genesis),
        })
    }

    /// Resumes from previously persisted state.
    pub fn from_state(state: BridgeState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &BridgeState {
        &self.state
    }

    pub fn params(&self) -> &BridgeParams {
        self.state.params()
    }

    pub fn current_checkpoint(&self) -> B256 {
        self.state.current_checkpoint()
    }

    pub fn current_valset(&self) -> &ValidatorSet {
        self.state.current_valset()
    }

    pub fn last_batch_nonce(&self, asset: Address) -> u64 {
        self.state.last_batch_nonce(asset)
    }

    pub fn event_nonce(&self) -> u64 {
        self.state.event_nonce()
    }

    /// Rotates the validator set.  The old arrays assert the set the caller
    /// is voting from and must match stored state bit-for-bit.
    #[allow(clippy::too_many_arguments)]
    pub fn update_valset(
        &mut self,
        new_addresses: &[Address],
        new_powers: &[Power],
        new_nonce: u64,
        old_addresses: &[Address],
        old_powers: &[Power],
        old_nonce: u64,
        sigs: &[Option<RecoverableSig>],
    ) -> BridgeResult<ValsetUpdated> {
        let proposed = ValidatorSet::from_parts(new_addresses, new_powers, new_nonce)?;
        let asserted = ValidatorSet::from_parts(old_addresses, old_powers, old_nonce)?;
        rotation::update_valset(&mut self.state, &proposed, &asserted, sigs)
    }

    /// Authorizes and executes a transfer batch under the current set.
    #[allow(clippy::too_many_arguments)]
    pub fn submit_batch(
        &mut self,
        custody: &mut impl AssetCustody,
        clock: &impl ChainClock,
        valset_addresses: &[Address],
        valset_powers: &[Power],
        valset_nonce: u64,
        sigs: &[Option<RecoverableSig>],
        amounts: &[U256],
        destinations: &[Address],
        fees: &[U256],
        batch_nonce: u64,
        asset: Address,
        timeout: u64,
        fee_receiver: Address,
    ) -> BridgeResult<BatchExecuted> {
        let asserted = ValidatorSet::from_parts(valset_addresses, valset_powers, valset_nonce)?;
        let batch = TransferBatch::from_parts(
            asset,
            amounts,
            destinations,
            fees,
            batch_nonce,
            timeout,
            fee_receiver,
        )?;
        batch::submit_batch(&mut self.state, custody, clock, &asserted, sigs, &batch)
    }

    /// Moves an inbound deposit into custody.
    pub fn deposit(
        &mut self,
        custody: &mut impl AssetCustody,
        asset: Address,
        sender: Address,
        destination: B256,
        target_chain: B256,
        amount: U256,
    ) -> BridgeResult<DepositReceived> {
        deposit::deposit(
            &mut self.state,
            custody,
            asset,
            sender,
            destination,
            target_chain,
            amount,
        )
    }
}

#[cfg(test)]
mod tests {
    use gravity_primitives::validator::ValidatorSetError;
    use gravity_test_utils::{example_powers, generate_signers, sign_with_all, valset_of};

    use super::*;
    use crate::errors::BridgeError;

    fn params() -> BridgeParams {
        BridgeParams::new(B256::repeat_byte(0x66), 6666).expect("valid params")
    }

    #[test]
    fn test_genesis_rejects_malformed_arrays() {
        let res = Bridge::new(params(), &[Address::from([1; 20])], &[10, 20]);
        assert_eq!(
            res.err(),
            Some(BridgeError::MalformedValset(
                ValidatorSetError::LengthMismatch {
                    addresses: 1,
                    powers: 2
                }
            ))
        );

        let res = Bridge::new(params(), &[], &[]);
        assert_eq!(
            res.err(),
            Some(BridgeError::MalformedValset(ValidatorSetError::Empty))
        );
    }

    #[test]
    fn test_rotation_rejects_empty_replacement() {
        let signers = generate_signers(8);
        let set = valset_of(&signers, &example_powers(), 0);
        let addresses: Vec<Address> = set.addresses().collect();
        let powers: Vec<Power> = set.powers().collect();

        let mut bridge = Bridge::new(params(), &addresses, &powers).expect("genesis");

        let res = bridge.update_valset(&[], &[], 1, &addresses, &powers, 0, &[]);
        assert_eq!(
            res.err(),
            Some(BridgeError::MalformedValset(ValidatorSetError::Empty))
        );
    }

    #[test]
    fn test_facade_rotation_round_trip() {
        let signers = generate_signers(8);
        let set = valset_of(&signers, &example_powers(), 0);
        let addresses: Vec<Address> = set.addresses().collect();
        let powers: Vec<Power> = set.powers().collect();

        let mut bridge = Bridge::new(params(), &addresses, &powers).expect("genesis");
        assert_eq!(bridge.current_valset().nonce(), 0);

        let proposed = valset_of(&signers, &example_powers(), 1);
        let digest =
            gravity_crypto::digest::valset_checkpoint(params().bridge_id(), &proposed);
        let sigs = sign_with_all(&signers, digest);

        let event = bridge
            .update_valset(&addresses, &powers, 1, &addresses, &powers, 0, &sigs)
            .expect("rotation accepted");

        assert_eq!(event.valset_nonce, 1);
        assert_eq!(bridge.current_valset().nonce(), 1);
        assert_eq!(bridge.current_checkpoint(), digest);
        assert_eq!(bridge.last_batch_nonce(Address::from([9; 20])), 0);
    }
}
