//! Composed bridge state and genesis construction.

use std::io::{Read, Write};

use alloy_primitives::{Address, B256};
use borsh::{BorshDeserialize, BorshSerialize};
use gravity_crypto::digest::valset_checkpoint;
use gravity_primitives::{params::BridgeParams, validator::ValidatorSet};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{nonces::NonceLedger, valset::ValsetStore};

/// All persistent bridge state: immutable params, the validator-set store,
/// the nonce ledger, and the event-nonce counter.
///
/// The protocol crate owns all transitions; the mutators here do no
/// validation of their own.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BridgeState {
    params: BridgeParams,
    valset: ValsetStore,
    nonces: NonceLedger,

    /// Last emitted event nonce.  Genesis counts as the first event so
    /// relayers see a gapless stream from the start.
    event_nonce: u64,
}

impl BridgeState {
    /// Initializes the bridge from genesis validators.  The set is expected
    /// to have been validated at construction.
    pub fn genesis(params: BridgeParams, validators: ValidatorSet) -> Self {
        let checkpoint = valset_checkpoint(params.bridge_id(), &validators);
        info!(
            %checkpoint,
            validators = validators.len(),
            total_power = validators.total_power(),
            "bridge genesis"
        );

        Self {
            params,
            valset: ValsetStore::new(validators, checkpoint),
            nonces: NonceLedger::new(),
            event_nonce: 1,
        }
    }

    pub fn params(&self) -> &BridgeParams {
        &self.params
    }

    pub fn current_valset(&self) -> &ValidatorSet {
        self.valset.current()
    }

    pub fn current_checkpoint(&self) -> B256 {
        self.valset.checkpoint()
    }

    pub fn last_batch_nonce(&self, asset: Address) -> u64 {
        self.nonces.last_batch_nonce(asset)
    }

    pub fn event_nonce(&self) -> u64 {
        self.event_nonce
    }

    /// Swaps in a new validator set.  Rotation-protocol use only.
    pub fn replace_valset(&mut self, new_set: ValidatorSet, new_checkpoint: B256) {
        self.valset.replace(new_set, new_checkpoint);
    }

    /// Records an accepted batch nonce.  Batch-protocol use only.
    pub fn record_batch_nonce(&mut self, asset: Address, nonce: u64) {
        self.nonces.record_batch_nonce(asset, nonce);
    }

    /// Bumps and returns the event nonce for a newly emitted event.
    pub fn next_event_nonce(&mut self) -> u64 {
        self.event_nonce += 1;
        self.event_nonce
    }
}

impl BorshSerialize for BridgeState {
    fn serialize<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        BorshSerialize::serialize(&self.params, writer)?;
        BorshSerialize::serialize(&self.valset, writer)?;
        BorshSerialize::serialize(&self.nonces, writer)?;
        BorshSerialize::serialize(&self.event_nonce, writer)
    }
}

impl BorshDeserialize for BridgeState {
    fn deserialize_reader<R: Read>(reader: &mut R) -> std::io::Result<Self> {
        Ok(Self {
            params: BridgeParams::deserialize_reader(reader)?,
            valset: ValsetStore::deserialize_reader(reader)?,
            nonces: NonceLedger::deserialize_reader(reader)?,
            event_nonce: u64::deserialize_reader(reader)?,
        })
    }
}
