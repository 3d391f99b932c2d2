//! Per-asset batch nonce ledger.

use std::{
    collections::BTreeMap,
    io::{Read, Write},
};

use alloy_primitives::Address;
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

/// Tracks the last accepted batch nonce for each asset.
///
/// Monotonic and append-only: entries are only ever created or increased.
/// The global validator-set nonce lives on the stored set itself.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct NonceLedger {
    batch_nonces: BTreeMap<Address, u64>,
}

impl NonceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last accepted batch nonce for `asset`; 0 if none has been accepted.
    pub fn last_batch_nonce(&self, asset: Address) -> u64 {
        self.batch_nonces.get(&asset).copied().unwrap_or(0)
    }

    /// Records an accepted batch nonce.  Callers must have already checked
    /// strict monotonicity.
    pub fn record_batch_nonce(&mut self, asset: Address, nonce: u64) {
        debug_assert!(
            nonce > self.last_batch_nonce(asset),
            "nonce ledger only moves forward"
        );
        self.batch_nonces.insert(asset, nonce);
    }

    /// Assets with at least one accepted batch.
    pub fn assets(&self) -> impl Iterator<Item = Address> + '_ {
        self.batch_nonces.keys().copied()
    }
}

impl BorshSerialize for NonceLedger {
    fn serialize<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        BorshSerialize::serialize(&(self.batch_nonces.len() as u32), writer)?;
        for (asset, nonce) in &self.batch_nonces {
            writer.write_all(asset.as_slice())?;
            BorshSerialize::serialize(nonce, writer)?;
        }
        Ok(())
    }
}

impl BorshDeserialize for NonceLedger {
    fn deserialize_reader<R: Read>(reader: &mut R) -> std::io::Result<Self> {
        let len = u32::deserialize_reader(reader)? as usize;
        let mut batch_nonces = BTreeMap::new();
        for _ in 0..len {
            let mut asset = [0u8; 20];
            reader.read_exact(&mut asset)?;
            let nonce = u64::deserialize_reader(reader)?;
            batch_nonces.insert(Address::from(asset), nonce);
        }
        Ok(Self { batch_nonces })
    }
}
