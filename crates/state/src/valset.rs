//! Single-slot store for the live validator set.

use std::io::{Read, Write};

use alloy_primitives::B256;
use borsh::{BorshDeserialize, BorshSerialize};
use gravity_primitives::validator::ValidatorSet;
use serde::{Deserialize, Serialize};

/// Holds the current validator set and its checkpoint.
///
/// This is a guarded register: it performs no validation of its own and must
/// only be overwritten by the rotation protocol, which has already verified
/// the replacement under the previous set.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ValsetStore {
    current: ValidatorSet,
    checkpoint: B256,
}

impl ValsetStore {
    pub fn new(current: ValidatorSet, checkpoint: B256) -> Self {
        Self {
            current,
            checkpoint,
        }
    }

    pub fn current(&self) -> &ValidatorSet {
        &self.current
    }

    pub fn checkpoint(&self) -> B256 {
        self.checkpoint
    }

    /// Atomically replaces the live set and its checkpoint.
    pub fn replace(&mut self, new_set: ValidatorSet, new_checkpoint: B256) {
        self.current = new_set;
        self.checkpoint = new_checkpoint;
    }
}

impl BorshSerialize for ValsetStore {
    fn serialize<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        BorshSerialize::serialize(&self.current, writer)?;
        writer.write_all(self.checkpoint.as_slice())
    }
}

impl BorshDeserialize for ValsetStore {
    fn deserialize_reader<R: Read>(reader: &mut R) -> std::io::Result<Self> {
        let current = ValidatorSet::deserialize_reader(reader)?;
        let mut checkpoint = [0u8; 32];
        reader.read_exact(&mut checkpoint)?;
        Ok(Self {
            current,
            checkpoint: B256::from(checkpoint),
        })
    }
}
