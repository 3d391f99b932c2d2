//! Bridge parameters fixed at genesis.

use std::io::{Read, Write};

use alloy_primitives::B256;
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Denominator for the power threshold (basis points).
pub const THRESHOLD_DENOM: u64 = 10_000;

/// Errors raised while constructing [`BridgeParams`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParamsError {
    /// Threshold must be in `1..=10000` basis points.
    #[error("power threshold {0} out of range")]
    ThresholdOutOfRange(u64),
}

/// Parameters that don't change for the lifetime of the bridge.
///
/// Threshold rotation would be a new protocol message, not a variation of
/// validator-set rotation, so there is deliberately no mutator here.  Both
/// deserialization paths re-run the range check.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BridgeParamsRaw", into = "BridgeParamsRaw")]
pub struct BridgeParams {
    /// Domain-separation identifier mixed into every digest.
    bridge_id: B256,

    /// Quorum threshold in basis points of total power.
    power_threshold_bps: u64,
}

/// Serialized shape of [`BridgeParams`].
#[derive(Serialize, Deserialize)]
struct BridgeParamsRaw {
    bridge_id: B256,
    power_threshold_bps: u64,
}

impl TryFrom<BridgeParamsRaw> for BridgeParams {
    type Error = ParamsError;

    fn try_from(raw: BridgeParamsRaw) -> Result<Self, Self::Error> {
        BridgeParams::new(raw.bridge_id, raw.power_threshold_bps)
    }
}

impl From<BridgeParams> for BridgeParamsRaw {
    fn from(params: BridgeParams) -> Self {
        Self {
            bridge_id: params.bridge_id,
            power_threshold_bps: params.power_threshold_bps,
        }
    }
}

impl BridgeParams {
    pub fn new(bridge_id: B256, power_threshold_bps: u64) -> Result<Self, ParamsError> {
        if power_threshold_bps == 0 || power_threshold_bps > THRESHOLD_DENOM {
            return Err(ParamsError::ThresholdOutOfRange(power_threshold_bps));
        }
        Ok(Self {
            bridge_id,
            power_threshold_bps,
        })
    }

    pub fn bridge_id(&self) -> B256 {
        self.bridge_id
    }

    pub fn power_threshold_bps(&self) -> u64 {
        self.power_threshold_bps
    }
}

impl BorshSerialize for BridgeParams {
    fn serialize<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(self.bridge_id.as_slice())?;
        BorshSerialize::serialize(&self.power_threshold_bps, writer)
    }
}

impl BorshDeserialize for BridgeParams {
    fn deserialize_reader<R: Read>(reader: &mut R) -> std::io::Result<Self> {
        let mut id = [0u8; 32];
        reader.read_exact(&mut id)?;
        let bps = u64::deserialize_reader(reader)?;
        BridgeParams::new(B256::from(id), bps)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }
}
