//! Outbound transfer batch types.

use std::io::{Read, Write};

use alloy_primitives::{Address, U256};
use arbitrary::Arbitrary;
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while assembling a [`TransferBatch`] from caller arrays.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BatchParseError {
    /// The amounts/destinations/fees arrays have different lengths.
    #[error("transfer array length mismatch ({amounts} amounts, {destinations} destinations, {fees} fees)")]
    LengthMismatch {
        amounts: usize,
        destinations: usize,
        fees: usize,
    },

    /// The fee sum does not fit a `U256`.
    #[error("fee total overflows")]
    FeeOverflow,
}

/// One outbound transfer inside a batch.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize, Arbitrary)]
pub struct Transfer {
    pub destination: Address,
    pub amount: U256,
    pub fee: U256,
}

impl BorshSerialize for Transfer {
    fn serialize<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(self.destination.as_slice())?;
        writer.write_all(&self.amount.to_le_bytes::<32>())?;
        writer.write_all(&self.fee.to_le_bytes::<32>())
    }
}

impl BorshDeserialize for Transfer {
    fn deserialize_reader<R: Read>(reader: &mut R) -> std::io::Result<Self> {
        let mut dest = [0u8; 20];
        reader.read_exact(&mut dest)?;
        let mut amount = [0u8; 32];
        reader.read_exact(&mut amount)?;
        let mut fee = [0u8; 32];
        reader.read_exact(&mut fee)?;
        Ok(Self {
            destination: Address::from(dest),
            amount: U256::from_le_bytes(amount),
            fee: U256::from_le_bytes(fee),
        })
    }
}

/// A batch of outbound transfers authorized together under one quorum.
///
/// The batch nonce is scoped per asset and must strictly increase for that
/// asset.  `timeout` is a block height after which the batch is no longer
/// executable.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize, Arbitrary)]
pub struct TransferBatch {
    pub asset: Address,
    pub transfers: Vec<Transfer>,
    pub nonce: u64,
    pub timeout: u64,
    pub fee_receiver: Address,
}

impl TransferBatch {
    /// Assembles a batch from the parallel arrays of the caller-facing
    /// operation shape.
    pub fn from_parts(
        asset: Address,
        amounts: &[U256],
        destinations: &[Address],
        fees: &[U256],
        nonce: u64,
        timeout: u64,
        fee_receiver: Address,
    ) -> Result<Self, BatchParseError> {
        if amounts.len() != destinations.len() || amounts.len() != fees.len() {
            return Err(BatchParseError::LengthMismatch {
                amounts: amounts.len(),
                destinations: destinations.len(),
                fees: fees.len(),
            });
        }

        let transfers = amounts
            .iter()
            .zip(destinations)
            .zip(fees)
            .map(|((amount, destination), fee)| Transfer {
                destination: *destination,
                amount: *amount,
                fee: *fee,
            })
            .collect();

        Ok(Self {
            asset,
            transfers,
            nonce,
            timeout,
            fee_receiver,
        })
    }

    pub fn amounts(&self) -> impl Iterator<Item = U256> + '_ {
        self.transfers.iter().map(|t| t.amount)
    }

    pub fn destinations(&self) -> impl Iterator<Item = Address> + '_ {
        self.transfers.iter().map(|t| t.destination)
    }

    pub fn fees(&self) -> impl Iterator<Item = U256> + '_ {
        self.transfers.iter().map(|t| t.fee)
    }

    /// Sum of all transfer fees, paid to the fee receiver on execution.
    pub fn total_fees(&self) -> Result<U256, BatchParseError> {
        let mut total = U256::ZERO;
        for transfer in &self.transfers {
            total = total
                .checked_add(transfer.fee)
                .ok_or(BatchParseError::FeeOverflow)?;
        }
        Ok(total)
    }
}

impl BorshSerialize for TransferBatch {
    fn serialize<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(self.asset.as_slice())?;
        BorshSerialize::serialize(&(self.transfers.len() as u32), writer)?;
        for transfer in &self.transfers {
            BorshSerialize::serialize(transfer, writer)?;
        }
        BorshSerialize::serialize(&self.nonce, writer)?;
        BorshSerialize::serialize(&self.timeout, writer)?;
        writer.write_all(self.fee_receiver.as_slice())
    }
}

impl BorshDeserialize for TransferBatch {
    fn deserialize_reader<R: Read>(reader: &mut R) -> std::io::Result<Self> {
        let mut asset = [0u8; 20];
        reader.read_exact(&mut asset)?;
        let len = u32::deserialize_reader(reader)? as usize;
        let mut transfers = Vec::with_capacity(len);
        for _ in 0..len {
            transfers.push(Transfer::deserialize_reader(reader)?);
        }
        let nonce = u64::deserialize_reader(reader)?;
        let timeout = u64::deserialize_reader(reader)?;
        let mut fee_receiver = [0u8; 20];
        reader.read_exact(&mut fee_receiver)?;
        Ok(Self {
            asset: Address::from(asset),
            transfers,
            nonce,
            timeout,
            fee_receiver: Address::from(fee_receiver),
        })
    }
}
