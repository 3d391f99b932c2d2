//! Errors for signature recovery and quorum verification.

use alloy_primitives::Address;
use gravity_primitives::validator::Power;
use thiserror::Error;

/// Errors recovering a signer address from a recoverable signature.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SigError {
    /// The recovery id byte is not the Ethereum-style 27 or 28.
    #[error("unsupported recovery id {0}")]
    InvalidRecoveryId(u8),

    /// The signature bytes do not decode or recovery failed.
    #[error("signature recovery: {0}")]
    Recovery(#[from] secp256k1::Error),
}

/// Reasons a quorum check rejects.
///
/// Every variant is a hard rejection; there is no partial acceptance.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VerifyError {
    /// Claimed validator count and signature slot count differ.
    #[error("malformed call: {claimed} claimed validators, {sigs} signature slots")]
    LengthMismatch { claimed: usize, sigs: usize },

    /// The same address was claimed (and signed) more than once.
    #[error("validator {0} claimed more than once")]
    DuplicateClaim(Address),

    /// A present signature did not recover to the claimed address.
    #[error("signature {index} recovered {recovered}, expected {expected}")]
    SignerMismatch {
        index: usize,
        expected: Address,
        recovered: Address,
    },

    /// The claimed (address, power) pair is not in the stored set.
    #[error("validator {address} with power {power} not in the current set")]
    NotInValidatorSet { address: Address, power: Power },

    /// Accumulated verified power is below the configured threshold.
    #[error("verified power {verified} below {threshold_bps} bps of total {total_power}")]
    InsufficientPower {
        verified: Power,
        total_power: Power,
        threshold_bps: u64,
    },

    /// A signature slot failed to decode or recover.
    #[error(transparent)]
    Sig(#[from] SigError),
}
