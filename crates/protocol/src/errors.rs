//! Rejection taxonomy for bridge operations.

use alloy_primitives::{Address, B256};
use gravity_crypto::errors::VerifyError;
use gravity_primitives::{batch::BatchParseError, validator::ValidatorSetError};
use thiserror::Error;

use crate::custody::CustodyError;

/// Why a bridge operation was rejected.
///
/// Every rejection is atomic and side-effect-free, with one exception:
/// [`BridgeError::Custody`] surfaces *after* authorization has committed
/// (the nonce ledger has already advanced by then).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BridgeError {
    /// Malformed validator arrays: length mismatch, empty set, zero total
    /// power, duplicates, power overflow.
    #[error("malformed input: {0}")]
    MalformedValset(#[from] ValidatorSetError),

    /// Malformed transfer arrays.
    #[error("malformed input: {0}")]
    MalformedBatch(#[from] BatchParseError),

    /// Deposits must move a nonzero amount.
    #[error("malformed input: zero-amount deposit")]
    ZeroDeposit,

    /// The caller's asserted validator set does not re-derive the stored
    /// checkpoint; their view of the bridge is stale.
    #[error("stale checkpoint (stored {expected}, derived {derived})")]
    StaleCheckpoint { expected: B256, derived: B256 },

    /// Rotation replay: the proposed valset nonce does not strictly
    /// increase.
    #[error("valset nonce {proposed} not above current {current}")]
    ValsetNonceNotIncreasing { current: u64, proposed: u64 },

    /// Batch replay: the batch nonce does not strictly increase for the
    /// asset.
    #[error("batch nonce {proposed} for asset {asset} not above last accepted {last}")]
    BatchNonceNotIncreasing {
        asset: Address,
        last: u64,
        proposed: u64,
    },

    /// The batch timeout has elapsed.
    #[error("batch expired (timeout height {timeout}, current height {height})")]
    Expired { timeout: u64, height: u64 },

    /// The security-critical rejection: signatures did not carry quorum.
    #[error("quorum failure: {0}")]
    Quorum(#[from] VerifyError),

    /// The custody collaborator refused an asset movement.
    #[error("custody: {0}")]
    Custody(#[from] CustodyError),
}

/// Result alias for bridge operations.
pub type BridgeResult<T> = Result<T, BridgeError>;
