//! Seam to the external asset custody mechanism.

use alloy_primitives::{Address, U256};
use thiserror::Error;

/// Error surfaced by a custody implementation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("custody rejected transfer: {0}")]
pub struct CustodyError(pub String);

/// Moves assets in and out of bridge custody.
///
/// The protocols only ever call into this *after* authorization has
/// committed (nonce ledger updated), so an implementation that reenters the
/// bridge cannot replay the operation that triggered it.  Implementations
/// handle the actual debit/credit semantics (ERC20 transfers, native
/// accounting, mint/burn) -- none of that is modeled here.
pub trait AssetCustody {
    /// Releases `amount` of `asset` from bridge custody to `to`.
    fn release(&mut self, asset: Address, to: Address, amount: U256) -> Result<(), CustodyError>;

    /// Pulls `amount` of `asset` from `from` into bridge custody.
    fn collect(&mut self, asset: Address, from: Address, amount: U256) -> Result<(), CustodyError>;
}
