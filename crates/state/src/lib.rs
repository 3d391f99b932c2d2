//! Mutable bridge state: the validator-set store and the nonce ledger.
//!
//! These are the only two pieces of mutable shared state in the system.
//! All validation happens upstream in the protocol crate; this crate is
//! guarded registers and counters.

pub mod bridge_state;
pub mod nonces;
pub mod valset;

pub use bridge_state::BridgeState;
pub use nonces::NonceLedger;
pub use valset::ValsetStore;
