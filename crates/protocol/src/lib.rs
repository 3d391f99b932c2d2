//! Privileged state transitions for the bridge: validator-set rotation and
//! batch authorization, plus the deposit entry point.
//!
//! Each operation validates everything first and mutates state only on full
//! acceptance; a rejection at any step leaves state untouched.  The one
//! deliberate exception is custody, which is invoked only *after* the nonce
//! ledger is updated so a reentrant custody call cannot resubmit the same
//! batch.

pub mod batch;
pub mod bridge;
pub mod clock;
pub mod custody;
pub mod deposit;
pub mod errors;
pub mod events;
pub mod rotation;

pub use bridge::Bridge;
pub use errors::{BridgeError, BridgeResult};
