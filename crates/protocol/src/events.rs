//! Notifications returned to the caller on accepted operations.
//!
//! The event-log sink is an external collaborator; operations hand these
//! back and the host environment decides how to publish them.  Every event
//! carries the bridge-wide event nonce so relayers can totally order them.

use alloy_primitives::{Address, B256, U256};
use gravity_primitives::validator::Power;
use serde::{Deserialize, Serialize};

/// A validator-set rotation completed.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ValsetUpdated {
    pub valset_nonce: u64,
    pub event_nonce: u64,
    pub validators: Vec<Address>,
    pub powers: Vec<Power>,
}

/// A transfer batch was authorized and handed to custody.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BatchExecuted {
    pub asset: Address,
    pub batch_nonce: u64,
    pub event_nonce: u64,
    pub transfer_count: usize,
    pub total_fees: U256,
}

/// An inbound deposit was taken into custody.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct DepositReceived {
    pub asset: Address,
    pub sender: Address,
    pub destination: B256,
    pub target_chain: B256,
    pub amount: U256,
    pub event_nonce: u64,
}
