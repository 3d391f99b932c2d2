//! Canonical digest encoding for checkpoints and transfer batches.
//!
//! Encodings are Solidity `abi.encode` compatible so on-chain and off-chain
//! computations agree bit-for-bit.  There is no versioning; any change here
//! is a hard fork of the signing domain.

use alloy_primitives::{keccak256, Address, B256, U256};
use alloy_sol_types::SolValue;
use gravity_primitives::{batch::TransferBatch, validator::ValidatorSet};

/// Method tag mixed into validator-set checkpoints.
const CHECKPOINT_METHOD: &[u8] = b"checkpoint";

/// Method tag mixed into transfer-batch digests.
const BATCH_METHOD: &[u8] = b"transactionBatch";

/// ASCII method name right-padded to 32 bytes, matching Solidity's
/// `bytes32` string literals.
fn method_tag(name: &[u8]) -> B256 {
    let mut tag = [0u8; 32];
    tag[..name.len()].copy_from_slice(name);
    B256::from(tag)
}

/// Encodes a validator set under a bridge id into checkpoint preimage bytes.
///
/// Layout: `abi.encode(bridge_id, "checkpoint", nonce, addresses, powers)`.
/// Order-sensitive by construction.
pub fn encode_valset_checkpoint(bridge_id: B256, set: &ValidatorSet) -> Vec<u8> {
    let addresses: Vec<Address> = set.addresses().collect();
    let powers: Vec<U256> = set.powers().map(U256::from).collect();

    (
        bridge_id,
        method_tag(CHECKPOINT_METHOD),
        U256::from(set.nonce()),
        addresses,
        powers,
    )
        .abi_encode()
}

/// The 32-byte checkpoint commitment for a validator set.
pub fn valset_checkpoint(bridge_id: B256, set: &ValidatorSet) -> B256 {
    keccak256(encode_valset_checkpoint(bridge_id, set))
}

/// Encodes a transfer batch into digest preimage bytes.
///
/// Layout: `abi.encode(bridge_id, "transactionBatch", amounts, destinations,
/// fees, batch_nonce, asset, timeout, fee_receiver)`.
pub fn encode_batch_digest(bridge_id: B256, batch: &TransferBatch) -> Vec<u8> {
    let amounts: Vec<U256> = batch.amounts().collect();
    let destinations: Vec<Address> = batch.destinations().collect();
    let fees: Vec<U256> = batch.fees().collect();

    (
        bridge_id,
        method_tag(BATCH_METHOD),
        amounts,
        destinations,
        fees,
        U256::from(batch.nonce),
        batch.asset,
        U256::from(batch.timeout),
        batch.fee_receiver,
    )
        .abi_encode()
}

/// The 32-byte digest a batch quorum signs over.
pub fn batch_digest(bridge_id: B256, batch: &TransferBatch) -> B256 {
    keccak256(encode_batch_digest(bridge_id, batch))
}
