//! EIP-191 digest prefixing and ECDSA signer recovery.

use alloy_primitives::{keccak256, Address, B256};
use gravity_primitives::sig::RecoverableSig;
use secp256k1::{
    ecdsa::{RecoverableSignature, RecoveryId},
    Message, SECP256K1,
};

use crate::errors::SigError;

/// Prefix for the 32-byte personal-sign scheme the off-chain signers use.
const ETH_SIGN_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n32";

/// The digest that is actually signed: the EIP-191 prefixed hash of the raw
/// digest.
pub fn eth_signed_digest(digest: B256) -> B256 {
    let mut buf = [0u8; 28 + 32];
    buf[..28].copy_from_slice(ETH_SIGN_PREFIX);
    buf[28..].copy_from_slice(digest.as_slice());
    keccak256(buf)
}

/// Recovers the Ethereum address that produced `sig` over the prefixed form
/// of `digest`.
pub fn recover_signer(digest: B256, sig: &RecoverableSig) -> Result<Address, SigError> {
    let recid = match sig.v {
        27 => 0,
        28 => 1,
        v => return Err(SigError::InvalidRecoveryId(v)),
    };
    let recid = RecoveryId::from_i32(recid)?;
    let signature = RecoverableSignature::from_compact(&sig.compact(), recid)?;

    let message = Message::from_digest(eth_signed_digest(digest).0);
    let pubkey = SECP256K1.recover_ecdsa(&message, &signature)?;

    Ok(pubkey_to_address(&pubkey))
}

/// Ethereum address of a secp256k1 public key: last 20 bytes of the keccak
/// hash of the uncompressed point (sans the 0x04 tag byte).
pub fn pubkey_to_address(pubkey: &secp256k1::PublicKey) -> Address {
    let uncompressed = pubkey.serialize_uncompressed();
    let hash = keccak256(&uncompressed[1..]);
    Address::from_slice(&hash[12..])
}
