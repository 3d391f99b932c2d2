//! Test helpers: deterministic signers and example validator sets.

use alloy_primitives::{Address, B256};
use gravity_crypto::recovery::{eth_signed_digest, pubkey_to_address};
use gravity_primitives::{
    sig::RecoverableSig,
    validator::{Power, ValidatorEntry, ValidatorSet},
};
use rand::RngCore;
use secp256k1::{Message, PublicKey, SecretKey, SECP256K1};

/// A test validator keypair.
#[derive(Clone, Debug)]
pub struct Signer {
    secret: SecretKey,
}

impl Signer {
    /// Deterministic signer derived from a seed.  Seed 0 is fine; the scalar
    /// is offset so it is never zero.
    pub fn from_seed(seed: u64) -> Self {
        let mut bytes = [0u8; 32];
        bytes[24..].copy_from_slice(&(seed.wrapping_add(1)).to_be_bytes());
        let secret = SecretKey::from_slice(&bytes).expect("nonzero scalar below curve order");
        Self { secret }
    }

    /// Fresh random signer.
    pub fn random<R: RngCore>(rng: &mut R) -> Self {
        let mut bytes = [0u8; 32];
        loop {
            rng.fill_bytes(&mut bytes);
            if let Ok(secret) = SecretKey::from_slice(&bytes) {
                return Self { secret };
            }
        }
    }

    pub fn public_key(&self) -> PublicKey {
        self.secret.public_key(SECP256K1)
    }

    pub fn address(&self) -> Address {
        pubkey_to_address(&self.public_key())
    }
}

/// Signs the EIP-191 prefixed form of `digest`, the way bridge validators
/// sign checkpoints and batch digests.
pub fn sign_digest(signer: &Signer, digest: B256) -> RecoverableSig {
    sign_message(signer, eth_signed_digest(digest))
}

/// Signs `digest` directly, without the EIP-191 prefix.  Only useful for
/// asserting that the verifier insists on the prefix.
pub fn sign_raw_digest(signer: &Signer, digest: B256) -> RecoverableSig {
    sign_message(signer, digest)
}

fn sign_message(signer: &Signer, message: B256) -> RecoverableSig {
    let message = Message::from_digest(message.0);
    let signature = SECP256K1.sign_ecdsa_recoverable(&message, &signer.secret);
    let (recid, compact) = signature.serialize_compact();

    let mut r = [0u8; 32];
    let mut s = [0u8; 32];
    r.copy_from_slice(&compact[..32]);
    s.copy_from_slice(&compact[32..]);
    RecoverableSig::new(27 + recid.to_i32() as u8, B256::from(r), B256::from(s))
}

/// Deterministic signers with seeds `1..=n`.
pub fn generate_signers(n: usize) -> Vec<Signer> {
    (1..=n as u64).map(Signer::from_seed).collect()
}

/// The power distribution used across the test suites: sums to 10_000 so a
/// 6666 bps threshold is exactly 6666 power.
pub fn example_powers() -> Vec<Power> {
    vec![1667, 1667, 1666, 1000, 1000, 1000, 1000, 1000]
}

/// Builds a validator set pairing `signers` with `powers` positionally.
pub fn valset_of(signers: &[Signer], powers: &[Power], nonce: u64) -> ValidatorSet {
    assert_eq!(signers.len(), powers.len(), "signers/powers must align");
    let entries = signers
        .iter()
        .zip(powers)
        .map(|(s, p)| ValidatorEntry::new(s.address(), *p))
        .collect();
    ValidatorSet::new(entries, nonce).expect("test set should be valid")
}

/// One signature slot per signer, each participating.
pub fn sign_with_all(signers: &[Signer], digest: B256) -> Vec<Option<RecoverableSig>> {
    signers
        .iter()
        .map(|s| Some(sign_digest(s, digest)))
        .collect()
}
