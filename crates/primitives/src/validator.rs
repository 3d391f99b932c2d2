//! Validator set types.
//!
//! A [`ValidatorSet`] is the trust anchor for every privileged state
//! transition.  It is constructed whole, validated up front, and replaced
//! wholesale by the rotation protocol; there is no partial mutation.

use std::{
    collections::BTreeSet,
    io::{Read, Write},
};

use alloy_primitives::Address;
use arbitrary::{Arbitrary, Unstructured};
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Voting power of a single validator.
///
/// The original contract used 256-bit powers, but the scheme only needs the
/// sum to be representable; we keep powers in a `u64` and check the sum at
/// construction.
pub type Power = u64;

/// Errors raised while assembling a [`ValidatorSet`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidatorSetError {
    /// The proposed set has no members.
    #[error("validator set is empty")]
    Empty,

    /// The same address appears more than once.
    #[error("duplicate validator address {0}")]
    DuplicateValidator(Address),

    /// All members have zero power, making any quorum either impossible or
    /// trivially satisfied.
    #[error("validator set has zero total power")]
    ZeroTotalPower,

    /// The power sum does not fit the accumulator.
    #[error("total power overflows")]
    PowerOverflow,

    /// The caller supplied address and power arrays of different lengths.
    #[error("address/power length mismatch ({addresses} addresses, {powers} powers)")]
    LengthMismatch { addresses: usize, powers: usize },
}

/// A single member of a validator set.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize, Arbitrary)]
pub struct ValidatorEntry {
    /// Address the member's signatures must recover to.
    pub address: Address,

    /// Relative voting power of the member.
    pub power: Power,
}

impl ValidatorEntry {
    pub fn new(address: Address, power: Power) -> Self {
        Self { address, power }
    }
}

impl BorshSerialize for ValidatorEntry {
    fn serialize<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(self.address.as_slice())?;
        BorshSerialize::serialize(&self.power, writer)
    }
}

impl BorshDeserialize for ValidatorEntry {
    fn deserialize_reader<R: Read>(reader: &mut R) -> std::io::Result<Self> {
        let mut addr = [0u8; 20];
        reader.read_exact(&mut addr)?;
        let power = Power::deserialize_reader(reader)?;
        Ok(Self {
            address: Address::from(addr),
            power,
        })
    }
}

/// An ordered validator set with a rotation nonce.
///
/// Invariants (enforced by [`ValidatorSet::new`]): non-empty, unique
/// addresses, nonzero total power, and the power sum fits in a [`Power`].
/// Order is significant: permuting members changes the checkpoint.
///
/// Both deserialization paths (serde and Borsh) re-run construction, so a
/// persisted or wire-supplied set cannot violate the invariants or carry a
/// forged power total.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ValidatorSetRaw", into = "ValidatorSetRaw")]
pub struct ValidatorSet {
    validators: Vec<ValidatorEntry>,

    /// Strictly increasing across rotations.
    nonce: u64,

    /// Cached sum of member powers.  Never serialized; always recomputed.
    total_power: Power,
}

/// Serialized shape of [`ValidatorSet`].  The power total is derived state
/// and deliberately not part of the format.
#[derive(Serialize, Deserialize)]
struct ValidatorSetRaw {
    validators: Vec<ValidatorEntry>,
    nonce: u64,
}

impl TryFrom<ValidatorSetRaw> for ValidatorSet {
    type Error = ValidatorSetError;

    fn try_from(raw: ValidatorSetRaw) -> Result<Self, Self::Error> {
        ValidatorSet::new(raw.validators, raw.nonce)
    }
}

impl From<ValidatorSet> for ValidatorSetRaw {
    fn from(set: ValidatorSet) -> Self {
        Self {
            validators: set.validators,
            nonce: set.nonce,
        }
    }
}

impl ValidatorSet {
    /// Assembles and validates a new set.
    pub fn new(validators: Vec<ValidatorEntry>, nonce: u64) -> Result<Self, ValidatorSetError> {
        if validators.is_empty() {
            return Err(ValidatorSetError::Empty);
        }

        let mut seen = BTreeSet::new();
        let mut total: Power = 0;
        for entry in &validators {
            if !seen.insert(entry.address) {
                return Err(ValidatorSetError::DuplicateValidator(entry.address));
            }
            total = total
                .checked_add(entry.power)
                .ok_or(ValidatorSetError::PowerOverflow)?;
        }

        if total == 0 {
            return Err(ValidatorSetError::ZeroTotalPower);
        }

        Ok(Self {
            validators,
            nonce,
            total_power: total,
        })
    }

    /// Assembles a set from parallel address/power arrays, as supplied in
    /// caller-facing operations.
    pub fn from_parts(
        addresses: &[Address],
        powers: &[Power],
        nonce: u64,
    ) -> Result<Self, ValidatorSetError> {
        if addresses.len() != powers.len() {
            return Err(ValidatorSetError::LengthMismatch {
                addresses: addresses.len(),
                powers: powers.len(),
            });
        }

        let validators = addresses
            .iter()
            .zip(powers)
            .map(|(addr, power)| ValidatorEntry::new(*addr, *power))
            .collect();
        Self::new(validators, nonce)
    }

    pub fn validators(&self) -> &[ValidatorEntry] {
        &self.validators
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    pub fn total_power(&self) -> Power {
        self.total_power
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    pub fn addresses(&self) -> impl Iterator<Item = Address> + '_ {
        self.validators.iter().map(|e| e.address)
    }

    pub fn powers(&self) -> impl Iterator<Item = Power> + '_ {
        self.validators.iter().map(|e| e.power)
    }

    /// Checks for an exact (address, power) pair.  Both must match so a
    /// caller cannot inflate a member's weight with a mismatched power list.
    pub fn contains(&self, address: Address, power: Power) -> bool {
        self.validators
            .iter()
            .any(|e| e.address == address && e.power == power)
    }
}

impl BorshSerialize for ValidatorSet {
    fn serialize<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        BorshSerialize::serialize(&(self.validators.len() as u32), writer)?;
        for entry in &self.validators {
            BorshSerialize::serialize(entry, writer)?;
        }
        BorshSerialize::serialize(&self.nonce, writer)
    }
}

impl BorshDeserialize for ValidatorSet {
    fn deserialize_reader<R: Read>(reader: &mut R) -> std::io::Result<Self> {
        let len = u32::deserialize_reader(reader)? as usize;
        let mut validators = Vec::with_capacity(len);
        for _ in 0..len {
            validators.push(ValidatorEntry::deserialize_reader(reader)?);
        }
        let nonce = u64::deserialize_reader(reader)?;

        // Re-run construction so a corrupted byte stream cannot smuggle in a
        // set that violates the invariants.
        ValidatorSet::new(validators, nonce)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }
}

impl<'a> Arbitrary<'a> for ValidatorSet {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        let len = (u.arbitrary_len::<[u8; 28]>()? % 8) + 1;

        let mut validators = Vec::with_capacity(len);
        for i in 0..len {
            // Derive a unique address from the index so the uniqueness
            // invariant holds for any input buffer.
            let mut addr = [0u8; 20];
            addr[12..20].copy_from_slice(&(i as u64 + 1).to_be_bytes());
            let power = (u.arbitrary::<u16>()? as Power) + 1;
            validators.push(ValidatorEntry::new(Address::from(addr), power));
        }
        let nonce = u.arbitrary()?;

        ValidatorSet::new(validators, nonce).map_err(|_| arbitrary::Error::IncorrectFormat)
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::address;

    use super::*;

    fn addr(b: u8) -> Address {
        Address::from([b; 20])
    }

    #[test]
    fn test_rejects_empty_set() {
        let res = ValidatorSet::new(vec![], 0);
        assert_eq!(res.err(), Some(ValidatorSetError::Empty));
    }

    #[test]
    fn test_rejects_duplicate_address() {
        let res = ValidatorSet::new(
            vec![
                ValidatorEntry::new(addr(1), 10),
                ValidatorEntry::new(addr(2), 10),
                ValidatorEntry::new(addr(1), 5),
            ],
            0,
        );
        assert_eq!(res.err(), Some(ValidatorSetError::DuplicateValidator(addr(1))));
    }

    #[test]
    fn test_rejects_zero_total_power() {
        let res = ValidatorSet::new(
            vec![
                ValidatorEntry::new(addr(1), 0),
                ValidatorEntry::new(addr(2), 0),
            ],
            0,
        );
        assert_eq!(res.err(), Some(ValidatorSetError::ZeroTotalPower));
    }

    #[test]
    fn test_rejects_power_overflow() {
        let res = ValidatorSet::new(
            vec![
                ValidatorEntry::new(addr(1), Power::MAX),
                ValidatorEntry::new(addr(2), 1),
            ],
            0,
        );
        assert_eq!(res.err(), Some(ValidatorSetError::PowerOverflow));
    }

    #[test]
    fn test_from_parts_length_mismatch() {
        let res = ValidatorSet::from_parts(&[addr(1), addr(2)], &[10], 0);
        assert_eq!(
            res.err(),
            Some(ValidatorSetError::LengthMismatch {
                addresses: 2,
                powers: 1
            })
        );
    }

    #[test]
    fn test_contains_requires_exact_pair() {
        let set = ValidatorSet::new(
            vec![
                ValidatorEntry::new(addr(1), 10),
                ValidatorEntry::new(addr(2), 20),
            ],
            3,
        )
        .expect("valid set");

        assert!(set.contains(addr(1), 10));
        assert!(!set.contains(addr(1), 20), "power must match too");
        assert!(!set.contains(addr(3), 10));
        assert_eq!(set.total_power(), 30);
        assert_eq!(set.nonce(), 3);
    }

    #[test]
    fn test_borsh_round_trip() {
        let set = ValidatorSet::new(
            vec![
                ValidatorEntry::new(address!("000000000000000000000000000000000000dEaD"), 7),
                ValidatorEntry::new(addr(9), 11),
            ],
            42,
        )
        .expect("valid set");

        let bytes = borsh::to_vec(&set).expect("serialize validator set");
        let decoded = ValidatorSet::try_from_slice(&bytes).expect("deserialize validator set");
        assert_eq!(set, decoded);
    }

    #[test]
    fn test_arbitrary_sets_uphold_invariants() {
        let raw: Vec<u8> = (0u32..512).map(|i| (i.wrapping_mul(31) >> 3) as u8).collect();
        let mut u = Unstructured::new(&raw);

        for _ in 0..8 {
            let set = ValidatorSet::arbitrary(&mut u).expect("arbitrary set");
            assert!(!set.is_empty());
            let recomputed: Power = set.powers().sum();
            assert_eq!(set.total_power(), recomputed);

            let mut seen = std::collections::BTreeSet::new();
            assert!(set.addresses().all(|a| seen.insert(a)), "addresses unique");
        }
    }

    #[test]
    fn test_json_round_trip() {
        let set = ValidatorSet::new(
            vec![
                ValidatorEntry::new(addr(3), 500),
                ValidatorEntry::new(addr(4), 1500),
            ],
            9,
        )
        .expect("valid set");

        let json = serde_json::to_string(&set).expect("serialize validator set");
        let decoded: ValidatorSet = serde_json::from_str(&json).expect("deserialize validator set");
        assert_eq!(set, decoded);
    }

    #[test]
    fn test_json_rejects_duplicate_address() {
        let json = r#"{
            "validators": [
                {"address": "0x0101010101010101010101010101010101010101", "power": 5000},
                {"address": "0x0101010101010101010101010101010101010101", "power": 5000}
            ],
            "nonce": 0
        }"#;
        assert!(serde_json::from_str::<ValidatorSet>(json).is_err());
    }

    #[test]
    fn test_json_cannot_forge_total_power() {
        // A claimed power total in the input is not part of the format; the
        // cached sum is always recomputed from the members.
        let json = r#"{
            "validators": [
                {"address": "0x0101010101010101010101010101010101010101", "power": 5000},
                {"address": "0x0202020202020202020202020202020202020202", "power": 5000}
            ],
            "nonce": 0,
            "total_power": 1
        }"#;
        let set: ValidatorSet = serde_json::from_str(json).expect("deserialize validator set");
        assert_eq!(set.total_power(), 10_000);
    }

    #[test]
    fn test_borsh_rejects_corrupted_duplicate() {
        let set = ValidatorSet::new(
            vec![
                ValidatorEntry::new(addr(1), 7),
                ValidatorEntry::new(addr(2), 11),
            ],
            0,
        )
        .expect("valid set");

        let mut bytes = borsh::to_vec(&set).expect("serialize validator set");
        // Overwrite the second entry's address with the first one's.
        bytes.copy_within(4..24, 32);
        assert!(ValidatorSet::try_from_slice(&bytes).is_err());
    }
}
