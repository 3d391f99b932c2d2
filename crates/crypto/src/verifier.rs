//! Power-threshold quorum verification.

use std::collections::BTreeSet;

use alloy_primitives::B256;
use gravity_primitives::{
    params::THRESHOLD_DENOM,
    sig::RecoverableSig,
    validator::{Power, ValidatorEntry, ValidatorSet},
};
use tracing::debug;

use crate::{errors::VerifyError, recovery::recover_signer};

/// Verifies that signatures over `digest` carry at least `threshold_bps`
/// basis points of the stored set's total power.
///
/// `claimed` and `sigs` are aligned positionally; a `None` slot is a
/// validator that did not participate and is skipped without failing the
/// call.  A *present* signature must recover to the claimed address and the
/// claimed (address, power) pair must appear verbatim in `stored` -- any
/// mismatch rejects the whole call.
///
/// Returns the accumulated verified power on acceptance.
pub fn verify_quorum(
    digest: B256,
    stored: &ValidatorSet,
    claimed: &[ValidatorEntry],
    sigs: &[Option<RecoverableSig>],
    threshold_bps: u64,
) -> Result<Power, VerifyError> {
    if claimed.len() != sigs.len() {
        return Err(VerifyError::LengthMismatch {
            claimed: claimed.len(),
            sigs: sigs.len(),
        });
    }

    let mut verified: Power = 0;
    let mut counted = BTreeSet::new();

    for (index, (entry, slot)) in claimed.iter().zip(sigs).enumerate() {
        let Some(sig) = slot else {
            // Non-cooperating validator; their power simply doesn't count.
            continue;
        };

        let recovered = recover_signer(digest, sig)?;
        if recovered != entry.address {
            return Err(VerifyError::SignerMismatch {
                index,
                expected: entry.address,
                recovered,
            });
        }

        if !stored.contains(entry.address, entry.power) {
            return Err(VerifyError::NotInValidatorSet {
                address: entry.address,
                power: entry.power,
            });
        }

        if !counted.insert(entry.address) {
            return Err(VerifyError::DuplicateClaim(entry.address));
        }

        // Can't overflow: counted powers are distinct members of `stored`,
        // whose total fit a Power at construction.
        verified += entry.power;
    }

    let total = stored.total_power();
    if (verified as u128) * (THRESHOLD_DENOM as u128) < (threshold_bps as u128) * (total as u128) {
        return Err(VerifyError::InsufficientPower {
            verified,
            total_power: total,
            threshold_bps,
        });
    }

    debug!(%digest, verified, total, "quorum satisfied");
    Ok(verified)
}
