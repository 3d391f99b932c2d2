//! Digest construction, signer recovery, and quorum verification.
//!
//! Everything in this crate is a pure function; the single point of trust
//! for privileged state transitions is [`verifier::verify_quorum`].

pub mod digest;
pub mod errors;
pub mod recovery;
pub mod verifier;
