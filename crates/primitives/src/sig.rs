//! Recoverable ECDSA signature material.

use std::io::{Read, Write};

use alloy_primitives::B256;
use arbitrary::Arbitrary;
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

/// An Ethereum-style recoverable ECDSA signature over a 32-byte digest.
///
/// A non-participating validator is represented by the *absence* of a
/// signature (`Option<RecoverableSig>` in verification calls), not by a
/// sentinel value.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize, Arbitrary)]
pub struct RecoverableSig {
    /// Recovery id, Ethereum convention (27 or 28).
    pub v: u8,
    pub r: B256,
    pub s: B256,
}

impl RecoverableSig {
    pub fn new(v: u8, r: B256, s: B256) -> Self {
        Self { v, r, s }
    }

    /// The 64-byte r || s compact form used by libsecp recovery.
    pub fn compact(&self) -> [u8; 64] {
        let mut buf = [0u8; 64];
        buf[..32].copy_from_slice(self.r.as_slice());
        buf[32..].copy_from_slice(self.s.as_slice());
        buf
    }
}

impl BorshSerialize for RecoverableSig {
    fn serialize<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&[self.v])?;
        writer.write_all(self.r.as_slice())?;
        writer.write_all(self.s.as_slice())
    }
}

impl BorshDeserialize for RecoverableSig {
    fn deserialize_reader<R: Read>(reader: &mut R) -> std::io::Result<Self> {
        let mut buf = [0u8; 65];
        reader.read_exact(&mut buf)?;
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&buf[1..33]);
        s.copy_from_slice(&buf[33..65]);
        Ok(Self {
            v: buf[0],
            r: B256::from(r),
            s: B256::from(s),
        })
    }
}
