//! Schema fingerprints.
//!
//! A fingerprint is a 64-bit FNV-1a hash over the ordered field list: for each
//! field, its UTF-8 name bytes followed by its one-byte type tag. It is a
//! version tag for detecting shape drift between writer and reader, not a
//! security boundary.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::field::FieldDescriptor;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// 64-bit schema fingerprint.
///
/// Displays as 16 lowercase hex digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(pub u64);

impl Fingerprint {
    /// Fingerprint of an ordered descriptor list
    pub fn of(fields: &[FieldDescriptor]) -> Self {
        let mut hasher = FingerprintHasher::new();
        for field in fields {
            hasher.field(&field.name, field.tag.to_u8());
        }
        hasher.finish()
    }

    /// Raw value
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Little-endian wire bytes
    pub const fn to_le_bytes(self) -> [u8; 8] {
        self.0.to_le_bytes()
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

impl From<u64> for Fingerprint {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Incremental FNV-1a accumulator.
///
/// Exposed so binding generators can fingerprint a shape without first
/// materializing descriptors. Feed fields strictly in declaration order.
#[derive(Debug, Clone, Copy)]
pub struct FingerprintHasher {
    state: u64,
}

impl FingerprintHasher {
    /// Start from the FNV offset basis
    pub const fn new() -> Self {
        Self { state: FNV_OFFSET_BASIS }
    }

    /// Mix one field: name bytes, then the type tag byte
    pub fn field(&mut self, name: &str, tag: u8) -> &mut Self {
        for &byte in name.as_bytes() {
            self.byte(byte);
        }
        self.byte(tag);
        self
    }

    fn byte(&mut self, byte: u8) {
        self.state ^= u64::from(byte);
        self.state = self.state.wrapping_mul(FNV_PRIME);
    }

    /// Current fingerprint
    pub const fn finish(&self) -> Fingerprint {
        Fingerprint(self.state)
    }
}

impl Default for FingerprintHasher {
    fn default() -> Self {
        Self::new()
    }
}
