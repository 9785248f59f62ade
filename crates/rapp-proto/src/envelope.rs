//! Fingerprint envelope wire format.
//!
//! ```text
//! ┌──────────────────────────┬────────────────────────────┐
//! │ fingerprint (u64 LE, 8B) │ payload (opaque, any size) │
//! └──────────────────────────┴────────────────────────────┘
//! ```
//!
//! The envelope is the unit stored as a cache value. A reader only hands the
//! payload to its decoder when the stored fingerprint equals the fingerprint
//! of the shape it expects, so bytes written under an older or newer shape are
//! never interpreted as the current one.

use bytes::BufMut;
use zerocopy::{
    FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned, byteorder::little_endian::U64,
};

use crate::{
    errors::{ProtocolError, Result},
    fingerprint::Fingerprint,
};

/// Envelope header (8 bytes)
///
/// Layout is verified at compile time by `zerocopy`; the header is read in
/// place from the start of a stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned)]
#[repr(C)]
pub struct EnvelopeHeader {
    fingerprint: U64,
}

impl EnvelopeHeader {
    /// Size of the header in bytes
    pub const SIZE: usize = 8;

    /// Header for a fingerprint
    pub fn new(fingerprint: Fingerprint) -> Self {
        Self { fingerprint: U64::new(fingerprint.get()) }
    }

    /// Fingerprint carried by this header
    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint(self.fingerprint.get())
    }

    /// Borrow the header at the start of `bytes` and return the rest.
    ///
    /// # Errors
    ///
    /// `BufferTooSmall` if fewer than [`Self::SIZE`] bytes are present.
    pub fn split(bytes: &[u8]) -> Result<(&Self, &[u8])> {
        Self::ref_from_prefix(bytes)
            .map_err(|_| ProtocolError::too_small(None, Self::SIZE, bytes.len()))
    }
}

/// Outcome of checking an envelope against an expected fingerprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opened<'a> {
    /// Fingerprints match; the payload may be decoded
    Compatible(&'a [u8]),
    /// The value was written under a different shape, or is too short to
    /// carry a header. The payload must not be decoded.
    Incompatible {
        /// Fingerprint found in the header, `None` when there was no header
        actual: Option<Fingerprint>,
    },
}

impl<'a> Opened<'a> {
    /// The payload, if compatible
    pub const fn payload(self) -> Option<&'a [u8]> {
        match self {
            Self::Compatible(payload) => Some(payload),
            Self::Incompatible { .. } => None,
        }
    }
}

/// Write `fingerprint` followed by `payload` into `sink`.
pub fn encode<B: BufMut>(fingerprint: Fingerprint, payload: &[u8], sink: &mut B) {
    write_header(fingerprint, sink);
    sink.put_slice(payload);
}

/// Write only the header, for encoders that append the payload in place.
pub fn write_header<B: BufMut>(fingerprint: Fingerprint, sink: &mut B) {
    sink.put_slice(EnvelopeHeader::new(fingerprint).as_bytes());
}

/// Check the header of `bytes` against `expected`.
///
/// Never inspects payload bytes; it only slices them off.
pub fn decode(bytes: &[u8], expected: Fingerprint) -> Opened<'_> {
    match EnvelopeHeader::split(bytes) {
        Err(_) => Opened::Incompatible { actual: None },
        Ok((header, payload)) if header.fingerprint() == expected => Opened::Compatible(payload),
        Ok((header, _)) => Opened::Incompatible { actual: Some(header.fingerprint()) },
    }
}

/// Fingerprint stored in an envelope without checking it.
pub fn peek_fingerprint(bytes: &[u8]) -> Result<Fingerprint> {
    EnvelopeHeader::split(bytes).map(|(header, _)| header.fingerprint())
}
