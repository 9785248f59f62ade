//! Wire formats for Rapp cached records.
//!
//! Two complementary encodings for structured cache values:
//!
//! - **Envelope**: an 8-byte schema fingerprint followed by an opaque payload.
//!   Readers decode the payload only when the fingerprint matches the shape
//!   they expect, so a shape change between writer and reader degrades to a
//!   cache miss instead of a misread.
//! - **Ghost buffers**: a head/tail layout where fixed-width fields sit at
//!   offsets known from the shape alone and strings live in a tail addressed
//!   by 16-bit head pointers. A [`GhostView`] reads single fields straight
//!   from the bytes without decoding the record.
//!
//! Both are driven by the same ordered [`FieldDescriptor`] list: the
//! [`Fingerprint`] hashes it and the [`Layout`] planner assigns offsets from it.
//!
//! # Limits
//!
//! Ghost pointers and string lengths are 16 bits wide. A string may start at
//! most at offset [`MAX_BUFFER_LEN`] and may be at most [`MAX_STRING_LEN`]
//! bytes. Records are meant to be small and latency sensitive; these are
//! capacity limits of the format, checked at write time.
//!
//! # Security
//!
//! All parsing is bounds checked and `unsafe` is forbidden. The envelope
//! header is read through `zerocopy` with a compile-time verified layout.
//! Fingerprints detect drift; they are not authentication.
#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod buffer;
pub mod envelope;
pub mod errors;
pub mod field;
pub mod fingerprint;
pub mod layout;
pub mod schema;
pub mod view;
pub mod writer;

pub use envelope::{EnvelopeHeader, Opened};
pub use errors::{ProtocolError, Result};
pub use field::{FieldDescriptor, TypeTag, descriptors};
pub use fingerprint::{Fingerprint, FingerprintHasher};
pub use layout::{Layout, Slot};
pub use schema::Schema;
pub use view::{FieldValue, GhostView};
pub use writer::{GhostWriter, tail_entry_len};

/// Highest tail offset a string pointer can hold
pub const MAX_BUFFER_LEN: usize = u16::MAX as usize;

/// Most fields a record can declare; declaration indices are 16-bit
pub const MAX_FIELDS: usize = u16::MAX as usize + 1;

/// Longest string, in UTF-8 bytes, a length prefix can hold
pub const MAX_STRING_LEN: usize = u16::MAX as usize;

/// Head pointer value marking an absent string
pub const ABSENT_POINTER: u16 = 0;

/// Size of a tail entry's length prefix
pub const LENGTH_PREFIX: usize = 2;
