//! Rapp typed codec layer
//!
//! Binds record types to the wire formats in [`rapp_proto`]. A record type
//! declares its shape once ([`RecordShape`]); the [`EnvelopeCodec`] prefixes
//! every stored value with that shape's fingerprint and only hands payload
//! bytes to the inner [`PayloadCodec`] when the fingerprint read back matches.
//!
//! # Architecture
//!
//! ```text
//!   value ──► PayloadCodec::encode ──► [fingerprint | payload] ──► cache
//!
//!   cache ──► envelope::decode ──┬─ Compatible ──► PayloadCodec::decode ──► Some(value)
//!                                └─ Incompatible ─► MismatchPolicy ──► None | Err
//! ```
//!
//! Two payload codecs ship with the crate: [`CborCodec`] for any serde type and
//! [`GhostCodec`] for head/tail records implementing [`GhostRecord`]. Callers
//! may plug in their own.
//!
//! Everything here is synchronous and performs no I/O. Schemas are computed
//! once per type and shared; codecs hold only immutable configuration.
//!
//! # Components
//!
//! - [`record`]: Shape declaration and ghost record bindings
//! - [`codec`]: Payload codec trait and built-in codecs
//! - [`envelope`]: Fingerprint-checked envelope codec
//! - [`config`]: Mismatch policy configuration
//! - [`error`]: Codec error types

pub mod codec;
pub mod config;
pub mod envelope;
pub mod error;
pub mod record;

pub use codec::{CborCodec, GhostCodec, PayloadCodec};
pub use config::{EnvelopeConfig, MismatchPolicy, UnknownPolicy};
pub use envelope::EnvelopeCodec;
pub use error::{CodecError, Result};
pub use rapp_proto::{
    FieldDescriptor, Fingerprint, GhostView, GhostWriter, ProtocolError, Schema, Slot, TypeTag,
    tail_entry_len,
};
pub use record::{GhostRecord, RecordShape};
