//! Fingerprint-checked envelope codec
//!
//! Wraps a [`PayloadCodec`] so every stored value carries the fingerprint of
//! the shape it was written under. Decoding compares that fingerprint with
//! the reader's shape before the inner codec sees any payload byte.
//!
//! # Mismatch handling
//!
//! A mismatch (including a value too short to hold a header) means the value
//! was produced by a different version of the record type. Under the default
//! [`MismatchPolicy::ReturnEmpty`] decode reports `Ok(None)` and the caller
//! recomputes, exactly as for an absent key. [`MismatchPolicy::RaiseError`]
//! surfaces it as [`CodecError::IncompatibleSchema`] instead.

use bytes::BufMut;
use rapp_proto::{Fingerprint, Opened, Schema, envelope};
use tracing::{debug, trace, warn};

use crate::{
    codec::PayloadCodec,
    config::{EnvelopeConfig, MismatchPolicy},
    error::{CodecError, Result},
    record::RecordShape,
};

/// Envelope codec over an inner payload codec
#[derive(Debug, Clone, Default)]
pub struct EnvelopeCodec<C> {
    inner: C,
    config: EnvelopeConfig,
}

impl<C> EnvelopeCodec<C> {
    /// Codec with the default configuration
    pub fn new(inner: C) -> Self {
        Self { inner, config: EnvelopeConfig::default() }
    }

    /// Codec with an explicit configuration
    pub const fn with_config(inner: C, config: EnvelopeConfig) -> Self {
        Self { inner, config }
    }

    /// Active configuration
    pub const fn config(&self) -> &EnvelopeConfig {
        &self.config
    }

    /// Inner payload codec
    pub const fn inner(&self) -> &C {
        &self.inner
    }

    /// Append an envelope for `value` to `sink`.
    ///
    /// Nothing is appended if the inner codec fails.
    pub fn encode<T>(&self, value: &T, sink: &mut Vec<u8>) -> Result<()>
    where
        T: RecordShape,
        C: PayloadCodec<T>,
    {
        let schema = T::schema();
        let start = sink.len();
        envelope::write_header(schema.fingerprint(), sink);
        if let Err(err) = self.inner.encode(value, sink) {
            sink.truncate(start);
            return Err(err);
        }
        trace!(
            type_name = schema.type_name(),
            fingerprint = %schema.fingerprint(),
            payload_len = sink.len() - start - envelope::EnvelopeHeader::SIZE,
            "encoded envelope"
        );
        Ok(())
    }

    /// Encode into any [`BufMut`] sink.
    ///
    /// The payload is staged in a scratch buffer first; prefer
    /// [`Self::encode`] when the sink is a `Vec<u8>`.
    pub fn encode_into<T, B>(&self, value: &T, sink: &mut B) -> Result<()>
    where
        T: RecordShape,
        C: PayloadCodec<T>,
        B: BufMut,
    {
        sink.put_slice(&self.encode_to_vec(value)?);
        Ok(())
    }

    /// Encode into a new buffer
    pub fn encode_to_vec<T>(&self, value: &T) -> Result<Vec<u8>>
    where
        T: RecordShape,
        C: PayloadCodec<T>,
    {
        let mut out = Vec::new();
        self.encode(value, &mut out)?;
        Ok(out)
    }

    /// Decode a stored envelope.
    ///
    /// `Ok(None)` means the value was written under a different shape and
    /// should be treated as a miss.
    pub fn decode<T>(&self, bytes: &[u8]) -> Result<Option<T>>
    where
        T: RecordShape,
        C: PayloadCodec<T>,
    {
        match self.payload::<T>(bytes)? {
            Some(payload) => self.inner.decode(payload).map(Some),
            None => Ok(None),
        }
    }

    /// Check the header of `bytes` against `T`'s shape and borrow the
    /// payload without decoding it.
    ///
    /// Pairs with [`GhostView`](rapp_proto::GhostView) for zero-copy field
    /// reads of a stored ghost record.
    pub fn payload<'a, T: RecordShape>(&self, bytes: &'a [u8]) -> Result<Option<&'a [u8]>> {
        self.open(T::schema(), bytes)
    }

    /// Like [`Self::payload`] for a schema known only at runtime
    pub fn open<'a>(&self, schema: &Schema, bytes: &'a [u8]) -> Result<Option<&'a [u8]>> {
        match envelope::decode(bytes, schema.fingerprint()) {
            Opened::Compatible(payload) => Ok(Some(payload)),
            Opened::Incompatible { actual } => self.mismatch(schema, actual),
        }
    }

    fn mismatch<'a>(
        &self,
        schema: &Schema,
        actual: Option<Fingerprint>,
    ) -> Result<Option<&'a [u8]>> {
        let expected = schema.fingerprint();
        match self.config.on_mismatch {
            MismatchPolicy::ReturnEmpty => {
                debug!(
                    type_name = schema.type_name(),
                    %expected,
                    ?actual,
                    "schema mismatch, treating stored value as a miss"
                );
                Ok(None)
            },
            MismatchPolicy::RaiseError => {
                warn!(type_name = schema.type_name(), %expected, ?actual, "schema mismatch");
                Err(CodecError::IncompatibleSchema {
                    type_name: schema.type_name().to_owned(),
                    expected,
                    actual,
                })
            },
        }
    }
}
