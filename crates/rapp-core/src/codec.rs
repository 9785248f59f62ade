//! Payload codecs
//!
//! A [`PayloadCodec`] turns a value into the opaque bytes carried after the
//! envelope header and back. The envelope codec never calls `decode` unless
//! the fingerprint matched, so implementations may assume the payload was
//! produced for the same shape.

use serde::{Serialize, de::DeserializeOwned};

use crate::{
    error::{CodecError, Result},
    record::GhostRecord,
};

/// Inner serializer for envelope payloads
pub trait PayloadCodec<T> {
    /// Append the encoding of `value` to `sink`.
    ///
    /// On error `sink` may hold a partial encoding; callers roll it back.
    fn encode(&self, value: &T, sink: &mut Vec<u8>) -> Result<()>;

    /// Decode a value from a complete payload
    fn decode(&self, payload: &[u8]) -> Result<T>;
}

/// CBOR payloads via serde
#[derive(Debug, Clone, Copy, Default)]
pub struct CborCodec;

impl<T> PayloadCodec<T> for CborCodec
where
    T: Serialize + DeserializeOwned,
{
    fn encode(&self, value: &T, sink: &mut Vec<u8>) -> Result<()> {
        ciborium::ser::into_writer(value, sink).map_err(|e| CodecError::Encode(e.to_string()))
    }

    fn decode(&self, payload: &[u8]) -> Result<T> {
        ciborium::de::from_reader(payload).map_err(|e| CodecError::Decode(e.to_string()))
    }
}

/// Head/tail ghost payloads
#[derive(Debug, Clone, Copy, Default)]
pub struct GhostCodec;

impl<T: GhostRecord> PayloadCodec<T> for GhostCodec {
    fn encode(&self, value: &T, sink: &mut Vec<u8>) -> Result<()> {
        let start = sink.len();
        sink.resize(start + value.encoded_len(), 0);
        match value.write_ghost(&mut sink[start..]) {
            Ok(written) => {
                sink.truncate(start + written);
                Ok(())
            },
            Err(err) => {
                sink.truncate(start);
                Err(err.into())
            },
        }
    }

    fn decode(&self, payload: &[u8]) -> Result<T> {
        Ok(T::from_ghost(payload)?)
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Point {
        x: i32,
        label: String,
    }

    #[test]
    fn cbor_round_trip() {
        let point = Point { x: -4, label: "origin".into() };
        let mut sink = Vec::new();
        CborCodec.encode(&point, &mut sink).unwrap();
        let back: Point = CborCodec.decode(&sink).unwrap();
        assert_eq!(back, point);
    }

    #[test]
    fn cbor_appends() {
        let mut sink = vec![0xaa];
        PayloadCodec::<u8>::encode(&CborCodec, &7, &mut sink).unwrap();
        // small unsigned integers are a single CBOR byte
        assert_eq!(sink, [0xaa, 0x07]);
    }

    #[test]
    fn cbor_garbage_is_decode_error() {
        let result: Result<Point> = CborCodec.decode(&[0xff, 0x00]);
        assert!(matches!(result, Err(CodecError::Decode(_))));
    }
}
