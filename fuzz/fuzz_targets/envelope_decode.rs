//! Envelope decoding of arbitrary bytes: a compatible result always carries
//! the tail after the header, and a mismatch never reaches the payload codec.

#![no_main]

use libfuzzer_sys::fuzz_target;
use rapp_core::{EnvelopeCodec, EnvelopeConfig, GhostCodec, Schema, TypeTag};
use rapp_proto::{Opened, descriptors, envelope};

fuzz_target!(|data: &[u8]| {
    let Ok(fields) = descriptors([("Id", TypeTag::Int32), ("Name", TypeTag::String)]) else {
        return;
    };
    let schema = Schema::new("Fuzz", fields);

    match envelope::decode(data, schema.fingerprint()) {
        Opened::Compatible(payload) => assert_eq!(payload, &data[8..]),
        Opened::Incompatible { actual: Some(actual) } => {
            assert_ne!(actual, schema.fingerprint());
        },
        Opened::Incompatible { actual: None } => assert!(data.len() < 8),
    }

    let lenient = EnvelopeCodec::new(GhostCodec);
    let strict = EnvelopeCodec::with_config(GhostCodec, EnvelopeConfig::strict());
    assert_eq!(
        lenient.open(&schema, data).ok().flatten().is_some(),
        strict.open(&schema, data).is_ok()
    );
});
