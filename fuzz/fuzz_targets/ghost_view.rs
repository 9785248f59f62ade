//! Arbitrary bytes read through a view of every field kind must fail cleanly,
//! never panic or read out of bounds.

#![no_main]

use libfuzzer_sys::fuzz_target;
use rapp_proto::{GhostView, Schema, TypeTag, descriptors};

fuzz_target!(|data: &[u8]| {
    // first byte picks a shape, the rest is the buffer
    let Some((&selector, buf)) = data.split_first() else {
        return;
    };

    let fields: Vec<_> = TypeTag::ALL
        .iter()
        .cycle()
        .skip(usize::from(selector % 8))
        .take(usize::from(selector / 8 % 16))
        .enumerate()
        .map(|(i, tag)| (format!("f{i}"), *tag))
        .collect();
    let Ok(fields) = descriptors(fields) else {
        return;
    };
    let schema = Schema::new("Fuzz", fields);

    let view = GhostView::new(buf);
    for slot in schema.layout().slots() {
        if let Ok(value) = view.value(*slot) {
            assert_eq!(value.kind(), slot.kind);
        }
        if slot.kind == TypeTag::String {
            let _ = view.read_str_bytes(*slot);
        }
    }
});
