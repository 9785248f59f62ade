//! Byte-exact wire format tests
//!
//! Pins the head/tail and envelope encodings of known records so that any
//! change to offsets, widths, endianness or the fingerprint hash is caught.

use hex_literal::hex;
use rapp_proto::{
    FieldDescriptor, Fingerprint, GhostView, GhostWriter, MAX_BUFFER_LEN, MAX_STRING_LEN, Opened,
    ProtocolError, Schema, Slot, TypeTag, descriptors, envelope,
};

static PLAYER: &[FieldDescriptor] = &[
    FieldDescriptor::new(0, "Id", TypeTag::Int32),
    FieldDescriptor::new(1, "Name", TypeTag::String),
    FieldDescriptor::new(2, "Active", TypeTag::Bool),
    FieldDescriptor::new(3, "Score", TypeTag::Double),
];

fn write_player(buf: &mut [u8], schema: &Schema) -> usize {
    let mut writer = GhostWriter::with_layout(buf, schema.layout()).unwrap();
    writer.write_i32(12345).unwrap();
    writer.write_str(Some("RappGhost")).unwrap();
    writer.write_bool(true).unwrap();
    writer.write_f64(99.9).unwrap();
    writer.finish()
}

#[test]
fn player_record_layout() {
    let schema = Schema::new("Player", PLAYER);
    assert_eq!(schema.head_size(), 4 + 2 + 1 + 8);

    let mut buf = [0u8; 64];
    let len = write_player(&mut buf, &schema);
    assert_eq!(len, 15 + 2 + 9);

    insta::assert_snapshot!(hex::encode(&buf[..len]), @"393000000f00019a99999999f9584009005261707047686f7374");
}

#[test]
fn player_record_reads_back() {
    let schema = Schema::new("Player", PLAYER);
    let mut buf = [0u8; 64];
    let len = write_player(&mut buf, &schema);

    let view = GhostView::new(&buf[..len]);
    assert_eq!(view.read_i32(schema.slot(0).unwrap()).unwrap(), 12345);
    assert_eq!(view.read_str(schema.slot(1).unwrap()).unwrap(), "RappGhost");
    assert!(view.read_bool(schema.slot(2).unwrap()).unwrap());
    assert_eq!(view.read_f64(schema.slot(3).unwrap()).unwrap(), 99.9);
}

#[test]
fn generated_accessor_constants_match_planner() {
    // what a binding generator would emit for Player
    const ID: Slot = Slot::new(0, 0, TypeTag::Int32);
    const NAME: Slot = Slot::new(1, 4, TypeTag::String);
    const ACTIVE: Slot = Slot::new(2, 6, TypeTag::Bool);
    const SCORE: Slot = Slot::new(3, 7, TypeTag::Double);

    let schema = Schema::new("Player", PLAYER);
    assert_eq!(schema.layout().slots(), &[ID, NAME, ACTIVE, SCORE]);
}

#[test]
fn player_fingerprint_is_stable() {
    let schema = Schema::new("Player", PLAYER);
    insta::assert_snapshot!(schema.fingerprint().to_string(), @"5ea47e503a547dac");
}

#[test]
fn reordered_fields_change_fingerprint() {
    let a = descriptors([("Id", TypeTag::Int32), ("Name", TypeTag::String)]).unwrap();
    let b = descriptors([("Name", TypeTag::String), ("Id", TypeTag::Int32)]).unwrap();
    assert_ne!(Fingerprint::of(&a), Fingerprint::of(&b));
}

#[test]
fn renamed_retyped_added_removed_fields_change_fingerprint() {
    let base = Fingerprint::of(PLAYER);

    let renamed = descriptors([
        ("Id", TypeTag::Int32),
        ("FullName", TypeTag::String),
        ("Active", TypeTag::Bool),
        ("Score", TypeTag::Double),
    ])
    .unwrap();
    let retyped = descriptors([
        ("Id", TypeTag::Int64),
        ("Name", TypeTag::String),
        ("Active", TypeTag::Bool),
        ("Score", TypeTag::Double),
    ])
    .unwrap();
    let added = descriptors([
        ("Id", TypeTag::Int32),
        ("Name", TypeTag::String),
        ("Active", TypeTag::Bool),
        ("Score", TypeTag::Double),
        ("Level", TypeTag::Int16),
    ])
    .unwrap();
    let removed = descriptors([
        ("Id", TypeTag::Int32),
        ("Name", TypeTag::String),
        ("Active", TypeTag::Bool),
    ])
    .unwrap();

    for variant in [renamed, retyped, added, removed] {
        assert_ne!(Fingerprint::of(&variant), base);
    }
}

#[test]
fn envelope_around_ghost_payload() {
    let schema = Schema::new("Player", PLAYER);
    let mut buf = [0u8; 64];
    let len = write_player(&mut buf, &schema);

    let mut stored = Vec::new();
    envelope::encode(schema.fingerprint(), &buf[..len], &mut stored);
    assert_eq!(&stored[..8], &hex!("ac7d543a507ea45e"));

    match envelope::decode(&stored, schema.fingerprint()) {
        Opened::Compatible(payload) => assert_eq!(payload, &buf[..len]),
        Opened::Incompatible { actual } => panic!("unexpected mismatch {actual:?}"),
    }

    let drifted = Schema::new("Player", &PLAYER[..3]);
    assert_eq!(
        envelope::decode(&stored, drifted.fingerprint()),
        Opened::Incompatible { actual: Some(schema.fingerprint()) }
    );
}

#[test]
fn string_starting_past_addressable_range() {
    // a maximal first string pushes the second tail entry past 65535
    let schema = Schema::new(
        "Big",
        descriptors([("A", TypeTag::String), ("B", TypeTag::String)]).unwrap(),
    );
    let first = "x".repeat(MAX_BUFFER_LEN);
    let mut buf = vec![0u8; 2 * MAX_BUFFER_LEN];
    let mut writer = schema.writer(&mut buf).unwrap();
    writer.write_str(Some(&first)).unwrap();
    assert!(writer.tail_cursor() > MAX_BUFFER_LEN);

    let err = writer.write_str(Some("y")).unwrap_err();
    let tail_offset = 4 + 2 + MAX_BUFFER_LEN;
    assert_eq!(err, ProtocolError::BufferLimitExceeded { field: 1, tail_offset });
}

#[test]
fn string_starting_at_last_addressable_offset() {
    // head 4 + prefix 2 + 65529 bytes leaves the tail cursor at exactly 65535
    let schema = Schema::new(
        "Big",
        descriptors([("A", TypeTag::String), ("B", TypeTag::String)]).unwrap(),
    );
    let first = "x".repeat(MAX_BUFFER_LEN - 4 - 2);
    let mut buf = vec![0u8; MAX_BUFFER_LEN + 2 + 4];
    let mut writer = schema.writer(&mut buf).unwrap();
    writer.write_str(Some(&first)).unwrap();
    assert_eq!(writer.tail_cursor(), MAX_BUFFER_LEN);

    writer.write_str(Some("tail")).unwrap();
    let len = writer.finish();
    assert_eq!(len, MAX_BUFFER_LEN + 2 + 4);
    assert_eq!(buf[2..4], [0xff, 0xff]);

    let view = GhostView::new(&buf[..len]);
    assert_eq!(view.read_str(schema.slot(0).unwrap()).unwrap(), first);
    assert_eq!(view.read_str(schema.slot(1).unwrap()).unwrap(), "tail");
}

#[test]
fn absent_string_is_fine_past_addressable_range() {
    let schema = Schema::new(
        "Big",
        descriptors([("A", TypeTag::String), ("B", TypeTag::String)]).unwrap(),
    );
    let first = "x".repeat(MAX_BUFFER_LEN);
    let mut buf = vec![0u8; 2 * MAX_BUFFER_LEN];
    let mut writer = schema.writer(&mut buf).unwrap();
    writer.write_str(Some(&first)).unwrap();
    writer.write_str(None).unwrap();
    assert_eq!(writer.finish(), 4 + 2 + MAX_BUFFER_LEN);
}

#[test]
fn string_longer_than_length_prefix() {
    let schema = Schema::new("One", descriptors([("A", TypeTag::String)]).unwrap());
    let text = "é".repeat(MAX_STRING_LEN / 2 + 1);
    assert!(text.len() > MAX_STRING_LEN);

    let mut buf = vec![0u8; 4 * MAX_STRING_LEN];
    let mut writer = schema.writer(&mut buf).unwrap();
    let err = writer.write_str(Some(&text)).unwrap_err();
    assert_eq!(err, ProtocolError::StringTooLarge { field: 0, len: text.len() });
    assert_eq!(writer.tail_cursor(), 2);
    drop(writer);
    assert!(buf.iter().all(|b| *b == 0));
}

#[test]
fn string_of_exactly_max_length_fits() {
    let schema = Schema::new("One", descriptors([("A", TypeTag::String)]).unwrap());
    let text = "z".repeat(MAX_STRING_LEN);
    let mut buf = vec![0u8; 2 + 2 + MAX_STRING_LEN];
    let mut writer = schema.writer(&mut buf).unwrap();
    writer.write_str(Some(&text)).unwrap();
    let len = writer.finish();

    let view = GhostView::new(&buf[..len]);
    assert_eq!(view.read_str(schema.slot(0).unwrap()).unwrap().len(), MAX_STRING_LEN);
}
