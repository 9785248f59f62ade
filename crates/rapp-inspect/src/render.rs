//! Text output

use std::io::{self, Write};

use rapp_core::{Fingerprint, GhostView, Schema};

use crate::error::InspectError;

/// Fingerprint, head size and one line per slot
pub fn schema(out: &mut impl Write, schema: &Schema) -> io::Result<()> {
    writeln!(out, "fingerprint {}", schema.fingerprint())?;
    writeln!(out, "head_size {}", schema.head_size())?;
    for (field, slot) in schema.fields().iter().zip(schema.layout().slots()) {
        writeln!(
            out,
            "{} {} {} offset={} width={}",
            slot.index,
            field.name,
            slot.kind,
            slot.offset,
            slot.width()
        )?;
    }
    Ok(())
}

/// Every field of a ghost buffer as `index name kind value`.
///
/// Nothing is printed unless every field can be read.
pub fn fields(
    out: &mut impl Write,
    schema: &Schema,
    view: GhostView<'_>,
) -> Result<(), InspectError> {
    let values = view.values(schema.layout())?;
    for (field, value) in schema.fields().iter().zip(&values) {
        writeln!(out, "{} {} {} {value}", field.index, field.name, value.kind())?;
    }
    Ok(())
}

/// Envelope whose fingerprint matched
pub fn compatible(out: &mut impl Write, schema: &Schema, payload_len: usize) -> io::Result<()> {
    writeln!(out, "compatible fingerprint={} payload_len={payload_len}", schema.fingerprint())
}

/// Envelope whose fingerprint did not match, or that was too short
pub fn incompatible(
    out: &mut impl Write,
    schema: &Schema,
    actual: Option<Fingerprint>,
) -> io::Result<()> {
    match actual {
        Some(actual) => {
            writeln!(out, "incompatible expected={} actual={actual}", schema.fingerprint())
        },
        None => writeln!(out, "incompatible expected={} actual=none", schema.fingerprint()),
    }
}
