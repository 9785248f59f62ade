//! Rapp inspector
//!
//! Offline tooling for cache values: print the fingerprint and layout a
//! schema produces, decode a raw ghost buffer field by field, or check a
//! stored envelope against a schema.
//!
//! Schemas are given inline as `name:type` pairs in declaration order, e.g.
//! `Id:int32,Name:string,Active:bool,Score:double`. Input bytes come from a
//! file or a `--hex` string.
//!
//! # Components
//!
//! - [`cli`]: Argument definitions
//! - [`shape`]: Inline schema parsing
//! - [`render`]: Text output
//! - [`error`]: Inspector error types

pub mod cli;
pub mod error;
pub mod render;
pub mod shape;

use std::io::Write;

pub use cli::{Cli, Command, Input};
pub use error::InspectError;
use rapp_core::{CodecError, EnvelopeCodec, EnvelopeConfig, GhostCodec, GhostView};
use rapp_proto::envelope;

/// Execute one inspector command, writing its report to `out`.
///
/// An incompatible envelope under `raiseError` is reported to `out` and then
/// returned as an error.
pub fn run(command: &Command, out: &mut impl Write) -> Result<(), InspectError> {
    match command {
        Command::Schema { schema } => render::schema(out, schema)?,
        Command::View { schema, input } => {
            let bytes = input.load()?;
            render::fields(out, schema, GhostView::new(&bytes))?;
        },
        Command::Envelope { schema, input, ghost, on_mismatch } => {
            let bytes = input.load()?;
            let config = EnvelopeConfig::default().on_mismatch(*on_mismatch);
            let codec = EnvelopeCodec::with_config(GhostCodec, config);
            match codec.open(schema, &bytes) {
                Ok(Some(payload)) => {
                    render::compatible(out, schema, payload.len())?;
                    if *ghost {
                        render::fields(out, schema, GhostView::new(payload))?;
                    }
                },
                Ok(None) => {
                    render::incompatible(out, schema, envelope::peek_fingerprint(&bytes).ok())?;
                },
                Err(err @ CodecError::IncompatibleSchema { actual, .. }) => {
                    render::incompatible(out, schema, actual)?;
                    return Err(err.into());
                },
                Err(err) => return Err(err.into()),
            }
        },
    }
    Ok(())
}
