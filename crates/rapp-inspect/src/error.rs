//! Inspector error types

use std::{io, path::PathBuf};

use rapp_core::{CodecError, ProtocolError};
use thiserror::Error;

/// Errors reported by the inspector
#[derive(Debug, Error)]
pub enum InspectError {
    /// A schema entry between commas was blank
    #[error("schema entry {position} is empty")]
    EmptyField {
        /// Zero-based entry position
        position: usize,
    },

    /// A schema entry had no `:type` part
    #[error("field {name:?} has no type (expected name:type)")]
    MissingType {
        /// Field name as written
        name: String,
    },

    /// A schema entry named an unknown type
    #[error("field {name:?}: {source}")]
    FieldType {
        /// Field name as written
        name: String,
        /// Parse failure
        source: ProtocolError,
    },

    /// Two schema entries share a name
    #[error("duplicate field {0:?}")]
    DuplicateField(String),

    /// `--hex` input was not valid hex
    #[error("invalid hex input: {0}")]
    Hex(#[from] hex::FromHexError),

    /// Input file could not be read
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// Path given on the command line
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },

    /// Writing the report failed
    #[error("output error: {0}")]
    Output(#[from] io::Error),

    /// Ghost buffer could not be decoded
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// Envelope check failed
    #[error(transparent)]
    Codec(#[from] CodecError),
}
