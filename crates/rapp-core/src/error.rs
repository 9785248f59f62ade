//! Codec error types

use rapp_proto::{Fingerprint, ProtocolError};
use thiserror::Error;

/// Result alias for codec operations
pub type Result<T> = std::result::Result<T, CodecError>;

/// Errors from encoding or decoding a typed cache value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Stored value was written under a different shape.
    ///
    /// Only surfaced under [`MismatchPolicy::RaiseError`]; the default
    /// policy reports a miss instead.
    ///
    /// [`MismatchPolicy::RaiseError`]: crate::MismatchPolicy::RaiseError
    #[error("incompatible schema for {type_name}: expected {expected}, found {}", describe(.actual))]
    IncompatibleSchema {
        /// Record type being decoded
        type_name: String,
        /// Fingerprint of the reader's shape
        expected: Fingerprint,
        /// Fingerprint in the stored header, `None` if the value was too
        /// short to carry one
        actual: Option<Fingerprint>,
    },

    /// Wire format error from the ghost layer
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// Inner codec failed to serialize
    #[error("payload encode failed: {0}")]
    Encode(String),

    /// Inner codec rejected the payload
    #[error("payload decode failed: {0}")]
    Decode(String),
}

impl CodecError {
    /// Whether this is a schema mismatch rather than a corrupt payload
    pub const fn is_incompatible(&self) -> bool {
        matches!(self, Self::IncompatibleSchema { .. })
    }
}

#[allow(clippy::ref_option)]
fn describe(actual: &Option<Fingerprint>) -> String {
    actual.map_or_else(|| String::from("no header"), |fp| fp.to_string())
}
