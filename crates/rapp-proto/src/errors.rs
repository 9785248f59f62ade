//! Error types for wire format operations.

use thiserror::Error;

/// Result type for wire format operations
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Errors raised while planning, writing or reading wire buffers.
///
/// Every variant that concerns a record field carries the field's declaration
/// index so callers can tell which accessor failed. `field` is `None` for
/// reads that are not tied to a field (envelope header, writer construction).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// A read or write would touch bytes past the end of the buffer
    #[error("buffer too small{}: need {needed} bytes, have {len}", field_suffix(.field))]
    BufferTooSmall {
        /// Declaration index of the field being accessed
        field: Option<u16>,
        /// Minimum buffer length required for the access
        needed: usize,
        /// Actual buffer length
        len: usize,
    },

    /// A string's UTF-8 encoding does not fit the 16-bit length prefix
    #[error("string too large for field {field}: {len} bytes (max {max})", max = crate::MAX_STRING_LEN)]
    StringTooLarge {
        /// Declaration index of the string field
        field: u16,
        /// UTF-8 byte length of the rejected string
        len: usize,
    },

    /// The tail has grown past the range a 16-bit pointer can address
    #[error(
        "buffer limit exceeded at field {field}: tail offset {tail_offset} is not addressable (max {max})",
        max = crate::MAX_BUFFER_LEN
    )]
    BufferLimitExceeded {
        /// Declaration index of the string field
        field: u16,
        /// Tail offset the pointer would have had to hold
        tail_offset: usize,
    },

    /// String bytes are not valid UTF-8
    #[error("field {field} does not hold valid UTF-8")]
    InvalidUtf8 {
        /// Declaration index of the string field
        field: u16,
    },

    /// A field list is longer than 16-bit declaration indices can number
    #[error("too many fields: {count} declared (max {max})", max = crate::MAX_FIELDS)]
    TooManyFields {
        /// Number of fields seen when the limit was crossed
        count: usize,
    },

    /// Type tag name or byte not recognized
    #[error("unknown type tag: {0}")]
    UnknownTypeTag(String),
}

#[allow(clippy::ref_option)]
fn field_suffix(field: &Option<u16>) -> String {
    field.map_or_else(String::new, |index| format!(" for field {index}"))
}

impl ProtocolError {
    /// Shorthand for a bounds failure on a field access
    pub(crate) const fn too_small(field: Option<u16>, needed: usize, len: usize) -> Self {
        Self::BufferTooSmall { field, needed, len }
    }
}
