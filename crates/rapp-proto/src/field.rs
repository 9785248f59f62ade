//! Field descriptors: the declared shape of a record.
//!
//! A record shape is an ordered list of [`FieldDescriptor`]s. The order is
//! authoritative: it alone determines both the schema fingerprint and the
//! byte offsets of every field. Field names never appear on the wire.

use std::{borrow::Cow, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::{MAX_FIELDS, errors::ProtocolError};

/// Type of a record field.
///
/// The discriminant is the byte mixed into the schema fingerprint, so values
/// must never be renumbered.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize_repr, Deserialize_repr)]
pub enum TypeTag {
    /// Unsigned 8-bit integer
    Byte = 0x01,
    /// Boolean stored as one byte (0 = false)
    Bool = 0x02,
    /// Signed 16-bit integer
    Int16 = 0x03,
    /// Signed 32-bit integer
    Int32 = 0x04,
    /// Signed 64-bit integer
    Int64 = 0x05,
    /// IEEE 754 single, stored as its raw bit pattern
    Single = 0x06,
    /// IEEE 754 double, stored as its raw bit pattern
    Double = 0x07,
    /// Variable-length UTF-8 string, stored in the tail
    String = 0x08,
}

impl TypeTag {
    /// Every tag, in wire-code order
    pub const ALL: [Self; 8] = [
        Self::Byte,
        Self::Bool,
        Self::Int16,
        Self::Int32,
        Self::Int64,
        Self::Single,
        Self::Double,
        Self::String,
    ];

    /// Convert to the one-byte wire code
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Convert from the one-byte wire code
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x01 => Some(Self::Byte),
            0x02 => Some(Self::Bool),
            0x03 => Some(Self::Int16),
            0x04 => Some(Self::Int32),
            0x05 => Some(Self::Int64),
            0x06 => Some(Self::Single),
            0x07 => Some(Self::Double),
            0x08 => Some(Self::String),
            _ => None,
        }
    }

    /// Number of head bytes this field occupies.
    ///
    /// Strings occupy a 2-byte pointer slot; their bytes live in the tail.
    pub const fn head_width(self) -> usize {
        match self {
            Self::Byte | Self::Bool => 1,
            Self::Int16 | Self::String => 2,
            Self::Int32 | Self::Single => 4,
            Self::Int64 | Self::Double => 8,
        }
    }

    /// True for the variable-width kind
    pub const fn is_variable(self) -> bool {
        matches!(self, Self::String)
    }

    /// Lowercase name, as accepted by [`FromStr`]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Byte => "byte",
            Self::Bool => "bool",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Single => "single",
            Self::Double => "double",
            Self::String => "string",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TypeTag {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "byte" | "u8" => Ok(Self::Byte),
            "bool" | "boolean" => Ok(Self::Bool),
            "int16" | "i16" | "short" => Ok(Self::Int16),
            "int32" | "i32" | "int" => Ok(Self::Int32),
            "int64" | "i64" | "long" => Ok(Self::Int64),
            "single" | "f32" | "float" => Ok(Self::Single),
            "double" | "f64" => Ok(Self::Double),
            "string" | "str" => Ok(Self::String),
            _ => Err(ProtocolError::UnknownTypeTag(s.to_string())),
        }
    }
}

/// One field of a record shape.
///
/// Descriptors are usually declared as statics by generated binding code:
///
/// ```
/// use rapp_proto::{FieldDescriptor, TypeTag};
///
/// static FIELDS: &[FieldDescriptor] = &[
///     FieldDescriptor::new(0, "Id", TypeTag::Int32),
///     FieldDescriptor::new(1, "Name", TypeTag::String),
/// ];
/// assert_eq!(FIELDS[1].tag, TypeTag::String);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Declaration index within the record
    pub index: u16,
    /// Field name (hashed into the fingerprint, never written to the wire)
    pub name: Cow<'static, str>,
    /// Field type
    pub tag: TypeTag,
}

impl FieldDescriptor {
    /// Create a descriptor with a static name
    pub const fn new(index: u16, name: &'static str, tag: TypeTag) -> Self {
        Self { index, name: Cow::Borrowed(name), tag }
    }

    /// Create a descriptor with an owned name
    pub fn owned(index: u16, name: impl Into<String>, tag: TypeTag) -> Self {
        Self { index, name: Cow::Owned(name.into()), tag }
    }
}

/// Build an ordered descriptor list from `(name, tag)` pairs.
///
/// Declaration indices are assigned from list position.
///
/// # Errors
///
/// `TooManyFields` if the list holds more than [`MAX_FIELDS`] entries.
pub fn descriptors<I, S>(fields: I) -> crate::Result<Vec<FieldDescriptor>>
where
    I: IntoIterator<Item = (S, TypeTag)>,
    S: Into<String>,
{
    let mut out = Vec::new();
    for (position, (name, tag)) in fields.into_iter().enumerate() {
        let index = u16::try_from(position)
            .map_err(|_| ProtocolError::TooManyFields { count: position + 1 })?;
        out.push(FieldDescriptor::owned(index, name, tag));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_codes_round_trip() {
        for tag in TypeTag::ALL {
            assert_eq!(TypeTag::from_u8(tag.to_u8()), Some(tag));
        }
        assert_eq!(TypeTag::from_u8(0x00), None);
        assert_eq!(TypeTag::from_u8(0x09), None);
    }

    #[test]
    fn head_widths() {
        assert_eq!(TypeTag::Byte.head_width(), 1);
        assert_eq!(TypeTag::Bool.head_width(), 1);
        assert_eq!(TypeTag::Int16.head_width(), 2);
        assert_eq!(TypeTag::Int32.head_width(), 4);
        assert_eq!(TypeTag::Single.head_width(), 4);
        assert_eq!(TypeTag::Int64.head_width(), 8);
        assert_eq!(TypeTag::Double.head_width(), 8);
        assert_eq!(TypeTag::String.head_width(), 2);
    }

    #[test]
    fn parse_names_and_aliases() {
        assert_eq!("int32".parse::<TypeTag>().unwrap(), TypeTag::Int32);
        assert_eq!("I64".parse::<TypeTag>().unwrap(), TypeTag::Int64);
        assert_eq!(" f64 ".parse::<TypeTag>().unwrap(), TypeTag::Double);
        assert_eq!("str".parse::<TypeTag>().unwrap(), TypeTag::String);
        for tag in TypeTag::ALL {
            assert_eq!(tag.to_string().parse::<TypeTag>().unwrap(), tag);
        }

        let err = "decimal".parse::<TypeTag>().unwrap_err();
        assert_eq!(err, ProtocolError::UnknownTypeTag("decimal".to_string()));
    }

    #[test]
    fn descriptor_indices_follow_position() {
        let fields = descriptors([("Id", TypeTag::Int32), ("Name", TypeTag::String)]).unwrap();
        assert_eq!(fields[0], FieldDescriptor::new(0, "Id", TypeTag::Int32));
        assert_eq!(fields[1], FieldDescriptor::new(1, "Name", TypeTag::String));
    }

    #[test]
    fn field_count_is_capped_at_index_range() {
        let fields = descriptors((0..MAX_FIELDS).map(|_| ("f", TypeTag::Byte))).unwrap();
        assert_eq!(fields.len(), MAX_FIELDS);
        assert_eq!(fields[MAX_FIELDS - 1].index, u16::MAX);

        let err = descriptors((0..=MAX_FIELDS).map(|_| ("f", TypeTag::Byte))).unwrap_err();
        assert_eq!(err, ProtocolError::TooManyFields { count: MAX_FIELDS + 1 });
    }

    #[test]
    fn type_tag_deserializes_from_wire_code() {
        use serde::de::value::{Error, U8Deserializer};

        let tag = TypeTag::deserialize(U8Deserializer::<Error>::new(0x07)).unwrap();
        assert_eq!(tag, TypeTag::Double);
        assert!(TypeTag::deserialize(U8Deserializer::<Error>::new(0x2a)).is_err());
    }
}
