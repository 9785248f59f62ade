//! Zero-copy random-access reader.
//!
//! A [`GhostView`] borrows a buffer and decodes single fields on demand at
//! their planned offsets. Construction does no parsing. Accessors are pure:
//! there is no cursor, so reads can happen in any order, any number of times,
//! from any number of threads.
//!
//! The view borrows its buffer, so it cannot outlive it:
//!
//! ```compile_fail
//! use rapp_proto::GhostView;
//!
//! let view = {
//!     let buf = vec![0u8; 4];
//!     GhostView::new(&buf)
//! };
//! let _ = view.len();
//! ```

use std::fmt;

use crate::{
    ABSENT_POINTER, LENGTH_PREFIX,
    buffer,
    errors::{ProtocolError, Result},
    field::TypeTag,
    layout::{Layout, Slot},
};

/// A decoded field value borrowing string data from the buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    /// Unsigned byte
    Byte(u8),
    /// Boolean
    Bool(bool),
    /// 16-bit integer
    Int16(i16),
    /// 32-bit integer
    Int32(i32),
    /// 64-bit integer
    Int64(i64),
    /// Single-precision float
    Single(f32),
    /// Double-precision float
    Double(f64),
    /// UTF-8 string (empty when absent)
    String(&'a str),
}

impl FieldValue<'_> {
    /// Type tag of this value
    pub const fn kind(&self) -> TypeTag {
        match self {
            Self::Byte(_) => TypeTag::Byte,
            Self::Bool(_) => TypeTag::Bool,
            Self::Int16(_) => TypeTag::Int16,
            Self::Int32(_) => TypeTag::Int32,
            Self::Int64(_) => TypeTag::Int64,
            Self::Single(_) => TypeTag::Single,
            Self::Double(_) => TypeTag::Double,
            Self::String(_) => TypeTag::String,
        }
    }
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Byte(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int16(v) => write!(f, "{v}"),
            Self::Int32(v) => write!(f, "{v}"),
            Self::Int64(v) => write!(f, "{v}"),
            Self::Single(v) => write!(f, "{v}"),
            Self::Double(v) => write!(f, "{v}"),
            Self::String(v) => write!(f, "{v:?}"),
        }
    }
}

/// Non-owning view over a serialized record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GhostView<'a> {
    buf: &'a [u8],
}

impl<'a> GhostView<'a> {
    /// Wrap a buffer. O(1), no validation.
    pub const fn new(buf: &'a [u8]) -> Self {
        Self { buf }
    }

    /// Underlying bytes
    pub const fn as_bytes(&self) -> &'a [u8] {
        self.buf
    }

    /// Buffer length
    pub const fn len(&self) -> usize {
        self.buf.len()
    }

    /// True for an empty buffer
    pub const fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Read a byte field
    pub fn read_u8(&self, slot: Slot) -> Result<u8> {
        self.fixed::<1>(slot, TypeTag::Byte).map(|[b]| b)
    }

    /// Read a boolean field; any nonzero byte is `true`
    pub fn read_bool(&self, slot: Slot) -> Result<bool> {
        self.fixed::<1>(slot, TypeTag::Bool).map(|[b]| b != 0)
    }

    /// Read a 16-bit integer field
    pub fn read_i16(&self, slot: Slot) -> Result<i16> {
        self.fixed(slot, TypeTag::Int16).map(i16::from_le_bytes)
    }

    /// Read a 32-bit integer field
    pub fn read_i32(&self, slot: Slot) -> Result<i32> {
        self.fixed(slot, TypeTag::Int32).map(i32::from_le_bytes)
    }

    /// Read a 64-bit integer field
    pub fn read_i64(&self, slot: Slot) -> Result<i64> {
        self.fixed(slot, TypeTag::Int64).map(i64::from_le_bytes)
    }

    /// Read a single-precision float field, bit-exact
    pub fn read_f32(&self, slot: Slot) -> Result<f32> {
        self.fixed(slot, TypeTag::Single).map(|b| f32::from_bits(u32::from_le_bytes(b)))
    }

    /// Read a double-precision float field, bit-exact
    pub fn read_f64(&self, slot: Slot) -> Result<f64> {
        self.fixed(slot, TypeTag::Double).map(|b| f64::from_bits(u64::from_le_bytes(b)))
    }

    /// Raw UTF-8 bytes of a string field, without copying.
    ///
    /// An absent string (pointer `0`) and an empty string both read as an
    /// empty slice.
    pub fn read_str_bytes(&self, slot: Slot) -> Result<&'a [u8]> {
        debug_assert_eq!(slot.kind, TypeTag::String, "field {} is not a string", slot.index);
        let field = Some(slot.index);

        let pointer = buffer::read_u16(self.buf, slot.offset, field)?;
        if pointer == ABSENT_POINTER {
            return Ok(&[]);
        }

        let entry = usize::from(pointer);
        let len = buffer::read_u16(self.buf, entry, field)?;
        buffer::slice_at(self.buf, entry + LENGTH_PREFIX, usize::from(len), field)
    }

    /// Borrowed string field, validated as UTF-8 but not copied
    pub fn read_str(&self, slot: Slot) -> Result<&'a str> {
        let bytes = self.read_str_bytes(slot)?;
        std::str::from_utf8(bytes).map_err(|_| ProtocolError::InvalidUtf8 { field: slot.index })
    }

    /// Owned copy of a string field (allocates)
    pub fn read_string(&self, slot: Slot) -> Result<String> {
        self.read_str(slot).map(str::to_owned)
    }

    /// Read any field, dispatching on the slot's kind
    pub fn value(&self, slot: Slot) -> Result<FieldValue<'a>> {
        Ok(match slot.kind {
            TypeTag::Byte => FieldValue::Byte(self.read_u8(slot)?),
            TypeTag::Bool => FieldValue::Bool(self.read_bool(slot)?),
            TypeTag::Int16 => FieldValue::Int16(self.read_i16(slot)?),
            TypeTag::Int32 => FieldValue::Int32(self.read_i32(slot)?),
            TypeTag::Int64 => FieldValue::Int64(self.read_i64(slot)?),
            TypeTag::Single => FieldValue::Single(self.read_f32(slot)?),
            TypeTag::Double => FieldValue::Double(self.read_f64(slot)?),
            TypeTag::String => FieldValue::String(self.read_str(slot)?),
        })
    }

    /// Read every field of a layout in declaration order
    pub fn values(&self, layout: &Layout) -> Result<Vec<FieldValue<'a>>> {
        layout.slots().iter().map(|slot| self.value(*slot)).collect()
    }

    fn fixed<const N: usize>(&self, slot: Slot, kind: TypeTag) -> Result<[u8; N]> {
        debug_assert_eq!(slot.kind, kind, "field {} read as {kind}", slot.index);
        buffer::read_array(self.buf, slot.offset, Some(slot.index))
    }
}
