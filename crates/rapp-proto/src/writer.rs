//! Sequential head/tail encoder.
//!
//! A [`GhostWriter`] fills a caller-owned buffer field by field. Fixed fields
//! go to the head at the next offset; strings get a head pointer and their
//! bytes are appended to the tail. The writer never allocates.
//!
//! Fields must be written in exactly the declaration order the layout was
//! planned from. The wire format carries no field tags, so a writer built with
//! [`GhostWriter::with_layout`] checks the order in debug builds only.

use crate::{
    ABSENT_POINTER, LENGTH_PREFIX,
    buffer,
    errors::{ProtocolError, Result},
    field::TypeTag,
    layout::Layout,
    view::FieldValue,
};

/// Tail bytes a string field adds to a record: its length prefix plus UTF-8
/// bytes when present, nothing when absent.
pub const fn tail_entry_len(value: Option<&str>) -> usize {
    match value {
        Some(text) => LENGTH_PREFIX + text.len(),
        None => 0,
    }
}

/// Single-use encoder over a mutable buffer.
#[derive(Debug)]
pub struct GhostWriter<'b> {
    buf: &'b mut [u8],
    head_size: usize,
    head_cursor: usize,
    tail_cursor: usize,
    next_field: usize,
    #[cfg(debug_assertions)]
    expected: &'b [crate::layout::Slot],
}

impl<'b> GhostWriter<'b> {
    /// Start writing a record whose head is `head_size` bytes.
    ///
    /// # Errors
    ///
    /// `BufferTooSmall` if the buffer cannot hold the head.
    pub fn new(buf: &'b mut [u8], head_size: usize) -> Result<Self> {
        if buf.len() < head_size {
            return Err(ProtocolError::too_small(None, head_size, buf.len()));
        }
        Ok(Self {
            buf,
            head_size,
            head_cursor: 0,
            tail_cursor: head_size,
            next_field: 0,
            #[cfg(debug_assertions)]
            expected: &[],
        })
    }

    /// Start writing a record of the given layout.
    ///
    /// In debug builds every write is checked against the next slot of the
    /// layout, and `finish` checks that all slots were written.
    pub fn with_layout(buf: &'b mut [u8], layout: &'b Layout) -> Result<Self> {
        #[allow(unused_mut)]
        let mut writer = Self::new(buf, layout.head_size())?;
        #[cfg(debug_assertions)]
        {
            writer.expected = layout.slots();
        }
        Ok(writer)
    }

    /// Size of the head region
    pub const fn head_size(&self) -> usize {
        self.head_size
    }

    /// Next head offset to be written
    pub const fn head_cursor(&self) -> usize {
        self.head_cursor
    }

    /// Current end of the tail, which is the serialized length so far
    pub const fn tail_cursor(&self) -> usize {
        self.tail_cursor
    }

    /// Write an unsigned byte
    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        self.put(TypeTag::Byte, [value])
    }

    /// Write a boolean as `0` or `1`
    pub fn write_bool(&mut self, value: bool) -> Result<()> {
        self.put(TypeTag::Bool, [u8::from(value)])
    }

    /// Write a 16-bit integer
    pub fn write_i16(&mut self, value: i16) -> Result<()> {
        self.put(TypeTag::Int16, value.to_le_bytes())
    }

    /// Write a 32-bit integer
    pub fn write_i32(&mut self, value: i32) -> Result<()> {
        self.put(TypeTag::Int32, value.to_le_bytes())
    }

    /// Write a 64-bit integer
    pub fn write_i64(&mut self, value: i64) -> Result<()> {
        self.put(TypeTag::Int64, value.to_le_bytes())
    }

    /// Write a single-precision float by its bit pattern
    pub fn write_f32(&mut self, value: f32) -> Result<()> {
        self.put(TypeTag::Single, value.to_bits().to_le_bytes())
    }

    /// Write a double-precision float by its bit pattern
    pub fn write_f64(&mut self, value: f64) -> Result<()> {
        self.put(TypeTag::Double, value.to_bits().to_le_bytes())
    }

    /// Write a string field.
    ///
    /// `None` stores the absent pointer and no tail bytes. `Some` appends
    /// `[len: u16][utf8]` to the tail and points the head slot at it.
    ///
    /// # Errors
    ///
    /// - `BufferLimitExceeded` if the tail already starts past 65535
    /// - `StringTooLarge` if the UTF-8 length exceeds 65535
    /// - `BufferTooSmall` if the caller's buffer cannot hold the tail entry
    ///
    /// All checks run before any byte of the field is written.
    pub fn write_str(&mut self, value: Option<&str>) -> Result<()> {
        self.check_order(TypeTag::String);
        let field = self.field_index();
        let pointer_at = self.head_cursor;

        match value {
            None => buffer::write_u16(self.buf, pointer_at, ABSENT_POINTER, Some(field))?,
            Some(text) => {
                let tail_offset = self.tail_cursor;
                let pointer = u16::try_from(tail_offset)
                    .map_err(|_| ProtocolError::BufferLimitExceeded { field, tail_offset })?;
                let len = u16::try_from(text.len())
                    .map_err(|_| ProtocolError::StringTooLarge { field, len: text.len() })?;

                let end = tail_offset + LENGTH_PREFIX + text.len();
                if end > self.buf.len() {
                    return Err(ProtocolError::too_small(Some(field), end, self.buf.len()));
                }

                buffer::write_u16(self.buf, pointer_at, pointer, Some(field))?;
                buffer::write_u16(self.buf, tail_offset, len, Some(field))?;
                buffer::write_at(self.buf, tail_offset + LENGTH_PREFIX, text.as_bytes(), Some(field))?;
                self.tail_cursor = end;
            },
        }

        self.advance(TypeTag::String.head_width());
        Ok(())
    }

    /// Write a dynamically typed value
    pub fn write_value(&mut self, value: &FieldValue<'_>) -> Result<()> {
        match *value {
            FieldValue::Byte(v) => self.write_u8(v),
            FieldValue::Bool(v) => self.write_bool(v),
            FieldValue::Int16(v) => self.write_i16(v),
            FieldValue::Int32(v) => self.write_i32(v),
            FieldValue::Int64(v) => self.write_i64(v),
            FieldValue::Single(v) => self.write_f32(v),
            FieldValue::Double(v) => self.write_f64(v),
            FieldValue::String(v) => self.write_str(Some(v)),
        }
    }

    /// Finish the record and return its serialized length
    pub fn finish(self) -> usize {
        self.check_complete();
        self.tail_cursor
    }

    /// Finish the record and return the written prefix of the buffer
    pub fn finish_slice(self) -> &'b [u8] {
        self.check_complete();
        let Self { buf, tail_cursor, .. } = self;
        let buf: &'b [u8] = buf;
        &buf[..tail_cursor]
    }

    fn put<const N: usize>(&mut self, kind: TypeTag, bytes: [u8; N]) -> Result<()> {
        self.check_order(kind);
        buffer::write_at(self.buf, self.head_cursor, &bytes, Some(self.field_index()))?;
        self.advance(N);
        Ok(())
    }

    fn advance(&mut self, width: usize) {
        self.head_cursor += width;
        self.next_field += 1;
    }

    /// Declaration index reported in errors; layouts never exceed `u16::MAX`
    fn field_index(&self) -> u16 {
        u16::try_from(self.next_field).unwrap_or(u16::MAX)
    }

    #[cfg(debug_assertions)]
    fn check_order(&self, kind: TypeTag) {
        debug_assert!(
            self.head_cursor + kind.head_width() <= self.head_size,
            "{kind} write at head offset {} overruns head of {} bytes",
            self.head_cursor,
            self.head_size
        );
        if self.expected.is_empty() {
            return;
        }
        let slot = self.expected.get(self.next_field);
        debug_assert!(slot.is_some(), "more fields written than the layout declares");
        if let Some(slot) = slot {
            debug_assert_eq!(
                slot.kind, kind,
                "field {} declared as {} but written as {kind}",
                slot.index, slot.kind
            );
            debug_assert_eq!(slot.offset, self.head_cursor, "field {} out of order", slot.index);
        }
    }

    #[cfg(not(debug_assertions))]
    #[inline(always)]
    fn check_order(&self, _kind: TypeTag) {}

    #[cfg(debug_assertions)]
    fn check_complete(&self) {
        debug_assert!(
            self.expected.is_empty() || self.next_field == self.expected.len(),
            "{} of {} fields written",
            self.next_field,
            self.expected.len()
        );
    }

    #[cfg(not(debug_assertions))]
    #[inline(always)]
    fn check_complete(&self) {}
}
