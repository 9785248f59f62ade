//! Record bindings
//!
//! [`RecordShape`] is the part of a binding every payload codec needs: a type
//! name and the ordered field list that determines the fingerprint.
//! [`GhostRecord`] adds field-by-field read and write against the head/tail
//! layout. A binding generator emits both; the field order it uses in
//! `write_fields`, `read_fields` and `FIELDS` must agree.
//!
//! ```
//! use rapp_core::{
//!     FieldDescriptor, GhostRecord, GhostView, GhostWriter, ProtocolError, RecordShape, Schema,
//!     TypeTag, tail_entry_len,
//! };
//!
//! struct Item {
//!     id: i32,
//!     name: Option<String>,
//! }
//!
//! impl RecordShape for Item {
//!     const TYPE_NAME: &'static str = "Item";
//!     const FIELDS: &'static [FieldDescriptor] = &[
//!         FieldDescriptor::new(0, "Id", TypeTag::Int32),
//!         FieldDescriptor::new(1, "Name", TypeTag::String),
//!     ];
//!
//!     fn schema() -> &'static Schema {
//!         rapp_core::shape_schema!()
//!     }
//! }
//!
//! impl GhostRecord for Item {
//!     fn tail_len(&self) -> usize {
//!         tail_entry_len(self.name.as_deref())
//!     }
//!
//!     fn write_fields(&self, writer: &mut GhostWriter<'_>) -> Result<(), ProtocolError> {
//!         writer.write_i32(self.id)?;
//!         writer.write_str(self.name.as_deref())
//!     }
//!
//!     fn read_fields(view: &GhostView<'_>, schema: &Schema) -> Result<Self, ProtocolError> {
//!         let slots = schema.layout().slots();
//!         Ok(Self { id: view.read_i32(slots[0])?, name: Some(view.read_string(slots[1])?) })
//!     }
//! }
//!
//! let bytes = Item { id: 7, name: Some("seven".into()) }.to_ghost_vec().unwrap();
//! assert_eq!(bytes.len(), 6 + 2 + 5);
//! assert_eq!(Item::from_ghost(&bytes).unwrap().name.as_deref(), Some("seven"));
//! ```

use rapp_proto::{FieldDescriptor, GhostView, GhostWriter, ProtocolError, Schema};

/// Declared shape of a record type
pub trait RecordShape {
    /// Name used in diagnostics
    const TYPE_NAME: &'static str;

    /// Ordered field descriptors
    const FIELDS: &'static [FieldDescriptor];

    /// Schema derived from [`Self::FIELDS`], computed once.
    ///
    /// Implement with [`shape_schema!`](crate::shape_schema) so the
    /// fingerprint and layout are memoized per type.
    fn schema() -> &'static Schema;
}

/// Record that reads and writes itself in the head/tail layout
pub trait GhostRecord: RecordShape + Sized {
    /// Tail bytes this value occupies, summed with
    /// [`tail_entry_len`](rapp_proto::tail_entry_len) over its string fields
    fn tail_len(&self) -> usize;

    /// Write every field in declaration order
    fn write_fields(&self, writer: &mut GhostWriter<'_>) -> Result<(), ProtocolError>;

    /// Read every field from a view laid out by `schema`
    fn read_fields(view: &GhostView<'_>, schema: &Schema) -> Result<Self, ProtocolError>;

    /// Exact encoded size: head plus tail
    fn encoded_len(&self) -> usize {
        Self::schema().head_size() + self.tail_len()
    }

    /// Encode into a caller buffer, returning the bytes written
    fn write_ghost(&self, buf: &mut [u8]) -> Result<usize, ProtocolError> {
        let mut writer = Self::schema().writer(buf)?;
        self.write_fields(&mut writer)?;
        Ok(writer.finish())
    }

    /// Encode into a freshly allocated, exactly sized buffer
    fn to_ghost_vec(&self) -> Result<Vec<u8>, ProtocolError> {
        let mut buf = vec![0u8; self.encoded_len()];
        let written = self.write_ghost(&mut buf)?;
        buf.truncate(written);
        Ok(buf)
    }

    /// Decode an owned value from ghost bytes
    fn from_ghost(bytes: &[u8]) -> Result<Self, ProtocolError> {
        Self::read_fields(&GhostView::new(bytes), Self::schema())
    }
}

/// Body for [`RecordShape::schema`]: builds the schema from `Self::TYPE_NAME`
/// and `Self::FIELDS` on first use and returns the shared instance after.
///
/// Must be expanded inside a non-generic impl; each expansion owns one
/// `static`.
#[macro_export]
macro_rules! shape_schema {
    () => {{
        static SCHEMA: ::std::sync::OnceLock<$crate::Schema> = ::std::sync::OnceLock::new();
        SCHEMA.get_or_init(|| $crate::Schema::new(Self::TYPE_NAME, Self::FIELDS))
    }};
}
