//! Per-shape schema: descriptors plus everything derived from them.

use std::borrow::Cow;

use crate::{
    errors::Result,
    field::FieldDescriptor,
    fingerprint::Fingerprint,
    layout::{Layout, Slot},
    view::GhostView,
    writer::GhostWriter,
};

/// Fingerprint and layout of one record shape, computed once.
///
/// A `Schema` is immutable after construction and is meant to be built once
/// per shape and shared (typically behind a `static` `OnceLock`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    type_name: Cow<'static, str>,
    fields: Cow<'static, [FieldDescriptor]>,
    fingerprint: Fingerprint,
    layout: Layout,
}

impl Schema {
    /// Derive fingerprint and layout for an ordered descriptor list
    pub fn new(
        type_name: impl Into<Cow<'static, str>>,
        fields: impl Into<Cow<'static, [FieldDescriptor]>>,
    ) -> Self {
        let fields = fields.into();
        let fingerprint = Fingerprint::of(&fields);
        let layout = Layout::plan(&fields);
        Self { type_name: type_name.into(), fields, fingerprint, layout }
    }

    /// Record type name, used in diagnostics
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Descriptors in declaration order
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Schema fingerprint
    pub const fn fingerprint(&self) -> Fingerprint {
        self.fingerprint
    }

    /// Head/tail layout
    pub const fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Size of the fixed head region
    pub const fn head_size(&self) -> usize {
        self.layout.head_size()
    }

    /// Slot of the field at a list position
    pub fn slot(&self, position: usize) -> Option<Slot> {
        self.layout.slot(position)
    }

    /// Slot of the field with the given name
    pub fn slot_named(&self, name: &str) -> Option<Slot> {
        let position = self.fields.iter().position(|field| field.name == name)?;
        self.layout.slot(position)
    }

    /// Start writing a record of this shape into `buf`
    pub fn writer<'b>(&'b self, buf: &'b mut [u8]) -> Result<GhostWriter<'b>> {
        GhostWriter::with_layout(buf, &self.layout)
    }

    /// View `buf` as a record of this shape
    pub const fn view<'a>(&self, buf: &'a [u8]) -> GhostView<'a> {
        GhostView::new(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{TypeTag, descriptors};

    static FIELDS: &[FieldDescriptor] = &[
        FieldDescriptor::new(0, "Id", TypeTag::Int32),
        FieldDescriptor::new(1, "Name", TypeTag::String),
    ];

    const ID: Slot = Slot::new(0, 0, TypeTag::Int32);

    #[test]
    fn static_and_owned_descriptors_agree() {
        let borrowed = Schema::new("Item", FIELDS);
        let owned = Schema::new(
            String::from("Item"),
            descriptors([("Id", TypeTag::Int32), ("Name", TypeTag::String)]).unwrap(),
        );
        assert_eq!(borrowed.fingerprint(), owned.fingerprint());
        assert_eq!(borrowed.layout(), owned.layout());
    }

    #[test]
    fn slot_lookup_by_name() {
        let schema = Schema::new("Item", FIELDS);
        assert_eq!(schema.slot_named("Name"), Some(Slot::new(1, 4, TypeTag::String)));
        assert_eq!(schema.slot_named("name"), None);
        assert_eq!(schema.head_size(), 6);
    }

    #[test]
    fn writer_and_view_share_layout() {
        let schema = Schema::new("Item", FIELDS);
        let mut buf = [0u8; 32];
        let mut writer = schema.writer(&mut buf).unwrap();
        writer.write_i32(-1).unwrap();
        writer.write_str(Some("x")).unwrap();
        let len = writer.finish();

        let view = schema.view(&buf[..len]);
        assert_eq!(view.read_i32(ID).unwrap(), -1);
        assert_eq!(view.read_str(schema.slot(1).unwrap()).unwrap(), "x");
    }
}
