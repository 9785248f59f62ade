//! Head/tail layout planning.
//!
//! ```text
//! ┌──────────────────────────────┬─────────────────────────────────────┐
//! │ Head [0, head_size)          │ Tail [head_size, total_len)         │
//! │ fixed fields + u16 pointers  │ [u16 len][utf8 bytes] per string    │
//! └──────────────────────────────┴─────────────────────────────────────┘
//! ```
//!
//! Fixed fields sit at offsets known from the shape alone. Each string field
//! owns a 2-byte pointer in the head holding the absolute offset of its tail
//! entry, or `0` when the value is absent. The planner runs once per shape;
//! the result is immutable and can be shared across threads.

use crate::field::{FieldDescriptor, TypeTag};

/// Head position of one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slot {
    /// Declaration index of the field
    pub index: u16,
    /// Byte offset of the slot within the head
    pub offset: usize,
    /// Field type
    pub kind: TypeTag,
}

impl Slot {
    /// Create a slot; generated accessors use this with planner-computed
    /// offsets baked in as constants.
    pub const fn new(index: u16, offset: usize, kind: TypeTag) -> Self {
        Self { index, offset, kind }
    }

    /// Head bytes occupied by this slot
    pub const fn width(&self) -> usize {
        self.kind.head_width()
    }

    /// First head byte after this slot
    pub const fn end(&self) -> usize {
        self.offset + self.width()
    }
}

/// Per-shape slot table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Layout {
    slots: Vec<Slot>,
    head_size: usize,
}

impl Layout {
    /// Plan offsets for an ordered descriptor list.
    ///
    /// Slots are assigned in list order, each directly after the previous one.
    /// There is no padding or alignment.
    pub fn plan(fields: &[FieldDescriptor]) -> Self {
        let mut slots = Vec::with_capacity(fields.len());
        let mut offset = 0;
        for field in fields {
            let slot = Slot::new(field.index, offset, field.tag);
            offset = slot.end();
            slots.push(slot);
        }
        Self { slots, head_size: offset }
    }

    /// Size of the fixed head region
    pub const fn head_size(&self) -> usize {
        self.head_size
    }

    /// All slots in declaration order
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Slot at a list position
    pub fn slot(&self, position: usize) -> Option<Slot> {
        self.slots.get(position).copied()
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True for a shape with no fields
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of string fields
    pub fn string_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.kind.is_variable()).count()
    }
}
