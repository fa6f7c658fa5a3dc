//! Read-only view of the current generation of every field.

use fluidic_core::{FieldSlot, GridBuffer, GridSize};

/// A read-only view of the front buffers.
///
/// Borrowed from a [`FieldStore`](crate::FieldStore). While a write is in
/// progress the reader coexists with `&mut` access to exactly one *back*
/// buffer, so everything it returns is the previous, fully written
/// generation.
pub struct FieldReader<'a, B> {
    front: &'a [B; FieldSlot::COUNT],
}

impl<'a, B> FieldReader<'a, B> {
    pub(crate) fn new(front: &'a [B; FieldSlot::COUNT]) -> Self {
        Self { front }
    }

    /// The current (front) buffer of a slot.
    pub fn get(&self, slot: FieldSlot) -> &'a B {
        &self.front[slot.index()]
    }
}

impl<B: GridBuffer> FieldReader<'_, B> {
    /// The fixed size of a slot.
    pub fn size(&self, slot: FieldSlot) -> GridSize {
        self.get(slot).size()
    }
}

impl<B> Clone for FieldReader<'_, B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<B> Copy for FieldReader<'_, B> {}
