//! The solve step: one kernel invocation into one field slot.

use fluidic_arena::FieldStore;
use fluidic_core::{Device, FieldSlot, Target};

use crate::binding::Bindings;
use crate::program::Program;
use crate::report::BindReport;

/// Runs a [`Program`] into a field slot's free buffer and promotes the
/// result.
///
/// This is the only path through which pipeline stages write fields. The
/// write goes through [`FieldStore::write_with`], so the kernel reads the
/// previous generation of every slot (including the target) and the swap
/// happens exactly once, after the dispatch has been issued.
#[derive(Debug)]
pub struct SolveStep<K> {
    program: Program<K>,
}

impl<K> SolveStep<K> {
    /// Wrap a loaded program.
    pub fn new(program: Program<K>) -> Self {
        Self { program }
    }

    /// The wrapped program.
    pub fn program(&self) -> &Program<K> {
        &self.program
    }

    /// Write the next generation of `target`.
    pub fn go<D>(
        &self,
        device: &mut D,
        store: &mut FieldStore<D::Buffer>,
        bindings: &Bindings<'_, D::Buffer>,
        target: FieldSlot,
    ) -> BindReport
    where
        D: Device<Kernel = K>,
    {
        store.write_with(target, |fields, back| {
            self.program
                .execute(device, fields, bindings, Target::Buffer(back))
        })
    }
}

impl<K> From<Program<K>> for SolveStep<K> {
    fn from(program: Program<K>) -> Self {
        Self::new(program)
    }
}
