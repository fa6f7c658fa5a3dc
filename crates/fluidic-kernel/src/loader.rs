//! Factory for programs and solve steps backed by one source resolver.

use fluidic_core::{Device, LoadError, SourceResolver};

use crate::executor::SolveStep;
use crate::program::Program;

/// Loads kernels by name from a [`SourceResolver`].
pub struct KernelLoader<'r, R: ?Sized> {
    resolver: &'r R,
}

impl<'r, R: SourceResolver + ?Sized> KernelLoader<'r, R> {
    /// Create a loader over `resolver`.
    pub fn new(resolver: &'r R) -> Self {
        Self { resolver }
    }

    /// Load a program for direct execution (surface draws, injection).
    pub fn program<D: Device>(
        &self,
        device: &mut D,
        name: &str,
        auxiliaries: &[&str],
    ) -> Result<Program<D::Kernel>, LoadError> {
        let program = Program::load(device, self.resolver, name, auxiliaries)?;
        log::info!(
            "loaded kernel '{}' ({} parameters)",
            program.name(),
            program.schema().len()
        );
        Ok(program)
    }

    /// Load a program wrapped as a solve step.
    pub fn solve_step<D: Device>(
        &self,
        device: &mut D,
        name: &str,
        auxiliaries: &[&str],
    ) -> Result<SolveStep<D::Kernel>, LoadError> {
        self.program(device, name, auxiliaries).map(SolveStep::new)
    }
}
