//! Jacobi relaxation for 5-point-stencil linear systems.

use fluidic_arena::FieldStore;
use fluidic_core::{Device, FieldSlot};
use fluidic_kernel::{BindReport, Bindings, SolveStep};

/// Approximately solves `A x = b` with a fixed number of Jacobi sweeps.
///
/// There is no convergence test and no residual: every call runs exactly
/// `iterations` sweeps. Each sweep writes `destination` through the solve
/// step, so when `destination` is also `x` the next sweep reads the
/// previous sweep's swapped result.
#[derive(Debug)]
pub struct LinearSolver<K> {
    step: SolveStep<K>,
    iterations: u32,
}

impl<K> LinearSolver<K> {
    /// Wrap the relaxation kernel with a fixed sweep count.
    pub fn new(step: SolveStep<K>, iterations: u32) -> Self {
        Self { step, iterations }
    }

    /// Sweeps per solve.
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Run every sweep.
    ///
    /// `alpha` and `beta` are the stencil coefficients of the equation
    /// being solved: `x' = (b + alpha * Σ neighbours(x)) / beta`.
    #[allow(clippy::too_many_arguments)]
    pub fn go<D>(
        &self,
        device: &mut D,
        store: &mut FieldStore<D::Buffer>,
        x: FieldSlot,
        b: FieldSlot,
        destination: FieldSlot,
        d: [f32; 3],
        alpha: f32,
        beta: f32,
    ) -> BindReport
    where
        D: Device<Kernel = K>,
    {
        let bindings = Bindings::new()
            .field("x", x)
            .field("b", b)
            .vec3("d", d)
            .float("alpha", alpha)
            .float("beta", beta);

        let mut report = BindReport::default();
        for _ in 0..self.iterations {
            report.merge(self.step.go(device, store, &bindings, destination));
        }
        report
    }
}
