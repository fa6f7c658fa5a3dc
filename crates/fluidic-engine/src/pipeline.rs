//! The ordered physics pipeline for one timestep.
//!
//! Stage order is load-bearing: each stage reads exactly what earlier
//! stages of the same timestep wrote. The order is fixed when the
//! pipeline is built and never changes afterwards.

use fluidic_arena::FieldStore;
use fluidic_core::{Device, FieldSlot, LoadError, SourceResolver};
use fluidic_kernel::{BindReport, Bindings, KernelLoader, SolveStep};

use crate::config::FluidConfig;
use crate::solver::LinearSolver;

/// One building block of a timestep.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Force term: velocity driven by the dye field.
    Perturb,
    /// Semi-Lagrangian advection of dye, at draw resolution.
    AdvectDye,
    /// Semi-Lagrangian self-advection of velocity.
    AdvectVelocity,
    /// Implicit viscous diffusion of velocity.
    DiffuseVelocity,
    /// Velocity divergence.
    Divergence,
    /// Pressure Poisson solve.
    ProjectPressure,
    /// Pressure boundary, `multiple = +1`.
    BoundaryPressure,
    /// Subtract the pressure gradient from velocity.
    SubtractPressureGradient,
    /// Velocity boundary, `multiple = -1`.
    BoundaryVelocity,
}

impl Stage {
    /// The stage sequence, optionally with velocity diffusion after
    /// velocity advection.
    pub fn sequence(diffuse_velocity: bool) -> Vec<Stage> {
        let mut stages = vec![Stage::Perturb, Stage::AdvectDye, Stage::AdvectVelocity];
        if diffuse_velocity {
            stages.push(Stage::DiffuseVelocity);
        }
        stages.extend([
            Stage::Divergence,
            Stage::ProjectPressure,
            Stage::BoundaryPressure,
            Stage::SubtractPressureGradient,
            Stage::BoundaryVelocity,
        ]);
        stages
    }

    /// The slot this stage writes.
    pub fn target(self) -> FieldSlot {
        match self {
            Stage::AdvectDye => FieldSlot::Dye,
            Stage::Divergence => FieldSlot::Divergence,
            Stage::ProjectPressure | Stage::BoundaryPressure => FieldSlot::Pressure,
            Stage::Perturb
            | Stage::AdvectVelocity
            | Stage::DiffuseVelocity
            | Stage::SubtractPressureGradient
            | Stage::BoundaryVelocity => FieldSlot::Velocity,
        }
    }

    /// The kernel this stage runs.
    pub fn kernel(self) -> &'static str {
        match self {
            Stage::Perturb => "perturb",
            Stage::AdvectDye | Stage::AdvectVelocity => "advect",
            Stage::DiffuseVelocity | Stage::ProjectPressure => "jacobi",
            Stage::Divergence => "divergence",
            Stage::BoundaryPressure | Stage::BoundaryVelocity => "boundary",
            Stage::SubtractPressureGradient => "subtract-pressure-gradient",
        }
    }
}

/// Outcome of one pipeline step.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[must_use]
pub struct StepReport {
    /// Stages executed.
    pub stages: usize,
    /// Kernel invocations issued.
    pub invocations: usize,
    /// Bindings skipped with a warning.
    pub skipped: usize,
}

impl StepReport {
    fn record(&mut self, invocations: usize, bind: BindReport) {
        self.stages += 1;
        self.invocations += invocations;
        self.skipped += bind.warnings.len();
    }
}

/// The fixed ordered sequence of kernel invocations for one timestep.
#[derive(Debug)]
pub struct FluidStepPipeline<K> {
    stages: Vec<Stage>,
    perturb: SolveStep<K>,
    advect: SolveStep<K>,
    divergence: SolveStep<K>,
    subtract_gradient: SolveStep<K>,
    boundary: SolveStep<K>,
    solver: LinearSolver<K>,
    viscosity: f32,
}

impl<K> FluidStepPipeline<K> {
    /// Load every pipeline kernel and fix the stage order.
    pub fn load<D, R>(
        device: &mut D,
        loader: &KernelLoader<'_, R>,
        config: &FluidConfig,
    ) -> Result<Self, LoadError>
    where
        D: Device<Kernel = K>,
        R: SourceResolver + ?Sized,
    {
        let perturb = loader.solve_step(device, "perturb", &[])?;
        let advect = loader.solve_step(device, "advect", &["bilerp"])?;
        let jacobi = loader.solve_step(device, "jacobi", &["neighbours"])?;
        let divergence = loader.solve_step(device, "divergence", &["neighbours"])?;
        let subtract_gradient =
            loader.solve_step(device, "subtract-pressure-gradient", &["neighbours"])?;
        let boundary = loader.solve_step(device, "boundary", &[])?;

        Ok(Self {
            stages: Stage::sequence(config.diffuse_velocity),
            perturb,
            advect,
            divergence,
            subtract_gradient,
            boundary,
            solver: LinearSolver::new(jacobi, config.num_iterations),
            viscosity: config.viscosity,
        })
    }

    /// The stage order.
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Advance the fields by `dt` seconds.
    pub fn step<D>(&self, device: &mut D, store: &mut FieldStore<D::Buffer>, dt: f64) -> StepReport
    where
        D: Device<Kernel = K>,
    {
        let d_solve = store.size(FieldSlot::Velocity).step_vector(dt);
        let d_draw = store.size(FieldSlot::Dye).step_vector(dt);
        let mut report = StepReport::default();

        for &stage in &self.stages {
            let target = stage.target();
            match stage {
                Stage::Perturb => {
                    let bindings = Bindings::new()
                        .field("velocity", FieldSlot::Velocity)
                        .field("source", FieldSlot::Dye)
                        .vec3("d", d_solve);
                    report.record(1, self.perturb.go(device, store, &bindings, target));
                }
                Stage::AdvectDye | Stage::AdvectVelocity => {
                    let d = if stage == Stage::AdvectDye { d_draw } else { d_solve };
                    let bindings = Bindings::new()
                        .field("velocity", FieldSlot::Velocity)
                        .field("field", target)
                        .vec3("d", d);
                    report.record(1, self.advect.go(device, store, &bindings, target));
                }
                Stage::DiffuseVelocity => {
                    let alpha = d_solve[2] * self.viscosity / (d_solve[0] * d_solve[1]);
                    let beta = 1.0 + 4.0 * alpha;
                    let bind = self
                        .solver
                        .go(device, store, target, target, target, d_solve, alpha, beta);
                    report.record(self.solver.iterations() as usize, bind);
                }
                Stage::Divergence => {
                    let bindings = Bindings::new()
                        .field("velocity", FieldSlot::Velocity)
                        .vec3("d", d_solve);
                    report.record(1, self.divergence.go(device, store, &bindings, target));
                }
                Stage::ProjectPressure => {
                    let bind = self.solver.go(
                        device,
                        store,
                        FieldSlot::Pressure,
                        FieldSlot::Divergence,
                        target,
                        d_solve,
                        1.0,
                        4.0,
                    );
                    report.record(self.solver.iterations() as usize, bind);
                }
                Stage::BoundaryPressure | Stage::BoundaryVelocity => {
                    let multiple = if stage == Stage::BoundaryPressure { 1.0 } else { -1.0 };
                    let bindings = Bindings::new()
                        .field("field", target)
                        .vec3("d", d_solve)
                        .float("multiple", multiple);
                    report.record(1, self.boundary.go(device, store, &bindings, target));
                }
                Stage::SubtractPressureGradient => {
                    let bindings = Bindings::new()
                        .field("velocity", FieldSlot::Velocity)
                        .field("pressure", FieldSlot::Pressure)
                        .vec3("d", d_solve);
                    report.record(
                        1,
                        self.subtract_gradient.go(device, store, &bindings, target),
                    );
                }
            }
        }

        log::debug!(
            "step dt={dt}: {} stages, {} invocations",
            report.stages,
            report.invocations
        );
        report
    }
}
