//! Simulation engine for the Fluidic grid fluid solver.
//!
//! Builds the physics on top of the kernel layer:
//!
//! - [`LinearSolver`]: fixed-sweep Jacobi relaxation
//! - [`FluidStepPipeline`]: the ordered stages of one timestep
//! - [`FixedStepScheduler`]: fixed-step accumulation with a one-way
//!   runaway fallback
//! - [`Fluid`]: the facade that owns the device, store, pipeline, and
//!   scheduler, and exposes injection and drawing
//!
//! Everything runs on the caller's thread. There is no internal thread
//! or timer; a driver calls [`Fluid::tick`] periodically.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod fluid;
pub mod metrics;
pub mod pipeline;
pub mod scheduler;
pub mod solver;

pub use config::{ConfigError, FluidConfig};
pub use fluid::{Fluid, InitError};
pub use metrics::FrameCounter;
pub use pipeline::{FluidStepPipeline, Stage, StepReport};
pub use scheduler::{FixedStepScheduler, SchedulerState, SchedulerTick};
pub use solver::LinearSolver;
