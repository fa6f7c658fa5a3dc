//! Fluidic: real-time grid-based incompressible fluid simulation.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Fluidic sub-crates. For most users, adding `fluidic` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use fluidic::prelude::*;
//!
//! let config = FluidConfig {
//!     solve_size: GridSize::square(32),
//!     draw_size: GridSize::square(32),
//!     ..FluidConfig::default()
//! };
//! let device = CpuDevice::new(config.draw_size);
//! let mut fluid = Fluid::new(device, &BundledSources, config).unwrap();
//!
//! // Drop some dye in the middle and let buoyancy carry it.
//! let report = fluid.inject([0.5, 0.5], [1.0, 0.0, 0.0, 1.0]);
//! assert!(report.is_clean());
//! let tick = fluid.advance(0.055);
//! assert_eq!(tick.steps, 5);
//!
//! let _ = fluid.draw();
//! assert_eq!(fluid.device().surface().fetch(0, 0)[3], 1.0);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the
//! prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `fluidic-core` | IDs, parameter types, the `Device` trait, errors |
//! | [`arena`] | `fluidic-arena` | The double-buffered field store |
//! | [`kernel`] | `fluidic-kernel` | Kernel loading, schemas, bindings, solve steps |
//! | [`engine`] | `fluidic-engine` | Solver, pipeline, scheduler, the `Fluid` facade |
//! | [`cpu`] | `fluidic-cpu` | Reference CPU device and bundled kernels |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits, and IDs (`fluidic-core`).
///
/// Implement [`types::Device`] to run the simulation on a new backend and
/// [`types::SourceResolver`] to supply kernel text from somewhere new.
pub use fluidic_core as types;

/// Double-buffered field storage (`fluidic-arena`).
pub use fluidic_arena as arena;

/// Kernel programs and the solve step (`fluidic-kernel`).
///
/// [`kernel::Bindings`] name the values a kernel invocation receives;
/// [`kernel::BindReport`] lists any that were skipped.
pub use fluidic_kernel as kernel;

/// Simulation engine (`fluidic-engine`).
pub use fluidic_engine as engine;

/// Reference CPU device (`fluidic-cpu`).
pub use fluidic_cpu as cpu;

/// Common imports for typical Fluidic usage.
///
/// ```rust
/// use fluidic::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use fluidic_core::{
        Device, EdgeMode, FieldSlot, GridBuffer, GridSize, Resolution, SourceResolver,
    };

    // Errors
    pub use fluidic_core::{BackendError, LoadError};
    pub use fluidic_engine::{ConfigError, InitError};

    // Kernel layer
    pub use fluidic_kernel::{BindReport, BindWarning, Bindings};

    // Engine
    pub use fluidic_engine::{
        FixedStepScheduler, Fluid, FluidConfig, SchedulerState, SchedulerTick, Stage,
    };

    // CPU device
    pub use fluidic_cpu::{BundledSources, CpuDevice, Texture};
}
