//! Reference CPU device for the Fluidic grid fluid solver.
//!
//! [`CpuDevice`] implements [`Device`](fluidic_core::Device) with RGBA
//! float [`Texture`]s and runs the bundled kernels on the CPU, one texel
//! at a time. [`BundledSources`] resolves the kernel text by name; the
//! text is what a GPU backend would compile, and its `#pragma` directives
//! tell the CPU device which built-in implementation to run.
//!
//! # Bundled kernels
//!
//! | Kernel | Helpers | Writes |
//! |--------|---------|--------|
//! | `perturb` | | velocity + buoyancy from dye brightness |
//! | `advect` | `bilerp` | `field` traced back along `velocity` |
//! | `jacobi` | `neighbours` | `(b + alpha * Σ neighbours(x)) / beta` |
//! | `divergence` | `neighbours` | central-difference divergence |
//! | `subtract-pressure-gradient` | `neighbours` | velocity minus ∇pressure |
//! | `boundary` | | edge texels from their inward neighbour × `multiple` |
//! | `inject` | | `field` plus a radial splat of `color` |
//! | `draw` | | `field` clamped to `[0, 1]` |
//! | `debug-draw` | | `0.5 + 0.5 * field` |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod device;
pub mod kernels;
pub mod sources;
pub mod texture;

pub use device::CpuDevice;
pub use kernels::{CpuKernel, KernelKind, BUOYANCY};
pub use sources::BundledSources;
pub use texture::Texture;
