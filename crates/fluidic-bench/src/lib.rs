//! Benchmark profiles and utilities for the Fluidic grid fluid solver.
//!
//! Provides pre-built [`FluidConfig`] profiles for benchmarking:
//!
//! - [`reference_profile`]: 64x64 solve and draw grids
//! - [`stress_profile`]: the 256x256 defaults
//! - [`seed_dye`]: deterministic dye splats so the pipeline has work to do

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use fluidic_core::GridSize;
use fluidic_cpu::{BundledSources, CpuDevice};
use fluidic_engine::{Fluid, FluidConfig, InitError};

/// Build a reference benchmark profile: 64x64 grids (4K cells), 20 Jacobi
/// sweeps.
pub fn reference_profile() -> FluidConfig {
    FluidConfig {
        solve_size: GridSize::square(64),
        draw_size: GridSize::square(64),
        ..FluidConfig::default()
    }
}

/// Build a stress benchmark profile: the 256x256 defaults (65K cells).
pub fn stress_profile() -> FluidConfig {
    FluidConfig::default()
}

/// A CPU-backed fluid for `config`, with a surface the size of the dye grid.
pub fn cpu_fluid(config: FluidConfig) -> Result<Fluid<CpuDevice>, InitError> {
    let device = CpuDevice::new(config.draw_size);
    Fluid::new(device, &BundledSources, config)
}

/// Inject `n` splats at positions derived from `seed`.
///
/// Positions come from a multiplicative hash so runs with the same seed
/// see the same dye.
pub fn seed_dye(fluid: &mut Fluid<CpuDevice>, n: u32, seed: u64) {
    for i in 0..n {
        let h = seed
            .wrapping_mul(6364136223846793005)
            .wrapping_add(u64::from(i).wrapping_mul(1442695040888963407));
        let x = (h >> 40) as f32 / (1u64 << 24) as f32;
        let y = ((h >> 16) & 0xff_ffff) as f32 / (1u64 << 24) as f32;
        let _ = fluid.inject([x, y], [1.0, 0.5, 0.25, 1.0]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fluidic_core::FieldSlot;

    #[test]
    fn profiles_validate() {
        reference_profile().validate().unwrap();
        stress_profile().validate().unwrap();
    }

    #[test]
    fn seeded_dye_is_deterministic_and_visible() {
        let run = || {
            let mut f = cpu_fluid(reference_profile()).unwrap();
            seed_dye(&mut f, 4, 42);
            f.store().get(FieldSlot::Dye).clone()
        };
        let a = run();
        assert_eq!(a, run());
        assert!(a.texels().iter().any(|t| t[0] > 0.0));
    }
}
