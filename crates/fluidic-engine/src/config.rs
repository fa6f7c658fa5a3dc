//! Simulation configuration, validation, and error types.
//!
//! [`FluidConfig`] is the input for constructing a [`Fluid`](crate::Fluid).
//! [`validate()`](FluidConfig::validate) checks every option invariant at
//! startup, before any device resource is allocated.

use std::error::Error;
use std::fmt;

use fluidic_arena::StoreConfig;
use fluidic_core::{GridSize, Resolution};

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`FluidConfig::validate()`].
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// A grid has a zero-length axis.
    EmptyGrid {
        /// Which grid.
        resolution: Resolution,
    },
    /// `dt` is NaN, infinite, zero, or negative.
    InvalidTimestep {
        /// The invalid value.
        value: f64,
    },
    /// `draw_radius` is NaN, infinite, zero, or negative.
    InvalidDrawRadius {
        /// The invalid value.
        value: f32,
    },
    /// `speed_multiplier` is NaN, infinite, or negative.
    InvalidSpeedMultiplier {
        /// The invalid value.
        value: f64,
    },
    /// `runaway_threshold` is not finite or does not exceed `dt`.
    InvalidRunawayThreshold {
        /// The invalid value.
        value: f64,
        /// The configured timestep.
        dt: f64,
    },
    /// `viscosity` is NaN, infinite, or negative.
    InvalidViscosity {
        /// The invalid value.
        value: f32,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid { resolution } => {
                write!(f, "{resolution} grid has a zero-length axis")
            }
            Self::InvalidTimestep { value } => {
                write!(f, "dt must be finite and positive, got {value}")
            }
            Self::InvalidDrawRadius { value } => {
                write!(f, "draw_radius must be finite and positive, got {value}")
            }
            Self::InvalidSpeedMultiplier { value } => {
                write!(f, "speed_multiplier must be finite and >= 0, got {value}")
            }
            Self::InvalidRunawayThreshold { value, dt } => {
                write!(f, "runaway_threshold must be finite and > dt ({dt}), got {value}")
            }
            Self::InvalidViscosity { value } => {
                write!(f, "viscosity must be finite and >= 0, got {value}")
            }
        }
    }
}

impl Error for ConfigError {}

// ── FluidConfig ────────────────────────────────────────────────────

/// Complete configuration for constructing a fluid simulation.
#[derive(Clone, Debug, PartialEq)]
pub struct FluidConfig {
    /// Jacobi sweeps per linear solve. Default: 20. Zero disables
    /// relaxation.
    pub num_iterations: u32,
    /// Injection radius in normalised coordinates. Default: 0.04.
    pub draw_radius: f32,
    /// Resolution of the physics fields. Default: 256×256.
    pub solve_size: GridSize,
    /// Resolution of the dye field. Default: 256×256.
    pub draw_size: GridSize,
    /// Fixed simulated timestep in seconds. Default: 0.01.
    pub dt: f64,
    /// Scales wall-clock time before it reaches the scheduler. Default: 1.
    pub speed_multiplier: f64,
    /// A single frame longer than this many seconds degrades the
    /// scheduler to variable stepping. Default: 5.
    pub runaway_threshold: f64,
    /// Run viscous diffusion of velocity after advection. Default: off.
    pub diffuse_velocity: bool,
    /// Kinematic viscosity used when `diffuse_velocity` is on.
    /// Default: 1e-5.
    pub viscosity: f32,
}

impl Default for FluidConfig {
    fn default() -> Self {
        Self {
            num_iterations: 20,
            draw_radius: 0.04,
            solve_size: GridSize::square(256),
            draw_size: GridSize::square(256),
            dt: 0.01,
            speed_multiplier: 1.0,
            runaway_threshold: 5.0,
            diffuse_velocity: false,
            viscosity: 1e-5,
        }
    }
}

impl FluidConfig {
    /// Validate all option invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.solve_size.is_empty() {
            return Err(ConfigError::EmptyGrid {
                resolution: Resolution::Solve,
            });
        }
        if self.draw_size.is_empty() {
            return Err(ConfigError::EmptyGrid {
                resolution: Resolution::Draw,
            });
        }
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(ConfigError::InvalidTimestep { value: self.dt });
        }
        if !self.draw_radius.is_finite() || self.draw_radius <= 0.0 {
            return Err(ConfigError::InvalidDrawRadius {
                value: self.draw_radius,
            });
        }
        if !self.speed_multiplier.is_finite() || self.speed_multiplier < 0.0 {
            return Err(ConfigError::InvalidSpeedMultiplier {
                value: self.speed_multiplier,
            });
        }
        if !self.runaway_threshold.is_finite() || self.runaway_threshold <= self.dt {
            return Err(ConfigError::InvalidRunawayThreshold {
                value: self.runaway_threshold,
                dt: self.dt,
            });
        }
        if !self.viscosity.is_finite() || self.viscosity < 0.0 {
            return Err(ConfigError::InvalidViscosity {
                value: self.viscosity,
            });
        }
        Ok(())
    }

    /// Store layout for these grid sizes.
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::new(self.solve_size, self.draw_size)
    }
}
