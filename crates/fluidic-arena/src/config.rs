//! Field store configuration.

use fluidic_core::{EdgeMode, GridSize, Resolution};

/// Configuration for the field store.
///
/// Validated at construction; immutable afterwards. The grid cannot be
/// resized at runtime.
#[derive(Clone, Debug)]
pub struct StoreConfig {
    /// Resolution of every physics field (velocity, divergence, pressure).
    pub solve_size: GridSize,
    /// Resolution of the visible dye field.
    pub draw_size: GridSize,
    /// Addressing mode for every field buffer.
    ///
    /// Default: [`EdgeMode::Clamp`].
    pub edge: EdgeMode,
}

impl StoreConfig {
    /// Create a store config with clamped buffers.
    pub fn new(solve_size: GridSize, draw_size: GridSize) -> Self {
        Self {
            solve_size,
            draw_size,
            edge: EdgeMode::Clamp,
        }
    }

    /// The grid size for a resolution class.
    pub fn size_for(&self, resolution: Resolution) -> GridSize {
        match resolution {
            Resolution::Solve => self.solve_size,
            Resolution::Draw => self.draw_size,
        }
    }
}
