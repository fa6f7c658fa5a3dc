//! Strongly-typed identifiers: field slots, resolutions, grid sizes.

use std::fmt;

/// Which of the two coexisting grid resolutions a field lives at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Resolution {
    /// The simulation grid shared by all physics fields.
    Solve,
    /// The presentation grid used by the visible dye field only.
    Draw,
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Solve => write!(f, "solve"),
            Self::Draw => write!(f, "draw"),
        }
    }
}

/// A named logical field backed by a front/back buffer pair.
///
/// The set of slots is fixed: the pipeline is built around exactly these
/// four fields and the grid cannot be reconfigured at runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldSlot {
    /// 2D velocity, stored in the `xy` channels.
    Velocity,
    /// Divergence of velocity, stored in the `x` channel.
    Divergence,
    /// Pressure, stored in the `x` channel.
    Pressure,
    /// Visible ink colour, RGBA.
    Dye,
}

impl FieldSlot {
    /// Number of slots.
    pub const COUNT: usize = 4;

    /// Every slot, in storage order.
    pub const ALL: [FieldSlot; Self::COUNT] = [
        FieldSlot::Velocity,
        FieldSlot::Divergence,
        FieldSlot::Pressure,
        FieldSlot::Dye,
    ];

    /// Storage index of this slot.
    pub fn index(self) -> usize {
        match self {
            Self::Velocity => 0,
            Self::Divergence => 1,
            Self::Pressure => 2,
            Self::Dye => 3,
        }
    }

    /// Human-readable name for diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Self::Velocity => "velocity",
            Self::Divergence => "divergence",
            Self::Pressure => "pressure",
            Self::Dye => "dye",
        }
    }

    /// The resolution class this slot's buffers are allocated at.
    pub fn resolution(self) -> Resolution {
        match self {
            Self::Dye => Resolution::Draw,
            _ => Resolution::Solve,
        }
    }
}

impl fmt::Display for FieldSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Width and height of a grid, in samples.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridSize {
    /// Samples along x.
    pub width: u32,
    /// Samples along y.
    pub height: u32,
}

impl GridSize {
    /// Create a grid size.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// A square grid of `n × n` samples.
    pub const fn square(n: u32) -> Self {
        Self::new(n, n)
    }

    /// Total number of samples.
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Whether either axis is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Per-axis inverse grid spacing `[1/width, 1/height]` in normalized
    /// texture coordinates.
    pub fn texel(&self) -> [f32; 2] {
        [1.0 / self.width as f32, 1.0 / self.height as f32]
    }

    /// The kernel step vector `[1/width, 1/height, dt]`.
    pub fn step_vector(&self, dt: f64) -> [f32; 3] {
        let [dx, dy] = self.texel();
        [dx, dy, dt as f32]
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A texture unit index assigned to a sampled-field parameter.
///
/// Units are handed out per invocation, starting at 0, in binding order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureUnit(pub u32);

impl fmt::Display for TextureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_indices_match_storage_order() {
        for (i, slot) in FieldSlot::ALL.iter().enumerate() {
            assert_eq!(slot.index(), i);
        }
    }

    #[test]
    fn only_dye_is_draw_resolution() {
        assert_eq!(FieldSlot::Dye.resolution(), Resolution::Draw);
        assert_eq!(FieldSlot::Velocity.resolution(), Resolution::Solve);
        assert_eq!(FieldSlot::Divergence.resolution(), Resolution::Solve);
        assert_eq!(FieldSlot::Pressure.resolution(), Resolution::Solve);
    }

    #[test]
    fn step_vector_is_inverse_spacing_and_dt() {
        let d = GridSize::new(4, 8).step_vector(0.5);
        assert_eq!(d, [0.25, 0.125, 0.5]);
    }

    #[test]
    fn empty_grid_detected() {
        assert!(GridSize::new(0, 10).is_empty());
        assert!(!GridSize::square(1).is_empty());
        assert_eq!(GridSize::new(3, 5).cell_count(), 15);
    }
}
