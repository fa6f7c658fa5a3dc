//! RGBA float textures.

use fluidic_core::{BackendError, EdgeMode, GridBuffer, GridSize};

/// A grid of RGBA `f32` texels, row-major with row 0 at `v = 0`.
///
/// Sampling by normalised coordinate is nearest-texel; out-of-range
/// coordinates follow the texture's [`EdgeMode`].
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    size: GridSize,
    edge: EdgeMode,
    texels: Vec<[f32; 4]>,
}

impl Texture {
    /// A zero-filled texture.
    pub fn new(size: GridSize, edge: EdgeMode) -> Self {
        Self {
            size,
            edge,
            texels: vec![[0.0; 4]; size.cell_count()],
        }
    }

    /// Wrap existing texel data, e.g. a decoded image.
    ///
    /// Returns `Err` if `texels` does not hold exactly one texel per cell.
    pub fn from_texels(
        size: GridSize,
        edge: EdgeMode,
        texels: Vec<[f32; 4]>,
    ) -> Result<Self, BackendError> {
        if texels.len() != size.cell_count() {
            return Err(BackendError::Allocation {
                reason: format!(
                    "{} texels supplied for a {size} texture",
                    texels.len()
                ),
            });
        }
        Ok(Self {
            size,
            edge,
            texels,
        })
    }

    /// Edge addressing mode.
    pub fn edge(&self) -> EdgeMode {
        self.edge
    }

    /// All texels, row-major.
    pub fn texels(&self) -> &[[f32; 4]] {
        &self.texels
    }

    /// Mutable texels, row-major.
    pub fn texels_mut(&mut self) -> &mut [[f32; 4]] {
        &mut self.texels
    }

    /// The texel at integer coordinates, resolved through the edge mode.
    pub fn fetch(&self, x: i64, y: i64) -> [f32; 4] {
        if self.texels.is_empty() {
            return [0.0; 4];
        }
        let x = self.edge.resolve(x, self.size.width) as usize;
        let y = self.edge.resolve(y, self.size.height) as usize;
        self.texels[y * self.size.width as usize + x]
    }

    /// Nearest-texel sample at normalised coordinates.
    pub fn sample(&self, uv: [f32; 2]) -> [f32; 4] {
        let x = (uv[0] * self.size.width as f32).floor() as i64;
        let y = (uv[1] * self.size.height as f32).floor() as i64;
        self.fetch(x, y)
    }

    /// Bilinear sample at normalised coordinates, between texel centres.
    pub fn sample_linear(&self, uv: [f32; 2]) -> [f32; 4] {
        let sx = uv[0] * self.size.width as f32 - 0.5;
        let sy = uv[1] * self.size.height as f32 - 0.5;
        let x0 = sx.floor();
        let y0 = sy.floor();
        let fx = sx - x0;
        let fy = sy - y0;
        let (x0, y0) = (x0 as i64, y0 as i64);

        let bottom = lerp(self.fetch(x0, y0), self.fetch(x0 + 1, y0), fx);
        let top = lerp(self.fetch(x0, y0 + 1), self.fetch(x0 + 1, y0 + 1), fx);
        lerp(bottom, top, fy)
    }

    /// Set every texel to `value`.
    pub fn fill(&mut self, value: [f32; 4]) {
        self.texels.fill(value);
    }
}

impl GridBuffer for Texture {
    fn size(&self) -> GridSize {
        self.size
    }
}

fn lerp(a: [f32; 4], b: [f32; 4], t: f32) -> [f32; 4] {
    std::array::from_fn(|i| a[i] + (b[i] - a[i]) * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp() -> Texture {
        // value = x + 10 * y in the red channel
        let size = GridSize::new(4, 3);
        let texels = (0..3)
            .flat_map(|y| (0..4).map(move |x| [(x + 10 * y) as f32, 0.0, 0.0, 1.0]))
            .collect();
        Texture::from_texels(size, EdgeMode::Clamp, texels).unwrap()
    }

    #[test]
    fn new_is_zeroed() {
        let t = Texture::new(GridSize::square(3), EdgeMode::Clamp);
        assert_eq!(t.texels().len(), 9);
        assert!(t.texels().iter().all(|&p| p == [0.0; 4]));
    }

    #[test]
    fn wrong_texel_count_is_rejected() {
        let err = Texture::from_texels(GridSize::square(2), EdgeMode::Clamp, vec![[0.0; 4]; 3]);
        assert!(matches!(err, Err(BackendError::Allocation { .. })));
    }

    #[test]
    fn nearest_sample_hits_texel_centres() {
        let t = ramp();
        assert_eq!(t.sample([0.125, 1.0 / 6.0])[0], 0.0);
        assert_eq!(t.sample([0.625, 0.5])[0], 12.0);
        assert_eq!(t.sample([0.99, 0.99])[0], 23.0);
    }

    #[test]
    fn clamped_fetch_pins_to_edge() {
        let t = ramp();
        assert_eq!(t.fetch(-3, 1)[0], 10.0);
        assert_eq!(t.fetch(9, 9)[0], 23.0);
    }

    #[test]
    fn wrapped_fetch_is_periodic() {
        let mut t = ramp();
        t.edge = EdgeMode::Wrap;
        assert_eq!(t.fetch(-1, 0)[0], 3.0);
        assert_eq!(t.fetch(4, 3)[0], 0.0);
    }

    #[test]
    fn linear_sample_interpolates() {
        let t = ramp();
        // Halfway between texel (1,1) and (2,1).
        let v = t.sample_linear([0.5, 0.5]);
        assert!((v[0] - 11.5).abs() < 1e-5);
        // At a texel centre it reproduces the texel.
        let c = t.sample_linear([0.375, 0.5]);
        assert!((c[0] - 11.0).abs() < 1e-5);
    }
}
