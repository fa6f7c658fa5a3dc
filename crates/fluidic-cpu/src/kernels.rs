//! CPU renditions of the bundled kernels.
//!
//! Compilation scans the assembled source for three directives:
//!
//! - `#pragma kernel <name>` selects which built-in implementation runs;
//! - `#pragma requires <fragment>` names a helper fragment the body calls;
//! - `#pragma provides <fragment>` marks a helper fragment as present.
//!
//! A source without a recognised kernel directive fails to compile. A
//! `requires` with no matching `provides` anywhere in the assembled text
//! fails to link, the way an unresolved function does on a GPU driver.
//!
//! Shading runs once per target texel with a texel-centred `uv` in
//! `[0, 1]²`. Samplers read nearest-texel through the buffer's edge mode;
//! a parameter with no bound value reads as zero.

use std::fmt;

use fluidic_core::{BackendError, KernelArgs};
use smallvec::SmallVec;

use crate::texture::Texture;

/// Upward acceleration per unit of dye brightness.
pub const BUOYANCY: f32 = 1.0;

// ── KernelKind ─────────────────────────────────────────────────────

/// The built-in kernel implementations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KernelKind {
    /// Buoyancy force from dye brightness.
    Perturb,
    /// Semi-Lagrangian advection of `field` along `velocity`.
    Advect,
    /// One Jacobi relaxation sweep.
    Jacobi,
    /// Central-difference divergence of `velocity`.
    Divergence,
    /// Remove the pressure gradient from `velocity`.
    SubtractPressureGradient,
    /// Edge condition scaled by `multiple`.
    Boundary,
    /// Radial splat of `color` around `position`.
    Inject,
    /// Clamp a field to displayable colour.
    Draw,
    /// Map a signed field to displayable colour.
    DebugDraw,
}

impl KernelKind {
    /// Every kernel, in bundle order.
    pub const ALL: [KernelKind; 9] = [
        KernelKind::Perturb,
        KernelKind::Advect,
        KernelKind::Jacobi,
        KernelKind::Divergence,
        KernelKind::SubtractPressureGradient,
        KernelKind::Boundary,
        KernelKind::Inject,
        KernelKind::Draw,
        KernelKind::DebugDraw,
    ];

    /// Look up a kernel by its directive name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }

    /// The directive and source name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Perturb => "perturb",
            Self::Advect => "advect",
            Self::Jacobi => "jacobi",
            Self::Divergence => "divergence",
            Self::SubtractPressureGradient => "subtract-pressure-gradient",
            Self::Boundary => "boundary",
            Self::Inject => "inject",
            Self::Draw => "draw",
            Self::DebugDraw => "debug-draw",
        }
    }

    /// Helper fragments the bundled source of this kernel requires.
    pub fn auxiliaries(self) -> &'static [&'static str] {
        match self {
            Self::Advect => &["bilerp"],
            Self::Jacobi | Self::Divergence | Self::SubtractPressureGradient => &["neighbours"],
            _ => &[],
        }
    }

    /// Compute the output texel at `uv`.
    pub fn shade(self, args: &KernelArgs<'_, Texture>, uv: [f32; 2]) -> [f32; 4] {
        let frag = Fragment { args, uv };
        match self {
            Self::Perturb => frag.perturb(),
            Self::Advect => frag.advect(),
            Self::Jacobi => frag.jacobi(),
            Self::Divergence => frag.divergence(),
            Self::SubtractPressureGradient => frag.subtract_pressure_gradient(),
            Self::Boundary => frag.boundary(),
            Self::Inject => frag.inject(),
            Self::Draw => frag.draw(),
            Self::DebugDraw => frag.debug_draw(),
        }
    }
}

impl fmt::Display for KernelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ── CpuKernel ──────────────────────────────────────────────────────

/// A compiled kernel: the implementation its source selected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CpuKernel {
    kind: KernelKind,
}

impl CpuKernel {
    /// Compile assembled source text.
    pub fn compile(source: &str) -> Result<Self, BackendError> {
        let mut kernel = None;
        let mut requires: SmallVec<[&str; 4]> = SmallVec::new();
        let mut provides: SmallVec<[&str; 4]> = SmallVec::new();

        for (line_no, line) in source.lines().enumerate() {
            let Some(rest) = line.trim().strip_prefix("#pragma") else {
                continue;
            };
            let mut words = rest.split_whitespace();
            match (words.next(), words.next()) {
                (Some("kernel"), Some(name)) => {
                    let kind = KernelKind::from_name(name).ok_or_else(|| BackendError::Compile {
                        log: format!("{line_no}: unknown kernel '{name}'"),
                    })?;
                    if kernel.replace(kind).is_some() {
                        return Err(BackendError::Compile {
                            log: format!("{line_no}: second kernel directive '{name}'"),
                        });
                    }
                }
                (Some("requires"), Some(name)) => requires.push(name),
                (Some("provides"), Some(name)) => provides.push(name),
                _ => {}
            }
        }

        let kind = kernel.ok_or_else(|| BackendError::Compile {
            log: "no kernel directive in source".to_string(),
        })?;
        if let Some(missing) = requires.iter().find(|r| !provides.contains(r)) {
            return Err(BackendError::Link {
                log: format!("{kind}: unresolved fragment '{missing}'"),
            });
        }
        Ok(Self { kind })
    }

    /// The selected implementation.
    pub fn kind(&self) -> KernelKind {
        self.kind
    }

    /// Kernel name.
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }
}

// ── Fragment ───────────────────────────────────────────────────────

struct Fragment<'k, 'a> {
    args: &'k KernelArgs<'a, Texture>,
    uv: [f32; 2],
}

impl Fragment<'_, '_> {
    fn components(&self, name: &str) -> [f32; 4] {
        self.args
            .uniform(name)
            .and_then(|u| u.as_vec4())
            .unwrap_or([0.0; 4])
    }

    fn float(&self, name: &str) -> f32 {
        self.components(name)[0]
    }

    fn sample(&self, name: &str, uv: [f32; 2]) -> [f32; 4] {
        self.args.sampler(name).map_or([0.0; 4], |t| t.sample(uv))
    }

    fn here(&self, name: &str) -> [f32; 4] {
        self.sample(name, self.uv)
    }

    /// Left, right, bottom, top samples one texel step away.
    fn neighbours(&self, name: &str, d: [f32; 4]) -> [[f32; 4]; 4] {
        let [u, v] = self.uv;
        [
            self.sample(name, [u - d[0], v]),
            self.sample(name, [u + d[0], v]),
            self.sample(name, [u, v - d[1]]),
            self.sample(name, [u, v + d[1]]),
        ]
    }

    fn perturb(&self) -> [f32; 4] {
        let d = self.components("d");
        let mut v = self.here("velocity");
        let [r, g, b, _] = self.here("source");
        v[1] += d[2] * BUOYANCY * (r + g + b) / 3.0;
        v
    }

    fn advect(&self) -> [f32; 4] {
        let d = self.components("d");
        let v = self.here("velocity");
        let src = [self.uv[0] - d[2] * v[0], self.uv[1] - d[2] * v[1]];
        self.args
            .sampler("field")
            .map_or([0.0; 4], |t| t.sample_linear(src))
    }

    fn jacobi(&self) -> [f32; 4] {
        let d = self.components("d");
        let alpha = self.float("alpha");
        let beta = self.float("beta");
        let [l, r, b, t] = self.neighbours("x", d);
        let rhs = self.here("b");
        std::array::from_fn(|i| (rhs[i] + alpha * (l[i] + r[i] + b[i] + t[i])) / beta)
    }

    fn divergence(&self) -> [f32; 4] {
        let d = self.components("d");
        let [l, r, b, t] = self.neighbours("velocity", d);
        let div = -0.5 * (d[0] * (r[0] - l[0]) + d[1] * (t[1] - b[1]));
        [div, 0.0, 0.0, 1.0]
    }

    fn subtract_pressure_gradient(&self) -> [f32; 4] {
        let d = self.components("d");
        let [l, r, b, t] = self.neighbours("pressure", d);
        let mut v = self.here("velocity");
        v[0] -= 0.5 * (r[0] - l[0]) / d[0];
        v[1] -= 0.5 * (t[0] - b[0]) / d[1];
        v
    }

    fn boundary(&self) -> [f32; 4] {
        let d = self.components("d");
        let [u, v] = self.uv;
        let mut p = self.uv;
        if u < d[0] {
            p[0] += d[0];
        }
        if u > 1.0 - d[0] {
            p[0] -= d[0];
        }
        if v < d[1] {
            p[1] += d[1];
        }
        if v > 1.0 - d[1] {
            p[1] -= d[1];
        }
        if p == self.uv {
            return self.here("field");
        }
        let multiple = self.float("multiple");
        self.sample("field", p).map(|c| c * multiple)
    }

    fn inject(&self) -> [f32; 4] {
        let position = self.components("position");
        let color = self.components("color");
        let radius = self.float("radius");
        let mut v = self.here("field");
        let dist = (self.uv[0] - position[0]).hypot(self.uv[1] - position[1]);
        if dist < radius {
            let falloff = 1.0 - dist / radius;
            for (c, add) in v.iter_mut().zip(color) {
                *c += add * falloff;
            }
        }
        v
    }

    fn draw(&self) -> [f32; 4] {
        let [r, g, b, _] = self.here("field");
        [r.clamp(0.0, 1.0), g.clamp(0.0, 1.0), b.clamp(0.0, 1.0), 1.0]
    }

    fn debug_draw(&self) -> [f32; 4] {
        let [r, g, b, _] = self.here("field");
        [0.5 + 0.5 * r, 0.5 + 0.5 * g, 0.5 + 0.5 * b, 1.0]
    }
}
