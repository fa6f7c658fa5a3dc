//! In-memory kernel sources.

use std::borrow::Cow;
use std::collections::HashMap;

use fluidic_core::SourceResolver;

/// A [`SourceResolver`] backed by two hash maps.
#[derive(Clone, Debug, Default)]
pub struct MapSources {
    kernels: HashMap<String, String>,
    auxiliaries: HashMap<String, String>,
}

/// Parameter declarations of every standard kernel, matching the bindings
/// the fluid pipeline and facade supply.
const STANDARD: &[(&str, &str)] = &[
    (
        "perturb",
        "uniform sampler2D velocity;\nuniform sampler2D source;\nuniform vec3 d;",
    ),
    (
        "advect",
        "uniform sampler2D velocity;\nuniform sampler2D field;\nuniform vec3 d;",
    ),
    (
        "jacobi",
        "uniform sampler2D x;\nuniform sampler2D b;\nuniform vec3 d;\nuniform float alpha;\nuniform float beta;",
    ),
    (
        "divergence",
        "uniform sampler2D velocity;\nuniform vec3 d;",
    ),
    (
        "subtract-pressure-gradient",
        "uniform sampler2D velocity;\nuniform sampler2D pressure;\nuniform vec3 d;",
    ),
    (
        "boundary",
        "uniform sampler2D field;\nuniform vec3 d;\nuniform float multiple;",
    ),
    (
        "inject",
        "uniform sampler2D field;\nuniform vec2 position;\nuniform vec4 color;\nuniform float radius;",
    ),
    ("draw", "uniform sampler2D field;"),
    ("debug-draw", "uniform sampler2D field;"),
];

impl MapSources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stubs for every standard kernel and auxiliary fragment.
    pub fn standard() -> Self {
        let mut sources = Self::new();
        for (name, decls) in STANDARD {
            sources.insert_kernel(
                name,
                format!("#pragma kernel {name}\n{decls}\nvoid main() {{}}"),
            );
        }
        sources.insert_auxiliary("neighbours", "// neighbours\n");
        sources.insert_auxiliary("bilerp", "// bilerp\n");
        sources
    }

    pub fn insert_kernel(&mut self, name: &str, text: impl Into<String>) {
        self.kernels.insert(name.to_string(), text.into());
    }

    pub fn insert_auxiliary(&mut self, name: &str, text: impl Into<String>) {
        self.auxiliaries.insert(name.to_string(), text.into());
    }

    pub fn remove_kernel(&mut self, name: &str) {
        self.kernels.remove(name);
    }
}

impl SourceResolver for MapSources {
    fn kernel(&self, name: &str) -> Option<Cow<'_, str>> {
        self.kernels.get(name).map(|s| Cow::Borrowed(s.as_str()))
    }

    fn auxiliary(&self, name: &str) -> Option<Cow<'_, str>> {
        self.auxiliaries.get(name).map(|s| Cow::Borrowed(s.as_str()))
    }
}
