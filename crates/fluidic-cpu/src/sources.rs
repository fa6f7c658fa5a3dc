//! Kernel sources shipped with the crate.

use std::borrow::Cow;

use fluidic_core::SourceResolver;

const KERNELS: &[(&str, &str)] = &[
    ("perturb", include_str!("../kernels/perturb.frag")),
    ("advect", include_str!("../kernels/advect.frag")),
    ("jacobi", include_str!("../kernels/jacobi.frag")),
    ("divergence", include_str!("../kernels/divergence.frag")),
    (
        "subtract-pressure-gradient",
        include_str!("../kernels/subtract-pressure-gradient.frag"),
    ),
    ("boundary", include_str!("../kernels/boundary.frag")),
    ("inject", include_str!("../kernels/inject.frag")),
    ("draw", include_str!("../kernels/draw.frag")),
    ("debug-draw", include_str!("../kernels/debug-draw.frag")),
];

const AUXILIARIES: &[(&str, &str)] = &[
    ("neighbours", include_str!("../kernels/neighbours.glsl")),
    ("bilerp", include_str!("../kernels/bilerp.glsl")),
];

/// Resolves the bundled kernel and helper sources by name.
///
/// The same text a GPU backend would compile; [`CpuDevice`](crate::CpuDevice)
/// reads its directives and runs the matching built-in implementation.
#[derive(Clone, Copy, Debug, Default)]
pub struct BundledSources;

impl BundledSources {
    /// Names of all bundled kernels.
    pub fn kernel_names() -> impl Iterator<Item = &'static str> {
        KERNELS.iter().map(|&(name, _)| name)
    }
}

fn lookup(table: &'static [(&'static str, &'static str)], name: &str) -> Option<Cow<'static, str>> {
    table
        .iter()
        .find(|&&(n, _)| n == name)
        .map(|&(_, text)| Cow::Borrowed(text))
}

impl SourceResolver for BundledSources {
    fn kernel(&self, name: &str) -> Option<Cow<'_, str>> {
        lookup(KERNELS, name)
    }

    fn auxiliary(&self, name: &str) -> Option<Cow<'_, str>> {
        lookup(AUXILIARIES, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernels::{CpuKernel, KernelKind};

    #[test]
    fn every_kernel_kind_is_bundled() {
        let names: Vec<_> = BundledSources::kernel_names().collect();
        for kind in KernelKind::ALL {
            assert!(names.contains(&kind.name()), "{kind} missing");
        }
    }

    #[test]
    fn unknown_names_resolve_to_none() {
        assert!(BundledSources.kernel("vorticity").is_none());
        assert!(BundledSources.auxiliary("jacobi").is_none());
    }

    #[test]
    fn bundled_sources_link_with_their_auxiliaries() {
        for kind in KernelKind::ALL {
            let mut text = String::new();
            for aux in kind.auxiliaries() {
                text.push_str(&BundledSources.auxiliary(aux).unwrap());
            }
            text.push_str(&BundledSources.kernel(kind.name()).unwrap());
            assert_eq!(CpuKernel::compile(&text).unwrap().kind(), kind);
        }
    }

    #[test]
    fn body_alone_fails_to_link_when_it_needs_helpers() {
        let body = BundledSources::default().kernel("jacobi").map(|s| s.into_owned());
        assert!(CpuKernel::compile(&body.unwrap()).is_err());
    }
}
