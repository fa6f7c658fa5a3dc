//! Compiled kernel programs and parameter binding.

use fluidic_arena::FieldReader;
use fluidic_core::{
    BackendError, Device, KernelArgs, LoadError, ParamType, SourceResolver, Target, Uniform,
};

use crate::binding::{Bindings, Value};
use crate::report::{BindReport, BindWarning};
use crate::schema::ParamSchema;
use crate::source::KernelSource;

/// A compiled kernel together with the parameter schema discovered in its
/// source.
///
/// The schema is fixed at load time. Programs never hold buffers; every
/// buffer they see arrives through a [`Bindings`] set for one invocation.
#[derive(Debug)]
pub struct Program<K> {
    name: String,
    schema: ParamSchema,
    kernel: K,
}

impl<K> Program<K> {
    /// Resolve, assemble, compile, and scan the named kernel.
    ///
    /// # Errors
    ///
    /// Any [`LoadError`]: missing source, or a compile or link failure
    /// reported by the device.
    pub fn load<D, R>(
        device: &mut D,
        resolver: &R,
        name: &str,
        auxiliaries: &[&str],
    ) -> Result<Self, LoadError>
    where
        D: Device<Kernel = K>,
        R: SourceResolver + ?Sized,
    {
        let source = KernelSource::assemble(resolver, name, auxiliaries)?;
        Self::compile(device, &source)
    }

    /// Compile already-assembled source.
    ///
    /// A compile failure carries the numbered listing of `source`.
    pub fn compile<D>(device: &mut D, source: &KernelSource) -> Result<Self, LoadError>
    where
        D: Device<Kernel = K>,
    {
        let kernel = device.compile(source.text()).map_err(|err| {
            let kernel = source.name().to_string();
            match err {
                BackendError::Compile { log } => LoadError::Compile {
                    kernel,
                    diagnostic: log,
                    listing: source.listing(),
                },
                BackendError::Link { log } => LoadError::Link {
                    kernel,
                    diagnostic: log,
                },
                other => LoadError::Backend {
                    kernel,
                    source: other,
                },
            }
        })?;

        Ok(Self {
            name: source.name().to_string(),
            schema: ParamSchema::parse(source.text()),
            kernel,
        })
    }

    /// Kernel name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared parameters.
    pub fn schema(&self) -> &ParamSchema {
        &self.schema
    }

    /// The compiled kernel.
    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    /// Resolve `bindings` against the schema.
    ///
    /// Bindings are visited in insertion order. A name the schema does not
    /// declare, or a value whose shape disagrees with the declared type, is
    /// skipped with a warning. Sampled values take the next texture unit,
    /// counting from zero for each call; field slots resolve to the front
    /// buffer in `fields`.
    pub fn bind<'a, B>(
        &self,
        fields: FieldReader<'a, B>,
        bindings: &Bindings<'a, B>,
    ) -> (KernelArgs<'a, B>, BindReport) {
        let mut args = KernelArgs::new();
        let mut report = BindReport::default();

        for (name, value) in bindings.iter() {
            let Some(declared) = self.schema.get(name) else {
                self.skip(
                    &mut report,
                    BindWarning::UnknownParameter {
                        kernel: self.name.clone(),
                        name: name.to_string(),
                    },
                );
                continue;
            };

            let uniform = match (declared, value) {
                (ParamType::Float, Value::Float(v)) => Uniform::Float(v),
                (ParamType::Vec2, Value::Vec2(v)) => Uniform::Vec2(v),
                (ParamType::Vec3, Value::Vec3(v)) => Uniform::Vec3(v),
                (ParamType::Vec4, Value::Vec4(v)) => Uniform::Vec4(v),
                (ParamType::Sampler2D, Value::Field(slot)) => {
                    Uniform::Sampler(args.bind_texture(fields.get(slot)))
                }
                (ParamType::Sampler2D, Value::Buffer(buffer)) => {
                    Uniform::Sampler(args.bind_texture(buffer))
                }
                (expected, value) => {
                    self.skip(
                        &mut report,
                        BindWarning::TypeMismatch {
                            kernel: self.name.clone(),
                            name: name.to_string(),
                            expected,
                            found: value.kind(),
                        },
                    );
                    continue;
                }
            };
            args.set(name, uniform);
            report.applied += 1;
        }

        (args, report)
    }

    /// Bind and run one invocation, writing into `target`.
    pub fn execute<'a, D>(
        &self,
        device: &mut D,
        fields: FieldReader<'a, D::Buffer>,
        bindings: &Bindings<'a, D::Buffer>,
        target: Target<'_, D::Buffer>,
    ) -> BindReport
    where
        D: Device<Kernel = K>,
    {
        let (args, report) = self.bind(fields, bindings);
        log::trace!(
            "dispatch '{}' with {} uniforms, {} textures",
            self.name,
            report.applied,
            args.texture_count()
        );
        device.dispatch(&self.kernel, &args, target);
        report
    }

    fn skip(&self, report: &mut BindReport, warning: BindWarning) {
        log::warn!("{warning}; binding skipped");
        report.warnings.push(warning);
    }
}
