//! Core abstraction traits: the execution device and kernel source lookup.

use std::borrow::Cow;

use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::edge::EdgeMode;
use crate::error::BackendError;
use crate::id::{GridSize, TextureUnit};
use crate::param::Uniform;

/// A 2D grid of samples owned by the field store.
pub trait GridBuffer {
    /// The fixed resolution of this buffer.
    fn size(&self) -> GridSize;
}

/// Resolves kernel source text by name.
///
/// This is the external collaborator that acquires source (from disk, an
/// embedded table, a document, ...). The core only concatenates and scans
/// what it returns.
pub trait SourceResolver {
    /// Source text of the named kernel body, or `None` if unknown.
    fn kernel(&self, name: &str) -> Option<Cow<'_, str>>;

    /// Source text of a named auxiliary fragment (shared helper routines),
    /// or `None` if unknown.
    fn auxiliary(&self, name: &str) -> Option<Cow<'_, str>>;
}

/// Where a kernel invocation writes.
pub enum Target<'a, B> {
    /// Off-screen write into a field store buffer.
    Buffer(&'a mut B),
    /// The device's presentation surface.
    Surface,
}

/// Resolved arguments for exactly one kernel invocation.
///
/// Holds the uniform values by parameter name and the texture-unit table.
/// Buffers are borrowed for the lifetime of the invocation only.
pub struct KernelArgs<'a, B> {
    uniforms: IndexMap<&'a str, Uniform>,
    textures: SmallVec<[&'a B; 4]>,
}

impl<'a, B> KernelArgs<'a, B> {
    /// Create an empty argument set.
    pub fn new() -> Self {
        Self {
            uniforms: IndexMap::new(),
            textures: SmallVec::new(),
        }
    }

    /// Set a uniform value.
    pub fn set(&mut self, name: &'a str, value: Uniform) {
        self.uniforms.insert(name, value);
    }

    /// Bind `buffer` to the next free texture unit and return that unit.
    pub fn bind_texture(&mut self, buffer: &'a B) -> TextureUnit {
        let unit = TextureUnit(self.textures.len() as u32);
        self.textures.push(buffer);
        unit
    }

    /// Look up a uniform by parameter name.
    pub fn uniform(&self, name: &str) -> Option<Uniform> {
        self.uniforms.get(name).copied()
    }

    /// All uniforms in binding order.
    pub fn uniforms(&self) -> impl Iterator<Item = (&'a str, Uniform)> + '_ {
        self.uniforms.iter().map(|(&k, &v)| (k, v))
    }

    /// The buffer bound to a texture unit.
    pub fn texture(&self, unit: TextureUnit) -> Option<&'a B> {
        self.textures.get(unit.0 as usize).copied()
    }

    /// The buffer behind a sampler parameter, following its texture unit.
    pub fn sampler(&self, name: &str) -> Option<&'a B> {
        match self.uniform(name)? {
            Uniform::Sampler(unit) => self.texture(unit),
            _ => None,
        }
    }

    /// Number of texture units in use.
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }
}

impl<B> Default for KernelArgs<'_, B> {
    fn default() -> Self {
        Self::new()
    }
}

/// The execution backend that owns compiled kernels and runs them.
///
/// A GPU implementation maps buffers to float textures and dispatch to a
/// full-screen draw into a framebuffer; the reference implementation in
/// `fluidic-cpu` runs the same contract on the CPU.
///
/// Dispatch is issued in program order and treated as synchronous
/// relative to issue order. There is no fence.
pub trait Device {
    /// Storage for one generation of a field.
    type Buffer: GridBuffer;
    /// A compiled and linked kernel.
    type Kernel;

    /// Whether the device can store floating-point samples. Field storage
    /// requires it.
    fn supports_float_buffers(&self) -> bool;

    /// Allocate a zero-initialised buffer.
    fn create_buffer(&mut self, size: GridSize, edge: EdgeMode)
        -> Result<Self::Buffer, BackendError>;

    /// Compile and link assembled kernel source.
    fn compile(&mut self, source: &str) -> Result<Self::Kernel, BackendError>;

    /// Run one invocation of `kernel` over every sample of `target`.
    fn dispatch(
        &mut self,
        kernel: &Self::Kernel,
        args: &KernelArgs<'_, Self::Buffer>,
        target: Target<'_, Self::Buffer>,
    );
}
