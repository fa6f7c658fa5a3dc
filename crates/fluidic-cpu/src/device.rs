//! The CPU execution device.

use fluidic_core::{BackendError, Device, EdgeMode, GridBuffer, GridSize, KernelArgs, Target};

use crate::kernels::CpuKernel;
use crate::texture::Texture;

/// Runs kernels by shading every target texel in turn.
///
/// The presentation surface is an ordinary [`Texture`] the caller can
/// read back after each draw.
#[derive(Clone, Debug)]
pub struct CpuDevice {
    surface: Texture,
    float_buffers: bool,
    dispatches: u64,
}

impl CpuDevice {
    /// A device presenting to a surface of `surface_size`.
    pub fn new(surface_size: GridSize) -> Self {
        Self {
            surface: Texture::new(surface_size, EdgeMode::Clamp),
            float_buffers: true,
            dispatches: 0,
        }
    }

    /// Report no float buffer support, as a low-end GPU without float
    /// textures would.
    pub fn without_float_buffers(mut self) -> Self {
        self.float_buffers = false;
        self
    }

    /// The presentation surface.
    pub fn surface(&self) -> &Texture {
        &self.surface
    }

    /// Invocations run so far.
    pub fn dispatch_count(&self) -> u64 {
        self.dispatches
    }
}

impl Device for CpuDevice {
    type Buffer = Texture;
    type Kernel = CpuKernel;

    fn supports_float_buffers(&self) -> bool {
        self.float_buffers
    }

    fn create_buffer(&mut self, size: GridSize, edge: EdgeMode) -> Result<Texture, BackendError> {
        if size.is_empty() {
            return Err(BackendError::Allocation {
                reason: format!("{size} texture has no texels"),
            });
        }
        Ok(Texture::new(size, edge))
    }

    fn compile(&mut self, source: &str) -> Result<CpuKernel, BackendError> {
        CpuKernel::compile(source)
    }

    fn dispatch(
        &mut self,
        kernel: &CpuKernel,
        args: &KernelArgs<'_, Texture>,
        target: Target<'_, Texture>,
    ) {
        let out = match target {
            Target::Buffer(buffer) => buffer,
            Target::Surface => &mut self.surface,
        };
        render(kernel, args, out);
        self.dispatches += 1;
    }
}

fn render(kernel: &CpuKernel, args: &KernelArgs<'_, Texture>, out: &mut Texture) {
    let size = out.size();
    let (w, h) = (size.width as f32, size.height as f32);
    let width = size.width as usize;
    let kind = kernel.kind();

    for (i, texel) in out.texels_mut().iter_mut().enumerate() {
        let x = (i % width) as f32;
        let y = (i / width) as f32;
        *texel = kind.shade(args, [(x + 0.5) / w, (y + 0.5) / h]);
    }
}
