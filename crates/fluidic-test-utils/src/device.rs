//! A device that records dispatches instead of running them.

use std::collections::HashSet;

use fluidic_core::{
    BackendError, Device, EdgeMode, GridBuffer, GridSize, KernelArgs, Target, TextureUnit, Uniform,
};

/// An opaque buffer identified by a unique id.
#[derive(Debug, PartialEq, Eq)]
pub struct MockBuffer {
    id: u64,
    size: GridSize,
    edge: EdgeMode,
}

impl MockBuffer {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn edge(&self) -> EdgeMode {
        self.edge
    }
}

impl GridBuffer for MockBuffer {
    fn size(&self) -> GridSize {
        self.size
    }
}

/// A "compiled" kernel: the name from its `#pragma kernel` line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MockKernel {
    pub name: String,
    pub id: usize,
}

/// One recorded invocation.
#[derive(Clone, Debug, PartialEq)]
pub struct Dispatch {
    pub kernel: String,
    pub uniforms: Vec<(String, Uniform)>,
    /// Buffer id per texture unit.
    pub textures: Vec<u64>,
    /// Target buffer id, or `None` for the surface.
    pub target: Option<u64>,
}

impl Dispatch {
    pub fn uniform(&self, name: &str) -> Option<Uniform> {
        self.uniforms
            .iter()
            .find(|(n, _)| n == name)
            .map(|&(_, v)| v)
    }

    /// Buffer id bound to a sampler parameter.
    pub fn sampler(&self, name: &str) -> Option<u64> {
        match self.uniform(name)? {
            Uniform::Sampler(TextureUnit(unit)) => self.textures.get(unit as usize).copied(),
            _ => None,
        }
    }

    pub fn float(&self, name: &str) -> Option<f32> {
        match self.uniform(name)? {
            Uniform::Float(v) => Some(v),
            _ => None,
        }
    }

    pub fn vec3(&self, name: &str) -> Option<[f32; 3]> {
        match self.uniform(name)? {
            Uniform::Vec3(v) => Some(v),
            _ => None,
        }
    }
}

/// Records every call made through the [`Device`] trait.
pub struct RecordingDevice {
    next_buffer: u64,
    float_buffers: bool,
    fail_compile: HashSet<String>,
    fail_link: HashSet<String>,
    fail_allocation: bool,
    compiled: usize,
    allocated: usize,
    dispatches: Vec<Dispatch>,
}

impl RecordingDevice {
    pub fn new() -> Self {
        Self {
            next_buffer: 1,
            float_buffers: true,
            fail_compile: HashSet::new(),
            fail_link: HashSet::new(),
            fail_allocation: false,
            compiled: 0,
            allocated: 0,
            dispatches: Vec::new(),
        }
    }

    /// A device that reports no float buffer support.
    pub fn without_float_support() -> Self {
        Self {
            float_buffers: false,
            ..Self::new()
        }
    }

    /// Make compilation of the named kernel fail.
    pub fn fail_compile(&mut self, kernel: &str) {
        self.fail_compile.insert(kernel.to_string());
    }

    /// Make linking of the named kernel fail.
    pub fn fail_link(&mut self, kernel: &str) {
        self.fail_link.insert(kernel.to_string());
    }

    /// Make every subsequent allocation fail.
    pub fn fail_allocation(&mut self) {
        self.fail_allocation = true;
    }

    pub fn compiled(&self) -> usize {
        self.compiled
    }

    pub fn allocated(&self) -> usize {
        self.allocated
    }

    pub fn dispatches(&self) -> &[Dispatch] {
        &self.dispatches
    }

    pub fn last_dispatch(&self) -> Option<&Dispatch> {
        self.dispatches.last()
    }

    /// Kernel names in dispatch order.
    pub fn kernel_sequence(&self) -> Vec<&str> {
        self.dispatches.iter().map(|d| d.kernel.as_str()).collect()
    }

    /// Forget recorded dispatches.
    pub fn clear(&mut self) {
        self.dispatches.clear();
    }
}

impl Default for RecordingDevice {
    fn default() -> Self {
        Self::new()
    }
}

fn kernel_name(source: &str) -> Option<&str> {
    source
        .lines()
        .find_map(|line| line.trim().strip_prefix("#pragma kernel "))
        .map(str::trim)
}

impl Device for RecordingDevice {
    type Buffer = MockBuffer;
    type Kernel = MockKernel;

    fn supports_float_buffers(&self) -> bool {
        self.float_buffers
    }

    fn create_buffer(&mut self, size: GridSize, edge: EdgeMode) -> Result<MockBuffer, BackendError> {
        if self.fail_allocation {
            return Err(BackendError::Allocation {
                reason: "allocation disabled".into(),
            });
        }
        let id = self.next_buffer;
        self.next_buffer += 1;
        self.allocated += 1;
        Ok(MockBuffer { id, size, edge })
    }

    fn compile(&mut self, source: &str) -> Result<MockKernel, BackendError> {
        let name = kernel_name(source)
            .map(str::to_string)
            .unwrap_or_else(|| format!("kernel{}", self.compiled));
        if self.fail_compile.contains(&name) {
            return Err(BackendError::Compile {
                log: format!("ERROR: 0:1: '{name}' : syntax error"),
            });
        }
        if self.fail_link.contains(&name) {
            return Err(BackendError::Link {
                log: format!("'{name}' : unresolved symbol"),
            });
        }
        let id = self.compiled;
        self.compiled += 1;
        Ok(MockKernel { name, id })
    }

    fn dispatch(
        &mut self,
        kernel: &MockKernel,
        args: &KernelArgs<'_, MockBuffer>,
        target: Target<'_, MockBuffer>,
    ) {
        let textures = (0..args.texture_count() as u32)
            .filter_map(|unit| args.texture(TextureUnit(unit)))
            .map(MockBuffer::id)
            .collect();
        self.dispatches.push(Dispatch {
            kernel: kernel.name.clone(),
            uniforms: args
                .uniforms()
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
            textures,
            target: match target {
                Target::Buffer(buffer) => Some(buffer.id),
                Target::Surface => None,
            },
        });
    }
}
